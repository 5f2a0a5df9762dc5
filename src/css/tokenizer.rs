//! logos-based lexer for numeric sub-values.
//!
//! A sub-value is numeric when it lexes to exactly one [`NumToken::Number`]
//! optionally followed by one [`NumToken::Unit`] or [`NumToken::Percent`],
//! with nothing left over. `1.5em`, `-.3`, `0` and `50%` qualify; `1e3`,
//! `1.`, `+2px` and `10px 2px` do not.

use logos::Logos;

/// Token produced while checking a numeric sub-value.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumToken {
    /// `12`, `-0.5`, `.25`
    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)")]
    Number,

    /// Alphabetic unit suffix, validated against the unit table separately.
    #[regex(r"[a-zA-Z]+")]
    Unit,

    /// `%`
    #[token("%")]
    Percent,
}

/// A sub-value split into its number and unit text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numeric<'a> {
    pub number: &'a str,
    /// Unit as written, empty when absent.
    pub unit: &'a str,
}

/// Split `input` into number and unit if it matches the numeric grammar.
///
/// The unit is not checked against the unit table.
pub fn split_numeric(input: &str) -> Option<Numeric<'_>> {
    let mut lexer = NumToken::lexer(input).spanned();

    let (first, number_span) = lexer.next()?;
    if first != Ok(NumToken::Number) || number_span.start != 0 {
        return None;
    }

    let unit = match lexer.next() {
        None => "",
        Some((Ok(NumToken::Unit | NumToken::Percent), span)) => &input[span],
        Some(_) => return None,
    };
    if lexer.next().is_some() {
        return None;
    }

    Some(Numeric {
        number: &input[number_span],
        unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Option<(&str, &str)> {
        split_numeric(input).map(|n| (n.number, n.unit))
    }

    // ── Accepted ─────────────────────────────────────────────────────

    #[test]
    fn test_plain_numbers() {
        assert_eq!(split("0"), Some(("0", "")));
        assert_eq!(split("12"), Some(("12", "")));
        assert_eq!(split("-0.5"), Some(("-0.5", "")));
        assert_eq!(split(".25"), Some((".25", "")));
        assert_eq!(split("-.25"), Some(("-.25", "")));
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(split("10px"), Some(("10", "px")));
        assert_eq!(split("1.5em"), Some(("1.5", "em")));
        assert_eq!(split("50%"), Some(("50", "%")));
        assert_eq!(split("100GRAD"), Some(("100", "GRAD")));
    }

    #[test]
    fn test_unknown_unit_still_splits() {
        assert_eq!(split("3furlong"), Some(("3", "furlong")));
    }

    // ── Rejected ─────────────────────────────────────────────────────

    #[test]
    fn test_rejects_non_numbers() {
        assert_eq!(split(""), None);
        assert_eq!(split("red"), None);
        assert_eq!(split("#fff"), None);
        assert_eq!(split("+2px"), None);
        assert_eq!(split("1."), None);
        assert_eq!(split("1e3"), None);
        assert_eq!(split("10px 2px"), None);
        assert_eq!(split("1px/2px"), None);
        assert_eq!(split("50%%"), None);
    }
}
