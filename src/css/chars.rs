//! Character classification: structural tokens, escapes, whitespace.
//!
//! The parser scans a `[char]` buffer with an explicit cursor, so every helper
//! here takes the buffer and a position rather than a single character.

/// Characters with syntactic meaning to the parser.
pub const TOKENS: &str = "/@}{;:='\"(,\\!$%&)*+.<>?[]^`|~";

/// Whitespace allowed in CSS once `\r` has been normalised away.
pub const WHITESPACE: &str = " \n\t\x0B\x0C";

/// Returns `true` for CSS whitespace.
pub fn is_whitespace(c: char) -> bool {
    WHITESPACE.contains(c)
}

/// Returns `true` if `c` is one of the structural [`TOKENS`].
pub fn is_token_char(c: char) -> bool {
    TOKENS.contains(c)
}

/// Returns `true` if the character at `pos` is escaped.
///
/// A character is escaped when it is preceded by an odd number of
/// consecutive backslashes. `\\:` is therefore *not* an escaped colon.
pub fn is_escaped(chars: &[char], pos: usize) -> bool {
    let backslashes = chars[..pos.min(chars.len())]
        .iter()
        .rev()
        .take_while(|&&c| c == '\\')
        .count();
    backslashes % 2 == 1
}

/// Returns `true` if `chars[pos]` is an unescaped structural token.
pub fn is_token(chars: &[char], pos: usize) -> bool {
    chars
        .get(pos)
        .is_some_and(|&c| is_token_char(c) && !is_escaped(chars, pos))
}

/// Length of the run of ordinary characters (neither token nor whitespace)
/// starting at `pos`.
pub fn ordinary_run(chars: &[char], pos: usize) -> usize {
    chars[pos.min(chars.len())..]
        .iter()
        .take_while(|&&c| !is_token_char(c) && !is_whitespace(c))
        .count()
}

/// Trim CSS whitespace from both ends.
pub fn trim_ws(s: &str) -> &str {
    s.trim_matches(|c: char| is_whitespace(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    // ── Escaping ─────────────────────────────────────────────────────

    #[test]
    fn escaped_by_backslash_parity() {
        for count in 0..=4 {
            let input = format!("{}:", "\\".repeat(count));
            let buf = chars(&input);
            assert_eq!(
                is_escaped(&buf, count),
                count % 2 == 1,
                "{count} leading backslashes"
            );
        }
    }

    #[test]
    fn first_character_is_never_escaped() {
        assert!(!is_escaped(&chars(":"), 0));
    }

    #[test]
    fn escaped_token_is_not_a_token() {
        let buf = chars("a\\:b");
        assert!(!is_token(&buf, 2));
        let buf = chars("a\\\\:b");
        assert!(is_token(&buf, 3));
    }

    // ── Classification ───────────────────────────────────────────────

    #[test]
    fn token_characters() {
        for c in "{};:,@\"'()!".chars() {
            assert!(is_token_char(c), "{c:?}");
        }
        assert!(!is_token_char('a'));
        assert!(!is_token_char('-'));
        assert!(!is_token_char('#'));
    }

    #[test]
    fn whitespace_characters() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\n'));
        assert!(is_whitespace('\x0C'));
        assert!(!is_whitespace('\r'));
        assert!(!is_whitespace('x'));
    }

    #[test]
    fn ordinary_run_stops_at_token_or_space() {
        let buf = chars("color:red");
        assert_eq!(ordinary_run(&buf, 0), 5);
        let buf = chars("a b");
        assert_eq!(ordinary_run(&buf, 0), 1);
        assert_eq!(ordinary_run(&buf, 1), 0);
    }

    #[test]
    fn ordinary_run_keeps_multibyte_text() {
        let buf = chars("ünïcode;");
        assert_eq!(ordinary_run(&buf, 0), 7);
    }

    #[test]
    fn trim_uses_css_whitespace() {
        assert_eq!(trim_ws("\x0B a b \n"), "a b");
    }
}
