//! Colour literal repair for colour-valued properties.

use crate::css::properties::{is_color_keyword, is_color_property};
use crate::diagnostics::{Component, Diagnostics};

/// Returns `true` for exactly three or six hex digits.
fn is_bare_hex(value: &str) -> bool {
    matches!(value.len(), 3 | 6) && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Prefixes bare hex colours with `#` and reports anything else that is not
/// a colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorOptimizer;

impl ColorOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Optimise one sub-value of `property`. Only colour properties are
    /// touched; invalid colours are reported at error severity and left as
    /// they are.
    pub fn optimise(
        &self,
        property: &str,
        sub_value: &str,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) -> String {
        if !is_color_property(property)
            || sub_value.starts_with('#')
            || sub_value.contains('(')
            || is_color_keyword(sub_value)
        {
            return sub_value.to_string();
        }

        if is_bare_hex(sub_value) {
            diagnostics.info(
                Component::Color,
                line,
                format!("Fixed colour value: added '#' to '{sub_value}'"),
            );
            return format!("#{sub_value}");
        }

        diagnostics.error(
            Component::Color,
            line,
            format!("Invalid colour value '{sub_value}' for property '{property}'"),
        );
        sub_value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    fn run(property: &str, value: &str) -> (String, Diagnostics) {
        let mut log = Diagnostics::new();
        let out = ColorOptimizer::new().optimise(property, value, 1, &mut log);
        (out, log)
    }

    #[test]
    fn test_bare_hex_gets_prefix() {
        assert_eq!(run("color", "f00").0, "#f00");
        assert_eq!(run("background-color", "FF0000").0, "#FF0000");
        assert_eq!(run("border-left-color", "123").0, "#123");
    }

    #[test]
    fn test_valid_colours_untouched() {
        for value in ["#FF0000", "red", "transparent", "rgb(0,0,0)", "inherit"] {
            let (out, log) = run("color", value);
            assert_eq!(out, value);
            assert!(log.is_empty(), "{value}");
        }
    }

    #[test]
    fn test_invalid_colour_is_reported_not_changed() {
        let (out, log) = run("color", "reddish");
        assert_eq!(out, "reddish");
        assert_eq!(log.iter_severity(Severity::Error).count(), 1);

        // wrong digit count is not a bare hex colour
        let (out, log) = run("color", "ffff");
        assert_eq!(out, "ffff");
        assert!(log.has_errors());
    }

    #[test]
    fn test_other_properties_ignored() {
        let (out, log) = run("margin", "f00");
        assert_eq!(out, "f00");
        assert!(log.is_empty());
    }
}
