//! Numeric sub-value compression and unit conversion.
//!
//! `0.50em` → `.5em`, `0px` → `0`, `010` → `10`. With conversion enabled a
//! value is rewritten to whichever unit along its conversion chain prints
//! shortest (`96px` → `6pc`, `1000ms` → `1s`).

use crate::css::properties::{is_unit, requires_unit};
use crate::css::tokenizer::split_numeric;
use crate::diagnostics::{Component, Diagnostics};

/// Next unit in a conversion chain and the factor as `numerator / denominator`.
fn next_unit(unit: &str) -> Option<(&'static str, f64, f64)> {
    match unit {
        "px" => Some(("pt", 3.0, 4.0)),
        "pt" => Some(("pc", 1.0, 12.0)),
        "mm" => Some(("pc", 60.0, 254.0)),
        "pc" => Some(("cm", 254.0, 600.0)),
        "cm" => Some(("in", 100.0, 254.0)),
        "hz" => Some(("khz", 1.0, 1000.0)),
        "grad" => Some(("deg", 9.0, 10.0)),
        "ms" => Some(("s", 1.0, 1000.0)),
        _ => None,
    }
}

/// Print a decimal number in its shortest form.
///
/// Leading zeros of the integer part and trailing zeros of the fraction are
/// removed, so `0.50` → `.5`, `-0.3` → `-.3`, `1.0` → `1`. Zero is `0`.
pub fn compress_number(number: &str) -> String {
    let (negative, digits) = match number.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, number),
    };
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let int = int.trim_start_matches('0');
    let frac = frac.trim_end_matches('0');

    if int.is_empty() && frac.is_empty() {
        return "0".to_string();
    }
    let mut out = String::with_capacity(number.len());
    if negative {
        out.push('-');
    }
    out.push_str(int);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a float rounded to ten decimal places, then compress it.
fn format_rounded(value: f64) -> String {
    let rounded = (value * 1e10).round() / 1e10;
    compress_number(&format!("{rounded}"))
}

/// Rewrites numeric sub-values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberOptimizer {
    convert_unit: bool,
}

impl NumberOptimizer {
    pub fn new(convert_unit: bool) -> Self {
        Self { convert_unit }
    }

    /// Optimise one sub-value of `property`.
    ///
    /// Non-numeric input (including numbers with unknown units) is returned
    /// unchanged. `font` values are split on `/` so `12px/1.50` is handled
    /// as two numbers.
    pub fn optimise(
        &self,
        property: &str,
        sub_value: &str,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) -> String {
        let parts: Vec<&str> = if property == "font" {
            sub_value.split('/').collect()
        } else {
            vec![sub_value]
        };

        let mut optimised = Vec::with_capacity(parts.len());
        for part in parts {
            let Some((number, mut unit)) = self.analyse(part, line, diagnostics) else {
                return sub_value.to_string();
            };

            if number != "0" {
                if unit.is_empty() && requires_unit(property) {
                    unit = "px".to_string();
                    diagnostics.warn(
                        Component::Number,
                        line,
                        format!("Fixed invalid number: added 'px' unit to '{part}'"),
                    );
                }
            } else if !unit.is_empty() {
                diagnostics.info(
                    Component::Number,
                    line,
                    format!("Optimised number: removed unit '{unit}' from '{part}'"),
                );
                unit.clear();
            }
            optimised.push(format!("{number}{unit}"));
        }
        optimised.join("/")
    }

    /// Split and normalise a numeric sub-value into `(number, unit)`.
    ///
    /// Returns `None` when `input` is not a number with a known unit.
    pub fn analyse(
        &self,
        input: &str,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<(String, String)> {
        if input == "0" {
            return Some(("0".to_string(), String::new()));
        }
        let numeric = split_numeric(input)?;
        if !numeric.unit.is_empty() && !is_unit(numeric.unit) {
            return None;
        }
        let unit = numeric.unit.to_ascii_lowercase();

        let (number, best_unit) = if self.convert_unit {
            self.convert(numeric.number, &unit)
        } else {
            (compress_number(numeric.number), unit.clone())
        };

        if best_unit != unit {
            diagnostics.info(
                Component::Number,
                line,
                format!("Optimised number: converted from '{input}' to '{number}{best_unit}'"),
            );
        } else if number != numeric.number {
            diagnostics.info(
                Component::Number,
                line,
                format!("Optimised number: optimised from '{input}' to '{number}{best_unit}'"),
            );
        }
        Some((number, best_unit))
    }

    /// Walk the conversion chain from `unit` and keep the shortest spelling.
    /// Ties keep the earlier unit.
    fn convert(&self, number: &str, unit: &str) -> (String, String) {
        let mut best = (compress_number(number), unit.to_string());
        let Ok(value) = number.parse::<f64>() else {
            return best;
        };

        let (mut numerator, mut denominator) = (1.0_f64, 1.0_f64);
        let mut current = unit;
        while let Some((next, num, den)) = next_unit(current) {
            numerator *= num;
            denominator *= den;
            let candidate = format_rounded(value * numerator / denominator);
            if candidate.len() + next.len() < best.0.len() + best.1.len() {
                best = (candidate, next.to_string());
            }
            current = next;
        }
        best
    }
}
