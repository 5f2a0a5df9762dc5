//! Backslash escape decoding.
//!
//! `\XXXXXX` (up to six hex digits, optionally terminated by one whitespace
//! character) is replaced by the literal character when it names an ASCII
//! letter or digit. Anything else is kept as a normalised escape sequence.

use super::chars::{is_token_char, is_whitespace};

/// Something the decoder changed, reported so the caller can log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeEvent {
    /// `\escape` was replaced with the literal character `with`.
    Replaced { escape: String, with: char },
    /// A lone backslash escaping nothing was dropped.
    RemovedBackslash,
}

/// Result of decoding one escape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Replacement text to append in place of the escape.
    pub text: String,
    /// Index of the last character consumed. The scan resumes after it.
    pub last: usize,
    pub event: Option<EscapeEvent>,
}

const MAX_HEX_DIGITS: usize = 6;

fn is_alnum_code(code: u32) -> bool {
    matches!(code, 48..=57 | 65..=90 | 97..=122)
}

/// Decode the escape whose backslash sits at `backslash`.
pub fn decode(chars: &[char], backslash: usize, remove_backslash: bool) -> Decoded {
    let mut i = backslash + 1;
    let mut add = String::new();

    while let Some(&c) = chars.get(i) {
        if add.len() >= MAX_HEX_DIGITS || !(c.is_ascii_hexdigit() || is_whitespace(c)) {
            break;
        }
        add.push(c);
        if is_whitespace(c) {
            break;
        }
        i += 1;
    }

    let code = add
        .chars()
        .filter(char::is_ascii_hexdigit)
        .fold(0u32, |acc, c| acc * 16 + c.to_digit(16).unwrap_or(0));

    let mut event = None;
    let replaced = is_alnum_code(code);
    let text = match char::from_u32(code) {
        Some(with) if replaced => {
            event = Some(EscapeEvent::Replaced {
                escape: add.trim_end().to_string(),
                with,
            });
            with.to_string()
        }
        _ if add == " " => "\\ ".to_string(),
        _ => format!("\\{}", add.trim_matches(is_whitespace)),
    };

    // Hand the terminating character back to the scan unless it was a
    // whitespace that only served to end the escape.
    let at_space = chars.get(i).is_some_and(|&c| is_whitespace(c));
    let next_is_hex = chars.get(i + 1).is_some_and(char::is_ascii_hexdigit);
    if !at_space || (next_is_hex && !replaced) {
        i -= 1;
    }

    if text == "\\" && remove_backslash && !chars.get(i + 1).is_some_and(|&c| is_token_char(c)) {
        return Decoded {
            text: String::new(),
            last: i,
            event: Some(EscapeEvent::RemovedBackslash),
        };
    }

    Decoded {
        text,
        last: i,
        event,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, remove_backslash: bool) -> Decoded {
        let chars: Vec<char> = input.chars().collect();
        decode(&chars, 0, remove_backslash)
    }

    #[test]
    fn test_hex_letter_is_replaced() {
        let d = run("\\41 b", true);
        assert_eq!(d.text, "A");
        // the terminating space is consumed
        assert_eq!(d.last, 3);
        assert_eq!(
            d.event,
            Some(EscapeEvent::Replaced {
                escape: "41".into(),
                with: 'A'
            })
        );
    }

    #[test]
    fn test_six_digit_escape() {
        let d = run("\\000061x", true);
        assert_eq!(d.text, "a");
        assert_eq!(d.last, 6);
    }

    #[test]
    fn test_digit_limit() {
        let d = run("\\1234567", true);
        assert_eq!(d.text, "\\123456");
        assert_eq!(d.last, 6);
        assert_eq!(d.event, None);
    }

    #[test]
    fn test_non_ascii_escape_kept_and_separator_kept_before_hex() {
        let d = run("\\e9 b", true);
        assert_eq!(d.text, "\\e9");
        // space is handed back so `\e9` and `b` stay separate
        assert_eq!(d.last, 2);
    }

    #[test]
    fn test_non_ascii_escape_swallows_separator_before_non_hex() {
        let d = run("\\e9 x", true);
        assert_eq!(d.text, "\\e9");
        assert_eq!(d.last, 3);
    }

    #[test]
    fn test_escaped_token_keeps_backslash() {
        let d = run("\\:", true);
        assert_eq!(d.text, "\\");
        assert_eq!(d.last, 0);
        assert_eq!(d.event, None);
    }

    #[test]
    fn test_unnecessary_backslash_removed() {
        let d = run("\\z", true);
        assert_eq!(d.text, "");
        assert_eq!(d.last, 0);
        assert_eq!(d.event, Some(EscapeEvent::RemovedBackslash));
    }

    #[test]
    fn test_unnecessary_backslash_kept_when_disabled() {
        let d = run("\\z", false);
        assert_eq!(d.text, "\\");
    }

    #[test]
    fn test_escaped_space() {
        let d = run("\\ x", true);
        assert_eq!(d.text, "\\ ");
        assert_eq!(d.last, 1);
    }
}
