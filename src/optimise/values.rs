//! Value-string helpers shared by the parser and optimisers.

use crate::css::chars::{is_escaped, is_whitespace};

/// Split `value` on `sep`, ignoring separators that are escaped, quoted, or
/// inside parentheses.
///
/// An empty value (or one that is just the separator) yields no parts.
pub fn split_outside_strings(sep: char, value: &str) -> Vec<String> {
    if value.is_empty() || (value.chars().count() == 1 && value.starts_with(sep)) {
        return Vec::new();
    }

    let chars: Vec<char> = value.chars().collect();
    let mut parts = vec![String::new()];
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        let escaped = is_escaped(&chars, i);
        if let Some(q) = quote {
            if c == q && !escaped {
                quote = None;
            }
        } else if !escaped {
            match c {
                '"' | '\'' => quote = Some(c),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ if c == sep && depth == 0 => {
                    parts.push(String::new());
                    continue;
                }
                _ => {}
            }
        }
        if let Some(last) = parts.last_mut() {
            last.push(c);
        }
    }
    parts
}

/// Split on CSS whitespace outside strings and parentheses, dropping
/// empty parts.
pub fn split_words(value: &str) -> Vec<String> {
    split_outside_strings(' ', &value.replace(is_whitespace, " "))
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect()
}

/// Join parsed sub-values into one value string.
///
/// `,` markers attach to both neighbours, a `!` marker takes a leading space
/// and attaches to the word after it.
pub fn join_sub_values<S: AsRef<str>>(sub_values: &[S]) -> String {
    let mut out = String::new();
    let mut glue_next = false;
    for sub in sub_values {
        let sub = sub.as_ref();
        if sub.is_empty() {
            continue;
        }
        match sub {
            "," => {
                out.push(',');
                glue_next = true;
            }
            "!" => {
                if !out.is_empty() && !glue_next {
                    out.push(' ');
                }
                out.push('!');
                glue_next = true;
            }
            _ => {
                if !out.is_empty() && !glue_next {
                    out.push(' ');
                }
                out.push_str(sub);
                glue_next = false;
            }
        }
    }
    out
}

/// Characters that make de-quoting unsafe.
fn unsafe_unquoted(c: char) -> bool {
    is_whitespace(c) || matches!(c, '\'' | '"' | '(' | ')')
}

/// Strip the quotes from a quoted string when the content survives unquoted,
/// otherwise normalise the quotes.
pub fn remove_quotes(quoted: &str) -> String {
    let inner = strip_outer(quoted);
    if inner.is_empty() || inner.chars().any(unsafe_unquoted) {
        return normalize_quotes(quoted);
    }
    inner.to_string()
}

/// Use double quotes unless the content already contains one.
pub fn normalize_quotes(quoted: &str) -> String {
    if quoted.contains('"') {
        return quoted.to_string();
    }
    format!("\"{}\"", strip_outer(quoted))
}

fn strip_outer(quoted: &str) -> &str {
    let mut chars = quoted.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// `format(woff)` → `format("woff")`.
pub fn quote_format(sub_value: &str) -> Option<String> {
    let inner = sub_value.strip_prefix("format(")?.strip_suffix(')')?;
    if inner.contains('"') || inner.contains('\'') {
        return None;
    }
    Some(format!("format(\"{inner}\")"))
}
