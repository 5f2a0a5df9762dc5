//! Shorthand dissolving and merging.
//!
//! Works on one block's [`Declarations`] at a time. Depending on the
//! configured [`ShorthandLevel`]:
//!
//! - `Common`: box shorthands (`margin`, `padding`, `border-{color,style,width}`)
//!   and two-value shorthands (`overflow`, `pause`, `cue`, `rest`) are merged
//!   from their longhands, and existing shorthand literals are compressed
//!   (`1px 2px 1px 2px` → `1px 2px`, including both halves of `border-radius`).
//! - `Font`: additionally `font` is dissolved and rebuilt.
//! - `Background`: additionally `background` is dissolved and rebuilt.
//!
//! Dissolving is cascade-aware: a longhand written after the shorthand keeps
//! its value, one written before it is overridden, and `!important` beats
//! either.

use crate::config::ShorthandLevel;
use crate::css::document::Document;
use crate::css::model::{Declarations, Value};
use crate::diagnostics::{Component, Diagnostics};

use super::values::{split_outside_strings, split_words};

/// Shorthands with top/right/bottom/left longhands.
pub const FOUR_VALUE_SHORTHANDS: &[(&str, [&str; 4])] = &[
    (
        "border-color",
        [
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
    ),
    (
        "border-style",
        [
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
        ],
    ),
    (
        "border-width",
        [
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
        ],
    ),
    (
        "margin",
        ["margin-top", "margin-right", "margin-bottom", "margin-left"],
    ),
    (
        "padding",
        ["padding-top", "padding-right", "padding-bottom", "padding-left"],
    ),
];

/// Shorthands with two longhands.
pub const TWO_VALUE_SHORTHANDS: &[(&str, [&str; 2])] = &[
    ("overflow", ["overflow-x", "overflow-y"]),
    ("pause", ["pause-before", "pause-after"]),
    ("rest", ["rest-before", "rest-after"]),
    ("cue", ["cue-before", "cue-after"]),
];

/// `background` longhands in shorthand order with their initial values.
pub const BACKGROUND_DEFAULTS: &[(&str, &str)] = &[
    ("background-image", "none"),
    ("background-size", "auto"),
    ("background-repeat", "repeat"),
    ("background-position", "0 0"),
    ("background-attachment", "scroll"),
    ("background-clip", "border-box"),
    ("background-origin", "padding-box"),
    ("background-color", "transparent"),
];

/// `font` longhands in shorthand order with their initial values. Size and
/// family have no usable default.
pub const FONT_DEFAULTS: &[(&str, &str)] = &[
    ("font-style", "normal"),
    ("font-variant", "normal"),
    ("font-weight", "normal"),
    ("font-size", ""),
    ("line-height", "normal"),
    ("font-family", ""),
];

const FONT_WEIGHTS: &[&str] = &[
    "bold", "bolder", "lighter", "100", "200", "300", "400", "500", "600", "700", "800", "900",
];
const FONT_STYLES: &[&str] = &["italic", "oblique"];
const FONT_SIZE_KEYWORDS: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "xxx-large",
    "smaller", "larger",
];

const BACKGROUND_REPEAT: &[&str] = &["repeat", "repeat-x", "repeat-y", "no-repeat", "space", "round"];
const BACKGROUND_ATTACHMENT: &[&str] = &["scroll", "fixed", "local"];
const BACKGROUND_BOX: &[&str] = &["border-box", "padding-box", "content-box"];
const BACKGROUND_POSITION: &[&str] = &["top", "center", "bottom", "left", "right"];

/// CSS-wide keywords cannot be mixed with other components in a shorthand.
fn is_wide_keyword(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "inherit" | "initial" | "unset" | "revert" | "revert-layer"
    )
}

fn is_opaque(value: &str) -> bool {
    is_wide_keyword(value) || value.contains("var(")
}

// ---------------------------------------------------------------------------
// Compression
// ---------------------------------------------------------------------------

/// Collapse a top/right/bottom/left value list with the usual tie-breaks.
pub fn compress_values<S: AsRef<str>>(values: &[S]) -> String {
    let v: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
    match v.as_slice() {
        [a, b, c, d] if a == b && a == c && a == d => a.to_string(),
        [a, b, c, d] if b == d && a == c => format!("{a} {b}"),
        [a, b, c, d] if b == d => format!("{a} {b} {c}"),
        [a, b, c] if a == b && a == c => a.to_string(),
        [a, b, c] if a == c => format!("{a} {b}"),
        [a, b] if a == b => a.to_string(),
        _ => v.join(" "),
    }
}

/// Re-collapse an existing shorthand literal.
pub fn compress_shorthand(value: &str) -> String {
    compress_values(&split_words(value))
}

/// Compress both halves of a `border-radius` value. More than one `/` is
/// invalid and left alone.
pub fn compress_border_radius(value: &str) -> String {
    let halves: Vec<&str> = value.split('/').collect();
    if halves.len() > 2 {
        return value.to_string();
    }
    halves
        .iter()
        .map(|half| compress_shorthand(half.trim()))
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Dissolving
// ---------------------------------------------------------------------------

/// Expand a four-value shorthand into its longhands.
///
/// Returns `None` for properties that are not four-value shorthands or for
/// values with more than four components.
pub fn dissolve_four_value_shorthand(
    property: &str,
    value: &Value,
) -> Option<Vec<(&'static str, Value)>> {
    let (_, sides) = FOUR_VALUE_SHORTHANDS
        .iter()
        .find(|(name, _)| *name == property)?;
    let words = split_words(&value.text);
    let pattern: [usize; 4] = match words.len() {
        1 => [0, 0, 0, 0],
        2 => [0, 1, 0, 1],
        3 => [0, 1, 2, 1],
        4 => [0, 1, 2, 3],
        _ => return None,
    };
    Some(
        sides
            .iter()
            .zip(pattern)
            .map(|(side, i)| (*side, Value::new(words[i].clone()).with_important(value.important)))
            .collect(),
    )
}

fn looks_like_font_size(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        || word.starts_with("calc(")
        || FONT_SIZE_KEYWORDS.contains(&word)
}

/// Expand a `font` shorthand into its six longhands.
///
/// Returns `None` when the value has no font size or no family, which covers
/// system fonts and CSS-wide keywords.
pub fn dissolve_font(value: &Value) -> Option<Vec<(&'static str, Value)>> {
    let text = value.text.trim();
    if is_opaque(text) {
        return None;
    }
    let mut families = split_outside_strings(',', text).into_iter();
    let words = split_words(&families.next()?);

    let mut style = None;
    let mut variant = None;
    let mut weight = None;
    let mut size: Option<String> = None;
    let mut line_height = None;
    let mut family_words: Vec<String> = Vec::new();

    let mut iter = words.into_iter().peekable();
    while let Some(word) = iter.next() {
        if size.is_some() {
            if family_words.is_empty() && line_height.is_none() {
                if word == "/" {
                    line_height = iter.next();
                    continue;
                }
                if let Some(rest) = word.strip_prefix('/') {
                    line_height = Some(rest.to_string());
                    continue;
                }
            }
            family_words.push(word);
            continue;
        }

        let lower = word.to_ascii_lowercase();
        if lower == "normal" {
            continue;
        } else if weight.is_none() && FONT_WEIGHTS.contains(&lower.as_str()) {
            weight = Some(word);
        } else if variant.is_none() && lower == "small-caps" {
            variant = Some(word);
        } else if style.is_none() && FONT_STYLES.contains(&lower.as_str()) {
            style = Some(word);
        } else if looks_like_font_size(&lower) {
            match word.split_once('/') {
                Some((s, lh)) if !lh.is_empty() => {
                    size = Some(s.to_string());
                    line_height = Some(lh.to_string());
                }
                Some((s, _)) => {
                    size = Some(s.to_string());
                    if iter.peek().is_some() {
                        line_height = iter.next();
                    }
                }
                None => size = Some(word),
            }
        } else {
            return None;
        }
    }

    let size = size?;
    if family_words.is_empty() {
        return None;
    }
    let mut family = if family_words.len() > 1
        && !family_words[0].starts_with(|c: char| c == '"' || c == '\'')
    {
        format!("\"{}\"", family_words.join(" "))
    } else {
        family_words.join(" ")
    };
    for rest in families {
        family.push(',');
        family.push_str(rest.trim());
    }

    let important = value.important;
    let make = |text: Option<String>, default: &str| {
        Value::new(text.unwrap_or_else(|| default.to_string())).with_important(important)
    };
    Some(vec![
        ("font-style", make(style, "normal")),
        ("font-variant", make(variant, "normal")),
        ("font-weight", make(weight, "normal")),
        ("font-size", make(Some(size), "")),
        ("line-height", make(line_height, "normal")),
        ("font-family", make(Some(family), "")),
    ])
}

/// Per-layer components found while dissolving `background`.
#[derive(Default)]
struct Layer {
    image: Option<String>,
    repeat: Vec<String>,
    position: Vec<String>,
    attachment: Option<String>,
    boxes: Vec<String>,
    color: Option<String>,
}

/// Expand a `background` shorthand into its eight longhands.
///
/// Returns `None` for gradients, values using the `position / size` syntax,
/// CSS-wide keywords and anything with a component it cannot classify.
pub fn dissolve_background(value: &Value) -> Option<Vec<(&'static str, Value)>> {
    let text = value.text.trim();
    if text.to_ascii_lowercase().contains("gradient(") || is_opaque(text) {
        return None;
    }

    let raw_layers = split_outside_strings(',', text);
    let layer_count = raw_layers.len();
    let mut layers = Vec::with_capacity(layer_count);
    for (index, raw) in raw_layers.iter().enumerate() {
        let mut layer = Layer::default();
        for word in split_words(raw) {
            let lower = word.to_ascii_lowercase();
            if !word.contains('(') && word.contains('/') {
                return None;
            }
            if layer.image.is_none() && (lower.starts_with("url(") || lower == "none") {
                layer.image = Some(word);
            } else if BACKGROUND_REPEAT.contains(&lower.as_str()) {
                layer.repeat.push(word);
            } else if BACKGROUND_ATTACHMENT.contains(&lower.as_str()) {
                layer.attachment = Some(word);
            } else if BACKGROUND_BOX.contains(&lower.as_str()) {
                layer.boxes.push(word);
            } else if BACKGROUND_POSITION.contains(&lower.as_str())
                || word.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
            {
                layer.position.push(word);
            } else if layer.color.is_none() && index + 1 == layer_count {
                layer.color = Some(word);
            } else {
                return None;
            }
        }
        layers.push(layer);
    }
    if layers.is_empty() {
        return None;
    }

    let image = layer_list(&layers, |l| l.image.clone(), "none");
    let repeat = layer_list(&layers, |l| joined(&l.repeat), "repeat");
    let position = layer_list(&layers, |l| joined(&l.position), "0 0");
    let attachment = layer_list(&layers, |l| l.attachment.clone(), "scroll");
    let origin = layer_list(&layers, |l| l.boxes.first().cloned(), "padding-box");
    let clip = layer_list(
        &layers,
        |l| l.boxes.get(1).or(l.boxes.first()).cloned(),
        "border-box",
    );
    let color = layers
        .last()
        .and_then(|l| l.color.clone())
        .unwrap_or_else(|| "transparent".to_string());

    let important = value.important;
    let make = |text: String| Value::new(text).with_important(important);
    Some(vec![
        ("background-image", make(image)),
        ("background-size", make("auto".to_string())),
        ("background-repeat", make(repeat)),
        ("background-position", make(position)),
        ("background-attachment", make(attachment)),
        ("background-clip", make(clip)),
        ("background-origin", make(origin)),
        ("background-color", make(color)),
    ])
}

/// One comma-separated entry per layer, collapsed to `default` when every
/// layer uses it.
fn layer_list(layers: &[Layer], pick: impl Fn(&Layer) -> Option<String>, default: &str) -> String {
    let values: Vec<String> = layers
        .iter()
        .map(|layer| pick(layer).unwrap_or_else(|| default.to_string()))
        .collect();
    if values.iter().all(|v| v == default) {
        default.to_string()
    } else {
        values.join(",")
    }
}

fn joined(words: &[String]) -> Option<String> {
    (!words.is_empty()).then(|| words.join(" "))
}

/// Replace `shorthand` by `longhands` at its position, respecting cascade
/// order against longhands already in the block.
fn apply_dissolved(
    declarations: &mut Declarations,
    shorthand: &str,
    longhands: Vec<(&'static str, Value)>,
) {
    let Some(mut at) = declarations.position(shorthand) else {
        return;
    };
    declarations.remove(shorthand);

    for (name, value) in longhands {
        if value.text.is_empty() {
            continue;
        }
        match declarations.position(name) {
            Some(pos) if pos >= at => {
                // written after the shorthand
                let explicit_wins = declarations
                    .get(name)
                    .is_some_and(|existing| existing.important || !value.important);
                if !explicit_wins {
                    declarations.remove(name);
                    declarations.insert_at(at, name, value);
                    at += 1;
                }
            }
            Some(_) => {
                // written before the shorthand
                if declarations
                    .get(name)
                    .is_some_and(|existing| existing.important && !value.important)
                {
                    continue;
                }
                declarations.remove(name);
                at -= 1;
                declarations.insert_at(at, name, value);
                at += 1;
            }
            None => {
                declarations.insert_at(at, name, value);
                at += 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Collect the values of `names` if every one is present.
fn all_present<'a>(declarations: &'a Declarations, names: &[&str]) -> Option<Vec<&'a Value>> {
    names.iter().map(|name| declarations.get(name)).collect()
}

fn uniform_importance(values: &[&Value]) -> Option<bool> {
    let first = values.first()?.important;
    values.iter().all(|v| v.important == first).then_some(first)
}

/// Remove `names` and insert `shorthand` where the first of them was.
fn replace_with_shorthand(
    declarations: &mut Declarations,
    names: &[&str],
    shorthand: &str,
    value: Value,
) -> usize {
    let at = names
        .iter()
        .filter_map(|name| declarations.position(name))
        .min()
        .unwrap_or(declarations.len());
    for name in names {
        declarations.remove(name);
    }
    declarations.insert_at(at, shorthand, value);
    at
}

fn merge_four_value_shorthands(declarations: &mut Declarations) -> Vec<&'static str> {
    let mut merged = Vec::new();
    for (shorthand, sides) in FOUR_VALUE_SHORTHANDS {
        if declarations.contains(shorthand) {
            continue;
        }
        let Some(values) = all_present(declarations, sides) else {
            continue;
        };
        let Some(important) = uniform_importance(&values) else {
            continue;
        };
        let texts: Vec<&str> = values.iter().map(|v| v.text.as_str()).collect();
        let all_same = texts.iter().all(|t| *t == texts[0]);
        if !all_same && texts.iter().any(|t| is_opaque(t)) {
            continue;
        }
        let text = compress_values(&texts);
        replace_with_shorthand(
            declarations,
            sides,
            shorthand,
            Value::new(text).with_important(important),
        );
        merged.push(*shorthand);
    }
    merged
}

fn merge_two_value_shorthands(declarations: &mut Declarations) -> Vec<&'static str> {
    let mut merged = Vec::new();
    for (shorthand, pair) in TWO_VALUE_SHORTHANDS {
        if declarations.contains(shorthand) {
            continue;
        }
        let Some(values) = all_present(declarations, pair) else {
            continue;
        };
        let Some(important) = uniform_importance(&values) else {
            continue;
        };
        let (first, second) = (&values[0].text, &values[1].text);
        if first != second && (is_opaque(first) || is_opaque(second)) {
            continue;
        }
        let text = if first == second {
            first.clone()
        } else {
            format!("{first} {second}")
        };
        replace_with_shorthand(
            declarations,
            pair,
            shorthand,
            Value::new(text).with_important(important),
        );
        merged.push(*shorthand);
    }
    merged
}

/// Rebuild `font` from its longhands. Needs size and family.
fn merge_font(declarations: &mut Declarations) -> bool {
    if declarations.contains("font")
        || !declarations.contains("font-size")
        || !declarations.contains("font-family")
    {
        return false;
    }
    let present: Vec<&Value> = FONT_DEFAULTS
        .iter()
        .filter_map(|(name, _)| declarations.get(name))
        .collect();
    let Some(important) = uniform_importance(&present) else {
        return false;
    };
    if present.iter().any(|v| is_opaque(&v.text)) {
        return false;
    }

    let mut parts = Vec::new();
    let mut preserve_variant = false;
    for (name, default) in FONT_DEFAULTS {
        let Some(value) = declarations.get(name) else {
            continue;
        };
        match *name {
            "line-height" => {}
            "font-variant" if value.text != "small-caps" => {
                preserve_variant = value.text != *default;
            }
            _ if value.text == *default => {}
            "font-size" => match declarations.get("line-height") {
                Some(lh) if lh.text != "normal" => parts.push(format!("{}/{}", value.text, lh.text)),
                _ => parts.push(value.text.clone()),
            },
            _ => parts.push(value.text.clone()),
        }
    }

    let removed: Vec<&str> = FONT_DEFAULTS
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !(preserve_variant && *name == "font-variant"))
        .collect();
    let at = names_min_position(declarations, FONT_DEFAULTS);
    for name in &removed {
        declarations.remove(name);
    }
    declarations.insert_at(at, "font", Value::new(parts.join(" ")).with_important(important));

    // `font` resets the variant, so a preserved one must follow it.
    if preserve_variant {
        if let Some(variant) = declarations.remove("font-variant") {
            declarations.insert_at(at + 1, "font-variant", variant);
        }
    }
    true
}

fn names_min_position(declarations: &Declarations, table: &[(&str, &str)]) -> usize {
    table
        .iter()
        .filter_map(|(name, _)| declarations.position(name))
        .min()
        .unwrap_or(declarations.len())
}

/// Rebuild `background` from its longhands. Needs colour and image.
fn merge_background(declarations: &mut Declarations) -> bool {
    if declarations.contains("background") {
        return false;
    }
    let (Some(image), Some(color)) = (
        declarations.get("background-image"),
        declarations.get("background-color"),
    ) else {
        return false;
    };
    let present: Vec<&Value> = BACKGROUND_DEFAULTS
        .iter()
        .filter_map(|(name, _)| declarations.get(name))
        .collect();
    let Some(important) = uniform_importance(&present) else {
        return false;
    };
    if present
        .iter()
        .any(|v| v.text.to_ascii_lowercase().contains("gradient(") || is_opaque(&v.text))
    {
        return false;
    }
    if declarations
        .get("background-size")
        .is_some_and(|size| size.text != "auto")
    {
        return false;
    }
    if split_outside_strings(',', &color.text).len() > 1 {
        return false;
    }

    let images: Vec<String> = split_outside_strings(',', &image.text)
        .into_iter()
        .map(|s| s.trim().to_string())
        .collect();
    let layer_count = images.len().max(1);
    let layer_value = |name: &str, index: usize| -> Option<String> {
        let parts = split_outside_strings(',', &declarations.get(name)?.text);
        if parts.is_empty() {
            return None;
        }
        Some(parts[index % parts.len()].trim().to_string())
    };

    let mut layers = Vec::with_capacity(layer_count);
    for index in 0..layer_count {
        let mut words = Vec::new();
        let image = images.get(index).map(String::as_str).unwrap_or("none");
        let has_image = image != "none";
        if has_image {
            words.push(image.to_string());
            for (name, default) in [
                ("background-repeat", "repeat"),
                ("background-position", "0 0"),
                ("background-attachment", "scroll"),
            ] {
                if let Some(v) = layer_value(name, index).filter(|v| v != default) {
                    words.push(v);
                }
            }
        }
        let origin = layer_value("background-origin", index).unwrap_or_else(|| "padding-box".into());
        let clip = layer_value("background-clip", index).unwrap_or_else(|| "border-box".into());
        if origin != "padding-box" || clip != "border-box" {
            words.push(origin.clone());
            if clip != origin {
                words.push(clip);
            }
        }
        if index + 1 == layer_count && color.text != "transparent" {
            words.push(color.text.clone());
        }
        if words.is_empty() {
            words.push("none".to_string());
        }
        layers.push(words.join(" "));
    }

    let names: Vec<&str> = BACKGROUND_DEFAULTS.iter().map(|(name, _)| *name).collect();
    replace_with_shorthand(
        declarations,
        &names,
        "background",
        Value::new(layers.join(",")).with_important(important),
    );
    true
}

// ---------------------------------------------------------------------------
// ShorthandOptimizer
// ---------------------------------------------------------------------------

/// Applies shorthand optimisation to every block of a document.
#[derive(Debug, Clone, Copy)]
pub struct ShorthandOptimizer {
    level: ShorthandLevel,
}

impl ShorthandOptimizer {
    pub fn new(level: ShorthandLevel) -> Self {
        Self { level }
    }

    /// Optimise every block in `document`.
    pub fn process(&self, document: &mut Document, diagnostics: &mut Diagnostics) {
        if self.level == ShorthandLevel::Off {
            return;
        }
        for id in document.walk() {
            self.process_block(&mut document[id].declarations, diagnostics);
        }
    }

    /// Optimise one block's declarations.
    pub fn process_block(&self, declarations: &mut Declarations, diagnostics: &mut Diagnostics) {
        if self.level == ShorthandLevel::Off || declarations.is_empty() {
            return;
        }

        if self.level >= ShorthandLevel::Font {
            if let Some(longhands) = declarations.get("font").and_then(dissolve_font) {
                apply_dissolved(declarations, "font", longhands);
            }
        }
        if self.level >= ShorthandLevel::Background {
            if let Some(longhands) = declarations.get("background").and_then(dissolve_background) {
                apply_dissolved(declarations, "background", longhands);
            }
        }

        // A box shorthand next to one of its own longhands.
        for (shorthand, sides) in FOUR_VALUE_SHORTHANDS {
            if !sides.iter().any(|side| declarations.contains(side)) {
                continue;
            }
            if let Some(longhands) = declarations
                .get(shorthand)
                .and_then(|value| dissolve_four_value_shorthand(shorthand, value))
            {
                apply_dissolved(declarations, shorthand, longhands);
            }
        }

        for shorthand in merge_four_value_shorthands(declarations)
            .into_iter()
            .chain(merge_two_value_shorthands(declarations))
        {
            diagnostics.info(
                Component::Shorthand,
                0,
                format!("Merged longhands into '{shorthand}'"),
            );
        }

        for (shorthand, _) in FOUR_VALUE_SHORTHANDS {
            if let Some(value) = declarations.get(shorthand) {
                let compressed = Value::new(compress_shorthand(&value.text))
                    .with_important(value.important);
                declarations.set(*shorthand, compressed);
            }
        }
        if let Some(value) = declarations.get("border-radius") {
            let compressed = Value::new(compress_border_radius(&value.text))
                .with_important(value.important);
            declarations.set("border-radius", compressed);
        }

        if self.level >= ShorthandLevel::Font && merge_font(declarations) {
            diagnostics.info(Component::Shorthand, 0, "Merged longhands into 'font'");
        }
        if self.level >= ShorthandLevel::Background && merge_background(declarations) {
            diagnostics.info(Component::Shorthand, 0, "Merged longhands into 'background'");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(pairs: &[(&str, &str)]) -> Declarations {
        pairs
            .iter()
            .map(|(k, v)| match v.strip_suffix("!important") {
                Some(text) => (*k, Value::important(text)),
                None => (*k, Value::new(*v)),
            })
            .collect()
    }

    fn render(declarations: &Declarations) -> Vec<String> {
        declarations
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect()
    }

    fn optimise(level: ShorthandLevel, pairs: &[(&str, &str)]) -> Vec<String> {
        let mut declarations = block(pairs);
        ShorthandOptimizer::new(level).process_block(&mut declarations, &mut Diagnostics::new());
        render(&declarations)
    }

    // ── Compression ──────────────────────────────────────────────────

    #[test]
    fn test_compress_shorthand() {
        assert_eq!(compress_shorthand("1px 2px 1px 2px"), "1px 2px");
        assert_eq!(compress_shorthand("1px 1px 1px 1px"), "1px");
        assert_eq!(compress_shorthand("1px 2px 3px 2px"), "1px 2px 3px");
        assert_eq!(compress_shorthand("1px 2px 3px 4px"), "1px 2px 3px 4px");
        assert_eq!(compress_shorthand("1px 2px 1px"), "1px 2px");
        assert_eq!(compress_shorthand("3px 3px"), "3px");
        assert_eq!(compress_shorthand("0 auto"), "0 auto");
    }

    #[test]
    fn test_border_radius_halves() {
        assert_eq!(compress_border_radius("1px 1px/2px 2px 2px 2px"), "1px/2px");
        assert_eq!(compress_border_radius("4px 4px 4px 4px"), "4px");
        assert_eq!(compress_border_radius("1px/2px/3px"), "1px/2px/3px");
    }

    // ── Four-value shorthands ────────────────────────────────────────

    #[test]
    fn test_merge_then_dissolve_round_trip() {
        let merged = optimise(
            ShorthandLevel::Common,
            &[
                ("margin-top", "1px"),
                ("margin-right", "1px"),
                ("margin-bottom", "1px"),
                ("margin-left", "1px"),
            ],
        );
        assert_eq!(merged, vec!["margin:1px"]);

        let sides = dissolve_four_value_shorthand("margin", &Value::new("1px")).unwrap();
        assert_eq!(sides.len(), 4);
        assert!(sides.iter().all(|(_, v)| v.text == "1px"));
    }

    #[test]
    fn test_dissolve_patterns() {
        let texts = |value: &str| -> Vec<String> {
            dissolve_four_value_shorthand("padding", &Value::new(value))
                .unwrap()
                .into_iter()
                .map(|(_, v)| v.text)
                .collect()
        };
        assert_eq!(texts("1 2"), vec!["1", "2", "1", "2"]);
        assert_eq!(texts("1 2 3"), vec!["1", "2", "3", "2"]);
        assert_eq!(texts("1 2 3 4"), vec!["1", "2", "3", "4"]);
        assert!(dissolve_four_value_shorthand("padding", &Value::new("1 2 3 4 5")).is_none());
        assert!(dissolve_four_value_shorthand("color", &Value::new("red")).is_none());
    }

    #[test]
    fn test_mixed_importance_is_not_merged() {
        let out = optimise(
            ShorthandLevel::Common,
            &[
                ("padding-top", "1px!important"),
                ("padding-right", "1px"),
                ("padding-bottom", "1px"),
                ("padding-left", "1px"),
            ],
        );
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_longhand_after_shorthand_wins() {
        let out = optimise(
            ShorthandLevel::Common,
            &[("margin", "0"), ("margin-top", "5px")],
        );
        assert_eq!(out, vec!["margin:5px 0 0"]);
    }

    #[test]
    fn test_shorthand_after_longhand_wins() {
        let out = optimise(
            ShorthandLevel::Common,
            &[("margin-top", "5px"), ("margin", "0")],
        );
        assert_eq!(out, vec!["margin:0"]);
    }

    #[test]
    fn test_important_longhand_survives_dissolve() {
        let out = optimise(
            ShorthandLevel::Common,
            &[("margin-top", "5px!important"), ("margin", "0")],
        );
        assert_eq!(
            out,
            vec![
                "margin-top:5px!important",
                "margin-right:0",
                "margin-bottom:0",
                "margin-left:0"
            ]
        );
    }

    #[test]
    fn test_existing_literal_is_compressed() {
        let out = optimise(
            ShorthandLevel::Common,
            &[("color", "red"), ("border-width", "1px 1px 1px 1px!important")],
        );
        assert_eq!(out, vec!["color:red", "border-width:1px!important"]);
    }

    #[test]
    fn test_off_level_does_nothing() {
        let out = optimise(ShorthandLevel::Off, &[("margin", "1px 1px")]);
        assert_eq!(out, vec!["margin:1px 1px"]);
    }

    // ── Two-value shorthands ─────────────────────────────────────────

    #[test]
    fn test_two_value_merge() {
        assert_eq!(
            optimise(
                ShorthandLevel::Common,
                &[("overflow-x", "hidden"), ("overflow-y", "hidden")]
            ),
            vec!["overflow:hidden"]
        );
        assert_eq!(
            optimise(
                ShorthandLevel::Common,
                &[("cue-before", "url(a)"), ("cue-after", "url(b)")]
            ),
            vec!["cue:url(a) url(b)"]
        );
        assert_eq!(
            optimise(
                ShorthandLevel::Common,
                &[("pause-before", "1s!important"), ("pause-after", "2s")]
            )
            .len(),
            2
        );
    }

    // ── Font ─────────────────────────────────────────────────────────

    #[test]
    fn test_font_round_trip() {
        let out = optimise(
            ShorthandLevel::Font,
            &[("font", "italic bold 12px/1.5 Arial,sans-serif")],
        );
        assert_eq!(out, vec!["font:italic bold 12px/1.5 Arial,sans-serif"]);
    }

    #[test]
    fn test_font_defaults_dropped() {
        let out = optimise(
            ShorthandLevel::Font,
            &[("font", "normal normal 400 12px Times New Roman")],
        );
        assert_eq!(out, vec!["font:400 12px \"Times New Roman\""]);
    }

    #[test]
    fn test_font_system_keyword_untouched() {
        let out = optimise(ShorthandLevel::Font, &[("font", "inherit")]);
        assert_eq!(out, vec!["font:inherit"]);
        let out = optimise(ShorthandLevel::Font, &[("font", "caption")]);
        assert_eq!(out, vec!["font:caption"]);
    }

    #[test]
    fn test_font_merge_from_longhands() {
        let out = optimise(
            ShorthandLevel::Font,
            &[
                ("font-weight", "bold"),
                ("font-size", "2em"),
                ("line-height", "1.2"),
                ("font-family", "serif"),
            ],
        );
        assert_eq!(out, vec!["font:bold 2em/1.2 serif"]);
    }

    #[test]
    fn test_font_variant_preserved_after_font() {
        let out = optimise(
            ShorthandLevel::Font,
            &[
                ("font-variant", "all-small-caps"),
                ("font-size", "2em"),
                ("font-family", "serif"),
            ],
        );
        assert_eq!(out, vec!["font:2em serif", "font-variant:all-small-caps"]);
    }

    #[test]
    fn test_font_needs_family() {
        let out = optimise(ShorthandLevel::Font, &[("font-size", "2em")]);
        assert_eq!(out, vec!["font-size:2em"]);
    }

    #[test]
    fn test_font_not_touched_at_common() {
        let out = optimise(ShorthandLevel::Common, &[("font", "normal 12px serif")]);
        assert_eq!(out, vec!["font:normal 12px serif"]);
    }

    // ── Background ───────────────────────────────────────────────────

    #[test]
    fn test_background_defaults_dropped() {
        let out = optimise(
            ShorthandLevel::Background,
            &[
                ("background-image", "none"),
                ("background-color", "red"),
                ("background-repeat", "repeat"),
            ],
        );
        assert_eq!(out, vec!["background:red"]);
    }

    #[test]
    fn test_background_round_trip() {
        let out = optimise(
            ShorthandLevel::Background,
            &[("background", "url(a.png) no-repeat 0 0 red")],
        );
        assert_eq!(out, vec!["background:url(a.png) no-repeat red"]);
    }

    #[test]
    fn test_background_multiple_layers() {
        let out = optimise(
            ShorthandLevel::Background,
            &[("background", "url(a.png) no-repeat,url(b.png) red")],
        );
        assert_eq!(out, vec!["background:url(a.png) no-repeat,url(b.png) red"]);
    }

    #[test]
    fn test_background_gradient_left_alone() {
        let out = optimise(
            ShorthandLevel::Background,
            &[("background", "linear-gradient(red,blue)")],
        );
        assert_eq!(out, vec!["background:linear-gradient(red,blue)"]);

        let out = optimise(
            ShorthandLevel::Background,
            &[
                ("background-image", "linear-gradient(red,blue)"),
                ("background-color", "red"),
            ],
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_background_size_syntax_left_alone() {
        let out = optimise(
            ShorthandLevel::Background,
            &[("background", "url(a.png) center/cover")],
        );
        assert_eq!(out, vec!["background:url(a.png) center/cover"]);
    }

    #[test]
    fn test_background_box_keywords() {
        let out = optimise(
            ShorthandLevel::Background,
            &[("background", "url(a.png) content-box red")],
        );
        assert_eq!(out, vec!["background:url(a.png) content-box red"]);
    }

    #[test]
    fn test_background_needs_image_and_color() {
        let out = optimise(
            ShorthandLevel::Background,
            &[("background-color", "red"), ("background-repeat", "no-repeat")],
        );
        assert_eq!(out, vec!["background-color:red", "background-repeat:no-repeat"]);
    }

    #[test]
    fn test_background_all_defaults_is_none() {
        let out = optimise(ShorthandLevel::Background, &[("background", "none")]);
        assert_eq!(out, vec!["background:none"]);
    }
}
