//! Static lookup tables: property whitelist, units, colour keywords,
//! at-rule body kinds.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::config::CssLevel;

// ── CSS levels ───────────────────────────────────────────────────────

/// Set of CSS levels a property is defined in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levels(u8);

impl Levels {
    const CSS1: u8 = 1;
    const CSS2: u8 = 1 << 1;
    const CSS21: u8 = 1 << 2;
    const CSS3: u8 = 1 << 3;

    pub const ALL: Levels = Levels(Self::CSS1 | Self::CSS2 | Self::CSS21 | Self::CSS3);
    pub const FROM_CSS2: Levels = Levels(Self::CSS2 | Self::CSS21 | Self::CSS3);
    pub const CSS2_AND_3: Levels = Levels(Self::CSS2 | Self::CSS3);
    pub const NOT_CSS21: Levels = Levels(Self::CSS1 | Self::CSS2 | Self::CSS3);
    pub const CSS3_ONLY: Levels = Levels(Self::CSS3);

    pub fn contains(self, level: CssLevel) -> bool {
        let bit = match level {
            CssLevel::Css1_0 => Self::CSS1,
            CssLevel::Css2_0 => Self::CSS2,
            CssLevel::Css2_1 => Self::CSS21,
            CssLevel::Css3_0 => Self::CSS3,
        };
        self.0 & bit != 0
    }
}

const PROPERTY_TABLE: &[(&str, Levels)] = &[
    ("background", Levels::ALL),
    ("background-color", Levels::ALL),
    ("background-image", Levels::ALL),
    ("background-repeat", Levels::ALL),
    ("background-attachment", Levels::ALL),
    ("background-position", Levels::ALL),
    ("border", Levels::ALL),
    ("border-top", Levels::ALL),
    ("border-right", Levels::ALL),
    ("border-bottom", Levels::ALL),
    ("border-left", Levels::ALL),
    ("border-color", Levels::ALL),
    ("border-top-color", Levels::FROM_CSS2),
    ("border-bottom-color", Levels::FROM_CSS2),
    ("border-left-color", Levels::FROM_CSS2),
    ("border-right-color", Levels::FROM_CSS2),
    ("border-style", Levels::ALL),
    ("border-top-style", Levels::FROM_CSS2),
    ("border-right-style", Levels::FROM_CSS2),
    ("border-left-style", Levels::FROM_CSS2),
    ("border-bottom-style", Levels::FROM_CSS2),
    ("border-width", Levels::ALL),
    ("border-top-width", Levels::ALL),
    ("border-right-width", Levels::ALL),
    ("border-left-width", Levels::ALL),
    ("border-bottom-width", Levels::ALL),
    ("border-collapse", Levels::FROM_CSS2),
    ("border-spacing", Levels::FROM_CSS2),
    ("bottom", Levels::FROM_CSS2),
    ("caption-side", Levels::FROM_CSS2),
    ("content", Levels::FROM_CSS2),
    ("clear", Levels::ALL),
    ("clip", Levels::ALL),
    ("color", Levels::ALL),
    ("counter-reset", Levels::FROM_CSS2),
    ("counter-increment", Levels::FROM_CSS2),
    ("cursor", Levels::FROM_CSS2),
    ("empty-cells", Levels::FROM_CSS2),
    ("display", Levels::ALL),
    ("direction", Levels::FROM_CSS2),
    ("float", Levels::ALL),
    ("font", Levels::ALL),
    ("font-family", Levels::ALL),
    ("font-style", Levels::ALL),
    ("font-variant", Levels::ALL),
    ("font-weight", Levels::ALL),
    ("font-stretch", Levels::CSS2_AND_3),
    ("font-size-adjust", Levels::CSS2_AND_3),
    ("font-size", Levels::ALL),
    ("height", Levels::ALL),
    ("left", Levels::ALL),
    ("line-height", Levels::ALL),
    ("list-style", Levels::ALL),
    ("list-style-type", Levels::ALL),
    ("list-style-image", Levels::ALL),
    ("list-style-position", Levels::ALL),
    ("margin", Levels::ALL),
    ("margin-top", Levels::ALL),
    ("margin-right", Levels::ALL),
    ("margin-bottom", Levels::ALL),
    ("margin-left", Levels::ALL),
    ("marks", Levels::NOT_CSS21),
    ("marker-offset", Levels::CSS2_AND_3),
    ("max-height", Levels::FROM_CSS2),
    ("max-width", Levels::FROM_CSS2),
    ("min-height", Levels::FROM_CSS2),
    ("min-width", Levels::FROM_CSS2),
    ("overflow", Levels::ALL),
    ("orphans", Levels::FROM_CSS2),
    ("outline", Levels::FROM_CSS2),
    ("outline-width", Levels::FROM_CSS2),
    ("outline-style", Levels::FROM_CSS2),
    ("outline-color", Levels::FROM_CSS2),
    ("padding", Levels::ALL),
    ("padding-top", Levels::ALL),
    ("padding-right", Levels::ALL),
    ("padding-bottom", Levels::ALL),
    ("padding-left", Levels::ALL),
    ("page-break-before", Levels::ALL),
    ("page-break-after", Levels::ALL),
    ("page-break-inside", Levels::FROM_CSS2),
    ("page", Levels::CSS2_AND_3),
    ("position", Levels::ALL),
    ("quotes", Levels::FROM_CSS2),
    ("right", Levels::FROM_CSS2),
    ("size", Levels::NOT_CSS21),
    ("speak-header", Levels::FROM_CSS2),
    ("table-layout", Levels::FROM_CSS2),
    ("top", Levels::ALL),
    ("text-indent", Levels::ALL),
    ("text-align", Levels::ALL),
    ("text-decoration", Levels::ALL),
    ("text-shadow", Levels::CSS2_AND_3),
    ("letter-spacing", Levels::ALL),
    ("word-spacing", Levels::ALL),
    ("text-transform", Levels::ALL),
    ("white-space", Levels::ALL),
    ("unicode-bidi", Levels::FROM_CSS2),
    ("vertical-align", Levels::ALL),
    ("visibility", Levels::ALL),
    ("width", Levels::ALL),
    ("widows", Levels::FROM_CSS2),
    ("z-index", Levels::ALL),
    ("volume", Levels::FROM_CSS2),
    ("speak", Levels::FROM_CSS2),
    ("pause", Levels::FROM_CSS2),
    ("pause-before", Levels::FROM_CSS2),
    ("pause-after", Levels::FROM_CSS2),
    ("cue", Levels::FROM_CSS2),
    ("cue-before", Levels::FROM_CSS2),
    ("cue-after", Levels::FROM_CSS2),
    ("play-during", Levels::FROM_CSS2),
    ("azimuth", Levels::FROM_CSS2),
    ("elevation", Levels::FROM_CSS2),
    ("speech-rate", Levels::FROM_CSS2),
    ("voice-family", Levels::FROM_CSS2),
    ("pitch", Levels::FROM_CSS2),
    ("pitch-range", Levels::FROM_CSS2),
    ("stress", Levels::FROM_CSS2),
    ("richness", Levels::FROM_CSS2),
    ("speak-punctuation", Levels::FROM_CSS2),
    ("speak-numeral", Levels::FROM_CSS2),
    // animation
    ("animation", Levels::CSS3_ONLY),
    ("animation-name", Levels::CSS3_ONLY),
    ("animation-duration", Levels::CSS3_ONLY),
    ("animation-timing-function", Levels::CSS3_ONLY),
    ("animation-iteration-count", Levels::CSS3_ONLY),
    ("animation-direction", Levels::CSS3_ONLY),
    ("animation-play-state", Levels::CSS3_ONLY),
    ("animation-delay", Levels::CSS3_ONLY),
    ("animation-fill-mode", Levels::CSS3_ONLY),
    // backgrounds and borders
    ("background-size", Levels::CSS3_ONLY),
    ("background-origin", Levels::CSS3_ONLY),
    ("background-clip", Levels::CSS3_ONLY),
    ("border-radius", Levels::CSS3_ONLY),
    ("border-top-left-radius", Levels::CSS3_ONLY),
    ("border-top-right-radius", Levels::CSS3_ONLY),
    ("border-bottom-right-radius", Levels::CSS3_ONLY),
    ("border-bottom-left-radius", Levels::CSS3_ONLY),
    ("border-image", Levels::CSS3_ONLY),
    ("box-shadow", Levels::CSS3_ONLY),
    ("box-sizing", Levels::CSS3_ONLY),
    // fonts
    ("src", Levels::CSS3_ONLY),
    ("unicode-range", Levels::CSS3_ONLY),
    ("font-display", Levels::CSS3_ONLY),
    ("font-variant-east-asian", Levels::CSS3_ONLY),
    ("font-variant-numeric", Levels::CSS3_ONLY),
    ("font-variant-ligatures", Levels::CSS3_ONLY),
    ("font-feature-settings", Levels::CSS3_ONLY),
    ("font-language-override", Levels::CSS3_ONLY),
    ("font-kerning", Levels::CSS3_ONLY),
    // colour, box, ui
    ("opacity", Levels::CSS3_ONLY),
    ("overflow-x", Levels::CSS3_ONLY),
    ("overflow-y", Levels::CSS3_ONLY),
    ("overflow-wrap", Levels::CSS3_ONLY),
    ("word-wrap", Levels::CSS3_ONLY),
    ("text-overflow", Levels::CSS3_ONLY),
    ("outline-offset", Levels::CSS3_ONLY),
    ("resize", Levels::CSS3_ONLY),
    ("pointer-events", Levels::CSS3_ONLY),
    ("user-select", Levels::CSS3_ONLY),
    // images
    ("image-rendering", Levels::CSS3_ONLY),
    ("image-resolution", Levels::CSS3_ONLY),
    ("image-orientation", Levels::CSS3_ONLY),
    ("object-fit", Levels::CSS3_ONLY),
    ("object-position", Levels::CSS3_ONLY),
    // transforms and transitions
    ("transform", Levels::CSS3_ONLY),
    ("transform-origin", Levels::CSS3_ONLY),
    ("transform-style", Levels::CSS3_ONLY),
    ("perspective", Levels::CSS3_ONLY),
    ("perspective-origin", Levels::CSS3_ONLY),
    ("backface-visibility", Levels::CSS3_ONLY),
    ("transition", Levels::CSS3_ONLY),
    ("transition-delay", Levels::CSS3_ONLY),
    ("transition-duration", Levels::CSS3_ONLY),
    ("transition-property", Levels::CSS3_ONLY),
    ("transition-timing-function", Levels::CSS3_ONLY),
    // flexbox and grid
    ("flex", Levels::CSS3_ONLY),
    ("flex-basis", Levels::CSS3_ONLY),
    ("flex-direction", Levels::CSS3_ONLY),
    ("flex-flow", Levels::CSS3_ONLY),
    ("flex-grow", Levels::CSS3_ONLY),
    ("flex-shrink", Levels::CSS3_ONLY),
    ("flex-wrap", Levels::CSS3_ONLY),
    ("order", Levels::CSS3_ONLY),
    ("align-content", Levels::CSS3_ONLY),
    ("align-items", Levels::CSS3_ONLY),
    ("align-self", Levels::CSS3_ONLY),
    ("justify-content", Levels::CSS3_ONLY),
    ("justify-items", Levels::CSS3_ONLY),
    ("justify-self", Levels::CSS3_ONLY),
    ("gap", Levels::CSS3_ONLY),
    ("row-gap", Levels::CSS3_ONLY),
    ("column-gap", Levels::CSS3_ONLY),
    ("grid", Levels::CSS3_ONLY),
    ("grid-area", Levels::CSS3_ONLY),
    ("grid-column", Levels::CSS3_ONLY),
    ("grid-row", Levels::CSS3_ONLY),
    ("grid-template", Levels::CSS3_ONLY),
    ("grid-template-areas", Levels::CSS3_ONLY),
    ("grid-template-columns", Levels::CSS3_ONLY),
    ("grid-template-rows", Levels::CSS3_ONLY),
    ("columns", Levels::CSS3_ONLY),
    ("column-count", Levels::CSS3_ONLY),
    ("column-width", Levels::CSS3_ONLY),
    // speech
    ("voice-pitch", Levels::CSS3_ONLY),
    ("rest", Levels::CSS3_ONLY),
    ("rest-before", Levels::CSS3_ONLY),
    ("rest-after", Levels::CSS3_ONLY),
];

static PROPERTIES: LazyLock<HashMap<&'static str, Levels>> =
    LazyLock::new(|| PROPERTY_TABLE.iter().copied().collect());

/// Levels a property is defined in, `None` for unknown properties.
pub fn property_levels(name: &str) -> Option<Levels> {
    PROPERTIES.get(name).copied()
}

/// Returns `true` if `name` is in the whitelist at any level.
pub fn is_known_property(name: &str) -> bool {
    PROPERTIES.contains_key(name)
}

/// Returns `true` if `name` is defined at `level`.
pub fn is_valid_property(name: &str, level: CssLevel) -> bool {
    property_levels(name).is_some_and(|levels| levels.contains(level))
}

// ── Units ────────────────────────────────────────────────────────────

/// Every unit the number optimiser recognises, lowercase.
pub const UNITS: &[&str] = &[
    // absolute lengths
    "px", "in", "cm", "mm", "pt", "pc",
    // relative lengths
    "%", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "vm",
    // angles
    "deg", "grad", "rad", "turn",
    // time
    "ms", "s",
    // frequency
    "khz", "hz",
    // layout
    "fr", "gr",
    // resolution
    "dpi", "dpcm", "dppx",
    // speech
    "db", "st",
];

/// Case-insensitive unit check.
pub fn is_unit(unit: &str) -> bool {
    UNITS.iter().any(|u| u.eq_ignore_ascii_case(unit))
}

/// Properties whose nonzero numbers must carry a unit.
pub fn requires_unit(property: &str) -> bool {
    matches!(
        property,
        "background"
            | "background-position"
            | "border"
            | "border-top"
            | "border-right"
            | "border-bottom"
            | "border-left"
            | "border-width"
            | "border-top-width"
            | "border-right-width"
            | "border-left-width"
            | "border-bottom-width"
            | "bottom"
            | "border-spacing"
            | "font-size"
            | "height"
            | "left"
            | "margin"
            | "margin-top"
            | "margin-right"
            | "margin-bottom"
            | "margin-left"
            | "max-height"
            | "max-width"
            | "min-height"
            | "min-width"
            | "outline"
            | "outline-width"
            | "padding"
            | "padding-top"
            | "padding-right"
            | "padding-bottom"
            | "padding-left"
            | "right"
            | "top"
            | "text-indent"
            | "letter-spacing"
            | "word-spacing"
            | "width"
    )
}

// ── Colours ──────────────────────────────────────────────────────────

/// Properties whose whole value is a single `<color>`.
pub fn is_color_property(property: &str) -> bool {
    matches!(
        property,
        "color"
            | "background-color"
            | "border-color"
            | "border-top-color"
            | "border-right-color"
            | "border-bottom-color"
            | "border-left-color"
            | "outline-color"
    )
}

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

const COLOR_KEYWORDS: &[&str] = &[
    "transparent",
    "currentcolor",
    "inherit",
    "initial",
    "unset",
    "revert",
    "none",
];

/// Named colours plus the CSS-wide keywords accepted where a colour goes.
pub fn is_color_keyword(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    NAMED_COLORS.binary_search(&lower.as_str()).is_ok() || COLOR_KEYWORDS.contains(&lower.as_str())
}

// ── At-rules ─────────────────────────────────────────────────────────

/// What the body of a block at-rule holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtRuleBody {
    /// Declarations, like `@font-face { src: ... }`.
    Declarations,
    /// Nested rules, like `@media screen { a { ... } }`.
    Rules,
}

/// Body kind for a known at-rule name (without `@`), vendor prefixes allowed.
pub fn at_rule_body(name: &str) -> Option<AtRuleBody> {
    let lower = name.to_ascii_lowercase();
    let unprefixed = match lower.strip_prefix('-') {
        Some(rest) => rest.split_once('-').map_or(rest, |(_, name)| name),
        None => lower.as_str(),
    };
    match unprefixed {
        "font-face" | "page" | "viewport" | "counter-style" | "property"
        | "font-palette-values" => Some(AtRuleBody::Declarations),
        "media" | "supports" | "document" | "keyframes" | "layer" | "container" | "scope" => {
            Some(AtRuleBody::Rules)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_sorted() {
        let mut sorted = NAMED_COLORS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, NAMED_COLORS);
    }

    #[test]
    fn test_property_levels() {
        assert!(is_valid_property("color", CssLevel::Css1_0));
        assert!(!is_valid_property("border-top-color", CssLevel::Css1_0));
        assert!(is_valid_property("border-top-color", CssLevel::Css2_1));
        assert!(!is_valid_property("font-stretch", CssLevel::Css2_1));
        assert!(is_valid_property("font-stretch", CssLevel::Css3_0));
        assert!(!is_valid_property("opacity", CssLevel::Css2_1));
        assert!(!is_valid_property("colour", CssLevel::Css3_0));
    }

    #[test]
    fn test_known_property() {
        assert!(is_known_property("margin-left"));
        assert!(is_known_property("overflow-x"));
        assert!(!is_known_property("Margin-Left"));
    }

    #[test]
    fn test_units() {
        assert!(is_unit("px"));
        assert!(is_unit("PX"));
        assert!(is_unit("%"));
        assert!(is_unit("kHz"));
        assert!(!is_unit("furlong"));
    }

    #[test]
    fn test_unit_required() {
        assert!(requires_unit("margin"));
        assert!(requires_unit("font-size"));
        assert!(!requires_unit("line-height"));
        assert!(!requires_unit("z-index"));
    }

    #[test]
    fn test_color_keywords() {
        assert!(is_color_keyword("red"));
        assert!(is_color_keyword("RebeccaPurple"));
        assert!(is_color_keyword("transparent"));
        assert!(is_color_keyword("currentColor"));
        assert!(!is_color_keyword("reddish"));
    }

    #[test]
    fn test_at_rule_bodies() {
        assert_eq!(at_rule_body("font-face"), Some(AtRuleBody::Declarations));
        assert_eq!(at_rule_body("media"), Some(AtRuleBody::Rules));
        assert_eq!(at_rule_body("-webkit-keyframes"), Some(AtRuleBody::Rules));
        assert_eq!(at_rule_body("-moz-document"), Some(AtRuleBody::Rules));
        assert_eq!(at_rule_body("PAGE"), Some(AtRuleBody::Declarations));
        assert_eq!(at_rule_body("unknown"), None);
    }
}
