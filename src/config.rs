//! Settings bag consumed by the parser, optimisers and printer.

use serde::Deserialize;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Option enums
// ---------------------------------------------------------------------------

/// How sibling selectors are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorMerge {
    /// Split grouped selectors (`a,b{}`) into one block per selector.
    Separate,
    /// Only fold a selector into an identical immediately preceding one.
    #[default]
    Off,
    /// Also group adjacent selectors with identical declarations.
    Adjacent,
    /// Merge same-named selectors and identical declaration blocks anywhere
    /// among siblings.
    All,
}

/// CSS level used for property validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
pub enum CssLevel {
    #[serde(rename = "CSS1.0")]
    Css1_0,
    #[serde(rename = "CSS2.0")]
    Css2_0,
    #[serde(rename = "CSS2.1")]
    Css2_1,
    #[default]
    #[serde(rename = "CSS3.0")]
    Css3_0,
}

impl CssLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CssLevel::Css1_0 => "CSS1.0",
            CssLevel::Css2_0 => "CSS2.0",
            CssLevel::Css2_1 => "CSS2.1",
            CssLevel::Css3_0 => "CSS3.0",
        }
    }
}

/// How far shorthand optimisation goes. Each level includes the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShorthandLevel {
    Off,
    /// Box shorthands, two-value shorthands, `border-radius`.
    #[default]
    Common,
    /// Adds `font`.
    Font,
    /// Adds `background`.
    Background,
}

/// Output template used by [`crate::printer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    /// No optional whitespace at all.
    #[default]
    Highest,
    /// One declaration per line, indented.
    Standard,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a [`crate::CssTidy`] run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Configuration {
    pub merge_selectors: SelectorMerge,
    pub css_level: CssLevel,
    /// Drop declarations whose property is unknown at `css_level`.
    pub discard_invalid_properties: bool,
    /// Drop selector blocks that fail the structural check.
    pub discard_invalid_selectors: bool,
    pub lowercase_selectors: bool,
    /// Convert units along the conversion chain when shorter.
    pub convert_unit: bool,
    /// Keep the token stream and skip every rewrite.
    pub preserve_css: bool,
    /// Remove backslashes that escape nothing.
    pub remove_backslash: bool,
    pub optimise_shorthands: ShorthandLevel,
    pub preserve_comments: bool,
    pub template: TemplateKind,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            merge_selectors: SelectorMerge::Off,
            css_level: CssLevel::Css3_0,
            discard_invalid_properties: false,
            discard_invalid_selectors: false,
            lowercase_selectors: false,
            convert_unit: false,
            preserve_css: false,
            remove_backslash: true,
            optimise_shorthands: ShorthandLevel::Common,
            preserve_comments: false,
            template: TemplateKind::Highest,
        }
    }
}

impl Configuration {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Set the selector merge mode (builder).
    pub fn with_merge_selectors(mut self, mode: SelectorMerge) -> Self {
        self.merge_selectors = mode;
        self
    }

    /// Set the CSS level used for validation (builder).
    pub fn with_css_level(mut self, level: CssLevel) -> Self {
        self.css_level = level;
        self
    }

    /// Drop invalid properties instead of keeping them (builder).
    pub fn with_discard_invalid_properties(mut self, discard: bool) -> Self {
        self.discard_invalid_properties = discard;
        self
    }

    /// Drop structurally invalid selectors (builder).
    pub fn with_discard_invalid_selectors(mut self, discard: bool) -> Self {
        self.discard_invalid_selectors = discard;
        self
    }

    /// Lowercase selector names (builder).
    pub fn with_lowercase_selectors(mut self, lowercase: bool) -> Self {
        self.lowercase_selectors = lowercase;
        self
    }

    /// Enable unit conversion (builder).
    pub fn with_convert_unit(mut self, convert: bool) -> Self {
        self.convert_unit = convert;
        self
    }

    /// Keep the original token stream and skip optimisation (builder).
    pub fn with_preserve_css(mut self, preserve: bool) -> Self {
        self.preserve_css = preserve;
        self
    }

    /// Remove unnecessary backslashes (builder).
    pub fn with_remove_backslash(mut self, remove: bool) -> Self {
        self.remove_backslash = remove;
        self
    }

    /// Set the shorthand optimisation level (builder).
    pub fn with_optimise_shorthands(mut self, level: ShorthandLevel) -> Self {
        self.optimise_shorthands = level;
        self
    }

    /// Keep comments in the output (builder).
    pub fn with_preserve_comments(mut self, preserve: bool) -> Self {
        self.preserve_comments = preserve;
        self
    }

    /// Set the output template (builder).
    pub fn with_template(mut self, template: TemplateKind) -> Self {
        self.template = template;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert_eq!(config.merge_selectors, SelectorMerge::Off);
        assert_eq!(config.css_level, CssLevel::Css3_0);
        assert_eq!(config.optimise_shorthands, ShorthandLevel::Common);
        assert_eq!(config.template, TemplateKind::Highest);
        assert!(config.remove_backslash);
        assert!(!config.preserve_css);
    }

    #[test]
    fn test_builder_chain() {
        let config = Configuration::new()
            .with_merge_selectors(SelectorMerge::All)
            .with_convert_unit(true)
            .with_optimise_shorthands(ShorthandLevel::Background)
            .with_template(TemplateKind::Standard);
        assert_eq!(config.merge_selectors, SelectorMerge::All);
        assert!(config.convert_unit);
        assert_eq!(config.optimise_shorthands, ShorthandLevel::Background);
        assert_eq!(config.template, TemplateKind::Standard);
    }

    #[test]
    fn test_shorthand_levels_are_ordered() {
        assert!(ShorthandLevel::Off < ShorthandLevel::Common);
        assert!(ShorthandLevel::Common < ShorthandLevel::Font);
        assert!(ShorthandLevel::Font < ShorthandLevel::Background);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Configuration::from_toml_str(
            r#"
            merge-selectors = "all"
            css-level = "CSS2.1"
            optimise-shorthands = "font"
            discard-invalid-properties = true
            "#,
        )
        .unwrap();
        assert_eq!(config.merge_selectors, SelectorMerge::All);
        assert_eq!(config.css_level, CssLevel::Css2_1);
        assert_eq!(config.optimise_shorthands, ShorthandLevel::Font);
        assert!(config.discard_invalid_properties);
        // untouched keys keep defaults
        assert!(config.remove_backslash);
    }

    #[test]
    fn test_from_toml_rejects_unknown_variant() {
        let err = Configuration::from_toml_str(r#"template = "fancy""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_css_level_names() {
        assert_eq!(CssLevel::Css1_0.as_str(), "CSS1.0");
        assert_eq!(CssLevel::Css3_0.as_str(), "CSS3.0");
    }
}
