//! # csstidy
//!
//! A CSS parser and optimiser. Input is read by a character-level state
//! machine that recovers from malformed CSS instead of rejecting it, builds
//! a block tree, and normalises numbers and colours on the way in. Shorthand
//! and selector passes then rewrite the tree before it is printed back out.
//!
//! ## Core Systems
//!
//! - **[`css`]**: character classes, escape decoding, property tables, the
//!   slotmap-backed document tree and the parser
//! - **[`optimise`]**: number, colour, shorthand and selector optimisers
//! - **[`printer`]**: `Highest` and `Standard` output templates
//! - **[`import`]**: `@import` inlining for files read from disk
//! - **[`config`]**, **[`diagnostics`]**, **[`error`]**: settings, the
//!   per-run message log, and error types
//!
//! ```
//! use csstidy::{Configuration, CssTidy};
//!
//! let tidy = CssTidy::new(Configuration::default());
//! let output = tidy.process("a { color: #FF0000; margin: 0px 0px 0px 0px }").unwrap();
//! assert_eq!(output.to_css(), "a{color:#FF0000;margin:0}");
//! ```

use std::path::Path;

// Foundation
pub mod config;
pub mod diagnostics;
pub mod error;

// Engine
pub mod css;
pub mod optimise;

// Input and output
pub mod import;
pub mod printer;

pub use config::{Configuration, CssLevel, SelectorMerge, ShorthandLevel, TemplateKind};
pub use css::Document;
pub use diagnostics::{Diagnostics, Message, Severity};
pub use error::{ConfigError, TidyError};

use optimise::{SelectorRewriter, ShorthandOptimizer};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Result of a successful run: the optimised tree and what happened to it.
#[derive(Debug, Clone)]
pub struct Output {
    pub document: Document,
    pub diagnostics: Diagnostics,
    config: Configuration,
}

impl Output {
    /// Print the document with the configured template.
    pub fn to_css(&self) -> String {
        printer::print(&self.document, &self.config)
    }
}

// ---------------------------------------------------------------------------
// CssTidy
// ---------------------------------------------------------------------------

/// Runs the parse and optimisation pipeline with one configuration.
#[derive(Debug, Clone, Default)]
pub struct CssTidy {
    config: Configuration,
}

impl CssTidy {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Parse and optimise `css`.
    ///
    /// Malformed input is recovered from and reported in
    /// [`Output::diagnostics`]. The only failure is input that yields
    /// nothing at all.
    pub fn process(&self, css: &str) -> Result<Output, TidyError> {
        self.run(css, Diagnostics::new())
    }

    /// Read `path`, inline its local `@import`s, then [`process`](Self::process).
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<Output, TidyError> {
        let path = path.as_ref();
        let css = std::fs::read_to_string(path).map_err(|source| TidyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let mut diagnostics = Diagnostics::new();
        let css = import::inline_imports(&css, base_dir, &mut diagnostics);
        self.run(&css, diagnostics)
    }

    fn run(&self, source: &str, mut diagnostics: Diagnostics) -> Result<Output, TidyError> {
        let config = &self.config;
        tracing::debug!(target: "csstidy", bytes = source.len(), "processing stylesheet");

        let mut document = css::parse(source, config, &mut diagnostics);
        if !config.preserve_css {
            let shorthands = ShorthandOptimizer::new(config.optimise_shorthands);
            shorthands.process(&mut document, &mut diagnostics);
            let merged =
                SelectorRewriter::new(config.merge_selectors, config.discard_invalid_selectors)
                    .process(&mut document, &mut diagnostics);
            // merged blocks may now hold longhands that combine
            for id in merged {
                if let Some(block) = document.get_mut(id) {
                    shorthands.process_block(&mut block.declarations, &mut diagnostics);
                }
            }
        }

        if document.is_empty() {
            return Err(TidyError::EmptyDocument);
        }
        Ok(Output {
            document,
            diagnostics,
            config: config.clone(),
        })
    }
}
