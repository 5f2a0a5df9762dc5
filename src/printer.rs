//! Serialises a [`Document`] back to CSS text.
//!
//! Two templates: [`TemplateKind::Highest`] prints no optional whitespace at
//! all, [`TemplateKind::Standard`] prints one declaration per line with
//! two-space indentation and a blank line between blocks.
//!
//! Emission order is `@charset`, `@import`s, `@namespace`s, then the root's
//! children in document order.

use crate::config::{Configuration, TemplateKind};
use crate::css::document::{Document, TokenKind};
use crate::css::model::{BlockId, Child, Declarations, LineAt};

/// Print `document` using the template selected in `config`.
pub fn print(document: &Document, config: &Configuration) -> String {
    let printer = Printer {
        document,
        standard: config.template == TemplateKind::Standard,
        comments: config.preserve_comments,
    };
    if config.preserve_css {
        printer.tokens()
    } else {
        printer.tree()
    }
}

struct Printer<'a> {
    document: &'a Document,
    standard: bool,
    comments: bool,
}

impl Printer<'_> {
    fn indent(&self, depth: usize) -> String {
        if self.standard {
            "  ".repeat(depth)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &'static str {
        if self.standard {
            "\n"
        } else {
            ""
        }
    }

    /// `@charset`, `@import` and `@namespace` rules.
    fn header(&self) -> String {
        let doc = self.document;
        let mut lines = Vec::new();
        if let Some(charset) = &doc.charset {
            lines.push(format!("@charset {charset};"));
        }
        lines.extend(doc.imports.iter().map(LineAt::to_string));
        lines.extend(doc.namespaces.iter().map(|ns| format!("@namespace {ns};")));

        let mut out = String::new();
        for line in lines {
            out.push_str(&line);
            out.push_str(self.newline());
        }
        out
    }

    fn tree(&self) -> String {
        let header = self.header();
        let items = self.children(self.document.root(), 0);
        let separator = if self.standard { "\n" } else { "" };
        let mut out = header;
        if self.standard && !out.is_empty() && !items.is_empty() {
            out.push('\n');
        }
        out.push_str(&items.join(separator));
        out
    }

    /// Printed form of each printable child of `parent`.
    fn children(&self, parent: BlockId, depth: usize) -> Vec<String> {
        let indent = self.indent(depth);
        let nl = self.newline();
        self.document[parent]
            .children
            .iter()
            .filter_map(|child| match child {
                Child::Block(id) => self.block(*id, depth),
                Child::LineAt(rule) => Some(format!("{indent}{rule}{nl}")),
                Child::Comment(text) if self.comments => Some(format!("{indent}/*{text}*/{nl}")),
                Child::Comment(_) => None,
            })
            .collect()
    }

    fn block(&self, id: BlockId, depth: usize) -> Option<String> {
        let block = self.document.get(id)?;
        let inner = self.children(id, depth + 1);
        let no_rules = inner.is_empty() || block.is_selector();
        if block.declarations.is_empty() && no_rules {
            return None;
        }

        let indent = self.indent(depth);
        let nl = self.newline();
        let mut out = String::new();
        if self.standard {
            out.push_str(&format!("{indent}{} {{\n", block.name));
        } else {
            out.push_str(&format!("{}{{", block.name));
        }
        out.push_str(&self.declarations(&block.declarations, depth + 1));
        if !inner.is_empty() && !block.declarations.is_empty() && self.standard {
            out.push('\n');
        }
        let separator = if self.standard { "\n" } else { "" };
        out.push_str(&inner.join(separator));
        out.push_str(&format!("{indent}}}{nl}"));
        Some(out)
    }

    fn declarations(&self, declarations: &Declarations, depth: usize) -> String {
        if self.standard {
            let indent = self.indent(depth);
            declarations
                .iter()
                .map(|(property, value)| {
                    let important = if value.important { " !important" } else { "" };
                    format!("{indent}{property}: {}{important};\n", value.text)
                })
                .collect()
        } else {
            declarations
                .iter()
                .map(|(property, value)| format!("{property}:{value}"))
                .collect::<Vec<_>>()
                .join(";")
        }
    }

    /// Print the recorded token stream instead of the tree.
    fn tokens(&self) -> String {
        let mut out = self.header();
        let nl = self.newline();
        let mut depth = 0usize;
        for token in &self.document.tokens {
            let indent = self.indent(depth);
            match token.kind {
                TokenKind::AtStart | TokenKind::SelectorStart => {
                    let space = if self.standard { " " } else { "" };
                    out.push_str(&format!("{indent}{}{space}{{{nl}", token.data));
                    depth += 1;
                }
                TokenKind::AtEnd | TokenKind::SelectorEnd => {
                    depth = depth.saturating_sub(1);
                    out.push_str(&format!("{}}}{nl}", self.indent(depth)));
                }
                TokenKind::Property => {
                    let space = if self.standard { " " } else { "" };
                    out.push_str(&format!("{indent}{}:{space}", token.data));
                }
                TokenKind::Value => out.push_str(&format!("{};{nl}", token.data)),
                TokenKind::Comment if self.comments => {
                    out.push_str(&format!("{indent}/*{}*/{nl}", token.data));
                }
                TokenKind::Comment => {}
                TokenKind::LineAt => out.push_str(&format!("{indent}{}{nl}", token.data)),
            }
        }
        out
    }
}
