//! Append-only diagnostics log for a single parse session.
//!
//! Every recovery the parser or an optimiser performs is recorded here as a
//! [`Message`] keyed by source line, and mirrored as a `tracing` event so a
//! host application with a subscriber sees it live.

use std::collections::BTreeMap;
use std::fmt;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Information => write!(f, "Information"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// One diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
    /// 1-based source line. `0` for messages from the tree passes that run
    /// after parsing (shorthand and selector merging), which have no single
    /// source location; [`Diagnostics::by_line`] groups those under `0`.
    pub line: usize,
}

/// Which part of the engine produced a message. Only used for the
/// `tracing` target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Parser,
    Number,
    Color,
    Shorthand,
    Selectors,
    Import,
}

/// The diagnostics log.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Message>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message and emit it as a `tracing` event.
    pub fn log(
        &mut self,
        component: Component,
        severity: Severity,
        line: usize,
        text: impl Into<String>,
    ) {
        let text = text.into();
        // tracing targets must be literals, so dispatch per level and target.
        macro_rules! emit {
            ($level:ident) => {
                match component {
                    Component::Parser => tracing::$level!(target: "csstidy::parser", line, "{}", text),
                    Component::Number => tracing::$level!(target: "csstidy::number", line, "{}", text),
                    Component::Color => tracing::$level!(target: "csstidy::color", line, "{}", text),
                    Component::Shorthand => tracing::$level!(target: "csstidy::shorthand", line, "{}", text),
                    Component::Selectors => tracing::$level!(target: "csstidy::selectors", line, "{}", text),
                    Component::Import => tracing::$level!(target: "csstidy::import", line, "{}", text),
                }
            };
        }
        match severity {
            Severity::Information => emit!(debug),
            Severity::Warning => emit!(warn),
            Severity::Error => emit!(error),
        }
        self.messages.push(Message {
            text,
            severity,
            line,
        });
    }

    pub fn info(&mut self, component: Component, line: usize, text: impl Into<String>) {
        self.log(component, Severity::Information, line, text);
    }

    pub fn warn(&mut self, component: Component, line: usize, text: impl Into<String>) {
        self.log(component, Severity::Warning, line, text);
    }

    pub fn error(&mut self, component: Component, line: usize, text: impl Into<String>) {
        self.log(component, Severity::Error, line, text);
    }

    /// All messages in the order they were logged.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages of exactly the given severity.
    pub fn iter_severity(&self, severity: Severity) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.severity == severity)
    }

    /// Messages grouped by source line, lines ascending.
    pub fn by_line(&self) -> BTreeMap<usize, Vec<&Message>> {
        let mut grouped: BTreeMap<usize, Vec<&Message>> = BTreeMap::new();
        for message in &self.messages {
            grouped.entry(message.line).or_default().push(message);
        }
        grouped
    }

    /// Returns `true` if any message text contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.text.contains(needle))
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_appends_in_order() {
        let mut log = Diagnostics::new();
        log.info(Component::Parser, 1, "first");
        log.warn(Component::Number, 3, "second");
        log.error(Component::Color, 2, "third");

        let texts: Vec<_> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(log.len(), 3);
        assert!(log.has_errors());
    }

    #[test]
    fn by_line_groups_and_sorts() {
        let mut log = Diagnostics::new();
        log.warn(Component::Parser, 5, "a");
        log.warn(Component::Parser, 2, "b");
        log.info(Component::Parser, 5, "c");

        let grouped = log.by_line();
        let lines: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(lines, vec![2, 5]);
        assert_eq!(grouped[&5].len(), 2);
        assert_eq!(grouped[&5][1].text, "c");
    }

    #[test]
    fn tree_pass_messages_group_under_line_zero() {
        let mut log = Diagnostics::new();
        log.info(Component::Shorthand, 0, "merged margin");
        log.warn(Component::Parser, 3, "parse");
        log.info(Component::Selectors, 0, "merged selectors");

        let grouped = log.by_line();
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![0, 3]);
        let unlocated: Vec<_> = grouped[&0].iter().map(|m| m.text.as_str()).collect();
        assert_eq!(unlocated, vec!["merged margin", "merged selectors"]);
    }

    #[test]
    fn every_component_logs() {
        let mut log = Diagnostics::new();
        for component in [
            Component::Parser,
            Component::Number,
            Component::Color,
            Component::Shorthand,
            Component::Selectors,
            Component::Import,
        ] {
            log.warn(component, 1, "x");
        }
        assert_eq!(log.len(), 6);
    }

    #[test]
    fn iter_severity_filters() {
        let mut log = Diagnostics::new();
        log.info(Component::Shorthand, 1, "x");
        log.warn(Component::Shorthand, 1, "y");
        assert_eq!(log.iter_severity(Severity::Warning).count(), 1);
        assert!(!log.has_errors());
    }

    #[test]
    fn empty_log() {
        let log = Diagnostics::new();
        assert!(log.is_empty());
        assert!(log.by_line().is_empty());
    }
}
