//! Document tree value types: Block, Child, LineAt, Value, Declarations.

use std::fmt;

use indexmap::IndexMap;
use slotmap::new_key_type;

new_key_type! {
    /// Identifier of a block in the [`super::document::Document`] arena.
    pub struct BlockId;
}

/// A declaration value with its `!important` flag kept separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub text: String,
    pub important: bool,
}

impl Value {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            important: false,
        }
    }

    pub fn important(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            important: true,
        }
    }

    /// Same text, different importance.
    pub fn with_important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.important {
            write!(f, "{}!important", self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Ordered property → value map for one block.
///
/// Insertion order is cascade order. [`Declarations::insert`] applies the
/// override rule; [`Declarations::set`] replaces unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations(IndexMap<String, Value>);

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration as if it appeared after every existing one.
    ///
    /// Empty values are ignored. An existing `!important` value is only
    /// replaced by another `!important` one. A replacing value moves to the
    /// end so it keeps its cascade position relative to other properties.
    /// Returns `true` if the value was stored.
    pub fn insert(&mut self, property: impl Into<String>, value: Value) -> bool {
        if value.text.is_empty() {
            return false;
        }
        let property = property.into();
        if let Some(existing) = self.0.get(&property) {
            if existing.important && !value.important {
                return false;
            }
            self.0.shift_remove(&property);
        }
        self.0.insert(property, value);
        true
    }

    /// Replace a value in place, or append it if absent.
    pub fn set(&mut self, property: impl Into<String>, value: Value) {
        self.0.insert(property.into(), value);
    }

    /// Merge `other` into `self` with [`Declarations::insert`] semantics.
    pub fn merge(&mut self, other: &Declarations) {
        for (property, value) in other.iter() {
            self.insert(property.clone(), value.clone());
        }
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.0.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    /// Remove a property, keeping the order of the rest.
    pub fn remove(&mut self, property: &str) -> Option<Value> {
        self.0.shift_remove(property)
    }

    /// Position of a property in cascade order.
    pub fn position(&self, property: &str) -> Option<usize> {
        self.0.get_index_of(property)
    }

    /// Insert at a given position, replacing any existing entry.
    pub fn insert_at(&mut self, index: usize, property: impl Into<String>, value: Value) {
        let property = property.into();
        self.0.shift_remove(&property);
        let index = index.min(self.0.len());
        self.0.shift_insert(index, property, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut declarations = Declarations::new();
        for (property, value) in iter {
            declarations.insert(property, value);
        }
        declarations
    }
}

/// Opaque single-line at-rule such as `@import url(a.css);`, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAt {
    /// Rule name without `@`.
    pub name: String,
    /// Everything between the name and `;`.
    pub value: String,
}

impl fmt::Display for LineAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "@{};", self.name)
        } else {
            write!(f, "@{} {};", self.name, self.value)
        }
    }
}

/// Entry in a block's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Block(BlockId),
    LineAt(LineAt),
    Comment(String),
}

/// Whether a block is a rule set or an at-rule container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Selector {
        /// Comma-separated fragments the selector was written as.
        sub_selectors: Vec<String>,
    },
    AtBlock,
}

/// A named container of declarations and child entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Selector text, or `@name prelude` for at-blocks.
    pub name: String,
    pub kind: BlockKind,
    pub declarations: Declarations,
    pub children: Vec<Child>,
}

impl Block {
    pub fn selector(name: impl Into<String>, sub_selectors: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: BlockKind::Selector { sub_selectors },
            declarations: Declarations::new(),
            children: Vec::new(),
        }
    }

    pub fn at_block(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: BlockKind::AtBlock,
            declarations: Declarations::new(),
            children: Vec::new(),
        }
    }

    pub fn is_selector(&self) -> bool {
        matches!(self.kind, BlockKind::Selector { .. })
    }

    pub fn is_at_block(&self) -> bool {
        matches!(self.kind, BlockKind::AtBlock)
    }

    /// `@font-face` blocks must stay distinct.
    pub fn is_font_face(&self) -> bool {
        self.is_at_block()
            && self
                .name
                .get(..10)
                .is_some_and(|head| head.eq_ignore_ascii_case("@font-face"))
    }

    pub fn sub_selectors(&self) -> &[String] {
        match &self.kind {
            BlockKind::Selector { sub_selectors } => sub_selectors,
            BlockKind::AtBlock => &[],
        }
    }

    /// Append another selector group to this one (`a` + `b,c` → `a,b,c`).
    pub fn append_selector_name(&mut self, name: &str, fragments: &[String]) {
        if let BlockKind::Selector { sub_selectors } = &mut self.kind {
            sub_selectors.extend(fragments.iter().cloned());
        }
        self.name.push(',');
        self.name.push_str(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Declarations ─────────────────────────────────────────────────

    #[test]
    fn later_declaration_wins() {
        let mut d = Declarations::new();
        d.insert("color", Value::new("red"));
        d.insert("margin", Value::new("0"));
        d.insert("color", Value::new("blue"));
        assert_eq!(d.get("color").unwrap().text, "blue");
        // the override moves to the end
        let order: Vec<_> = d.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, vec!["margin", "color"]);
    }

    #[test]
    fn important_is_only_overridden_by_important() {
        let mut d = Declarations::new();
        d.insert("color", Value::important("red"));
        assert!(!d.insert("color", Value::new("blue")));
        assert_eq!(d.get("color").unwrap(), &Value::important("red"));
        assert!(d.insert("color", Value::important("green")));
        assert_eq!(d.get("color").unwrap().text, "green");
    }

    #[test]
    fn empty_value_is_dropped() {
        let mut d = Declarations::new();
        assert!(!d.insert("color", Value::new("")));
        assert!(d.is_empty());
    }

    #[test]
    fn set_keeps_position() {
        let mut d: Declarations = [("a", Value::new("1")), ("b", Value::new("2"))]
            .into_iter()
            .collect();
        d.set("a", Value::new("3"));
        let order: Vec<_> = d.iter().map(|(k, v)| (k.as_str(), v.text.as_str())).collect();
        assert_eq!(order, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn insert_at_position() {
        let mut d: Declarations = [("a", Value::new("1")), ("b", Value::new("2"))]
            .into_iter()
            .collect();
        d.insert_at(1, "c", Value::new("3"));
        d.insert_at(99, "d", Value::new("4"));
        let order: Vec<_> = d.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn merge_uses_override_rule() {
        let mut left: Declarations = [("color", Value::important("red"))].into_iter().collect();
        let right: Declarations = [("color", Value::new("blue")), ("top", Value::new("0"))]
            .into_iter()
            .collect();
        left.merge(&right);
        assert_eq!(left.get("color").unwrap().text, "red");
        assert_eq!(left.get("top").unwrap().text, "0");
    }

    // ── Display ──────────────────────────────────────────────────────

    #[test]
    fn value_display() {
        assert_eq!(Value::new("red").to_string(), "red");
        assert_eq!(Value::important("red").to_string(), "red!important");
    }

    #[test]
    fn line_at_display() {
        let rule = LineAt {
            name: "unknown-rule".into(),
            value: "foo".into(),
        };
        assert_eq!(rule.to_string(), "@unknown-rule foo;");
    }

    // ── Blocks ───────────────────────────────────────────────────────

    #[test]
    fn font_face_detection() {
        assert!(Block::at_block("@font-face").is_font_face());
        assert!(Block::at_block("@FONT-FACE").is_font_face());
        assert!(!Block::at_block("@media screen").is_font_face());
        assert!(!Block::selector("@font-face", vec![]).is_font_face());
    }

    #[test]
    fn append_selector_name() {
        let mut block = Block::selector("a", vec!["a".into()]);
        block.append_selector_name("b,c", &["b".into(), "c".into()]);
        assert_eq!(block.name, "a,b,c");
        assert_eq!(block.sub_selectors(), ["a", "b", "c"].map(String::from));
    }
}
