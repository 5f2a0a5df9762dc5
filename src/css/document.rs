//! Parsed document: a slotmap arena of blocks plus document-level rules.

use std::ops::{Index, IndexMut};

use slotmap::SlotMap;

use super::model::{Block, BlockId, Child, LineAt};

/// Kind of entry in the preserved token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    AtStart,
    AtEnd,
    SelectorStart,
    SelectorEnd,
    Property,
    Value,
    Comment,
    /// A single-line at-rule inside a block.
    LineAt,
}

/// One entry of the token stream recorded when CSS is preserved as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub data: String,
}

/// The parsed document.
///
/// Every block lives in one arena and is referenced by [`BlockId`]. The root
/// is an at-block sentinel standing for "no enclosing at-rule"; it is never
/// printed itself.
#[derive(Debug, Clone)]
pub struct Document {
    blocks: SlotMap<BlockId, Block>,
    root: BlockId,
    /// First `@charset` value, quotes included.
    pub charset: Option<String>,
    pub namespaces: Vec<String>,
    pub imports: Vec<LineAt>,
    /// Token stream, only filled when CSS is preserved.
    pub tokens: Vec<Token>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with just the root sentinel.
    pub fn new() -> Self {
        let mut blocks = SlotMap::with_key();
        let root = blocks.insert(Block::at_block(""));
        Self {
            blocks,
            root,
            charset: None,
            namespaces: Vec::new(),
            imports: Vec::new(),
            tokens: Vec::new(),
        }
    }

    pub fn root(&self) -> BlockId {
        self.root
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(id)
    }

    /// Insert `block` as the last child of `parent`.
    pub fn add_block(&mut self, parent: BlockId, block: Block) -> BlockId {
        debug_assert!(self.blocks.contains_key(parent), "parent block does not exist");
        let id = self.blocks.insert(block);
        if let Some(parent) = self.blocks.get_mut(parent) {
            parent.children.push(Child::Block(id));
        }
        id
    }

    /// Insert `block` into `parent` at child position `index`.
    pub fn insert_block_at(&mut self, parent: BlockId, index: usize, block: Block) -> BlockId {
        let id = self.blocks.insert(block);
        if let Some(parent) = self.blocks.get_mut(parent) {
            let index = index.min(parent.children.len());
            parent.children.insert(index, Child::Block(id));
        }
        id
    }

    /// Append a non-block child (line at-rule or comment).
    pub fn push_child(&mut self, parent: BlockId, child: Child) {
        if let Some(parent) = self.blocks.get_mut(parent) {
            parent.children.push(child);
        }
    }

    /// Detach `id` from `parent` and drop it with all of its descendants.
    ///
    /// Returns the removed block, or `None` if it did not exist.
    pub fn remove_block(&mut self, parent: BlockId, id: BlockId) -> Option<Block> {
        if let Some(parent) = self.blocks.get_mut(parent) {
            parent.children.retain(|child| *child != Child::Block(id));
        }

        let removed = self.blocks.remove(id)?;
        let mut pending = block_children(&removed);
        while let Some(current) = pending.pop() {
            if let Some(block) = self.blocks.remove(current) {
                pending.extend(block_children(&block));
            }
        }
        Some(removed)
    }

    /// Ids of the blocks among `id`'s children, in order.
    pub fn child_blocks(&self, id: BlockId) -> Vec<BlockId> {
        self.blocks.get(id).map(block_children).unwrap_or_default()
    }

    /// Every block in depth-first pre-order, the root first.
    pub fn walk(&self) -> Vec<BlockId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            let mut kids = self.child_blocks(id);
            kids.reverse();
            stack.extend(kids);
        }
        order
    }

    /// Returns `true` if nothing worth printing was parsed.
    ///
    /// Blocks without declarations and comments do not count.
    pub fn is_empty(&self) -> bool {
        self.charset.is_none()
            && self.imports.is_empty()
            && self.namespaces.is_empty()
            && self.tokens.is_empty()
            && self.blocks.values().all(|block| {
                block.declarations.is_empty()
                    && !block
                        .children
                        .iter()
                        .any(|child| matches!(child, Child::LineAt(_)))
            })
    }

    /// Number of live blocks, the root included.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Find the first child block of `parent` with the given name.
    pub fn find_child(&self, parent: BlockId, name: &str) -> Option<BlockId> {
        self.child_blocks(parent)
            .into_iter()
            .find(|&id| self.blocks.get(id).is_some_and(|b| b.name == name))
    }
}

fn block_children(block: &Block) -> Vec<BlockId> {
    block
        .children
        .iter()
        .filter_map(|child| match child {
            Child::Block(id) => Some(*id),
            _ => None,
        })
        .collect()
}

impl Index<BlockId> for Document {
    type Output = Block;

    fn index(&self, id: BlockId) -> &Block {
        &self.blocks[id]
    }
}

impl IndexMut<BlockId> for Document {
    fn index_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::model::Value;

    fn sample() -> (Document, BlockId, BlockId, BlockId) {
        let mut doc = Document::new();
        let root = doc.root();
        let media = doc.add_block(root, Block::at_block("@media print"));
        let a = doc.add_block(media, Block::selector("a", vec!["a".into()]));
        let b = doc.add_block(root, Block::selector("b", vec!["b".into()]));
        (doc, media, a, b)
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.block_count(), 1);
        assert!(doc[doc.root()].is_at_block());
    }

    #[test]
    fn test_add_and_walk() {
        let (doc, media, a, b) = sample();
        assert_eq!(doc.walk(), vec![doc.root(), media, a, b]);
        assert_eq!(doc.child_blocks(doc.root()), vec![media, b]);
        assert_eq!(doc.find_child(doc.root(), "b"), Some(b));
        assert_eq!(doc.find_child(doc.root(), "a"), None);
    }

    #[test]
    fn test_remove_drops_subtree() {
        let (mut doc, media, a, b) = sample();
        let root = doc.root();
        let removed = doc.remove_block(root, media).unwrap();
        assert_eq!(removed.name, "@media print");
        assert!(doc.get(a).is_none());
        assert_eq!(doc.child_blocks(root), vec![b]);
        assert_eq!(doc.block_count(), 2);
    }

    #[test]
    fn test_insert_at_position() {
        let (mut doc, media, _, b) = sample();
        let root = doc.root();
        let c = doc.insert_block_at(root, 1, Block::selector("c", vec![]));
        assert_eq!(doc.child_blocks(root), vec![media, c, b]);
    }

    #[test]
    fn test_emptiness_counts_declarations_and_line_ats() {
        let (mut doc, _, a, _) = sample();
        assert!(doc.is_empty());

        doc[a].declarations.insert("color", Value::new("red"));
        assert!(!doc.is_empty());

        let mut other = Document::new();
        let root = other.root();
        other.push_child(root, Child::Comment("note".into()));
        assert!(other.is_empty());
        other.push_child(
            root,
            Child::LineAt(LineAt {
                name: "unknown-rule".into(),
                value: "foo".into(),
            }),
        );
        assert!(!other.is_empty());
    }
}
