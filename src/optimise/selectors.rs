//! Selector-level rewriting of the block tree.
//!
//! Runs after shorthand optimisation. Depending on [`SelectorMerge`] it folds
//! rule sets that share a selector or a declaration set, or splits grouped
//! selectors apart. Invalid selectors can be discarded in any mode.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::SelectorMerge;
use crate::css::document::Document;
use crate::css::model::{Block, BlockId, Child};
use crate::diagnostics::{Component, Diagnostics};

use super::values::split_outside_strings;

/// Combinator with its surrounding whitespace.
static COMBINATOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*[+>~\s]\s*").ok());

/// Returns `false` for selectors with an empty group member or a dangling
/// combinator (`a,,b`, `a >`, `> a`, `a + + b`).
pub fn is_valid_selector(selector: &str) -> bool {
    let groups = split_outside_strings(',', selector);
    if groups.is_empty() {
        return false;
    }
    groups.iter().all(|group| {
        let group = group.trim();
        if group.is_empty() {
            return false;
        }
        match COMBINATOR.as_ref() {
            Some(combinator) => combinator.split(group).all(|part| !part.is_empty()),
            None => true,
        }
    })
}

/// Applies the configured selector rewrites to a document.
#[derive(Debug, Clone, Copy)]
pub struct SelectorRewriter {
    mode: SelectorMerge,
    discard_invalid: bool,
}

impl SelectorRewriter {
    pub fn new(mode: SelectorMerge, discard_invalid: bool) -> Self {
        Self {
            mode,
            discard_invalid,
        }
    }

    /// Rewrite `document` and return the blocks that received declarations
    /// from merged duplicates. Some of them may have been folded away again
    /// by the later passes.
    pub fn process(&self, document: &mut Document, diagnostics: &mut Diagnostics) -> Vec<BlockId> {
        let root = document.root();
        if self.discard_invalid {
            discard_invalid(document, root, diagnostics);
        }
        match self.mode {
            SelectorMerge::All => {
                let merged = merge_with_same_name(document, root, diagnostics);
                merge_with_same_properties(document, root, false, diagnostics);
                merged
            }
            SelectorMerge::Adjacent => {
                merge_with_same_properties(document, root, true, diagnostics);
                Vec::new()
            }
            SelectorMerge::Separate => {
                separate(document, root);
                Vec::new()
            }
            SelectorMerge::Off => Vec::new(),
        }
    }
}

/// Fold later siblings with the same name and kind into the first one.
///
/// At-blocks hand over their children too and are then merged recursively.
/// `@font-face` blocks are never folded. Returns every block that absorbed
/// another one's declarations.
pub fn merge_with_same_name(
    document: &mut Document,
    parent: BlockId,
    diagnostics: &mut Diagnostics,
) -> Vec<BlockId> {
    let mut kept: Vec<BlockId> = Vec::new();
    let mut merged: Vec<BlockId> = Vec::new();
    for id in document.child_blocks(parent) {
        let block = &document[id];
        if block.is_font_face() {
            continue;
        }
        let target = kept.iter().copied().find(|&other| {
            let other = &document[other];
            other.name == block.name && other.is_selector() == block.is_selector()
        });
        let Some(target) = target else {
            kept.push(id);
            continue;
        };

        let declarations = std::mem::take(&mut document[id].declarations);
        let children = std::mem::take(&mut document[id].children);
        document.remove_block(parent, id);
        let target_block = &mut document[target];
        target_block.declarations.merge(&declarations);
        target_block.children.extend(children);
        diagnostics.info(
            Component::Selectors,
            0,
            format!("Merged duplicate block '{}'", target_block.name),
        );
        if !declarations.is_empty() && !merged.contains(&target) {
            merged.push(target);
        }
    }

    for id in kept {
        if document[id].is_at_block() {
            merged.extend(merge_with_same_name(document, id, diagnostics));
        }
    }
    merged
}

/// Fold later selector siblings whose declarations equal an earlier one's
/// into it, grouping the selector names.
///
/// With `adjacent_only` a block only absorbs the run of equal blocks that
/// directly follows it.
pub fn merge_with_same_properties(
    document: &mut Document,
    parent: BlockId,
    adjacent_only: bool,
    diagnostics: &mut Diagnostics,
) {
    let mut index = 0;
    loop {
        let siblings = document.child_blocks(parent);
        let Some(&id) = siblings.get(index) else {
            break;
        };
        index += 1;

        if !document[id].is_selector() || document[id].declarations.is_empty() {
            continue;
        }
        for &other in &siblings[index..] {
            let equal = document[other].is_selector()
                && document[other].declarations == document[id].declarations;
            if !equal {
                if adjacent_only {
                    break;
                }
                continue;
            }
            let Some(removed) = document.remove_block(parent, other) else {
                continue;
            };
            let target = &mut document[id];
            target.append_selector_name(&removed.name, removed.sub_selectors());
            target.children.extend(removed.children);
            diagnostics.info(
                Component::Selectors,
                0,
                format!("Merged selectors with equal declarations into '{}'", target.name),
            );
        }
    }

    for id in document.child_blocks(parent) {
        if document[id].is_at_block() {
            merge_with_same_properties(document, id, adjacent_only, diagnostics);
        }
    }
}

/// Remove selector blocks whose selector is malformed.
pub fn discard_invalid(document: &mut Document, parent: BlockId, diagnostics: &mut Diagnostics) {
    for id in document.child_blocks(parent) {
        if document[id].is_at_block() {
            discard_invalid(document, id, diagnostics);
            continue;
        }
        if is_valid_selector(&document[id].name) {
            continue;
        }
        if let Some(removed) = document.remove_block(parent, id) {
            diagnostics.warn(
                Component::Selectors,
                0,
                format!("Removed invalid selector: {}", removed.name),
            );
        }
    }
}

/// Split every grouped selector into one block per fragment, in place.
pub fn separate(document: &mut Document, parent: BlockId) {
    for id in document.child_blocks(parent) {
        if document[id].is_at_block() {
            separate(document, id);
            continue;
        }
        if document[id].sub_selectors().len() <= 1 {
            continue;
        }
        let Some(index) = document[parent]
            .children
            .iter()
            .position(|child| *child == Child::Block(id))
        else {
            continue;
        };
        let Some(removed) = document.remove_block(parent, id) else {
            continue;
        };

        let fragments = removed.sub_selectors().to_vec();
        let mut children = Some(removed.children);
        for (offset, fragment) in fragments.into_iter().enumerate() {
            let mut block = Block::selector(fragment.clone(), vec![fragment]);
            block.declarations = removed.declarations.clone();
            // comments stay with the first fragment
            block.children = children.take().unwrap_or_default();
            document.insert_block_at(parent, index + offset, block);
        }
    }
}
