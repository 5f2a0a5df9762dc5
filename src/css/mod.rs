//! CSS engine: character classes, escapes, lookup tables, document tree and
//! the parser that builds it.

pub mod chars;
pub mod document;
pub mod model;
pub mod parser;
pub mod properties;
pub mod tokenizer;
pub mod unicode;

pub use document::{Document, Token, TokenKind};
pub use model::{Block, BlockId, BlockKind, Child, Declarations, LineAt, Value};
pub use parser::parse;
