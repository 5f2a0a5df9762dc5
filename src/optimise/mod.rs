//! Optimisation passes run over parsed values and the finished document.
//!
//! Number and colour optimisation work on single sub-values while parsing;
//! shorthand and selector passes work on the whole tree afterwards.

pub mod color;
pub mod number;
pub mod selectors;
pub mod shorthand;
pub mod values;

pub use color::ColorOptimizer;
pub use number::NumberOptimizer;
pub use selectors::SelectorRewriter;
pub use shorthand::ShorthandOptimizer;
