//! Condition trees and their compilation to SQL `WHERE` fragments.

pub mod compiler;
pub mod display;
pub mod escape;
pub mod item;

pub use compiler::{ValidationReport, WhereCompiler, WhereCompilerBuilder};
pub use display::DisplayWhereTree;
pub use escape::{escape_literal, quote_literal, unescape_literal};
pub use item::*;
