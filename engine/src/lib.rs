pub mod evaluator;
pub mod rules;
pub mod terminal;

pub use crate::evaluator::*;
pub use crate::rules::*;
pub use crate::terminal::*;
