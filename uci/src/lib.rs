pub mod client;
pub mod output_parser;

pub use crate::client::*;
pub use crate::output_parser::*;
