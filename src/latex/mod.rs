//! LaTeX variable extraction.
//!
//! This module works on a single latex body at a time:
//! - [`token`]: tagged token lexer and the variable classifier
//! - [`commands`]: the ignore list of structural commands
//! - [`definition`]: explicit `var = \text{quantity}` bindings and the
//!   context fallback
//! - [`inference`]: the quantity-from-prose heuristic

pub mod commands;
pub mod definition;
pub mod inference;
pub mod token;

pub use commands::IgnoreList;
pub use definition::{Definition, clean_quantity, extract_bindings, extract_definitions};
pub use inference::infer_quantity;
pub use token::{Lexer, Subscript, Token, classify, extract_variables};
