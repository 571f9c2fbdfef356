//! Wire document value model
//!
//! This crate provides:
//! - `Document` and `Value`, the ordered key/value tree sent to the data store
//! - A relaxed JSON parser for hand-written query shapes
//! - Canonical text output and `serde_json` conversions

mod error;
mod format;
mod json;
mod parser;
mod value;

pub use error::*;
pub use parser::parse_document;
pub use value::*;
