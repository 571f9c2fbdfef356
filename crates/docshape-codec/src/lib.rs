//! Decoders, encoders and the registry that maps Rust types to them
//!
//! This crate provides:
//! - `Decoder<T>` and the runtime-typed `Encoder` traits
//! - serde-backed codecs and the `Document` identity codec
//! - `CodecRegistry`, a thread-safe type-to-codec map

mod codec;
mod error;
mod registry;
mod type_key;

pub use codec::*;
pub use error::*;
pub use registry::*;
pub use type_key::*;
