//! Projection specifications for document queries
//!
//! A projection describes which fields a query should return and how each
//! returned document becomes a typed result. This crate renders projections
//! into a query-shape document plus the decoder for the results:
//!
//! - **Untyped projections**: an explicit document, document text parsed at
//!   render time, or a typed value encoded through its registered encoder
//! - **Typed projections**: the above with a result type, plus field-selection
//!   expressions and "decode the source as is"
//! - **Decoder resolution**: explicit decoder, then the ambient source
//!   decoder when the result type is the source type, then the registry
//! - **Coercions**: `From` impls from documents, text and untyped projections
//! - **Builder and declarative specs** for explicit projections
//!
//! # Example
//!
//! ```
//! use docshape::{CodecRegistry, Document, RenderArgs, SharedDecoder, TypedProjection};
//! use docshape::DocumentCodec;
//! use std::sync::Arc;
//!
//! let registry = CodecRegistry::with_defaults();
//! let ambient: SharedDecoder<Document> = Arc::new(DocumentCodec);
//! let args = RenderArgs::new(&registry).with_document_decoder(ambient);
//!
//! let projection: TypedProjection<Document, Document> = "{ name: 1, _id: 0 }".into();
//! let rendered = projection.render(&args).unwrap();
//! assert_eq!(
//!     rendered.document().unwrap().to_string(),
//!     r#"{ "name" : 1, "_id" : 0 }"#
//! );
//! ```
//!
//! Rendering is a pure function of the projection, the registry and the
//! ambient decoder; projections and rendered results are immutable and can
//! be shared across threads.

mod args;
mod builder;
mod coercion;
pub mod error;
pub mod expression;
mod rendered;
mod resolver;
mod spec;
mod typed;
mod untyped;
mod wire;

pub use args::RenderArgs;
pub use builder::ProjectionBuilder;
pub use error::{ErrorCode, ProjectionError, ProjectionResult};
pub use expression::{
    ExpressionTranslator, FieldPath, FieldPathTranslator, FieldSelector, SelectorShape,
    TranslatorOptions,
};
pub use rendered::RenderedProjection;
pub use resolver::{DecoderResolver, DecoderSource};
pub use spec::ProjectionSpec;
pub use typed::TypedProjection;
pub use untyped::{UntypedProjection, ValueSpec};
pub use wire::{DeferredDocument, WireDocument};

pub use docshape_codec::{
    CodecError, CodecRegistry, Decoder, DecoderId, DocumentCodec, Encoder, SerdeDecoder,
    SerdeEncoder, SharedDecoder, SharedEncoder, TypeKey, decoder_fn, same_decoder,
};
pub use docshape_document::{Document, ParseError, Value, parse_document};
