//! Projections without a declared result type
//!
//! Text and value projections are stored as given and only turned into
//! documents at render time, so constructing them cannot fail.

use crate::error::ProjectionResult;
use crate::wire::{DeferredDocument, WireDocument};
use docshape_codec::{CodecRegistry, TypeKey};
use docshape_document::{Document, parse_document};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A projection with no result type attached yet
#[derive(Clone)]
pub enum UntypedProjection {
    /// An already built document
    Explicit(Arc<Document>),
    /// Document text, parsed at render time
    Text(String),
    /// A typed value, encoded through its registered structural encoder
    Value(ValueSpec),
}

impl UntypedProjection {
    /// Create a projection from a document
    pub fn document(document: impl Into<Arc<Document>>) -> Self {
        Self::Explicit(document.into())
    }

    /// Create a projection from document text
    pub fn text(raw: impl Into<String>) -> Self {
        Self::Text(raw.into())
    }

    /// Create a projection from an arbitrary typed value
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Self::Value(ValueSpec::new(value))
    }

    /// Render into a wire document
    ///
    /// `Explicit` hands back the stored document without copying it.
    pub fn render(&self, registry: &CodecRegistry) -> ProjectionResult<WireDocument> {
        match self {
            Self::Explicit(document) => Ok(WireDocument::Materialized(Arc::clone(document))),
            Self::Text(raw) => render_text(raw),
            Self::Value(spec) => render_value(spec, registry),
        }
    }

    /// Variant name, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Explicit(_) => "explicit",
            Self::Text(_) => "text",
            Self::Value(_) => "value",
        }
    }
}

pub fn render_text(raw: &str) -> ProjectionResult<WireDocument> {
    Ok(WireDocument::Materialized(Arc::new(parse_document(raw)?)))
}

pub fn render_value(
    spec: &ValueSpec,
    registry: &CodecRegistry,
) -> ProjectionResult<WireDocument> {
    let encoder = registry.encoder_for(spec.value_type)?;
    Ok(WireDocument::Deferred(DeferredDocument::new(
        Arc::clone(&spec.value),
        spec.value_type,
        encoder,
    )))
}

impl fmt::Debug for UntypedProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(document) => f.debug_tuple("Explicit").field(document).finish(),
            Self::Text(raw) => f.debug_tuple("Text").field(raw).finish(),
            Self::Value(spec) => f.debug_tuple("Value").field(spec).finish(),
        }
    }
}

impl fmt::Display for UntypedProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(document) => write!(f, "{}", document),
            Self::Text(raw) => write!(f, "{}", raw),
            Self::Value(spec) => write!(f, "<{}>", spec.value_type),
        }
    }
}

/// A value whose runtime type picks the structural encoder
#[derive(Clone)]
pub struct ValueSpec {
    value: Arc<dyn Any + Send + Sync>,
    value_type: TypeKey,
}

impl ValueSpec {
    /// Capture a value and its runtime type
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::shared(Arc::new(value))
    }

    /// Capture an already shared value
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            value_type: TypeKey::of::<T>(),
        }
    }

    /// Runtime type of the value
    pub fn value_type(&self) -> TypeKey {
        self.value_type
    }

    /// Borrow the value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for ValueSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSpec")
            .field("value_type", &self.value_type.name())
            .finish_non_exhaustive()
    }
}
