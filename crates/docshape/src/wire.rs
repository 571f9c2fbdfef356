//! Rendered query-shape documents
//!
//! A projection renders into a [`WireDocument`]: either a document that
//! already exists, or a typed value paired with its structural encoder whose
//! encoding runs only when the document is consumed.

use crate::error::ProjectionResult;
use docshape_codec::{SharedEncoder, TypeKey};
use docshape_document::Document;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A query-shape document produced by rendering a projection
#[derive(Clone)]
pub enum WireDocument {
    /// A document that is already built; shared, never copied
    Materialized(Arc<Document>),
    /// A value that is encoded on demand
    Deferred(DeferredDocument),
}

impl WireDocument {
    /// Wrap an existing document
    pub fn materialized(document: impl Into<Arc<Document>>) -> Self {
        Self::Materialized(document.into())
    }

    /// Check if encoding is still pending
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Get the shared document if it is already materialized
    pub fn as_materialized(&self) -> Option<&Arc<Document>> {
        match self {
            Self::Materialized(document) => Some(document),
            Self::Deferred(_) => None,
        }
    }

    /// Get the document, running the encoder for deferred values
    pub fn to_document(&self) -> ProjectionResult<Cow<'_, Document>> {
        match self {
            Self::Materialized(document) => Ok(Cow::Borrowed(document.as_ref())),
            Self::Deferred(deferred) => deferred.materialize().map(Cow::Owned),
        }
    }

    fn type_label(&self) -> &'static str {
        match self {
            Self::Materialized(_) => "document",
            Self::Deferred(deferred) => deferred.value_type.name(),
        }
    }
}

impl PartialEq for WireDocument {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Materialized(a), Self::Materialized(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Deferred(a), Self::Deferred(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for WireDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Materialized(document) => f.debug_tuple("Materialized").field(document).finish(),
            Self::Deferred(deferred) => f.debug_tuple("Deferred").field(deferred).finish(),
        }
    }
}

/// A typed value wrapped with the encoder that will turn it into a document
#[derive(Clone)]
pub struct DeferredDocument {
    value: Arc<dyn Any + Send + Sync>,
    value_type: TypeKey,
    encoder: SharedEncoder,
}

impl DeferredDocument {
    /// Wrap a value with its encoder
    pub fn new(value: Arc<dyn Any + Send + Sync>, value_type: TypeKey, encoder: SharedEncoder) -> Self {
        Self {
            value,
            value_type,
            encoder,
        }
    }

    /// Runtime type of the wrapped value
    pub fn value_type(&self) -> TypeKey {
        self.value_type
    }

    /// Encode the wrapped value
    pub fn materialize(&self) -> ProjectionResult<Document> {
        log::trace!(
            "encoding deferred {} with {}",
            self.value_type,
            self.encoder.name()
        );
        Ok(self.encoder.encode(&*self.value)?)
    }
}

/// Same wrapped value and same encoder instance
impl PartialEq for DeferredDocument {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
            && std::ptr::addr_eq(Arc::as_ptr(&self.encoder), Arc::as_ptr(&other.encoder))
    }
}

impl fmt::Debug for DeferredDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredDocument")
            .field("value_type", &self.value_type.name())
            .field("encoder", &self.encoder.name())
            .finish()
    }
}

impl fmt::Display for WireDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_document() {
            Ok(document) => write!(f, "{}", document),
            Err(e) => write!(f, "<unencodable {}: {}>", self.type_label(), e),
        }
    }
}
