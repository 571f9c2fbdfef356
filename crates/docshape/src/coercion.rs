//! Projection coercions
//!
//! Raw documents and raw text convert into either projection kind, and an
//! untyped projection converts into a typed one. A coerced projection is the
//! same value as the one built with the matching constructor and no decoder:
//! - `Document` -> `Explicit` / `ExplicitWithDecoder(doc, None)`
//! - text -> `Text` / `TextWithDecoder(text, None)`
//! - `UntypedProjection` -> `Adapted(inner, None)`

use crate::typed::TypedProjection;
use crate::untyped::UntypedProjection;
use docshape_document::Document;
use std::sync::Arc;

impl From<Document> for UntypedProjection {
    fn from(document: Document) -> Self {
        Self::document(document)
    }
}

impl From<Arc<Document>> for UntypedProjection {
    fn from(document: Arc<Document>) -> Self {
        Self::document(document)
    }
}

impl From<&str> for UntypedProjection {
    fn from(raw: &str) -> Self {
        Self::text(raw)
    }
}

impl From<String> for UntypedProjection {
    fn from(raw: String) -> Self {
        Self::text(raw)
    }
}

impl<D, R> From<Document> for TypedProjection<D, R> {
    fn from(document: Document) -> Self {
        Self::explicit(document, None)
    }
}

impl<D, R> From<Arc<Document>> for TypedProjection<D, R> {
    fn from(document: Arc<Document>) -> Self {
        Self::explicit(document, None)
    }
}

impl<D, R> From<&str> for TypedProjection<D, R> {
    fn from(raw: &str) -> Self {
        Self::text(raw, None)
    }
}

impl<D, R> From<String> for TypedProjection<D, R> {
    fn from(raw: String) -> Self {
        Self::text(raw, None)
    }
}

impl<D, R> From<UntypedProjection> for TypedProjection<D, R> {
    fn from(inner: UntypedProjection) -> Self {
        Self::from_untyped(inner, None)
    }
}
