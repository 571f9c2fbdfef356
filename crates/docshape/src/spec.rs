//! Declarative projection descriptions
//!
//! A [`ProjectionSpec`] is the serialized form of an untyped projection, as
//! found in configuration files:
//!
//! ```json
//! { "document": { "name": 1, "_id": 0 } }
//! { "text": "{ name: 1, _id: 0 }" }
//! ```

use crate::error::{ProjectionError, ProjectionResult};
use crate::typed::TypedProjection;
use crate::untyped::UntypedProjection;
use docshape_document::Document;
use serde::{Deserialize, Serialize};

/// Serialized projection: exactly one of `document` or `text`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ProjectionSpec {
    /// Describe an explicit document projection
    pub fn document(document: Document) -> Self {
        Self {
            document: Some(document),
            text: None,
        }
    }

    /// Describe a text projection
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            document: None,
            text: Some(text.into()),
        }
    }

    /// Read a spec from JSON
    pub fn from_json(json: &str) -> ProjectionResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ProjectionError::validation(format!("malformed projection spec: {}", e)))
    }

    /// Check that the spec names exactly one usable input
    pub fn validate(&self) -> ProjectionResult<()> {
        match (&self.document, &self.text) {
            (None, None) => Err(ProjectionError::validation(
                "projection spec needs a document or a text",
            )),
            (Some(_), Some(_)) => Err(ProjectionError::validation(
                "projection spec must not have both a document and a text",
            )),
            (None, Some(text)) if text.trim().is_empty() => {
                Err(ProjectionError::validation("projection text must not be blank"))
            }
            _ => Ok(()),
        }
    }
}

impl TryFrom<ProjectionSpec> for UntypedProjection {
    type Error = ProjectionError;

    fn try_from(spec: ProjectionSpec) -> ProjectionResult<Self> {
        spec.validate()?;
        match (spec.document, spec.text) {
            (Some(document), _) => Ok(Self::document(document)),
            (None, Some(text)) => Ok(Self::text(text)),
            (None, None) => Err(ProjectionError::validation(
                "projection spec needs a document or a text",
            )),
        }
    }
}

/// Converts straight to the matching typed variant with no decoder
impl<D, R> TryFrom<ProjectionSpec> for TypedProjection<D, R> {
    type Error = ProjectionError;

    fn try_from(spec: ProjectionSpec) -> ProjectionResult<Self> {
        Ok(match UntypedProjection::try_from(spec)? {
            UntypedProjection::Explicit(document) => Self::explicit(document, None),
            UntypedProjection::Text(text) => Self::text(text, None),
            other => Self::from_untyped(other, None),
        })
    }
}
