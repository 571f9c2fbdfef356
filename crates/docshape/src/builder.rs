//! Fluent projection builder
//!
//! ```
//! use docshape::ProjectionBuilder;
//!
//! let projection = ProjectionBuilder::new()
//!     .include("name")
//!     .exclude("_id")
//!     .slice("comments", 0, 5)
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     projection.to_string(),
//!     r#"{ "name" : 1, "_id" : 0, "comments" : { "$slice" : [0, 5] } }"#
//! );
//! ```

use crate::error::{ProjectionError, ProjectionResult};
use crate::untyped::UntypedProjection;
use docshape_document::{Document, Value};

/// Builds an explicit projection document field by field
///
/// Setting a field twice keeps the later setting. An invalid field name is
/// remembered and reported by [`ProjectionBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct ProjectionBuilder {
    document: Document,
    error: Option<ProjectionError>,
}

impl ProjectionBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `field`
    pub fn include(self, field: &str) -> Self {
        self.set(field, 1)
    }

    /// Leave out `field`
    pub fn exclude(self, field: &str) -> Self {
        self.set(field, 0)
    }

    /// Return `limit` array elements of `field` starting at `skip`
    pub fn slice(self, field: &str, skip: i32, limit: i32) -> Self {
        let operator = Document::new().with("$slice", vec![skip, limit]);
        self.set(field, operator)
    }

    /// Return the first array element of `field` matching `filter`
    pub fn elem_match(self, field: &str, filter: Document) -> Self {
        self.set(field, Document::new().with("$elemMatch", filter))
    }

    /// Return the text search score as `field`
    pub fn meta_text_score(self, field: &str) -> Self {
        self.set(field, Document::new().with("$meta", "textScore"))
    }

    /// Add every setting of `other`; its settings win on shared fields
    pub fn combine(mut self, other: ProjectionBuilder) -> Self {
        if self.error.is_none() {
            self.error = other.error;
        }
        self.document.merge(other.document);
        self
    }

    /// The document built so far
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Finish as an explicit projection
    pub fn build(self) -> ProjectionResult<UntypedProjection> {
        self.build_document().map(UntypedProjection::from)
    }

    /// Finish as a plain document
    pub fn build_document(self) -> ProjectionResult<Document> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.document),
        }
    }

    fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        if field.trim().is_empty() {
            if self.error.is_none() {
                self.error = Some(ProjectionError::validation("field name must not be empty"));
            }
            return self;
        }
        self.document.insert(field, value);
        self
    }
}
