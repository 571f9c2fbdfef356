//! Field-selection expressions
//!
//! A [`FieldSelector`] names the source fields a result needs and the pure
//! function that builds the result from a source document. Translation turns
//! the selected paths into a query shape and wraps the function in a decoder;
//! the translator, not the decoder resolver, owns that decoder choice.

use crate::error::{ProjectionError, ProjectionResult};
use crate::rendered::RenderedProjection;
use crate::wire::WireDocument;
use docshape_codec::{CodecResult, Decoder, DecoderId, SharedDecoder};
use docshape_document::Document;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Dotted path to a field, e.g. `address.city`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: SmallVec<[String; 4]>,
}

impl FieldPath {
    /// Split a dotted path into segments
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_owned).collect(),
        }
    }

    /// Path segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Check if this path is a strict ancestor of `other`
    pub fn is_prefix_of(&self, other: &FieldPath) -> bool {
        self.segments.len() < other.segments.len() && other.segments.starts_with(&self.segments)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// The field paths a selector reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorShape {
    paths: Vec<FieldPath>,
}

impl SelectorShape {
    /// Create a shape from field paths
    pub fn new(paths: Vec<FieldPath>) -> Self {
        Self { paths }
    }

    /// Selected paths in declaration order
    pub fn paths(&self) -> &[FieldPath] {
        &self.paths
    }
}

/// Pure function from a source document to a result
pub type SelectFn<D, R> = Arc<dyn Fn(&D) -> R + Send + Sync>;

/// Typed field-selection expression over source documents of type `D`
pub struct FieldSelector<D, R> {
    shape: SelectorShape,
    select: SelectFn<D, R>,
}

impl<D, R> FieldSelector<D, R> {
    /// Create a selector reading `paths` and building results with `select`
    ///
    /// At least one path is required.
    pub fn new<I, P, F>(paths: I, select: F) -> ProjectionResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
        F: Fn(&D) -> R + Send + Sync + 'static,
    {
        let paths: Vec<FieldPath> = paths
            .into_iter()
            .map(|path| FieldPath::parse(path.as_ref()))
            .collect();
        if paths.is_empty() {
            return Err(ProjectionError::validation(
                "field selector must select at least one field",
            ));
        }
        Ok(Self {
            shape: SelectorShape::new(paths),
            select: Arc::new(select),
        })
    }

    /// The selected field paths
    pub fn shape(&self) -> &SelectorShape {
        &self.shape
    }

    /// Build a result from a source document
    pub fn apply(&self, source: &D) -> R {
        (self.select)(source)
    }
}

impl<D, R> Clone for FieldSelector<D, R> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            select: Arc::clone(&self.select),
        }
    }
}

impl<D, R> fmt::Debug for FieldSelector<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSelector")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Turns selector shapes into query-shape documents
pub trait ExpressionTranslator: Send + Sync {
    /// Build the query shape for the selected paths
    fn translate_shape(&self, shape: &SelectorShape) -> ProjectionResult<Document>;
}

/// Options for [`FieldPathTranslator`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranslatorOptions {
    /// Keep `_id` in the shape even when the selector does not read it
    pub keep_id: bool,
}

/// Default translator: one inclusion per selected path
///
/// `{ "name" : 1, "address.city" : 1, "_id" : 0 }`
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldPathTranslator {
    options: TranslatorOptions,
}

impl FieldPathTranslator {
    /// Create a translator with default options
    pub const fn new() -> Self {
        Self::with_options(TranslatorOptions { keep_id: false })
    }

    /// Create a translator with the given options
    pub const fn with_options(options: TranslatorOptions) -> Self {
        Self { options }
    }

    /// Get the options
    pub fn options(&self) -> TranslatorOptions {
        self.options
    }
}

impl ExpressionTranslator for FieldPathTranslator {
    fn translate_shape(&self, shape: &SelectorShape) -> ProjectionResult<Document> {
        let mut paths: Vec<&FieldPath> = Vec::with_capacity(shape.paths().len());
        for path in shape.paths() {
            validate_path(path)?;
            if paths.contains(&path) {
                continue;
            }
            if let Some(other) = paths
                .iter()
                .find(|other| other.is_prefix_of(path) || path.is_prefix_of(other))
            {
                return Err(ProjectionError::translation(format!(
                    "path collision between '{}' and '{}'",
                    other, path
                )));
            }
            paths.push(path);
        }

        let mut document: Document = paths.iter().map(|path| (path.to_string(), 1)).collect();
        let reads_id = paths
            .iter()
            .any(|path| path.segments().first().map(String::as_str) == Some("_id"));
        if !self.options.keep_id && !reads_id {
            document.insert("_id", 0);
        }
        log::trace!("translated selector shape into {}", document);
        Ok(document)
    }
}

fn validate_path(path: &FieldPath) -> ProjectionResult<()> {
    for segment in path.segments() {
        if segment.is_empty() {
            return Err(ProjectionError::translation(format!(
                "field path '{}' has an empty segment",
                path
            )));
        }
        if segment.starts_with('$') {
            return Err(ProjectionError::translation(format!(
                "operator '{}' in field path '{}' is not supported",
                segment, path
            )));
        }
    }
    Ok(())
}

/// Translate a selector into a query shape and the decoder that applies it
///
/// The decoder decodes each projected result with the source document
/// decoder and then runs the selector function, so the source type must
/// tolerate fields the shape leaves out.
pub fn translate<D: 'static, R: 'static>(
    translator: &dyn ExpressionTranslator,
    selector: &FieldSelector<D, R>,
    document_decoder: Option<&SharedDecoder<D>>,
) -> ProjectionResult<RenderedProjection<R>> {
    let document = translator.translate_shape(selector.shape())?;
    let source = document_decoder.cloned().ok_or_else(|| {
        ProjectionError::translation(format!(
            "selector over {} needs a decoder for the source document",
            std::any::type_name::<D>()
        ))
    })?;
    let decoder: SharedDecoder<R> = Arc::new(SelectorDecoder {
        source,
        select: Arc::clone(&selector.select),
    });
    Ok(RenderedProjection::new(
        Some(WireDocument::materialized(document)),
        decoder,
    ))
}

/// Decodes the source document, then applies the selector
struct SelectorDecoder<D, R> {
    source: SharedDecoder<D>,
    select: SelectFn<D, R>,
}

impl<D: 'static, R: 'static> Decoder<R> for SelectorDecoder<D, R> {
    fn decode(&self, document: &Document) -> CodecResult<R> {
        let source = self.source.decode(document)?;
        Ok((self.select)(&source))
    }

    fn name(&self) -> &'static str {
        "SelectorDecoder"
    }

    fn id(&self) -> DecoderId {
        self.source
            .id()
            .derive(Arc::as_ptr(&self.select) as *const () as usize)
    }
}
