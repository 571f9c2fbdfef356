//! Render output handed to the query layer

use crate::error::ProjectionResult;
use crate::wire::WireDocument;
use docshape_codec::{SharedDecoder, same_decoder};
use docshape_document::Document;
use std::fmt;

/// Query shape plus the decoder for results shaped by it
///
/// `document` is `None` only when the projection asks for no reshaping and
/// the source document is decoded as it is.
pub struct RenderedProjection<R> {
    document: Option<WireDocument>,
    decoder: SharedDecoder<R>,
}

impl<R> RenderedProjection<R> {
    /// Pair a query shape with its result decoder
    pub fn new(document: Option<WireDocument>, decoder: SharedDecoder<R>) -> Self {
        Self { document, decoder }
    }

    /// The query shape, if any
    pub fn document(&self) -> Option<&WireDocument> {
        self.document.as_ref()
    }

    /// The result decoder
    pub fn decoder(&self) -> &SharedDecoder<R> {
        &self.decoder
    }

    /// Split into shape and decoder
    pub fn into_parts(self) -> (Option<WireDocument>, SharedDecoder<R>) {
        (self.document, self.decoder)
    }

    /// Decode one result document returned by the store
    pub fn decode(&self, result: &Document) -> ProjectionResult<R> {
        Ok(self.decoder.decode(result)?)
    }
}

impl<R> Clone for RenderedProjection<R> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            decoder: self.decoder.clone(),
        }
    }
}

/// Equal shapes and the same decoder
impl<R> PartialEq for RenderedProjection<R> {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document && same_decoder(&self.decoder, &other.decoder)
    }
}

impl<R> fmt::Debug for RenderedProjection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedProjection")
            .field("document", &self.document)
            .field("decoder", &self.decoder.name())
            .finish()
    }
}
