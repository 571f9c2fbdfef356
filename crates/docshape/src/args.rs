//! Collaborators injected at render time

use crate::expression::{ExpressionTranslator, FieldPathTranslator};
use docshape_codec::{CodecRegistry, SharedDecoder};
use std::fmt;

static DEFAULT_TRANSLATOR: FieldPathTranslator = FieldPathTranslator::new();

/// Everything a typed projection needs to render against source documents of type `D`
pub struct RenderArgs<'a, D> {
    document_decoder: Option<SharedDecoder<D>>,
    registry: &'a CodecRegistry,
    translator: &'a dyn ExpressionTranslator,
}

impl<'a, D> RenderArgs<'a, D> {
    /// Render against `registry` with no ambient decoder and the default translator
    pub fn new(registry: &'a CodecRegistry) -> Self {
        Self {
            document_decoder: None,
            registry,
            translator: &DEFAULT_TRANSLATOR,
        }
    }

    /// Set the decoder already used for the source document type
    pub fn with_document_decoder(mut self, decoder: SharedDecoder<D>) -> Self {
        self.document_decoder = Some(decoder);
        self
    }

    /// Replace the expression translator
    pub fn with_translator(mut self, translator: &'a dyn ExpressionTranslator) -> Self {
        self.translator = translator;
        self
    }

    /// The ambient source document decoder
    pub fn document_decoder(&self) -> Option<&SharedDecoder<D>> {
        self.document_decoder.as_ref()
    }

    /// The codec registry
    pub fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    /// The expression translator
    pub fn translator(&self) -> &'a dyn ExpressionTranslator {
        self.translator
    }
}

impl<D> Clone for RenderArgs<'_, D> {
    fn clone(&self) -> Self {
        Self {
            document_decoder: self.document_decoder.clone(),
            registry: self.registry,
            translator: self.translator,
        }
    }
}

impl<D> fmt::Debug for RenderArgs<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderArgs")
            .field(
                "document_decoder",
                &self.document_decoder.as_ref().map(|d| d.name()),
            )
            .field("registry", self.registry)
            .finish_non_exhaustive()
    }
}
