//! Projections with a declared result type
//!
//! `TypedProjection<D, R>` covers every supported way of describing a
//! projection from source documents of type `D` to results of type `R`.
//! Rendering dispatches on the variant, produces the query shape, and asks
//! the [`DecoderResolver`] for the result decoder.

use crate::args::RenderArgs;
use crate::error::ProjectionResult;
use crate::expression::{self, FieldSelector};
use crate::rendered::RenderedProjection;
use crate::resolver::DecoderResolver;
use crate::untyped::{UntypedProjection, ValueSpec, render_text, render_value};
use crate::wire::WireDocument;
use docshape_codec::SharedDecoder;
use docshape_document::Document;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A projection together with the means to decode its results
pub enum TypedProjection<D, R> {
    /// An already built document
    ExplicitWithDecoder {
        document: Arc<Document>,
        decoder: Option<SharedDecoder<R>>,
    },
    /// Document text, parsed at render time
    TextWithDecoder {
        text: String,
        decoder: Option<SharedDecoder<R>>,
    },
    /// A typed value encoded through its structural encoder at render time
    ValueWithDecoder {
        value: ValueSpec,
        decoder: Option<SharedDecoder<R>>,
    },
    /// A field-selection expression; the translator picks the decoder
    FromExpression(FieldSelector<D, R>),
    /// No reshaping: decode the source document directly as `R`
    ResultTypeOnly { decoder: Option<SharedDecoder<R>> },
    /// An untyped projection given a result type
    Adapted {
        inner: UntypedProjection,
        decoder: Option<SharedDecoder<R>>,
    },
}

impl<D, R> TypedProjection<D, R> {
    /// Project with an existing document
    pub fn explicit(document: impl Into<Arc<Document>>, decoder: Option<SharedDecoder<R>>) -> Self {
        Self::ExplicitWithDecoder {
            document: document.into(),
            decoder,
        }
    }

    /// Project with document text
    pub fn text(text: impl Into<String>, decoder: Option<SharedDecoder<R>>) -> Self {
        Self::TextWithDecoder {
            text: text.into(),
            decoder,
        }
    }

    /// Project with a typed value
    pub fn value<T: Any + Send + Sync>(value: T, decoder: Option<SharedDecoder<R>>) -> Self {
        Self::ValueWithDecoder {
            value: ValueSpec::new(value),
            decoder,
        }
    }

    /// Project with a field-selection expression
    pub fn from_expression(selector: FieldSelector<D, R>) -> Self {
        Self::FromExpression(selector)
    }

    /// Decode the source document as `R` without reshaping it
    pub fn result_type_only(decoder: Option<SharedDecoder<R>>) -> Self {
        Self::ResultTypeOnly { decoder }
    }

    /// Give an untyped projection a result type
    pub fn from_untyped(inner: UntypedProjection, decoder: Option<SharedDecoder<R>>) -> Self {
        Self::Adapted { inner, decoder }
    }

    /// The explicit decoder, if the variant carries one
    pub fn decoder(&self) -> Option<&SharedDecoder<R>> {
        match self {
            Self::ExplicitWithDecoder { decoder, .. }
            | Self::TextWithDecoder { decoder, .. }
            | Self::ValueWithDecoder { decoder, .. }
            | Self::ResultTypeOnly { decoder }
            | Self::Adapted { decoder, .. } => decoder.as_ref(),
            Self::FromExpression(_) => None,
        }
    }

    /// Variant name, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExplicitWithDecoder { .. } => "explicit",
            Self::TextWithDecoder { .. } => "text",
            Self::ValueWithDecoder { .. } => "value",
            Self::FromExpression(_) => "expression",
            Self::ResultTypeOnly { .. } => "result-type-only",
            Self::Adapted { .. } => "adapted",
        }
    }
}

impl<D: 'static, R: 'static> TypedProjection<D, R> {
    /// Render into a query shape and result decoder
    pub fn render(&self, args: &RenderArgs<'_, D>) -> ProjectionResult<RenderedProjection<R>> {
        log::debug!(
            "rendering {} projection for {}",
            self.kind(),
            std::any::type_name::<R>()
        );
        let registry = args.registry();

        match self {
            Self::ExplicitWithDecoder { document, decoder } => {
                let document = WireDocument::Materialized(Arc::clone(document));
                Self::pair(Some(document), decoder.as_ref(), args)
            }
            Self::TextWithDecoder { text, decoder } => {
                let document = render_text(text)?;
                Self::pair(Some(document), decoder.as_ref(), args)
            }
            Self::ValueWithDecoder { value, decoder } => {
                let document = render_value(value, registry)?;
                Self::pair(Some(document), decoder.as_ref(), args)
            }
            Self::FromExpression(selector) => {
                expression::translate(args.translator(), selector, args.document_decoder())
            }
            Self::ResultTypeOnly { decoder } => Self::pair(None, decoder.as_ref(), args),
            Self::Adapted { inner, decoder } => {
                let document = inner.render(registry)?;
                Self::pair(Some(document), decoder.as_ref(), args)
            }
        }
    }

    fn pair(
        document: Option<WireDocument>,
        explicit: Option<&SharedDecoder<R>>,
        args: &RenderArgs<'_, D>,
    ) -> ProjectionResult<RenderedProjection<R>> {
        let decoder =
            DecoderResolver::new().resolve(explicit, args.document_decoder(), args.registry())?;
        Ok(RenderedProjection::new(document, decoder))
    }
}

impl<D, R> Clone for TypedProjection<D, R> {
    fn clone(&self) -> Self {
        match self {
            Self::ExplicitWithDecoder { document, decoder } => Self::ExplicitWithDecoder {
                document: Arc::clone(document),
                decoder: decoder.clone(),
            },
            Self::TextWithDecoder { text, decoder } => Self::TextWithDecoder {
                text: text.clone(),
                decoder: decoder.clone(),
            },
            Self::ValueWithDecoder { value, decoder } => Self::ValueWithDecoder {
                value: value.clone(),
                decoder: decoder.clone(),
            },
            Self::FromExpression(selector) => Self::FromExpression(selector.clone()),
            Self::ResultTypeOnly { decoder } => Self::ResultTypeOnly {
                decoder: decoder.clone(),
            },
            Self::Adapted { inner, decoder } => Self::Adapted {
                inner: inner.clone(),
                decoder: decoder.clone(),
            },
        }
    }
}

impl<D, R> fmt::Debug for TypedProjection<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decoder = self.decoder().map(|d| d.name());
        match self {
            Self::ExplicitWithDecoder { document, .. } => f
                .debug_struct("ExplicitWithDecoder")
                .field("document", document)
                .field("decoder", &decoder)
                .finish(),
            Self::TextWithDecoder { text, .. } => f
                .debug_struct("TextWithDecoder")
                .field("text", text)
                .field("decoder", &decoder)
                .finish(),
            Self::ValueWithDecoder { value, .. } => f
                .debug_struct("ValueWithDecoder")
                .field("value", value)
                .field("decoder", &decoder)
                .finish(),
            Self::FromExpression(selector) => {
                f.debug_tuple("FromExpression").field(selector).finish()
            }
            Self::ResultTypeOnly { .. } => f
                .debug_struct("ResultTypeOnly")
                .field("decoder", &decoder)
                .finish(),
            Self::Adapted { inner, .. } => f
                .debug_struct("Adapted")
                .field("inner", inner)
                .field("decoder", &decoder)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProjectionError;
    use docshape_codec::{CodecRegistry, DocumentCodec, same_decoder};

    #[test]
    fn test_result_type_only_has_no_document() {
        let registry = CodecRegistry::with_defaults();
        let args = RenderArgs::<Document>::new(&registry);

        let rendered = TypedProjection::<Document, Document>::result_type_only(None)
            .render(&args)
            .unwrap();
        assert!(rendered.document().is_none());
    }

    #[test]
    fn test_explicit_decoder_is_reported() {
        let decoder: SharedDecoder<Document> = Arc::new(DocumentCodec);
        let projection =
            TypedProjection::<Document, Document>::text("{a: 1}", Some(decoder.clone()));
        assert!(same_decoder(projection.decoder().unwrap(), &decoder));
        assert_eq!(projection.kind(), "text");
    }

    #[test]
    fn test_expression_without_ambient_decoder() {
        let registry = CodecRegistry::with_defaults();
        let selector = FieldSelector::<Document, bool>::new(["name"], |doc| doc.contains_key("name"))
            .unwrap();

        let err = TypedProjection::from_expression(selector)
            .render(&RenderArgs::new(&registry))
            .unwrap_err();
        assert!(matches!(err, ProjectionError::Translation { .. }));
    }
}
