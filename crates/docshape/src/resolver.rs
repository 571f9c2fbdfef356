//! Decoder resolution
//!
//! A rendered projection always carries a decoder, even when the caller
//! never named one. The decoder is chosen by the first matching rule:
//! 1. An explicit decoder supplied with the projection, used as is
//! 2. The ambient source-document decoder, when the result type is exactly
//!    the source document type
//! 3. The registry's decoder for the result type
//!
//! If all three come up empty, resolution fails with `DecoderNotFound`.

use crate::error::ProjectionResult;
use docshape_codec::{CodecRegistry, SharedDecoder};
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Which rule produced a resolved decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderSource {
    /// Supplied by the caller
    Explicit,
    /// Reused from the ambient document decoder
    Ambient,
    /// Looked up in the codec registry
    Registry,
}

/// Stateless decoder resolution policy
#[derive(Debug, Clone, Default)]
pub struct DecoderResolver;

impl DecoderResolver {
    /// Create a new resolver
    pub fn new() -> Self {
        Self
    }

    /// Resolve the decoder for result type `R` given a source document type `D`
    pub fn resolve<D: 'static, R: 'static>(
        &self,
        explicit: Option<&SharedDecoder<R>>,
        ambient: Option<&SharedDecoder<D>>,
        registry: &CodecRegistry,
    ) -> ProjectionResult<SharedDecoder<R>> {
        self.resolve_with_source(explicit, ambient, registry)
            .map(|(decoder, _)| decoder)
    }

    /// Resolve and report which rule matched
    pub fn resolve_with_source<D: 'static, R: 'static>(
        &self,
        explicit: Option<&SharedDecoder<R>>,
        ambient: Option<&SharedDecoder<D>>,
        registry: &CodecRegistry,
    ) -> ProjectionResult<(SharedDecoder<R>, DecoderSource)> {
        let result_type = std::any::type_name::<R>();

        if let Some(decoder) = explicit {
            log::debug!("using explicit decoder {} for {}", decoder.name(), result_type);
            return Ok((Arc::clone(decoder), DecoderSource::Explicit));
        }

        if let Some(decoder) = ambient.and_then(|ambient| self.reuse_ambient::<D, R>(ambient)) {
            log::debug!("reusing ambient decoder {} for {}", decoder.name(), result_type);
            return Ok((decoder, DecoderSource::Ambient));
        }

        log::debug!("looking up decoder for {} in registry", result_type);
        let decoder = registry.decoder_for::<R>()?;
        Ok((decoder, DecoderSource::Registry))
    }

    /// Check if a decoder for `D` can serve as a decoder for `R`
    ///
    /// Only exact type identity qualifies.
    pub fn can_reuse_ambient<D: 'static, R: 'static>(&self) -> bool {
        TypeId::of::<D>() == TypeId::of::<R>()
    }

    fn reuse_ambient<D: 'static, R: 'static>(
        &self,
        ambient: &SharedDecoder<D>,
    ) -> Option<SharedDecoder<R>> {
        let ambient: &dyn Any = ambient;
        ambient.downcast_ref::<SharedDecoder<R>>().cloned()
    }
}
