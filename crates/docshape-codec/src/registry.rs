//! Codec registry
//!
//! Maps Rust types to their decoders and structural encoders. Lookups are
//! read-only and always hand back the same `Arc` that was registered, so a
//! repeated lookup yields the same decoder reference.

use crate::codec::{
    Decoder, DocumentCodec, Encoder, SerdeDecoder, SerdeEncoder, SharedDecoder, SharedEncoder,
};
use crate::error::{CodecError, CodecResult};
use crate::type_key::TypeKey;
use docshape_document::Document;
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct Codecs {
    /// Values are `SharedDecoder<T>` for the keyed `T`
    decoders: HashMap<TypeKey, Box<dyn Any + Send + Sync>>,
    encoders: HashMap<TypeKey, SharedEncoder>,
}

/// Thread-safe registry of decoders and encoders.
///
/// Cloning the registry shares the underlying tables.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: Arc<RwLock<Codecs>>,
}

impl CodecRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the [`Document`] identity codec registered
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register_decoder::<Document>(Arc::new(DocumentCodec));
        registry.register_encoder::<Document>(Arc::new(DocumentCodec));
        registry
    }

    /// Register the decoder for `T`, replacing any previous one
    pub fn register_decoder<T: 'static>(&self, decoder: SharedDecoder<T>) {
        let key = TypeKey::of::<T>();
        log::trace!("registering decoder {} for {}", decoder.name(), key);
        self.codecs.write().decoders.insert(key, Box::new(decoder));
    }

    /// Register the structural encoder for values of runtime type `T`
    pub fn register_encoder<T: 'static>(&self, encoder: SharedEncoder) {
        let key = TypeKey::of::<T>();
        log::trace!("registering encoder {} for {}", encoder.name(), key);
        self.codecs.write().encoders.insert(key, encoder);
    }

    /// Register serde-backed decoder and encoder for `T`
    pub fn register_serde<T>(&self)
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        self.register_decoder::<T>(Arc::new(SerdeDecoder::<T>::new()));
        self.register_encoder::<T>(Arc::new(SerdeEncoder::<T>::new()));
    }

    /// Look up the decoder for `T`
    pub fn decoder_for<T: 'static>(&self) -> CodecResult<SharedDecoder<T>> {
        let key = TypeKey::of::<T>();
        let codecs = self.codecs.read();
        let found = codecs
            .decoders
            .get(&key)
            .and_then(|entry| entry.downcast_ref::<SharedDecoder<T>>())
            .cloned();
        log::trace!("decoder lookup for {}: found={}", key, found.is_some());
        found.ok_or_else(|| CodecError::DecoderNotFound {
            type_name: key.name().to_string(),
        })
    }

    /// Look up the structural encoder for a runtime type
    pub fn encoder_for(&self, key: TypeKey) -> CodecResult<SharedEncoder> {
        let found = self.codecs.read().encoders.get(&key).cloned();
        log::trace!("encoder lookup for {}: found={}", key, found.is_some());
        found.ok_or_else(|| CodecError::EncoderNotFound {
            type_name: key.name().to_string(),
        })
    }

    /// Check if a decoder is registered for `T`
    pub fn has_decoder<T: 'static>(&self) -> bool {
        self.codecs.read().decoders.contains_key(&TypeKey::of::<T>())
    }

    /// Check if an encoder is registered for the runtime type
    pub fn has_encoder(&self, key: TypeKey) -> bool {
        self.codecs.read().encoders.contains_key(&key)
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codecs = self.codecs.read();
        let mut decoders: Vec<_> = codecs.decoders.keys().map(TypeKey::name).collect();
        let mut encoders: Vec<_> = codecs.encoders.keys().map(TypeKey::name).collect();
        decoders.sort_unstable();
        encoders.sort_unstable();
        f.debug_struct("CodecRegistry")
            .field("decoders", &decoders)
            .field("encoders", &encoders)
            .finish()
    }
}
