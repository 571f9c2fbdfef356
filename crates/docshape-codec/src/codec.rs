//! Decoder and encoder traits with their stock implementations

use crate::error::{CodecError, CodecResult};
use docshape_document::Document;
use serde::Serialize;
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Reconstructs a typed value from a wire document
pub trait Decoder<T>: Send + Sync {
    /// Decode a document into `T`
    fn decode(&self, document: &Document) -> CodecResult<T>;

    /// Name used in logs and error messages
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Identity of this decoder
    ///
    /// Defaults to the instance address. Adapters built fresh around other
    /// decoders override it so that equal compositions compare equal.
    fn id(&self) -> DecoderId {
        DecoderId::of(self)
    }
}

/// Decoder identity used to compare decoder handles
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecoderId(SmallVec<[usize; 2]>);

impl DecoderId {
    /// Identity of a single decoder instance
    pub fn of<T: ?Sized>(decoder: &T) -> Self {
        let mut parts = SmallVec::new();
        parts.push(decoder as *const T as *const () as usize);
        Self(parts)
    }

    /// Identity of an adapter over this decoder, distinguished by `part`
    pub fn derive(&self, part: usize) -> Self {
        let mut parts = self.0.clone();
        parts.push(part);
        Self(parts)
    }
}

/// Produces a wire document from a value whose type is only known at runtime
pub trait Encoder: Send + Sync {
    /// Encode a value into a document
    ///
    /// Fails when `value` is not of the type this encoder was registered for.
    fn encode(&self, value: &dyn Any) -> CodecResult<Document>;

    /// Name used in logs and error messages
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a decoder
pub type SharedDecoder<T> = Arc<dyn Decoder<T>>;

/// Shared handle to an encoder
pub type SharedEncoder = Arc<dyn Encoder>;

/// Check if two decoder handles refer to the same decoder
pub fn same_decoder<T>(a: &SharedDecoder<T>, b: &SharedDecoder<T>) -> bool {
    a.id() == b.id()
}

/// Decoder for any `serde` deserializable type
pub struct SerdeDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeDecoder<T> {
    /// Create a new serde decoder
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeDecoder<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> Decoder<T> for SerdeDecoder<T> {
    fn decode(&self, document: &Document) -> CodecResult<T> {
        serde_json::from_value(document.to_json())
            .map_err(|e| CodecError::decode(std::any::type_name::<T>(), e.to_string()))
    }
}

/// Encoder for any `serde` serializable type
pub struct SerdeEncoder<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T> SerdeEncoder<T> {
    /// Create a new serde encoder
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeEncoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeEncoder<{}>", std::any::type_name::<T>())
    }
}

impl<T: Serialize + 'static> Encoder for SerdeEncoder<T> {
    fn encode(&self, value: &dyn Any) -> CodecResult<Document> {
        let type_name = std::any::type_name::<T>();
        let value = value
            .downcast_ref::<T>()
            .ok_or_else(|| CodecError::encode(type_name, "value has a different runtime type"))?;
        let json =
            serde_json::to_value(value).map_err(|e| CodecError::encode(type_name, e.to_string()))?;
        Document::try_from(json).map_err(|e| CodecError::encode(type_name, e.to_string()))
    }
}

/// Identity codec for [`Document`] itself
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentCodec;

impl Decoder<Document> for DocumentCodec {
    fn decode(&self, document: &Document) -> CodecResult<Document> {
        Ok(document.clone())
    }
}

impl Encoder for DocumentCodec {
    fn encode(&self, value: &dyn Any) -> CodecResult<Document> {
        value
            .downcast_ref::<Document>()
            .cloned()
            .ok_or_else(|| {
                CodecError::encode(
                    std::any::type_name::<Document>(),
                    "value has a different runtime type",
                )
            })
    }
}

/// Decoder backed by a closure
pub struct FnDecoder<F> {
    decode: F,
}

impl<F> FnDecoder<F> {
    /// Wrap a decoding function
    pub fn new(decode: F) -> Self {
        Self { decode }
    }
}

impl<T, F> Decoder<T> for FnDecoder<F>
where
    F: Fn(&Document) -> CodecResult<T> + Send + Sync,
{
    fn decode(&self, document: &Document) -> CodecResult<T> {
        (self.decode)(document)
    }
}

/// Create a shared decoder from a closure
pub fn decoder_fn<T, F>(decode: F) -> SharedDecoder<T>
where
    F: Fn(&Document) -> CodecResult<T> + Send + Sync + 'static,
    T: 'static,
{
    Arc::new(FnDecoder::new(decode))
}
