//! The argument codec.
//!
//! [`ArgumentCodec`] converts the positional arguments of a call into one
//! [`Payload`] and back:
//!
//! - no arguments, or a single null argument, give the empty payload;
//! - a single argument is encoded as-is, several as one array;
//! - decoding several arguments tolerates a non-array payload and fills
//!   missing trailing arguments with zero values.
//!
//! Types named in the [`FallbackSet`] are handed to the fallback converter,
//! but only when a single value is encoded or decoded with
//! [`ArgumentCodec::from_data`]. Array encoding and
//! [`ArgumentCodec::from_data_array`] always use the primary converter;
//! existing payloads depend on that.

use std::any::type_name;
use std::sync::OnceLock;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::arguments::{ArgumentEncoder, ArgumentTypes, Arguments};
use crate::converter::{DataConverter, JsonDataConverter, TreeConverter};
use crate::descriptor::referent_name;
use crate::error::{CodecError, ConverterError, ConverterResult, DecodingError, EncodingError};
use crate::fallback::FallbackSet;
use crate::null::is_null;
use crate::observer::{CodecEvent, CodecObserver, TracingObserver};
use crate::payload::Payload;

/// Codec configuration that can be loaded from a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgumentCodecOptions {
    /// Type names routed to the fallback converter
    pub fallback_types: Vec<String>,
    /// Trace payloads even when TRACE logging is off
    pub trace_payloads: bool,
}

impl Default for ArgumentCodecOptions {
    fn default() -> Self {
        Self {
            fallback_types: FallbackSet::default_type_names(),
            trace_payloads: false,
        }
    }
}

impl ArgumentCodecOptions {
    /// Parse options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> ConverterResult<Self> {
        serde_json::from_str(json).map_err(|e| ConverterError::InvalidConfiguration(e.to_string()))
    }
}

/// Converts positional call arguments to and from payloads.
///
/// All parts are immutable once built, so a codec can be shared between
/// threads without locking.
#[derive(Debug, Clone)]
pub struct ArgumentCodec<P = JsonDataConverter, F = JsonDataConverter, O = TracingObserver> {
    primary: P,
    fallback: F,
    fallback_types: FallbackSet,
    observer: O,
}

impl ArgumentCodec {
    /// Create a codec with the JSON converter and the default fallback set
    pub fn new() -> Self {
        ArgumentCodecBuilder::new().build()
    }

    pub fn from_options(options: &ArgumentCodecOptions) -> Self {
        ArgumentCodecBuilder::new().options(options).build()
    }

    pub fn builder() -> ArgumentCodecBuilder {
        ArgumentCodecBuilder::new()
    }

    /// Process-wide default codec, built on first use
    pub fn shared() -> &'static ArgumentCodec {
        static SHARED: OnceLock<ArgumentCodec> = OnceLock::new();
        SHARED.get_or_init(ArgumentCodec::new)
    }
}

impl Default for ArgumentCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, F, O> ArgumentCodec<P, F, O>
where
    P: TreeConverter,
    F: DataConverter,
    O: CodecObserver,
{
    /// Encode an ordered list of values into a single payload
    pub fn to_data<A: Arguments + ?Sized>(&self, values: &A) -> Result<Payload, EncodingError> {
        values
            .encode_with(&Encoder { codec: self })
            .map_err(|source| EncodingError::new(values.type_names(), source))
    }

    /// Decode a payload holding a single value.
    ///
    /// Returns `None` for the empty payload and whenever `T` is `()`.
    pub fn from_data<T: DeserializeOwned>(
        &self,
        payload: &Payload,
    ) -> Result<Option<T>, DecodingError> {
        let descriptor = self.primary.describe::<T>();
        let data = match payload.as_bytes() {
            Some(data) if !descriptor.is_unit() => data,
            _ => return Ok(None),
        };
        let fail = |source| DecodingError::new(payload.clone(), vec![descriptor.name()], source);

        if self.fallback_types.contains(descriptor.name()) {
            let value = self.fallback.decode(data).map_err(fail)?;
            self.notify(|| CodecEvent::DecodedFallback {
                type_name: descriptor.name(),
                payload: data,
            });
            return Ok(Some(value));
        }

        let value = self.primary.decode(data).map_err(fail)?;
        self.notify(|| CodecEvent::Decoded {
            type_name: descriptor.name(),
            payload: data,
        });
        Ok(Some(value))
    }

    /// Decode a payload into the ordered list of types `T`.
    ///
    /// The empty payload only satisfies `()`. For two or more types a
    /// non-array payload counts as a one-element array, and arguments missing
    /// from the end of the payload get a zero value: `0`, `0.0`, `false` or
    /// `'\0'` for primitives and `None` for `Option<_>`.
    ///
    /// A missing trailing argument whose type has no null value, such as
    /// `String` or a plain struct, fails with
    /// [`CodecError::MissingArgument`]. Declare arguments that older payloads
    /// may lack as `Option<T>`.
    pub fn from_data_array<T: ArgumentTypes>(&self, payload: &Payload) -> Result<T, DecodingError> {
        let fail = |source| DecodingError::new(payload.clone(), T::descriptor_names(), source);

        let Some(data) = payload.as_bytes() else {
            if T::ARITY == 0 {
                return T::from_nodes(&self.primary, Vec::new()).map_err(fail);
            }
            return Err(fail(CodecError::ArityMismatch { expected: T::ARITY }));
        };

        let values = T::decode(&self.primary, data).map_err(fail)?;
        if self.observer.enabled() {
            let type_names = T::descriptor_names();
            let event = match type_names.as_slice() {
                [type_name] => CodecEvent::DecodedArraySingle {
                    type_name: *type_name,
                    payload: data,
                },
                type_names => CodecEvent::DecodedArray {
                    type_names,
                    payload: data,
                },
            };
            self.observer.observe(&event);
        }
        Ok(values)
    }

    pub fn fallback_types(&self) -> &FallbackSet {
        &self.fallback_types
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn notify<'a>(&self, event: impl FnOnce() -> CodecEvent<'a>) {
        if self.observer.enabled() {
            self.observer.observe(&event());
        }
    }
}

struct Encoder<'c, P, F, O> {
    codec: &'c ArgumentCodec<P, F, O>,
}

impl<P, F, O> ArgumentEncoder for Encoder<'_, P, F, O>
where
    P: TreeConverter,
    F: DataConverter,
    O: CodecObserver,
{
    type Output = Result<Payload, CodecError>;

    fn encode_none(&self) -> Self::Output {
        Ok(Payload::empty())
    }

    fn encode_one<T: Serialize + ?Sized>(&self, value: &T) -> Self::Output {
        let codec = self.codec;
        if is_null(value) {
            return Ok(Payload::empty());
        }

        let type_name = referent_name(type_name::<T>());
        if codec.fallback_types.contains(type_name) {
            let data = codec.fallback.encode(value)?;
            codec.notify(|| CodecEvent::EncodedFallback {
                type_name,
                payload: &data,
            });
            return Ok(Payload::new(data));
        }

        let data = codec.primary.encode(value)?;
        codec.notify(|| CodecEvent::EncodedSingle {
            type_name,
            payload: &data,
        });
        Ok(Payload::new(data))
    }

    fn encode_many<T: Serialize + ?Sized>(
        &self,
        values: &T,
        type_names: &[&'static str],
    ) -> Self::Output {
        let codec = self.codec;
        let data = codec.primary.encode_array(values)?;
        codec.notify(|| CodecEvent::EncodedMany {
            type_names,
            payload: &data,
        });
        Ok(Payload::new(data))
    }
}

/// Builder for [`ArgumentCodec`]
#[derive(Debug, Clone)]
pub struct ArgumentCodecBuilder<P = JsonDataConverter, F = JsonDataConverter, O = TracingObserver>
{
    primary: P,
    fallback: F,
    fallback_types: FallbackSet,
    observer: O,
}

impl ArgumentCodecBuilder {
    pub fn new() -> Self {
        Self {
            primary: JsonDataConverter::new(),
            fallback: JsonDataConverter::new(),
            fallback_types: FallbackSet::default(),
            observer: TracingObserver::new(),
        }
    }
}

impl Default for ArgumentCodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, F, O> ArgumentCodecBuilder<P, F, O> {
    pub fn primary<P2: TreeConverter>(self, primary: P2) -> ArgumentCodecBuilder<P2, F, O> {
        ArgumentCodecBuilder {
            primary,
            fallback: self.fallback,
            fallback_types: self.fallback_types,
            observer: self.observer,
        }
    }

    pub fn fallback<F2: DataConverter>(self, fallback: F2) -> ArgumentCodecBuilder<P, F2, O> {
        ArgumentCodecBuilder {
            primary: self.primary,
            fallback,
            fallback_types: self.fallback_types,
            observer: self.observer,
        }
    }

    pub fn observer<O2: CodecObserver>(self, observer: O2) -> ArgumentCodecBuilder<P, F, O2> {
        ArgumentCodecBuilder {
            primary: self.primary,
            fallback: self.fallback,
            fallback_types: self.fallback_types,
            observer,
        }
    }

    pub fn fallback_types(mut self, fallback_types: FallbackSet) -> Self {
        self.fallback_types = fallback_types;
        self
    }

    /// Apply loaded options. Replaces the observer with a [`TracingObserver`].
    pub fn options(self, options: &ArgumentCodecOptions) -> ArgumentCodecBuilder<P, F, TracingObserver> {
        let observer = if options.trace_payloads {
            TracingObserver::forced()
        } else {
            TracingObserver::new()
        };
        self.fallback_types(FallbackSet::new(options.fallback_types.iter().cloned()))
            .observer(observer)
    }

    pub fn build(self) -> ArgumentCodec<P, F, O> {
        ArgumentCodec {
            primary: self.primary,
            fallback: self.fallback,
            fallback_types: self.fallback_types,
            observer: self.observer,
        }
    }
}

/// Encode with the shared default codec
pub fn to_data<A: Arguments + ?Sized>(values: &A) -> Result<Payload, EncodingError> {
    ArgumentCodec::shared().to_data(values)
}

/// Decode a single value with the shared default codec
pub fn from_data<T: DeserializeOwned>(payload: &Payload) -> Result<Option<T>, DecodingError> {
    ArgumentCodec::shared().from_data(payload)
}

/// Decode an argument list with the shared default codec
pub fn from_data_array<T: ArgumentTypes>(payload: &Payload) -> Result<T, DecodingError> {
    ArgumentCodec::shared().from_data_array(payload)
}
