//! Diagnostic hooks for the argument codec.
//!
//! Observers are told about an operation after it succeeded and cannot change
//! the outcome. A call that fails reports nothing. The codec asks
//! [`CodecObserver::enabled`] first and builds no event at all when it
//! returns `false`.

use std::borrow::Cow;

use tracing::Level;

/// Something the codec did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecEvent<'a> {
    /// A single value was encoded by the primary converter
    EncodedSingle {
        type_name: &'static str,
        payload: &'a [u8],
    },
    /// Several values were encoded as one array
    EncodedMany {
        type_names: &'a [&'static str],
        payload: &'a [u8],
    },
    /// A single value was encoded by the fallback converter
    EncodedFallback {
        type_name: &'static str,
        payload: &'a [u8],
    },
    /// A payload was decoded by the primary converter
    Decoded {
        type_name: &'static str,
        payload: &'a [u8],
    },
    /// A payload was decoded by the fallback converter
    DecodedFallback {
        type_name: &'static str,
        payload: &'a [u8],
    },
    /// A payload was decoded into several values
    DecodedArray {
        type_names: &'a [&'static str],
        payload: &'a [u8],
    },
    /// A payload was decoded into a one-element argument list
    DecodedArraySingle {
        type_name: &'static str,
        payload: &'a [u8],
    },
}

impl<'a> CodecEvent<'a> {
    pub fn payload(&self) -> &'a [u8] {
        match *self {
            CodecEvent::EncodedSingle { payload, .. }
            | CodecEvent::EncodedMany { payload, .. }
            | CodecEvent::EncodedFallback { payload, .. }
            | CodecEvent::Decoded { payload, .. }
            | CodecEvent::DecodedFallback { payload, .. }
            | CodecEvent::DecodedArray { payload, .. }
            | CodecEvent::DecodedArraySingle { payload, .. } => payload,
        }
    }

    /// Payload rendered as text for log output
    pub fn payload_text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.payload())
    }
}

/// Receives [`CodecEvent`]s from the codec
pub trait CodecObserver: Send + Sync {
    /// Whether events should be built and delivered at all
    fn enabled(&self) -> bool;

    fn observe(&self, event: &CodecEvent<'_>);
}

/// Observer that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CodecObserver for NoopObserver {
    #[inline]
    fn enabled(&self) -> bool {
        false
    }

    #[inline]
    fn observe(&self, _event: &CodecEvent<'_>) {}
}

/// Observer that writes events as `tracing` trace records
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    force: bool,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self { force: false }
    }

    /// Emit events even when TRACE is not enabled for this crate
    pub fn forced() -> Self {
        Self { force: true }
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }
}

impl CodecObserver for TracingObserver {
    fn enabled(&self) -> bool {
        self.force || tracing::enabled!(target: "cadence_converter::codec", Level::TRACE)
    }

    fn observe(&self, event: &CodecEvent<'_>) {
        let payload = event.payload_text();
        match *event {
            CodecEvent::EncodedSingle { type_name, .. } => tracing::trace!(
                target: "cadence_converter::codec",
                "[toData] result for single value of type {}: {}",
                type_name,
                payload
            ),
            CodecEvent::EncodedMany { type_names, .. } => tracing::trace!(
                target: "cadence_converter::codec",
                "[toData] result for values of types {:?}: {}",
                type_names,
                payload
            ),
            CodecEvent::EncodedFallback { type_name, .. } => tracing::trace!(
                target: "cadence_converter::codec",
                "[toData] fell back to legacy converter for type {}: {}",
                type_name,
                payload
            ),
            CodecEvent::Decoded { type_name, .. } => tracing::trace!(
                target: "cadence_converter::codec",
                "[fromData] decoded type {}, content: {}",
                type_name,
                payload
            ),
            CodecEvent::DecodedFallback { type_name, .. } => tracing::trace!(
                target: "cadence_converter::codec",
                "[fromData] decoded type {} with legacy converter, content: {}",
                type_name,
                payload
            ),
            CodecEvent::DecodedArray { type_names, .. } => tracing::trace!(
                target: "cadence_converter::codec",
                "[fromDataArray] decoded types {:?}, content: {}",
                type_names,
                payload
            ),
            CodecEvent::DecodedArraySingle { type_name, .. } => tracing::trace!(
                target: "cadence_converter::codec",
                "[fromDataArray] decoded single type {}, content: {}",
                type_name,
                payload
            ),
        }
    }
}

impl<O: CodecObserver + ?Sized> CodecObserver for std::sync::Arc<O> {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn observe(&self, event: &CodecEvent<'_>) {
        (**self).observe(event)
    }
}
