//! Argument data converter for the Cadence client.
//!
//! This crate turns the ordered argument list of a workflow, activity,
//! signal or query call into a single opaque payload and back again.
//!
//! - One argument is encoded as-is, two or more as a JSON array.
//! - Decoding against a larger arity than was encoded fills the missing
//!   trailing arguments with zero values.
//! - A fixed set of legacy types is handed to a fallback converter.
//!
//! ```rust
//! use cadence_converter::ArgumentCodec;
//!
//! let codec = ArgumentCodec::new();
//! let payload = codec.to_data(&("abc", 42)).unwrap();
//! let (name, count): (String, i32) = codec.from_data_array(&payload).unwrap();
//! assert_eq!(name, "abc");
//! assert_eq!(count, 42);
//! ```

pub mod arguments;
pub mod codec;
pub mod converter;
pub mod descriptor;
pub mod error;
pub mod fallback;
pub mod marker;
mod null;
pub mod observer;
pub mod payload;

pub use arguments::{ArgumentTypes, Arguments};
pub use codec::{
    from_data, from_data_array, to_data, ArgumentCodec, ArgumentCodecBuilder,
    ArgumentCodecOptions,
};
pub use converter::{DataConverter, JsonDataConverter, TreeConverter};
pub use descriptor::{TypeDescriptor, TypeKind};
pub use error::*;
pub use fallback::FallbackSet;
pub use observer::{CodecEvent, CodecObserver, NoopObserver, TracingObserver};
pub use payload::Payload;
