//! Core module: shape classifier, byte-order converter and codec engine
//!
//! Design principles:
//! - Static shapes: both sides know the value's type, nothing self-describing goes on the wire
//! - Caller-owned buffers: the engine never allocates the destination on encode
//! - Checked bounds: every read and write goes through a cursor that reports underruns

mod array;
mod cstring;
mod cursor;
mod engine;
mod order;
mod preview;
mod scalar;
mod sequence;
mod shape;
mod tuple;

pub use cursor::{ByteReader, ByteWriter};
pub use order::{Codec, Scalar, LEN_PREFIX_SIZE};
pub use preview::{preview, PREVIEW_LIMIT};
pub use shape::{shape_of, Decodable, Encodable, Shape};

#[doc(hidden)]
pub use shape::probe;
