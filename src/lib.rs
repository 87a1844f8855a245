//! wirepack - Compile-Time Checked Binary Codec
//!
//! Architecture:
//! - Shape classifier: only statically encodable types reach the engine
//! - Byte-order converter: one configured order per codec, floats optionally exempt
//! - Codec engine: size, encode and decode agree on every byte
//! - Command framing: checksummed length header + class/function ids + arguments
//!
//! ```
//! use wirepack::{Codec, CommandBuilder, Frame};
//!
//! let codec = Codec::BIG;
//! let value = (7u16, String::from("probe"), vec![1.5f32, 2.5]);
//!
//! let mut buffer = vec![0u8; codec.size_of(&value)];
//! let written = codec.encode(&mut buffer, &value).unwrap();
//!
//! let (decoded, read) = codec.decode::<(u16, String, Vec<f32>)>(&buffer).unwrap();
//! assert_eq!((decoded, read), (value, written));
//!
//! let builder: CommandBuilder = CommandBuilder::new(codec);
//! let frame = builder.build(1, 2, &(3u8, 4u8)).unwrap();
//! let (parsed, _) = Frame::<wirepack::CompactHeader>::parse(&codec, &frame).unwrap();
//! assert_eq!(parsed.decode_args::<(u8, u8)>().unwrap(), (3, 4));
//! ```

pub mod config;
mod core;
pub mod error;
pub mod protocol;

pub use crate::config::{ByteOrder, CodecConfig, FloatOrder};
pub use crate::core::{
    preview, shape_of, ByteReader, ByteWriter, Codec, Decodable, Encodable, Scalar, Shape,
    LEN_PREFIX_SIZE, PREVIEW_LIMIT,
};
pub use crate::error::{CodecError, CodecResult, FrameError, FrameResult};
pub use crate::protocol::{
    Command, CommandBuilder, CompactHeader, Frame, FrameDecoder, HeaderFormat, MarkedHeader,
};

#[doc(hidden)]
pub mod __private {
    pub use crate::core::probe::{Eligible, Ineligible, Probe};
}
