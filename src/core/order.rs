//! Byte-Order Converter
//!
//! Scalars travel as exactly `size_of::<T>()` bytes. The native representation is
//! taken with `bytemuck::bytes_of` and reversed when the configured order differs
//! from the host, so no aliasing or unaligned reads are involved.

use bytemuck::Pod;

use super::cursor::{ByteReader, ByteWriter};
use crate::config::{ByteOrder, CodecConfig, FloatOrder};
use crate::error::{CodecError, CodecResult};

/// Width of every count and length prefix on the wire.
pub const LEN_PREFIX_SIZE: usize = 4;

/// Fixed-width value copied byte-for-byte between memory and the wire.
///
/// `Pod` is the admission ticket: it rules out padding, owning pointers and
/// invalid bit patterns, so any byte sequence of the right width decodes.
pub trait Scalar: Pod {
    /// Floats are exempt from reordering under [`FloatOrder::Native`].
    const FLOAT: bool = false;
}

/// Codec instance with a fixed byte order.
///
/// Cheap to copy; holds no state beyond its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Little-endian codec with legacy float handling.
    pub const LITTLE: Codec = Codec::new(CodecConfig::new(ByteOrder::Little));
    /// Big-endian codec with legacy float handling.
    pub const BIG: Codec = Codec::new(CodecConfig::new(ByteOrder::Big));

    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    #[inline(always)]
    pub const fn config(&self) -> CodecConfig {
        self.config
    }

    #[inline(always)]
    pub const fn byte_order(&self) -> ByteOrder {
        self.config.byte_order
    }

    #[inline(always)]
    fn reverses<T: Scalar>(&self) -> bool {
        if T::FLOAT && matches!(self.config.float_order, FloatOrder::Native) {
            return false;
        }
        self.config.byte_order.differs_from_native()
    }

    /// Write `value` into the start of `dst`, returning the bytes written.
    #[inline(always)]
    pub fn write_scalar<T: Scalar>(&self, dst: &mut [u8], value: T) -> CodecResult<usize> {
        let width = std::mem::size_of::<T>();
        let Some(out) = dst.get_mut(..width) else {
            return Err(CodecError::BufferTooSmall {
                needed: width,
                available: dst.len(),
            });
        };
        out.copy_from_slice(bytemuck::bytes_of(&value));
        if self.reverses::<T>() {
            out.reverse();
        }
        Ok(width)
    }

    /// Read a scalar from the start of `src`.
    #[inline(always)]
    pub fn read_scalar<T: Scalar>(&self, src: &[u8]) -> CodecResult<T> {
        let width = std::mem::size_of::<T>();
        let Some(raw) = src.get(..width) else {
            return Err(CodecError::UnexpectedEnd {
                needed: width,
                available: src.len(),
            });
        };
        let mut value = T::zeroed();
        let bytes = bytemuck::bytes_of_mut(&mut value);
        bytes.copy_from_slice(raw);
        if self.reverses::<T>() {
            bytes.reverse();
        }
        Ok(value)
    }

    /// Append a scalar at the writer's cursor.
    #[inline(always)]
    pub fn put_scalar<T: Scalar>(
        &self,
        writer: &mut ByteWriter<'_>,
        value: T,
    ) -> CodecResult<()> {
        let slot = writer.reserve(std::mem::size_of::<T>())?;
        self.write_scalar(slot, value).map(|_| ())
    }

    #[inline(always)]
    pub fn take_scalar<T: Scalar>(&self, reader: &mut ByteReader<'_>) -> CodecResult<T> {
        let raw = reader.take(std::mem::size_of::<T>())?;
        self.read_scalar(raw)
    }

    /// Write a `u32` count or length prefix.
    pub fn put_len(&self, writer: &mut ByteWriter<'_>, len: usize) -> CodecResult<()> {
        let len = u32::try_from(len).map_err(|_| CodecError::LengthOverflow { len })?;
        self.put_scalar(writer, len)
    }

    pub fn take_len(&self, reader: &mut ByteReader<'_>) -> CodecResult<usize> {
        let len: u32 = self.take_scalar(reader)?;
        Ok(len as usize)
    }
}

impl From<CodecConfig> for Codec {
    fn from(config: CodecConfig) -> Self {
        Codec::new(config)
    }
}
