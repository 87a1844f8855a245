//! Codec Engine entry points: size, encode, decode.
//!
//! All three walk the same shape tree, so for any value
//! `size_of == bytes written by encode == bytes read by decode`.

use super::cursor::{ByteReader, ByteWriter};
use super::order::Codec;
use super::shape::{Decodable, Encodable};
use crate::error::{CodecError, CodecResult};

impl Codec {
    /// Exact number of bytes `encode` will write for `value`.
    #[inline(always)]
    pub fn size_of<T: Encodable + ?Sized>(&self, value: &T) -> usize {
        value.encoded_len()
    }

    /// Encode `value` into the start of `dst`.
    ///
    /// The destination is checked against `size_of(value)` before any byte is
    /// written; an undersized buffer is left untouched.
    pub fn encode<T: Encodable + ?Sized>(&self, dst: &mut [u8], value: &T) -> CodecResult<usize> {
        let needed = value.encoded_len();
        let Some(target) = dst.get_mut(..needed) else {
            return Err(CodecError::BufferTooSmall {
                needed,
                available: dst.len(),
            });
        };
        let mut writer = ByteWriter::new(target);
        value.encode_to(self, &mut writer)?;
        debug_assert_eq!(writer.position(), needed, "encoded_len disagrees with encode_to");
        Ok(writer.position())
    }

    /// Encode into a freshly allocated buffer of exactly `size_of(value)` bytes.
    pub fn encode_to_vec<T: Encodable + ?Sized>(&self, value: &T) -> CodecResult<Vec<u8>> {
        let mut buffer = vec![0u8; value.encoded_len()];
        self.encode(&mut buffer, value)?;
        Ok(buffer)
    }

    /// Decode a value from the start of `src`, returning it with the bytes consumed.
    pub fn decode<T: Decodable>(&self, src: &[u8]) -> CodecResult<(T, usize)> {
        let mut reader = ByteReader::new(src);
        let value = T::decode_from(self, &mut reader)?;
        Ok((value, reader.position()))
    }

    /// Decode a value from `src` and store it in `dst`.
    ///
    /// `dst` is assigned only on success; after an error it still holds its
    /// previous value.
    pub fn decode_into<T: Decodable>(&self, src: &[u8], dst: &mut T) -> CodecResult<usize> {
        let (value, read) = self.decode::<T>(src)?;
        *dst = value;
        Ok(read)
    }

    /// Decode over an existing value, reusing its storage where possible.
    ///
    /// Not failure-atomic: after an error the contents of `dst` are unspecified
    /// (a prefix may already hold decoded data). Use [`decode_into`](Self::decode_into)
    /// when the previous value must survive bad input.
    pub fn decode_in_place<T: Decodable>(&self, src: &[u8], dst: &mut T) -> CodecResult<usize> {
        let mut reader = ByteReader::new(src);
        dst.decode_in_place(self, &mut reader)?;
        Ok(reader.position())
    }

    /// Decode a value that must span all of `src`.
    pub fn decode_exact<T: Decodable>(&self, src: &[u8]) -> CodecResult<T> {
        let mut reader = ByteReader::new(src);
        let value = T::decode_from(self, &mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}
