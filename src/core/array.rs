//! Fixed-array shape: `N` elements back to back, no prefix.

use super::cursor::{ByteReader, ByteWriter};
use super::order::Codec;
use super::preview::preview_items;
use super::shape::{Decodable, Encodable, Shape};
use crate::error::{CodecError, CodecResult};

impl<T: Encodable, const N: usize> Encodable for [T; N] {
    const SHAPE: Shape = Shape::FixedArray;

    fn encoded_len(&self) -> usize {
        self.iter().map(Encodable::encoded_len).sum()
    }

    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        for item in self {
            item.encode_to(codec, writer)?;
        }
        Ok(())
    }

    fn preview(&self, out: &mut String) {
        preview_items(self.iter(), out)
    }
}

impl<T: Decodable, const N: usize> Decodable for [T; N] {
    fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode_from(codec, reader)?);
        }
        items
            .try_into()
            .map_err(|_| CodecError::InvalidValue { what: "fixed array" })
    }

    fn decode_in_place(&mut self, codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<()> {
        for item in self.iter_mut() {
            item.decode_in_place(codec, reader)?;
        }
        Ok(())
    }
}
