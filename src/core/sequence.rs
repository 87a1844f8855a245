//! Sequence shape: `u32` element count followed by the elements.
//!
//! Layout:
//! ┌──────────────┬───────────┬───────────┬─────┐
//! │ count (u32)  │ element 0 │ element 1 │ ... │
//! └──────────────┴───────────┴───────────┴─────┘
//!
//! Text travels as a sequence of bytes; decode validates UTF-8.

use std::collections::VecDeque;
use std::fmt::Write as _;

use super::cursor::{ByteReader, ByteWriter};
use super::order::{Codec, LEN_PREFIX_SIZE};
use super::preview::preview_items;
use super::shape::{Decodable, Encodable, Shape};
use crate::error::{CodecError, CodecResult};

/// Capacity to reserve for `count` decoded elements.
///
/// A corrupt count must not trigger a huge allocation, so the reservation is
/// capped by what the input could possibly hold.
#[inline(always)]
fn initial_capacity(count: usize, reader: &ByteReader<'_>) -> usize {
    count.min(reader.remaining())
}

impl<T: Encodable> Encodable for [T] {
    const SHAPE: Shape = Shape::Sequence;

    fn encoded_len(&self) -> usize {
        LEN_PREFIX_SIZE + self.iter().map(Encodable::encoded_len).sum::<usize>()
    }

    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        codec.put_len(writer, self.len())?;
        for item in self {
            item.encode_to(codec, writer)?;
        }
        Ok(())
    }

    fn preview(&self, out: &mut String) {
        preview_items(self.iter(), out)
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    const SHAPE: Shape = Shape::Sequence;

    #[inline(always)]
    fn encoded_len(&self) -> usize {
        self.as_slice().encoded_len()
    }

    #[inline(always)]
    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        self.as_slice().encode_to(codec, writer)
    }

    fn preview(&self, out: &mut String) {
        self.as_slice().preview(out)
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let count = codec.take_len(reader)?;
        let mut items = Vec::with_capacity(initial_capacity(count, reader));
        for _ in 0..count {
            items.push(T::decode_from(codec, reader)?);
        }
        Ok(items)
    }

    /// Resizes to the decoded count; surviving elements are decoded in place.
    fn decode_in_place(&mut self, codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<()> {
        let count = codec.take_len(reader)?;
        self.truncate(count);
        for item in self.iter_mut() {
            item.decode_in_place(codec, reader)?;
        }
        self.reserve(initial_capacity(count - self.len(), reader));
        while self.len() < count {
            self.push(T::decode_from(codec, reader)?);
        }
        Ok(())
    }
}

impl<T: Encodable> Encodable for VecDeque<T> {
    const SHAPE: Shape = Shape::Sequence;

    fn encoded_len(&self) -> usize {
        LEN_PREFIX_SIZE + self.iter().map(Encodable::encoded_len).sum::<usize>()
    }

    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        codec.put_len(writer, self.len())?;
        for item in self {
            item.encode_to(codec, writer)?;
        }
        Ok(())
    }

    fn preview(&self, out: &mut String) {
        preview_items(self.iter(), out)
    }
}

impl<T: Decodable> Decodable for VecDeque<T> {
    fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        Vec::<T>::decode_from(codec, reader).map(VecDeque::from)
    }
}

impl Encodable for str {
    const SHAPE: Shape = Shape::Sequence;

    #[inline(always)]
    fn encoded_len(&self) -> usize {
        LEN_PREFIX_SIZE + self.len()
    }

    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        codec.put_len(writer, self.len())?;
        writer.put_bytes(self.as_bytes())
    }

    fn preview(&self, out: &mut String) {
        let _ = write!(out, "{:?}", self);
    }
}

impl Encodable for String {
    const SHAPE: Shape = Shape::Sequence;

    #[inline(always)]
    fn encoded_len(&self) -> usize {
        self.as_str().encoded_len()
    }

    #[inline(always)]
    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        self.as_str().encode_to(codec, writer)
    }

    fn preview(&self, out: &mut String) {
        self.as_str().preview(out)
    }
}

impl Decodable for String {
    fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let len = codec.take_len(reader)?;
        let bytes = reader.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CodecError::InvalidValue { what: "utf-8 text" })
    }

    fn decode_in_place(&mut self, codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<()> {
        let len = codec.take_len(reader)?;
        let bytes = reader.take(len)?;
        let text =
            std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidValue { what: "utf-8 text" })?;
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_wire_shape() {
        let bytes = Codec::LITTLE.encode_to_vec(&vec![1i32, 2, 3]).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x03, 0x00, 0x00, 0x00, //
                0x01, 0x00, 0x00, 0x00, //
                0x02, 0x00, 0x00, 0x00, //
                0x03, 0x00, 0x00, 0x00,
            ]
        );
        assert_eq!(Codec::LITTLE.size_of(&vec![1i32, 2, 3]), 16);
    }

    #[test]
    fn test_count_prefix_follows_byte_order() {
        let bytes = Codec::BIG.encode_to_vec(&vec![0x0102u16]).unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x01, 0x01, 0x02]);
    }

    #[test]
    fn test_empty_sequences() {
        let codec = Codec::LITTLE;
        assert_eq!(codec.encode_to_vec(&Vec::<u64>::new()).unwrap(), vec![0; 4]);
        assert_eq!(codec.encode_to_vec(&String::new()).unwrap(), vec![0; 4]);
        assert_eq!(codec.decode::<Vec<u64>>(&[0; 4]).unwrap(), (vec![], 4));
        assert_eq!(codec.decode::<String>(&[0; 4]).unwrap(), (String::new(), 4));
    }

    #[test]
    fn test_decode_in_place_resizes() {
        let codec = Codec::LITTLE;
        let bytes = codec.encode_to_vec(&vec![7u16, 8]).unwrap();

        let mut shrinking = vec![1u16, 2, 3, 4];
        assert_eq!(codec.decode_in_place(&bytes, &mut shrinking).unwrap(), 8);
        assert_eq!(shrinking, vec![7, 8]);

        let mut growing = vec![9u16];
        codec.decode_in_place(&bytes, &mut growing).unwrap();
        assert_eq!(growing, vec![7, 8]);
    }

    #[test]
    fn test_borrowed_forms_match_owned() {
        let codec = Codec::BIG;
        let owned = codec.encode_to_vec(&String::from("source")).unwrap();
        assert_eq!(codec.encode_to_vec("source").unwrap(), owned);

        let slice: &[u32] = &[5, 6];
        assert_eq!(
            codec.encode_to_vec(slice).unwrap(),
            codec.encode_to_vec(&vec![5u32, 6]).unwrap()
        );
        assert_eq!(
            codec.encode_to_vec(&VecDeque::from(vec![5u32, 6])).unwrap(),
            codec.encode_to_vec(slice).unwrap()
        );
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let bytes = [0x02, 0x00, 0x00, 0x00, 0xC3, 0x28];
        assert_eq!(
            Codec::LITTLE.decode::<String>(&bytes),
            Err(CodecError::InvalidValue { what: "utf-8 text" })
        );
    }

    #[test]
    fn test_huge_count_fails_without_allocating() {
        // Claims u32::MAX elements but carries none
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF];
        let err = Codec::LITTLE.decode::<Vec<u64>>(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEnd { .. }));
    }
}
