//! Tuple shape: fields concatenated in declared order, no tags.
//!
//! Tuples up to twelve fields are supported. The unit tuple encodes as
//! zero bytes.

use super::cursor::{ByteReader, ByteWriter};
use super::order::Codec;
use super::shape::{Decodable, Encodable, Shape};
use crate::error::CodecResult;

impl Encodable for () {
    const SHAPE: Shape = Shape::Tuple;

    #[inline(always)]
    fn encoded_len(&self) -> usize {
        0
    }

    #[inline(always)]
    fn encode_to(&self, _codec: &Codec, _writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        Ok(())
    }

    fn preview(&self, out: &mut String) {
        out.push_str("{}");
    }
}

impl Decodable for () {
    #[inline(always)]
    fn decode_from(_codec: &Codec, _reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(())
    }
}

macro_rules! tuple_impls {
    ($( ( $($name:ident $idx:tt),+ ) )+) => {
        $(
            impl<$($name: Encodable),+> Encodable for ($($name,)+) {
                const SHAPE: Shape = Shape::Tuple;

                #[inline(always)]
                fn encoded_len(&self) -> usize {
                    0 $(+ self.$idx.encoded_len())+
                }

                #[inline(always)]
                fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
                    $( self.$idx.encode_to(codec, writer)?; )+
                    Ok(())
                }

                fn preview(&self, out: &mut String) {
                    out.push('{');
                    $(
                        if $idx != 0 {
                            out.push_str(", ");
                        }
                        self.$idx.preview(out);
                    )+
                    out.push('}');
                }
            }

            impl<$($name: Decodable),+> Decodable for ($($name,)+) {
                #[inline(always)]
                fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self> {
                    Ok(($( $name::decode_from(codec, reader)?, )+))
                }

                fn decode_in_place(&mut self, codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<()> {
                    $( self.$idx.decode_in_place(codec, reader)?; )+
                    Ok(())
                }
            }
        )+
    };
}

tuple_impls! {
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_is_zero_bytes() {
        let codec = Codec::LITTLE;
        assert_eq!(codec.size_of(&()), 0);
        assert!(codec.encode_to_vec(&()).unwrap().is_empty());
        assert_eq!(codec.decode::<()>(&[]).unwrap(), ((), 0));
    }

    #[test]
    fn test_fields_in_declared_order() {
        let bytes = Codec::LITTLE
            .encode_to_vec(&(0x11u8, 0x2233u16, String::from("a"), 0x44u8))
            .unwrap();
        assert_eq!(
            bytes,
            vec![0x11, 0x33, 0x22, 0x01, 0x00, 0x00, 0x00, b'a', 0x44]
        );
    }

    #[test]
    fn test_nested_tuple_flattens_on_the_wire() {
        let codec = Codec::BIG;
        let nested = codec.encode_to_vec(&((1u8, 2u16), (3u32,))).unwrap();
        let flat = codec.encode_to_vec(&(1u8, 2u16, 3u32)).unwrap();
        assert_eq!(nested, flat);
    }

    #[test]
    fn test_twelve_fields() {
        let value = (1u8, 2u16, 3u32, 4u64, 5i8, 6i16, 7i32, 8i64, 9.0f32, 10.0f64, true, 'c');
        let codec = Codec::LITTLE;
        let bytes = codec.encode_to_vec(&value).unwrap();
        assert_eq!(bytes.len(), 1 + 2 + 4 + 8 + 1 + 2 + 4 + 8 + 4 + 8 + 1 + 4);
        let (decoded, read) = codec.decode::<(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, bool, char)>(&bytes).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(read, bytes.len());
    }
}
