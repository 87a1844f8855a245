//! Scalar shape: primitives and opted-in `Pod` structs.

use std::fmt::Write as _;

use super::cursor::{ByteReader, ByteWriter};
use super::order::{Codec, Scalar};
use super::shape::{Decodable, Encodable, Shape};
use crate::error::{CodecError, CodecResult};

/// Admit plain-old-data types as scalars.
///
/// Each type must implement [`bytemuck::Pod`]. Its in-memory bytes go on the
/// wire as one unit, reversed as a whole when the configured byte order
/// differs from the host.
///
/// ```
/// use wirepack::{impl_scalar, Codec};
///
/// #[repr(C)]
/// #[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// struct Reading {
///     sensor: u16,
///     flags: u16,
///     value: f32,
/// }
///
/// impl_scalar!(Reading);
///
/// let reading = Reading { sensor: 3, flags: 0, value: 21.5 };
/// let bytes = Codec::LITTLE.encode_to_vec(&vec![reading; 2]).unwrap();
/// assert_eq!(bytes.len(), 4 + 2 * 8);
/// ```
#[macro_export]
macro_rules! impl_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Scalar for $ty {}

            impl $crate::Encodable for $ty {
                const SHAPE: $crate::Shape = $crate::Shape::Scalar;

                #[inline(always)]
                fn encoded_len(&self) -> usize {
                    ::core::mem::size_of::<$ty>()
                }

                #[inline(always)]
                fn encode_to(
                    &self,
                    codec: &$crate::Codec,
                    writer: &mut $crate::ByteWriter<'_>,
                ) -> $crate::CodecResult<()> {
                    codec.put_scalar(writer, *self)
                }
            }

            impl $crate::Decodable for $ty {
                #[inline(always)]
                fn decode_from(
                    codec: &$crate::Codec,
                    reader: &mut $crate::ByteReader<'_>,
                ) -> $crate::CodecResult<Self> {
                    codec.take_scalar(reader)
                }
            }
        )+
    };
}

macro_rules! arithmetic_scalars {
    ($float:literal => $($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                const FLOAT: bool = $float;
            }

            impl Encodable for $ty {
                const SHAPE: Shape = Shape::Scalar;

                #[inline(always)]
                fn encoded_len(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }

                #[inline(always)]
                fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
                    codec.put_scalar(writer, *self)
                }

                fn preview(&self, out: &mut String) {
                    let _ = write!(out, "{}", self);
                }
            }

            impl Decodable for $ty {
                #[inline(always)]
                fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self> {
                    codec.take_scalar(reader)
                }
            }
        )+
    };
}

arithmetic_scalars!(false => u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);
arithmetic_scalars!(true => f32, f64);

// bool and char are not Pod: they travel as u8 / u32 and are validated on decode.

impl Encodable for bool {
    const SHAPE: Shape = Shape::Scalar;

    #[inline(always)]
    fn encoded_len(&self) -> usize {
        1
    }

    #[inline(always)]
    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        codec.put_scalar(writer, *self as u8)
    }

    fn preview(&self, out: &mut String) {
        let _ = write!(out, "{}", self);
    }
}

impl Decodable for bool {
    fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        match codec.take_scalar::<u8>(reader)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(CodecError::InvalidValue { what: "bool" }),
        }
    }
}

impl Encodable for char {
    const SHAPE: Shape = Shape::Scalar;

    #[inline(always)]
    fn encoded_len(&self) -> usize {
        4
    }

    #[inline(always)]
    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        codec.put_scalar(writer, *self as u32)
    }

    fn preview(&self, out: &mut String) {
        let _ = write!(out, "{:?}", self);
    }
}

impl Decodable for char {
    fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let raw: u32 = codec.take_scalar(reader)?;
        char::from_u32(raw).ok_or(CodecError::InvalidValue { what: "char" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ByteOrder, CodecConfig, FloatOrder};

    #[repr(C)]
    #[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
    struct Telemetry {
        s32: i32,
        value: f32,
        s16: i16,
        code: u16,
    }

    crate::impl_scalar!(Telemetry);

    #[test]
    fn test_pod_struct_roundtrip() {
        let value = Telemetry {
            s32: -7,
            value: 3.5,
            s16: 12,
            code: 0xBEEF,
        };
        for codec in [Codec::LITTLE, Codec::BIG] {
            let bytes = codec.encode_to_vec(&value).unwrap();
            assert_eq!(bytes.len(), std::mem::size_of::<Telemetry>());
            assert_eq!(codec.decode::<Telemetry>(&bytes).unwrap(), (value, 12));
        }
    }

    #[test]
    fn test_pod_struct_reversed_whole_under_big_endian() {
        let value = Telemetry {
            s32: 1,
            value: 0.0,
            s16: 0,
            code: 0,
        };
        let little = Codec::LITTLE.encode_to_vec(&value).unwrap();
        let mut big = Codec::BIG.encode_to_vec(&value).unwrap();
        big.reverse();
        assert_eq!(little, big);
    }

    #[test]
    fn test_signed_and_wide_integers() {
        let codec = Codec::BIG;
        let bytes = codec.encode_to_vec(&(-2i16, u128::MAX - 1)).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
        assert_eq!(bytes.len(), 18);
        let (value, _) = codec.decode::<(i16, u128)>(&bytes).unwrap();
        assert_eq!(value, (-2, u128::MAX - 1));
    }

    #[test]
    fn test_bool_validation() {
        let codec = Codec::LITTLE;
        assert_eq!(codec.encode_to_vec(&true).unwrap(), vec![1]);
        assert_eq!(codec.decode::<bool>(&[0]).unwrap(), (false, 1));
        assert_eq!(
            codec.decode::<bool>(&[2]),
            Err(CodecError::InvalidValue { what: "bool" })
        );
    }

    #[test]
    fn test_char_validation() {
        let codec = Codec::new(CodecConfig::new(ByteOrder::Big).with_float_order(FloatOrder::Configured));
        let bytes = codec.encode_to_vec(&'λ').unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0x03, 0xBB]);
        assert_eq!(codec.decode::<char>(&bytes).unwrap(), ('λ', 4));

        // Surrogate code point
        assert_eq!(
            codec.decode::<char>(&[0x00, 0x00, 0xD8, 0x00]),
            Err(CodecError::InvalidValue { what: "char" })
        );
    }

    #[test]
    fn test_scalar_preview() {
        assert_eq!(crate::preview(&42u16), "42");
        assert_eq!(crate::preview(&-1.5f32), "-1.5");
        assert_eq!(crate::preview(&'x'), "'x'");
        assert!(crate::preview(&Telemetry {
            s32: 0,
            value: 0.0,
            s16: 0,
            code: 0
        })
        .ends_with("Telemetry"));
    }
}
