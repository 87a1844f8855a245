//! Owned C-string shape.
//!
//! On the wire a C string is a `u32` length followed by the raw bytes; the
//! terminating NUL is never sent. Decoding rebuilds the terminator and hands the
//! new allocation to the destination, dropping whatever it held before.

use std::ffi::{CStr, CString};

use super::cursor::{ByteReader, ByteWriter};
use super::order::{Codec, LEN_PREFIX_SIZE};
use super::shape::{Decodable, Encodable, Shape};
use crate::error::{CodecError, CodecResult};

impl Encodable for CStr {
    const SHAPE: Shape = Shape::CString;

    #[inline(always)]
    fn encoded_len(&self) -> usize {
        LEN_PREFIX_SIZE + self.to_bytes().len()
    }

    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        let bytes = self.to_bytes();
        codec.put_len(writer, bytes.len())?;
        writer.put_bytes(bytes)
    }

    fn preview(&self, out: &mut String) {
        out.push_str(&self.to_string_lossy());
    }
}

impl Encodable for CString {
    const SHAPE: Shape = Shape::CString;

    #[inline(always)]
    fn encoded_len(&self) -> usize {
        self.as_c_str().encoded_len()
    }

    #[inline(always)]
    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        self.as_c_str().encode_to(codec, writer)
    }

    fn preview(&self, out: &mut String) {
        self.as_c_str().preview(out)
    }
}

impl Decodable for CString {
    fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let len = codec.take_len(reader)?;
        let bytes = reader.take(len)?;
        CString::new(bytes).map_err(|_| CodecError::InvalidValue {
            what: "c string (interior nul)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_omits_terminator() {
        let value = CString::new("hi").unwrap();
        let codec = Codec::LITTLE;
        assert_eq!(codec.size_of(&value), 6);
        assert_eq!(
            codec.encode_to_vec(&value).unwrap(),
            vec![0x02, 0x00, 0x00, 0x00, b'h', b'i']
        );
    }

    #[test]
    fn test_decode_restores_terminator() {
        let codec = Codec::BIG;
        let source = CStr::from_bytes_with_nul(b"serdes\0").unwrap();
        let bytes = codec.encode_to_vec(source).unwrap();
        let (value, read) = codec.decode::<CString>(&bytes).unwrap();
        assert_eq!(read, 10);
        assert_eq!(value.as_bytes_with_nul(), b"serdes\0");
    }

    #[test]
    fn test_decode_replaces_previous_storage() {
        let codec = Codec::LITTLE;
        let bytes = codec.encode_to_vec(&CString::new("new").unwrap()).unwrap();

        let mut target = CString::new("a much longer previous value").unwrap();
        assert_eq!(codec.decode_into(&bytes, &mut target).unwrap(), 7);
        assert_eq!(target.to_str().unwrap(), "new");
    }

    #[test]
    fn test_empty_c_string() {
        let codec = Codec::LITTLE;
        let bytes = codec.encode_to_vec(&CString::default()).unwrap();
        assert_eq!(bytes, vec![0; 4]);
        let (value, _) = codec.decode::<CString>(&bytes).unwrap();
        assert_eq!(value.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn test_interior_nul_rejected() {
        let bytes = [0x03, 0x00, 0x00, 0x00, b'a', 0x00, b'b'];
        assert!(matches!(
            Codec::LITTLE.decode::<CString>(&bytes),
            Err(CodecError::InvalidValue { .. })
        ));
    }
}
