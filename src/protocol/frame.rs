//! Frame decoding
//!
//! Reads command frames written by [`CommandBuilder`](super::CommandBuilder)
//! without copying: the payload stays a slice of the input buffer until the
//! caller decodes it into typed arguments.

use std::marker::PhantomData;

use super::command::{Command, PREAMBLE_SIZE};
use super::header::{CompactHeader, HeaderFormat, HEADER_SIZE};
use crate::core::{ByteReader, Codec, Decodable};
use crate::error::{FrameError, FrameResult};

/// One parsed command frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a, H: HeaderFormat = CompactHeader> {
    pub header: H,
    pub class_id: u16,
    pub func_id: u16,
    pub payload: &'a [u8],
    codec: Codec,
}

impl<'a, H: HeaderFormat> Frame<'a, H> {
    /// Parse the frame at the start of `buffer`, returning it with its total size.
    ///
    /// The header checksum is verified before the payload length is trusted.
    pub fn parse(codec: &Codec, buffer: &'a [u8]) -> FrameResult<(Self, usize)> {
        let header = H::parse(codec, buffer)?;
        if let Err(err) = header.validate() {
            tracing::debug!(?header, %err, "rejected frame header");
            return Err(err);
        }

        let mut reader = ByteReader::new(&buffer[HEADER_SIZE..]);
        let (class_id, func_id) = match <(u16, u16)>::decode_from(codec, &mut reader) {
            Ok(ids) => ids,
            Err(_) => {
                return Err(FrameError::Truncated {
                    needed: PREAMBLE_SIZE,
                    available: buffer.len(),
                })
            }
        };

        let start = PREAMBLE_SIZE;
        let total = start + header.length() as usize;
        let Some(payload) = buffer.get(start..total) else {
            return Err(FrameError::Truncated {
                needed: total,
                available: buffer.len(),
            });
        };

        tracing::trace!(class_id, func_id, payload_len = payload.len(), "parsed frame");
        Ok((
            Self {
                header,
                class_id,
                func_id,
                payload,
                codec: *codec,
            },
            total,
        ))
    }

    /// Bytes this frame occupies in the input buffer.
    #[inline(always)]
    pub fn total_size(&self) -> usize {
        PREAMBLE_SIZE + self.payload.len()
    }

    /// Decode the payload as `A`. The payload must be consumed exactly.
    pub fn decode_args<A: Decodable>(&self) -> FrameResult<A> {
        Ok(self.codec.decode_exact(self.payload)?)
    }

    /// Whether this frame carries command `C`.
    #[inline(always)]
    pub fn is<C: Command>(&self) -> bool {
        self.class_id == C::CLASS_ID && self.func_id == C::FUNC_ID
    }
}

/// Iterates over consecutive frames in one buffer.
///
/// Iteration stops after the first error; a trailing partial frame yields
/// [`FrameError::Truncated`].
pub struct FrameDecoder<'a, H: HeaderFormat = CompactHeader> {
    codec: Codec,
    buffer: &'a [u8],
    read_pos: usize,
    failed: bool,
    _format: PhantomData<H>,
}

impl<'a, H: HeaderFormat> FrameDecoder<'a, H> {
    #[inline(always)]
    pub fn new(codec: Codec, buffer: &'a [u8]) -> Self {
        Self {
            codec,
            buffer,
            read_pos: 0,
            failed: false,
            _format: PhantomData,
        }
    }

    /// Remaining bytes
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.read_pos)
    }
}

impl<'a, H: HeaderFormat> Iterator for FrameDecoder<'a, H> {
    type Item = FrameResult<Frame<'a, H>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining() == 0 {
            return None;
        }

        let buffer: &'a [u8] = self.buffer;
        match Frame::parse(&self.codec, &buffer[self.read_pos..]) {
            Ok((frame, size)) => {
                self.read_pos += size;
                Some(Ok(frame))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::command::CommandBuilder;
    use crate::protocol::header::MarkedHeader;

    struct Publish;

    impl Command for Publish {
        const CLASS_ID: u16 = 1;
        const FUNC_ID: u16 = 1;
        type Args = (u64, String);
    }

    #[test]
    fn test_encode_decode_single() {
        let builder: CommandBuilder = CommandBuilder::new(Codec::LITTLE);
        let bytes = builder
            .build_typed::<Publish>(&(1, String::from("Hello, wire!")))
            .unwrap();

        let (frame, size) = Frame::<CompactHeader>::parse(builder.codec(), &bytes).unwrap();
        assert_eq!(size, bytes.len());
        assert_eq!(frame.total_size(), size);
        assert!(frame.is::<Publish>());

        let (sequence, text) = frame.decode_args::<(u64, String)>().unwrap();
        assert_eq!(sequence, 1);
        assert_eq!(text, "Hello, wire!");
    }

    #[test]
    fn test_decode_multiple_frames() {
        let builder: CommandBuilder<MarkedHeader> = CommandBuilder::new(Codec::BIG);
        let mut stream = Vec::new();
        for (func_id, text) in [(1u16, "Message 1"), (2, "Message 2"), (3, "Message 3")] {
            stream.extend(builder.build(5, func_id, &(text,)).unwrap());
        }

        let frames: Vec<_> = FrameDecoder::<MarkedHeader>::new(Codec::BIG, &stream)
            .collect::<FrameResult<_>>()
            .unwrap();
        assert_eq!(frames.len(), 3);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.func_id, i as u16 + 1);
            let (text,) = frame.decode_args::<(String,)>().unwrap();
            assert_eq!(text, format!("Message {}", i + 1));
        }
    }

    #[test]
    fn test_builder_reuse() {
        let builder: CommandBuilder = CommandBuilder::default();
        let mut out = Vec::new();
        builder.build_into(&mut out, 1, 1, &String::from("First")).unwrap();
        builder.build_into(&mut out, 1, 2, &String::from("Second")).unwrap();

        let mut decoder = FrameDecoder::<CompactHeader>::new(Codec::default(), &out);
        let frame = decoder.next().unwrap().unwrap();
        assert_eq!(frame.func_id, 2);
        assert!(decoder.next().is_none());
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        let builder: CommandBuilder = CommandBuilder::new(Codec::LITTLE);
        let mut bytes = builder.build(2, 2, &(1u32, 2u32)).unwrap();
        bytes[3] ^= 0x01;
        assert!(matches!(
            Frame::<CompactHeader>::parse(builder.codec(), &bytes),
            Err(FrameError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_short_preamble() {
        let builder: CommandBuilder = CommandBuilder::new(Codec::LITTLE);
        let bytes = builder.build_empty(4, 4).unwrap();
        let cut = &bytes[..PREAMBLE_SIZE - 1];
        assert_eq!(
            Frame::<CompactHeader>::parse(builder.codec(), cut).unwrap_err(),
            FrameError::Truncated {
                needed: PREAMBLE_SIZE,
                available: PREAMBLE_SIZE - 1
            }
        );

        let (frame, size) = Frame::<CompactHeader>::parse(builder.codec(), &bytes).unwrap();
        assert_eq!(size, PREAMBLE_SIZE);
        assert_eq!(frame.total_size(), PREAMBLE_SIZE);
    }

    #[test]
    fn test_truncated_payload() {
        let builder: CommandBuilder = CommandBuilder::new(Codec::LITTLE);
        let bytes = builder.build(2, 2, &[0u8; 10]).unwrap();
        let cut = &bytes[..bytes.len() - 3];
        assert_eq!(
            Frame::<CompactHeader>::parse(builder.codec(), cut).unwrap_err(),
            FrameError::Truncated {
                needed: bytes.len(),
                available: cut.len()
            }
        );

        let mut decoder = FrameDecoder::<CompactHeader>::new(Codec::LITTLE, cut);
        assert!(decoder.next().unwrap().is_err());
        assert!(decoder.next().is_none());
    }

    #[test]
    fn test_trailing_payload_bytes_rejected() {
        let builder: CommandBuilder = CommandBuilder::new(Codec::LITTLE);
        let bytes = builder.build(3, 3, &(7u32, 8u32)).unwrap();
        let (frame, _) = Frame::<CompactHeader>::parse(builder.codec(), &bytes).unwrap();
        assert!(matches!(
            frame.decode_args::<u32>(),
            Err(FrameError::Codec(_))
        ));
    }
}
