//! Length Header Formats
//!
//! A frame starts with one 32-bit word carrying the payload length and a
//! checksum over that length, written in the codec's byte order. Two
//! incompatible layouts exist; each is its own protocol version.
//!
//! Protocol v1, [`MarkedHeader`]:
//! ┌──────────────┬────────────────┬───────────────┐
//! │ marker (8)   │ length (18)    │ checksum (6)  │
//! └──────────────┴────────────────┴───────────────┘
//!   bits 0..8      bits 8..26       bits 26..32
//!
//! Protocol v2, [`CompactHeader`] (default):
//! ┌─────────────────────────┬───────────────┐
//! │ length (24)             │ checksum (8)  │
//! └─────────────────────────┴───────────────┘
//!   bits 0..24                bits 24..32
//!
//! The checksum sums three overlapping lanes of the length, each shifted by
//! `CHECKSUM_BITS`, and masks the result. It catches corruption, not tampering.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::core::Codec;
use crate::error::{FrameError, FrameResult};

/// Start-of-frame marker carried by protocol v1 headers.
pub const START_OF_FRAME: u8 = 0x77;

/// Fixed-size header word shared by every protocol version.
pub const HEADER_SIZE: usize = 4;

#[inline(always)]
const fn lane_sum(length: u32, lane_bits: u32) -> u32 {
    length
        .wrapping_add(length >> lane_bits)
        .wrapping_add(length >> (lane_bits * 2))
}

/// Bit layout of a length/checksum header.
pub trait HeaderFormat: crate::Decodable + Copy + fmt::Debug {
    const PROTOCOL_VERSION: u8;
    const LENGTH_BITS: u32;
    const CHECKSUM_BITS: u32;
    const MAX_PACKET_SIZE: u32 = (1 << Self::LENGTH_BITS) - 1;
    const CHECKSUM_MASK: u32 = (1 << Self::CHECKSUM_BITS) - 1;

    /// Header for a payload of `length` bytes.
    fn new(length: usize) -> FrameResult<Self>;

    fn from_word(word: u32) -> Self;

    fn word(&self) -> u32;

    fn length(&self) -> u32;

    fn checksum(&self) -> u32;

    fn cal_checksum(length: u32) -> u32;

    /// Whether the stored checksum matches the one recomputed from the length.
    fn check(&self) -> bool {
        self.checksum() == Self::cal_checksum(self.length())
    }

    /// Like [`check`](Self::check), but says what is wrong.
    fn validate(&self) -> FrameResult<()> {
        if self.check() {
            Ok(())
        } else {
            Err(FrameError::ChecksumMismatch {
                stored: self.checksum(),
                computed: Self::cal_checksum(self.length()),
            })
        }
    }

    /// Read a header word from the start of `bytes`. The checksum is not verified.
    fn parse(codec: &Codec, bytes: &[u8]) -> FrameResult<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(FrameError::Truncated {
                needed: HEADER_SIZE,
                available: bytes.len(),
            });
        }
        Ok(Self::from_word(codec.read_scalar::<u32>(bytes)?))
    }
}

#[inline(always)]
fn ensure_fits<H: HeaderFormat>(length: usize) -> FrameResult<u32> {
    match u32::try_from(length) {
        Ok(len) if len <= H::MAX_PACKET_SIZE => Ok(len),
        _ => Err(FrameError::PayloadTooLarge {
            len: length,
            max: H::MAX_PACKET_SIZE,
        }),
    }
}

/// Protocol v1 header: start marker, 18-bit length, 6-bit checksum.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct MarkedHeader {
    word: u32,
}

impl MarkedHeader {
    const MARKER_BITS: u32 = 8;

    #[inline(always)]
    pub fn marker(&self) -> u8 {
        (self.word & 0xff) as u8
    }
}

impl HeaderFormat for MarkedHeader {
    const PROTOCOL_VERSION: u8 = 1;
    const LENGTH_BITS: u32 = 18;
    const CHECKSUM_BITS: u32 = 6;

    fn new(length: usize) -> FrameResult<Self> {
        let length = ensure_fits::<Self>(length)?;
        Ok(Self {
            word: START_OF_FRAME as u32
                | (length << Self::MARKER_BITS)
                | (Self::cal_checksum(length) << (Self::MARKER_BITS + Self::LENGTH_BITS)),
        })
    }

    #[inline(always)]
    fn from_word(word: u32) -> Self {
        Self { word }
    }

    #[inline(always)]
    fn word(&self) -> u32 {
        self.word
    }

    #[inline(always)]
    fn length(&self) -> u32 {
        (self.word >> Self::MARKER_BITS) & Self::MAX_PACKET_SIZE
    }

    #[inline(always)]
    fn checksum(&self) -> u32 {
        self.word >> (Self::MARKER_BITS + Self::LENGTH_BITS)
    }

    /// The marker takes part in the sum.
    #[inline(always)]
    fn cal_checksum(length: u32) -> u32 {
        (START_OF_FRAME as u32).wrapping_add(lane_sum(length, Self::CHECKSUM_BITS))
            & Self::CHECKSUM_MASK
    }

    fn check(&self) -> bool {
        self.marker() == START_OF_FRAME && self.checksum() == Self::cal_checksum(self.length())
    }

    fn validate(&self) -> FrameResult<()> {
        if self.marker() != START_OF_FRAME {
            return Err(FrameError::InvalidMarker {
                found: self.marker(),
            });
        }
        if self.checksum() != Self::cal_checksum(self.length()) {
            return Err(FrameError::ChecksumMismatch {
                stored: self.checksum(),
                computed: Self::cal_checksum(self.length()),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for MarkedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkedHeader")
            .field("marker", &self.marker())
            .field("length", &self.length())
            .field("checksum", &self.checksum())
            .finish()
    }
}

/// Protocol v2 header: 24-bit length, 8-bit checksum.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct CompactHeader {
    word: u32,
}

impl HeaderFormat for CompactHeader {
    const PROTOCOL_VERSION: u8 = 2;
    const LENGTH_BITS: u32 = 24;
    const CHECKSUM_BITS: u32 = 8;

    fn new(length: usize) -> FrameResult<Self> {
        let length = ensure_fits::<Self>(length)?;
        Ok(Self {
            word: length | (Self::cal_checksum(length) << Self::LENGTH_BITS),
        })
    }

    #[inline(always)]
    fn from_word(word: u32) -> Self {
        Self { word }
    }

    #[inline(always)]
    fn word(&self) -> u32 {
        self.word
    }

    #[inline(always)]
    fn length(&self) -> u32 {
        self.word & Self::MAX_PACKET_SIZE
    }

    #[inline(always)]
    fn checksum(&self) -> u32 {
        self.word >> Self::LENGTH_BITS
    }

    #[inline(always)]
    fn cal_checksum(length: u32) -> u32 {
        lane_sum(length, Self::CHECKSUM_BITS) & Self::CHECKSUM_MASK
    }
}

impl fmt::Debug for CompactHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactHeader")
            .field("length", &self.length())
            .field("checksum", &self.checksum())
            .finish()
    }
}

// Both headers travel as a single scalar word.
crate::impl_scalar!(MarkedHeader, CompactHeader);
