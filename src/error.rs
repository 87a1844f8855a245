//! Error types for encoding, decoding and framing.

/// Errors raised by the codec engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Unexpected end of input: need {needed} bytes, have {available}")]
    UnexpectedEnd { needed: usize, available: usize },

    #[error("Length {len} does not fit in a u32 prefix")]
    LengthOverflow { len: usize },

    #[error("Invalid {what} value")]
    InvalidValue { what: &'static str },

    #[error("{remaining} trailing bytes after decoding {consumed} bytes")]
    TrailingBytes { consumed: usize, remaining: usize },
}

/// Errors raised while building or parsing command frames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("Payload of {len} bytes exceeds max packet size {max}")]
    PayloadTooLarge { len: usize, max: u32 },

    #[error("Header checksum mismatch: stored 0x{stored:02x}, computed 0x{computed:02x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("Invalid start-of-frame marker: 0x{found:02x}")]
    InvalidMarker { found: u8 },

    #[error("Truncated frame: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

pub type CodecResult<T> = Result<T, CodecError>;
pub type FrameResult<T> = Result<T, FrameError>;
