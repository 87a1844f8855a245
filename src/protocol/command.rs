//! Command Builder
//!
//! Layout:
//! ┌──────────────┬──────────────┬──────────────┬────────────────────────┐
//! │ header (4)   │ class_id (2) │ func_id (2)  │ args (header.length)   │
//! └──────────────┴──────────────┴──────────────┴────────────────────────┘
//!
//! The header length counts only the argument bytes. Every field is written
//! through the builder's codec, so ids and the header word follow its byte order.

use std::marker::PhantomData;

use super::header::{CompactHeader, HeaderFormat, HEADER_SIZE};
use crate::core::{preview, Codec, Decodable, Encodable};
use crate::error::FrameResult;

/// Width of the `class_id` and `func_id` fields together.
pub const IDS_SIZE: usize = 2 * std::mem::size_of::<u16>();

/// Header word plus both identifiers; every frame starts with this many bytes.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + IDS_SIZE;

/// A command with fixed identifiers and a typed argument list.
pub trait Command {
    const CLASS_ID: u16;
    const FUNC_ID: u16;
    type Args: Decodable;
}

/// Builds framed command buffers with header format `H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandBuilder<H: HeaderFormat = CompactHeader> {
    codec: Codec,
    _format: PhantomData<H>,
}

impl<H: HeaderFormat> CommandBuilder<H> {
    pub const fn new(codec: Codec) -> Self {
        Self {
            codec,
            _format: PhantomData,
        }
    }

    #[inline(always)]
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Encode a command into `out`, replacing its contents.
    ///
    /// `out` is resized once to the final frame size. On error it is left empty.
    pub fn build_into<A: Encodable + ?Sized>(
        &self,
        out: &mut Vec<u8>,
        class_id: u16,
        func_id: u16,
        args: &A,
    ) -> FrameResult<usize> {
        out.clear();
        let payload_len = self.codec.size_of(args);
        let header = H::new(payload_len)?;

        out.resize(PREAMBLE_SIZE + payload_len, 0);
        let written = match self
            .codec
            .encode(out, &(header, class_id, func_id, args))
        {
            Ok(written) => written,
            Err(err) => {
                out.clear();
                return Err(err.into());
            }
        };

        tracing::trace!(
            class_id,
            func_id,
            payload_len,
            args = %preview(args),
            "built command"
        );
        Ok(written)
    }

    /// Encode a command into a new buffer.
    pub fn build<A: Encodable + ?Sized>(
        &self,
        class_id: u16,
        func_id: u16,
        args: &A,
    ) -> FrameResult<Vec<u8>> {
        let mut out = Vec::new();
        self.build_into(&mut out, class_id, func_id, args)?;
        Ok(out)
    }

    /// A command with no arguments: header with length 0 and both ids.
    pub fn build_empty(&self, class_id: u16, func_id: u16) -> FrameResult<Vec<u8>> {
        self.build(class_id, func_id, &())
    }

    /// Encode a command whose ids come from its [`Command`] impl.
    pub fn build_typed<C: Command>(&self, args: &C::Args) -> FrameResult<Vec<u8>> {
        self.build(C::CLASS_ID, C::FUNC_ID, args)
    }
}

impl<H: HeaderFormat> Default for CommandBuilder<H> {
    fn default() -> Self {
        Self::new(Codec::default())
    }
}

/// Build a command from a list of arguments.
///
/// The arguments are borrowed into one tuple, so passing `a, b` produces the
/// same bytes as passing a pre-built `(a, b)`.
///
/// ```
/// use wirepack::{build_command, CommandBuilder, Codec};
///
/// let builder: CommandBuilder = CommandBuilder::new(Codec::LITTLE);
/// let splat = build_command!(builder, 1, 2, 10u32, String::from("x")).unwrap();
/// let tuple = builder.build(1, 2, &(10u32, String::from("x"))).unwrap();
/// assert_eq!(splat, tuple);
///
/// let empty = build_command!(builder, 7, 3).unwrap();
/// assert_eq!(empty.len(), 8);
/// ```
#[macro_export]
macro_rules! build_command {
    ($builder:expr, $class_id:expr, $func_id:expr $(,)?) => {
        $builder.build_empty($class_id, $func_id)
    };
    ($builder:expr, $class_id:expr, $func_id:expr, $($arg:expr),+ $(,)?) => {
        $builder.build($class_id, $func_id, &($(&$arg,)+))
    };
}
