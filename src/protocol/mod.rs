//! Protocol Layer: framed commands over the codec
//!
//! Layout:
//! ┌─────────────────────────────────────────────────────┐
//! │ Header (4 bytes: length + checksum)                 │
//! ├──────────────────────────┬──────────────────────────┤
//! │ class_id (u16)           │ func_id (u16)            │
//! ├──────────────────────────┴──────────────────────────┤
//! │ Arguments (header.length bytes)                     │
//! └─────────────────────────────────────────────────────┘
//!
//! Design principles:
//! - One allocation per command: the buffer is sized before anything is written
//! - Header formats are versions: v1 and v2 never read each other's frames
//! - Frames borrow their payload from the input buffer

mod command;
mod frame;
mod header;

pub use command::{Command, CommandBuilder, IDS_SIZE, PREAMBLE_SIZE};
pub use frame::{Frame, FrameDecoder};
pub use header::{CompactHeader, HeaderFormat, MarkedHeader, HEADER_SIZE, START_OF_FRAME};
