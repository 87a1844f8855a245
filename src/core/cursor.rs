//! Bounds-checked cursors over caller-owned buffers.

use crate::error::{CodecError, CodecResult};

/// Write cursor over a caller-supplied byte slice.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buffer: &'a mut [u8],
    write_pos: usize,
}

impl<'a> ByteWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            write_pos: 0,
        }
    }

    /// Bytes written so far.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.write_pos
    }

    /// Space left in the buffer.
    #[inline(always)]
    pub fn available(&self) -> usize {
        self.buffer.len() - self.write_pos
    }

    /// Reserve `len` bytes and return them for the caller to fill.
    #[inline(always)]
    pub fn reserve(&mut self, len: usize) -> CodecResult<&mut [u8]> {
        if len > self.available() {
            return Err(CodecError::BufferTooSmall {
                needed: self.write_pos + len,
                available: self.buffer.len(),
            });
        }
        let start = self.write_pos;
        self.write_pos += len;
        Ok(&mut self.buffer[start..self.write_pos])
    }

    /// Copy raw bytes into the buffer.
    #[inline(always)]
    pub fn put_bytes(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }
}

/// Read cursor over an encoded byte slice.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    read_pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            read_pos: 0,
        }
    }

    /// Bytes consumed so far.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.read_pos
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.read_pos)
    }

    /// Take exactly `len` bytes.
    #[inline(always)]
    pub fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::UnexpectedEnd {
                needed: self.read_pos + len,
                available: self.buffer.len(),
            });
        }
        let start = self.read_pos;
        self.read_pos += len;
        Ok(&self.buffer[start..self.read_pos])
    }

    /// Fails with `TrailingBytes` unless every byte was consumed.
    pub fn finish(&self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(CodecError::TrailingBytes {
                consumed: self.read_pos,
                remaining,
            }),
        }
    }
}

impl<'a> From<&'a [u8]> for ByteReader<'a> {
    fn from(buffer: &'a [u8]) -> Self {
        ByteReader::new(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_rejects_overflow() {
        let mut buf = [0u8; 4];
        let mut writer = ByteWriter::new(&mut buf);

        writer.put_bytes(&[1, 2, 3]).unwrap();
        assert_eq!(writer.position(), 3);
        assert_eq!(
            writer.put_bytes(&[4, 5]),
            Err(CodecError::BufferTooSmall {
                needed: 5,
                available: 4
            })
        );
        // Failed write leaves the cursor where it was
        assert_eq!(writer.available(), 1);
        assert_eq!(buf, [1, 2, 3, 0]);
    }

    #[test]
    fn test_reader_take_and_finish() {
        let data = [9u8, 8, 7];
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.take(2).unwrap(), &[9, 8]);
        assert_eq!(
            reader.finish(),
            Err(CodecError::TrailingBytes {
                consumed: 2,
                remaining: 1
            })
        );
        assert_eq!(
            reader.take(2),
            Err(CodecError::UnexpectedEnd {
                needed: 4,
                available: 3
            })
        );
        assert_eq!(reader.take(1).unwrap(), &[7]);
        assert!(reader.finish().is_ok());
    }
}
