//! Line framing for the serial byte stream.
//!
//! Bytes are accumulated until `\n`. `\r` is skipped. Once the buffer is full
//! further bytes are dropped until the terminator arrives, and the truncated
//! line is still handed over.

use heapless::Vec;

/// Maximum number of payload bytes kept per line (terminator excluded).
pub const MAX_LINE_LENGTH: usize = 64;

/// Line terminator.
pub const LINE_FEED: u8 = b'\n';

/// Ignored anywhere in the stream.
pub const CARRIAGE_RETURN: u8 = b'\r';

/// A complete, terminator-stripped line.
pub type Line = Vec<u8, MAX_LINE_LENGTH>;

/// Byte-at-a-time line accumulator.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Line,
    /// Bytes dropped from the line currently being accumulated.
    overflow: usize,
}

impl LineFramer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflow: 0,
        }
    }

    /// Feed one byte.
    ///
    /// Returns the finished line when `byte` is the terminator, leaving the
    /// framer empty for the next one.
    pub fn push_byte(&mut self, byte: u8) -> Option<Line> {
        match byte {
            LINE_FEED => {
                if self.overflow > 0 {
                    warn!("line truncated, {} bytes dropped", self.overflow);
                }
                self.overflow = 0;
                Some(core::mem::take(&mut self.buffer))
            }
            CARRIAGE_RETURN => None,
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.overflow = self.overflow.saturating_add(1);
                }
                None
            }
        }
    }

    /// Bytes dropped so far from the line in progress.
    #[inline]
    #[must_use]
    pub fn overflow(&self) -> usize {
        self.overflow
    }
}
