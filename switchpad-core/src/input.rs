//! Byte source trait and error types.

use core::future::Future;

/// Error type for serial input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// UART/communication I/O error.
    Io,
    /// Receive FIFO overrun, bytes were lost by the hardware.
    Overrun,
    /// UART framing error.
    Framing,
    /// Line break detected.
    Break,
}

/// Async trait for serial byte sources.
///
/// Abstracts the UART so the link can be driven by any peripheral, or by a
/// mock in tests.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ByteSource {
    /// Wait for the next received byte.
    ///
    /// Bytes must be yielded in arrival order.
    fn read_byte(&mut self) -> impl Future<Output = Result<u8, InputError>>;
}
