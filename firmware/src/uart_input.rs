//! UART byte source feeding the serial link.
//!
//! # Pins
//!
//! Uses UART1 by default:
//! - GPIO 8: TX (unused, the link is receive-only)
//! - GPIO 9: RX

use embassy_rp::uart::{Async, Error as UartError, UartRx};
use switchpad_core::{ByteSource, InputError};

/// Serial line rate of the controller link.
pub const UART_BAUDRATE: u32 = 9_600;

/// Convert UART errors to [`InputError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both `UartError` and `InputError` are defined in external crates).
#[inline]
fn uart_error_to_input_error(e: UartError) -> InputError {
    match e {
        UartError::Framing => InputError::Framing,
        UartError::Overrun => InputError::Overrun,
        UartError::Break => InputError::Break,
        _ => InputError::Io,
    }
}

/// Single-byte reader over an async UART receiver.
pub struct UartByteSource<'d> {
    rx: UartRx<'d, Async>,
}

impl<'d> UartByteSource<'d> {
    /// Create a new byte source from the given UART receiver.
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self { rx }
    }
}

impl ByteSource for UartByteSource<'_> {
    async fn read_byte(&mut self) -> Result<u8, InputError> {
        let mut byte = [0u8; 1];
        self.rx
            .read(&mut byte)
            .await
            .map_err(uart_error_to_input_error)?;
        Ok(byte[0])
    }
}
