//! UART to USB Switch pad adapter for RP2040.
//!
//! This crate provides the embedded shell around [`switchpad_core`]: it feeds
//! UART bytes into the serial link and serves synthesized reports as a USB
//! HID gamepad that the Nintendo Switch recognises as a Pokken pad.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 TX | 8    | Serial transmit (unused) |
//! | UART1 RX | 9    | Serial receive, 9600 8N1 |
//!
//! # Architecture
//!
//! Two Embassy executors share one lock-free [`ControllerState`]:
//!
//! - **Interrupt executor** (high priority): the serial link task. Every
//!   received byte preempts thread mode, runs the framer and decoder, and
//!   writes the store.
//! - **Thread executor**: the USB device task, the report task (synthesize
//!   and send on every IN poll), the host report drain, and a periodic
//!   diagnostics log.
//!
//! # Modules
//!
//! - [`uart_input`]: UART byte source ([`UartByteSource`])
//! - [`usb_output`]: USB HID output ([`UsbHidOutput`], [`PadRequestHandler`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`switchpad_core`] that the
//! binary needs, so consumers only need to depend on this crate.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they select conflicting panic handlers");

// Re-export core types for convenience
pub use switchpad_core::{
    synthesize, ByteSource, ControllerState, InputError, LinkStats, LinkStatsSnapshot,
    OutputError, ReportBridge, ReportSink, SerialLink, SwitchReport,
};

pub mod uart_input;
pub mod usb_output;

pub use uart_input::{UartByteSource, UART_BAUDRATE};
pub use usb_output::{configure_usb_hid, PadReader, PadRequestHandler, PadWriter, UsbHidOutput};
