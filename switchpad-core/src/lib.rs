//! Platform-agnostic serial decoding and Switch pad report synthesis.
//!
//! This crate provides the core of the UART-to-Switch-pad adapter without
//! any platform-specific dependencies. It can be used both in embedded
//! `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules, leaves first:
//!
//! - [`framer`]: Line accumulation ([`LineFramer`])
//! - [`packet`]: Tagged packet decoding ([`decode`], [`Packet`], [`PacketTag`])
//! - [`state`]: Shared atomic store ([`ControllerState`], [`LinkStats`])
//! - [`report`]: Report synthesis ([`synthesize`], [`SwitchReport`])
//! - [`link`]: Receive-side pipeline ([`SerialLink`])
//! - [`bridge`]: Send-side loop ([`ReportBridge`])
//! - [`input`] / [`output`]: Transport traits ([`ByteSource`], [`ReportSink`])
//!
//! # Protocol
//!
//! One binary packet per `\n`-terminated line, `\r` ignored:
//!
//! ```text
//! 241 <axis>            primary analog axis
//! 240 <axis>            secondary analog axis (ignored)
//! 242 <first> <second>  digital button groups (3 = no signal)
//! ```
//!
//! Anything else is dropped without touching the state.
//!
//! # Example
//!
//! ```rust
//! use switchpad_core::{synthesize, Buttons, ControllerState, Hat, LinkStats, SerialLink};
//!
//! let state = ControllerState::new();
//! let stats = LinkStats::new();
//! let mut link = SerialLink::new(&state, &stats);
//!
//! link.push_bytes(&[241, 200, b'\n']);
//! link.push_bytes(&[242, 0b0000_1000, 0b0000_0100, b'\r', b'\n']);
//!
//! let report = synthesize(&state.snapshot());
//! assert_eq!(report.left_stick_x, 200);
//! assert_eq!(report.buttons, Buttons::START | Buttons::L);
//! assert_eq!(report.hat, Hat::Center);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`log`**: Route internal logging to the `log` facade instead
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod bridge;
pub mod framer;
pub mod input;
pub mod link;
pub mod output;
pub mod packet;
pub mod report;
pub mod state;
pub mod types;

// Re-export main types at crate root
pub use bridge::ReportBridge;
pub use framer::{Line, LineFramer, MAX_LINE_LENGTH};
pub use input::{ByteSource, InputError};
pub use link::SerialLink;
pub use output::{OutputError, ReportSink};
pub use packet::{decode, DecodeError, Packet, PacketTag, NO_SIGNAL};
pub use report::{synthesize, SwitchReport};
pub use state::{ControllerState, LinkStats, LinkStatsSnapshot};
pub use types::{Buttons, ControllerSnapshot, Hat, STICK_CENTER};
