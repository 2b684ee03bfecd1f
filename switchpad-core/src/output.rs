//! Report sink trait and error types.

use core::future::Future;

use crate::report::SwitchReport;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Host went away mid-transfer.
    Disconnected,
}

/// Async trait for report sinks.
///
/// This trait abstracts the destination for reports, so the bridge can be
/// tested without a USB stack.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportSink {
    /// Send one report.
    ///
    /// Completes once the host has polled for it.
    fn send(&mut self, report: &SwitchReport) -> impl Future<Output = Result<(), OutputError>>;
}
