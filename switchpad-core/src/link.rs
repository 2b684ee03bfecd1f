//! Serial link: framer, decoder and store wired together.
//!
//! This is everything that runs on the receive side. It never blocks except
//! to await the next byte, and never fails: malformed input is counted and
//! dropped.

use crate::framer::LineFramer;
use crate::input::{ByteSource, InputError};
use crate::packet::{decode, DecodeError, Packet};
use crate::state::{ControllerState, LinkStats};

/// Receive-side pipeline feeding a [`ControllerState`].
pub struct SerialLink<'a> {
    framer: LineFramer,
    state: &'a ControllerState,
    stats: &'a LinkStats,
}

impl<'a> SerialLink<'a> {
    #[must_use]
    pub const fn new(state: &'a ControllerState, stats: &'a LinkStats) -> Self {
        Self {
            framer: LineFramer::new(),
            state,
            stats,
        }
    }

    /// Feed one received byte.
    ///
    /// When the byte completes a line, the line is decoded and applied to
    /// the store, and the outcome is returned for inspection. A discarded
    /// line leaves the store untouched.
    pub fn push_byte(&mut self, byte: u8) -> Option<Result<Packet, DecodeError>> {
        let dropped_before = self.framer.overflow();
        let line = self.framer.push_byte(byte);
        if self.framer.overflow() > dropped_before {
            self.stats.record_overflow(1);
        }

        let line = line?;
        let outcome = decode(&line);
        match outcome {
            Ok(packet) => {
                trace!("packet {:?}", packet);
                self.state.apply(packet);
                self.stats.record_decoded();
            }
            Err(e) => {
                debug!("line discarded: {:?}", e);
                self.stats.record_dropped();
            }
        }
        Some(outcome)
    }

    /// Feed a run of bytes in order.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            let _ = self.push_byte(byte);
        }
    }

    /// Read and process a single byte from `source`.
    pub async fn process_one<S: ByteSource>(&mut self, source: &mut S) -> Result<(), InputError> {
        let byte = source.read_byte().await?;
        let _ = self.push_byte(byte);
        Ok(())
    }

    /// Receive from `source` forever.
    ///
    /// Source errors are logged and reception continues with the line in
    /// progress intact.
    pub async fn run<S: ByteSource>(&mut self, source: &mut S) -> ! {
        loop {
            if let Err(e) = self.process_one(source).await {
                warn!("serial input error: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::packet::PacketTag;
    use crate::types::ControllerSnapshot;
    use crate::LinkStatsSnapshot;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use std::collections::VecDeque;
    use std::vec;

    struct MockSource {
        bytes: VecDeque<Result<u8, InputError>>,
    }

    impl ByteSource for MockSource {
        fn read_byte(&mut self) -> impl Future<Output = Result<u8, InputError>> {
            core::future::ready(self.bytes.pop_front().unwrap_or(Err(InputError::Io)))
        }
    }

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => result,
            Poll::Pending => panic!("Mock future returned Pending unexpectedly"),
        }
    }

    #[test]
    fn test_push_byte_applies_packet() {
        let state = ControllerState::new();
        let stats = LinkStats::new();
        let mut link = SerialLink::new(&state, &stats);

        assert_eq!(link.push_byte(241), None);
        assert_eq!(link.push_byte(200), None);
        assert_eq!(link.push_byte(b'\n'), Some(Ok(Packet::AnalogPrimary(200))));
        assert_eq!(state.snapshot().axis, 200);
    }

    #[test]
    fn test_discarded_lines_are_counted() {
        let state = ControllerState::new();
        let stats = LinkStats::new();
        let mut link = SerialLink::new(&state, &stats);

        link.push_bytes(&[b'\n', 99, 1, b'\n', 242, 1, b'\n', 241, 5, b'\n']);

        assert_eq!(state.snapshot(), ControllerSnapshot::new(5, 0, 0));
        assert_eq!(
            stats.snapshot(),
            LinkStatsSnapshot {
                lines_decoded: 1,
                lines_dropped: 3,
                bytes_overflowed: 0,
            }
        );
    }

    #[test]
    fn test_truncated_outcome_returned() {
        let state = ControllerState::new();
        let stats = LinkStats::new();
        let mut link = SerialLink::new(&state, &stats);

        link.push_bytes(&[242, 16]);
        assert_eq!(
            link.push_byte(b'\n'),
            Some(Err(DecodeError::Truncated {
                tag: PacketTag::Digital,
                len: 2
            }))
        );
        assert_eq!(state.snapshot(), ControllerSnapshot::NEUTRAL);
    }

    #[test]
    fn test_overflow_counted_and_prefix_decoded() {
        let state = ControllerState::new();
        let stats = LinkStats::new();
        let mut link = SerialLink::new(&state, &stats);

        let mut line = vec![241u8, 77];
        line.resize(crate::MAX_LINE_LENGTH + 10, 0);
        link.push_bytes(&line);
        link.push_byte(b'\n');

        assert_eq!(state.snapshot().axis, 77);
        assert_eq!(stats.snapshot().bytes_overflowed, 10);
        assert_eq!(stats.snapshot().lines_decoded, 1);
    }

    #[test]
    fn test_process_one_reads_source() {
        let state = ControllerState::new();
        let stats = LinkStats::new();
        let mut link = SerialLink::new(&state, &stats);
        let mut source = MockSource {
            bytes: [Ok(241), Err(InputError::Framing), Ok(64), Ok(b'\n')]
                .into_iter()
                .collect(),
        };

        assert_eq!(block_on(link.process_one(&mut source)), Ok(()));
        assert_eq!(
            block_on(link.process_one(&mut source)),
            Err(InputError::Framing)
        );
        assert_eq!(block_on(link.process_one(&mut source)), Ok(()));
        assert_eq!(block_on(link.process_one(&mut source)), Ok(()));

        // The error between bytes did not break the line
        assert_eq!(state.snapshot().axis, 64);
    }
}
