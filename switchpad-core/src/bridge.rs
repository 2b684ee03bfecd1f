//! ReportBridge: serves synthesized reports from the shared state.

use crate::output::{OutputError, ReportSink};
use crate::report::{synthesize, SwitchReport};
use crate::state::ControllerState;

/// Pulls the latest snapshot and hands a fresh report to the sink, once per
/// host poll.
///
/// The bridge owns no state of its own. Each report is synthesized from the
/// store at the moment it is sent, so a slow host always gets the newest
/// input rather than a queued one.
pub struct ReportBridge<'a, O> {
    state: &'a ControllerState,
    output: O,
}

impl<'a, O: ReportSink> ReportBridge<'a, O> {
    /// Create a new bridge reading from `state` and writing to `output`.
    pub fn new(state: &'a ControllerState, output: O) -> Self {
        Self { state, output }
    }

    /// Run the bridge, serving reports indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            if let Err(e) = self.process_one().await {
                warn!("report not delivered: {:?}", e);
            }
        }
    }

    /// Synthesize one report and send it.
    ///
    /// Returns the report that was sent.
    pub async fn process_one(&mut self) -> Result<SwitchReport, OutputError> {
        let report = synthesize(&self.state.snapshot());
        self.output.send(&report).await?;
        Ok(report)
    }

    /// Get a reference to the output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Decompose the bridge, returning the output sink.
    pub fn into_output(self) -> O {
        self.output
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::types::{Buttons, Hat};
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use std::vec::Vec;

    // Simple mock output sink
    struct MockOutput {
        sent: Vec<SwitchReport>,
        fail: bool,
    }

    impl MockOutput {
        fn new() -> Self {
            Self {
                sent: Vec::new(),
                fail: false,
            }
        }
    }

    impl ReportSink for MockOutput {
        fn send(&mut self, report: &SwitchReport) -> impl Future<Output = Result<(), OutputError>> {
            let result = if self.fail {
                Err(OutputError::Disconnected)
            } else {
                self.sent.push(*report);
                Ok(())
            };
            core::future::ready(result)
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

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {
                    panic!("Mock future returned Pending unexpectedly");
                }
            }
        }
    }

    #[test]
    fn test_bridge_sends_neutral_before_any_input() {
        let state = ControllerState::new();
        let mut bridge = ReportBridge::new(&state, MockOutput::new());

        let report = block_on(bridge.process_one()).unwrap();
        assert_eq!(report, SwitchReport::neutral());
        assert_eq!(bridge.output().sent, [SwitchReport::neutral()]);
    }

    #[test]
    fn test_bridge_reads_latest_state_each_poll() {
        let state = ControllerState::new();
        let mut bridge = ReportBridge::new(&state, MockOutput::new());

        state.set_axis(10);
        block_on(bridge.process_one()).unwrap();
        state.set_axis(20);
        state.set_second_group(1 << 6);
        block_on(bridge.process_one()).unwrap();

        let sent = &bridge.output().sent;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].left_stick_x, 10);
        assert_eq!(sent[0].buttons, Buttons::NONE);
        assert_eq!(sent[1].left_stick_x, 20);
        assert_eq!(sent[1].buttons, Buttons::A);
        assert_eq!(sent[1].hat, Hat::Center);
    }

    #[test]
    fn test_bridge_repeated_polls_identical() {
        let state = ControllerState::new();
        state.set_first_group(0x28);
        let mut bridge = ReportBridge::new(&state, MockOutput::new());

        let a = block_on(bridge.process_one()).unwrap();
        let b = block_on(bridge.process_one()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bridge_propagates_output_error() {
        let state = ControllerState::new();
        let mut output = MockOutput::new();
        output.fail = true;
        let mut bridge = ReportBridge::new(&state, output);

        assert_eq!(
            block_on(bridge.process_one()),
            Err(OutputError::Disconnected)
        );
        assert!(bridge.into_output().sent.is_empty());
    }
}
