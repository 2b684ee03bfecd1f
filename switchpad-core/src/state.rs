//! Shared controller state and link counters.
//!
//! Written from the serial side (interrupt priority), read from the USB side
//! (thread mode). Every field is its own atomic cell, so a reader can never
//! observe a torn field. Fields are not updated together: a snapshot may mix
//! the first group of one packet with the second group of the next.

use portable_atomic::{AtomicU32, AtomicU8, Ordering};

use crate::packet::Packet;
use crate::types::{ControllerSnapshot, STICK_CENTER};

/// Lock-free store of the last decoded controller input.
///
/// Intended to live in a `static`:
///
/// ```
/// use switchpad_core::ControllerState;
///
/// static STATE: ControllerState = ControllerState::new();
///
/// STATE.set_axis(200);
/// assert_eq!(STATE.snapshot().axis, 200);
/// ```
#[derive(Debug)]
pub struct ControllerState {
    axis: AtomicU8,
    first: AtomicU8,
    second: AtomicU8,
}

impl ControllerState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            axis: AtomicU8::new(STICK_CENTER),
            first: AtomicU8::new(0),
            second: AtomicU8::new(0),
        }
    }

    /// Read every field. Each read is atomic on its own.
    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            axis: self.axis.load(Ordering::Relaxed),
            first: self.first.load(Ordering::Relaxed),
            second: self.second.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub fn set_axis(&self, value: u8) {
        self.axis.store(value, Ordering::Relaxed);
    }

    #[inline]
    pub fn set_first_group(&self, value: u8) {
        self.first.store(value, Ordering::Relaxed);
    }

    #[inline]
    pub fn set_second_group(&self, value: u8) {
        self.second.store(value, Ordering::Relaxed);
    }

    /// Store a decoded packet, writing only the fields it owns.
    pub fn apply(&self, packet: Packet) {
        match packet {
            Packet::AnalogPrimary(value) => self.set_axis(value),
            Packet::AnalogSecondary(_) => {}
            Packet::Digital { first, second } => {
                self.set_first_group(first);
                self.set_second_group(second);
            }
        }
    }

    /// Back to axis centered, all released.
    pub fn reset(&self) {
        let neutral = ControllerSnapshot::NEUTRAL;
        self.set_axis(neutral.axis);
        self.set_first_group(neutral.first);
        self.set_second_group(neutral.second);
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for the serial link. Purely observational.
#[derive(Debug, Default)]
pub struct LinkStats {
    lines_decoded: AtomicU32,
    lines_dropped: AtomicU32,
    bytes_overflowed: AtomicU32,
}

/// Point-in-time copy of [`LinkStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatsSnapshot {
    pub lines_decoded: u32,
    pub lines_dropped: u32,
    pub bytes_overflowed: u32,
}

impl LinkStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines_decoded: AtomicU32::new(0),
            lines_dropped: AtomicU32::new(0),
            bytes_overflowed: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn record_decoded(&self) {
        self.lines_decoded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped(&self) {
        self.lines_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_overflow(&self, bytes: u32) {
        self.bytes_overflowed.fetch_add(bytes, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> LinkStatsSnapshot {
        LinkStatsSnapshot {
            lines_decoded: self.lines_decoded.load(Ordering::Relaxed),
            lines_dropped: self.lines_dropped.load(Ordering::Relaxed),
            bytes_overflowed: self.bytes_overflowed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_neutral() {
        let state = ControllerState::new();
        assert_eq!(state.snapshot(), ControllerSnapshot::NEUTRAL);
    }

    #[test]
    fn test_apply_axis_only() {
        let state = ControllerState::new();
        state.set_first_group(0x18);
        state.set_second_group(0x40);
        state.apply(Packet::AnalogPrimary(17));
        assert_eq!(state.snapshot(), ControllerSnapshot::new(17, 0x18, 0x40));
    }

    #[test]
    fn test_apply_secondary_is_noop() {
        let state = ControllerState::new();
        state.apply(Packet::AnalogSecondary(0));
        assert_eq!(state.snapshot(), ControllerSnapshot::NEUTRAL);
    }

    #[test]
    fn test_apply_digital() {
        let state = ControllerState::new();
        state.set_axis(3);
        state.apply(Packet::Digital {
            first: 0x80,
            second: 0x0C,
        });
        assert_eq!(state.snapshot(), ControllerSnapshot::new(3, 0x80, 0x0C));
    }

    #[test]
    fn test_reset() {
        let state = ControllerState::new();
        state.set_axis(1);
        state.set_first_group(2);
        state.set_second_group(4);
        state.reset();
        assert_eq!(state.snapshot(), ControllerSnapshot::NEUTRAL);
    }

    #[test]
    fn test_snapshot_matches_packet_apply() {
        let packets = [
            Packet::AnalogPrimary(90),
            Packet::Digital {
                first: 0x28,
                second: 0xC0,
            },
            Packet::AnalogSecondary(5),
            Packet::Digital {
                first: 0,
                second: 0x04,
            },
        ];

        let state = ControllerState::new();
        let mut expected = ControllerSnapshot::NEUTRAL;
        for packet in packets {
            state.apply(packet);
            packet.apply(&mut expected);
            assert_eq!(state.snapshot(), expected);
        }
    }

    #[test]
    fn test_link_stats() {
        let stats = LinkStats::new();
        stats.record_decoded();
        stats.record_decoded();
        stats.record_dropped();
        stats.record_overflow(12);
        assert_eq!(
            stats.snapshot(),
            LinkStatsSnapshot {
                lines_decoded: 2,
                lines_dropped: 1,
                bytes_overflowed: 12,
            }
        );
    }
}
