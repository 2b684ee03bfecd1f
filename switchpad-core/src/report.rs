//! Report synthesis: raw protocol groups to a host-facing Switch pad report.
//!
//! # Bit assignments
//!
//! First group:
//!
//! | Bits | Meaning |
//! |------|---------|
//! | 4-7  | hat code: 1 up, 2 right, 4 down, 8 left, anything else centered |
//! | 3    | Start |
//! | 2    | reserved, no effect |
//!
//! Second group:
//!
//! | Bit | Button |
//! |-----|--------|
//! | 2   | L |
//! | 3   | R |
//! | 4   | X |
//! | 5   | Y |
//! | 6   | A |
//! | 7   | B |
//!
//! Bits 6 and 7 together are a combo that yields A + L instead of A + B.

use crate::types::{Buttons, ControllerSnapshot, Hat, STICK_CENTER};

/// First-group bit to button.
pub const FIRST_GROUP_BUTTONS: [(u8, Buttons); 1] = [(3, Buttons::START)];

/// Second-group bit to button.
pub const SECOND_GROUP_BUTTONS: [(u8, Buttons); 6] = [
    (2, Buttons::L),
    (3, Buttons::R),
    (4, Buttons::X),
    (5, Buttons::Y),
    (6, Buttons::A),
    (7, Buttons::B),
];

/// Second-group bits that, when all set, replace their own mapping.
pub const FACE_COMBO_MASK: u8 = (1 << 6) | (1 << 7);

/// Buttons asserted by [`FACE_COMBO_MASK`].
pub const FACE_COMBO_BUTTONS: Buttons = Buttons(Buttons::A.0 | Buttons::L.0);

/// Hat code (first group, bits 4-7) to direction.
pub const HAT_CODES: [(u8, Hat); 4] = [
    (1, Hat::Up),
    (2, Hat::Right),
    (4, Hat::Down),
    (8, Hat::Left),
];

/// USB HID input report in the Pokken pad layout.
///
/// Total size: 8 bytes (buttons: 2, hat: 1, sticks: 4x1, vendor: 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct SwitchReport {
    /// Logical buttons
    pub buttons: Buttons,
    /// Hat switch
    pub hat: Hat,
    /// Left stick X (0-255, 128 = center)
    pub left_stick_x: u8,
    /// Left stick Y (0-255, 128 = center)
    pub left_stick_y: u8,
    /// Right stick X (0-255, 128 = center)
    pub right_stick_x: u8,
    /// Right stick Y (0-255, 128 = center)
    pub right_stick_y: u8,
    /// Vendor-specific byte, always zero
    pub vendor: u8,
}

impl SwitchReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Sticks centered, hat centered, nothing pressed.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            hat: Hat::Center,
            left_stick_x: STICK_CENTER,
            left_stick_y: STICK_CENTER,
            right_stick_x: STICK_CENTER,
            right_stick_y: STICK_CENTER,
            vendor: 0,
        }
    }

    /// Convert the report to its wire format.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons_bytes = self.buttons.raw().to_le_bytes();
        [
            buttons_bytes[0],
            buttons_bytes[1],
            self.hat.raw(),
            self.left_stick_x,
            self.left_stick_y,
            self.right_stick_x,
            self.right_stick_y,
            self.vendor,
        ]
    }
}

impl Default for SwitchReport {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Build a report from a snapshot. Pure; equal snapshots give equal reports.
#[must_use]
pub fn synthesize(snapshot: &ControllerSnapshot) -> SwitchReport {
    SwitchReport {
        buttons: first_group_buttons(snapshot.first) | second_group_buttons(snapshot.second),
        hat: hat_from_group(snapshot.first),
        left_stick_x: snapshot.axis,
        ..SwitchReport::neutral()
    }
}

/// Decode the one-hot hat code in bits 4-7.
#[must_use]
pub fn hat_from_group(first: u8) -> Hat {
    let code = first >> 4;
    HAT_CODES
        .iter()
        .find(|&&(c, _)| c == code)
        .map_or(Hat::Center, |&(_, hat)| hat)
}

/// Buttons carried by the first group.
#[inline]
#[must_use]
pub fn first_group_buttons(first: u8) -> Buttons {
    map_bits(first, &FIRST_GROUP_BUTTONS)
}

/// Buttons carried by the second group, combo rule included.
#[must_use]
pub fn second_group_buttons(second: u8) -> Buttons {
    if second & FACE_COMBO_MASK == FACE_COMBO_MASK {
        FACE_COMBO_BUTTONS | map_bits(second & !FACE_COMBO_MASK, &SECOND_GROUP_BUTTONS)
    } else {
        map_bits(second, &SECOND_GROUP_BUTTONS)
    }
}

#[inline]
fn map_bits(group: u8, table: &[(u8, Buttons)]) -> Buttons {
    table
        .iter()
        .filter(|&&(bit, _)| group & (1 << bit) != 0)
        .fold(Buttons::NONE, |acc, &(_, button)| acc | button)
}
