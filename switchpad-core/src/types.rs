//! Core types: Buttons, Hat, ControllerSnapshot.

use core::ops::{BitOr, BitOrAssign};

/// Stick value reported when an axis has no data.
pub const STICK_CENTER: u8 = 128;

/// Logical button state in the Switch (Pokken pad) layout.
///
/// One bit per host-facing button; buttons combine with `|`.
///
/// # Example
///
/// ```
/// use switchpad_core::Buttons;
///
/// let buttons = Buttons::A | Buttons::L;
/// assert_eq!(buttons.raw(), 0x0014);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const Y: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const A: Self = Self(1 << 2);
    pub const X: Self = Self(1 << 3);
    pub const L: Self = Self(1 << 4);
    pub const R: Self = Self(1 << 5);
    pub const ZL: Self = Self(1 << 6);
    pub const ZR: Self = Self(1 << 7);
    pub const MINUS: Self = Self(1 << 8);
    pub const PLUS: Self = Self(1 << 9);
    pub const LCLICK: Self = Self(1 << 10); // Left stick press
    pub const RCLICK: Self = Self(1 << 11); // Right stick press
    pub const HOME: Self = Self(1 << 12);
    pub const CAPTURE: Self = Self(1 << 13);

    /// Start is the Switch's "+" button.
    pub const START: Self = Self::PLUS;

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Hat switch direction as encoded in the report.
///
/// The discriminants are the wire values; `Center` is the HID null state.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Hat {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
    #[default]
    Center = 8,
}

impl Hat {
    /// Wire value of this direction.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Last-known controller input, as decoded from the serial line.
///
/// Holds the raw protocol values; mapping to logical buttons happens only
/// when a report is synthesized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerSnapshot {
    /// Primary analog axis (0-255, 128 = center).
    pub axis: u8,
    /// First digital group: hat code in bits 4-7, Start in bit 3.
    pub first: u8,
    /// Second digital group: face and shoulder buttons.
    pub second: u8,
}

impl ControllerSnapshot {
    /// Axis centered, every button released.
    pub const NEUTRAL: Self = Self {
        axis: STICK_CENTER,
        first: 0,
        second: 0,
    };

    #[must_use]
    pub const fn new(axis: u8, first: u8, second: u8) -> Self {
        Self {
            axis,
            first,
            second,
        }
    }
}

impl Default for ControllerSnapshot {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
