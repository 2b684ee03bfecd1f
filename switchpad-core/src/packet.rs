//! Tagged binary packets carried one per serial line.
//!
//! ```text
//! 241 <axis>            primary analog axis
//! 240 <axis>            secondary analog axis (accepted, ignored)
//! 242 <first> <second>  digital button groups, 3 = "no signal"
//! ```

use crate::types::ControllerSnapshot;

/// Group value meaning "no data for this group this cycle".
pub const NO_SIGNAL: u8 = 3;

/// Packet type, identified by the first byte of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PacketTag {
    /// Secondary stick axis. The target hardware has no second axis.
    AnalogSecondary = 240,
    /// Primary stick axis.
    AnalogPrimary = 241,
    /// Both digital button groups.
    Digital = 242,
}

impl PacketTag {
    /// Total line length (tag included) this packet type needs.
    #[inline]
    #[must_use]
    pub const fn min_len(self) -> usize {
        match self {
            Self::AnalogSecondary | Self::AnalogPrimary => 2,
            Self::Digital => 3,
        }
    }
}

impl TryFrom<u8> for PacketTag {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            240 => Ok(Self::AnalogSecondary),
            241 => Ok(Self::AnalogPrimary),
            242 => Ok(Self::Digital),
            other => Err(DecodeError::UnknownTag(other)),
        }
    }
}

/// Decoded packet, ready to be applied to a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Packet {
    /// New primary axis value.
    AnalogPrimary(u8),
    /// Secondary axis value. Has no effect when applied.
    AnalogSecondary(u8),
    /// Digital groups with the "no signal" sentinel already resolved to 0.
    Digital { first: u8, second: u8 },
}

impl Packet {
    /// Apply this packet to `snapshot`, touching only the fields it owns.
    pub fn apply(self, snapshot: &mut ControllerSnapshot) {
        match self {
            Packet::AnalogPrimary(value) => snapshot.axis = value,
            Packet::AnalogSecondary(_) => {}
            Packet::Digital { first, second } => {
                snapshot.first = first;
                snapshot.second = second;
            }
        }
    }
}

/// Why a line was discarded.
///
/// Never surfaced past the serial link; used for counters and tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Line held no bytes at all.
    Empty,
    /// First byte is not a known tag.
    UnknownTag(u8),
    /// Line is shorter than its tag requires.
    Truncated { tag: PacketTag, len: usize },
}

/// Decode one complete line.
///
/// Bytes past what the tag needs are ignored.
pub fn decode(line: &[u8]) -> Result<Packet, DecodeError> {
    let (&first, _) = line.split_first().ok_or(DecodeError::Empty)?;
    let tag = PacketTag::try_from(first)?;

    if line.len() < tag.min_len() {
        return Err(DecodeError::Truncated {
            tag,
            len: line.len(),
        });
    }

    Ok(match tag {
        PacketTag::AnalogPrimary => Packet::AnalogPrimary(line[1]),
        PacketTag::AnalogSecondary => Packet::AnalogSecondary(line[1]),
        PacketTag::Digital => Packet::Digital {
            first: group_value(line[1]),
            second: group_value(line[2]),
        },
    })
}

/// Resolve the "no signal" sentinel to "all released".
#[inline]
fn group_value(raw: u8) -> u8 {
    if raw == NO_SIGNAL {
        0
    } else {
        raw
    }
}
