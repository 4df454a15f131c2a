//! Per-axis alignment flags.

use bitflags::bitflags;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::unit::Axis;

bitflags! {
    /// Where a child sits inside the free space its parent leaves it.
    ///
    /// Horizontal and vertical flags are independent. A child with no flag
    /// on its parent's cross axis is "inline" and takes part in baseline
    /// alignment instead.
    ///
    /// Serializes as flag names (`"CENTER | MIDDLE"`) and also reads raw
    /// bits (`18`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct Alignment: u8 {
        /// Horizontal start.
        const LEFT = 1;
        /// Horizontal center.
        const CENTER = 1 << 1;
        /// Horizontal end.
        const RIGHT = 1 << 2;
        /// Vertical start.
        const TOP = 1 << 3;
        /// Vertical center.
        const MIDDLE = 1 << 4;
        /// Vertical end.
        const BOTTOM = 1 << 5;
    }
}

/// Either form an alignment may be written in.
#[derive(Deserialize)]
#[serde(untagged)]
enum AlignmentRepr {
    Bits(u8),
    Names(String),
}

impl<'de> Deserialize<'de> for Alignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match AlignmentRepr::deserialize(deserializer)? {
            AlignmentRepr::Bits(bits) => Self::from_bits(bits)
                .ok_or_else(|| D::Error::custom(format!("unknown alignment bits {bits:#x}"))),
            AlignmentRepr::Names(names) => {
                bitflags::parser::from_str(&names).map_err(D::Error::custom)
            }
        }
    }
}

impl Alignment {
    /// Alignment scalar on `axis`: -1 for start, 0 for center, 1 for end.
    ///
    /// `None` when no flag for that axis is set.
    #[must_use]
    pub const fn scalar(self, axis: Axis) -> Option<f32> {
        let (start, center, end) = match axis {
            Axis::Horizontal => (Self::LEFT, Self::CENTER, Self::RIGHT),
            Axis::Vertical => (Self::TOP, Self::MIDDLE, Self::BOTTOM),
        };
        if self.contains(start) {
            Some(-1.0)
        } else if self.contains(center) {
            Some(0.0)
        } else if self.contains(end) {
            Some(1.0)
        } else {
            None
        }
    }

    /// Horizontal scalar: [`Self::scalar`] on [`Axis::Horizontal`].
    #[must_use]
    pub const fn horizontal(self) -> Option<f32> {
        self.scalar(Axis::Horizontal)
    }

    /// Vertical scalar: [`Self::scalar`] on [`Axis::Vertical`].
    #[must_use]
    pub const fn vertical(self) -> Option<f32> {
        self.scalar(Axis::Vertical)
    }

    /// Fraction of the free space placed before the child, in `[0, 1]`.
    #[must_use]
    pub fn fraction(self, axis: Axis) -> Option<f32> {
        self.scalar(axis).map(|a| (1.0 + a) / 2.0)
    }

    /// Whether any flag for `axis` is set.
    #[must_use]
    pub const fn is_explicit(self, axis: Axis) -> bool {
        self.scalar(axis).is_some()
    }
}
