//! Length units for sizes and box edges.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Only the two units the layout engine understands are modelled: absolute
//! pixels and percentages of an axis total that is supplied at resolution
//! time. Anything else is resolved upstream by the style system.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// The x axis (widths, left/right edges).
    Horizontal,
    /// The y axis (heights, top/bottom edges).
    Vertical,
}

impl Axis {
    /// The other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// [§ 4 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
///
/// A possibly-unset length. Percentages are relative to an axis total that
/// is only known during layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    /// "1px = 1/96th of 1in"
    Pixel(f32),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    ///
    /// `Percentage(50.0)` is half of the axis total.
    Percentage(f32),
    /// No value specified. Skipped during resolution.
    #[default]
    Unset,
}

impl Unit {
    /// Resolve to pixels against `axis_total`.
    ///
    /// Returns `None` for [`Unit::Unset`].
    #[must_use]
    pub fn resolve(self, axis_total: f32) -> Option<f32> {
        match self {
            Self::Pixel(px) => Some(px),
            Self::Percentage(pct) => Some(pct / 100.0 * axis_total),
            Self::Unset => None,
        }
    }

    /// The pixel value, if this is an absolute length.
    #[must_use]
    pub const fn pixel(self) -> Option<f32> {
        match self {
            Self::Pixel(px) => Some(px),
            Self::Percentage(_) | Self::Unset => None,
        }
    }

    /// Whether this value needs an axis total to resolve.
    #[must_use]
    pub const fn is_percentage(self) -> bool {
        matches!(self, Self::Percentage(_))
    }

    /// Whether any value was specified.
    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixel(px) => write!(f, "{px}px"),
            Self::Percentage(pct) => write!(f, "{pct}%"),
            Self::Unset => f.write_str("auto"),
        }
    }
}

/// Error produced when a unit string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseUnitError {
    /// The numeric part is missing or malformed, or the suffix is unknown.
    #[error("invalid unit value {0:?}")]
    Invalid(String),
    /// The number parsed but is NaN or infinite.
    #[error("unit value {0:?} is not finite")]
    NotFinite(String),
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    /// Accepts `"12px"`, `"12"`, `"50%"` and `"auto"` / `"unset"` / `""`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("auto") || text.eq_ignore_ascii_case("unset")
        {
            return Ok(Self::Unset);
        }

        let (number, make): (&str, fn(f32) -> Self) = if let Some(n) = text.strip_suffix('%') {
            (n, Self::Percentage)
        } else if let Some(n) = text.strip_suffix("px") {
            (n, Self::Pixel)
        } else {
            (text, Self::Pixel)
        };

        let value: f32 = number
            .trim()
            .parse()
            .map_err(|_| ParseUnitError::Invalid(input.to_string()))?;
        if !value.is_finite() {
            return Err(ParseUnitError::NotFinite(input.to_string()));
        }
        Ok(make(value))
    }
}

impl TryFrom<String> for Unit {
    type Error = ParseUnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.to_string()
    }
}

/// Convert a resolved length to whole device pixels.
///
/// Negative and NaN inputs clamp to 0; fractional pixels are dropped so that
/// percentage shares never overshoot their base.
#[must_use]
pub fn to_px(value: f32) -> u32 {
    value.max(0.0).floor() as u32
}

/// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
///
/// Clamp `value` into `[min, max]`. When the bounds conflict the minimum
/// wins, matching the CSS rule that 'min-width' overrides 'max-width'.
#[must_use]
pub fn clamp_against_constraints(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    let capped = max.map_or(value, |max| value.min(max));
    min.map_or(capped, |min| capped.max(min))
}

/// A width/height pair of units, used for `Size`, `MinSize` and `MaxSize`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeUnits {
    /// Horizontal component.
    pub width: Unit,
    /// Vertical component.
    pub height: Unit,
}

impl SizeUnits {
    /// No value on either axis.
    pub const UNSET: Self = Self {
        width: Unit::Unset,
        height: Unit::Unset,
    };

    /// Two pixel values.
    #[must_use]
    pub const fn px(width: f32, height: f32) -> Self {
        Self {
            width: Unit::Pixel(width),
            height: Unit::Pixel(height),
        }
    }

    /// The component on `axis`.
    #[must_use]
    pub const fn get(&self, axis: Axis) -> Unit {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Four edge units, used for `Margin` and `Padding`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeUnits {
    /// Top edge.
    pub top: Unit,
    /// Right edge.
    pub right: Unit,
    /// Bottom edge.
    pub bottom: Unit,
    /// Left edge.
    pub left: Unit,
}

impl EdgeUnits {
    /// The same unit on every edge.
    #[must_use]
    pub const fn all(unit: Unit) -> Self {
        Self {
            top: unit,
            right: unit,
            bottom: unit,
            left: unit,
        }
    }

    /// The leading and trailing edge on `axis` (left/right or top/bottom).
    #[must_use]
    pub const fn on_axis(&self, axis: Axis) -> (Unit, Unit) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.top, self.bottom),
        }
    }

    /// Whether either edge on `axis` is a percentage.
    #[must_use]
    pub const fn has_percentage_on(&self, axis: Axis) -> bool {
        let (start, end) = self.on_axis(axis);
        start.is_percentage() || end.is_percentage()
    }

    /// Whether any edge is a percentage.
    #[must_use]
    pub const fn has_percentage(&self) -> bool {
        self.has_percentage_on(Axis::Horizontal) || self.has_percentage_on(Axis::Vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_percentage_against_total() {
        assert_eq!(Unit::Percentage(50.0).resolve(200.0), Some(100.0));
        assert_eq!(Unit::Pixel(12.0).resolve(200.0), Some(12.0));
        assert_eq!(Unit::Unset.resolve(200.0), None);
    }

    #[test]
    fn test_min_wins_over_max() {
        assert!((clamp_against_constraints(50.0, Some(80.0), Some(60.0)) - 80.0).abs() < f32::EPSILON);
        assert!((clamp_against_constraints(50.0, None, Some(30.0)) - 30.0).abs() < f32::EPSILON);
        assert!((clamp_against_constraints(50.0, None, None) - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_to_px_clamps_negative_and_nan() {
        assert_eq!(to_px(-4.0), 0);
        assert_eq!(to_px(f32::NAN), 0);
        assert_eq!(to_px(10.9), 10);
    }
}
