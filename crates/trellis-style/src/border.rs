//! Border descriptions.
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)
//!
//! Border thickness is always an absolute pixel count; percentage widths are
//! not part of the model, so borders resolve eagerly from style.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::unit::Axis;

/// [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// One side of a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSide {
    /// [§ 4.3 'border-width'](https://www.w3.org/TR/css-backgrounds-3/#border-width)
    pub thickness: u32,
    /// [§ 4.1 'border-color'](https://www.w3.org/TR/css-backgrounds-3/#border-color)
    pub color: Color,
}

/// All four border sides plus a shared corner radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Border {
    /// Top side.
    pub top: BorderSide,
    /// Right side.
    pub right: BorderSide,
    /// Bottom side.
    pub bottom: BorderSide,
    /// Left side.
    pub left: BorderSide,
    /// [§ 5 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
    pub radius: f32,
}

impl Border {
    /// The same side on all four edges, with square corners.
    #[must_use]
    pub const fn uniform(thickness: u32, color: Color) -> Self {
        let side = BorderSide { thickness, color };
        Self {
            top: side,
            right: side,
            bottom: side,
            left: side,
            radius: 0.0,
        }
    }

    /// Thickness of the leading and trailing side on `axis`.
    #[must_use]
    pub const fn thickness_on(&self, axis: Axis) -> (u32, u32) {
        match axis {
            Axis::Horizontal => (self.left.thickness, self.right.thickness),
            Axis::Vertical => (self.top.thickness, self.bottom.thickness),
        }
    }

    /// Whether any side would paint something.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .any(|side| side.thickness > 0 && side.color.is_visible())
    }
}
