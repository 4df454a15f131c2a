//! Resolved box geometry.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! Everything here is already in whole device pixels. Percentages and unset
//! values live in `trellis_style`; once layout resolves them they end up in
//! one of these types.

use serde::{Deserialize, Serialize};
use trellis_style::{Axis, Border, EdgeUnits, Unit, to_px};

/// A width/height pair in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub height: u32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Build a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The component on `axis`.
    #[must_use]
    pub const fn get(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Overwrite the component on `axis`.
    pub const fn set(&mut self, axis: Axis, value: u32) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// Grow by `edges` on both axes.
    #[must_use]
    pub const fn expand(self, edges: Edges) -> Self {
        Self {
            width: self.width.saturating_add(edges.sum(Axis::Horizontal)),
            height: self.height.saturating_add(edges.sum(Axis::Vertical)),
        }
    }
}

/// Edge sizes for padding, border, or margin.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Edges {
    /// Top edge size.
    pub top: u32,
    /// Right edge size.
    pub right: u32,
    /// Bottom edge size.
    pub bottom: u32,
    /// Left edge size.
    pub left: u32,
}

impl Edges {
    /// No edges at all.
    pub const ZERO: Self = Self::all(0);

    /// The same size on every edge.
    #[must_use]
    pub const fn all(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Leading plus trailing edge on `axis`.
    #[must_use]
    pub const fn sum(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.left.saturating_add(self.right),
            Axis::Vertical => self.top.saturating_add(self.bottom),
        }
    }

    /// Border thickness as edges.
    #[must_use]
    pub const fn from_border(border: &Border) -> Self {
        Self {
            top: border.top.thickness,
            right: border.right.thickness,
            bottom: border.bottom.thickness,
            left: border.left.thickness,
        }
    }

    /// Resolve margin or padding units.
    ///
    /// Left and right percentages refer to `base.width`, top and bottom to
    /// `base.height`. Without a base only the pixel edges resolve; percentage
    /// edges count as 0 until the base is known.
    #[must_use]
    pub fn resolve(units: &EdgeUnits, base: Option<Size>) -> Self {
        let edge = |unit: Unit, axis: Axis| match base {
            Some(base) => unit.resolve(base.get(axis) as f32).map_or(0, to_px),
            None => unit.pixel().map_or(0, to_px),
        };
        Self {
            top: edge(units.top, Axis::Vertical),
            right: edge(units.right, Axis::Horizontal),
            bottom: edge(units.bottom, Axis::Vertical),
            left: edge(units.left, Axis::Horizontal),
        }
    }
}

/// Position of a box's border-box top-left corner in its parent's local
/// space. Y grows upward, so children below the parent's top edge have
/// negative `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Distance to the right of the parent's border-box left edge.
    pub x: i32,
    /// Distance above the parent's border-box top edge.
    pub y: i32,
}

impl Offset {
    /// Build an offset.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_adds_both_sides() {
        let size = Size::new(10, 20).expand(Edges {
            top: 1,
            right: 2,
            bottom: 3,
            left: 4,
        });
        assert_eq!(size, Size::new(16, 24));
    }

    #[test]
    fn test_resolve_edges_against_axis_bases() {
        let units = EdgeUnits {
            top: Unit::Percentage(10.0),
            right: Unit::Pixel(3.0),
            bottom: Unit::Unset,
            left: Unit::Percentage(10.0),
        };
        let resolved = Edges::resolve(&units, Some(Size::new(200, 50)));
        assert_eq!(
            resolved,
            Edges {
                top: 5,
                right: 3,
                bottom: 0,
                left: 20
            }
        );

        let fixed = Edges::resolve(&units, None);
        assert_eq!(
            fixed,
            Edges {
                top: 0,
                right: 3,
                bottom: 0,
                left: 0
            }
        );
    }
}
