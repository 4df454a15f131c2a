//! Dependency classification.
//!
//! Every box axis is in exactly one of three states:
//!
//! - **content-dependent**: no `size`, `min_size` or `max_size` on that axis,
//!   so the size comes from the children.
//! - **parent-dependent**: at least one of them is a percentage, so the size
//!   can only be resolved once the layout parent's size is final.
//! - **fixed**: only pixel constraints.
//!
//! Margins and paddings are parent-dependent as soon as any edge is a
//! percentage.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use trellis_style::{Axis, ComputedStyle, SizeUnits, Unit};

bitflags! {
    /// Which parts of a box depend on something outside its own style.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Dependency: u8 {
        /// The width.
        const WIDTH = 1;
        /// The height.
        const HEIGHT = 1 << 1;
        /// At least one margin edge.
        const MARGIN = 1 << 2;
        /// At least one padding edge.
        const PADDING = 1 << 3;
    }
}

impl Dependency {
    /// The size flag for `axis`.
    #[must_use]
    pub const fn size(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::WIDTH,
            Axis::Vertical => Self::HEIGHT,
        }
    }

    /// Whether the size on `axis` carries this dependency.
    #[must_use]
    pub const fn on(self, axis: Axis) -> bool {
        self.contains(Self::size(axis))
    }
}

/// Result of classifying one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    /// Axes sized from children.
    pub content: Dependency,
    /// Axes and edges waiting on the layout parent.
    pub parent: Dependency,
}

/// Classify every axis and edge group of `style`.
#[must_use]
pub fn classify(style: &ComputedStyle) -> Classification {
    let mut result = Classification::default();
    for axis in Axis::iter() {
        let constraints = constraints_on(style, axis);
        if !constraints.into_iter().any(Unit::is_set) {
            result.content |= Dependency::size(axis);
        } else if constraints.into_iter().any(Unit::is_percentage) {
            result.parent |= Dependency::size(axis);
        }
    }
    if style.margin.has_percentage() {
        result.parent |= Dependency::MARGIN;
    }
    if style.padding.has_percentage() {
        result.parent |= Dependency::PADDING;
    }
    result
}

fn constraints_on(style: &ComputedStyle, axis: Axis) -> [Unit; 3] {
    let pick = |units: &SizeUnits| units.get(axis);
    [
        pick(&style.size),
        pick(&style.min_size),
        pick(&style.max_size),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_style::EdgeUnits;

    #[test]
    fn test_unset_axes_are_content_dependent() {
        let class = classify(&ComputedStyle::default());
        assert_eq!(class.content, Dependency::WIDTH | Dependency::HEIGHT);
        assert!(class.parent.is_empty());
    }

    #[test]
    fn test_pixel_axes_are_fixed() {
        let style = ComputedStyle {
            size: SizeUnits::px(10.0, 20.0),
            ..ComputedStyle::default()
        };
        let class = classify(&style);
        assert!(class.content.is_empty());
        assert!(class.parent.is_empty());
    }

    #[test]
    fn test_any_percentage_constraint_makes_axis_parent_dependent() {
        let style = ComputedStyle {
            size: SizeUnits {
                width: Unit::Pixel(10.0),
                height: Unit::Unset,
            },
            max_size: SizeUnits {
                width: Unit::Percentage(50.0),
                height: Unit::Unset,
            },
            ..ComputedStyle::default()
        };
        let class = classify(&style);
        assert_eq!(class.parent, Dependency::WIDTH);
        assert_eq!(class.content, Dependency::HEIGHT);
    }

    #[test]
    fn test_percentage_edges_flag_margin_and_padding() {
        let style = ComputedStyle {
            margin: EdgeUnits {
                top: Unit::Percentage(5.0),
                ..EdgeUnits::default()
            },
            padding: EdgeUnits::all(Unit::Pixel(4.0)),
            ..ComputedStyle::default()
        };
        let class = classify(&style);
        assert!(class.parent.contains(Dependency::MARGIN));
        assert!(!class.parent.contains(Dependency::PADDING));
    }
}
