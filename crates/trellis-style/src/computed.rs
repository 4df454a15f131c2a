//! The read-only computed style view consumed by layout.
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."
//!
//! Merging state overlays (hover, focus, ...) happens upstream; layout only
//! ever sees the merged result.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::alignment::Alignment;
use crate::border::Border;
use crate::color::Color;
use crate::unit::{Axis, EdgeUnits, SizeUnits};

/// Direction in which a box stacks its children. Stacks never wrap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StackDirection {
    /// Children are placed left to right.
    Horizontal,
    /// Children are placed top to bottom.
    #[default]
    Vertical,
}

impl StackDirection {
    /// The axis children advance along.
    #[must_use]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::Horizontal,
            Self::Vertical => Axis::Vertical,
        }
    }
}

/// [§ 4.4 'box-sizing'](https://www.w3.org/TR/css-sizing-3/#box-sizing)
///
/// Whether the specified size describes the content box or the border box.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BoxSizing {
    /// "content-box": the size excludes padding and border.
    #[default]
    Content,
    /// "border-box": the border thickness is taken out of the size.
    Border,
}

/// A plain 2D vector used for pivots and translations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vector2 {
    /// Build a vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Computed style of one node.
///
/// Every length is optional ([`Unit::Unset`](crate::Unit::Unset)); unset
/// values are skipped during resolution, never treated as errors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    /// Preferred size.
    pub size: SizeUnits,
    /// Lower size bound.
    pub min_size: SizeUnits,
    /// Upper size bound.
    pub max_size: SizeUnits,
    /// Outer spacing.
    pub margin: EdgeUnits,
    /// Inner spacing between border and content.
    pub padding: EdgeUnits,
    /// Border sides and radius.
    pub border: Border,
    /// How children are stacked.
    pub stack: StackDirection,
    /// Alignment of this node inside its parent.
    pub alignment: Alignment,
    /// Whether `size` includes the border.
    pub box_sizing: BoxSizing,
    /// Transform origin, normalized to the border box (0,0 = top-left).
    pub pivot: Vector2,
    /// Translation applied by the style transform, in pixels.
    pub position: Vector2,
    /// Rotation applied by the style transform, in degrees.
    pub rotation: f32,
    /// Background fill. `None` paints nothing.
    pub background: Option<Color>,
    /// Hidden nodes take no space and are never painted.
    pub hidden: bool,
}

impl ComputedStyle {
    /// Whether painting this node would draw anything.
    #[must_use]
    pub fn is_paintable(&self) -> bool {
        self.background.is_some_and(Color::is_visible) || self.border.is_visible()
    }
}
