//! Style change masks.
//!
//! Instead of broadcasting change events, whoever replaces a style computes
//! the difference with [`diff`] and hands the mask to layout directly.

use bitflags::bitflags;

use crate::computed::ComputedStyle;

bitflags! {
    /// Which property categories differ between two computed styles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleChange: u16 {
        /// Size, min size or max size.
        const SIZE = 1;
        /// Any margin edge.
        const MARGIN = 1 << 1;
        /// Any padding edge.
        const PADDING = 1 << 2;
        /// Border thickness, color or radius.
        const BORDER = 1 << 3;
        /// Stack direction.
        const STACK = 1 << 4;
        /// Alignment flags.
        const ALIGNMENT = 1 << 5;
        /// Box sizing mode.
        const BOX_SIZING = 1 << 6;
        /// Pivot, position or rotation.
        const TRANSFORM = 1 << 7;
        /// Background color.
        const BACKGROUND = 1 << 8;
        /// The hidden flag.
        const VISIBILITY = 1 << 9;
    }
}

impl StyleChange {
    /// Categories that can change a box's size or dependency classification.
    pub const LAYOUT: Self = Self::SIZE
        .union(Self::MARGIN)
        .union(Self::PADDING)
        .union(Self::BORDER)
        .union(Self::STACK)
        .union(Self::BOX_SIZING);

    /// Whether dependency classification must run again.
    #[must_use]
    pub const fn affects_layout(self) -> bool {
        self.intersects(Self::LAYOUT)
    }

    /// Whether only the paint record is stale.
    #[must_use]
    pub const fn affects_paint_only(self) -> bool {
        self.bits() == Self::BACKGROUND.bits()
    }
}

/// Compare two computed styles and report which categories changed.
#[must_use]
pub fn diff(old: &ComputedStyle, new: &ComputedStyle) -> StyleChange {
    let mut change = StyleChange::empty();
    let mut mark = |changed: bool, flag: StyleChange| {
        if changed {
            change |= flag;
        }
    };

    mark(
        old.size != new.size || old.min_size != new.min_size || old.max_size != new.max_size,
        StyleChange::SIZE,
    );
    mark(old.margin != new.margin, StyleChange::MARGIN);
    mark(old.padding != new.padding, StyleChange::PADDING);
    mark(old.border != new.border, StyleChange::BORDER);
    mark(old.stack != new.stack, StyleChange::STACK);
    mark(old.alignment != new.alignment, StyleChange::ALIGNMENT);
    mark(old.box_sizing != new.box_sizing, StyleChange::BOX_SIZING);
    mark(
        old.pivot != new.pivot || old.position != new.position || old.rotation != new.rotation,
        StyleChange::TRANSFORM,
    );
    mark(old.background != new.background, StyleChange::BACKGROUND);
    mark(old.hidden != new.hidden, StyleChange::VISIBILITY);

    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, SizeUnits, Unit};

    #[test]
    fn test_identical_styles_have_no_change() {
        let style = ComputedStyle::default();
        assert!(diff(&style, &style.clone()).is_empty());
    }

    #[test]
    fn test_size_and_background_are_reported_separately() {
        let old = ComputedStyle::default();
        let new = ComputedStyle {
            size: SizeUnits {
                width: Unit::Percentage(50.0),
                height: Unit::Unset,
            },
            background: Some(Color::WHITE),
            ..ComputedStyle::default()
        };
        let change = diff(&old, &new);
        assert_eq!(change, StyleChange::SIZE | StyleChange::BACKGROUND);
        assert!(change.affects_layout());
        assert!(!change.affects_paint_only());
        assert!(StyleChange::BACKGROUND.affects_paint_only());
    }
}
