//! Per-box layout state.

use std::collections::BTreeSet;

use kurbo::Affine;
use trellis_scene::NodeId;

use crate::content::IntrinsicSize;
use crate::dependency::Dependency;
use crate::geometry::{Edges, Offset, Size};
use crate::paint::RectRecord;

/// Everything the solver knows about one box.
///
/// Owned by the [`Scene`](crate::Scene) and indexed by [`NodeId`]. Read it
/// through [`Scene::layout`](crate::Scene::layout); values are final once
/// [`BoxState::is_dirty`] is false.
#[derive(Debug, Clone)]
pub struct BoxState {
    /// Final content-box size.
    pub(crate) size: Size,
    /// Result of the bottom-up pass alone. Equals `size` on axes that are not
    /// parent-dependent.
    pub(crate) intrinsic: Size,
    /// Child-driven size.
    pub(crate) content: Size,
    /// Child-driven size without the children that are percentage-sized on
    /// each axis.
    pub(crate) static_content: Size,

    pub(crate) border: Edges,
    pub(crate) margin: Edges,
    pub(crate) padding: Edges,
    /// Pixel parts of margin and padding. Percentage edges count as 0.
    pub(crate) margin_fixed: Edges,
    pub(crate) padding_fixed: Edges,

    pub(crate) content_dependency: Dependency,
    pub(crate) parent_dependency: Dependency,
    /// Direct layout children with a non-empty parent dependency.
    pub(crate) dependents: BTreeSet<NodeId>,

    /// Last measurement of a leaf provider.
    pub(crate) measured: IntrinsicSize,
    pub(crate) baseline: i32,
    /// Baseline of the box at its bottom-up size. Parents build their line
    /// from this one.
    pub(crate) intrinsic_baseline: i32,
    pub(crate) line_height: u32,
    pub(crate) baseline_child: Option<NodeId>,

    pub(crate) offset: Offset,
    pub(crate) transform: Affine,
    pub(crate) rect: RectRecord,

    pub(crate) dirty: bool,
    pub(crate) content_dirty: bool,
    pub(crate) needs_pending: bool,
    pub(crate) transform_dirty: bool,
    /// Sitting in the scene's update queue.
    pub(crate) queued: bool,
}

impl Default for BoxState {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            intrinsic: Size::ZERO,
            content: Size::ZERO,
            static_content: Size::ZERO,
            border: Edges::ZERO,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            margin_fixed: Edges::ZERO,
            padding_fixed: Edges::ZERO,
            content_dependency: Dependency::empty(),
            parent_dependency: Dependency::empty(),
            dependents: BTreeSet::new(),
            measured: IntrinsicSize::default(),
            baseline: 0,
            intrinsic_baseline: 0,
            line_height: 0,
            baseline_child: None,
            offset: Offset::default(),
            transform: Affine::IDENTITY,
            rect: RectRecord::default(),
            dirty: false,
            content_dirty: false,
            needs_pending: false,
            transform_dirty: false,
            queued: false,
        }
    }
}

impl BoxState {
    /// Final content-box size.
    #[must_use]
    pub const fn resolved_size(&self) -> Size {
        self.size
    }

    /// Size produced by the bottom-up pass before percentages were applied.
    #[must_use]
    pub const fn intrinsic_size(&self) -> Size {
        self.intrinsic
    }

    /// Child-driven size.
    #[must_use]
    pub const fn content(&self) -> Size {
        self.content
    }

    /// Child-driven size excluding percentage-sized children.
    #[must_use]
    pub const fn static_content(&self) -> Size {
        self.static_content
    }

    /// Resolved border thickness.
    #[must_use]
    pub const fn border(&self) -> Edges {
        self.border
    }

    /// Resolved margin.
    #[must_use]
    pub const fn margin(&self) -> Edges {
        self.margin
    }

    /// Resolved padding.
    #[must_use]
    pub const fn padding(&self) -> Edges {
        self.padding
    }

    /// Border-box size: content plus padding plus border.
    #[must_use]
    pub const fn boundings(&self) -> Size {
        self.size.expand(self.padding).expand(self.border)
    }

    /// Margin-box size.
    #[must_use]
    pub const fn boundings_with_margin(&self) -> Size {
        self.boundings().expand(self.margin)
    }

    /// Axes sized from children.
    #[must_use]
    pub const fn content_dependency(&self) -> Dependency {
        self.content_dependency
    }

    /// Axes and edges that wait on the layout parent.
    #[must_use]
    pub const fn parent_dependency(&self) -> Dependency {
        self.parent_dependency
    }

    /// Children registered for the top-down pass, in id order.
    pub fn dependents(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dependents.iter().copied()
    }

    /// Distance from the border-box top down to the baseline.
    #[must_use]
    pub const fn baseline(&self) -> i32 {
        self.baseline
    }

    /// Line height of the content the baseline came from.
    #[must_use]
    pub const fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Border-box top-left in the layout parent's space.
    #[must_use]
    pub const fn offset(&self) -> Offset {
        self.offset
    }

    /// Local-to-world transform.
    #[must_use]
    pub const fn transform(&self) -> Affine {
        self.transform
    }

    /// Paint and hit-test record.
    #[must_use]
    pub const fn rect(&self) -> &RectRecord {
        &self.rect
    }

    /// Whether the box waits for the next [`Scene::update`](crate::Scene::update).
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }
}
