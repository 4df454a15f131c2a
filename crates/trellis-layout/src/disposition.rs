//! Positioning, baselines and transforms.
//!
//! Local space of a box has its origin at the border-box top-left corner
//! with Y growing upward, so everything inside the box sits at negative `y`.

use kurbo::{Affine, Vec2};
use trellis_scene::{NodeId, NodeKind};
use trellis_style::Axis;

use crate::geometry::Offset;
use crate::scene::Scene;
use crate::state::BoxState;

/// How far above the parent's line a child's baseline sits, including the
/// child's top margin.
fn ascent(state: &BoxState) -> i32 {
    state.margin.top as i32 + state.baseline
}

/// Bottom-up counterpart of [`ascent`].
fn intrinsic_ascent(state: &BoxState) -> i32 {
    state.margin_fixed.top as i32 + state.intrinsic_baseline
}

impl Scene {
    /// Place every visible child and refresh this box's baseline.
    ///
    /// Children are walked in stacking order with a cursor that starts
    /// inside the padding. Along the stacking axis a child sits at the cursor
    /// plus its share of the free space. Across it, an explicit alignment
    /// distributes the free cross space; without one, children of a
    /// horizontal stack line up on a shared baseline and children of a
    /// vertical stack sit at the start.
    pub(crate) fn update_disposition(&mut self, id: NodeId) {
        let style = *self.style_of(id);
        let main = style.stack.main_axis();
        let cross = main.cross();
        let state = self.st(id);
        let size = state.size;
        let start_x = state.padding.left.saturating_add(state.border.left);
        let start_y = state.padding.top.saturating_add(state.border.top);

        let children = self.visible_children(id);
        let used_main = children
            .iter()
            .map(|&child| self.st(child).boundings_with_margin().get(main))
            .fold(0u32, u32::saturating_add);
        let free_main = size.get(main).saturating_sub(used_main);
        let max_ascent = if main == Axis::Horizontal {
            children
                .iter()
                .filter(|&&child| !self.style_of(child).alignment.is_explicit(cross))
                .map(|&child| ascent(self.st(child)))
                .max()
                .unwrap_or(0)
        } else {
            0
        };

        let mut cursor = 0u32;
        let mut placements = Vec::with_capacity(children.len());
        for &child in &children {
            let alignment = self.style_of(child).alignment;
            let child_state = self.st(child);
            let outer = child_state.boundings_with_margin();
            let margin = child_state.margin;

            let along = cursor as f32 + free_main as f32 * alignment.fraction(main).unwrap_or(0.0);
            let across = match alignment.fraction(cross) {
                Some(fraction) => size.get(cross).saturating_sub(outer.get(cross)) as f32 * fraction,
                None if main == Axis::Horizontal => (max_ascent - ascent(child_state)) as f32,
                None => 0.0,
            };
            let (dx, dy) = match main {
                Axis::Horizontal => (along, across),
                Axis::Vertical => (across, along),
            };
            let x = start_x as i32 + dx.ceil() as i32 + margin.left as i32;
            let y = start_y as i32 + dy.ceil() as i32 + margin.top as i32;
            placements.push((child, Offset::new(x, -y)));
            cursor = cursor.saturating_add(outer.get(main));
        }

        for (child, offset) in placements {
            self.set_offset(child, offset);
        }
        self.select_baseline_child(id);
        self.update_baseline(id);
    }

    pub(crate) fn set_offset(&mut self, id: NodeId, offset: Offset) {
        if self.st(id).offset != offset {
            self.st_mut(id).offset = offset;
            self.mark_transform_dirty(id);
        }
    }

    /// Pick the child this box takes its baseline from: the inline child
    /// with the greatest ascent in a horizontal stack, the first inline
    /// child in a vertical one.
    fn select_baseline_child(&mut self, id: NodeId) {
        let main = self.style_of(id).stack.main_axis();
        let cross = main.cross();
        let mut best: Option<(NodeId, i32)> = None;
        for child in self.visible_children(id) {
            if self.style_of(child).alignment.is_explicit(cross) {
                continue;
            }
            let candidate = ascent(self.st(child));
            if main == Axis::Vertical {
                best = Some((child, candidate));
                break;
            }
            if best.is_none_or(|(_, ascent)| candidate > ascent) {
                best = Some((child, candidate));
            }
        }
        self.st_mut(id).baseline_child = best.map(|(child, _)| child);
    }

    fn update_baseline(&mut self, id: NodeId) {
        let state = self.st(id);
        let (baseline, line_height) = if self.tree.kind(id) == Some(NodeKind::Leaf) {
            let top = state.border.top.saturating_add(state.padding.top);
            (
                top.saturating_add(state.measured.baseline) as i32,
                state.measured.line_height,
            )
        } else if let Some(child) = state.baseline_child {
            let child_state = self.st(child);
            (-child_state.offset.y + child_state.baseline, child_state.line_height)
        } else {
            (state.boundings().height as i32, 0)
        };
        let state = self.st_mut(id);
        state.baseline = baseline;
        state.line_height = line_height;
    }

    /// Baseline of the box laid out at its bottom-up size, with pixel
    /// paddings only. Mirrors [`Self::update_baseline`] without reading
    /// anything a top-down pass wrote.
    pub(crate) fn update_intrinsic_baseline(&mut self, id: NodeId) {
        let main = self.style_of(id).stack.main_axis();
        let cross = main.cross();
        let state = self.st(id);
        let top = state.border.top.saturating_add(state.padding_fixed.top) as i32;
        let baseline = if self.tree.kind(id) == Some(NodeKind::Leaf) {
            Some(top + state.measured.baseline as i32)
        } else {
            let children = self.visible_children(id);
            match main {
                Axis::Horizontal => children
                    .iter()
                    .filter(|&&child| !self.style_of(child).alignment.is_explicit(cross))
                    .map(|&child| intrinsic_ascent(self.st(child)))
                    .max()
                    .map(|ascent| top + ascent),
                Axis::Vertical => {
                    let heights: Vec<u32> = children
                        .iter()
                        .map(|&child| self.contribution(child).height)
                        .collect();
                    let used = heights.iter().copied().fold(0u32, u32::saturating_add);
                    let free = state.intrinsic.height.saturating_sub(used);
                    children
                        .iter()
                        .position(|&child| !self.style_of(child).alignment.is_explicit(cross))
                        .map(|index| {
                            let child = children[index];
                            let child_state = self.st(child);
                            let fraction = self
                                .style_of(child)
                                .alignment
                                .fraction(main)
                                .unwrap_or(0.0);
                            let before =
                                heights[..index].iter().copied().fold(0u32, u32::saturating_add);
                            let along = before as f32 + free as f32 * fraction;
                            top + along.ceil() as i32
                                + child_state.margin_fixed.top as i32
                                + child_state.intrinsic_baseline
                        })
                }
            }
        };
        let state = self.st(id);
        let baseline = baseline.unwrap_or_else(|| {
            state.intrinsic.expand(state.padding_fixed).expand(state.border).height as i32
        });
        self.st_mut(id).intrinsic_baseline = baseline;
    }

    /// Local transform: the style transform about the pivot, applied after
    /// the disposition offset.
    ///
    /// `position` and `pivot` are given top-down like the rest of the style,
    /// so their Y components flip here. Positive rotation is
    /// counter-clockwise.
    fn local_transform(&self, id: NodeId) -> Affine {
        let style = self.style_of(id);
        let state = self.st(id);
        let bounds = state.boundings();
        let pivot = Vec2::new(
            f64::from(style.pivot.x) * f64::from(bounds.width),
            -f64::from(style.pivot.y) * f64::from(bounds.height),
        );
        let position = Vec2::new(f64::from(style.position.x), -f64::from(style.position.y));
        let offset = Vec2::new(f64::from(state.offset.x), f64::from(state.offset.y));
        Affine::translate(pivot)
            * Affine::translate(position)
            * Affine::rotate(f64::from(style.rotation).to_radians())
            * Affine::translate(-pivot)
            * Affine::translate(offset)
    }

    /// Recompute world transforms of every subtree rooted at a box whose
    /// offset, size or style transform changed.
    pub(crate) fn flush_transforms(&mut self) {
        let queued = std::mem::take(&mut self.transform_queue);
        for id in queued {
            if !self.tree.contains(id) || !self.st(id).transform_dirty {
                continue;
            }
            let mut top = id;
            let mut cursor = id;
            while let Some(parent) = self.tree.layout_parent(cursor) {
                if self.st(parent).transform_dirty {
                    top = parent;
                }
                cursor = parent;
            }
            let parent_world = self
                .tree
                .layout_parent(top)
                .map_or(Affine::IDENTITY, |parent| self.st(parent).transform);

            let mut stack = vec![(top, parent_world)];
            while let Some((node, parent_world)) = stack.pop() {
                let world = parent_world * self.local_transform(node);
                let state = self.st_mut(node);
                state.transform = world;
                state.transform_dirty = false;
                stack.extend(self.tree.effective_children(node).map(|child| (child, world)));
            }
        }
    }
}
