//! The box solver.
//!
//! One update of a box runs, in order:
//!
//! 1. **Bottom-up** (`calculate_layout`): update dirty children
//!    first, accumulate their sizes along and across the stacking axis, and
//!    resolve this box's own size from its constraints and that content.
//! 2. **Top-down** (`calculate_pending_layouts`): once this box's
//!    size is final, resolve the percentage sizes, margins and paddings of
//!    the children registered as its dependents.
//! 3. **Disposition** and the paint record.
//!
//! A box whose own size waits on its parent skips step 2; the parent's
//! top-down pass runs it once the percentages have a base.

use strum::IntoEnumIterator;
use tracing::trace;
use trellis_scene::{NodeId, NodeKind};
use trellis_style::{Axis, BoxSizing, ComputedStyle, clamp_against_constraints, to_px};

use crate::dependency::{Dependency, classify};
use crate::geometry::{Edges, Offset, Size};
use crate::scene::{Scene, UpdateReport};

/// Cross-axis extent of a stack.
///
/// Explicitly aligned children only need their own extent. Inline children
/// of a horizontal stack share a baseline, so the line is as tall as the
/// largest ascent plus the largest descent.
#[derive(Debug, Clone, Copy, Default)]
struct CrossExtent {
    aligned: u32,
    ascent: u32,
    descent: u32,
}

impl CrossExtent {
    fn add_aligned(&mut self, extent: u32) {
        self.aligned = self.aligned.max(extent);
    }

    fn add_inline(&mut self, ascent: u32, descent: u32) {
        self.ascent = self.ascent.max(ascent);
        self.descent = self.descent.max(descent);
    }

    fn total(self) -> u32 {
        self.aligned.max(self.ascent.saturating_add(self.descent))
    }
}

fn along(main: Axis, main_value: u32, cross_value: u32) -> Size {
    match main {
        Axis::Horizontal => Size::new(main_value, cross_value),
        Axis::Vertical => Size::new(cross_value, main_value),
    }
}

/// Convert a constraint to a content-box size.
fn specified(value: f32, box_sizing: BoxSizing, border: u32) -> u32 {
    let px = to_px(value);
    match box_sizing {
        BoxSizing::Content => px,
        BoxSizing::Border => px.saturating_sub(border),
    }
}

/// Bottom-up size on one axis: explicit pixel size, else content clamped
/// against pixel bounds, else raw content.
fn resolve_bottom_up(style: &ComputedStyle, axis: Axis, content: u32, border: u32) -> u32 {
    if let Some(px) = style.size.get(axis).pixel() {
        return specified(px, style.box_sizing, border);
    }
    let min = style.min_size.get(axis).pixel();
    let max = style.max_size.get(axis).pixel();
    if min.is_none() && max.is_none() {
        return content;
    }
    let outer = match style.box_sizing {
        BoxSizing::Content => content,
        BoxSizing::Border => content.saturating_add(border),
    };
    let clamped = to_px(clamp_against_constraints(outer as f32, min, max));
    if clamped == outer {
        content
    } else {
        specified(clamped as f32, style.box_sizing, border)
    }
}

/// Values a parent reads from a child. When any of them moves, the parent
/// has to run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Footprint {
    size: Size,
    intrinsic: Size,
    margin: Edges,
    padding: Edges,
    baseline: i32,
    intrinsic_baseline: i32,
}

impl Scene {
    /// Classify dependencies from the current style, refresh eagerly
    /// resolved edges, and (de)register with the layout parent.
    ///
    /// Always ends by requesting an update of the box.
    pub(crate) fn update_state(&mut self, id: NodeId) {
        if self.tree.kind(id) == Some(NodeKind::Slot) {
            return;
        }
        let style = *self.style_of(id);
        let class = classify(&style);
        let state = self.st_mut(id);
        state.content_dependency = class.content;
        state.parent_dependency = class.parent;
        state.border = Edges::from_border(&style.border);
        state.margin_fixed = Edges::resolve(&style.margin, None);
        state.padding_fixed = Edges::resolve(&style.padding, None);
        if !class.parent.contains(Dependency::MARGIN) {
            state.margin = state.margin_fixed;
        }
        if !class.parent.contains(Dependency::PADDING) {
            state.padding = state.padding_fixed;
        }

        if let Some(parent) = self.tree.layout_parent(id) {
            let dependents = &mut self.st_mut(parent).dependents;
            if class.parent.is_empty() {
                let _ = dependents.remove(&id);
            } else {
                let _ = dependents.insert(id);
            }
        }
        self.request_update(id, true);
    }

    /// Fully update one dirty box and its dirty descendants.
    pub(crate) fn update_box(&mut self, id: NodeId, report: &mut UpdateReport) {
        if !self.st(id).dirty {
            return;
        }
        #[cfg(feature = "layout-trace")]
        let _span = tracing::trace_span!("update_box", node = %id).entered();

        let before = self.footprint(id);
        self.calculate_layout(id, report);

        let parent = self.tree.layout_parent(id);
        let dependency = self.st(id).parent_dependency;
        match parent {
            None => {
                if !dependency.is_empty() {
                    let viewport = self.config.viewport;
                    let mut available = viewport.get(Axis::Vertical);
                    let _ = self.resolve_dependent(id, viewport, Axis::Vertical, &mut available);
                }
                self.calculate_pending_layouts(id);
                self.set_offset(id, Offset::default());
            }
            Some(_) if dependency.is_empty() => self.calculate_pending_layouts(id),
            Some(_) => self.st_mut(id).needs_pending = true,
        }
        self.update_disposition(id);
        self.update_rect(id);
        self.st_mut(id).dirty = false;
        report.updated += 1;

        let after = self.footprint(id);
        trace!(
            node = %id,
            width = after.size.width,
            height = after.size.height,
            baseline = after.baseline,
            "box updated"
        );
        if before == after {
            return;
        }
        match parent {
            Some(parent) => self.request_update(parent, true),
            None if before.size != after.size => report.resized_roots.push(id),
            None => {}
        }
    }

    fn footprint(&self, id: NodeId) -> Footprint {
        let state = self.st(id);
        Footprint {
            size: state.size,
            intrinsic: state.intrinsic,
            margin: state.margin,
            padding: state.padding,
            baseline: state.baseline,
            intrinsic_baseline: state.intrinsic_baseline,
        }
    }

    /// Bottom-up pass.
    ///
    /// Children contribute their intrinsic size on axes where they are
    /// parent-dependent, only the pixel part of their margins and paddings,
    /// and their intrinsic baseline. Nothing here reads a value written by
    /// a top-down pass.
    pub(crate) fn calculate_layout(&mut self, id: NodeId, report: &mut UpdateReport) {
        let style = *self.style_of(id);
        let main = style.stack.main_axis();
        let cross = main.cross();

        let (content, static_content) = if self.tree.kind(id) == Some(NodeKind::Leaf) {
            let measured = self.measure_leaf(id);
            (measured, measured)
        } else {
            let mut content_main = 0u32;
            let mut static_main = 0u32;
            let mut cross_all = CrossExtent::default();
            let mut cross_static = CrossExtent::default();

            for child in self.visible_children(id) {
                self.update_box(child, report);
                let inline = main == Axis::Horizontal
                    && !self.style_of(child).alignment.is_explicit(cross);
                let state = self.st(child);
                let extent = self.contribution(child);
                let dependency = state.parent_dependency;

                content_main = content_main.saturating_add(extent.get(main));
                if !dependency.on(main) {
                    static_main = static_main.saturating_add(extent.get(main));
                }

                let add = |target: &mut CrossExtent| {
                    if inline {
                        let ascent = state.margin_fixed.top as i32 + state.intrinsic_baseline;
                        let ascent = u32::try_from(ascent).unwrap_or(0).min(extent.height);
                        target.add_inline(ascent, extent.height - ascent);
                    } else {
                        target.add_aligned(extent.get(cross));
                    }
                };
                add(&mut cross_all);
                if !dependency.on(cross) {
                    add(&mut cross_static);
                }
            }
            let content = along(main, content_main, cross_all.total());
            let static_content = along(main, static_main, cross_static.total());
            (self.fold_pending_margins(id, content), static_content)
        };

        let border = self.st(id).border;
        let mut intrinsic = Size::ZERO;
        for axis in Axis::iter() {
            let value = resolve_bottom_up(&style, axis, content.get(axis), border.sum(axis));
            intrinsic.set(axis, value);
        }

        let state = self.st_mut(id);
        state.content = content;
        state.static_content = static_content;
        state.intrinsic = intrinsic;
        for axis in Axis::iter() {
            if !state.parent_dependency.on(axis) {
                state.size.set(axis, intrinsic.get(axis));
            }
        }
        self.update_intrinsic_baseline(id);
    }

    /// Margin-box size a child adds to its parent's content.
    pub(crate) fn contribution(&self, child: NodeId) -> Size {
        let state = self.st(child);
        let mut size = state.size;
        for axis in Axis::iter() {
            if state.parent_dependency.on(axis) {
                size.set(axis, state.intrinsic.get(axis));
            }
        }
        size.expand(state.padding_fixed)
            .expand(state.border)
            .expand(state.margin_fixed)
    }

    /// On content-dependent axes, add the percentage margins of dependents,
    /// resolved against the content gathered so far.
    fn fold_pending_margins(&self, id: NodeId, content: Size) -> Size {
        let state = self.st(id);
        let main = self.style_of(id).stack.main_axis();
        let mut folded = content;
        for axis in Axis::iter() {
            if !state.content_dependency.on(axis) {
                continue;
            }
            for &dependent in &state.dependents {
                let margin = &self.style_of(dependent).margin;
                if self.is_hidden(dependent) || !margin.has_percentage_on(axis) {
                    continue;
                }
                let dependent_state = self.st(dependent);
                let pending = Edges::resolve(margin, Some(content))
                    .sum(axis)
                    .saturating_sub(dependent_state.margin_fixed.sum(axis));
                let value = if axis == main {
                    folded.get(axis).saturating_add(pending)
                } else {
                    let outer = self.contribution(dependent).get(axis);
                    folded.get(axis).max(outer.saturating_add(pending))
                };
                folded.set(axis, value);
            }
        }
        folded
    }

    fn measure_leaf(&mut self, id: NodeId) -> Size {
        let data = &mut self.nodes[id.index()];
        if data.state.content_dirty {
            if let Some(provider) = data.provider.as_mut() {
                data.state.measured = provider.measure();
            }
            data.state.content_dirty = false;
        }
        data.state.measured.size
    }

    /// Top-down pass over the dependents of a box whose size is final.
    ///
    /// Sizes along the stacking axis share one budget, the box's size minus
    /// its static content, handed out greedily in child order. Across the
    /// stacking axis every dependent gets at least its intrinsic size.
    pub(crate) fn calculate_pending_layouts(&mut self, id: NodeId) {
        if self.st(id).dependents.is_empty() {
            self.st_mut(id).needs_pending = false;
            return;
        }
        let state = self.st(id);
        let base = state.size;
        let main = self.style_of(id).stack.main_axis();
        let mut available = base.get(main).saturating_sub(state.static_content.get(main));
        let dependents: Vec<NodeId> = self
            .visible_children(id)
            .into_iter()
            .filter(|child| state.dependents.contains(child))
            .collect();

        for dependent in dependents {
            debug_assert_eq!(self.tree.layout_parent(dependent), Some(id));
            debug_assert!(!self.st(dependent).parent_dependency.is_empty());
            let changed = self.resolve_dependent(dependent, base, main, &mut available);
            if changed || self.st(dependent).needs_pending {
                self.calculate_pending_layouts(dependent);
                self.update_disposition(dependent);
                self.update_rect(dependent);
            }
        }
        self.st_mut(id).needs_pending = false;
    }

    /// Resolve one dependent against its parent's final size `base`.
    ///
    /// Returns whether its size or padding changed.
    pub(crate) fn resolve_dependent(
        &mut self,
        id: NodeId,
        base: Size,
        main: Axis,
        available: &mut u32,
    ) -> bool {
        let style = *self.style_of(id);
        let state = self.st_mut(id);
        let (old_size, old_padding) = (state.size, state.padding);
        let dependency = state.parent_dependency;

        if dependency.contains(Dependency::PADDING) {
            state.padding = Edges::resolve(&style.padding, Some(base));
        }
        if dependency.contains(Dependency::MARGIN) {
            state.margin = Edges::resolve(&style.margin, Some(base));
        }

        for axis in Axis::iter() {
            if !dependency.on(axis) {
                continue;
            }
            let total = base.get(axis) as f32;
            let border = state.border.sum(axis);
            let intrinsic = state.intrinsic.get(axis);
            let outer = match style.box_sizing {
                BoxSizing::Content => intrinsic,
                BoxSizing::Border => intrinsic.saturating_add(border),
            };
            let preferred = style
                .size
                .get(axis)
                .resolve(total)
                .unwrap_or(outer as f32);
            let clamped = clamp_against_constraints(
                preferred,
                style.min_size.get(axis).resolve(total),
                style.max_size.get(axis).resolve(total),
            );
            let mut value = specified(clamped, style.box_sizing, border);

            if axis == main {
                let extents = border
                    .saturating_add(state.padding.sum(axis))
                    .saturating_add(state.margin.sum(axis));
                value = value.min(available.saturating_sub(extents));
                *available = available.saturating_sub(value.saturating_add(extents));
            } else {
                value = value.max(intrinsic);
            }
            state.size.set(axis, value);
        }

        if !dependency.on(main) {
            let resolved = state.margin.sum(main).saturating_add(state.padding.sum(main));
            let counted = state
                .margin_fixed
                .sum(main)
                .saturating_add(state.padding_fixed.sum(main));
            *available = available.saturating_sub(resolved.saturating_sub(counted));
        }

        state.size != old_size || state.padding != old_padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_style::{SizeUnits, Unit};

    fn style_with(size: SizeUnits, box_sizing: BoxSizing) -> ComputedStyle {
        ComputedStyle {
            size,
            box_sizing,
            ..ComputedStyle::default()
        }
    }

    #[test]
    fn test_bottom_up_prefers_explicit_pixels() {
        let style = style_with(SizeUnits::px(40.0, 10.0), BoxSizing::Content);
        assert_eq!(resolve_bottom_up(&style, Axis::Horizontal, 99, 0), 40);
    }

    #[test]
    fn test_bottom_up_border_box_never_negative() {
        let style = style_with(SizeUnits::px(4.0, 4.0), BoxSizing::Border);
        assert_eq!(resolve_bottom_up(&style, Axis::Horizontal, 0, 10), 0);
    }

    #[test]
    fn test_bottom_up_clamps_only_violated_bound() {
        let style = ComputedStyle {
            min_size: SizeUnits {
                width: Unit::Pixel(30.0),
                height: Unit::Unset,
            },
            max_size: SizeUnits {
                width: Unit::Pixel(60.0),
                height: Unit::Unset,
            },
            ..ComputedStyle::default()
        };
        assert_eq!(resolve_bottom_up(&style, Axis::Horizontal, 10, 0), 30);
        assert_eq!(resolve_bottom_up(&style, Axis::Horizontal, 45, 0), 45);
        assert_eq!(resolve_bottom_up(&style, Axis::Horizontal, 90, 0), 60);
    }

    #[test]
    fn test_bottom_up_border_box_bounds_include_border() {
        let style = ComputedStyle {
            min_size: SizeUnits {
                width: Unit::Pixel(30.0),
                height: Unit::Unset,
            },
            box_sizing: BoxSizing::Border,
            ..ComputedStyle::default()
        };
        // 20 content + 4 border = 24 < 30, so the border box grows to 30.
        assert_eq!(resolve_bottom_up(&style, Axis::Horizontal, 20, 4), 26);
        assert_eq!(resolve_bottom_up(&style, Axis::Horizontal, 28, 4), 28);
    }

    #[test]
    fn test_line_model_cross_extent() {
        let mut extent = CrossExtent::default();
        extent.add_inline(10, 2);
        extent.add_inline(4, 6);
        extent.add_aligned(15);
        assert_eq!(extent.total(), 16);
    }
}
