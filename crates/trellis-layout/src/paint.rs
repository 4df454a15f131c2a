//! Paint records, render sinks and hit testing.
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! Every box keeps a [`RectRecord`] that is refreshed whenever its size or
//! paint style changes. [`Scene::paint`] walks the tree back to front and
//! hands the records of paintable boxes to a [`RenderSink`].

use kurbo::{Affine, Point};
use trellis_scene::NodeId;
use trellis_style::{Border, Color};

use crate::geometry::Size;
use crate::scene::Scene;

/// What the renderer and hit tester need to know about one box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectRecord {
    /// Non-zero only when the box paints something. Derived from the node
    /// id, so it stays stable for the lifetime of the box.
    pub object_id: u32,
    /// Border-box size.
    pub size: Size,
    /// Border description.
    pub border: Border,
    /// Background fill.
    pub background: Option<Color>,
}

impl RectRecord {
    /// Whether a sink ever sees this record.
    #[must_use]
    pub const fn is_paintable(&self) -> bool {
        self.object_id != 0
    }
}

/// One rectangle to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRect {
    /// Box the rectangle belongs to.
    pub node: NodeId,
    /// Size and paint attributes.
    pub record: RectRecord,
    /// Maps the box's local space (origin at the border-box top-left, Y up)
    /// to world space.
    pub transform: Affine,
}

/// Receiver of paint output.
pub trait RenderSink {
    /// Draw one rectangle. Calls arrive back to front.
    fn draw_rect(&mut self, command: DrawRect);
}

/// A sink that keeps every command, in painting order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawRect>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Commands in painting order (back to front).
    #[must_use]
    pub fn commands(&self) -> &[DrawRect] {
        &self.commands
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was painted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderSink for DisplayList {
    fn draw_rect(&mut self, command: DrawRect) {
        self.commands.push(command);
    }
}

impl Scene {
    /// Refresh the paint record of a box.
    pub(crate) fn update_rect(&mut self, id: NodeId) {
        let style = self.style_of(id);
        let object_id = if style.is_paintable() {
            u32::try_from(id.index() + 1).unwrap_or(u32::MAX)
        } else {
            0
        };
        let record = RectRecord {
            object_id,
            size: self.st(id).boundings(),
            border: style.border,
            background: style.background,
        };
        let resized = record.size != self.st(id).rect.size;
        self.st_mut(id).rect = record;
        if resized {
            self.mark_transform_dirty(id);
        }
    }

    /// Visible boxes in painting order: layout roots in creation order, each
    /// followed by its visible subtree in pre-order.
    fn paint_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self
            .tree
            .layout_roots()
            .filter(|&root| !self.is_hidden(root))
            .collect();
        stack.reverse();
        while let Some(id) = stack.pop() {
            order.push(id);
            let mut children = self.visible_children(id);
            children.reverse();
            stack.extend(children);
        }
        order
    }

    /// Emit a [`DrawRect`] for every visible, paintable box, back to front.
    pub fn paint(&self, sink: &mut dyn RenderSink) {
        for id in self.paint_order() {
            let state = self.st(id);
            if state.rect.is_paintable() {
                sink.draw_rect(DrawRect {
                    node: id,
                    record: state.rect,
                    transform: state.transform,
                });
            }
        }
    }

    /// The front-most visible box whose border box contains `point`.
    ///
    /// `point` is in world space: Y grows upward from the top edge of the
    /// layout roots.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.paint_order().into_iter().rev().find(|&id| {
            let state = self.st(id);
            let local = state.transform.inverse() * point;
            let width = f64::from(state.rect.size.width);
            let height = f64::from(state.rect.size.height);
            (0.0..width).contains(&local.x) && local.y <= 0.0 && local.y > -height
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_list_keeps_order() {
        let mut list = DisplayList::new();
        for index in 0..3 {
            list.draw_rect(DrawRect {
                node: NodeId(index),
                record: RectRecord::default(),
                transform: Affine::IDENTITY,
            });
        }
        let nodes: Vec<NodeId> = list.commands().iter().map(|c| c.node).collect();
        assert_eq!(nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
        list.clear();
        assert!(list.is_empty());
    }
}
