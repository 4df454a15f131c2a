//! JSON scene descriptions.
//!
//! A scene file lists layout roots, each a nested tree of nodes:
//!
//! ```json
//! {
//!   "viewport": { "width": 800, "height": 600 },
//!   "roots": [
//!     {
//!       "name": "row",
//!       "style": { "stack": "horizontal", "padding": { "left": "4px" } },
//!       "children": [
//!         { "name": "label", "content": { "type": "text", "text": "Hello", "font_size": 16 } },
//!         { "name": "icon", "content": { "type": "fixed", "width": 16, "height": 16 } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A node with `content` becomes a leaf, a node with `"slot": true` becomes
//! a slot, anything else is a box.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use trellis_layout::{
    Edges, FixedContent, LayoutConfig, NodeId, NodeKind, Offset, Scene, Size, TextContent,
};
use trellis_style::ComputedStyle;

/// Top level of a scene file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    /// Percentage base for the roots. Overridden by `--viewport`.
    #[serde(default)]
    pub viewport: Option<Size>,
    /// Layout roots in painting order.
    pub roots: Vec<NodeEntry>,
}

/// One node and its children.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeEntry {
    /// Label shown in the output.
    pub name: Option<String>,
    /// Computed style. Ignored for slots.
    pub style: ComputedStyle,
    /// Makes the node a leaf.
    pub content: Option<ContentEntry>,
    /// Makes the node a slot.
    pub slot: bool,
    /// Structural children.
    pub children: Vec<NodeEntry>,
}

/// Leaf content.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentEntry {
    /// A single line of text.
    Text {
        /// The text.
        text: String,
        /// Font size in pixels.
        font_size: f32,
    },
    /// Content of a known size.
    Fixed {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

/// A scene built from a [`SceneFile`].
#[derive(Debug)]
pub struct LoadedScene {
    /// The scene, not yet laid out.
    pub scene: Scene,
    /// Root nodes in file order.
    pub roots: Vec<NodeId>,
    names: HashMap<NodeId, String>,
}

impl SceneFile {
    /// Parse a scene file.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or unknown fields.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid scene description")
    }

    /// Build the scene. `viewport` wins over the file's own viewport.
    ///
    /// # Errors
    ///
    /// Fails if a node is both a slot and a leaf, or if the tree rejects an
    /// attachment (for example children under a leaf).
    pub fn build(&self, viewport: Option<Size>) -> Result<LoadedScene> {
        let mut config = LayoutConfig::default();
        if let Some(viewport) = viewport.or(self.viewport) {
            config.viewport = viewport;
        }
        let mut loaded = LoadedScene {
            scene: Scene::new(config),
            roots: Vec::with_capacity(self.roots.len()),
            names: HashMap::new(),
        };
        for entry in &self.roots {
            let root = loaded.create(entry)?;
            loaded.roots.push(root);
        }
        Ok(loaded)
    }
}

impl LoadedScene {
    fn create(&mut self, entry: &NodeEntry) -> Result<NodeId> {
        let id = match (&entry.content, entry.slot) {
            (Some(_), true) => bail!(
                "node {} cannot be both a slot and a leaf",
                entry.name.as_deref().unwrap_or("<unnamed>")
            ),
            (Some(ContentEntry::Text { text, font_size }), false) => self
                .scene
                .create_leaf(entry.style, TextContent::new(text.clone(), *font_size)),
            (Some(ContentEntry::Fixed { width, height }), false) => self
                .scene
                .create_leaf(entry.style, FixedContent::new(*width, *height)),
            (None, true) => self.scene.create_slot(),
            (None, false) => self.scene.create_box(entry.style),
        };
        if let Some(name) = &entry.name {
            let _ = self.names.insert(id, name.clone());
        }
        for child_entry in &entry.children {
            let child = self.create(child_entry)?;
            self.scene.append_child(id, child).with_context(|| {
                format!("cannot attach {} under {}", self.label(child), self.label(id))
            })?;
        }
        Ok(id)
    }

    /// Display name of a node: its `name`, or its id.
    #[must_use]
    pub fn label(&self, id: NodeId) -> String {
        self.names.get(&id).map_or_else(|| id.to_string(), Clone::clone)
    }

    /// Resolved geometry of every root, following the layout tree (slots
    /// are transparent).
    #[must_use]
    pub fn snapshot(&self) -> Vec<BoxSnapshot> {
        self.roots
            .iter()
            .filter_map(|&root| self.snapshot_box(root))
            .collect()
    }

    fn snapshot_box(&self, id: NodeId) -> Option<BoxSnapshot> {
        let layout = self.scene.layout(id)?;
        let origin = layout.transform() * Point::ORIGIN;
        Some(BoxSnapshot {
            id: id.index(),
            name: self.names.get(&id).cloned(),
            leaf: self.scene.tree().kind(id) == Some(NodeKind::Leaf),
            hidden: self.scene.style(id).is_some_and(|style| style.hidden),
            size: layout.resolved_size(),
            boundings: layout.boundings(),
            offset: layout.offset(),
            margin: layout.margin(),
            padding: layout.padding(),
            baseline: layout.baseline(),
            line_height: layout.line_height(),
            world_origin: [origin.x, origin.y],
            children: self
                .scene
                .tree()
                .effective_children(id)
                .filter_map(|child| self.snapshot_box(child))
                .collect(),
        })
    }
}

/// Resolved geometry of one box, as printed by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSnapshot {
    /// Node index.
    pub id: usize,
    /// Name from the scene file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the node is a leaf.
    pub leaf: bool,
    /// Hidden boxes keep their last layout but take no space.
    pub hidden: bool,
    /// Content-box size.
    pub size: Size,
    /// Border-box size.
    pub boundings: Size,
    /// Border-box top-left in the parent's space (Y up).
    pub offset: Offset,
    /// Resolved margin.
    pub margin: Edges,
    /// Resolved padding.
    pub padding: Edges,
    /// Distance from the border-box top to the baseline.
    pub baseline: i32,
    /// Line height the baseline belongs to.
    pub line_height: u32,
    /// Border-box top-left in world space.
    pub world_origin: [f64; 2],
    /// Children in stacking order.
    pub children: Vec<Self>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"{
        "roots": [{
            "name": "row",
            "style": { "stack": "horizontal", "size": { "width": "200px" } },
            "children": [
                { "name": "label", "content": { "type": "text", "text": "ab", "font_size": 10 } },
                { "name": "fill", "style": { "size": { "width": "50%" } } },
                { "slot": true, "children": [
                    { "name": "icon", "content": { "type": "fixed", "width": 16, "height": 24 } }
                ] }
            ]
        }]
    }"#;

    #[test]
    fn test_build_and_snapshot() {
        let file = SceneFile::parse(ROW).unwrap();
        let mut loaded = file.build(None).unwrap();
        let _ = loaded.scene.update();

        let snapshot = loaded.snapshot();
        assert_eq!(snapshot.len(), 1);
        let row = &snapshot[0];
        assert_eq!(row.name.as_deref(), Some("row"));
        assert_eq!(row.size, Size::new(200, 27));

        let names: Vec<Option<&str>> = row.children.iter().map(|c| c.name.as_deref()).collect();
        assert_eq!(names, vec![Some("label"), Some("fill"), Some("icon")]);
        assert_eq!(row.children[1].size.width, 100);
        assert!(row.children[2].leaf);
    }

    #[test]
    fn test_viewport_override() {
        let file = SceneFile::parse(
            r#"{ "viewport": { "width": 100, "height": 100 },
                 "roots": [{ "style": { "size": { "width": "50%" } } }] }"#,
        )
        .unwrap();

        let mut from_file = file.build(None).unwrap();
        let _ = from_file.scene.update();
        assert_eq!(from_file.snapshot()[0].size.width, 50);

        let mut overridden = file.build(Some(Size::new(400, 100))).unwrap();
        let _ = overridden.scene.update();
        assert_eq!(overridden.snapshot()[0].size.width, 200);
    }

    #[test]
    fn test_leaf_with_children_is_rejected() {
        let file = SceneFile::parse(
            r#"{ "roots": [{
                "content": { "type": "fixed", "width": 1, "height": 1 },
                "children": [{}]
            }] }"#,
        )
        .unwrap();
        assert!(file.build(None).is_err());
    }

    #[test]
    fn test_demo_scene_loads() {
        let file = SceneFile::parse(include_str!("../../demos/scene.json")).unwrap();
        let mut loaded = file.build(None).unwrap();
        let report = loaded.scene.update();

        assert_eq!(report.resized_roots, loaded.roots);
        let snapshot = loaded.snapshot();
        assert_eq!(snapshot[0].size.width, 800);
        assert_eq!(snapshot[1].children[0].size, Size::new(80, 20));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(SceneFile::parse(r#"{ "roots": [], "colour": "red" }"#).is_err());
    }
}
