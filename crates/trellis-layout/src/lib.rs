//! Incremental box layout for the Trellis scene graph.
//!
//! # Scope
//!
//! This crate resolves sizes, positions, baselines and transforms of nested
//! stacking boxes:
//! - **Bottom-up sizing** - content-driven sizes, pixel min/max clamping,
//!   border-box sizing
//! - **Percentage dependents** - sizes, margins and paddings that refer to
//!   the layout parent, resolved top-down with a shared stacking budget
//! - **Disposition** - stacking, per-axis alignment, baseline alignment of
//!   inline children
//! - **Incremental updates** - dirty propagation and a coalescing update
//!   queue
//! - **Paint output** - per-box rectangle records, a display list sink, and
//!   hit testing
//!
//! # Usage
//!
//! ```
//! use trellis_layout::{LayoutConfig, Scene, Size};
//! use trellis_style::{ComputedStyle, SizeUnits, StackDirection};
//!
//! let mut scene = Scene::new(LayoutConfig::default());
//! let row = scene.create_box(ComputedStyle {
//!     stack: StackDirection::Horizontal,
//!     ..ComputedStyle::default()
//! });
//! for _ in 0..2 {
//!     let cell = scene.create_box(ComputedStyle {
//!         size: SizeUnits::px(50.0, 20.0),
//!         ..ComputedStyle::default()
//!     });
//!     scene.append_child(row, cell).unwrap();
//! }
//!
//! let _ = scene.update();
//! assert_eq!(scene.resolved_size(row), Some(Size::new(100, 20)));
//! ```
//!
//! # Not Yet Implemented
//!
//! - Wrapping stacks
//! - Line breaking inside text leaves

pub mod config;
pub mod content;
pub mod dependency;
mod disposition;
pub mod geometry;
pub mod paint;
pub mod scene;
mod solver;
pub mod state;

pub use config::LayoutConfig;
pub use content::{
    ApproximateFontMetrics, ContentProvider, FixedContent, FontMetrics, IntrinsicSize,
    TextContent,
};
pub use dependency::{Classification, Dependency, classify};
pub use geometry::{Edges, Offset, Size};
pub use paint::{DisplayList, DrawRect, RectRecord, RenderSink};
pub use scene::{Scene, UpdateReport};
pub use state::BoxState;
pub use trellis_scene::{NodeId, NodeKind, TreeError};
