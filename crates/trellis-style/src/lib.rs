//! Computed-style contract for the Trellis layout engine.
//!
//! # Scope
//!
//! This crate provides the read-only style view that box layout consumes:
//! - **Units** - pixel / percentage / unset lengths and their resolution
//! - **Edges and sizes** - margin, padding, size, min/max size
//! - **Borders and colors** - eagerly resolved border thickness
//! - **Alignment and stacking** - per-axis alignment flags, stack direction
//! - **Change masks** - [`diff`] between two styles
//!
//! # Not Yet Implemented
//!
//! - Font-relative and viewport-relative units
//! - Per-corner border radii

pub mod alignment;
pub mod border;
pub mod change;
pub mod color;
pub mod computed;
pub mod unit;

pub use alignment::Alignment;
pub use border::{Border, BorderSide};
pub use change::{StyleChange, diff};
pub use color::{Color, ParseColorError};
pub use computed::{BoxSizing, ComputedStyle, StackDirection, Vector2};
pub use unit::{
    Axis, EdgeUnits, ParseUnitError, SizeUnits, Unit, clamp_against_constraints, to_px,
};
