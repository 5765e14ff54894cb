//! **safepath-core**: shared building blocks for risk-aware grid planning.
//!
//! This crate provides the foundational types used across the *safepath*
//! workspace: geometry primitives, dense per-cell grid storage and the
//! clocks that time-stamp hazard data.

pub mod clock;
pub mod geom;
pub mod grid;

pub use clock::{Clock, ManualClock, SystemClock};
pub use geom::{Point, Range};
pub use grid::Grid;
