//! sdftext core
//!
//! Shared building blocks for the sdftext crates: logging and profiling setup,
//! math re-exports, small geometry types, GPU-ready colors and allocation helpers.

pub mod alloc;
pub mod color;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
