//! Math types used across the sdftext crates.
//!
//! Everything is re-exported from [`glam`]. Layout works in `f32` with
//! [`Vec2`] positions; host transforms are 2D affine matrices ([`Affine2`]).
//!
//! ```
//! use sdftext_core::math::{Affine2, Vec2};
//!
//! let transform = Affine2::from_scale(Vec2::splat(2.0));
//! assert_eq!(transform.transform_point2(Vec2::ONE), Vec2::new(2.0, 2.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::*;

/// Average length of the two basis vectors of `transform`.
///
/// Exact for uniform scale combined with rotation, an approximation under
/// anisotropic scale.
#[inline]
pub fn average_axis_scale(transform: &Affine2) -> f32 {
    let dx = transform.matrix2.x_axis.length();
    let dy = transform.matrix2.y_axis.length();
    (dx.abs() + dy.abs()) / 2.0
}
