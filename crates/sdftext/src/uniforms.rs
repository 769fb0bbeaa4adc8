//! Per-frame shader parameters for distance field text.

use bytemuck::{Pod, Zeroable};
use static_assertions::assert_eq_size;

use sdftext_core::math::{Affine2, average_axis_scale};
use sdftext_core::profiling::profile_function;

use crate::effects::SdfEffects;

/// Distance threshold shift applied for synthetic bold.
pub const FAKE_BOLD_AMOUNT: f32 = 0.04;

/// Uniform block consumed by the SDF text shader.
///
/// Laid out for direct upload as a 16-byte aligned uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SdfUniforms {
    pub outline_color: [f32; 4],
    pub shadow_color: [f32; 4],
    pub shadow_offset: [f32; 2],
    /// Screen-space width of one distance field unit, for antialiasing.
    pub f_width: f32,
    pub outline_distance: f32,
    pub fake_bold: f32,
    pub _padding: [f32; 3],
}

assert_eq_size!(SdfUniforms, [f32; 16]);

impl SdfUniforms {
    /// Compute the uniforms for one frame.
    ///
    /// `font_scale` is the requested font size over the font's native size
    /// and `resolution` the render target's pixel ratio.
    pub fn compute(
        effects: &SdfEffects,
        world_transform: &Affine2,
        distance_field_range: f32,
        font_scale: f32,
        resolution: f32,
    ) -> Self {
        profile_function!();
        let world_scale = average_axis_scale(world_transform);
        let tint = effects.tint.to_array();

        Self {
            outline_color: if effects.has_outline() {
                effects.outline_color.to_array()
            } else {
                tint
            },
            shadow_color: if effects.has_shadow() {
                effects.shadow_color.to_array()
            } else {
                tint
            },
            shadow_offset: (-effects.shadow_offset).to_array(),
            f_width: world_scale * distance_field_range * font_scale * resolution,
            outline_distance: (1.0 - effects.outline_size) * 0.5,
            fake_bold: if effects.fake_bold { FAKE_BOLD_AMOUNT } else { 0.0 },
            _padding: [0.0; 3],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
