//! Double-sided elliptic ring sections
//!
//! The inner edge is found by scaling each outer point by `|outer| - width`.
//! For a circle of radius 1 that gives the expected ring width. For other
//! radii and for ellipses the width is only approximate. The formula is kept
//! as-is so existing visuals do not change.

use crate::foundation::math::{normalize_or_zero, Vec2, Vec3};
use crate::render::generation::indices::IndexBuilder;
use crate::render::MeshBuffer;

/// Upper segment bound
pub const MAX_SEGMENTS: u32 = 200;

/// Ring section parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSectionParams {
    /// Outer semi-axes along X and Y
    pub radii: Vec2,
    /// Radial width; equal to the radius for a filled sector
    pub width: f32,
    /// Start angle in degrees, counter-clockwise from +X
    pub start_angle: f32,
    /// End angle in degrees
    pub end_angle: f32,
    /// Angular subdivisions
    pub segments: u32,
}

impl Default for RingSectionParams {
    fn default() -> Self {
        Self {
            radii: Vec2::new(1.0, 1.0),
            width: 1.0,
            start_angle: 0.0,
            end_angle: 360.0,
            segments: 32,
        }
    }
}

impl RingSectionParams {
    /// Copy with segment count and width moved into their valid ranges
    pub fn clamped(&self) -> Self {
        Self {
            width: self.width.max(0.0),
            segments: self.segments.clamp(1, MAX_SEGMENTS),
            ..*self
        }
    }

    /// `4 · (segments + 1)`
    pub fn vertex_count(&self) -> usize {
        4 * (self.segments as usize + 1)
    }

    /// `12 · segments`
    pub fn index_count(&self) -> usize {
        12 * self.segments as usize
    }
}

/// Fill `mesh` with a ring section in the XY plane
///
/// The front side faces +Z and the back side, written second, faces -Z. Both
/// sides share UVs: `u` follows the angle from 0 to 1, `v` is 0 on the outer
/// edge and 1 on the inner edge.
pub fn create_ring_section(mesh: &mut MeshBuffer, params: &RingSectionParams) {
    let params = params.clamped();
    let segments = params.segments;
    let dividers = segments as usize + 1;
    let one_side = 2 * dividers;
    mesh.reset(params.vertex_count(), params.index_count());

    let start = params.start_angle.to_radians();
    let turn = (params.end_angle - params.start_angle).to_radians() / segments as f32;
    for i in 0..dividers {
        let angle = turn * i as f32 + start;
        let (sin, cos) = angle.sin_cos();
        let outer = Vec3::new(params.radii.x * cos, params.radii.y * sin, 0.0);
        let inner = outer * (outer.norm() - params.width);
        let tangent = normalize_or_zero(Vec3::z().cross(&outer));
        let u = i as f32 / segments as f32;
        let outer_uv = Vec2::new(u, 0.0);
        let inner_uv = Vec2::new(u, 1.0);

        mesh.set_vertex(i, outer, Vec3::z(), tangent.push(1.0), outer_uv);
        mesh.set_vertex(i + dividers, inner, Vec3::z(), tangent.push(1.0), inner_uv);

        let back = i + one_side;
        mesh.set_vertex(back, inner, -Vec3::z(), tangent.push(-1.0), inner_uv);
        mesh.set_vertex(back + dividers, outer, -Vec3::z(), tangent.push(-1.0), outer_uv);
    }

    let mut builder = IndexBuilder::new(&mut mesh.indices);
    let out = builder.quad_strip(0, 0, segments);
    builder.quad_strip(out, one_side as u32, segments);
}
