//! Axis-aligned box with unshared faces

use crate::foundation::math::{Vec2, Vec3};
use crate::render::generation::indices::IndexBuilder;
use crate::render::MeshBuffer;

/// Vertices in a box: four per face
pub const BOX_VERTEX_COUNT: usize = 24;
/// Indices in a box: two triangles per face
pub const BOX_INDEX_COUNT: usize = 36;

/// Box shape parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxParams {
    /// Edge lengths
    pub size: Vec3,
    /// UV tiling, applied per face
    pub uv_scale: Vec2,
    /// UV translation
    pub uv_offset: Vec2,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            size: Vec3::new(1.0, 1.0, 1.0),
            uv_scale: Vec2::new(1.0, 1.0),
            uv_offset: Vec2::zeros(),
        }
    }
}

impl BoxParams {
    /// Box with the given edge lengths
    pub fn new(size: Vec3) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

/// Face frames as (normal, right, up); right × up = normal
fn faces() -> [(Vec3, Vec3, Vec3); 6] {
    let (x, y, z) = (Vec3::x(), Vec3::y(), Vec3::z());
    [
        (z, x, y),
        (-z, -x, y),
        (-x, z, y),
        (x, -z, y),
        (y, x, -z),
        (-y, x, z),
    ]
}

/// Fill `mesh` with a box centered at the origin
///
/// Faces are written forward, back, left, right, up, down. Each face lists its
/// corners bottom-left, bottom-right, top-left, top-right as seen from outside.
pub fn create_box(mesh: &mut MeshBuffer, params: &BoxParams) {
    let half = params.size.map(|s| s.max(0.0)) * 0.5;
    mesh.reset(BOX_VERTEX_COUNT, BOX_INDEX_COUNT);

    let corners = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)];
    for (face, (normal, right, up)) in faces().into_iter().enumerate() {
        let tangent = right.push(1.0);
        for (corner, (sx, sy)) in corners.into_iter().enumerate() {
            let position = (normal + right * sx + up * sy).component_mul(&half);
            let uv = params
                .uv_scale
                .component_mul(&Vec2::new(0.5 * (sx + 1.0), 0.5 * (sy + 1.0)))
                + params.uv_offset;
            mesh.set_vertex(4 * face + corner, position, normal, tangent, uv);
        }
    }

    let mut builder = IndexBuilder::new(&mut mesh.indices);
    for face in 0..6 {
        builder.quad_strip(6 * face as usize, 4 * face, 1);
    }
}
