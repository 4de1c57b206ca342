//! Flat rectangle in the XY plane

use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::render::generation::indices::IndexBuilder;
use crate::render::MeshBuffer;

/// Rectangle shape parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleParams {
    /// Width and height
    pub size: Vec2,
    /// UV tiling
    pub uv_scale: Vec2,
    /// UV translation
    pub uv_offset: Vec2,
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self {
            size: Vec2::new(1.0, 1.0),
            uv_scale: Vec2::new(1.0, 1.0),
            uv_offset: Vec2::zeros(),
        }
    }
}

/// Fill `mesh` with a rectangle centered at the origin, facing +Z
pub fn create_rectangle(mesh: &mut MeshBuffer, params: &RectangleParams) {
    let half = params.size.map(|s| s.max(0.0)) * 0.5;
    mesh.reset(4, 6);

    let tangent = Vec4::new(1.0, 0.0, 0.0, 1.0);
    for (i, (u, v)) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)].into_iter().enumerate() {
        let position = Vec3::new((2.0 * u - 1.0) * half.x, (2.0 * v - 1.0) * half.y, 0.0);
        let uv = params.uv_scale.component_mul(&Vec2::new(u, v)) + params.uv_offset;
        mesh.set_vertex(i, position, Vec3::z(), tangent, uv);
    }
    IndexBuilder::new(&mut mesh.indices).quad_strip(0, 0, 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::generation::test_support::{assert_unit_frames, assert_well_formed};
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_layout() {
        let mut mesh = MeshBuffer::new();
        create_rectangle(&mut mesh, &RectangleParams {
            size: Vec2::new(4.0, 2.0),
            ..Default::default()
        });
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 2, 1, 3]);
        assert_relative_eq!(mesh.positions[0], Vec3::new(-2.0, -1.0, 0.0));
        assert_relative_eq!(mesh.positions[3], Vec3::new(2.0, 1.0, 0.0));
        assert_well_formed(&mesh);
        assert_unit_frames(&mesh);

        for [a, b, c] in mesh.triangles() {
            let (a, b, c) = (mesh.positions[a as usize], mesh.positions[b as usize], mesh.positions[c as usize]);
            assert!((b - a).cross(&(c - a)).z > 0.0);
        }
    }
}
