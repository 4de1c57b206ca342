//! Tessellated flat grid in the XY plane

use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::render::generation::indices::IndexBuilder;
use crate::render::MeshBuffer;

/// Upper bound on columns and rows
pub const MAX_TILES_PER_SIDE: u32 = 200;

/// Grid parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Overall width and height
    pub size: Vec2,
    /// Tiles along X
    pub columns: u32,
    /// Tiles along Y
    pub rows: u32,
    /// UV tiling across the whole grid
    pub uv_scale: Vec2,
    /// UV translation
    pub uv_offset: Vec2,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            size: Vec2::new(1.0, 1.0),
            columns: 1,
            rows: 1,
            uv_scale: Vec2::new(1.0, 1.0),
            uv_offset: Vec2::zeros(),
        }
    }
}

impl GridParams {
    /// Copy with tile counts moved into their valid range
    pub fn clamped(&self) -> Self {
        Self {
            columns: self.columns.clamp(1, MAX_TILES_PER_SIDE),
            rows: self.rows.clamp(1, MAX_TILES_PER_SIDE),
            ..*self
        }
    }
}

/// Fill `mesh` with a grid centered at the origin, facing +Z
///
/// Vertices are shared between neighbouring tiles and stored row by row from
/// the bottom edge up.
pub fn create_grid(mesh: &mut MeshBuffer, params: &GridParams) {
    let params = params.clamped();
    let (columns, rows) = (params.columns, params.rows);
    let row_length = columns as usize + 1;
    mesh.reset(row_length * (rows as usize + 1), 6 * columns as usize * rows as usize);

    let counts = Vec2::new(columns as f32, rows as f32);
    let tile = params.size.component_div(&counts);
    let texel = params.uv_scale.component_div(&counts);
    let origin = -0.5 * params.size;
    let tangent = Vec4::new(1.0, 0.0, 0.0, 1.0);
    for y in 0..=rows {
        for x in 0..=columns {
            let cell = Vec2::new(x as f32, y as f32);
            let planar = tile.component_mul(&cell) + origin;
            let uv = texel.component_mul(&cell) + params.uv_offset;
            let index = y as usize * row_length + x as usize;
            mesh.set_vertex(index, Vec3::new(planar.x, planar.y, 0.0), Vec3::z(), tangent, uv);
        }
    }

    IndexBuilder::new(&mut mesh.indices).segment(0, 0, rows, columns);
}
