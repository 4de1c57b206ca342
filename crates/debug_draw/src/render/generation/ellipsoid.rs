//! Ellipsoid and sphere generation
//!
//! The surface is a unit sphere in latitude/longitude form stretched by three
//! radii. Each pole is fanned out into `meridians` coincident vertices so every
//! fan triangle gets its own UV, and each latitude ring repeats its first column
//! as a seam so `u` can run from 0 to 1.
//!
//! [`LatitudeBands`] holds the ring routines so the capsule generator can build
//! its hemispheres from a subset of rows.

use crate::foundation::math::{normalize_or_zero, Vec2, Vec3, Vec4};
use crate::render::generation::indices::IndexBuilder;
use crate::render::MeshBuffer;
use std::f32::consts::{PI, TAU};
use std::ops::RangeInclusive;

/// Fewest meridians that still enclose a volume
pub const MIN_MERIDIANS: u32 = 3;
/// Upper meridian bound
pub const MAX_MERIDIANS: u32 = 200;
/// Fewest interior latitude rings
pub const MIN_PARALLELS: u32 = 1;
/// Upper parallel bound
pub const MAX_PARALLELS: u32 = 200;

/// Ellipsoid shape parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidParams {
    /// Semi-axis lengths along X, Y and Z
    pub radii: Vec3,
    /// Longitude divisions
    pub meridians: u32,
    /// Interior latitude rings, poles excluded
    pub parallels: u32,
    /// UV tiling
    pub uv_scale: Vec2,
    /// UV translation
    pub uv_offset: Vec2,
}

impl Default for EllipsoidParams {
    fn default() -> Self {
        Self {
            radii: Vec3::new(1.0, 1.0, 1.0),
            meridians: 32,
            parallels: 15,
            uv_scale: Vec2::new(1.0, 1.0),
            uv_offset: Vec2::zeros(),
        }
    }
}

impl EllipsoidParams {
    /// Ellipsoid with the given radii and tessellation
    pub fn new(radii: Vec3, meridians: u32, parallels: u32) -> Self {
        Self {
            radii,
            meridians,
            parallels,
            ..Default::default()
        }
    }

    /// Sphere of the given radius with default tessellation
    pub fn sphere(radius: f32) -> Self {
        Self {
            radii: Vec3::new(radius, radius, radius),
            ..Default::default()
        }
    }

    /// Copy with counts and radii moved into their valid ranges
    pub fn clamped(&self) -> Self {
        Self {
            radii: self.radii.map(|r| r.max(0.0)),
            meridians: self.meridians.clamp(MIN_MERIDIANS, MAX_MERIDIANS),
            parallels: self.parallels.clamp(MIN_PARALLELS, MAX_PARALLELS),
            ..*self
        }
    }

    /// Vertices emitted for already-clamped counts: `(m+1)·p + 2m`
    pub fn vertex_count(&self) -> usize {
        let (m, p) = (self.meridians as usize, self.parallels as usize);
        (m + 1) * p + 2 * m
    }

    /// Indices emitted for already-clamped counts: `6·m·p`
    pub fn index_count(&self) -> usize {
        6 * self.meridians as usize * self.parallels as usize
    }
}

/// Ring layout of a pole-to-pole latitude parameterization
///
/// Row `r` sits at polar angle `θ = r / bands · π`, so row 0 and row `bands`
/// are the poles and rows in between are the seamed rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatitudeBands {
    /// Center of the (possibly partial) ellipsoid
    pub center: Vec3,
    /// Semi-axis lengths
    pub radii: Vec3,
    /// Longitude divisions
    pub meridians: u32,
    /// Latitude bands from pole to pole
    pub bands: u32,
    /// UV step per meridian and per band
    pub texel: Vec2,
    /// UV translation
    pub uv_offset: Vec2,
}

impl LatitudeBands {
    /// Tangent along increasing longitude at angle `phi`
    fn longitude_tangent(phi: f32) -> Vec4 {
        Vec4::new(-phi.sin(), 0.0, phi.cos(), -1.0)
    }

    fn fan_angle(&self, j: u32) -> (f32, f32) {
        let column = j as f32 + 0.5;
        (column, column / self.meridians as f32 * TAU)
    }

    /// Write the top pole fan at `out_base`; returns the next vertex slot
    pub fn add_top_pole(&self, mesh: &mut MeshBuffer, out_base: usize) -> usize {
        let position = self.center + Vec3::new(0.0, self.radii.y, 0.0);
        for j in 0..self.meridians {
            let (column, phi) = self.fan_angle(j);
            let uv = self.texel.component_mul(&Vec2::new(column, self.bands as f32)) + self.uv_offset;
            mesh.set_vertex(out_base + j as usize, position, Vec3::y(), Self::longitude_tangent(phi), uv);
        }
        out_base + self.meridians as usize
    }

    /// Write the bottom pole fan at `out_base`; returns the next vertex slot
    pub fn add_bottom_pole(&self, mesh: &mut MeshBuffer, out_base: usize) -> usize {
        let position = self.center - Vec3::new(0.0, self.radii.y, 0.0);
        for j in 0..self.meridians {
            let (column, phi) = self.fan_angle(j);
            let uv = self.texel.component_mul(&Vec2::new(column, 0.0)) + self.uv_offset;
            mesh.set_vertex(out_base + j as usize, position, -Vec3::y(), Self::longitude_tangent(phi), uv);
        }
        out_base + self.meridians as usize
    }

    /// Write the seamed rings for `rows` at `out_base`; returns the next vertex slot
    pub fn add_rows(&self, mesh: &mut MeshBuffer, out_base: usize, rows: RangeInclusive<u32>) -> usize {
        let columns = self.meridians as usize + 1;
        let first_row = *rows.start();
        let mut next = out_base;
        for row in rows {
            let theta = row as f32 / self.bands as f32 * PI;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let ring_base = out_base + (row - first_row) as usize * columns;
            for j in 0..=self.meridians {
                let phi = j as f32 / self.meridians as f32 * TAU;
                let (sin_phi, cos_phi) = phi.sin_cos();
                let direction = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
                let position = self.center + self.radii.component_mul(&direction);
                let tangent = normalize_or_zero(direction.cross(&Vec3::y()));
                let uv = self
                    .texel
                    .component_mul(&Vec2::new(j as f32, (self.bands - row) as f32))
                    + self.uv_offset;
                mesh.set_vertex(ring_base + j as usize, position, direction, tangent.push(-1.0), uv);
            }
            next = ring_base + columns;
        }
        next
    }
}

/// Fill `mesh` with an ellipsoid centered at the origin
pub fn create_ellipsoid(mesh: &mut MeshBuffer, params: &EllipsoidParams) {
    let params = params.clamped();
    let m = params.meridians;
    let p = params.parallels;
    let bands = p + 1;
    mesh.reset(params.vertex_count(), params.index_count());

    let layout = LatitudeBands {
        center: Vec3::zeros(),
        radii: params.radii,
        meridians: m,
        bands,
        texel: params.uv_scale.component_div(&Vec2::new(m as f32, bands as f32)),
        uv_offset: params.uv_offset,
    };
    let mut vertex = layout.add_top_pole(mesh, 0);
    vertex = layout.add_rows(mesh, vertex, 1..=p);
    let vertex_end = layout.add_bottom_pole(mesh, vertex);
    debug_assert_eq!(vertex_end, mesh.vertex_count());

    let mut builder = IndexBuilder::new(&mut mesh.indices);
    let mut out = builder.sawtooth_up(0, 0, m);
    out = builder.segment(out, m, p - 1, m);
    let out_end = builder.sawtooth_down(out, m + (m + 1) * (p - 1), m);
    debug_assert_eq!(out_end, mesh.indices.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::generation::test_support::{assert_outward_winding, assert_unit_frames, assert_well_formed};
    use approx::assert_relative_eq;

    fn generate(params: &EllipsoidParams) -> MeshBuffer {
        let mut mesh = MeshBuffer::new();
        create_ellipsoid(&mut mesh, params);
        mesh
    }

    #[test]
    fn test_counts_match_formula() {
        for (m, p) in [(3, 1), (4, 2), (8, 5), (32, 15), (17, 40)] {
            let mesh = generate(&EllipsoidParams::new(Vec3::new(1.0, 2.0, 3.0), m, p));
            let (mu, pu) = (m as usize, p as usize);
            assert_eq!(mesh.vertex_count(), (mu + 1) * pu + 2 * mu, "m={m} p={p}");
            assert_eq!(mesh.indices.len(), 6 * mu * pu, "m={m} p={p}");
            assert_well_formed(&mesh);
        }
    }

    #[test]
    fn test_triangular_tegum() {
        let mesh = generate(&EllipsoidParams::new(Vec3::new(1.0, 2.0, 1.0), 3, 1));
        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.indices.len(), 18);
        assert_relative_eq!(mesh.positions[0], Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(mesh.positions[9], Vec3::new(0.0, -2.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_out_of_range_counts_are_clamped() {
        let mesh = generate(&EllipsoidParams::new(Vec3::new(1.0, 1.0, 1.0), 0, 0));
        assert_eq!(mesh.vertex_count(), 10);

        let clamped = EllipsoidParams::new(Vec3::new(-1.0, 1.0, 1.0), 1000, 1000).clamped();
        assert_eq!(clamped.meridians, MAX_MERIDIANS);
        assert_eq!(clamped.parallels, MAX_PARALLELS);
        assert_eq!(clamped.radii.x, 0.0);
    }

    #[test]
    fn test_unit_radii_give_true_sphere() {
        let mesh = generate(&EllipsoidParams::new(Vec3::new(1.0, 1.0, 1.0), 12, 7));
        for position in &mesh.positions {
            assert_relative_eq!(position.norm(), 1.0, epsilon = 1e-5);
        }
        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            assert_relative_eq!(*position, *normal, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_normals_come_from_unit_sphere() {
        let radii = Vec3::new(3.0, 1.0, 0.5);
        let mesh = generate(&EllipsoidParams::new(radii, 8, 4));
        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            assert_relative_eq!(*position, radii.component_mul(normal), epsilon = 1e-5);
        }
        assert_unit_frames(&mesh);
    }

    #[test]
    fn test_winding_faces_outward() {
        let mesh = generate(&EllipsoidParams::new(Vec3::new(2.0, 1.0, 1.5), 10, 6));
        assert_outward_winding(&mesh, Vec3::zeros());
    }

    #[test]
    fn test_seam_duplicates_first_column() {
        let m = 6;
        let mesh = generate(&EllipsoidParams::new(Vec3::new(1.0, 1.0, 1.0), m, 3));
        let columns = m as usize + 1;
        for ring in 0..3 {
            let first = m as usize + ring * columns;
            let seam = first + m as usize;
            assert_relative_eq!(mesh.positions[first], mesh.positions[seam], epsilon = 1e-5);
            assert_relative_eq!(mesh.uvs[first].x, 0.0);
            assert_relative_eq!(mesh.uvs[seam].x, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_v_runs_from_top_to_bottom() {
        let params = EllipsoidParams {
            uv_scale: Vec2::new(2.0, 3.0),
            uv_offset: Vec2::new(0.5, 0.25),
            ..EllipsoidParams::new(Vec3::new(1.0, 1.0, 1.0), 4, 3)
        };
        let mesh = generate(&params);
        let top = &mesh.uvs[..4];
        let bottom = &mesh.uvs[mesh.vertex_count() - 4..];
        for uv in top {
            assert_relative_eq!(uv.y, 3.0 + 0.25, epsilon = 1e-6);
        }
        for uv in bottom {
            assert_relative_eq!(uv.y, 0.25, epsilon = 1e-6);
        }
        // pole fan centered between its two ring columns
        assert_relative_eq!(top[0].x, 2.0 / 4.0 * 0.5 + 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_tangent_sign_points_toward_increasing_v() {
        let mesh = generate(&EllipsoidParams::new(Vec3::new(1.0, 1.0, 1.0), 8, 3));
        // vertex at the start of the equator ring, phi = 0
        let i = 8 + 9;
        let normal = mesh.normals[i];
        let tangent = mesh.tangents[i];
        let bitangent = normal.cross(&tangent.xyz()) * tangent.w;
        assert!(bitangent.y > 0.9);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let params = EllipsoidParams::new(Vec3::new(1.0, 0.5, 2.0), 9, 4);
        let mut mesh = generate(&params);
        let first = mesh.clone();
        create_ellipsoid(&mut mesh, &params);
        assert_eq!(mesh, first);
    }
}
