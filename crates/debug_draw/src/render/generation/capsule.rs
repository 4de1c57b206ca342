//! Capsule generation
//!
//! A capsule is written as five consecutive regions, each in both the vertex
//! and index buffers:
//!
//! 1. top pole fan
//! 2. top hemisphere rings, ending on the equator
//! 3. cylindrical side, one seamed ring at each end
//! 4. bottom hemisphere rings, starting on the equator
//! 5. bottom pole fan
//!
//! The hemispheres reuse [`LatitudeBands`] over a sphere with
//! `2 · (cap_parallels + 1)` bands. `v` runs continuously over that band count,
//! so the side occupies the single texel row at the equator and both cap seams
//! line up with it.

use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::render::generation::ellipsoid::LatitudeBands;
use crate::render::generation::indices::IndexBuilder;
use crate::render::MeshBuffer;
use std::f32::consts::TAU;
use std::ops::Range;

/// Fewest meridians
pub const MIN_MERIDIANS: u32 = 3;
/// Upper meridian bound
pub const MAX_MERIDIANS: u32 = 100;
/// Upper bound on rings per hemisphere, equator excluded
pub const MAX_CAP_PARALLELS: u32 = 100;

/// Capsule shape parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleParams {
    /// Radius of the cylinder and both caps
    pub radius: f32,
    /// Half the length of the straight section
    pub half_height: f32,
    /// Longitude divisions
    pub meridians: u32,
    /// Latitude rings per hemisphere between pole and equator
    pub cap_parallels: u32,
    /// UV tiling
    pub uv_scale: Vec2,
    /// UV translation
    pub uv_offset: Vec2,
}

impl Default for CapsuleParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            half_height: 0.5,
            meridians: 24,
            cap_parallels: 6,
            uv_scale: Vec2::new(1.0, 1.0),
            uv_offset: Vec2::zeros(),
        }
    }
}

impl CapsuleParams {
    /// Capsule whose overall height, caps included, is `height`
    ///
    /// A height below `2 · radius` collapses the straight section to zero.
    pub fn from_height(radius: f32, height: f32) -> Self {
        Self {
            radius,
            half_height: (0.5 * height - radius).max(0.0),
            ..Default::default()
        }
    }

    /// Same shape with a different tessellation
    pub fn with_tessellation(self, meridians: u32, cap_parallels: u32) -> Self {
        Self {
            meridians,
            cap_parallels,
            ..self
        }
    }

    /// Copy with counts and lengths moved into their valid ranges
    pub fn clamped(&self) -> Self {
        Self {
            radius: self.radius.max(0.0),
            half_height: self.half_height.max(0.0),
            meridians: self.meridians.clamp(MIN_MERIDIANS, MAX_MERIDIANS),
            cap_parallels: self.cap_parallels.min(MAX_CAP_PARALLELS),
            ..*self
        }
    }

    /// Region layout for these (clamped) counts
    pub fn layout(&self) -> CapsuleLayout {
        let clamped = self.clamped();
        CapsuleLayout {
            meridians: clamped.meridians,
            cap_parallels: clamped.cap_parallels,
        }
    }
}

/// One of the five capsule regions, in buffer order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsuleRegion {
    /// Fan around the top pole
    TopPole,
    /// Top hemisphere rings
    TopCap,
    /// Cylindrical side
    Side,
    /// Bottom hemisphere rings
    BottomCap,
    /// Fan around the bottom pole
    BottomPole,
}

impl CapsuleRegion {
    /// All regions in buffer order
    pub const ALL: [Self; 5] = [Self::TopPole, Self::TopCap, Self::Side, Self::BottomCap, Self::BottomPole];
}

/// Vertex and index ranges of each capsule region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapsuleLayout {
    /// Clamped meridian count
    pub meridians: u32,
    /// Clamped rings per hemisphere
    pub cap_parallels: u32,
}

impl CapsuleLayout {
    fn vertex_sizes(&self) -> [usize; 5] {
        let m = self.meridians as usize;
        let ring = m + 1;
        let cap = ring * (self.cap_parallels as usize + 1);
        [m, cap, 2 * ring, cap, m]
    }

    fn index_sizes(&self) -> [usize; 5] {
        let m = self.meridians as usize;
        let cap = 6 * m * self.cap_parallels as usize;
        [3 * m, cap, 6 * m, cap, 3 * m]
    }

    fn range_of(sizes: [usize; 5], region: CapsuleRegion) -> Range<usize> {
        let position = CapsuleRegion::ALL
            .iter()
            .position(|r| *r == region)
            .unwrap_or_default();
        let start: usize = sizes[..position].iter().sum();
        start..start + sizes[position]
    }

    /// Vertex slots belonging to `region`
    pub fn vertex_range(&self, region: CapsuleRegion) -> Range<usize> {
        Self::range_of(self.vertex_sizes(), region)
    }

    /// Index slots belonging to `region`
    pub fn index_range(&self, region: CapsuleRegion) -> Range<usize> {
        Self::range_of(self.index_sizes(), region)
    }

    /// `2(m+1)(cp+1) + 2(m+1) + 2m`
    pub fn vertex_count(&self) -> usize {
        self.vertex_sizes().iter().sum()
    }

    /// `12·m·cp + 12·m`
    pub fn index_count(&self) -> usize {
        self.index_sizes().iter().sum()
    }
}

fn add_side(mesh: &mut MeshBuffer, out_base: usize, params: &CapsuleParams, texel: Vec2, v_row: f32) -> usize {
    let m = params.meridians;
    let columns = m as usize + 1;
    let top = Vec3::new(0.0, params.half_height, 0.0);
    for j in 0..=m {
        let phi = j as f32 / m as f32 * TAU;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let normal = Vec3::new(cos_phi, 0.0, sin_phi);
        let tangent = Vec4::new(-sin_phi, 0.0, cos_phi, -1.0);
        let uv = texel.component_mul(&Vec2::new(j as f32, v_row)) + params.uv_offset;
        let rim = params.radius * normal;
        mesh.set_vertex(out_base + j as usize, top + rim, normal, tangent, uv);
        mesh.set_vertex(out_base + columns + j as usize, rim - top, normal, tangent, uv);
    }
    out_base + 2 * columns
}

/// Fill `mesh` with a Y-aligned capsule centered at the origin
///
/// `v` spans `2 · (cap_parallels + 1)` texel rows over the two hemispheres.
/// Both rings of the cylindrical side sit on the equator row, so the side has
/// zero `v` extent and a texture is stretched along its whole length.
pub fn create_capsule(mesh: &mut MeshBuffer, params: &CapsuleParams) {
    let params = params.clamped();
    let layout = params.layout();
    let m = params.meridians;
    let cp = params.cap_parallels;
    let bands = 2 * (cp + 1);
    let texel = params.uv_scale.component_div(&Vec2::new(m as f32, bands as f32));
    mesh.reset(layout.vertex_count(), layout.index_count());

    let top = LatitudeBands {
        center: Vec3::new(0.0, params.half_height, 0.0),
        radii: Vec3::new(params.radius, params.radius, params.radius),
        meridians: m,
        bands,
        texel,
        uv_offset: params.uv_offset,
    };
    let bottom = LatitudeBands {
        center: -top.center,
        ..top
    };

    let mut vertex = top.add_top_pole(mesh, 0);
    vertex = top.add_rows(mesh, vertex, 1..=cp + 1);
    vertex = add_side(mesh, vertex, &params, texel, (cp + 1) as f32);
    vertex = bottom.add_rows(mesh, vertex, cp + 1..=2 * cp + 1);
    let vertex_end = bottom.add_bottom_pole(mesh, vertex);
    debug_assert_eq!(vertex_end, layout.vertex_count());

    let ring = m + 1;
    let mut builder = IndexBuilder::new(&mut mesh.indices);
    let mut in_base = m;
    let mut out = builder.sawtooth_up(0, 0, m);
    out = builder.segment(out, in_base, cp, m);
    in_base += ring * (cp + 1);
    out = builder.quad_strip(out, in_base, m);
    in_base += 2 * ring;
    out = builder.segment(out, in_base, cp, m);
    in_base += ring * cp;
    let out_end = builder.sawtooth_down(out, in_base, m);
    debug_assert_eq!(out_end, layout.index_count());
}
