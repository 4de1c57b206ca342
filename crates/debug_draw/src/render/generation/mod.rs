//! Parametric mesh generators
//!
//! Each generator is a pure function of its parameters: it clears the target
//! [`MeshBuffer`](crate::render::MeshBuffer), sizes it exactly, and fills
//! positions, normals, tangents, UVs and indices. Out-of-range parameters are
//! clamped silently.
//!
//! Shared conventions:
//! - right-handed, +Y up
//! - `(b - a) × (c - a)` of every triangle points out of the surface
//! - `tangent.w * (normal × tangent.xyz)` points toward increasing `v`
//! - UVs are `texel * grid coordinate * uv_scale + uv_offset`

pub mod indices;
pub mod ellipsoid;
pub mod capsule;
pub mod box_mesh;
pub mod rectangle;
pub mod disk;
pub mod grid;

pub use indices::IndexBuilder;
pub use ellipsoid::{create_ellipsoid, EllipsoidParams, LatitudeBands};
pub use capsule::{create_capsule, CapsuleLayout, CapsuleParams};
pub use box_mesh::{create_box, BoxParams};
pub use rectangle::{create_rectangle, RectangleParams};
pub use disk::{create_ring_section, RingSectionParams};
pub use grid::{create_grid, GridParams};
