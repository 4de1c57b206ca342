//! # Debug Draw
//!
//! Ephemeral debug shapes for 3D applications. Callers ask for lines, wire
//! and solid shapes, text and points to be shown for a number of seconds;
//! the crate owns the render objects, recycles them through pools, and
//! generates the meshes it needs.
//!
//! ## Features
//!
//! - **Mesh Generation**: ellipsoids, capsules, boxes, rectangles, ring
//!   sections and grids with normals, tangents and UVs
//! - **Pooled Lifetimes**: swap-remove pools with per-frame expiry
//! - **Wire Shapes**: arcs, frustums, stadiums, cones, capsules and more
//! - **Colliders**: box, capsule, mesh and sphere drawn under a transform
//!
//! ## Quick Start
//!
//! ```rust
//! use debug_draw::prelude::*;
//!
//! let mut draw = ShapeDrawer::new(&DrawConfig::default());
//! let red = Color::new(1.0, 0.0, 0.0, 1.0);
//!
//! // once per frame, before drawing
//! draw.tick(1.0 / 60.0);
//! draw.draw_wire_box(Vec3::zeros(), Quat::identity(), Vec3::new(1.0, 1.0, 1.0), red, 0.0, 2.0);
//! draw.draw_text("spawn", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), red, 0.75, 2.0);
//!
//! // the host renderer reads the active objects
//! for line in draw.lines().lines() {
//!     assert_eq!(line.points.len(), 16);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod render;
pub mod debug;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, DrawConfig},
        debug::{Axis, Collider, MaterialKind, ShapeDrawer},
        foundation::math::{Color, Quat, Transform, Vec2, Vec3, Vec4},
        render::{
            dynamic::{DrawHandle, DrawablePool, PooledDrawable},
            generation::{
                create_box, create_capsule, create_ellipsoid, create_grid, create_rectangle, create_ring_section,
                BoxParams, CapsuleParams, EllipsoidParams, GridParams, RectangleParams, RingSectionParams,
            },
            MeshBuffer,
        },
    };
}
