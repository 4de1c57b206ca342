//! Debug shapes built on the generators and pools
//!
//! - [`line_drawer`]: lines, polylines and wire shapes
//! - [`mesh_drawer`]: solid shapes, caller meshes and wireframes
//! - [`text_drawer`]: world-space labels
//! - [`point_emitter`]: fire-and-forget points
//! - [`wire_cache`]: split-triangle meshes for hosts without wireframe support
//! - [`collider`]: collision shapes and their world-space resolution
//! - [`shape_drawer`]: the facade tying them together

pub mod line_drawer;
pub mod mesh_drawer;
pub mod text_drawer;
pub mod point_emitter;
pub mod wire_cache;
pub mod collider;
pub mod shape_drawer;

pub use collider::{Axis, Collider, WorldCollider};
pub use line_drawer::{LineDrawer, LineObject};
pub use mesh_drawer::{BaseMeshes, DynamicMeshObject, MaterialKind, MeshDrawer, MeshObject};
pub use point_emitter::{PointEmitter, PointParticle};
pub use shape_drawer::ShapeDrawer;
pub use text_drawer::{TextDrawer, TextObject};
pub use wire_cache::{CacheStats, WireMeshCache};
