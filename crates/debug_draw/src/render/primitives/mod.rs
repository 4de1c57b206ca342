//! Rendering primitives

pub mod mesh;

pub use mesh::{MeshBuffer, MeshError, Vertex};
