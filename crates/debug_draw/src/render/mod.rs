//! Geometry side of the crate
//!
//! - [`primitives`]: the mesh buffer every generator writes into
//! - [`generation`]: parametric mesh generators
//! - [`dynamic`]: pooled, duration-based drawable storage

pub mod primitives;
pub mod generation;
pub mod dynamic;

pub use primitives::{MeshBuffer, MeshError, Vertex};
