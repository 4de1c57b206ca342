//! Mesh buffers produced by the generators
//!
//! A [`MeshBuffer`] keeps each vertex attribute in its own array, the layout
//! the generators fill most naturally. [`MeshBuffer::interleaved`] packs them
//! into [`Vertex`] records for hosts that upload a single vertex stream.
//!
//! Generators overwrite a buffer in place through [`MeshBuffer::reset`], which
//! keeps the existing allocations. Dynamic shapes rely on this to avoid
//! allocating every frame.

use crate::foundation::math::{Vec2, Vec3, Vec4};
use bytemuck::{Pod, Zeroable};

/// Interleaved vertex layout for GPU upload
///
/// The `#[repr(C)]` attribute keeps the field order stable so the slice can be
/// cast to bytes with [`bytemuck::cast_slice`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Unit surface normal
    pub normal: [f32; 3],
    /// Tangent direction with handedness sign in `w`
    pub tangent: [f32; 4],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
}

/// Structural problems found by [`MeshBuffer::validate`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Attribute arrays differ in length
    #[error("attribute length mismatch: {positions} positions, {normals} normals, {tangents} tangents, {uvs} uvs")]
    AttributeLengthMismatch {
        /// Position count
        positions: usize,
        /// Normal count
        normals: usize,
        /// Tangent count
        tangents: usize,
        /// UV count
        uvs: usize,
    },

    /// Index count is not a multiple of three
    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    /// An index points past the vertex arrays
    #[error("index {index} at position {offset} exceeds vertex count {vertex_count}")]
    IndexOutOfRange {
        /// Offending index value
        index: u32,
        /// Where it sits in the index buffer
        offset: usize,
        /// Number of vertices
        vertex_count: usize,
    },
}

/// Vertex attributes plus a triangle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Unit normals, one per position
    pub normals: Vec<Vec3>,
    /// Tangents, one per position; `w` is the bitangent sign
    pub tangents: Vec<Vec4>,
    /// Texture coordinates, one per position
    pub uvs: Vec<Vec2>,
    /// Counter-clockwise triangle indices, three per triangle
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for the given counts
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            tangents: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Remove all vertices and indices, keeping allocations
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.tangents.clear();
        self.uvs.clear();
        self.indices.clear();
    }

    /// Clear and zero-fill to exactly the given counts
    ///
    /// Generators call this first and then write every slot by index.
    pub fn reset(&mut self, vertex_count: usize, index_count: usize) {
        self.clear();
        self.positions.resize(vertex_count, Vec3::zeros());
        self.normals.resize(vertex_count, Vec3::zeros());
        self.tangents.resize(vertex_count, Vec4::zeros());
        self.uvs.resize(vertex_count, Vec2::zeros());
        self.indices.resize(index_count, 0);
    }

    /// Write all attributes of one vertex
    #[inline]
    pub fn set_vertex(&mut self, index: usize, position: Vec3, normal: Vec3, tangent: Vec4, uv: Vec2) {
        self.positions[index] = position;
        self.normals[index] = normal;
        self.tangents[index] = tangent;
        self.uvs[index] = uv;
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate triangles as index triplets
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Check attribute lengths and index bounds
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.positions.len();
        if self.normals.len() != vertex_count
            || self.tangents.len() != vertex_count
            || self.uvs.len() != vertex_count
        {
            return Err(MeshError::AttributeLengthMismatch {
                positions: vertex_count,
                normals: self.normals.len(),
                tangents: self.tangents.len(),
                uvs: self.uvs.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }
        if let Some(offset) = self.indices.iter().position(|&index| index as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                index: self.indices[offset],
                offset,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Pack attributes into an interleaved vertex list
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.tangents)
            .zip(&self.uvs)
            .map(|(((position, normal), tangent), uv)| Vertex {
                position: [position.x, position.y, position.z],
                normal: [normal.x, normal.y, normal.z],
                tangent: [tangent.x, tangent.y, tangent.z, tangent.w],
                tex_coord: [uv.x, uv.y],
            })
            .collect()
    }

    /// Copy with every triangle given its own three vertices
    ///
    /// Index `i` of the result refers to vertex `i`, so barycentric wireframe
    /// shaders can tell the corners of each triangle apart. The source must pass
    /// [`validate`](Self::validate).
    pub fn split_triangles(&self) -> Result<Self, MeshError> {
        self.validate()?;
        let count = self.indices.len();
        let mut split = Self::with_capacity(count, count);
        for &index in &self.indices {
            let i = index as usize;
            split.positions.push(self.positions[i]);
            split.normals.push(self.normals[i]);
            split.tangents.push(self.tangents[i]);
            split.uvs.push(self.uvs[i]);
        }
        split.indices.extend(0..count as u32);
        Ok(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshBuffer {
        let mut mesh = MeshBuffer::new();
        mesh.reset(3, 3);
        mesh.set_vertex(0, Vec3::new(0.0, 0.0, 0.0), Vec3::z(), Vec4::new(1.0, 0.0, 0.0, 1.0), Vec2::new(0.0, 0.0));
        mesh.set_vertex(1, Vec3::new(1.0, 0.0, 0.0), Vec3::z(), Vec4::new(1.0, 0.0, 0.0, 1.0), Vec2::new(1.0, 0.0));
        mesh.set_vertex(2, Vec3::new(0.0, 1.0, 0.0), Vec3::z(), Vec4::new(1.0, 0.0, 0.0, 1.0), Vec2::new(0.0, 1.0));
        mesh.indices.copy_from_slice(&[0, 1, 2]);
        mesh
    }

    #[test]
    fn test_reset_keeps_allocation() {
        let mut mesh = MeshBuffer::new();
        mesh.reset(100, 300);
        let capacity = mesh.positions.capacity();
        mesh.reset(10, 30);
        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.indices.len(), 30);
        assert_eq!(mesh.positions.capacity(), capacity);
    }

    #[test]
    fn test_validate_reports_out_of_range_index() {
        let mut mesh = triangle();
        assert_eq!(mesh.validate(), Ok(()));
        mesh.indices[2] = 7;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange { index: 7, offset: 2, vertex_count: 3 })
        );
    }

    #[test]
    fn test_validate_reports_length_mismatch_and_partial_triangle() {
        let mut mesh = triangle();
        mesh.uvs.pop();
        assert!(matches!(mesh.validate(), Err(MeshError::AttributeLengthMismatch { uvs: 2, .. })));

        let mut mesh = triangle();
        mesh.indices.push(0);
        assert_eq!(mesh.validate(), Err(MeshError::IncompleteTriangle(4)));
    }

    #[test]
    fn test_split_triangles_unshares_vertices() {
        let mut mesh = triangle();
        mesh.indices.extend_from_slice(&[2, 1, 0]);
        let split = mesh.split_triangles().unwrap();
        assert_eq!(split.vertex_count(), 6);
        assert_eq!(split.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(split.triangle_count(), mesh.triangle_count());
        assert_eq!(split.positions[3], mesh.positions[2]);
        assert_eq!(split.uvs[5], mesh.uvs[0]);
        assert_eq!(split.validate(), Ok(()));
    }

    #[test]
    fn test_interleaved_is_castable() {
        let vertices = triangle().interleaved();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 3 * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 12 * 4);
    }
}
