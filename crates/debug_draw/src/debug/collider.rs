//! Collider descriptions and their world-space resolution
//!
//! A [`Collider`] is given in the local space of a [`Transform`]. Before
//! drawing, it is resolved into a [`WorldCollider`] with scale already applied.
//! Scale handling follows physics engines: spheres take the largest scale
//! component, capsules scale their radius by the largest component across the
//! axis and their length by the component along it.

use crate::foundation::math::{Quat, Transform, Vec3};
use crate::render::MeshBuffer;
use std::rc::Rc;

/// Shortest straight section a capsule collider resolves to
pub const MIN_CAPSULE_CYLINDER: f32 = 1.0e-4;

/// Local axis a capsule runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Local X
    X,
    /// Local Y
    #[default]
    Y,
    /// Local Z
    Z,
}

impl Axis {
    /// Unit vector along the axis
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::x(),
            Self::Y => Vec3::y(),
            Self::Z => Vec3::z(),
        }
    }

    fn axial(self, scale: &Vec3) -> f32 {
        match self {
            Self::X => scale.x,
            Self::Y => scale.y,
            Self::Z => scale.z,
        }
    }

    fn lateral(self, scale: &Vec3) -> f32 {
        match self {
            Self::X => scale.y.max(scale.z),
            Self::Y => scale.x.max(scale.z),
            Self::Z => scale.x.max(scale.y),
        }
    }
}

/// Collision shape in local space
#[derive(Debug, Clone)]
pub enum Collider {
    /// Axis-aligned box
    Box {
        /// Box center
        center: Vec3,
        /// Edge lengths
        size: Vec3,
    },
    /// Capsule along one local axis
    Capsule {
        /// Capsule center
        center: Vec3,
        /// Cap radius
        radius: f32,
        /// Overall length including both caps
        height: f32,
        /// Axis the capsule runs along
        direction: Axis,
    },
    /// Arbitrary triangle mesh
    Mesh {
        /// Collision geometry
        mesh: Rc<MeshBuffer>,
    },
    /// Sphere
    Sphere {
        /// Sphere center
        center: Vec3,
        /// Sphere radius
        radius: f32,
    },
}

/// Collision shape resolved to world space
#[derive(Debug, Clone)]
pub enum WorldCollider {
    /// Oriented box
    Box {
        /// World center
        center: Vec3,
        /// World orientation
        rotation: Quat,
        /// Scaled edge lengths
        size: Vec3,
    },
    /// Capsule between two cap centers
    Capsule {
        /// First cap center
        start: Vec3,
        /// Second cap center
        end: Vec3,
        /// Scaled radius
        radius: f32,
    },
    /// Mesh placed by a transform
    Mesh {
        /// Collision geometry
        mesh: Rc<MeshBuffer>,
        /// Owner transform
        transform: Transform,
    },
    /// Sphere
    Sphere {
        /// World center
        center: Vec3,
        /// Scaled radius
        radius: f32,
    },
}

impl Collider {
    /// Resolve into world space under `transform`
    pub fn to_world(&self, transform: &Transform) -> WorldCollider {
        let scale = &transform.scale;
        match self {
            Self::Box { center, size } => WorldCollider::Box {
                center: transform.transform_point(*center),
                rotation: transform.rotation,
                size: scale.component_mul(size),
            },
            Self::Capsule {
                center,
                radius,
                height,
                direction,
            } => {
                let cylinder = (height - 2.0 * radius).max(MIN_CAPSULE_CYLINDER);
                let half = 0.5 * cylinder * direction.axial(scale).abs();
                let axis = transform.transform_direction(direction.unit());
                let center = transform.transform_point(*center);
                WorldCollider::Capsule {
                    start: center + axis * half,
                    end: center - axis * half,
                    radius: radius * direction.lateral(&scale.abs()),
                }
            }
            Self::Mesh { mesh } => WorldCollider::Mesh {
                mesh: Rc::clone(mesh),
                transform: transform.clone(),
            },
            Self::Sphere { center, radius } => WorldCollider::Sphere {
                center: transform.transform_point(*center),
                radius: radius * scale.abs().max(),
            },
        }
    }
}
