//! Math utilities and types
//!
//! Provides the vector, rotation and transform types shared by the mesh
//! generators and the drawers, plus the small basis helpers the wire shapes
//! use to orient circles, arcs and cones around an arbitrary axis.
//!
//! Conventions: right-handed, +Y up, local forward is +Z and local right is +X.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Linear RGBA color
pub type Color = Vec4;

/// Squared length under which a direction is treated as zero
const DEGENERATE_LENGTH_SQUARED: f32 = 1.0e-12;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors (lossy world scale for collider transforms)
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a transform from all three components
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * self.scale.component_mul(&point) + self.position
    }

    /// Rotate a direction, ignoring scale
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }
}

/// Rotation whose local +Z points along `forward` and whose local +Y leans toward `up`
///
/// A zero `forward` yields the identity. When `up` is parallel to `forward` an
/// arbitrary perpendicular up is substituted so the result stays finite.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    if forward.norm_squared() <= DEGENERATE_LENGTH_SQUARED {
        return Quat::identity();
    }
    let up = if forward.cross(&up).norm_squared() <= DEGENERATE_LENGTH_SQUARED {
        orthogonal_vector(forward)
    } else {
        up
    };
    Quat::face_towards(&forward, &up)
}

/// Rotation that carries local +Y onto `axis`
pub fn rotation_from_up(axis: Vec3) -> Quat {
    if axis.norm_squared() <= DEGENERATE_LENGTH_SQUARED {
        return Quat::identity();
    }
    Quat::rotation_between(&Vec3::y(), &axis)
        .unwrap_or_else(|| Quat::from_axis_angle(&Vec3::x_axis(), std::f32::consts::PI))
}

/// A unit vector perpendicular to `v`, lying in the XY plane when possible
pub fn orthogonal_vector(v: Vec3) -> Vec3 {
    let length_squared = v.x * v.x + v.y * v.y;
    if length_squared > DEGENERATE_LENGTH_SQUARED {
        let length = length_squared.sqrt();
        Vec3::new(v.y / length, -v.x / length, 0.0)
    } else {
        let x = if v.z < 0.0 { -1.0 } else { 1.0 };
        Vec3::new(x, 0.0, 0.0)
    }
}

/// Two vectors completing `v` to an orthogonal basis: `(tangent, binormal)`
///
/// The tangent is unit length; the binormal is `v × tangent` and carries the
/// length of `v`, except in the degenerate case where it is +Y.
pub fn orthogonal_basis(v: Vec3) -> (Vec3, Vec3) {
    let length_squared = v.x * v.x + v.y * v.y;
    if length_squared > DEGENERATE_LENGTH_SQUARED {
        let tangent = orthogonal_vector(v);
        (tangent, v.cross(&tangent))
    } else {
        let x = if v.z < 0.0 { -1.0 } else { 1.0 };
        (Vec3::new(x, 0.0, 0.0), Vec3::y())
    }
}

/// Returns the normalized vector, or zero for a degenerate input
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize(DEGENERATE_LENGTH_SQUARED.sqrt()).unwrap_or_else(Vec3::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_point_applies_scale_rotation_translation() {
        let transform = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let point = transform.transform_point(Vec3::new(1.0, 0.0, 0.0));
        // +X rotated a quarter turn about +Y lands on -Z
        assert_relative_eq!(point, Vec3::new(1.0, 2.0, 1.0), epsilon = 1e-5);

        let matrix_point = transform.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(matrix_point.coords, point, epsilon = 1e-5);
    }

    #[test]
    fn test_look_rotation_maps_forward_and_up() {
        let forward = Vec3::new(1.0, 0.0, 0.0);
        let rotation = look_rotation(forward, Vec3::y());
        assert_relative_eq!(rotation * Vec3::z(), forward, epsilon = 1e-5);
        assert_relative_eq!(rotation * Vec3::y(), Vec3::y(), epsilon = 1e-5);
    }

    #[test]
    fn test_look_rotation_parallel_up_stays_finite() {
        let rotation = look_rotation(Vec3::y(), Vec3::y());
        let mapped = rotation * Vec3::z();
        assert!(mapped.iter().all(|c| c.is_finite()));
        assert_relative_eq!(mapped, Vec3::y(), epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_from_up_handles_opposite_axis() {
        assert_relative_eq!(rotation_from_up(Vec3::new(0.0, 0.0, 2.0)) * Vec3::y(), Vec3::z(), epsilon = 1e-5);
        assert_relative_eq!(rotation_from_up(-Vec3::y()) * Vec3::y(), -Vec3::y(), epsilon = 1e-5);
    }

    #[test]
    fn test_orthogonal_basis_is_perpendicular() {
        for v in [Vec3::new(0.3, -2.0, 0.5), Vec3::new(0.0, 0.0, -4.0), Vec3::x()] {
            let (tangent, binormal) = orthogonal_basis(v);
            assert_relative_eq!(tangent.dot(&v), 0.0, epsilon = 1e-5);
            assert_relative_eq!(binormal.dot(&v), 0.0, epsilon = 1e-5);
            assert_relative_eq!(tangent.dot(&binormal), 0.0, epsilon = 1e-5);
            assert_relative_eq!(tangent.norm(), 1.0, epsilon = 1e-5);
        }
    }
}
