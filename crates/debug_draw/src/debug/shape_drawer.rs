//! One entry point for every debug shape
//!
//! [`ShapeDrawer`] composes the line, mesh and text drawers and the point
//! emitter. It adds the composite shapes that are built from several
//! primitives (axes, spheres, capsules, cylinders, cones) and draws
//! colliders.
//!
//! Every call takes a duration in seconds. Zero shows the shape for the
//! current frame only. Line widths and point radii that are not positive fall
//! back to the configured defaults.
//!
//! ```
//! use debug_draw::prelude::*;
//!
//! let mut draw = ShapeDrawer::new(&DrawConfig::default());
//! let green = Color::new(0.0, 1.0, 0.0, 1.0);
//! draw.draw_wire_sphere(Vec3::zeros(), 1.0, green, 0.0, 0.0);
//! draw.draw_solid_capsule(Vec3::zeros(), Vec3::new(0.0, 2.0, 0.0), 0.5, green, 1.0);
//! assert_eq!(draw.lines().active_count(), 3);
//!
//! draw.tick(1.0 / 60.0);
//! assert_eq!(draw.lines().active_count(), 0);
//! assert_eq!(draw.meshes().active_count(), 1);
//! ```

use crate::config::{DefaultsConfig, DrawConfig};
use crate::debug::collider::{Collider, WorldCollider};
use crate::debug::line_drawer::LineDrawer;
use crate::debug::mesh_drawer::MeshDrawer;
use crate::debug::point_emitter::PointEmitter;
use crate::debug::text_drawer::TextDrawer;
use crate::foundation::math::{
    look_rotation, normalize_or_zero, orthogonal_basis, orthogonal_vector, rotation_from_up, Color, Quat, Transform,
    Vec2, Vec3,
};
use crate::render::MeshBuffer;
use log::info;
use std::rc::Rc;

/// Facade over all drawers
#[derive(Debug)]
pub struct ShapeDrawer {
    lines: LineDrawer,
    meshes: MeshDrawer,
    texts: TextDrawer,
    points: PointEmitter,
    defaults: DefaultsConfig,
    enabled: bool,
}

impl ShapeDrawer {
    /// Build every drawer from `config`
    pub fn new(config: &DrawConfig) -> Self {
        let pools = &config.pools;
        let drawer = Self {
            lines: LineDrawer::new(pools.line_capacity, pools.min_growth),
            meshes: MeshDrawer::new(pools, &config.defaults, &config.generation, &config.wireframe),
            texts: TextDrawer::new(pools.text_capacity, pools.min_growth),
            points: PointEmitter::new(),
            defaults: config.defaults.clone(),
            enabled: true,
        };
        info!(
            "Shape drawer ready: {} lines, {} meshes, {} texts, split wireframes {}",
            pools.line_capacity,
            pools.mesh_capacity,
            pools.text_capacity,
            if config.wireframe.split_triangles { "on" } else { "off" }
        );
        drawer
    }

    /// Suspend or resume drawing
    ///
    /// While disabled every draw call is a no-op. Shapes already on screen
    /// keep counting down and expire normally.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            info!("Shape drawer {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
        self.lines.set_enabled(enabled);
        self.meshes.set_enabled(enabled);
        self.texts.set_enabled(enabled);
        self.points.set_enabled(enabled);
    }

    /// Whether draw calls have an effect
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Advance every drawer by one frame; returns how many shapes expired
    pub fn tick(&mut self, delta_time: f32) -> usize {
        self.lines.tick(delta_time)
            + self.meshes.tick(delta_time)
            + self.texts.tick(delta_time)
            + self.points.advance(delta_time)
    }

    /// Line drawer, for the host renderer
    pub fn lines(&self) -> &LineDrawer {
        &self.lines
    }

    /// Line drawer, for releasing handles or drawing primitives directly
    pub fn lines_mut(&mut self) -> &mut LineDrawer {
        &mut self.lines
    }

    /// Mesh drawer, for the host renderer
    pub fn meshes(&self) -> &MeshDrawer {
        &self.meshes
    }

    /// Mesh drawer, for releasing handles or drawing primitives directly
    pub fn meshes_mut(&mut self) -> &mut MeshDrawer {
        &mut self.meshes
    }

    /// Text drawer, for the host renderer
    pub fn texts(&self) -> &TextDrawer {
        &self.texts
    }

    /// Text drawer, for releasing handles
    pub fn texts_mut(&mut self) -> &mut TextDrawer {
        &mut self.texts
    }

    /// Point emitter, for the host renderer
    pub fn points(&self) -> &PointEmitter {
        &self.points
    }

    /// Fallback appearance values
    pub fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }

    fn width(&self, width: f32) -> f32 {
        if width > 0.0 {
            width
        } else {
            self.defaults.line_width
        }
    }

    // Lines

    /// Straight segment
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, width: f32, duration: f32) {
        let width = self.width(width);
        self.lines.draw_line(start, end, color, width, duration);
    }

    /// Connected points
    pub fn draw_polyline(&mut self, points: &[Vec3], color: Color, width: f32, duration: f32) {
        let width = self.width(width);
        self.lines.draw_polyline(points, color, width, duration);
    }

    /// Connected local-space points placed by a transform
    pub fn draw_polyline_transformed(&mut self, points: &[Vec3], transform: &Transform, color: Color, width: f32, duration: f32) {
        let width = self.width(width);
        self.lines.draw_polyline_transformed(
            points,
            transform.position,
            transform.rotation,
            transform.scale,
            color,
            width,
            duration,
        );
    }

    /// Arrow from `origin` along `direction`
    pub fn draw_ray(&mut self, origin: Vec3, direction: Vec3, color: Color, width: f32, duration: f32) {
        let width = self.width(width);
        self.lines.draw_ray(origin, direction, color, width, duration);
    }

    /// Local X, Y and Z axes as red, green and blue arrows of length `size`
    pub fn draw_axes(&mut self, position: Vec3, rotation: Quat, size: f32, width: f32, duration: f32) {
        let axes = [
            (Vec3::x(), Color::new(1.0, 0.0, 0.0, 1.0)),
            (Vec3::y(), Color::new(0.0, 1.0, 0.0, 1.0)),
            (Vec3::z(), Color::new(0.0, 0.0, 1.0, 1.0)),
        ];
        for (axis, color) in axes {
            self.draw_ray(position, rotation * axis * size, color, width, duration);
        }
    }

    /// Circular arc around the normal `axis_y`, starting from `axis_x`
    ///
    /// Angles are in degrees.
    pub fn draw_arc(
        &mut self,
        origin: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
        width: f32,
        duration: f32,
    ) {
        let radii = Vec2::new(radius, radius);
        self.draw_elliptic_arc(origin, axis_x, axis_y, radii, start_angle, end_angle, color, width, duration);
    }

    /// Elliptic arc around the normal `axis_y`, starting from `axis_x`
    pub fn draw_elliptic_arc(
        &mut self,
        origin: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        radii: Vec2,
        start_angle: f32,
        end_angle: f32,
        color: Color,
        width: f32,
        duration: f32,
    ) {
        let width = self.width(width);
        let segments = self.defaults.arc_segments;
        self.lines.draw_elliptic_arc(
            origin,
            axis_x,
            axis_y,
            radii,
            start_angle,
            end_angle,
            segments,
            color,
            width,
            duration,
        );
    }

    /// Circle facing `normal`
    pub fn draw_circle(&mut self, center: Vec3, normal: Vec3, radius: f32, color: Color, width: f32, duration: f32) {
        let width = self.width(width);
        let radii = Vec2::new(radius, radius);
        self.lines
            .draw_ellipse(center, orthogonal_vector(normal), normal, radii, color, width, duration);
    }

    /// Ellipse around the normal `axis_y`
    pub fn draw_ellipse(
        &mut self,
        center: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        radii: Vec2,
        color: Color,
        width: f32,
        duration: f32,
    ) {
        let width = self.width(width);
        self.lines.draw_ellipse(center, axis_x, axis_y, radii, color, width, duration);
    }

    /// Box edges
    pub fn draw_wire_box(&mut self, center: Vec3, rotation: Quat, size: Vec3, color: Color, width: f32, duration: f32) {
        let width = self.width(width);
        self.lines.draw_wire_box(center, rotation, size, color, width, duration);
    }

    /// Rectangle outline in the rotated XY plane
    pub fn draw_wire_rectangle(&mut self, center: Vec3, rotation: Quat, size: Vec2, color: Color, width: f32, duration: f32) {
        let width = self.width(width);
        self.lines.draw_wire_rectangle(center, rotation, size, color, width, duration);
    }

    /// Sphere as three great circles
    pub fn draw_wire_sphere(&mut self, center: Vec3, radius: f32, color: Color, width: f32, duration: f32) {
        self.draw_wire_ellipsoid_axes(center, Vec3::x() * radius, Vec3::y() * radius, Vec3::z() * radius, color, width, duration);
    }

    /// Rotated ellipsoid as three principal ellipses
    pub fn draw_wire_ellipsoid(&mut self, center: Vec3, rotation: Quat, radii: Vec3, color: Color, width: f32, duration: f32) {
        let axes = (rotation * Vec3::x() * radii.x, rotation * Vec3::y() * radii.y, rotation * Vec3::z() * radii.z);
        self.draw_wire_ellipsoid_axes(center, axes.0, axes.1, axes.2, color, width, duration);
    }

    /// Ellipsoid given by three semi-axis vectors
    pub fn draw_wire_ellipsoid_axes(
        &mut self,
        center: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        axis_z: Vec3,
        color: Color,
        width: f32,
        duration: f32,
    ) {
        let width = self.width(width);
        let (x, y, z) = (axis_x.norm(), axis_y.norm(), axis_z.norm());
        self.lines.draw_ellipse(center, axis_y, axis_x, Vec2::new(y, z), color, width, duration);
        self.lines.draw_ellipse(center, axis_x, axis_y, Vec2::new(x, z), color, width, duration);
        self.lines.draw_ellipse(center, axis_x, axis_z, Vec2::new(x, y), color, width, duration);
    }

    /// Capsule between two cap centers: two rims and two stadium outlines
    pub fn draw_wire_capsule(&mut self, start: Vec3, end: Vec3, radius: f32, color: Color, width: f32, duration: f32) {
        let width = self.width(width);
        let axis = end - start;
        let (tangent, binormal) = orthogonal_basis(axis);
        let radii = Vec2::new(radius, radius);
        let rim = orthogonal_vector(axis);
        self.lines.draw_ellipse(start, rim, axis, radii, color, width, duration);
        self.lines.draw_ellipse(end, rim, axis, radii, color, width, duration);
        self.lines.draw_wire_stadium(start, end, tangent, radius, color, width, duration);
        self.lines.draw_wire_stadium(start, end, binormal, radius, color, width, duration);
    }

    /// Cylinder between two cap centers: two rims and four side lines
    pub fn draw_wire_cylinder(&mut self, start: Vec3, end: Vec3, radius: f32, color: Color, width: f32, duration: f32) {
        let width = self.width(width);
        let axis = end - start;
        let (tangent, binormal) = orthogonal_basis(axis);
        let binormal = normalize_or_zero(binormal);
        for offset in [tangent, -tangent, binormal, -binormal] {
            let offset = offset * radius;
            self.lines.draw_line(start + offset, end + offset, color, width, duration);
        }
        let radii = Vec2::new(radius, radius);
        self.lines.draw_ellipse(start, tangent, axis, radii, color, width, duration);
        self.lines.draw_ellipse(end, tangent, axis, radii, color, width, duration);
    }

    /// Circular cone from `origin` along `direction`
    ///
    /// `angle` is the half-angle at the apex in degrees.
    pub fn draw_wire_cone(&mut self, origin: Vec3, direction: Vec3, angle: f32, color: Color, width: f32, duration: f32) {
        let radius = direction.norm() * angle.to_radians().tan();
        let (tangent, binormal) = orthogonal_basis(direction);
        let binormal = normalize_or_zero(binormal);
        self.draw_wire_elliptic_cone(origin, tangent * radius, direction, binormal * radius, color, width, duration);
    }

    /// Elliptic cone from `origin` to a rim at `origin + axis_y`
    pub fn draw_wire_elliptic_cone(
        &mut self,
        origin: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        axis_z: Vec3,
        color: Color,
        width: f32,
        duration: f32,
    ) {
        let width = self.width(width);
        self.lines
            .draw_wire_elliptic_cone(origin, axis_x, axis_y, axis_z, color, width, duration);
    }

    /// Camera frustum looking down the rotated +Z axis
    pub fn draw_wire_frustum(
        &mut self,
        origin: Vec3,
        rotation: Quat,
        vertical_fov: f32,
        near: f32,
        far: f32,
        aspect: f32,
        color: Color,
        width: f32,
        duration: f32,
    ) {
        let width = self.width(width);
        self.lines
            .draw_wire_frustum(origin, rotation, vertical_fov, near, far, aspect, color, width, duration);
    }

    /// Stadium outline around the segment, in the plane facing `normal`
    pub fn draw_wire_stadium(
        &mut self,
        start: Vec3,
        end: Vec3,
        normal: Vec3,
        radius: f32,
        color: Color,
        width: f32,
        duration: f32,
    ) {
        let width = self.width(width);
        self.lines.draw_wire_stadium(start, end, normal, radius, color, width, duration);
    }

    // Solids

    /// Solid box
    pub fn draw_solid_box(&mut self, center: Vec3, rotation: Quat, size: Vec3, color: Color, duration: f32) {
        self.meshes.draw_solid_box(center, rotation, size, color, duration);
    }

    /// Solid sphere
    pub fn draw_solid_sphere(&mut self, center: Vec3, radius: f32, color: Color, duration: f32) {
        let radii = Vec3::new(radius, radius, radius);
        self.meshes.draw_solid_ellipsoid(center, Quat::identity(), radii, color, duration);
    }

    /// Solid ellipsoid
    pub fn draw_solid_ellipsoid(&mut self, center: Vec3, rotation: Quat, radii: Vec3, color: Color, duration: f32) {
        self.meshes.draw_solid_ellipsoid(center, rotation, radii, color, duration);
    }

    /// Solid capsule between two cap centers
    pub fn draw_solid_capsule(&mut self, start: Vec3, end: Vec3, radius: f32, color: Color, duration: f32) {
        let axis = end - start;
        let center = start + axis * 0.5;
        let height = axis.norm() + 2.0 * radius;
        self.meshes
            .draw_solid_capsule(center, rotation_from_up(axis), height, radius, color, duration);
    }

    /// Solid rectangle in the rotated XY plane
    pub fn draw_solid_rectangle(&mut self, center: Vec3, rotation: Quat, size: Vec2, color: Color, duration: f32) {
        self.meshes.draw_solid_rectangle(center, rotation, size, color, duration);
    }

    /// Filled circle facing `normal`
    pub fn draw_disk(&mut self, center: Vec3, normal: Vec3, radius: f32, color: Color, duration: f32) {
        let radii = Vec2::new(radius, radius);
        self.meshes
            .draw_elliptic_disk(center, look_rotation(normal, Vec3::y()), radii, color, duration);
    }

    /// Filled ellipse in the rotated XY plane
    pub fn draw_elliptic_disk(&mut self, center: Vec3, rotation: Quat, radii: Vec2, color: Color, duration: f32) {
        self.meshes.draw_elliptic_disk(center, rotation, radii, color, duration);
    }

    /// Ring section around the normal `axis_y`, starting from `axis_x`
    ///
    /// Angles are in degrees.
    pub fn draw_ring(
        &mut self,
        center: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        radius: f32,
        ring_width: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
        duration: f32,
    ) {
        let rotation = look_rotation(-axis_y, axis_x.cross(&axis_y));
        let radii = Vec2::new(radius, radius);
        self.meshes
            .draw_elliptic_ring_section(center, rotation, radii, ring_width, start_angle, end_angle, color, duration);
    }

    /// Filled circular sector around the normal `axis_y`
    pub fn draw_sector(
        &mut self,
        center: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
        duration: f32,
    ) {
        self.draw_ring(center, axis_x, axis_y, radius, radius, start_angle, end_angle, color, duration);
    }

    /// Caller mesh, solid
    pub fn draw_solid_mesh(&mut self, mesh: &Rc<MeshBuffer>, transform: &Transform, color: Color, duration: f32) {
        self.meshes
            .draw_solid_mesh(mesh, transform.position, transform.rotation, transform.scale, color, duration);
    }

    /// Caller mesh, wireframe
    pub fn draw_wire_mesh(
        &mut self,
        mesh: &Rc<MeshBuffer>,
        transform: &Transform,
        color: Color,
        width: f32,
        duration: f32,
        use_cache: bool,
    ) {
        let width = self.width(width);
        self.meshes.draw_wire_mesh(
            mesh,
            transform.position,
            transform.rotation,
            transform.scale,
            color,
            width,
            duration,
            use_cache,
        );
    }

    // Labels and points

    /// Text label lifted `y_offset` above `position`
    pub fn draw_text(&mut self, text: &str, position: Vec3, scale: Vec3, color: Color, y_offset: f32, duration: f32) {
        self.texts.draw_text(text, position, scale, color, y_offset, duration);
    }

    /// Point marker
    pub fn draw_point(&mut self, position: Vec3, color: Color, radius: f32, duration: f32) {
        let radius = if radius > 0.0 { radius } else { self.defaults.point_radius };
        self.points.emit(position, color, radius, duration);
    }

    // Colliders

    /// Collider as solid geometry
    pub fn draw_solid_collider(&mut self, collider: &Collider, transform: &Transform, color: Color, duration: f32) {
        match collider.to_world(transform) {
            WorldCollider::Box { center, rotation, size } => {
                self.draw_solid_box(center, rotation, size, color, duration);
            }
            WorldCollider::Capsule { start, end, radius } => {
                self.draw_solid_capsule(start, end, radius, color, duration);
            }
            WorldCollider::Mesh { mesh, transform } => {
                self.draw_solid_mesh(&mesh, &transform, color, duration);
            }
            WorldCollider::Sphere { center, radius } => {
                self.draw_solid_sphere(center, radius, color, duration);
            }
        }
    }

    /// Collider as wireframe
    pub fn draw_wire_collider(&mut self, collider: &Collider, transform: &Transform, color: Color, width: f32, duration: f32) {
        match collider.to_world(transform) {
            WorldCollider::Box { center, rotation, size } => {
                self.draw_wire_box(center, rotation, size, color, width, duration);
            }
            WorldCollider::Capsule { start, end, radius } => {
                self.draw_wire_capsule(start, end, radius, color, width, duration);
            }
            WorldCollider::Mesh { mesh, transform } => {
                self.draw_wire_mesh(&mesh, &transform, color, width, duration, true);
            }
            WorldCollider::Sphere { center, radius } => {
                self.draw_wire_sphere(center, radius, color, width, duration);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WireframeConfig;
    use crate::debug::collider::Axis;
    use crate::debug::mesh_drawer::MaterialKind;
    use approx::assert_relative_eq;

    fn drawer() -> ShapeDrawer {
        crate::foundation::logging::try_init();
        ShapeDrawer::new(&DrawConfig::default())
    }

    fn white() -> Color {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_non_positive_width_uses_default() {
        let mut draw = drawer();
        draw.draw_line(Vec3::zeros(), Vec3::x(), white(), 0.0, 0.0);
        draw.draw_line(Vec3::zeros(), Vec3::y(), white(), 0.02, 0.0);
        let widths: Vec<f32> = draw.lines().lines().map(|line| line.width).collect();
        assert_eq!(widths, vec![0.005, 0.02]);
    }

    #[test]
    fn test_axes_are_colored_arrows() {
        let mut draw = drawer();
        draw.draw_axes(Vec3::zeros(), Quat::identity(), 2.0, 0.0, 0.0);
        // shaft and arrowhead per axis
        assert_eq!(draw.lines().active_count(), 6);
        let red_shaft = draw
            .lines()
            .lines()
            .find(|line| line.points.len() == 2 && line.color.x == 1.0)
            .unwrap();
        assert_relative_eq!(red_shaft.points[1], Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_wire_sphere_circles_have_radius() {
        let mut draw = drawer();
        draw.draw_wire_sphere(Vec3::new(0.0, 1.0, 0.0), 2.0, white(), 0.0, 0.0);
        assert_eq!(draw.lines().active_count(), 3);
        for line in draw.lines().lines() {
            for p in &line.points {
                assert_relative_eq!((p - Vec3::new(0.0, 1.0, 0.0)).norm(), 2.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_wire_ellipsoid_spans_principal_planes() {
        let mut draw = drawer();
        draw.draw_wire_ellipsoid(Vec3::zeros(), Quat::identity(), Vec3::new(1.0, 2.0, 3.0), white(), 0.0, 0.0);
        for line in draw.lines().lines() {
            for p in &line.points {
                let q = p.x.powi(2) + (p.y / 2.0).powi(2) + (p.z / 3.0).powi(2);
                assert_relative_eq!(q, 1.0, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_wire_capsule_stays_on_surface() {
        let mut draw = drawer();
        let (start, end) = (Vec3::zeros(), Vec3::new(1.0, 1.0, 0.0));
        draw.draw_wire_capsule(start, end, 0.5, white(), 0.0, 0.0);
        assert_eq!(draw.lines().active_count(), 4);
        let axis = (end - start).normalize();
        for line in draw.lines().lines() {
            for p in &line.points {
                let t = (p - start).dot(&axis).clamp(0.0, end.norm());
                let nearest = start + axis * t;
                assert_relative_eq!((p - nearest).norm(), 0.5, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_wire_cylinder_side_lines() {
        let mut draw = drawer();
        draw.draw_wire_cylinder(Vec3::zeros(), Vec3::new(0.0, 0.0, 2.0), 0.5, white(), 0.0, 0.0);
        assert_eq!(draw.lines().active_count(), 6);
        for line in draw.lines().lines().filter(|line| line.points.len() == 2) {
            assert_relative_eq!(Vec2::new(line.points[0].x, line.points[0].y).norm(), 0.5, epsilon = 1e-5);
            assert_relative_eq!(line.points[1].z - line.points[0].z, 2.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_wire_cone_rim_radius() {
        let mut draw = drawer();
        draw.draw_wire_cone(Vec3::zeros(), Vec3::new(0.0, 2.0, 0.0), 45.0, white(), 0.0, 0.0);
        let rim = draw.lines().lines().find(|line| line.points.len() == 33).unwrap();
        for p in &rim.points {
            assert_relative_eq!(p.y, 2.0, epsilon = 1e-4);
            assert_relative_eq!(Vec2::new(p.x, p.z).norm(), 2.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_solid_capsule_is_aligned_and_sized() {
        let mut draw = drawer();
        let color = Color::new(1.0, 0.0, 0.0, 1.0);
        draw.draw_solid_capsule(Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0), 0.5, color, 0.0);
        let object = draw.meshes().dynamic_meshes().next().unwrap();
        assert_relative_eq!(object.transform.position, Vec3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(object.transform.rotation * Vec3::y(), Vec3::x(), epsilon = 1e-6);
        let top = object.mesh.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert_relative_eq!(top, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_disk_faces_normal() {
        let mut draw = drawer();
        draw.draw_disk(Vec3::zeros(), Vec3::x(), 2.0, white(), 0.0);
        let object = draw.meshes().meshes().next().unwrap();
        assert_relative_eq!(object.transform.rotation * Vec3::z(), Vec3::x(), epsilon = 1e-6);
        assert_eq!(object.transform.scale, Vec3::new(2.0, 2.0, 1.0));
    }

    #[test]
    fn test_ring_starts_on_axis_x() {
        let mut draw = drawer();
        draw.draw_ring(Vec3::zeros(), Vec3::x(), Vec3::y(), 1.0, 0.25, 0.0, 90.0, white(), 0.0);
        let object = draw.meshes().dynamic_meshes().next().unwrap();
        let rotation = object.transform.rotation;
        assert_relative_eq!(rotation * Vec3::x(), Vec3::x(), epsilon = 1e-6);
        assert_relative_eq!(rotation * Vec3::z(), -Vec3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_sector_is_filled_ring() {
        let mut draw = drawer();
        draw.draw_sector(Vec3::zeros(), Vec3::x(), Vec3::y(), 1.0, 0.0, 45.0, white(), 0.0);
        let object = draw.meshes().dynamic_meshes().next().unwrap();
        assert!(object.mesh.positions.iter().any(|p| p.norm() < 1e-6));
    }

    #[test]
    fn test_solid_collider_dispatch() {
        let mut draw = drawer();
        let transform = Transform::identity();
        let mesh = Rc::clone(&draw.meshes().base_meshes().cube);
        let colliders = [
            Collider::Box {
                center: Vec3::zeros(),
                size: Vec3::new(1.0, 1.0, 1.0),
            },
            Collider::Capsule {
                center: Vec3::zeros(),
                radius: 0.5,
                height: 2.0,
                direction: Axis::Y,
            },
            Collider::Mesh { mesh },
            Collider::Sphere {
                center: Vec3::zeros(),
                radius: 0.5,
            },
        ];
        for collider in &colliders {
            draw.draw_solid_collider(collider, &transform, white(), 0.0);
        }
        assert_eq!(draw.meshes().meshes().count(), 3);
        assert_eq!(draw.meshes().dynamic_meshes().count(), 1);
        assert_eq!(draw.lines().active_count(), 0);
    }

    #[test]
    fn test_wire_collider_dispatch() {
        let mut config = DrawConfig::default();
        config.wireframe = WireframeConfig {
            split_triangles: true,
            ..Default::default()
        };
        let mut draw = ShapeDrawer::new(&config);
        let transform = Transform::identity();
        let mesh = Rc::clone(&draw.meshes().base_meshes().sphere);

        draw.draw_wire_collider(&Collider::Box { center: Vec3::zeros(), size: Vec3::new(1.0, 1.0, 1.0) }, &transform, white(), 0.0, 0.0);
        assert_eq!(draw.lines().active_count(), 1);

        let capsule = Collider::Capsule {
            center: Vec3::zeros(),
            radius: 0.5,
            height: 2.0,
            direction: Axis::Z,
        };
        draw.draw_wire_collider(&capsule, &transform, white(), 0.0, 0.0);
        assert_eq!(draw.lines().active_count(), 5);

        draw.draw_wire_collider(&Collider::Sphere { center: Vec3::zeros(), radius: 1.0 }, &transform, white(), 0.0, 0.0);
        assert_eq!(draw.lines().active_count(), 8);

        draw.draw_wire_collider(&Collider::Mesh { mesh: Rc::clone(&mesh) }, &transform, white(), 0.0, 0.0);
        let object = draw.meshes().meshes().next().unwrap();
        assert_eq!(object.material, MaterialKind::Wire);
        assert_eq!(object.mesh.as_ref().unwrap().vertex_count(), mesh.indices.len());
        assert!(draw.meshes().wire_cache().unwrap().contains(&mesh));
    }

    #[test]
    fn test_disabled_drawer_keeps_ticking() {
        let mut draw = drawer();
        draw.draw_wire_box(Vec3::zeros(), Quat::identity(), Vec3::new(1.0, 1.0, 1.0), white(), 0.0, 1.0);
        draw.set_enabled(false);
        draw.draw_line(Vec3::zeros(), Vec3::x(), white(), 0.0, 1.0);
        draw.draw_solid_sphere(Vec3::zeros(), 1.0, white(), 1.0);
        draw.draw_text("hidden", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), white(), 0.0, 1.0);
        draw.draw_point(Vec3::zeros(), white(), 0.0, 1.0);
        assert_eq!(draw.lines().active_count(), 1);
        assert_eq!(draw.meshes().active_count(), 0);
        assert_eq!(draw.texts().active_count(), 0);
        assert!(draw.points().is_empty());
        assert_eq!(draw.tick(1.0), 1);
        assert_eq!(draw.lines().active_count(), 0);
    }

    #[test]
    fn test_point_uses_default_radius() {
        let mut draw = drawer();
        draw.draw_point(Vec3::zeros(), white(), 0.0, 0.0);
        assert_relative_eq!(draw.points().particles()[0].radius, 0.02);
        assert_eq!(draw.tick(0.016), 1);
    }
}
