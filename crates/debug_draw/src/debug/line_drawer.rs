//! Polyline drawables and the wire shapes built from them
//!
//! Every wire shape here becomes one or more pooled [`LineObject`]s: a point
//! list plus a color and a width. Curves are tessellated on the CPU. The host
//! renderer draws the active lines as connected strips.

use crate::foundation::math::{look_rotation, Color, Quat, Vec2, Vec3};
use crate::render::dynamic::{DrawHandle, DrawablePool, PoolStats, PooledDrawable};
use std::f32::consts::TAU;

/// Segments used for full ellipses
pub const ELLIPSE_SEGMENTS: u32 = 32;

/// Arrowhead outline in local space, tip at the origin, pointing down +Z
const ARROWHEAD: [[f32; 3]; 13] = [
    [-1.0, -1.0, -1.4142],
    [0.0, 0.0, 0.0],
    [-1.0, -1.0, -1.4142],
    [1.0, -1.0, -1.4142],
    [0.0, 0.0, 0.0],
    [1.0, -1.0, -1.4142],
    [1.0, 1.0, -1.4142],
    [0.0, 0.0, 0.0],
    [1.0, 1.0, -1.4142],
    [-1.0, 1.0, -1.4142],
    [0.0, 0.0, 0.0],
    [-1.0, 1.0, -1.4142],
    [-1.0, -1.0, -1.4142],
];

/// Unit cube traced as one continuous polyline
const WIRE_BOX: [[f32; 3]; 16] = [
    [-0.5, -0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, -0.5, -0.5],
    [-0.5, -0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
];

/// Unit square in the XY plane, closed
const WIRE_RECTANGLE: [[f32; 3]; 5] = [
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
    [0.5, 0.5, 0.0],
    [-0.5, 0.5, 0.0],
    [-0.5, -0.5, 0.0],
];

fn to_vec3(point: &[f32; 3]) -> Vec3 {
    Vec3::new(point[0], point[1], point[2])
}

/// One pooled polyline
#[derive(Debug, Clone)]
pub struct LineObject {
    /// Connected points in world space
    pub points: Vec<Vec3>,
    /// Line color
    pub color: Color,
    /// Width in world units
    pub width: f32,
    visible: bool,
}

impl Default for LineObject {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            width: 0.0,
            visible: false,
        }
    }
}

impl PooledDrawable for LineObject {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Draws lines, polylines and wire shapes
#[derive(Debug)]
pub struct LineDrawer {
    pool: DrawablePool<LineObject>,
}

impl LineDrawer {
    /// Create a drawer with `capacity` line objects ready
    pub fn new(capacity: usize, min_growth: usize) -> Self {
        Self {
            pool: DrawablePool::new("line", capacity).with_min_growth(min_growth),
        }
    }

    fn emit<I>(&mut self, points: I, color: Color, width: f32, duration: f32) -> Option<DrawHandle>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let (handle, line) = self.pool.spawn(duration)?;
        line.points.clear();
        line.points.extend(points);
        line.color = color;
        line.width = width;
        Some(handle)
    }

    /// Straight segment
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, width: f32, duration: f32) -> Option<DrawHandle> {
        self.emit([start, end], color, width, duration)
    }

    /// Connected points
    pub fn draw_polyline(&mut self, points: &[Vec3], color: Color, width: f32, duration: f32) -> Option<DrawHandle> {
        self.emit(points.iter().copied(), color, width, duration)
    }

    /// Connected points given in local space, placed by scale, rotation and position
    pub fn draw_polyline_transformed(
        &mut self,
        points: &[Vec3],
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        color: Color,
        width: f32,
        duration: f32,
    ) -> Option<DrawHandle> {
        self.emit(
            points.iter().map(|p| rotation * scale.component_mul(p) + position),
            color,
            width,
            duration,
        )
    }

    /// Segment from `origin` along `direction` with an arrowhead at the far end
    pub fn draw_ray(&mut self, origin: Vec3, direction: Vec3, color: Color, width: f32, duration: f32) {
        let end = origin + direction;
        self.draw_line(origin, end, color, width, duration);
        let size = 0.1 * direction.norm().min(0.2);
        let arrowhead: Vec<Vec3> = ARROWHEAD.iter().map(to_vec3).collect();
        self.draw_polyline_transformed(
            &arrowhead,
            end,
            look_rotation(direction, Vec3::y()),
            Vec3::new(size, size, size),
            color,
            width,
            duration,
        );
    }

    /// Arc of an ellipse
    ///
    /// `axis_y` is the normal of the ellipse plane. Angle 0 lies along the
    /// component of `axis_x` in that plane, and `radii` are measured along angle
    /// 0 and angle 90. Angles are in degrees.
    pub fn draw_elliptic_arc(
        &mut self,
        origin: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        radii: Vec2,
        start_angle: f32,
        end_angle: f32,
        segments: u32,
        color: Color,
        width: f32,
        duration: f32,
    ) -> Option<DrawHandle> {
        let segments = segments.max(1);
        let rotation = look_rotation(axis_x.cross(&axis_y), axis_y);
        let turn = (end_angle - start_angle).to_radians() / segments as f32;
        let start = start_angle.to_radians();
        self.emit(
            (0..=segments).map(|i| {
                let (sin, cos) = (turn * i as f32 + start).sin_cos();
                rotation * Vec3::new(cos * radii.x, 0.0, sin * radii.y) + origin
            }),
            color,
            width,
            duration,
        )
    }

    /// Full ellipse with [`ELLIPSE_SEGMENTS`] segments
    pub fn draw_ellipse(
        &mut self,
        center: Vec3,
        axis_x: Vec3,
        axis_y: Vec3,
        radii: Vec2,
        color: Color,
        width: f32,
        duration: f32,
    ) -> Option<DrawHandle> {
        self.draw_elliptic_arc(center, axis_x, axis_y, radii, 0.0, 360.0, ELLIPSE_SEGMENTS, color, width, duration)
    }

    /// Box edges as a single polyline
    pub fn draw_wire_box(
        &mut self,
        center: Vec3,
        rotation: Quat,
        size: Vec3,
        color: Color,
        width: f32,
        duration: f32,
    ) -> Option<DrawHandle> {
        let outline: Vec<Vec3> = WIRE_BOX.iter().map(to_vec3).collect();
        self.draw_polyline_transformed(&outline, center, rotation, size, color, width, duration)
    }

    /// Rectangle outline in the rotated XY plane
    pub fn draw_wire_rectangle(
        &mut self,
        center: Vec3,
        rotation: Quat,
        size: Vec2,
        color: Color,
        width: f32,
        duration: f32,
    ) -> Option<DrawHandle> {
        let outline: Vec<Vec3> = WIRE_RECTANGLE.iter().map(to_vec3).collect();
        let scale = Vec3::new(size.x, size.y, 1.0);
        self.draw_polyline_transformed(&outline, center, rotation, scale, color, width, duration)
    }

    /// Camera frustum looking down the rotated +Z axis
    ///
    /// `vertical_fov` is in degrees.
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
    ) -> Option<DrawHandle> {
        let tan_y = (0.5 * vertical_fov.to_radians()).tan();
        let (near_y, far_y) = (tan_y * near, tan_y * far);
        let (near_x, far_x) = (near_y * aspect, far_y * aspect);

        let right = rotation * Vec3::x();
        let up = rotation * Vec3::y();
        let forward = rotation * Vec3::z();
        let far_center = origin + far * forward;
        let near_center = origin + near * forward;

        let corner = |center: Vec3, x: f32, y: f32| center + up * y + right * x;
        let c0 = corner(far_center, -far_x, far_y);
        let c1 = corner(far_center, far_x, far_y);
        let c2 = corner(far_center, -far_x, -far_y);
        let c3 = corner(far_center, far_x, -far_y);
        let c4 = corner(near_center, -near_x, near_y);
        let c5 = corner(near_center, near_x, near_y);
        let c6 = corner(near_center, -near_x, -near_y);
        let c7 = corner(near_center, near_x, -near_y);

        self.emit(
            [c0, c1, c3, c2, c0, c4, c5, c1, c5, c7, c3, c7, c6, c2, c6, c4],
            color,
            width,
            duration,
        )
    }

    /// Stadium outline: two half circles joined by straight sides
    ///
    /// The outline lies in the plane perpendicular to `normal`, around the
    /// segment from `start` to `end`.
    pub fn draw_wire_stadium(
        &mut self,
        start: Vec3,
        end: Vec3,
        normal: Vec3,
        radius: f32,
        color: Color,
        width: f32,
        duration: f32,
    ) -> Option<DrawHandle> {
        const CAP_POINTS: u32 = 17;
        const POINTS: u32 = 35;
        let rotation = look_rotation(end - start, normal);
        let turn = TAU / (POINTS - 3) as f32;
        let arm = |angle: f32| {
            let (sin, cos) = angle.sin_cos();
            rotation * Vec3::new(cos * radius, 0.0, sin * radius)
        };
        let first = arm(0.0) + end;

        let far_cap = (1..CAP_POINTS).map(|i| arm(turn * i as f32) + end);
        let near_cap = (CAP_POINTS..POINTS - 1).map(|i| arm(turn * (i - 1) as f32) + start);
        let points = std::iter::once(first)
            .chain(far_cap)
            .chain(near_cap)
            .chain(std::iter::once(first));
        self.emit(points, color, width, duration)
    }

    /// Elliptic cone from `origin` to a rim centered at `origin + axis_y`
    ///
    /// The rim radii are the lengths of `axis_x` and `axis_z`. Eight spokes run
    /// from the apex to the rim.
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
        const SPOKE_POINTS: u32 = 16;
        let rotation = look_rotation(axis_z, axis_y);
        let radii = Vec2::new(axis_x.norm(), axis_z.norm());
        let turn = TAU / SPOKE_POINTS as f32;
        let rim_center = origin + axis_y;
        let spokes = (0..SPOKE_POINTS / 2).flat_map(|i| {
            let (sin, cos) = (turn * (2 * i) as f32).sin_cos();
            [origin, rotation * Vec3::new(cos * radii.x, 0.0, sin * radii.y) + rim_center]
        });
        self.emit(spokes, color, width, duration);
        self.draw_ellipse(rim_center, axis_x, axis_y, radii, color, width, duration);
    }

    /// Advance line countdowns; returns how many expired
    pub fn tick(&mut self, delta_time: f32) -> usize {
        self.pool.tick(delta_time)
    }

    /// Remove a line before it expires
    pub fn release(&mut self, handle: DrawHandle) -> bool {
        self.pool.release(handle)
    }

    /// Active lines, for the host renderer
    pub fn lines(&self) -> impl Iterator<Item = &LineObject> + '_ {
        self.pool.active()
    }

    /// Active line by handle
    pub fn get(&self, handle: DrawHandle) -> Option<&LineObject> {
        self.pool.get(handle)
    }

    /// Number of active lines
    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Line pool size
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Suspend or resume drawing
    pub fn set_enabled(&mut self, enabled: bool) {
        self.pool.set_enabled(enabled);
    }

    /// Pool statistics
    pub fn stats(&self) -> &PoolStats {
        self.pool.stats()
    }
}
