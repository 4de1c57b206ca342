//! Solid and wireframe mesh drawables
//!
//! Two pools back this drawer. The base pool holds objects that reference a
//! shared mesh, either one of the precomputed unit shapes or a caller mesh,
//! and place it with a transform. The dynamic pool holds objects that own a
//! [`MeshBuffer`] regenerated in place each time the slot is reused, for
//! shapes such as capsules and ring sections whose proportions cannot be
//! reached by scaling a unit mesh.

use crate::config::{DefaultsConfig, GenerationConfig, PoolConfig, WireframeConfig};
use crate::debug::wire_cache::WireMeshCache;
use crate::foundation::math::{Color, Quat, Transform, Vec2, Vec3};
use crate::render::dynamic::{DrawHandle, DrawablePool, PoolStats, PooledDrawable};
use crate::render::generation::{
    create_box, create_capsule, create_ellipsoid, create_rectangle, create_ring_section, BoxParams,
    CapsuleParams, EllipsoidParams, RectangleParams, RingSectionParams,
};
use crate::render::MeshBuffer;
use log::{debug, warn};
use std::rc::Rc;

/// Alpha at or above which a solid color is drawn opaque
pub const OPAQUE_ALPHA_THRESHOLD: f32 = 0.999;

/// Factor from world line width to wireframe shader thickness
pub const WIRE_THICKNESS_SCALE: f32 = 20_000.0;

/// Material family the host should render an object with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Lit, depth-writing
    SolidOpaque,
    /// Lit, alpha blended
    SolidTransparent,
    /// Edges only
    Wire,
}

impl MaterialKind {
    /// Opaque or transparent solid depending on the color's alpha
    pub fn for_solid(color: &Color) -> Self {
        if color.w >= OPAQUE_ALPHA_THRESHOLD {
            Self::SolidOpaque
        } else {
            Self::SolidTransparent
        }
    }
}

/// Pooled object drawing a shared mesh
#[derive(Debug, Clone)]
pub struct MeshObject {
    /// Mesh to draw
    pub mesh: Option<Rc<MeshBuffer>>,
    /// Placement in world space
    pub transform: Transform,
    /// Material family
    pub material: MaterialKind,
    /// Tint
    pub color: Color,
    /// Shader thickness for [`MaterialKind::Wire`]
    pub wire_thickness: f32,
    visible: bool,
}

impl Default for MeshObject {
    fn default() -> Self {
        Self {
            mesh: None,
            transform: Transform::identity(),
            material: MaterialKind::SolidOpaque,
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            wire_thickness: 0.0,
            visible: false,
        }
    }
}

impl PooledDrawable for MeshObject {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            // let go of caller meshes once the slot goes idle
            self.mesh = None;
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Pooled object owning a mesh that is regenerated on reuse
#[derive(Debug, Clone)]
pub struct DynamicMeshObject {
    /// Generated geometry; its allocation survives slot reuse
    pub mesh: MeshBuffer,
    /// Placement in world space
    pub transform: Transform,
    /// Material family
    pub material: MaterialKind,
    /// Tint
    pub color: Color,
    visible: bool,
}

impl Default for DynamicMeshObject {
    fn default() -> Self {
        Self {
            mesh: MeshBuffer::new(),
            transform: Transform::identity(),
            material: MaterialKind::SolidOpaque,
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            visible: false,
        }
    }
}

impl PooledDrawable for DynamicMeshObject {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

fn generated(fill: impl FnOnce(&mut MeshBuffer)) -> Rc<MeshBuffer> {
    let mut mesh = MeshBuffer::new();
    fill(&mut mesh);
    Rc::new(mesh)
}

/// Unit shapes generated once and shared by every draw call
#[derive(Debug, Clone)]
pub struct BaseMeshes {
    /// Unit cube centered at the origin
    pub cube: Rc<MeshBuffer>,
    /// Unit-radius sphere
    pub sphere: Rc<MeshBuffer>,
    /// Unit-radius disk in the XY plane, both sides
    pub disk: Rc<MeshBuffer>,
    /// Unit square in the XY plane facing +Z
    pub rectangle: Rc<MeshBuffer>,
}

impl BaseMeshes {
    /// Generate all base shapes
    pub fn generate(generation: &GenerationConfig, ring_segments: u32) -> Self {
        let sphere = EllipsoidParams::new(
            Vec3::new(1.0, 1.0, 1.0),
            generation.sphere_meridians,
            generation.sphere_parallels,
        );
        let disk = RingSectionParams {
            segments: ring_segments,
            ..Default::default()
        };
        Self {
            cube: generated(|mesh| create_box(mesh, &BoxParams::default())),
            sphere: generated(|mesh| create_ellipsoid(mesh, &sphere)),
            disk: generated(|mesh| create_ring_section(mesh, &disk)),
            rectangle: generated(|mesh| create_rectangle(mesh, &RectangleParams::default())),
        }
    }
}

/// Draws solid shapes, caller meshes, and wireframes
#[derive(Debug)]
pub struct MeshDrawer {
    meshes: DrawablePool<MeshObject>,
    dynamic_meshes: DrawablePool<DynamicMeshObject>,
    base: BaseMeshes,
    capsule_tessellation: (u32, u32),
    ring_segments: u32,
    /// Present when the host needs split-triangle wireframes
    wire_cache: Option<WireMeshCache>,
}

impl MeshDrawer {
    /// Create a drawer, generating the base meshes
    pub fn new(
        pools: &PoolConfig,
        defaults: &DefaultsConfig,
        generation: &GenerationConfig,
        wireframe: &WireframeConfig,
    ) -> Self {
        let base = BaseMeshes::generate(generation, defaults.ring_segments);
        debug!(
            "Generated base meshes: sphere {} vertices, disk {} vertices",
            base.sphere.vertex_count(),
            base.disk.vertex_count()
        );
        Self {
            meshes: DrawablePool::new("mesh", pools.mesh_capacity).with_min_growth(pools.min_growth),
            dynamic_meshes: DrawablePool::new("dynamic mesh", pools.dynamic_mesh_capacity)
                .with_min_growth(pools.min_growth),
            base,
            capsule_tessellation: (generation.capsule_meridians, generation.capsule_cap_parallels),
            ring_segments: defaults.ring_segments,
            wire_cache: wireframe
                .split_triangles
                .then(|| WireMeshCache::new(wireframe.cache_capacity)),
        }
    }

    fn emit(
        &mut self,
        mesh: Rc<MeshBuffer>,
        transform: Transform,
        material: MaterialKind,
        color: Color,
        wire_thickness: f32,
        duration: f32,
    ) -> Option<DrawHandle> {
        let (handle, object) = self.meshes.spawn(duration)?;
        object.mesh = Some(mesh);
        object.transform = transform;
        object.material = material;
        object.color = color;
        object.wire_thickness = wire_thickness;
        Some(handle)
    }

    fn emit_dynamic<F>(&mut self, transform: Transform, color: Color, duration: f32, generate: F) -> Option<DrawHandle>
    where
        F: FnOnce(&mut MeshBuffer),
    {
        let (handle, object) = self.dynamic_meshes.spawn(duration)?;
        generate(&mut object.mesh);
        object.transform = transform;
        object.material = MaterialKind::for_solid(&color);
        object.color = color;
        Some(handle)
    }

    /// Caller mesh, solid
    pub fn draw_solid_mesh(
        &mut self,
        mesh: &Rc<MeshBuffer>,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        color: Color,
        duration: f32,
    ) -> Option<DrawHandle> {
        let transform = Transform::new(position, rotation, scale);
        self.emit(Rc::clone(mesh), transform, MaterialKind::for_solid(&color), color, 0.0, duration)
    }

    /// Caller mesh, wireframe
    ///
    /// When the host needs split triangles the mesh is split first. With
    /// `use_cache` the split is looked up in and stored to the LRU cache;
    /// without it the mesh is split for this call only. A mesh that fails to
    /// split is drawn as given.
    pub fn draw_wire_mesh(
        &mut self,
        mesh: &Rc<MeshBuffer>,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        color: Color,
        width: f32,
        duration: f32,
        use_cache: bool,
    ) -> Option<DrawHandle> {
        if !self.meshes.is_enabled() {
            return None;
        }
        let wire_mesh = match &mut self.wire_cache {
            Some(cache) if use_cache => cache.get_or_split(mesh),
            Some(_) => mesh.split_triangles().map(Rc::new),
            None => Ok(Rc::clone(mesh)),
        }
        .unwrap_or_else(|err| {
            warn!("Drawing wire mesh unsplit: {err}");
            Rc::clone(mesh)
        });
        let transform = Transform::new(position, rotation, scale);
        self.emit(wire_mesh, transform, MaterialKind::Wire, color, width * WIRE_THICKNESS_SCALE, duration)
    }

    /// Box with the given edge lengths
    pub fn draw_solid_box(&mut self, center: Vec3, rotation: Quat, size: Vec3, color: Color, duration: f32) -> Option<DrawHandle> {
        let cube = Rc::clone(&self.base.cube);
        self.draw_solid_mesh(&cube, center, rotation, size, color, duration)
    }

    /// Ellipsoid with the given semi-axes
    pub fn draw_solid_ellipsoid(
        &mut self,
        center: Vec3,
        rotation: Quat,
        radii: Vec3,
        color: Color,
        duration: f32,
    ) -> Option<DrawHandle> {
        let sphere = Rc::clone(&self.base.sphere);
        self.draw_solid_mesh(&sphere, center, rotation, radii, color, duration)
    }

    /// Rectangle in the rotated XY plane
    pub fn draw_solid_rectangle(
        &mut self,
        center: Vec3,
        rotation: Quat,
        size: Vec2,
        color: Color,
        duration: f32,
    ) -> Option<DrawHandle> {
        let rectangle = Rc::clone(&self.base.rectangle);
        self.draw_solid_mesh(&rectangle, center, rotation, Vec3::new(size.x, size.y, 1.0), color, duration)
    }

    /// Filled ellipse in the rotated XY plane
    pub fn draw_elliptic_disk(
        &mut self,
        center: Vec3,
        rotation: Quat,
        radii: Vec2,
        color: Color,
        duration: f32,
    ) -> Option<DrawHandle> {
        let disk = Rc::clone(&self.base.disk);
        self.draw_solid_mesh(&disk, center, rotation, Vec3::new(radii.x, radii.y, 1.0), color, duration)
    }

    /// Capsule along the rotated +Y axis
    ///
    /// `height` is the overall length including both caps.
    pub fn draw_solid_capsule(
        &mut self,
        center: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
        duration: f32,
    ) -> Option<DrawHandle> {
        let (meridians, cap_parallels) = self.capsule_tessellation;
        let params = CapsuleParams::from_height(radius, height).with_tessellation(meridians, cap_parallels);
        let transform = Transform::from_position_rotation(center, rotation);
        self.emit_dynamic(transform, color, duration, |mesh| create_capsule(mesh, &params))
    }

    /// Section of an elliptic ring in the rotated XY plane
    ///
    /// Angles are in degrees. A width equal to the radius gives a filled sector.
    pub fn draw_elliptic_ring_section(
        &mut self,
        center: Vec3,
        rotation: Quat,
        radii: Vec2,
        width: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
        duration: f32,
    ) -> Option<DrawHandle> {
        let params = RingSectionParams {
            radii,
            width,
            start_angle,
            end_angle,
            segments: self.ring_segments,
        };
        let transform = Transform::from_position_rotation(center, rotation);
        self.emit_dynamic(transform, color, duration, |mesh| create_ring_section(mesh, &params))
    }

    /// Advance both pools; returns how many objects expired
    pub fn tick(&mut self, delta_time: f32) -> usize {
        self.meshes.tick(delta_time) + self.dynamic_meshes.tick(delta_time)
    }

    /// Remove a shared-mesh object before it expires
    pub fn release(&mut self, handle: DrawHandle) -> bool {
        self.meshes.release(handle)
    }

    /// Remove a dynamic-mesh object before it expires
    pub fn release_dynamic(&mut self, handle: DrawHandle) -> bool {
        self.dynamic_meshes.release(handle)
    }

    /// Active shared-mesh objects
    pub fn meshes(&self) -> impl Iterator<Item = &MeshObject> + '_ {
        self.meshes.active()
    }

    /// Active dynamic-mesh objects
    pub fn dynamic_meshes(&self) -> impl Iterator<Item = &DynamicMeshObject> + '_ {
        self.dynamic_meshes.active()
    }

    /// Shared-mesh object by handle
    pub fn get(&self, handle: DrawHandle) -> Option<&MeshObject> {
        self.meshes.get(handle)
    }

    /// Dynamic-mesh object by handle
    pub fn get_dynamic(&self, handle: DrawHandle) -> Option<&DynamicMeshObject> {
        self.dynamic_meshes.get(handle)
    }

    /// Active objects across both pools
    pub fn active_count(&self) -> usize {
        self.meshes.active_count() + self.dynamic_meshes.active_count()
    }

    /// Precomputed unit shapes
    pub fn base_meshes(&self) -> &BaseMeshes {
        &self.base
    }

    /// Split-mesh cache, when the host needs one
    pub fn wire_cache(&self) -> Option<&WireMeshCache> {
        self.wire_cache.as_ref()
    }

    /// Suspend or resume drawing
    pub fn set_enabled(&mut self, enabled: bool) {
        self.meshes.set_enabled(enabled);
        self.dynamic_meshes.set_enabled(enabled);
    }

    /// Statistics of the shared-mesh and dynamic-mesh pools
    pub fn stats(&self) -> (&PoolStats, &PoolStats) {
        (self.meshes.stats(), self.dynamic_meshes.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn drawer(split_triangles: bool) -> MeshDrawer {
        let wireframe = WireframeConfig {
            split_triangles,
            ..Default::default()
        };
        MeshDrawer::new(&PoolConfig::default(), &DefaultsConfig::default(), &GenerationConfig::default(), &wireframe)
    }

    fn opaque() -> Color {
        Color::new(0.2, 0.4, 0.6, 1.0)
    }

    #[test]
    fn test_material_follows_alpha() {
        assert_eq!(MaterialKind::for_solid(&opaque()), MaterialKind::SolidOpaque);
        assert_eq!(MaterialKind::for_solid(&Color::new(1.0, 1.0, 1.0, 0.9995)), MaterialKind::SolidOpaque);
        assert_eq!(MaterialKind::for_solid(&Color::new(1.0, 1.0, 1.0, 0.5)), MaterialKind::SolidTransparent);
    }

    #[test]
    fn test_base_meshes_are_unit_sized() {
        let meshes = drawer(false);
        let base = meshes.base_meshes();
        for p in &base.sphere.positions {
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-4);
        }
        for p in &base.disk.positions {
            assert!(p.norm() <= 1.0 + 1e-4);
            assert_relative_eq!(p.z, 0.0);
        }
        assert_eq!(base.cube.vertex_count(), 24);
        assert_eq!(base.rectangle.vertex_count(), 4);
    }

    #[test]
    fn test_box_shares_base_cube() {
        let mut meshes = drawer(false);
        let size = Vec3::new(1.0, 2.0, 3.0);
        let handle = meshes.draw_solid_box(Vec3::zeros(), Quat::identity(), size, opaque(), 0.0).unwrap();
        let object = meshes.get(handle).unwrap();
        assert!(Rc::ptr_eq(object.mesh.as_ref().unwrap(), &meshes.base_meshes().cube));
        assert_eq!(object.transform.scale, size);
        assert_eq!(object.material, MaterialKind::SolidOpaque);
    }

    #[test]
    fn test_flat_shapes_keep_unit_depth() {
        let mut meshes = drawer(false);
        let rect = meshes
            .draw_solid_rectangle(Vec3::zeros(), Quat::identity(), Vec2::new(3.0, 2.0), opaque(), 0.0)
            .unwrap();
        assert_eq!(meshes.get(rect).unwrap().transform.scale, Vec3::new(3.0, 2.0, 1.0));
        let disk = meshes
            .draw_elliptic_disk(Vec3::zeros(), Quat::identity(), Vec2::new(0.5, 0.25), opaque(), 0.0)
            .unwrap();
        assert_eq!(meshes.get(disk).unwrap().transform.scale, Vec3::new(0.5, 0.25, 1.0));
    }

    #[test]
    fn test_capsule_is_generated_to_height() {
        let mut meshes = drawer(false);
        let handle = meshes
            .draw_solid_capsule(Vec3::zeros(), Quat::identity(), 3.0, 0.5, Color::new(1.0, 0.0, 0.0, 0.3), 0.0)
            .unwrap();
        let object = meshes.get_dynamic(handle).unwrap();
        assert_eq!(object.material, MaterialKind::SolidTransparent);
        let top = object.mesh.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let bottom = object.mesh.positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert_relative_eq!(top, 1.5, epsilon = 1e-5);
        assert_relative_eq!(bottom, -1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_dynamic_slot_regenerates_in_place() {
        let mut meshes = drawer(false);
        meshes.draw_solid_capsule(Vec3::zeros(), Quat::identity(), 2.0, 0.5, opaque(), 0.0);
        meshes.tick(0.016);
        let handle = meshes
            .draw_elliptic_ring_section(Vec3::zeros(), Quat::identity(), Vec2::new(1.0, 1.0), 0.25, 0.0, 90.0, opaque(), 0.0)
            .unwrap();
        let object = meshes.get_dynamic(handle).unwrap();
        let params = RingSectionParams {
            segments: 32,
            ..Default::default()
        };
        assert_eq!(object.mesh.vertex_count(), params.vertex_count());
        assert_eq!(meshes.stats().1.growth_events, 1);
    }

    #[test]
    fn test_wire_mesh_without_split_uses_source() {
        let mut meshes = drawer(false);
        let cube = Rc::clone(&meshes.base_meshes().cube);
        let handle = meshes
            .draw_wire_mesh(&cube, Vec3::zeros(), Quat::identity(), Vec3::new(1.0, 1.0, 1.0), opaque(), 0.005, 0.0, true)
            .unwrap();
        let object = meshes.get(handle).unwrap();
        assert!(Rc::ptr_eq(object.mesh.as_ref().unwrap(), &cube));
        assert_eq!(object.material, MaterialKind::Wire);
        assert_relative_eq!(object.wire_thickness, 100.0, epsilon = 1e-3);
        assert!(meshes.wire_cache().is_none());
    }

    #[test]
    fn test_wire_mesh_split_and_cached() {
        let mut meshes = drawer(true);
        let cube = Rc::clone(&meshes.base_meshes().cube);
        let unit = Vec3::new(1.0, 1.0, 1.0);
        let first = meshes
            .draw_wire_mesh(&cube, Vec3::zeros(), Quat::identity(), unit, opaque(), 0.005, 1.0, true)
            .unwrap();
        let second = meshes
            .draw_wire_mesh(&cube, Vec3::zeros(), Quat::identity(), unit, opaque(), 0.005, 1.0, true)
            .unwrap();
        let a = meshes.get(first).unwrap().mesh.clone().unwrap();
        let b = meshes.get(second).unwrap().mesh.clone().unwrap();
        assert_eq!(a.vertex_count(), 36);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(meshes.wire_cache().unwrap().stats().hits, 1);

        let uncached = meshes
            .draw_wire_mesh(&cube, Vec3::zeros(), Quat::identity(), unit, opaque(), 0.005, 1.0, false)
            .unwrap();
        let c = meshes.get(uncached).unwrap().mesh.clone().unwrap();
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(c.vertex_count(), 36);
    }

    #[test]
    fn test_expired_slot_releases_caller_mesh() {
        let mut meshes = drawer(false);
        let mesh = Rc::new(MeshBuffer::new());
        meshes.draw_solid_mesh(&mesh, Vec3::zeros(), Quat::identity(), Vec3::new(1.0, 1.0, 1.0), opaque(), 0.0);
        assert_eq!(Rc::strong_count(&mesh), 2);
        meshes.tick(0.016);
        assert_eq!(Rc::strong_count(&mesh), 1);
    }

    #[test]
    fn test_invalid_wire_mesh_drawn_unsplit() {
        let mut meshes = drawer(true);
        let mut broken = MeshBuffer::new();
        broken.reset(3, 3);
        broken.indices[1] = 42;
        let broken = Rc::new(broken);
        let unit = Vec3::new(1.0, 1.0, 1.0);
        for use_cache in [true, false] {
            let handle = meshes
                .draw_wire_mesh(&broken, Vec3::zeros(), Quat::identity(), unit, opaque(), 0.005, 0.0, use_cache)
                .unwrap();
            let object = meshes.get(handle).unwrap();
            assert!(Rc::ptr_eq(object.mesh.as_ref().unwrap(), &broken));
            assert_eq!(object.material, MaterialKind::Wire);
        }
        assert!(meshes.wire_cache().unwrap().is_empty());
    }

    #[test]
    fn test_disabled_drawer_draws_nothing() {
        let mut meshes = drawer(true);
        meshes.set_enabled(false);
        let cube = Rc::clone(&meshes.base_meshes().cube);
        let unit = Vec3::new(1.0, 1.0, 1.0);
        assert!(meshes.draw_wire_mesh(&cube, Vec3::zeros(), Quat::identity(), unit, opaque(), 0.005, 0.0, true).is_none());
        assert!(meshes.draw_solid_capsule(Vec3::zeros(), Quat::identity(), 2.0, 0.5, opaque(), 0.0).is_none());
        assert_eq!(meshes.active_count(), 0);
        assert!(meshes.wire_cache().unwrap().is_empty());
    }
}
