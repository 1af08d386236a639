//! Geometry and material bookkeeping for the shared scene graph.
//!
//! Scenes never touch GPU buffers directly. They describe shapes and surface
//! parameters here and receive typed handles back; the GPU backend uploads
//! geometry lazily and drops buffers once a handle is released. Every handle
//! can be released exactly once, which makes "did this scene clean up after
//! itself" a question of counting live handles.

use std::collections::{HashMap, VecDeque};

use crate::color::Color;
use crate::error::ResourceError;

/// Type-safe handle to a geometry description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub(crate) u32);

/// Type-safe handle to a material description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub(crate) u32);

/// Shape primitives the scenes are built from.
///
/// Dimensions are full extents, not half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box centered at the origin.
    Box { width: f32, height: f32, depth: f32 },
    /// Plane in the XY axis facing +Z, centered at the origin.
    Plane { width: f32, height: f32 },
    /// UV sphere centered at the origin.
    Sphere { radius: f32, segments: u32, rings: u32 },
}

impl Geometry {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box { width, height, depth }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Self::Plane { width, height }
    }

    pub fn sphere(radius: f32, segments: u32, rings: u32) -> Self {
        Self::Sphere { radius, segments, rings }
    }
}

/// Which faces of a surface are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Front,
    /// Inside faces only, for rooms built from a single box.
    Back,
}

/// Surface parameters for a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    /// Unlit materials ignore the lighting rig entirely.
    pub unlit: bool,
    /// Additive materials are blended on top of what's behind them.
    pub additive: bool,
    pub side: Side,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            roughness: 1.0,
            metalness: 0.0,
            unlit: false,
            additive: false,
            side: Side::Front,
        }
    }
}

impl Material {
    /// A lit surface with the given base color.
    pub fn standard(color: Color, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            ..Default::default()
        }
    }

    /// A flat color that ignores lighting.
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            unlit: true,
            ..Default::default()
        }
    }

    pub fn emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn additive(mut self) -> Self {
        self.additive = true;
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

/// Owner of every geometry and material description in the shared scene.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    geometries: HashMap<GeometryId, Geometry>,
    materials: HashMap<MaterialId, Material>,
    next_id: u32,
    released_geometries: VecDeque<GeometryId>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        let id = GeometryId(self.next());
        self.geometries.insert(id, geometry);
        id
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.next());
        self.materials.insert(id, material);
        id
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(&id)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// Mutable access for animated materials (flickering screens, LEDs).
    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(&id)
    }

    pub fn release_geometry(&mut self, id: GeometryId) -> Result<(), ResourceError> {
        if self.geometries.remove(&id).is_some() {
            self.released_geometries.push_back(id);
            Ok(())
        } else if id.0 < self.next_id {
            Err(ResourceError::AlreadyReleased {
                kind: "geometry",
                id: id.0,
            })
        } else {
            Err(ResourceError::UnknownGeometry(id.0))
        }
    }

    pub fn release_material(&mut self, id: MaterialId) -> Result<(), ResourceError> {
        if self.materials.remove(&id).is_some() {
            Ok(())
        } else if id.0 < self.next_id {
            Err(ResourceError::AlreadyReleased {
                kind: "material",
                id: id.0,
            })
        } else {
            Err(ResourceError::UnknownMaterial(id.0))
        }
    }

    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    /// Hand released geometry ids to the GPU backend so it can drop buffers.
    pub fn drain_released_geometries(&mut self) -> impl Iterator<Item = GeometryId> + '_ {
        self.released_geometries.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_exactly_once() {
        let mut registry = ResourceRegistry::new();
        let geo = registry.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
        let mat = registry.add_material(Material::basic(Color::WHITE));

        assert_eq!(registry.release_geometry(geo), Ok(()));
        assert_eq!(
            registry.release_geometry(geo),
            Err(ResourceError::AlreadyReleased {
                kind: "geometry",
                id: geo.0
            })
        );
        assert_eq!(registry.release_material(mat), Ok(()));
        assert!(registry.release_material(mat).is_err());
        assert_eq!(registry.live_geometries(), 0);
        assert_eq!(registry.live_materials(), 0);
    }

    #[test]
    fn unknown_handles_are_reported() {
        let mut registry = ResourceRegistry::new();
        assert_eq!(
            registry.release_geometry(GeometryId(42)),
            Err(ResourceError::UnknownGeometry(42))
        );
        assert_eq!(
            registry.release_material(MaterialId(7)),
            Err(ResourceError::UnknownMaterial(7))
        );
    }

    #[test]
    fn released_geometry_is_queued_once_for_the_gpu() {
        let mut registry = ResourceRegistry::new();
        let a = registry.add_geometry(Geometry::plane(2.0, 2.0));
        let b = registry.add_geometry(Geometry::sphere(0.5, 8, 8));
        registry.release_geometry(b).unwrap();
        registry.release_geometry(a).unwrap();

        let drained: Vec<_> = registry.drain_released_geometries().collect();
        assert_eq!(drained, vec![b, a]);
        assert_eq!(registry.drain_released_geometries().count(), 0);
    }
}
