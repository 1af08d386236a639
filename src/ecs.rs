//! ECS components for the shared scene world.
//!
//! Scenes spawn entities carrying a [`Transform`] and a [`RenderMesh`] into
//! [`RenderContext::world`](crate::RenderContext::world). The mesh pass draws
//! every entity that has both, so a scene never talks to the GPU directly.
//!
//! # Example
//!
//! ```
//! use folio::{Color, Geometry, Material, RenderMesh, Transform};
//! use folio::ResourceRegistry;
//! use glam::Vec3;
//!
//! let mut world = hecs::World::new();
//! let mut resources = ResourceRegistry::new();
//! let cube = resources.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
//! let red = resources.add_material(Material::standard(Color::hex(0xff0000), 0.5, 0.0));
//!
//! world.spawn((
//!     Transform::from_position(Vec3::new(0.0, 0.5, -2.0)),
//!     RenderMesh::new(cube, red),
//! ));
//! ```

use glam::{Mat4, Quat, Vec3};

use crate::color::Color;
use crate::resources::{GeometryId, MaterialId};

/// Position, rotation, and scale of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the rotation component using a quaternion.
    ///
    /// Use glam's constructors (`Quat::from_rotation_x`, `Quat::from_euler`)
    /// for the common cases.
    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Component that makes an entity drawable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderMesh {
    pub geometry: GeometryId,
    pub material: MaterialId,
    /// Hidden meshes stay in the world but are skipped by the mesh pass.
    pub visible: bool,
}

impl RenderMesh {
    pub fn new(geometry: GeometryId, material: MaterialId) -> Self {
        Self {
            geometry,
            material,
            visible: true,
        }
    }
}

/// Light sources, spawned as entities so they leave with their scene.
///
/// Positional lights read their position from the entity's [`Transform`].
/// Directional lights shine from their position toward the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    /// Sky color from above, ground color from below.
    Hemisphere {
        sky: Color,
        ground: Color,
        intensity: f32,
    },
    Directional {
        color: Color,
        intensity: f32,
    },
    Point {
        color: Color,
        intensity: f32,
        range: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_applies_scale_before_translation() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).uniform_scale(2.0);
        let p = t.matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(3.0, 2.0, 3.0)).length() < 1e-6);
    }
}
