use hecs::Entity;

use crate::context::RenderContext;
use crate::ecs::{Light, RenderMesh, Transform};
use crate::error::SceneError;
use crate::overlay::{OverlayElement, OverlayId};
use crate::resources::{Geometry, GeometryId, Material, MaterialId};

/// Everything one scene put into the shared context.
///
/// Scenes allocate through a group instead of touching the context directly,
/// then hand the group back in [`SceneGroup::dispose`] to remove it all.
#[derive(Debug, Default)]
pub struct SceneGroup {
    name: &'static str,
    entities: Vec<Entity>,
    geometries: Vec<GeometryId>,
    materials: Vec<MaterialId>,
    overlays: Vec<OverlayId>,
}

impl SceneGroup {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn geometry(&mut self, ctx: &mut RenderContext, geometry: Geometry) -> GeometryId {
        let id = ctx.resources.add_geometry(geometry);
        self.geometries.push(id);
        id
    }

    pub fn material(&mut self, ctx: &mut RenderContext, material: Material) -> MaterialId {
        let id = ctx.resources.add_material(material);
        self.materials.push(id);
        id
    }

    /// Spawn a drawable entity using handles this group already owns.
    pub fn spawn_mesh(
        &mut self,
        ctx: &mut RenderContext,
        geometry: GeometryId,
        material: MaterialId,
        transform: Transform,
    ) -> Entity {
        let entity = ctx
            .world
            .spawn((transform, RenderMesh::new(geometry, material)));
        self.entities.push(entity);
        entity
    }

    /// Allocate a geometry and a material and spawn a mesh using both.
    pub fn mesh(
        &mut self,
        ctx: &mut RenderContext,
        geometry: Geometry,
        material: Material,
        transform: Transform,
    ) -> Entity {
        let geometry = self.geometry(ctx, geometry);
        let material = self.material(ctx, material);
        self.spawn_mesh(ctx, geometry, material, transform)
    }

    pub fn light(&mut self, ctx: &mut RenderContext, light: Light, transform: Transform) -> Entity {
        let entity = ctx.world.spawn((transform, light));
        self.entities.push(entity);
        entity
    }

    pub fn overlay(&mut self, ctx: &mut RenderContext, element: OverlayElement) -> OverlayId {
        let id = ctx.overlays.add(element);
        self.overlays.push(id);
        id
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Remove everything the group created.
    ///
    /// Keeps going after a failure so one bad handle doesn't strand the rest;
    /// the first failure is returned.
    pub fn dispose(self, ctx: &mut RenderContext) -> Result<(), SceneError> {
        let mut first_error = None;

        for entity in self.entities {
            if ctx.world.despawn(entity).is_err() {
                first_error.get_or_insert(SceneError::Disposal(format!(
                    "{}: entity {entity:?} was already despawned",
                    self.name
                )));
            }
        }
        for id in self.overlays {
            if ctx.overlays.remove(id).is_none() {
                first_error.get_or_insert(SceneError::Disposal(format!(
                    "{}: overlay {id:?} was already removed",
                    self.name
                )));
            }
        }
        for id in self.geometries {
            if let Err(err) = ctx.resources.release_geometry(id) {
                first_error.get_or_insert(err.into());
            }
        }
        for id in self.materials {
            if let Err(err) = ctx.resources.release_material(id) {
                first_error.get_or_insert(err.into());
            }
        }

        log::debug!("[{}] released scene group", self.name);
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::context::{Baseline, Viewport};
    use crate::overlay::Layout;

    fn ctx() -> RenderContext {
        RenderContext::new(Viewport::new(640, 480, 1.0), &Baseline::PORTFOLIO)
    }

    #[test]
    fn dispose_leaves_the_context_empty() {
        let mut ctx = ctx();
        let mut group = SceneGroup::new("test");
        let tile = group.geometry(&mut ctx, Geometry::cuboid(0.25, 0.03, 0.25));
        let light = group.material(&mut ctx, Material::basic(Color::WHITE));
        for i in 0..4 {
            group.spawn_mesh(
                &mut ctx,
                tile,
                light,
                Transform::from_position(glam::Vec3::X * i as f32),
            );
        }
        group.light(
            &mut ctx,
            Light::Ambient {
                color: Color::WHITE,
                intensity: 0.5,
            },
            Transform::new(),
        );
        group.overlay(&mut ctx, OverlayElement::new(Layout::Fill).scene_overlay());

        assert_eq!(ctx.world.len(), 5);
        group.dispose(&mut ctx).unwrap();

        assert_eq!(ctx.world.len(), 0);
        assert_eq!(ctx.resources.live_geometries(), 0);
        assert_eq!(ctx.resources.live_materials(), 0);
        assert!(ctx.overlays.is_empty());
    }

    #[test]
    fn dispose_reports_but_survives_missing_pieces() {
        let mut ctx = ctx();
        let mut group = SceneGroup::new("test");
        let entity = group.mesh(
            &mut ctx,
            Geometry::plane(1.0, 1.0),
            Material::default(),
            Transform::new(),
        );
        ctx.world.despawn(entity).unwrap();

        let result = group.dispose(&mut ctx);
        assert!(matches!(result, Err(SceneError::Disposal(_))));
        assert_eq!(ctx.resources.live_geometries(), 0);
        assert_eq!(ctx.resources.live_materials(), 0);
    }
}
