use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use hecs::Entity;

use crate::color::Color;
use crate::context::RenderContext;
use crate::ecs::{Light, Transform};
use crate::error::SceneError;
use crate::resources::{Geometry, Material};
use crate::scene::{Frame, Scene, SceneGroup};

const TILE_SIZE: f32 = 0.25;
const BOARD_Y: f32 = 0.80;
const LOOK_TARGET: Vec3 = Vec3::new(0.0, 0.88, 0.0);

/// An 8x8 board on a table under an overhead lamp.
pub struct ChessScene {
    group: SceneGroup,
    /// Lights whose intensity follows the global lights switch, with their
    /// intensity when the switch is on.
    switchable: Vec<(Entity, f32)>,
    time: f32,
}

impl ChessScene {
    pub const NAME: &'static str = "Chessboard";

    pub fn new(ctx: &mut RenderContext) -> Result<Self, SceneError> {
        let mut group = SceneGroup::new("chess");

        let hemi = group.light(
            ctx,
            Light::Hemisphere {
                sky: Color::WHITE,
                ground: Color::hex(0x202030),
                intensity: 0.75,
            },
            Transform::from_position(Vec3::new(0.0, 3.0, 0.0)),
        );
        let lamp = group.light(
            ctx,
            Light::Point {
                color: Color::WHITE,
                intensity: 9.0,
                range: 15.0,
            },
            Transform::from_position(Vec3::new(0.0, 3.2, 0.8)),
        );
        group.light(
            ctx,
            Light::Directional {
                color: Color::WHITE,
                intensity: 0.35,
            },
            Transform::from_position(Vec3::new(-2.5, 2.2, 2.0)),
        );

        group.mesh(
            ctx,
            Geometry::plane(12.0, 12.0),
            Material::standard(Color::hex(0x0a0a0f), 0.95, 0.02),
            Transform::new().rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        );
        group.mesh(
            ctx,
            Geometry::cuboid(2.6, 0.14, 2.6),
            Material::standard(Color::hex(0x0b1020), 0.85, 0.08),
            Transform::from_position(Vec3::new(0.0, 0.72, 0.0)),
        );

        let tile = group.geometry(ctx, Geometry::cuboid(TILE_SIZE, 0.03, TILE_SIZE));
        let light_tile = group.material(ctx, Material::standard(Color::hex(0xf0f0f6), 0.55, 0.02));
        let dark_tile = group.material(ctx, Material::standard(Color::hex(0x23263a), 0.55, 0.02));
        let offset = (8.0 * TILE_SIZE) / 2.0 - TILE_SIZE / 2.0;
        for row in 0..8 {
            for col in 0..8 {
                let material = if (row + col) % 2 == 0 {
                    light_tile
                } else {
                    dark_tile
                };
                let position = Vec3::new(
                    col as f32 * TILE_SIZE - offset,
                    BOARD_Y,
                    row as f32 * TILE_SIZE - offset,
                );
                group.spawn_mesh(ctx, tile, material, Transform::from_position(position));
            }
        }

        group.mesh(
            ctx,
            Geometry::cuboid(8.0 * TILE_SIZE + 0.12, 0.06, 8.0 * TILE_SIZE + 0.12),
            Material::standard(Color::hex(0x05060b), 0.65, 0.15),
            Transform::from_position(Vec3::new(0.0, BOARD_Y - 0.005, 0.0)),
        );

        ctx.camera.position = Vec3::new(0.0, 1.45, 2.15);
        ctx.camera.look_at(LOOK_TARGET);

        let scene = Self {
            group,
            switchable: vec![(hemi, 0.75), (lamp, 9.0)],
            time: 0.0,
        };
        scene.apply_lights(ctx);
        Ok(scene)
    }

    /// Dim the rig to a third when the room lights are off.
    fn apply_lights(&self, ctx: &mut RenderContext) {
        let scale = if ctx.flags.lights_on { 1.0 } else { 1.0 / 3.0 };
        for &(entity, full) in &self.switchable {
            if let Ok(mut light) = ctx.world.get::<&mut Light>(entity) {
                match &mut *light {
                    Light::Hemisphere { intensity, .. } | Light::Point { intensity, .. } => {
                        *intensity = full * scale;
                    }
                    _ => {}
                }
            }
        }
    }
}

impl Scene for ChessScene {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, frame: &mut Frame<'_>) {
        self.time += frame.dt;
        frame.ctx.camera.position.x = (self.time * 0.25).sin() * 0.18;
        frame.ctx.camera.look_at(LOOK_TARGET);
        self.apply_lights(frame.ctx);
    }

    fn dispose(self: Box<Self>, ctx: &mut RenderContext) -> Result<(), SceneError> {
        self.group.dispose(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Baseline, Viewport};
    use crate::ecs::RenderMesh;
    use crate::input::Input;

    fn ctx() -> RenderContext {
        RenderContext::new(Viewport::new(800, 600, 1.0), &Baseline::PORTFOLIO)
    }

    #[test]
    fn board_shares_one_tile_geometry() {
        let mut ctx = ctx();
        let _chess = ChessScene::new(&mut ctx).unwrap();

        let meshes = ctx.world.query_mut::<&RenderMesh>().into_iter().count();
        // floor, table, 64 tiles, frame
        assert_eq!(meshes, 67);
        // floor, table, tile, frame
        assert_eq!(ctx.resources.live_geometries(), 4);
    }

    #[test]
    fn lamp_follows_the_lights_switch() {
        let mut ctx = ctx();
        let mut chess = ChessScene::new(&mut ctx).unwrap();
        let lamp = chess.switchable[1].0;
        let intensity = |ctx: &RenderContext| match *ctx.world.get::<&Light>(lamp).unwrap() {
            Light::Point { intensity, .. } => intensity,
            _ => unreachable!(),
        };
        assert!((intensity(&ctx) - 3.0).abs() < 1e-5);

        ctx.flags.lights_on = true;
        let input = Input::new();
        let mut frame = Frame {
            ctx: &mut ctx,
            input: &input,
            dt: 0.1,
            time: 0.1,
        };
        chess.update(&mut frame);
        assert_eq!(intensity(&ctx), 9.0);
    }
}
