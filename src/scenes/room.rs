use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use hecs::Entity;

use crate::color::Color;
use crate::context::RenderContext;
use crate::ecs::{Light, Transform};
use crate::error::SceneError;
use crate::resources::{Geometry, Material, MaterialId};
use crate::scene::{Frame, Scene, SceneGroup};

const TV_GLOW: f32 = 2.2;
const MONITOR_GLOW: f32 = 2.6;
const LOOK_TARGET: Vec3 = Vec3::new(0.0, 1.0, -0.2);

/// A dark showroom: a TV on a stand and a desk with a monitor.
///
/// Both screens flicker slightly and the camera drifts side to side.
pub struct RoomScene {
    group: SceneGroup,
    tv_screen: MaterialId,
    monitor_screen: MaterialId,
    ambient: Entity,
    rng: fastrand::Rng,
    time: f32,
}

struct Screen {
    material: MaterialId,
}

fn screen(
    group: &mut SceneGroup,
    ctx: &mut RenderContext,
    width: f32,
    height: f32,
    position: Vec3,
    glow: f32,
) -> Screen {
    group.mesh(
        ctx,
        Geometry::cuboid(width, height, 0.08),
        Material::standard(Color::hex(0x07070c), 0.6, 0.25),
        Transform::from_position(position),
    );

    let material = group.material(
        ctx,
        Material::standard(Color::WHITE, 0.25, 0.0).emissive(Color::WHITE, glow),
    );
    let panel = group.geometry(ctx, Geometry::plane(width * 0.88, height * 0.82));
    group.spawn_mesh(
        ctx,
        panel,
        material,
        Transform::from_position(position + Vec3::Z * 0.045),
    );

    group.mesh(
        ctx,
        Geometry::plane(width * 1.06, height * 1.04),
        Material::basic(Color::WHITE.with_alpha(0.18)).additive(),
        Transform::from_position(position + Vec3::Z * 0.03),
    );

    Screen { material }
}

impl RoomScene {
    pub const NAME: &'static str = "Room";

    pub fn new(ctx: &mut RenderContext) -> Result<Self, SceneError> {
        Self::with_seed(ctx, fastrand::u64(..))
    }

    pub fn with_seed(ctx: &mut RenderContext, seed: u64) -> Result<Self, SceneError> {
        let mut group = SceneGroup::new("room");

        group.mesh(
            ctx,
            Geometry::plane(12.0, 12.0),
            Material::standard(Color::hex(0x0b1020), 0.9, 0.05),
            Transform::new().rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        );

        let tv = screen(&mut group, ctx, 1.6, 0.95, Vec3::new(-1.05, 1.05, -0.6), TV_GLOW);
        group.mesh(
            ctx,
            Geometry::cuboid(1.2, 0.10, 0.6),
            Material::standard(Color::hex(0x090a10), 0.9, 0.05),
            Transform::from_position(Vec3::new(-1.05, 0.55, -0.55)),
        );

        group.mesh(
            ctx,
            Geometry::cuboid(2.4, 0.12, 1.1),
            Material::standard(Color::hex(0x0a0f1a), 0.85, 0.08),
            Transform::from_position(Vec3::new(1.15, 0.75, 0.1)),
        );
        let monitor = screen(
            &mut group,
            ctx,
            1.2,
            0.75,
            Vec3::new(1.15, 1.18, -0.2),
            MONITOR_GLOW,
        );
        group.mesh(
            ctx,
            Geometry::cuboid(0.22, 0.35, 0.20),
            Material::standard(Color::hex(0x06060b), 0.7, 0.2),
            Transform::from_position(Vec3::new(1.15, 0.92, -0.2)),
        );
        group.mesh(
            ctx,
            Geometry::cuboid(0.7, 0.05, 0.35),
            Material::standard(Color::hex(0x05050a), 0.8, 0.2),
            Transform::from_position(Vec3::new(1.15, 0.77, -0.1)),
        );

        // Only the screens light the room until the lights are switched on.
        let ambient = group.light(
            ctx,
            Light::Ambient {
                color: Color::WHITE,
                intensity: 0.0,
            },
            Transform::new(),
        );

        ctx.camera.position = Vec3::new(0.0, 1.25, 3.0);
        ctx.camera.look_at(Vec3::new(0.0, 1.0, 0.0));

        Ok(Self {
            group,
            tv_screen: tv.material,
            monitor_screen: monitor.material,
            ambient,
            rng: fastrand::Rng::with_seed(seed),
            time: 0.0,
        })
    }

    fn flicker(&mut self, ctx: &mut RenderContext, material: MaterialId, base: f32) {
        let jitter = (self.rng.f32() - 0.5) * 0.25;
        if let Some(material) = ctx.resources.material_mut(material) {
            material.emissive_intensity = base + jitter;
        }
    }
}

impl Scene for RoomScene {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, frame: &mut Frame<'_>) {
        self.time += frame.dt;
        let ctx = &mut *frame.ctx;

        ctx.camera.position.x = (self.time * 0.25).sin() * 0.03;
        ctx.camera.look_at(LOOK_TARGET);

        if (self.time * 60.0) % 2.0 < 1.0 {
            self.flicker(ctx, self.tv_screen, TV_GLOW);
            self.flicker(ctx, self.monitor_screen, MONITOR_GLOW);
        }

        let lights_on = ctx.flags.lights_on;
        if let Ok(mut light) = ctx.world.get::<&mut Light>(self.ambient) {
            if let Light::Ambient { intensity, .. } = &mut *light {
                *intensity = if lights_on { 0.6 } else { 0.0 };
            }
        }
    }

    fn dispose(self: Box<Self>, ctx: &mut RenderContext) -> Result<(), SceneError> {
        self.group.dispose(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Baseline, Viewport};
    use crate::input::Input;

    #[test]
    fn screens_flicker_around_their_base_glow() {
        let mut ctx = RenderContext::new(Viewport::new(800, 600, 1.0), &Baseline::PORTFOLIO);
        let mut room = RoomScene::with_seed(&mut ctx, 7).unwrap();
        let input = Input::new();

        for _ in 0..30 {
            let mut frame = Frame {
                ctx: &mut ctx,
                input: &input,
                dt: 1.0 / 60.0,
                time: 0.0,
            };
            room.update(&mut frame);
            let tv = ctx.resources.material(room.tv_screen).unwrap();
            assert!((tv.emissive_intensity - TV_GLOW).abs() <= 0.125);
        }
        assert!(ctx.camera.position.x.abs() <= 0.03);
    }
}
