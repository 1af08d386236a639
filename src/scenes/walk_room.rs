use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::color::Color;
use crate::context::RenderContext;
use crate::ecs::{Light, Transform};
use crate::error::SceneError;
use crate::input::Input;
use crate::resources::{Geometry, Material};
use crate::scene::{Frame, Scene, SceneGroup};

const WIDTH: f32 = 10.0;
const DEPTH: f32 = 10.0;
const HEIGHT: f32 = 4.0;

const LOOK_SENSITIVITY: f32 = 0.0022;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;
const MOVE_SPEED: f32 = 3.8;
const WALL_MARGIN: f32 = 0.35;
const FLOOR_MARGIN: f32 = 0.2;

/// A closed room to walk around in.
///
/// Hold the left mouse button and drag to look; WASD moves on the floor
/// plane, Space and Shift move up and down. The camera can't leave the room.
pub struct WalkRoomScene {
    group: SceneGroup,
    yaw: f32,
    pitch: f32,
}

impl WalkRoomScene {
    pub const NAME: &'static str = "Walk Room (Drag Mouse + WASD)";

    pub fn new(ctx: &mut RenderContext) -> Result<Self, SceneError> {
        let mut group = SceneGroup::new("walk_room");

        let wall = group.material(ctx, Material::standard(Color::hex(0x111522), 0.95, 0.0));
        let floor = group.material(ctx, Material::standard(Color::hex(0x0b0f18), 0.9, 0.05));
        let ceiling = group.material(ctx, Material::standard(Color::hex(0x0a0d16), 0.98, 0.0));

        let floor_geo = group.geometry(ctx, Geometry::plane(WIDTH, DEPTH));
        group.spawn_mesh(
            ctx,
            floor_geo,
            floor,
            Transform::new().rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        );
        let ceiling_geo = group.geometry(ctx, Geometry::plane(WIDTH, DEPTH));
        group.spawn_mesh(
            ctx,
            ceiling_geo,
            ceiling,
            Transform::from_position(Vec3::Y * HEIGHT).rotation(Quat::from_rotation_x(FRAC_PI_2)),
        );

        // Each wall faces into the room.
        let walls = [
            (Vec3::new(0.0, HEIGHT / 2.0, -DEPTH / 2.0), 0.0, WIDTH),
            (Vec3::new(0.0, HEIGHT / 2.0, DEPTH / 2.0), PI, WIDTH),
            (Vec3::new(-WIDTH / 2.0, HEIGHT / 2.0, 0.0), FRAC_PI_2, DEPTH),
            (Vec3::new(WIDTH / 2.0, HEIGHT / 2.0, 0.0), -FRAC_PI_2, DEPTH),
        ];
        for (position, turn, span) in walls {
            let geometry = group.geometry(ctx, Geometry::plane(span, HEIGHT));
            group.spawn_mesh(
                ctx,
                geometry,
                wall,
                Transform::from_position(position).rotation(Quat::from_rotation_y(turn)),
            );
        }

        group.light(
            ctx,
            Light::Hemisphere {
                sky: Color::WHITE,
                ground: Color::hex(0x1a1f35),
                intensity: 0.85,
            },
            Transform::from_position(Vec3::Y * HEIGHT),
        );
        let lamp_position = Vec3::new(0.0, HEIGHT - 0.3, 0.0);
        group.light(
            ctx,
            Light::Point {
                color: Color::WHITE,
                intensity: 2.4,
                range: 30.0,
            },
            Transform::from_position(lamp_position),
        );
        group.mesh(
            ctx,
            Geometry::sphere(0.08, 16, 16),
            Material::basic(Color::WHITE),
            Transform::from_position(lamp_position),
        );

        ctx.camera.position = Vec3::new(0.0, 1.6, 0.0);
        ctx.camera.set_yaw_pitch(0.0, 0.0);

        Ok(Self {
            group,
            yaw: 0.0,
            pitch: 0.0,
        })
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn look(&mut self, input: &Input) {
        if !input.mouse_down(MouseButton::Left) {
            return;
        }
        let delta = input.mouse_delta();
        self.yaw -= delta.x * LOOK_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * LOOK_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Desired movement for this frame, before scaling by speed and time.
    fn movement(&self, input: &Input) -> Vec3 {
        // Movement ignores pitch: looking down doesn't slow you down.
        let forward = Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos());
        let right = forward.cross(Vec3::Y).normalize();

        let mut planar = Vec3::ZERO;
        if input.key_down(KeyCode::KeyW) {
            planar += forward;
        }
        if input.key_down(KeyCode::KeyS) {
            planar -= forward;
        }
        if input.key_down(KeyCode::KeyD) {
            planar += right;
        }
        if input.key_down(KeyCode::KeyA) {
            planar -= right;
        }

        let mut vertical = 0.0;
        if input.key_down(KeyCode::Space) {
            vertical += 1.0;
        }
        if input.key_down(KeyCode::ShiftLeft) || input.key_down(KeyCode::ShiftRight) {
            vertical -= 1.0;
        }

        planar.normalize_or_zero() + Vec3::Y * vertical
    }
}

/// Keep a position inside the room, away from the walls.
pub fn clamp_to_room(position: Vec3) -> Vec3 {
    Vec3::new(
        position
            .x
            .clamp(-WIDTH / 2.0 + WALL_MARGIN, WIDTH / 2.0 - WALL_MARGIN),
        position.y.clamp(FLOOR_MARGIN, HEIGHT - FLOOR_MARGIN),
        position
            .z
            .clamp(-DEPTH / 2.0 + WALL_MARGIN, DEPTH / 2.0 - WALL_MARGIN),
    )
}

impl Scene for WalkRoomScene {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, frame: &mut Frame<'_>) {
        self.look(frame.input);
        let step = self.movement(frame.input) * MOVE_SPEED * frame.dt;

        let camera = &mut frame.ctx.camera;
        camera.set_yaw_pitch(self.yaw, self.pitch);
        camera.position = clamp_to_room(camera.position + step);
    }

    fn dispose(self: Box<Self>, ctx: &mut RenderContext) -> Result<(), SceneError> {
        self.group.dispose(ctx)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::context::{Baseline, Viewport};

    fn ctx() -> RenderContext {
        RenderContext::new(Viewport::new(800, 600, 1.0), &Baseline::PORTFOLIO)
    }

    fn step(scene: &mut WalkRoomScene, ctx: &mut RenderContext, input: &Input, dt: f32) {
        let mut frame = Frame {
            ctx,
            input,
            dt,
            time: 0.0,
        };
        scene.update(&mut frame);
    }

    #[test]
    fn walking_forward_moves_down_negative_z() {
        let mut ctx = ctx();
        let mut walk = WalkRoomScene::new(&mut ctx).unwrap();
        let mut input = Input::new();
        input.press_key(KeyCode::KeyW);

        step(&mut walk, &mut ctx, &input, 0.5);
        assert!((ctx.camera.position - Vec3::new(0.0, 1.6, -1.9)).length() < 1e-5);
    }

    #[test]
    fn diagonal_movement_is_not_faster() {
        let mut ctx = ctx();
        let mut walk = WalkRoomScene::new(&mut ctx).unwrap();
        let mut input = Input::new();
        input.press_key(KeyCode::KeyW);
        input.press_key(KeyCode::KeyD);

        step(&mut walk, &mut ctx, &input, 0.1);
        let moved = ctx.camera.position - Vec3::new(0.0, 1.6, 0.0);
        assert!((moved.length() - MOVE_SPEED * 0.1).abs() < 1e-5);
    }

    #[test]
    fn huge_steps_stay_inside_the_room() {
        let mut ctx = ctx();
        let mut walk = WalkRoomScene::new(&mut ctx).unwrap();
        let mut input = Input::new();
        input.press_key(KeyCode::KeyA);
        input.press_key(KeyCode::Space);

        step(&mut walk, &mut ctx, &input, 60.0);
        assert_eq!(
            ctx.camera.position,
            Vec3::new(-WIDTH / 2.0 + WALL_MARGIN, HEIGHT - FLOOR_MARGIN, 0.0)
        );
    }

    #[test]
    fn drag_look_limits_pitch() {
        let mut ctx = ctx();
        let mut walk = WalkRoomScene::new(&mut ctx).unwrap();
        let mut input = Input::new();

        // Moving without a button held doesn't turn the camera.
        input.move_cursor(Vec2::new(100.0, 0.0));
        step(&mut walk, &mut ctx, &input, 0.016);
        assert_eq!(walk.yaw(), 0.0);

        input.begin_frame();
        input.press_mouse(MouseButton::Left);
        input.move_cursor(Vec2::new(200.0, -5000.0));
        step(&mut walk, &mut ctx, &input, 0.016);

        assert!((walk.yaw() + 100.0 * LOOK_SENSITIVITY).abs() < 1e-6);
        assert_eq!(walk.pitch(), PITCH_LIMIT);
        assert!(ctx.camera.forward.y > 0.99);
    }
}
