//! A free-flying camera driven by the keyboard and the mouse.

use crate::math::prelude::*;

use super::input::InputState;
use super::settings::CameraParams;
use crate::window::events::Key;

/// The direction of a camera movement, relative to where it looks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct FlyCamera {
    position: Point3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    zoom: f32,
    near: f32,
    far: f32,
}

const WORLD_UP: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

impl FlyCamera {
    /// A camera at `params.position` looking towards `-Z`.
    pub fn new(params: &CameraParams) -> Self {
        let mut camera = FlyCamera {
            position: params.position,
            front: Vector3::new(0.0, 0.0, -1.0),
            up: WORLD_UP,
            right: Vector3::unit_x(),
            yaw: -90.0,
            pitch: 0.0,
            speed: params.speed,
            sensitivity: params.sensitivity,
            zoom: params.zoom.max(1.0).min(45.0),
            near: params.near,
            far: params.far,
        };

        camera.update_vectors();
        camera
    }

    #[inline]
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    #[inline]
    pub fn forward(&self) -> Vector3<f32> {
        self.front
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        cgmath::perspective(Deg(self.zoom), aspect, self.near, self.far)
    }

    /// Moves the camera for `dt` seconds.
    pub fn translate(&mut self, movement: Movement, dt: f32) {
        let velocity = self.speed * dt;
        let delta = match movement {
            Movement::Forward => self.front,
            Movement::Backward => -self.front,
            Movement::Left => -self.right,
            Movement::Right => self.right,
            Movement::Up => WORLD_UP,
            Movement::Down => -WORLD_UP,
        };

        self.position += delta * velocity;
    }

    /// Turns the camera by a cursor movement in pixels, positive `dy` looks up.
    /// The pitch is constrained so the view never flips.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).max(-89.0).min(89.0);
        self.update_vectors();
    }

    /// Narrows the field of view by `delta` degrees, clamped to `[1, 45]`.
    pub fn zoom_by(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).max(1.0).min(45.0);
    }

    /// Applies the movement keys and the mouse of this frame.
    pub fn apply(&mut self, input: &InputState, dt: f32) {
        const KEYS: [(Key, Movement); 6] = [
            (Key::W, Movement::Forward),
            (Key::S, Movement::Backward),
            (Key::A, Movement::Left),
            (Key::D, Movement::Right),
            (Key::E, Movement::Up),
            (Key::Q, Movement::Down),
        ];

        for &(key, movement) in &KEYS {
            if input.is_key_down(key) {
                self.translate(movement, dt);
            }
        }

        let movement = input.movement();
        if movement.x != 0.0 || movement.y != 0.0 {
            self.rotate(movement.x, movement.y);
        }

        let scroll = input.scroll();
        if scroll.y != 0.0 {
            self.zoom_by(scroll.y);
        }
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (Rad::from(Deg(self.yaw)), Rad::from(Deg(self.pitch)));
        self.front = Vector3::new(
            yaw.0.cos() * pitch.0.cos(),
            pitch.0.sin(),
            yaw.0.sin() * pitch.0.cos(),
        )
        .normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn looks_down_negative_z() {
        let camera = FlyCamera::new(&CameraParams::default());
        let f = camera.forward();
        assert!(f.x.abs() < 1e-6 && f.y.abs() < 1e-6);
        assert!((f.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn pitch_and_zoom_are_clamped() {
        let mut camera = FlyCamera::new(&CameraParams::default());
        camera.rotate(0.0, 10_000.0);
        assert!(camera.forward().y < 1.0);
        assert!(camera.forward().y > 0.99);

        camera.zoom_by(100.0);
        assert_eq!(camera.zoom(), 1.0);
        camera.zoom_by(-100.0);
        assert_eq!(camera.zoom(), 45.0);
    }

    #[test]
    fn moves_forward() {
        let mut camera = FlyCamera::new(&CameraParams::default());
        camera.translate(Movement::Forward, 1.0);
        let p = camera.position();
        assert!((p.z - (2.0 - 2.5)).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }
}
