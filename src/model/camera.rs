use glam::{IVec3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::utils::WorldCoord;

/// Pitch limit just short of straight up/down so look_at never degenerates.
const MAX_PITCH: f32 = 1.5533;
const RAY_STEP: f32 = 0.1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Degrees of rotation per pixel of mouse movement.
    pub sensitivity: f32,
    /// Units per second.
    pub speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 40.0, 3.0),
            yaw_degrees: -90.0,
            pitch_degrees: 0.0,
            fov_y_degrees: 45.0,
            aspect: 1920.0 / 1080.0,
            z_near: 0.1,
            z_far: 100.0,
            sensitivity: 0.05,
            speed: 5.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    /// Radians, 0 looks down +X, -PI/2 down -Z.
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub sensitivity: f32,
    pub speed: f32,
}

/// A solid block hit by a view ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub block: WorldCoord,
    pub point: Vec3,
    /// Outward normal of the face the ray entered through; zero if it started inside.
    pub normal: IVec3,
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            eye: config.position,
            yaw: config.yaw_degrees.to_radians(),
            pitch: config.pitch_degrees.to_radians(),
            up: Vec3::Y,
            fov_y: config.fov_y_degrees.to_radians(),
            aspect: config.aspect,
            z_near: config.z_near,
            z_far: config.z_far,
            sensitivity: config.sensitivity,
            speed: config.speed,
        }
    }

    pub fn forward(&self) -> Vec3 {
        let cy = self.yaw;
        let cp = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
        Vec3::new(cy.cos() * cp.cos(), cp.sin(), cy.sin() * cp.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    pub fn target(&self) -> Vec3 {
        self.eye + self.forward()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target(), self.up)
    }

    /// OpenGL clip space (depth in [-1, 1]).
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    pub fn set_look_at(&mut self, target: Vec3) {
        let dir = (target - self.eye).normalize();
        self.yaw = dir.z.atan2(dir.x);
        self.pitch = dir.y.asin().clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Mouse look; offsets are in pixels, y grows upwards.
    pub fn rotate(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += (x_offset * self.sensitivity).to_radians();
        self.pitch = (self.pitch + (y_offset * self.sensitivity).to_radians())
            .clamp(-89f32.to_radians(), 89f32.to_radians());
    }

    /// Fly along the view direction and the horizontal right vector.
    pub fn move_local(&mut self, forward: f32, right: f32, dt: f32) {
        let velocity = self.speed * dt;
        self.eye += self.forward() * forward * velocity + self.right() * right * velocity;
    }

    /// Marches the view ray in fixed steps and returns the first block for which
    /// `is_solid` holds.
    pub fn raycast<F>(&self, max_distance: f32, is_solid: F) -> Option<RayHit>
    where
        F: Fn(WorldCoord) -> bool,
    {
        let dir = self.forward();
        let mut previous = WorldCoord::from_world_pos(self.eye);
        let mut distance = RAY_STEP;

        while distance < max_distance {
            let point = self.eye + dir * distance;
            let block = WorldCoord::from_world_pos(point);

            if is_solid(block) {
                let normal = (previous.to_ivec3() - block.to_ivec3()).signum();
                return Some(RayHit {
                    block,
                    point,
                    normal,
                    distance,
                });
            }

            previous = block;
            distance += RAY_STEP;
        }

        None
    }
}
