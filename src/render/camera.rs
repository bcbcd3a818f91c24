use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl CameraMove {
    pub fn direction(self) -> Vec3 {
        match self {
            CameraMove::Forward => Vec3::NEG_Z,
            CameraMove::Backward => Vec3::Z,
            CameraMove::Left => Vec3::NEG_X,
            CameraMove::Right => Vec3::X,
            CameraMove::Up => Vec3::Y,
            CameraMove::Down => Vec3::NEG_Y,
        }
    }
}

/// Camera position, owned by the render loop and handed to input handling
/// by `&mut` and to the frame builder by `&`.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub speed: f32,
}

impl CameraState {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self { position, speed }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(Vec3::from_array(config.position), config.speed)
    }

    pub fn translate(&mut self, movement: CameraMove) {
        self.position += movement.direction() * self.speed;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + Vec3::NEG_Z, Vec3::Y)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut projection = Self {
            fov_degrees: config.fov_degrees,
            aspect_ratio: 1.0,
            near: config.near,
            far: config.far,
        };
        projection.resize(width, height);
        projection
    }

    /// Recomputes the aspect ratio; a zero-sized (minimised) window keeps the old one.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }
}

pub fn view_projection(camera: &CameraState, projection: &Projection) -> Mat4 {
    projection.matrix() * camera.view_matrix()
}

pub fn model_matrix(angle_radians: f32) -> Mat4 {
    Mat4::from_rotation_y(angle_radians) * Mat4::from_rotation_x(angle_radians * 0.5)
}
