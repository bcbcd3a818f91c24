use glam::Vec4;

use super::camera::{self, CameraState, Projection};
use super::lighting::{FrameUniforms, Lighting};
use super::mesh::Mesh;
use crate::gl_call;
use crate::shader::{GlDriver, LinkedProgram, ShaderDriver};

/// Radians per second the mesh turns about its axis.
pub const SPIN_RATE: f32 = 0.6;

pub fn frame_uniforms(camera: &CameraState, projection: &Projection, elapsed_secs: f32) -> FrameUniforms {
    FrameUniforms {
        model: camera::model_matrix(elapsed_secs * SPIN_RATE),
        view_projection: camera::view_projection(camera, projection),
        camera_position: camera.position,
    }
}

/// Everything needed to draw one frame: the linked program, the uploaded
/// mesh and the lighting set. Dropped once, at shutdown.
pub struct RenderPipeline<D: ShaderDriver = GlDriver> {
    program: LinkedProgram<D>,
    mesh: Mesh,
    lighting: Lighting,
    clear_color: Vec4,
}

impl<D: ShaderDriver> RenderPipeline<D> {
    pub fn new(program: LinkedProgram<D>, mesh: Mesh, lighting: Lighting, clear_color: Vec4) -> Self {
        program.bind();
        let mut pipeline = Self {
            program,
            mesh,
            lighting,
            clear_color,
        };
        pipeline.lighting.apply(&mut pipeline.program);

        gl_call!(gl::Enable(gl::DEPTH_TEST));
        gl_call!(gl::ClearColor(
            clear_color.x,
            clear_color.y,
            clear_color.z,
            clear_color.w
        ));
        pipeline
    }

    pub fn program(&self) -> &LinkedProgram<D> {
        &self.program
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    pub fn set_viewport(&self, width: u32, height: u32) {
        gl_call!(gl::Viewport(0, 0, width as i32, height as i32));
    }

    pub fn draw_frame(&mut self, camera: &CameraState, projection: &Projection, elapsed_secs: f32) {
        gl_call!(gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT));

        self.program.bind();
        frame_uniforms(camera, projection, elapsed_secs).apply(&mut self.program);
        self.mesh.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use glam::{Mat4, Vec3};

    #[test]
    fn test_frame_uniforms_follow_camera() {
        let mut camera = CameraState::new(Vec3::new(0.0, 0.0, 3.0), 1.0);
        let projection = Projection::from_config(&CameraConfig::default(), 480, 480);

        let before = frame_uniforms(&camera, &projection, 0.0);
        assert_eq!(before.model, Mat4::IDENTITY);
        assert_eq!(before.camera_position, camera.position);

        camera.translate(camera::CameraMove::Left);
        let after = frame_uniforms(&camera, &projection, 0.0);
        assert_eq!(after.camera_position, Vec3::new(-1.0, 0.0, 3.0));
        assert_ne!(before.view_projection, after.view_projection);
    }
}
