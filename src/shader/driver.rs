use gl::types::*;
use std::ffi::CStr;
use std::ptr;

use super::StageKind;
use crate::gl_call;

/// The native calls the shader builder needs from a graphics driver.
///
/// Handles are plain `GLuint` names; `0` from a `create_*` call means the
/// driver could not allocate the object. Implementations are expected to be
/// cheap to clone, every scoped handle keeps its own copy to release itself.
pub trait ShaderDriver: Clone {
    fn create_shader(&self, stage: StageKind) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &CStr);
    fn compile_shader(&self, shader: GLuint);
    fn compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn link_status(&self, program: GLuint) -> bool;
    fn validate_program(&self, program: GLuint);
    fn validate_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);

    fn use_program(&self, program: GLuint);
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;
    fn uniform_mat4(&self, location: GLint, value: &[f32; 16]);
    fn uniform_vec4(&self, location: GLint, value: &[f32; 4]);
    fn uniform_vec3(&self, location: GLint, value: &[f32; 3]);
    fn uniform_f32(&self, location: GLint, value: f32);
}

/// Driver backed by the loaded `gl` function pointers.
///
/// Only valid on the thread that owns the current GL context, after
/// `gl::load_with` has run.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlDriver;

impl GlDriver {
    fn read_log(len: GLint, fetch: impl FnOnce(GLint, *mut GLsizei, *mut GLchar)) -> String {
        if len <= 0 {
            return String::new();
        }

        let mut buffer: Vec<u8> = vec![0; len as usize];
        let mut written: GLsizei = 0;
        fetch(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
        buffer.truncate(written.clamp(0, len) as usize);

        String::from_utf8_lossy(&buffer)
            .trim_end_matches(['\0', '\n', ' '])
            .to_string()
    }
}

impl ShaderDriver for GlDriver {
    fn create_shader(&self, stage: StageKind) -> GLuint {
        gl_call!(gl::CreateShader(stage.gl_enum()))
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        gl_call!(gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null()));
    }

    fn compile_shader(&self, shader: GLuint) {
        gl_call!(gl::CompileShader(shader));
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        let mut success = 0;
        gl_call!(gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success));
        success != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        gl_call!(gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len));
        Self::read_log(len, |len, written, buf| {
            gl_call!(gl::GetShaderInfoLog(shader, len, written, buf));
        })
    }

    fn delete_shader(&self, shader: GLuint) {
        gl_call!(gl::DeleteShader(shader));
    }

    fn create_program(&self) -> GLuint {
        gl_call!(gl::CreateProgram())
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        gl_call!(gl::AttachShader(program, shader));
    }

    fn link_program(&self, program: GLuint) {
        gl_call!(gl::LinkProgram(program));
    }

    fn link_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        gl_call!(gl::GetProgramiv(program, gl::LINK_STATUS, &mut success));
        success != 0
    }

    fn validate_program(&self, program: GLuint) {
        gl_call!(gl::ValidateProgram(program));
    }

    fn validate_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        gl_call!(gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut success));
        success != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        gl_call!(gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len));
        Self::read_log(len, |len, written, buf| {
            gl_call!(gl::GetProgramInfoLog(program, len, written, buf));
        })
    }

    fn delete_program(&self, program: GLuint) {
        gl_call!(gl::DeleteProgram(program));
    }

    fn use_program(&self, program: GLuint) {
        gl_call!(gl::UseProgram(program));
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        gl_call!(gl::GetUniformLocation(program, name.as_ptr()))
    }

    fn uniform_mat4(&self, location: GLint, value: &[f32; 16]) {
        gl_call!(gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()));
    }

    fn uniform_vec4(&self, location: GLint, value: &[f32; 4]) {
        gl_call!(gl::Uniform4fv(location, 1, value.as_ptr()));
    }

    fn uniform_vec3(&self, location: GLint, value: &[f32; 3]) {
        gl_call!(gl::Uniform3fv(location, 1, value.as_ptr()));
    }

    fn uniform_f32(&self, location: GLint, value: f32) {
        gl_call!(gl::Uniform1f(location, value));
    }
}
