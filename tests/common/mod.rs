#![allow(dead_code)]

use gl::types::*;
use glsteps::{ShaderDriver, StageKind};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::CStr;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Mat4([f32; 16]),
    Vec4([f32; 4]),
    Vec3([f32; 3]),
    Float(f32),
}

#[derive(Debug, Default)]
pub struct FakeShader {
    pub stage: Option<StageKind>,
    pub source: String,
    pub compiled: bool,
}

#[derive(Debug, Default)]
pub struct FakeProgram {
    pub attached: Vec<GLuint>,
    pub linked: bool,
    pub validated: bool,
    pub uniforms: Vec<String>,
}

#[derive(Debug, Default)]
pub struct DriverState {
    next_id: GLuint,
    pub shaders: HashMap<GLuint, FakeShader>,
    pub programs: HashMap<GLuint, FakeProgram>,
    pub created_shaders: Vec<GLuint>,
    pub deleted_shaders: Vec<GLuint>,
    pub deleted_programs: Vec<GLuint>,
    pub bound_program: Option<GLuint>,
    pub uploads: Vec<(GLint, UniformValue)>,
    pub location_queries: usize,
    pub fail_create: bool,
    pub fail_link: bool,
    pub fail_validate: bool,
    pub empty_logs: bool,
}

impl DriverState {
    pub fn delete_count(&self, shader: GLuint) -> usize {
        self.deleted_shaders.iter().filter(|&&id| id == shader).count()
    }

    pub fn program_delete_count(&self, program: GLuint) -> usize {
        self.deleted_programs.iter().filter(|&&id| id == program).count()
    }
}

/// In-memory driver that records every call. A source "compiles" when it
/// has a `main` function and balanced braces and parentheses.
#[derive(Debug, Clone, Default)]
pub struct FakeDriver {
    pub state: Rc<RefCell<DriverState>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> std::cell::Ref<'_, DriverState> {
        self.state.borrow()
    }

    pub fn configure(&self, f: impl FnOnce(&mut DriverState)) {
        f(&mut self.state.borrow_mut());
    }

    fn next_id(state: &mut DriverState) -> GLuint {
        state.next_id += 1;
        state.next_id
    }

    fn check_syntax(source: &str) -> Result<(), String> {
        let mut depth = [0i32; 2];
        for (line_no, line) in source.lines().enumerate() {
            for ch in line.chars() {
                match ch {
                    '{' => depth[0] += 1,
                    '}' => depth[0] -= 1,
                    '(' => depth[1] += 1,
                    ')' => depth[1] -= 1,
                    _ => {}
                }
                if depth.iter().any(|&d| d < 0) {
                    return Err(format!("0:{}(1): error: syntax error, unexpected '{}'", line_no + 1, ch));
                }
            }
        }
        if depth != [0, 0] {
            return Err("0:0(0): error: syntax error, unexpected end of file".to_string());
        }
        if !source.contains("void main") {
            return Err("0:0(0): error: no function with name 'main'".to_string());
        }
        Ok(())
    }

    fn declared_uniforms(source: &str) -> Vec<String> {
        source
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("uniform "))
            .filter_map(|line| line.trim_end_matches(';').split_whitespace().last())
            .map(str::to_string)
            .collect()
    }

    fn upload(&self, location: GLint, value: UniformValue) {
        if location >= 0 {
            self.state.borrow_mut().uploads.push((location, value));
        }
    }
}

impl ShaderDriver for FakeDriver {
    fn create_shader(&self, stage: StageKind) -> GLuint {
        let mut state = self.state.borrow_mut();
        if state.fail_create {
            return 0;
        }
        let id = Self::next_id(&mut state);
        state.shaders.insert(
            id,
            FakeShader {
                stage: Some(stage),
                ..FakeShader::default()
            },
        );
        state.created_shaders.push(id);
        id
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.source = source.to_string_lossy().into_owned();
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.compiled = Self::check_syntax(&s.source).is_ok();
        }
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map_or(false, |s| s.compiled)
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let state = self.state.borrow();
        if state.empty_logs {
            return String::new();
        }
        state
            .shaders
            .get(&shader)
            .and_then(|s| Self::check_syntax(&s.source).err())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        state.shaders.remove(&shader);
        state.deleted_shaders.push(shader);
    }

    fn create_program(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        if state.fail_create {
            return 0;
        }
        let id = Self::next_id(&mut state);
        state.programs.insert(id, FakeProgram::default());
        id
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn link_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        let fail_link = state.fail_link;
        let fail_validate = state.fail_validate;

        let Some(attached) = state.programs.get(&program).map(|p| p.attached.clone()) else {
            return;
        };
        let all_compiled = attached.len() == 2
            && attached
                .iter()
                .all(|id| state.shaders.get(id).map_or(false, |s| s.compiled));
        let uniforms = attached
            .iter()
            .filter_map(|id| state.shaders.get(id))
            .flat_map(|s| Self::declared_uniforms(&s.source))
            .collect();

        if let Some(p) = state.programs.get_mut(&program) {
            p.linked = all_compiled && !fail_link;
            p.validated = p.linked && !fail_validate;
            p.uniforms = uniforms;
        }
    }

    fn link_status(&self, program: GLuint) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map_or(false, |p| p.linked)
    }

    fn validate_program(&self, _program: GLuint) {}

    fn validate_status(&self, program: GLuint) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map_or(false, |p| p.validated)
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let state = self.state.borrow();
        match state.programs.get(&program) {
            Some(p) if !p.linked && !state.empty_logs => {
                "error: fragment shader input `v_Color` has no matching output".to_string()
            }
            Some(p) if !p.validated && !state.empty_logs => {
                "validation: no vertex array bound".to_string()
            }
            _ => String::new(),
        }
    }

    fn delete_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        state.deleted_programs.push(program);
    }

    fn use_program(&self, program: GLuint) {
        self.state.borrow_mut().bound_program = Some(program);
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        let mut state = self.state.borrow_mut();
        state.location_queries += 1;
        let name = name.to_string_lossy();
        state
            .programs
            .get(&program)
            .and_then(|p| p.uniforms.iter().position(|u| *u == name))
            .map_or(-1, |index| index as GLint)
    }

    fn uniform_mat4(&self, location: GLint, value: &[f32; 16]) {
        self.upload(location, UniformValue::Mat4(*value));
    }

    fn uniform_vec4(&self, location: GLint, value: &[f32; 4]) {
        self.upload(location, UniformValue::Vec4(*value));
    }

    fn uniform_vec3(&self, location: GLint, value: &[f32; 3]) {
        self.upload(location, UniformValue::Vec3(*value));
    }

    fn uniform_f32(&self, location: GLint, value: f32) {
        self.upload(location, UniformValue::Float(value));
    }
}

pub const VALID_VERTEX: &str = r#"#version 330 core
layout(location = 0) in vec3 a_Position;
uniform mat4 u_ViewProjection;
void main()
{
    gl_Position = u_ViewProjection * vec4(a_Position, 1.0);
}
"#;

pub const VALID_FRAGMENT: &str = r#"#version 330 core
uniform vec4 u_LightColor;
layout(location = 0) out vec4 color;
void main()
{
    color = u_LightColor;
}
"#;

pub fn manifest_path(relative: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}
