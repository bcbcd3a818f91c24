use gl::types::*;
use std::collections::HashMap;
use std::ffi::CString;

use super::driver::ShaderDriver;
use super::StageKind;

/// A compiled shader stage. Deleted when dropped.
pub struct CompiledStage<D: ShaderDriver> {
    driver: D,
    id: GLuint,
    kind: StageKind,
}

impl<D: ShaderDriver> CompiledStage<D> {
    pub(crate) fn new(driver: D, id: GLuint, kind: StageKind) -> Self {
        Self { driver, id, kind }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }
}

impl<D: ShaderDriver> Drop for CompiledStage<D> {
    fn drop(&mut self) {
        log::trace!("Releasing {} shader {}", self.kind, self.id);
        self.driver.delete_shader(self.id);
    }
}

impl<D: ShaderDriver> std::fmt::Debug for CompiledStage<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledStage")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A linked shader program, deleted when dropped.
///
/// Uniform locations are looked up once and cached by name. Names the
/// program does not expose resolve to `-1`, which the driver ignores on
/// upload, so a missing uniform is logged once and otherwise harmless.
pub struct LinkedProgram<D: ShaderDriver> {
    driver: D,
    id: GLuint,
    uniforms: HashMap<String, GLint>,
}

impl<D: ShaderDriver> LinkedProgram<D> {
    pub(crate) fn new(driver: D, id: GLuint) -> Self {
        Self {
            driver,
            id,
            uniforms: HashMap::new(),
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        self.driver.use_program(self.id);
    }

    pub fn uniform_location(&mut self, name: &str) -> GLint {
        if let Some(location) = self.uniforms.get(name) {
            return *location;
        }

        let location = match CString::new(name) {
            Ok(cname) => self.driver.uniform_location(self.id, &cname),
            Err(_) => -1,
        };

        if location == -1 {
            log::warn!("Uniform '{}' not found in program {}", name, self.id);
        }

        self.uniforms.insert(name.to_string(), location);
        location
    }

    // Uniform setters. The program must be bound first.
    pub fn set_mat4(&mut self, name: &str, value: &glam::Mat4) {
        let location = self.uniform_location(name);
        self.driver.uniform_mat4(location, &value.to_cols_array());
    }

    pub fn set_vec4(&mut self, name: &str, value: glam::Vec4) {
        let location = self.uniform_location(name);
        self.driver.uniform_vec4(location, &value.to_array());
    }

    pub fn set_vec3(&mut self, name: &str, value: glam::Vec3) {
        let location = self.uniform_location(name);
        self.driver.uniform_vec3(location, &value.to_array());
    }

    pub fn set_f32(&mut self, name: &str, value: f32) {
        let location = self.uniform_location(name);
        self.driver.uniform_f32(location, value);
    }
}

impl<D: ShaderDriver> Drop for LinkedProgram<D> {
    fn drop(&mut self) {
        log::debug!("Releasing program {}", self.id);
        self.driver.delete_program(self.id);
    }
}

impl<D: ShaderDriver> std::fmt::Debug for LinkedProgram<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedProgram")
            .field("id", &self.id)
            .field("uniforms", &self.uniforms.len())
            .finish()
    }
}
