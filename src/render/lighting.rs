use glam::{Mat4, Vec3, Vec4};

use crate::config::LightingConfig;
use crate::shader::{LinkedProgram, ShaderDriver};

pub const U_MODEL: &str = "u_Model";
pub const U_VIEW_PROJECTION: &str = "u_ViewProjection";
pub const U_CAMERA_POSITION: &str = "u_CameraPosition";
pub const U_LIGHT_COLOR: &str = "u_LightColor";
pub const U_AMBIENT: &str = "u_Ambient";
pub const U_LIGHT_POSITION: &str = "u_LightPosition";
pub const U_SHININESS: &str = "u_Shininess";

/// Phong light and material parameters, uploaded once per program bind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub light_color: Vec4,
    pub ambient: Vec4,
    pub light_position: Vec4,
    pub shininess: f32,
}

impl Lighting {
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            light_color: Vec4::from_array(config.light_color),
            ambient: Vec4::from_array(config.ambient),
            light_position: Vec4::from_array(config.light_position),
            // pow(x, 0) is 1 everywhere, which washes the highlight over the whole face.
            shininess: config.shininess.max(1.0),
        }
    }

    pub fn apply<D: ShaderDriver>(&self, program: &mut LinkedProgram<D>) {
        program.set_vec4(U_LIGHT_COLOR, self.light_color);
        program.set_vec4(U_AMBIENT, self.ambient);
        program.set_vec4(U_LIGHT_POSITION, self.light_position);
        program.set_f32(U_SHININESS, self.shininess);
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_config(&LightingConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub model: Mat4,
    pub view_projection: Mat4,
    pub camera_position: Vec3,
}

impl FrameUniforms {
    pub fn apply<D: ShaderDriver>(&self, program: &mut LinkedProgram<D>) {
        program.set_mat4(U_MODEL, &self.model);
        program.set_mat4(U_VIEW_PROJECTION, &self.view_projection);
        program.set_vec3(U_CAMERA_POSITION, self.camera_position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shininess_is_clamped() {
        let config = LightingConfig {
            shininess: 0.0,
            ..LightingConfig::default()
        };
        assert_eq!(Lighting::from_config(&config).shininess, 1.0);
        assert_eq!(Lighting::default().shininess, 32.0);
    }
}
