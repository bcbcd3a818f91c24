use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::shader::{FRAGMENT_SHADER_PATH, VERTEX_SHADER_PATH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderPaths {
    pub vertex_path: PathBuf,
    pub fragment_path: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex_path: PathBuf::from(VERTEX_SHADER_PATH),
            fragment_path: PathBuf::from(FRAGMENT_SHADER_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub speed: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            speed: 0.1,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub light_color: [f32; 4],
    pub ambient: [f32; 4],
    pub light_position: [f32; 4],
    pub shininess: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_color: [1.0, 1.0, 1.0, 1.0],
            ambient: [0.1, 0.1, 0.1, 1.0],
            light_position: [1.2, 1.0, 2.0, 1.0],
            shininess: 32.0,
        }
    }
}
