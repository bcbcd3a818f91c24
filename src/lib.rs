pub mod config;
pub mod gl_check;
pub mod input;
pub mod render;
pub mod shader;

// Re-export commonly used types
pub use config::AppConfig;
pub use render::camera::{CameraMove, CameraState, Projection};
pub use render::lighting::Lighting;
pub use render::mesh::{Mesh, MeshData};
pub use render::pipeline::RenderPipeline;
pub use shader::{
    load_source, CompiledStage, GlDriver, LinkedProgram, ShaderDriver, ShaderError,
    ShaderProgramBuilder, ShaderSource, StageKind,
};
