pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod pipeline;

pub use camera::{CameraMove, CameraState, Projection};
pub use lighting::{FrameUniforms, Lighting};
pub use mesh::{Mesh, MeshData, MeshError, Vertex};
pub use pipeline::RenderPipeline;
