// shader - source loading, stage compilation and program linking

pub mod driver;
pub mod handle;

pub use driver::{GlDriver, ShaderDriver};
pub use handle::{CompiledStage, LinkedProgram};

use gl::types::*;
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const VERTEX_SHADER_PATH: &str = "res/shaders/Vertex.glsl";
pub const FRAGMENT_SHADER_PATH: &str = "res/shaders/Fragment.glsl";

const EMPTY_LOG: &str = "no diagnostic output";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub fn gl_enum(self) -> GLenum {
        match self {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to read shader source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Null byte in shader source: {0}")]
    Nul(#[from] NulError),
    #[error("Driver could not create {0} object")]
    CreateFailed(&'static str),
    #[error("Failed to compile {stage} shader: {log}")]
    Compile { stage: StageKind, log: String },
    #[error("Program linking failed: {log}")]
    Link { log: String },
    #[error("Expected a {expected} stage, got a {found} stage")]
    StageMismatch {
        expected: StageKind,
        found: StageKind,
    },
}

impl ShaderError {
    /// Stage that failed to compile, if this is a compile error.
    pub fn stage(&self) -> Option<StageKind> {
        match self {
            ShaderError::Compile { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Vertex and fragment source text, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    vertex: String,
    fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn stage(&self, kind: StageKind) -> &str {
        match kind {
            StageKind::Vertex => &self.vertex,
            StageKind::Fragment => &self.fragment,
        }
    }
}

/// Reads both shader files. Either both succeed or no source is returned.
pub fn load_source(
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
) -> Result<ShaderSource, ShaderError> {
    let vertex = read_stage(vertex_path.as_ref())?;
    let fragment = read_stage(fragment_path.as_ref())?;
    Ok(ShaderSource { vertex, fragment })
}

fn read_stage(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| {
        log::error!("Cannot read shader {}: {}", path.display(), source);
        ShaderError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn non_empty_log(log: String) -> String {
    if log.trim().is_empty() {
        EMPTY_LOG.to_string()
    } else {
        log
    }
}

/// Compiles shader stages and links them into programs on one driver.
#[derive(Debug, Clone)]
pub struct ShaderProgramBuilder<D: ShaderDriver> {
    driver: D,
}

impl<D: ShaderDriver> ShaderProgramBuilder<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn compile_stage(&self, kind: StageKind, source: &str) -> Result<CompiledStage<D>, ShaderError> {
        let source = CString::new(source.as_bytes())?;

        let id = self.driver.create_shader(kind);
        if id == 0 {
            return Err(ShaderError::CreateFailed("shader"));
        }
        // Owned from here on, so every early return deletes it.
        let stage = CompiledStage::new(self.driver.clone(), id, kind);

        self.driver.shader_source(id, &source);
        self.driver.compile_shader(id);

        if !self.driver.compile_status(id) {
            let log = non_empty_log(self.driver.shader_info_log(id));
            log::error!("Failed to compile {} shader!", kind);
            log::error!("{}", log);
            return Err(ShaderError::Compile { stage: kind, log });
        }

        log::debug!("Compiled {} shader {}", kind, id);
        Ok(stage)
    }

    /// Links a vertex and a fragment stage. Both stages are consumed and
    /// released once the attempt is over, whatever its outcome.
    pub fn link(
        &self,
        vertex: CompiledStage<D>,
        fragment: CompiledStage<D>,
    ) -> Result<LinkedProgram<D>, ShaderError> {
        for (stage, expected) in [(&vertex, StageKind::Vertex), (&fragment, StageKind::Fragment)] {
            if stage.kind() != expected {
                return Err(ShaderError::StageMismatch {
                    expected,
                    found: stage.kind(),
                });
            }
        }

        let id = self.driver.create_program();
        if id == 0 {
            return Err(ShaderError::CreateFailed("program"));
        }
        let program = LinkedProgram::new(self.driver.clone(), id);

        self.driver.attach_shader(id, vertex.id());
        self.driver.attach_shader(id, fragment.id());
        self.driver.link_program(id);

        let linked = self.driver.link_status(id);
        let link_log = if linked {
            None
        } else {
            Some(non_empty_log(self.driver.program_info_log(id)))
        };

        if linked {
            self.driver.validate_program(id);
            if !self.driver.validate_status(id) {
                log::warn!(
                    "Program {} failed validation: {}",
                    id,
                    non_empty_log(self.driver.program_info_log(id))
                );
            }
        }

        drop(vertex);
        drop(fragment);

        if let Some(log) = link_log {
            log::error!("Failed to link program {}: {}", id, log);
            return Err(ShaderError::Link { log });
        }

        log::info!("Linked shader program {}", id);
        Ok(program)
    }

    pub fn build(&self, source: &ShaderSource) -> Result<LinkedProgram<D>, ShaderError> {
        let vertex = self.compile_stage(StageKind::Vertex, source.vertex())?;
        let fragment = self.compile_stage(StageKind::Fragment, source.fragment())?;
        self.link(vertex, fragment)
    }

    pub fn from_files(
        &self,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<LinkedProgram<D>, ShaderError> {
        let source = load_source(vertex_path, fragment_path)?;
        self.build(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn shader_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_stage_kind_names() {
        assert_eq!(StageKind::Vertex.to_string(), "vertex");
        assert_eq!(StageKind::Fragment.to_string(), "fragment");
        assert_eq!(StageKind::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(StageKind::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn test_load_source_reads_both_files() {
        let vs = shader_file("#version 330 core\nvoid main() {}\n");
        let fs = shader_file("#version 330 core\nout vec4 c;\nvoid main() { c = vec4(1.0); }\n");

        let source = load_source(vs.path(), fs.path()).unwrap();
        assert!(source.vertex().contains("void main"));
        assert!(source.fragment().contains("out vec4 c"));
        assert_eq!(source.stage(StageKind::Fragment), source.fragment());
    }

    #[test]
    fn test_load_source_missing_fragment_is_io_error() {
        let vs = shader_file("void main() {}");
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("Fragment.glsl");

        match load_source(vs.path(), &missing) {
            Err(ShaderError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_driver_log_gets_placeholder() {
        assert_eq!(non_empty_log(String::new()), EMPTY_LOG);
        assert_eq!(non_empty_log(" \n".to_string()), EMPTY_LOG);
        assert_eq!(non_empty_log("bad token".to_string()), "bad token");
    }

    #[test]
    fn test_compile_error_reports_stage() {
        let err = ShaderError::Compile {
            stage: StageKind::Fragment,
            log: "0:1: syntax error".to_string(),
        };
        assert_eq!(err.stage(), Some(StageKind::Fragment));
        assert!(err.to_string().contains("fragment"));
        assert!(ShaderError::Link { log: String::new() }.stage().is_none());
    }
}
