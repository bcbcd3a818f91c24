use bytemuck::{Pod, Zeroable};
use gl::types::*;
use std::mem;
use thiserror::Error;

use crate::gl_call;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const POSITION_LOCATION: GLuint = 0;
    pub const COLOR_LOCATION: GLuint = 1;
    pub const NORMAL_LOCATION: GLuint = 2;

    pub const fn new(position: [f32; 3], color: [f32; 4], normal: [f32; 3]) -> Self {
        Self {
            position,
            color,
            normal,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("Mesh has no indices")]
    Empty,
    #[error("Index count {0} is not a multiple of 3")]
    NotTriangles(usize),
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("Driver could not allocate mesh buffers")]
    CreateFailed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangles(self.indices.len()));
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: self.vertices.len(),
            });
        }
        Ok(())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// The flat 2D square of the first tutorial step, facing +Z.
pub fn quad() -> MeshData {
    const NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
    MeshData::new(
        vec![
            Vertex::new([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0, 1.0], NORMAL),
            Vertex::new([0.5, -0.5, 0.0], [0.0, 1.0, 0.0, 1.0], NORMAL),
            Vertex::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0, 1.0], NORMAL),
            Vertex::new([-0.5, 0.5, 0.0], [1.0, 1.0, 0.0, 1.0], NORMAL),
        ],
        vec![0, 1, 2, 2, 3, 0],
    )
}

/// Unit cube centred on the origin, four vertices per face so each face
/// carries its own normal and color.
pub fn cube() -> MeshData {
    // (normal, color, corners in counter-clockwise order seen from outside)
    let faces: [([f32; 3], [f32; 4], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [0.9, 0.3, 0.3, 1.0],
            [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
        ),
        (
            [0.0, 0.0, -1.0],
            [0.3, 0.9, 0.3, 1.0],
            [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
        ),
        (
            [1.0, 0.0, 0.0],
            [0.3, 0.3, 0.9, 1.0],
            [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
        ),
        (
            [-1.0, 0.0, 0.0],
            [0.9, 0.9, 0.3, 1.0],
            [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
        ),
        (
            [0.0, 1.0, 0.0],
            [0.3, 0.9, 0.9, 1.0],
            [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
        ),
        (
            [0.0, -1.0, 0.0],
            [0.9, 0.3, 0.9, 1.0],
            [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
        ),
    ];

    let mut data = MeshData::default();
    for (normal, color, corners) in faces {
        let base = data.vertices.len() as u32;
        data.vertices
            .extend(corners.iter().map(|&corner| Vertex::new(corner, color, normal)));
        data.indices
            .extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    data
}

/// Vertex array plus its vertex and index buffers, uploaded once with
/// `STATIC_DRAW`. Needs a current GL context; buffers are deleted on drop.
pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    ibo: GLuint,
    index_count: GLsizei,
}

impl Mesh {
    pub fn upload(data: &MeshData) -> Result<Self, MeshError> {
        data.validate()?;

        let mut mesh = Mesh {
            vao: 0,
            vbo: 0,
            ibo: 0,
            index_count: data.indices.len() as GLsizei,
        };

        gl_call!(gl::GenVertexArrays(1, &mut mesh.vao));
        gl_call!(gl::GenBuffers(1, &mut mesh.vbo));
        gl_call!(gl::GenBuffers(1, &mut mesh.ibo));
        if mesh.vao == 0 || mesh.vbo == 0 || mesh.ibo == 0 {
            return Err(MeshError::CreateFailed);
        }

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&data.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&data.indices);

        gl_call!(gl::BindVertexArray(mesh.vao));

        gl_call!(gl::BindBuffer(gl::ARRAY_BUFFER, mesh.vbo));
        gl_call!(gl::BufferData(
            gl::ARRAY_BUFFER,
            vertex_bytes.len() as GLsizeiptr,
            vertex_bytes.as_ptr() as *const _,
            gl::STATIC_DRAW,
        ));

        gl_call!(gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, mesh.ibo));
        gl_call!(gl::BufferData(
            gl::ELEMENT_ARRAY_BUFFER,
            index_bytes.len() as GLsizeiptr,
            index_bytes.as_ptr() as *const _,
            gl::STATIC_DRAW,
        ));

        let stride = mem::size_of::<Vertex>() as GLsizei;
        let attributes = [
            (Vertex::POSITION_LOCATION, 3, mem::offset_of!(Vertex, position)),
            (Vertex::COLOR_LOCATION, 4, mem::offset_of!(Vertex, color)),
            (Vertex::NORMAL_LOCATION, 3, mem::offset_of!(Vertex, normal)),
        ];
        for (location, components, offset) in attributes {
            gl_call!(gl::EnableVertexAttribArray(location));
            gl_call!(gl::VertexAttribPointer(
                location,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const _,
            ));
        }

        // The element buffer binding is recorded in the VAO, unbind the VAO first.
        gl_call!(gl::BindVertexArray(0));
        gl_call!(gl::BindBuffer(gl::ARRAY_BUFFER, 0));

        log::debug!(
            "Uploaded mesh: {} vertices, {} triangles",
            data.vertices.len(),
            data.triangle_count()
        );
        Ok(mesh)
    }

    pub fn index_count(&self) -> GLsizei {
        self.index_count
    }

    pub fn draw(&self) {
        gl_call!(gl::BindVertexArray(self.vao));
        gl_call!(gl::DrawElements(
            gl::TRIANGLES,
            self.index_count,
            gl::UNSIGNED_INT,
            std::ptr::null(),
        ));
        gl_call!(gl::BindVertexArray(0));
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.ibo);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
