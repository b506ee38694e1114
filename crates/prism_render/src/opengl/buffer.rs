use prism_dependencies::gl::{
    self,
    types::{GLsizei, GLsizeiptr, GLuint, GLvoid},
};
use std::{mem, ptr};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: GLuint,
    pub components: u32,
    pub offset: usize,
}

/// Interleaved `f32` attributes, described by their component counts
/// in location order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    components: u32,
}

impl VertexLayout {
    pub fn new(attribute_sizes: &[u32]) -> Self {
        let mut components: u32 = 0;
        let attributes = attribute_sizes
            .iter()
            .enumerate()
            .map(|(location, size)| {
                let attribute = VertexAttribute {
                    location: location as _,
                    components: *size,
                    offset: components as usize * mem::size_of::<f32>(),
                };
                components += size;
                attribute
            })
            .collect();
        Self {
            attributes,
            components,
        }
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Floats per vertex.
    pub fn components(&self) -> u32 {
        self.components
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> usize {
        self.components as usize * mem::size_of::<f32>()
    }

    pub fn vertex_count(&self, vertices: &[f32]) -> usize {
        vertices
            .len()
            .checked_div(self.components as usize)
            .unwrap_or_default()
    }
}

/// A vertex array with its vertex buffer and optional index buffer.
pub struct GeometryBuffer {
    vao: GLuint,
    vbo: GLuint,
    ibo: Option<GLuint>,
    vertex_count: usize,
    index_count: usize,
}

impl GeometryBuffer {
    pub fn new(vertices: &[f32], indices: Option<&[u32]>, attribute_sizes: &[u32]) -> Self {
        let layout = VertexLayout::new(attribute_sizes);

        let mut vao = 0;
        let mut vbo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                mem::size_of_val(vertices) as GLsizeiptr,
                vertices.as_ptr() as *const GLvoid,
                gl::STATIC_DRAW,
            );
        }

        // The element array binding is recorded in the vertex array
        let ibo = indices.map(|indices| {
            let mut ibo = 0;
            unsafe {
                gl::GenBuffers(1, &mut ibo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    mem::size_of_val(indices) as GLsizeiptr,
                    indices.as_ptr() as *const GLvoid,
                    gl::STATIC_DRAW,
                );
            }
            ibo
        });

        for attribute in layout.attributes() {
            unsafe {
                gl::VertexAttribPointer(
                    attribute.location,
                    attribute.components as _,
                    gl::FLOAT,
                    gl::FALSE,
                    layout.stride() as GLsizei,
                    attribute.offset as *const GLvoid,
                );
                gl::EnableVertexAttribArray(attribute.location);
            }
        }

        unsafe {
            gl::BindVertexArray(0);
        }

        Self {
            vao,
            vbo,
            ibo,
            vertex_count: layout.vertex_count(vertices),
            index_count: indices.map(|indices| indices.len()).unwrap_or_default(),
        }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// Draws every triangle in the buffer. Expects the buffer to be bound.
    pub fn draw(&self) {
        unsafe {
            match self.ibo {
                Some(_) => gl::DrawElements(
                    gl::TRIANGLES,
                    self.index_count as GLsizei,
                    gl::UNSIGNED_INT,
                    ptr::null(),
                ),
                None => gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count as GLsizei),
            }
        }
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        unsafe {
            if let Some(ibo) = self.ibo.as_ref() {
                gl::DeleteBuffers(1, ibo);
            }
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_layout_offsets() {
        let layout = VertexLayout::new(&[3, 3, 2]);
        assert_eq!(layout.components(), 8);
        assert_eq!(layout.stride(), 32);
        let offsets = layout
            .attributes()
            .iter()
            .map(|attribute| attribute.offset)
            .collect::<Vec<_>>();
        assert_eq!(offsets, vec![0, 12, 24]);
    }

    #[test]
    fn locations_follow_declaration_order() {
        let layout = VertexLayout::new(&[3, 2]);
        assert_eq!(
            layout.attributes(),
            &[
                VertexAttribute {
                    location: 0,
                    components: 3,
                    offset: 0
                },
                VertexAttribute {
                    location: 1,
                    components: 2,
                    offset: 12
                },
            ]
        );
    }

    #[test]
    fn vertex_count_uses_components_per_vertex() {
        let layout = VertexLayout::new(&[3]);
        assert_eq!(layout.vertex_count(&[0.0; 9]), 3);
        assert_eq!(VertexLayout::new(&[3, 3, 2]).vertex_count(&[0.0; 288]), 36);
    }

    #[test]
    fn empty_layout_has_no_vertices() {
        let layout = VertexLayout::new(&[]);
        assert_eq!(layout.stride(), 0);
        assert_eq!(layout.vertex_count(&[1.0, 2.0]), 0);
    }
}
