use eframe::glow;
use zerocopy::AsBytes;

use crate::gfx::{Shader, Vertex, VertexAttribute};

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("could not create GL object: {0}")]
    Create(String),
    #[error("attribute `{0}` is not an active input of the program")]
    MissingAttribute(&'static str),
}

/// Pairs every layout entry with the location `locate` reports for its name.
/// Stops at the first name the program does not expose.
pub fn resolve_layout(
    layout: &[VertexAttribute],
    mut locate: impl FnMut(&str) -> Option<u32>,
) -> Result<Vec<(u32, VertexAttribute)>, GeometryError> {
    layout
        .iter()
        .map(|attr| {
            locate(attr.name)
                .map(|location| (location, *attr))
                .ok_or(GeometryError::MissingAttribute(attr.name))
        })
        .collect()
}

/// Static vertex data plus the layout the program reads it with.
#[derive(Debug, Clone)]
pub struct Geometry {
    verts: Vec<Vertex>,
    indices: Option<Vec<u32>>,
    layout: Vec<VertexAttribute>,

    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
    ebo: Option<glow::Buffer>,
}

impl Geometry {
    pub fn new(verts: &[Vertex], indices: Option<&[u32]>, layout: &[VertexAttribute]) -> Self {
        debug_assert!(layout
            .iter()
            .all(|attr| attr.offset + attr.size() <= size_of::<Vertex>()));

        Self {
            verts: verts.to_vec(),
            indices: indices.map(<[u32]>::to_vec),
            layout: layout.to_vec(),
            vao: None,
            vbo: None,
            ebo: None,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of elements one draw call covers.
    pub fn element_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.verts.len(),
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.vao.is_some() && self.vbo.is_some()
    }

    /// Uploads the vertex (and index) data once and wires every layout entry to
    /// the program's attribute location of the same name.
    pub fn setup_gl(&mut self, gl: &glow::Context, shader: &Shader) -> Result<(), GeometryError> {
        if self.is_uploaded() {
            log::warn!("geometry already uploaded, skipping");
            return Ok(());
        }

        // Resolve locations up front so nothing is allocated for a program that can't use us
        let locations = resolve_layout(&self.layout, |name| shader.attrib_location(gl, name))?;

        unsafe {
            use glow::HasContext as _;

            let vao = gl.create_vertex_array().map_err(GeometryError::Create)?;
            self.vao = Some(vao);
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    self.destroy_gl(gl);
                    return Err(GeometryError::Create(e));
                }
            };
            self.vbo = Some(vbo);

            gl.bind_vertex_array(self.vao);
            gl.bind_buffer(glow::ARRAY_BUFFER, self.vbo);
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                self.verts.as_slice().as_bytes(),
                glow::STATIC_DRAW,
            );

            if let Some(indices) = &self.indices {
                let ebo = match gl.create_buffer() {
                    Ok(ebo) => ebo,
                    Err(e) => {
                        gl.bind_vertex_array(None);
                        self.destroy_gl(gl);
                        return Err(GeometryError::Create(e));
                    }
                };
                self.ebo = Some(ebo);

                // Element buffer binding is recorded in the VAO
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.ebo);
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    indices.as_slice().as_bytes(),
                    glow::STATIC_DRAW,
                );
            }

            for (location, attr) in locations {
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(
                    location,
                    attr.components,
                    glow::FLOAT,
                    false,
                    size_of::<Vertex>() as _,
                    attr.offset as _,
                );
            }

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }

        log::debug!(
            "uploaded {} vertices ({} elements, indexed: {})",
            self.verts.len(),
            self.element_count(),
            self.is_indexed()
        );
        Ok(())
    }

    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            if let Some(vao) = self.vao.take() {
                gl.delete_vertex_array(vao);
            }
            if let Some(ebo) = self.ebo.take() {
                gl.delete_buffer(ebo);
            }
            if let Some(vbo) = self.vbo.take() {
                gl.delete_buffer(vbo);
            }
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        if !self.is_uploaded() {
            return;
        }

        unsafe {
            use glow::HasContext as _;

            gl.bind_vertex_array(self.vao);
            if self.is_indexed() {
                gl.draw_elements(
                    glow::TRIANGLES,
                    self.element_count() as _,
                    glow::UNSIGNED_INT,
                    0,
                );
            } else {
                gl.draw_arrays(glow::TRIANGLES, 0, self.element_count() as _);
            }
            gl.bind_vertex_array(None);
        }
    }
}
