use std::mem::offset_of;

use zerocopy::AsBytes;

#[derive(Debug, Clone, Copy, AsBytes)]
#[repr(C)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub clr: [f32; 3],
    pub tex: [f32; 2],
}

impl Vertex {
    pub const fn new(pos: [f32; 3], clr: [f32; 3]) -> Self {
        Self {
            pos,
            clr,
            tex: [0.0, 0.0],
        }
    }

    pub const fn textured(pos: [f32; 3], clr: [f32; 3], tex: [f32; 2]) -> Self {
        Self { pos, clr, tex }
    }
}

/// One named shader input sourced from every [`Vertex`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub components: i32,
    pub offset: usize,
}

impl VertexAttribute {
    pub const fn new(name: &'static str, components: i32, offset: usize) -> Self {
        Self {
            name,
            components,
            offset,
        }
    }

    pub const fn position(name: &'static str) -> Self {
        Self::new(name, 3, offset_of!(Vertex, pos))
    }

    pub const fn color(name: &'static str) -> Self {
        Self::new(name, 3, offset_of!(Vertex, clr))
    }

    pub const fn tex_coord(name: &'static str) -> Self {
        Self::new(name, 2, offset_of!(Vertex, tex))
    }

    /// Byte length of the attribute inside a vertex.
    pub const fn size(&self) -> usize {
        self.components as usize * size_of::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(size_of::<Vertex>(), 8 * size_of::<f32>());
        assert_eq!(VertexAttribute::position("vPos").offset, 0);
        assert_eq!(VertexAttribute::color("vCol").offset, 12);
        assert_eq!(VertexAttribute::tex_coord("vTxt").offset, 24);
    }

    #[test]
    fn byte_view_matches_fields() {
        let verts = [Vertex::textured([1.0, 2.0, 3.0], [0.0; 3], [0.5, 0.25])];
        let bytes = verts.as_bytes();
        assert_eq!(bytes.len(), size_of::<Vertex>());
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[28..32], &0.25f32.to_ne_bytes());
    }
}
