pub mod camera;
pub mod clock;
pub mod geometry;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use camera::Camera;
pub use clock::FrameClock;
pub use geometry::{Geometry, GeometryError};
pub use shader::{Shader, ShaderError};
pub use texture::{Texture, TextureError, TextureOptions};
pub use vertex::{Vertex, VertexAttribute};

use eframe::glow;

/// Something that owns GL objects and can draw itself with a bound program.
pub trait Model {
    fn destroy_gl(&mut self, gl: &glow::Context);

    fn draw(&mut self, gl: &glow::Context);
}
