use eframe::glow;
use glam::Mat4;

use crate::gfx::{
    shader::ShaderUniformTypes, Camera, Geometry, GeometryError, Model, Shader, ShaderError,
    Texture, TextureError,
};

use super::variant::{SceneConfig, ShaderSource};

/// Unit the scene texture is bound to; the sampler uniform points here.
const TEXTURE_UNIT: u32 = 0;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("no OpenGL context; the glow renderer is required")]
    NoGlContext,
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// GPU state for one tutorial variant. Only constructed once the program has
/// linked and the geometry is uploaded, so drawing never sees a half-built scene.
#[derive(Debug)]
pub struct Scene {
    pub camera: Option<Camera>,
    pub model_mat: Mat4,

    aspect: f32,
    shader: Shader,
    geometry: Geometry,
    texture: Option<Texture>,
}

impl Scene {
    pub fn new(gl: &glow::Context, config: &SceneConfig, aspect: f32) -> Result<Self, SetupError> {
        let capabilities = config.capabilities();
        log::info!("building {:?} scene with {capabilities:?}", config.variant);

        let shader = match &config.shaders {
            ShaderSource::Inline { vtx, frag } => Shader::from_src(gl, vtx, frag)?,
            ShaderSource::Files { vtx, frag } => Shader::from_files(gl, vtx, frag)?,
        };

        let variant = config.variant;
        debug_assert_eq!(capabilities.indices, variant.indices().is_some());
        let mut geometry = Geometry::new(variant.vertices(), variant.indices(), variant.layout());
        if let Err(e) = geometry.setup_gl(gl, &shader) {
            shader.destroy(gl);
            return Err(e.into());
        }

        let texture = match config.texture.as_deref() {
            Some(path) if capabilities.texture => {
                match Texture::load(gl, path, config.texture_options) {
                    Ok(texture) => Some(texture),
                    Err(e) => {
                        geometry.destroy_gl(gl);
                        shader.destroy(gl);
                        return Err(e.into());
                    }
                }
            }
            _ => None,
        };

        Ok(Self {
            camera: capabilities.camera.then(Camera::new),
            model_mat: Mat4::IDENTITY,
            aspect,
            shader,
            geometry,
            texture,
        })
    }
}

impl Model for Scene {
    /// Releases in reverse creation order: texture, geometry, program.
    fn destroy_gl(&mut self, gl: &glow::Context) {
        if let Some(texture) = self.texture.take() {
            texture.destroy(gl);
        }
        self.geometry.destroy_gl(gl);
        self.shader.destroy(gl);
    }

    fn draw(&mut self, gl: &glow::Context) {
        self.shader.use_program(gl);

        if let Some(texture) = &self.texture {
            texture.bind(gl, TEXTURE_UNIT);
            self.shader.set_uniform(
                gl,
                "texture1",
                ShaderUniformTypes::I32(&(TEXTURE_UNIT as i32)),
            );
        }

        if let Some(camera) = &mut self.camera {
            let projection = camera.get_projection(self.aspect);
            self.shader
                .set_uniform(gl, "projection", ShaderUniformTypes::Mat4(&projection));
            self.shader
                .set_uniform(gl, "view", ShaderUniformTypes::Mat4(&camera.get_mtx()));
            self.shader
                .set_uniform(gl, "model", ShaderUniformTypes::Mat4(&self.model_mat));
        }

        self.geometry.draw(gl);

        unsafe {
            use glow::HasContext as _;

            if self.texture.is_some() {
                gl.bind_texture(glow::TEXTURE_2D, None);
            }
            gl.use_program(None);
        }
    }
}
