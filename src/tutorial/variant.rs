use std::path::PathBuf;

use crate::gfx::{texture::TextureFilter, TextureOptions, Vertex, VertexAttribute};

/// What a variant's frame loop needs beyond "program + vertices".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub texture: bool,
    pub camera: bool,
    pub indices: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Two overlapping vertex-colored triangles.
    Triangles,
    /// A single vertex-colored triangle.
    Colored,
    /// An indexed, textured quad viewed through a movable camera.
    Textured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    Inline {
        vtx: &'static str,
        frag: &'static str,
    },
    Files {
        vtx: PathBuf,
        frag: PathBuf,
    },
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                 Variant Data                                                      //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const TRIANGLES_VERTS: [Vertex; 6] = [
    Vertex::new([-0.1, 0.1, -0.9], [1.0, 0.0, 0.0]),
    Vertex::new([0.8, 0.2, -0.9], [0.0, 1.0, 0.0]),
    Vertex::new([0.0, -1.0, -0.9], [0.0, 0.0, 1.0]),
    //
    Vertex::new([-0.6, 0.4, 0.0], [1.0, 0.0, 0.0]),
    Vertex::new([0.6, 0.4, 0.0], [0.0, 1.0, 0.0]),
    Vertex::new([0.0, -0.6, 0.0], [0.0, 0.0, 1.0]),
];

const TRIANGLES_LAYOUT: [VertexAttribute; 2] = [
    VertexAttribute::position("vPos"),
    VertexAttribute::color("vCol"),
];

const TRIANGLES_VS: &str = "#version 330 core
in vec3 vPos;
in vec3 vCol;
out vec3 color;
void main()
{
    gl_Position = vec4(vPos, 1.0);
    color = vCol;
}
";

const TRIANGLES_FS: &str = "#version 330 core
in vec3 color;
out vec4 FragColor;
void main()
{
    FragColor = vec4(color, 1.0);
}
";

const COLORED_VERTS: [Vertex; 3] = [
    Vertex::new([0.5, -0.5, 0.0], [1.0, 0.0, 0.0]),  // bottom right
    Vertex::new([-0.5, -0.5, 0.0], [0.0, 1.0, 0.0]), // bottom left
    Vertex::new([0.0, 0.5, 0.0], [0.0, 0.0, 1.0]),   // top
];

const COLORED_LAYOUT: [VertexAttribute; 2] = [
    VertexAttribute::position("aPos"),
    VertexAttribute::color("aColor"),
];

const COLORED_VS: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;
out vec3 ourColor;
void main()
{
    gl_Position = vec4(aPos, 1.0);
    ourColor = aColor;
}
";

const COLORED_FS: &str = "#version 330 core
in vec3 ourColor;
out vec4 FragColor;
void main()
{
    FragColor = vec4(ourColor, 1.0);
}
";

// Texture coordinates are mirrored so the image reads upright on the quad
const TEXTURED_VERTS: [Vertex; 4] = [
    Vertex::textured([-0.9, -0.9, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0]),
    Vertex::textured([-0.9, 0.9, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
    Vertex::textured([0.9, -0.9, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
    Vertex::textured([0.9, 0.9, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
];

const TEXTURED_INDICES: [u32; 6] = [0, 1, 2, 1, 2, 3];

const TEXTURED_LAYOUT: [VertexAttribute; 2] = [
    VertexAttribute::position("vPos"),
    VertexAttribute::tex_coord("vTxt"),
];

pub const TEXTURED_VS_PATH: &str = "Shaders/textured.vs";
pub const TEXTURED_FS_PATH: &str = "Shaders/textured.fs";
pub const DEFAULT_TEXTURE_PATH: &str = "assets/gato.png";

impl Variant {
    pub fn capabilities(self) -> Capabilities {
        match self {
            Variant::Triangles | Variant::Colored => Capabilities {
                texture: false,
                camera: false,
                indices: false,
            },
            Variant::Textured => Capabilities {
                texture: true,
                camera: true,
                indices: true,
            },
        }
    }

    pub fn vertices(self) -> &'static [Vertex] {
        match self {
            Variant::Triangles => &TRIANGLES_VERTS,
            Variant::Colored => &COLORED_VERTS,
            Variant::Textured => &TEXTURED_VERTS,
        }
    }

    pub fn indices(self) -> Option<&'static [u32]> {
        match self {
            Variant::Textured => Some(&TEXTURED_INDICES),
            _ => None,
        }
    }

    pub fn layout(self) -> &'static [VertexAttribute] {
        match self {
            Variant::Triangles => &TRIANGLES_LAYOUT,
            Variant::Colored => &COLORED_LAYOUT,
            Variant::Textured => &TEXTURED_LAYOUT,
        }
    }

    pub fn shader_source(self) -> ShaderSource {
        match self {
            Variant::Triangles => ShaderSource::Inline {
                vtx: TRIANGLES_VS,
                frag: TRIANGLES_FS,
            },
            Variant::Colored => ShaderSource::Inline {
                vtx: COLORED_VS,
                frag: COLORED_FS,
            },
            Variant::Textured => ShaderSource::Files {
                vtx: TEXTURED_VS_PATH.into(),
                frag: TEXTURED_FS_PATH.into(),
            },
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                 Scene Config                                                      //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Everything needed to build a [`super::Scene`], resolved before the window opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    pub variant: Variant,
    pub shaders: ShaderSource,
    pub texture: Option<PathBuf>,
    pub texture_options: TextureOptions,
}

impl SceneConfig {
    pub fn new(variant: Variant) -> Self {
        let texture = variant
            .capabilities()
            .texture
            .then(|| PathBuf::from(DEFAULT_TEXTURE_PATH));

        Self {
            variant,
            shaders: variant.shader_source(),
            texture,
            texture_options: TextureOptions {
                filter: TextureFilter::LinearMipmapLinear,
            },
        }
    }

    pub fn with_shader_files(mut self, vtx: PathBuf, frag: PathBuf) -> Self {
        self.shaders = ShaderSource::Files { vtx, frag };
        self
    }

    /// Only takes effect for variants that sample a texture.
    pub fn with_texture(mut self, path: PathBuf) -> Self {
        if self.variant.capabilities().texture {
            self.texture = Some(path);
        } else {
            log::warn!("{:?} does not use a texture, ignoring {}", self.variant, path.display());
        }
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        self.variant.capabilities()
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn indexed_variants_carry_indices() {
        for variant in Variant::value_variants() {
            let caps = variant.capabilities();
            assert_eq!(caps.indices, variant.indices().is_some(), "{variant:?}");

            if let Some(indices) = variant.indices() {
                assert_eq!(indices.len() % 3, 0);
                assert!(indices
                    .iter()
                    .all(|&i| (i as usize) < variant.vertices().len()));
            } else {
                assert_eq!(variant.vertices().len() % 3, 0);
            }
        }
    }

    #[test]
    fn layouts_fit_inside_a_vertex() {
        for variant in Variant::value_variants() {
            for attr in variant.layout() {
                assert!(attr.offset + attr.size() <= size_of::<Vertex>(), "{attr:?}");
            }
        }
    }

    #[test]
    fn inline_shaders_declare_version_first() {
        for variant in Variant::value_variants() {
            if let ShaderSource::Inline { vtx, frag } = variant.shader_source() {
                assert!(vtx.starts_with("#version 330 core\n"));
                assert!(frag.starts_with("#version 330 core\n"));
                for attr in variant.layout() {
                    assert!(vtx.contains(attr.name), "{} missing from {variant:?}", attr.name);
                }
            }
        }
    }

    #[test]
    fn shipped_textured_assets_are_usable() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));

        let vtx = std::fs::read_to_string(root.join(TEXTURED_VS_PATH)).unwrap();
        let frag = std::fs::read_to_string(root.join(TEXTURED_FS_PATH)).unwrap();
        assert!(vtx.starts_with("#version 330 core\n"));
        assert!(frag.starts_with("#version 330 core\n"));
        for attr in Variant::Textured.layout() {
            assert!(vtx.contains(attr.name));
        }
        for uniform in ["model", "view", "projection"] {
            assert!(vtx.contains(&format!("uniform mat4 {uniform};")));
        }
        assert!(frag.contains("uniform sampler2D texture1;"));

        let image = crate::gfx::texture::decode(&root.join(DEFAULT_TEXTURE_PATH)).unwrap();
        assert_eq!(image.pixels.len(), (image.width * image.height * 4) as usize);
    }

    #[test]
    fn textured_config_defaults() {
        let config = SceneConfig::new(Variant::Textured);
        assert_eq!(config.texture.as_deref(), Some(std::path::Path::new(DEFAULT_TEXTURE_PATH)));
        assert_eq!(
            config.shaders,
            ShaderSource::Files {
                vtx: TEXTURED_VS_PATH.into(),
                frag: TEXTURED_FS_PATH.into(),
            }
        );
    }

    #[test]
    fn untextured_variants_ignore_texture_override() {
        let config = SceneConfig::new(Variant::Colored).with_texture("cat.png".into());
        assert_eq!(config.texture, None);
        assert!(matches!(config.shaders, ShaderSource::Inline { .. }));

        let config = SceneConfig::new(Variant::Textured).with_texture("cat.png".into());
        assert_eq!(config.texture, Some(PathBuf::from("cat.png")));
    }
}
