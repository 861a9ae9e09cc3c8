use std::path::{Path, PathBuf};

use eframe::glow;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to load texture {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture {} has no pixels", path.display())]
    Empty { path: PathBuf },
    #[error("could not create texture: {0}")]
    Create(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    #[default]
    Linear,
    /// Trilinear minification; mip levels are generated on upload.
    LinearMipmapLinear,
}

impl TextureFilter {
    fn min_filter(self) -> i32 {
        match self {
            TextureFilter::Linear => glow::LINEAR as i32,
            TextureFilter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR as i32,
        }
    }

    fn needs_mipmaps(self) -> bool {
        matches!(self, TextureFilter::LinearMipmapLinear)
    }
}

/// Sampling setup. Wrapping is always `REPEAT` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureOptions {
    pub filter: TextureFilter,
}

/// RGBA8 pixels straight from the decoder.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub fn decode(path: &Path) -> Result<DecodedImage, TextureError> {
    let image = image::open(path)
        .map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(DecodedImage {
        width,
        height,
        pixels: image.into_raw(),
    })
}

#[derive(Debug, Clone)]
pub struct Texture {
    handle: glow::Texture,
}

impl Texture {
    pub fn load(
        gl: &glow::Context,
        path: &Path,
        options: TextureOptions,
    ) -> Result<Self, TextureError> {
        let image = decode(path)?;
        log::info!(
            "{}: decoded {}x{} texture",
            path.display(),
            image.width,
            image.height
        );
        // `image` is dropped on return, whether the upload succeeds or not
        Self::upload(gl, &image, options)
    }

    pub fn upload(
        gl: &glow::Context,
        image: &DecodedImage,
        options: TextureOptions,
    ) -> Result<Self, TextureError> {
        unsafe {
            use glow::HasContext as _;

            let handle = gl.create_texture().map_err(TextureError::Create)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                options.filter.min_filter(),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                image.width as i32,
                image.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(image.pixels.as_slice()),
            );
            if options.filter.needs_mipmaps() {
                gl.generate_mipmap(glow::TEXTURE_2D);
            }

            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self { handle })
        }
    }

    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            use glow::HasContext as _;

            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.handle));
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.delete_texture(self.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_small_rgba_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gato.png");
        let mut img = image::RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, image::Rgba([0, 0, 255, 128]));
        img.save(&path).unwrap();

        let decoded = decode(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (2, 2));
        assert_eq!(decoded.pixels.len(), 2 * 2 * 4);
        assert_eq!(&decoded.pixels[0..4], &[255, 0, 0, 255]);
        assert_eq!(&decoded.pixels[12..16], &[0, 0, 255, 128]);
    }

    #[test]
    fn rgb_images_gain_an_alpha_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        image::RgbImage::from_pixel(3, 1, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.pixels, [10, 20, 30, 255].repeat(3));
    }

    #[test]
    fn nonexistent_path_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        let err = decode(&path).unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(decode(&path), Err(TextureError::Decode { .. })));
    }

    #[test]
    fn only_mipmapped_filter_generates_levels() {
        assert!(!TextureFilter::Linear.needs_mipmaps());
        assert!(TextureFilter::LinearMipmapLinear.needs_mipmaps());
        assert_eq!(TextureOptions::default().filter, TextureFilter::Linear);
    }
}
