use std::path::Path;
use std::rc::Rc;

use glow::HasContext;
use image::RgbaImage;
use log::{info, warn};

/// Decoded RGBA8 pixels, ready for upload.
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        info!("[texture] Loaded texture: {}x{} from {}", width, height, path.display());
        Ok(Self::from_rgba(rgba))
    }

    pub fn from_rgba(rgba: RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            pixels: rgba.into_raw(),
        }
    }

    /// Two-tone checkerboard used when the real texture cannot be loaded.
    pub fn checkerboard(size: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        let rgba = RgbaImage::from_fn(size, size, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                image::Rgba([200, 90, 60, 255])
            } else {
                image::Rgba([235, 225, 210, 255])
            }
        });
        Self::from_rgba(rgba)
    }
}

/// A 2D GL texture with repeat wrapping, linear filtering and mipmaps.
pub struct Texture {
    gl: Rc<glow::Context>,
    texture: glow::Texture,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn upload(gl: Rc<glow::Context>, image: &TextureImage) -> Result<Self, String> {
        let texture = unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);

            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                image.width as i32,
                image.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(&image.pixels),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);
            texture
        };

        Ok(Self {
            gl,
            texture,
            width: image.width,
            height: image.height,
        })
    }

    /// Load `path`, falling back to a generated checkerboard if it cannot be decoded.
    pub fn load_or_default(gl: Rc<glow::Context>, path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let image = TextureImage::load(path).unwrap_or_else(|e| {
            warn!("Failed to load texture {}: {}, using default", path.display(), e);
            TextureImage::checkerboard(64, 8)
        });
        Self::upload(gl, &image)
    }

    pub fn bind(&self) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture)) }
    }

    pub fn unbind(&self) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, None) }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe { self.gl.delete_texture(self.texture) }
    }
}
