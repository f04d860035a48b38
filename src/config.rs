//! Demo configuration.

use std::path::{Path, PathBuf};

use log::info;

/// Environment variable that relocates every asset path.
pub const ASSET_DIR_ENV: &str = "CUBES_ASSET_DIR";

#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub gl_version: (u8, u8),
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub samples: u8,
    pub clear_color: [f32; 4],
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub texture: PathBuf,
    /// Distance of the orbiting eye from the origin.
    pub orbit_radius: f32,
    /// Spin of the centre cube, in degrees per second.
    pub spin_rate: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Spinning cubes - OpenGL 3.3".to_owned(),
            width: 800,
            height: 600,
            vsync: true,
            gl_version: (3, 3),
            depth_bits: 24,
            stencil_bits: 8,
            samples: 4,
            clear_color: [0.2, 0.3, 0.3, 1.0],
            vertex_shader: PathBuf::from("assets/shaders/texture.vert"),
            fragment_shader: PathBuf::from("assets/shaders/texture.frag"),
            texture: PathBuf::from("assets/textures/bricks.jpg"),
            orbit_radius: 5.0,
            spin_rate: 80.0,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl DemoConfig {
    /// Defaults, with asset paths moved under `$CUBES_ASSET_DIR` when it is set.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var_os(ASSET_DIR_ENV) {
            Some(root) => {
                info!("Loading assets from {:?}", root);
                config.with_asset_root(root)
            }
            None => config,
        }
    }

    /// Re-root the shader and texture paths, which are relative to `assets/`.
    pub fn with_asset_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        for path in [&mut self.vertex_shader, &mut self.fragment_shader, &mut self.texture] {
            let relative = path.strip_prefix("assets").unwrap_or(path.as_path()).to_path_buf();
            *path = root.join(relative);
        }
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}
