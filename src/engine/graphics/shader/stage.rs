//! Shader pipeline stages.

use std::fmt;
use std::path::Path;

/// One programmable step of the GL pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
}

impl ShaderStage {
    /// Number of distinct stages, and the capacity of a [`StageTable`](super::StageTable).
    pub const COUNT: usize = 5;

    /// Every stage in pipeline order.
    pub const ALL: [ShaderStage; Self::COUNT] = [
        ShaderStage::Vertex,
        ShaderStage::TessControl,
        ShaderStage::TessEvaluation,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
    ];

    /// Slot index of this stage in a stage table.
    pub const fn index(self) -> usize {
        match self {
            ShaderStage::Vertex => 0,
            ShaderStage::TessControl => 1,
            ShaderStage::TessEvaluation => 2,
            ShaderStage::Geometry => 3,
            ShaderStage::Fragment => 4,
        }
    }

    /// The GL shader type enum passed to `glCreateShader`.
    pub const fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::TessControl => glow::TESS_CONTROL_SHADER,
            ShaderStage::TessEvaluation => glow::TESS_EVALUATION_SHADER,
            ShaderStage::Geometry => glow::GEOMETRY_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
        }
    }

    /// Guess the stage from the conventional GLSL file extensions
    /// (`.vert`, `.tesc`, `.tese`, `.geom`, `.frag`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "vert" | "vs" => Some(ShaderStage::Vertex),
            "tesc" => Some(ShaderStage::TessControl),
            "tese" => Some(ShaderStage::TessEvaluation),
            "geom" | "gs" => Some(ShaderStage::Geometry),
            "frag" | "fs" => Some(ShaderStage::Fragment),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
