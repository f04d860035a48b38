use glow::HasContext;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

/// One float attribute of [`Vertex`] as seen by the vertex shader.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
    pub offset: i32,
}

impl Vertex {
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

    pub const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            location: 0,
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 2,
            offset: std::mem::size_of::<[f32; 3]>() as i32,
        },
    ];

    pub const fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self { position, tex_coords }
    }

    /// Describe the layout to the bound vertex array object.
    ///
    /// # Safety
    ///
    /// Needs a current context with a VAO and an `ARRAY_BUFFER` bound.
    pub unsafe fn apply_layout(gl: &glow::Context) {
        for attribute in Self::ATTRIBUTES {
            gl.vertex_attrib_pointer_f32(
                attribute.location,
                attribute.components,
                glow::FLOAT,
                false,
                Self::STRIDE,
                attribute.offset,
            );
            gl.enable_vertex_attrib_array(attribute.location);
        }
    }
}

const fn v(x: f32, y: f32, z: f32, u: f32, t: f32) -> Vertex {
    Vertex::new([x, y, z], [u, t])
}

/// Unit cube centred on the origin, two triangles per face, no index buffer.
pub const CUBE_VERTICES: &[Vertex] = &[
    // Front
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    v(0.5, -0.5, -0.5, 1.0, 0.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    // Back
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(-0.5, 0.5, 0.5, 0.0, 1.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    // Left
    v(-0.5, 0.5, 0.5, 0.0, 1.0),
    v(-0.5, 0.5, -0.5, 1.0, 1.0),
    v(-0.5, -0.5, -0.5, 1.0, 0.0),
    v(-0.5, -0.5, -0.5, 1.0, 0.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(-0.5, 0.5, 0.5, 0.0, 1.0),
    // Right
    v(0.5, 0.5, 0.5, 0.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, -0.5, -0.5, 1.0, 0.0),
    v(0.5, -0.5, -0.5, 1.0, 0.0),
    v(0.5, -0.5, 0.5, 0.0, 0.0),
    v(0.5, 0.5, 0.5, 0.0, 1.0),
    // Bottom
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, -0.5, 1.0, 1.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    // Top
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(-0.5, 0.5, 0.5, 0.0, 0.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_is_six_faces_of_two_triangles() {
        assert_eq!(CUBE_VERTICES.len(), 36);
    }

    #[test]
    fn layout_matches_struct() {
        assert_eq!(Vertex::STRIDE, 5 * 4);
        assert_eq!(Vertex::ATTRIBUTES[1].offset, 12);
        let bytes: &[u8] = bytemuck::cast_slice(CUBE_VERTICES);
        assert_eq!(bytes.len(), 36 * Vertex::STRIDE as usize);
    }

    #[test]
    fn cube_fits_unit_box() {
        for vertex in CUBE_VERTICES {
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
            assert!(vertex.tex_coords.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
