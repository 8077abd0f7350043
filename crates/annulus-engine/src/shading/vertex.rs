use glam::{Mat4, Vec2, Vec4};

/// The three transform uniforms of a draw call.
///
/// Column-vector convention: a position is mapped as
/// `projection * view * model * p` (model applied first).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
}

impl Transforms {
    #[inline]
    pub const fn new(projection: Mat4, view: Mat4, model: Mat4) -> Self {
        Self { projection, view, model }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }

    /// Combined local-to-clip matrix.
    #[inline]
    pub fn local_to_clip(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

impl Default for Transforms {
    fn default() -> Self {
        Self::identity()
    }
}

/// Per-vertex stage output.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexOutput {
    /// Homogeneous clip-space position (before perspective division).
    pub clip_position: Vec4,
    /// Texture-space interpolant: the input position with its vertical axis flipped.
    pub uv: Vec2,
}

/// Vertex stage of the ring program.
///
/// Never fails; non-finite inputs propagate through the arithmetic.
#[inline]
pub fn transform_vertex(position: Vec2, transforms: &Transforms) -> VertexOutput {
    let local = Vec4::new(position.x, position.y, 0.0, 1.0);
    let clip_position = transforms.projection * (transforms.view * (transforms.model * local));

    VertexOutput {
        clip_position,
        uv: Vec2::new(position.x, 1.0 - position.y),
    }
}
