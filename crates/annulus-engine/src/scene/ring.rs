use glam::{Mat4, Vec2, Vec3};

use crate::paint::Rgba;
use crate::shading::Transforms;

/// A ring in world space.
///
/// The renderer draws it as the unit quad mapped onto the square of side
/// `2 * outer_radius` around `center`, with the program's `inner` set to
/// `inner_radius / outer_radius`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ring {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: Rgba,
}

impl Ring {
    #[inline]
    pub const fn new(center: Vec2, inner_radius: f32, outer_radius: f32, color: Rgba) -> Self {
        Self { center, inner_radius, outer_radius, color }
    }

    /// Solid disk.
    #[inline]
    pub const fn filled(center: Vec2, radius: f32, color: Rgba) -> Self {
        Self::new(center, 0.0, radius, color)
    }

    /// Outline of width `thickness` centered on the circle of radius `radius`.
    #[inline]
    pub fn outline(center: Vec2, radius: f32, thickness: f32, color: Rgba) -> Self {
        let half = thickness * 0.5;
        Self::new(center, radius - half, radius + half, color)
    }

    /// Local quad -> world transform.
    ///
    /// `T(center) * S(2 * outer) * T(-0.5, -0.5)`: the quad center lands on
    /// `center` and the quad edges on `center ± outer_radius`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.center.extend(0.0))
            * Mat4::from_scale(Vec3::splat(self.outer_radius * 2.0))
            * Mat4::from_translation(Vec3::new(-0.5, -0.5, 0.0))
    }

    /// The program's `inner` value.
    #[inline]
    pub fn inner_ratio(&self) -> f32 {
        self.inner_radius / self.outer_radius
    }

    /// Whether the renderer can draw this ring.
    ///
    /// A non-positive or non-finite outer radius has no valid model matrix or
    /// inner ratio. Everything else is passed to the program unguarded.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.outer_radius > 0.0 && self.outer_radius.is_finite()
    }

    /// Full transform set for a camera's `(projection, view)`.
    #[inline]
    pub fn transforms(&self, projection: Mat4, view: Mat4) -> Transforms {
        Transforms::new(projection, view, self.model_matrix())
    }
}
