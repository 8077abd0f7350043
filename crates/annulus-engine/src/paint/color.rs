/// Straight-alpha linear RGBA color.
///
/// Channels are passed to the GPU as-is. The ring path never clamps or
/// premultiplies; blending is configured as straight alpha by the renderer.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Returns a copy with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Rgba> for wgpu::Color {
    fn from(c: Rgba) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_channels_are_kept() {
        // HDR / out-of-range values pass through untouched.
        let c = Rgba::new(2.0, -1.0, 0.5, 1.5);
        assert_eq!(c.to_array(), [2.0, -1.0, 0.5, 1.5]);
    }

    #[test]
    fn with_alpha_only_touches_alpha() {
        assert_eq!(Rgba::GRAY.with_alpha(0.25), Rgba::new(0.5, 0.5, 0.5, 0.25));
    }

    #[test]
    fn clear_color_conversion() {
        let c: wgpu::Color = Rgba::WHITE.into();
        assert_eq!(c, wgpu::Color::WHITE);
    }
}
