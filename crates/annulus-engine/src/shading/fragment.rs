use glam::Vec2;

use crate::paint::Rgba;

/// Center of the ring in texture space.
pub const RING_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Result of the fragment stage for one pixel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Fragment {
    /// Pixel is not written; color and depth targets stay untouched.
    Discard,
    /// Pixel is written with this color (before host blending).
    Emit(Rgba),
}

impl Fragment {
    #[inline]
    pub fn is_discard(self) -> bool {
        matches!(self, Fragment::Discard)
    }

    #[inline]
    pub fn color(self) -> Option<Rgba> {
        match self {
            Fragment::Discard => None,
            Fragment::Emit(c) => Some(c),
        }
    }
}

/// Normalized distance of `coord` from the ring center.
///
/// `1.0` lies exactly on the circle inscribed in the unit square.
#[inline]
pub fn ring_length(coord: Vec2) -> f32 {
    (coord - RING_CENTER).length() * 2.0
}

/// Fragment stage of the ring program.
///
/// Both comparisons are strict, so `len == 1.0` and `len == inner` emit.
/// Out-of-range `inner` and coordinates are not guarded: `inner <= 0` gives a
/// filled disk, `inner > 1` discards everything. A NaN length fails both tests
/// and emits.
#[inline]
pub fn shade_fragment(coord: Vec2, color: Rgba, inner: f32) -> Fragment {
    let len = ring_length(coord);
    if len > 1.0 {
        return Fragment::Discard;
    }
    if len < inner {
        return Fragment::Discard;
    }
    Fragment::Emit(color)
}
