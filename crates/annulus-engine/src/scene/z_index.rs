/// Paint layer of a ring. Higher layers are painted over lower ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const BACKGROUND: Self = Self(-100);
    pub const DEFAULT: Self = Self(0);
    pub const OVERLAY: Self = Self(100);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}
