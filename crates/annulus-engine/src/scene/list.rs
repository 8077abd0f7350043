use super::{Ring, ZIndex};

/// Stable paint-order key: layer first, then insertion order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

/// A recorded ring with its paint-order key.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub ring: Ring,
}

/// Rings recorded for a frame.
///
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame
///   allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded rings. Keeps allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.sorted_indices.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rings in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Records a ring on layer `z`.
    pub fn push(&mut self, z: ZIndex, ring: Ring) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey { z, order },
            ring,
        });
        self.sorted_dirty = true;
    }

    /// Records a ring on the default layer.
    #[inline]
    pub fn push_ring(&mut self, ring: Ring) {
        self.push(ZIndex::DEFAULT, ring);
    }

    /// Iterates rings back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted_indices.clear();
            self.sorted_indices.extend(0..self.items.len());

            let items = &self.items;
            self.sorted_indices.sort_unstable_by_key(|&i| items[i].key);
            self.sorted_dirty = false;
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }
}

impl Extend<Ring> for DrawList {
    fn extend<I: IntoIterator<Item = Ring>>(&mut self, iter: I) {
        for ring in iter {
            self.push_ring(ring);
        }
    }
}
