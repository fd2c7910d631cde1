use crate::core::base::*;
use crate::core::bound::Bounded;

/// Bounded k-nearest accumulator over non-owning item references, used for
/// density estimation over stored photons.
///
/// A binary max-heap of `(squared distance, item)` pairs keyed on distance
/// to the query center. Once the heap holds `k` items the search radius
/// snaps to the root key and every replacement tightens it further, which
/// is the pruning that makes repeated queries cheap. The root is always the
/// *farthest* retained item; call `into_sorted` for near-to-far order.
///
/// Capacity is fixed for the accumulator's lifetime and must be at least 1;
/// `k == 0` is a caller error and panics.
pub struct KNearestItems<'a, T: Bounded + ?Sized> {
    center: Point3f,
    search_radius_sq: Float,
    k: usize,
    entries: Vec<(Float, &'a T)>,
}

impl<'a, T: Bounded + ?Sized> KNearestItems<'a, T> {
    pub fn new(center: &Point3f, search_radius_sq: Float, k: usize) -> Self {
        assert!(k >= 1, "KNearestItems requires a capacity of at least 1");
        KNearestItems {
            center: *center,
            search_radius_sq,
            k,
            entries: Vec::with_capacity(k),
        }
    }

    #[inline]
    pub fn center(&self) -> Point3f {
        return self.center;
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        return self.k;
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    /// Current admission radius; shrinks monotonically once full.
    #[inline]
    pub fn search_radius_sq(&self) -> Float {
        return self.search_radius_sq;
    }

    /// Retained items in heap order (root first; farthest first only at
    /// index 0, no full ordering).
    pub fn items(&self) -> &[(Float, &'a T)] {
        return &self.entries;
    }

    /// Offer an item; returns whether it was retained. Items beyond the
    /// current search radius are rejected outright. A full heap replaces
    /// its root (the farthest keeper) and tightens the radius to the new
    /// root key.
    pub fn insert(&mut self, item: &'a T) -> bool {
        let d_sq = item.bound().center.distance_squared(self.center);
        if d_sq > self.search_radius_sq {
            return false;
        }

        if self.entries.len() < self.k {
            self.entries.push((d_sq, item));
            self.sift_up(self.entries.len() - 1);
            if self.entries.len() == self.k {
                self.search_radius_sq = self.entries[0].0;
            }
            return true;
        }

        // Full: the candidate passed the radius test, so it is no farther
        // than the current root.
        self.entries[0] = (d_sq, item);
        self.sift_down(0);
        self.search_radius_sq = self.entries[0].0;
        return true;
    }

    /// Consume the accumulator, returning items ordered near to far.
    pub fn into_sorted(mut self) -> Vec<(Float, &'a T)> {
        self.entries
            .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        return self.entries;
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[i].0 <= self.entries[parent].0 {
                break;
            }
            self.entries.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.entries.len();
        loop {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            let mut largest = i;
            if l < n && self.entries[l].0 > self.entries[largest].0 {
                largest = l;
            }
            if r < n && self.entries[r].0 > self.entries[largest].0 {
                largest = r;
            }
            if largest == i {
                break;
            }
            self.entries.swap(i, largest);
            i = largest;
        }
    }
}
