use std::num::NonZeroUsize;
use std::ops::Range;

/// Width of the vector registers the row padding aligns to.
pub const VECTOR_WIDTH: usize = 16;

/// Fixed-stride row layout shared by the feature, weight and gradient matrices.
///
/// Every row holds `num_features` feature slots, one bias slot (always `1.0`
/// in feature rows) and `VECTOR_WIDTH - 1` zero padding slots, so that the
/// full stride is a multiple of `VECTOR_WIDTH`. The padding is never read by
/// the update rule; it only exists so rows stay register-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    num_features: NonZeroUsize,
}

impl RowLayout {
    pub fn new(num_features: NonZeroUsize) -> Self {
        Self { num_features }
    }

    #[inline]
    pub fn num_features(self) -> usize {
        self.num_features.get()
    }

    /// Index of the bias slot inside a row.
    #[inline]
    pub fn bias(self) -> usize {
        self.num_features.get()
    }

    /// Row width without padding (features plus bias).
    #[inline]
    pub fn active(self) -> usize {
        self.num_features.get() + 1
    }

    /// Full padded row width.
    #[inline]
    pub fn stride(self) -> usize {
        self.num_features.get() + VECTOR_WIDTH
    }

    /// Flat-buffer range of row `i`.
    #[inline]
    pub fn row(self, i: usize) -> Range<usize> {
        let stride = self.stride();
        i * stride..(i + 1) * stride
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(n: usize) -> RowLayout {
        RowLayout::new(NonZeroUsize::new(n).unwrap())
    }

    #[test]
    fn stride_is_vector_aligned_offset() {
        let l = layout(784);
        assert_eq!(l.stride(), 800);
        assert_eq!(l.bias(), 784);
        assert_eq!(l.active(), 785);
    }

    #[test]
    fn rows_are_contiguous_and_disjoint() {
        let l = layout(2);
        assert_eq!(l.row(0), 0..18);
        assert_eq!(l.row(1), 18..36);
        assert_eq!(l.row(0).end, l.row(1).start);
    }
}
