use crate::layout::RowLayout;

/// An in-memory training set in the padded fixed-stride layout.
///
/// The feature buffer holds one padded row per example: `num_features`
/// feature values, a bias slot fixed at `1.0`, and zero padding up to the
/// row stride. Labels are class indices in `[0, num_classes)`; the loader
/// enforces the range, the dataset itself only stores them.
#[derive(Debug, Clone)]
pub struct Dataset {
    layout: RowLayout,
    features: Box<[f32]>,
    labels: Box<[usize]>,
}

impl Dataset {
    /// Wraps pre-padded buffers.
    ///
    /// # Panics
    /// - if `features.len()` is not `labels.len() * stride`
    /// - if `labels` is empty
    pub fn new(layout: RowLayout, features: Vec<f32>, labels: Vec<usize>) -> Self {
        assert!(!labels.is_empty(), "dataset must be non-empty");
        assert_eq!(
            features.len(),
            labels.len() * layout.stride(),
            "feature buffer length must be num_examples * stride"
        );

        Self {
            layout,
            features: features.into_boxed_slice(),
            labels: labels.into_boxed_slice(),
        }
    }

    /// Builds a dataset from unpadded feature rows, inserting the bias and
    /// padding slots.
    ///
    /// # Panics
    /// - if any row length differs from `layout.num_features()`
    /// - if `rows.len() != labels.len()` or `rows` is empty
    pub fn from_dense(layout: RowLayout, rows: &[&[f32]], labels: Vec<usize>) -> Self {
        assert_eq!(rows.len(), labels.len(), "one label per row required");

        let stride = layout.stride();
        let mut features = vec![0.0; rows.len() * stride];

        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), layout.num_features(), "row width mismatch");
            let base = i * stride;
            features[base..base + row.len()].copy_from_slice(row);
            features[base + layout.bias()] = 1.0;
        }

        Self::new(layout, features, labels)
    }

    #[inline]
    pub fn layout(&self) -> RowLayout {
        self.layout
    }

    #[inline]
    pub fn num_examples(&self) -> usize {
        self.labels.len()
    }

    /// Returns the padded feature row of example `i` (panics if out of bounds).
    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.features[self.layout.row(i)]
    }

    #[inline]
    pub fn label(&self, i: usize) -> usize {
        self.labels[i]
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn layout(n: usize) -> RowLayout {
        RowLayout::new(NonZeroUsize::new(n).unwrap())
    }

    #[test]
    fn dense_rows_get_bias_and_padding() {
        let ds = Dataset::from_dense(layout(2), &[&[3.0, 4.0]], vec![1]);

        let row = ds.row(0);
        assert_eq!(row.len(), 18);
        assert_eq!(&row[..3], &[3.0, 4.0, 1.0]);
        assert!(row[3..].iter().all(|&x| x == 0.0));
        assert_eq!(ds.label(0), 1);
    }

    #[test]
    fn rows_are_indexed_by_stride() {
        let ds = Dataset::from_dense(layout(2), &[&[1.0, 2.0], &[5.0, 6.0]], vec![0, 1]);

        assert_eq!(ds.num_examples(), 2);
        assert_eq!(&ds.row(1)[..2], &[5.0, 6.0]);
    }

    #[test]
    #[should_panic(expected = "row width mismatch")]
    fn wrong_row_width_panics() {
        Dataset::from_dense(layout(2), &[&[1.0]], vec![0]);
    }
}
