use std::{
    fs::File,
    io::{self, BufWriter, Write},
    num::NonZeroUsize,
    path::Path,
};

use crate::layout::RowLayout;

/// The weight matrix of a one-vs-rest logistic model.
///
/// One padded row per class, same stride as the feature matrix. Row `k`
/// holds class `k`'s coefficients in the feature slots and the learned
/// intercept in the bias slot; the padding slots are never written after
/// initialization and stay `0.0`.
#[derive(Debug, Clone)]
pub struct Model {
    layout: RowLayout,
    num_classes: NonZeroUsize,
    weights: Box<[f32]>,
}

impl Model {
    /// A zero-initialized model, the starting point of every run.
    pub fn zeroed(num_classes: NonZeroUsize, layout: RowLayout) -> Self {
        Self {
            layout,
            num_classes,
            weights: vec![0.0; num_classes.get() * layout.stride()].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn layout(&self) -> RowLayout {
        self.layout
    }

    #[inline]
    pub fn num_classes(&self) -> usize {
        self.num_classes.get()
    }

    /// The full flat weight buffer, padding included.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    pub(crate) fn weights_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }

    /// The padded weight row of class `k`.
    #[inline]
    pub fn class_row(&self, k: usize) -> &[f32] {
        &self.weights[self.layout.row(k)]
    }

    /// Scores one example and returns the class with the greatest
    /// probability under the per-class logistic link.
    ///
    /// `example` is an unpadded feature row; the bias is added internally.
    /// Ties resolve to the lowest class index (the scan keeps the first
    /// strict improvement).
    ///
    /// # Panics
    /// If `example.len()` differs from the layout's feature count.
    pub fn classify(&self, example: &[f32]) -> usize {
        assert_eq!(
            example.len(),
            self.layout.num_features(),
            "example width mismatch"
        );

        let mut best_prob = f32::NEG_INFINITY;
        let mut prediction = 0;

        for k in 0..self.num_classes.get() {
            let row = self.class_row(k);
            let mut dot = row[self.layout.bias()];

            for (w, x) in row.iter().zip(example) {
                dot += w * x;
            }

            let prob = 1.0 / (1.0 + (-dot).exp());
            if prob > best_prob {
                best_prob = prob;
                prediction = k;
            }
        }

        prediction
    }

    /// Serializes the weight matrix as CSV, one padded row per class.
    ///
    /// All `stride` values of every row are written, padding included, to
    /// stay byte-compatible with consumers of the original output format.
    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        for k in 0..self.num_classes.get() {
            let row = self.class_row(k);
            let mut slots = row.iter();

            if let Some(first) = slots.next() {
                write!(out, "{first}")?;
            }
            for value in slots {
                write!(out, ",{value}")?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    /// Writes the model CSV to a file. See [`Model::write_csv`].
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_csv(&mut out)?;
        out.flush()
    }
}
