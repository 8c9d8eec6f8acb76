use std::num::NonZeroUsize;

use crate::{
    error::{Result, TrainErr},
    layout::RowLayout,
};

/// The weight-update seam of the training loop.
///
/// Implementations own whatever per-run state the update rule needs and are
/// the only component allowed to mutate the weight buffer.
pub trait Optimizer {
    /// Applies one combined gradient to the weight buffer in place.
    ///
    /// Both buffers are full padded matrices in the same row layout.
    ///
    /// # Errors
    /// `GradientLengthMismatch` if `grad` and `weights` disagree with the
    /// shape the optimizer was built for.
    fn step(&mut self, grad: &[f32], weights: &mut [f32]) -> Result<()>;
}

/// Momentum gradient descent over the mean gradient.
///
/// Per class `k` and active slot `j` (features plus bias, padding excluded):
///
/// ```text
/// velocity[k][j] = gamma * velocity[k][j] + (alpha / num_examples) * gradient[k][j]
/// weight[k][j]  -= velocity[k][j]
/// ```
///
/// The division is by the full dataset size, not the shard size, so each
/// shard's contribution is implicitly weighted by its fraction of the
/// dataset. Velocity rows are unpadded (`num_features + 1` wide), persist
/// across iterations and are never reset.
#[derive(Debug)]
pub struct MomentumSgd {
    layout: RowLayout,
    num_classes: usize,
    scale: f32,
    gamma: f32,
    velocity: Box<[f32]>,
}

impl MomentumSgd {
    /// Creates a momentum optimizer with zeroed velocity.
    ///
    /// # Arguments
    /// * `num_classes` - Number of weight rows.
    /// * `layout` - The shared row layout.
    /// * `alpha` - Learning rate.
    /// * `gamma` - Momentum coefficient.
    /// * `num_examples` - Full dataset size used for the mean-gradient scale.
    pub fn new(
        num_classes: NonZeroUsize,
        layout: RowLayout,
        alpha: f32,
        gamma: f32,
        num_examples: NonZeroUsize,
    ) -> Self {
        Self {
            layout,
            num_classes: num_classes.get(),
            scale: alpha / num_examples.get() as f32,
            gamma,
            velocity: vec![0.0; num_classes.get() * layout.active()].into_boxed_slice(),
        }
    }
}

impl Optimizer for MomentumSgd {
    fn step(&mut self, grad: &[f32], weights: &mut [f32]) -> Result<()> {
        let expected = self.num_classes * self.layout.stride();
        if grad.len() != expected || weights.len() != expected {
            return Err(TrainErr::GradientLengthMismatch {
                got: grad.len().min(weights.len()),
                expected,
            });
        }

        let active = self.layout.active();
        let gamma = self.gamma;
        let scale = self.scale;

        for k in 0..self.num_classes {
            let row = self.layout.row(k);
            let vrow = &mut self.velocity[k * active..(k + 1) * active];
            let grow = &grad[row.clone()][..active];
            let wrow = &mut weights[row][..active];

            vrow.iter_mut()
                .zip(grow)
                .zip(wrow)
                .for_each(|((v, g), w)| {
                    *v = gamma * *v + scale * g;
                    *w -= *v;
                });
        }

        Ok(())
    }
}
