use std::num::NonZeroUsize;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::{
    aggregate::sum_partials,
    config::TrainingConfig,
    data::Dataset,
    error::Result,
    gradient::partial_gradient,
    model::Model,
    optimize::{MomentumSgd, Optimizer},
    partition::{dropped_remainder, partition},
};

/// Drives the fixed-iteration training loop.
///
/// Each iteration dispatches every compute unit against the current weight
/// snapshot, waits for all of them (the parallel collect is the barrier),
/// aggregates the partial gradients in unit order and applies one optimizer
/// step. The example partition is computed once and never changes.
pub struct Trainer {
    num_classes: NonZeroUsize,
    config: TrainingConfig,
}

impl Trainer {
    /// Creates a trainer for a `num_classes`-way model.
    ///
    /// # Arguments
    /// * `num_classes` - Number of classes the model discriminates.
    /// * `config` - Fixed hyperparameters and execution bounds.
    pub fn new(num_classes: NonZeroUsize, config: TrainingConfig) -> Self {
        Self {
            num_classes,
            config,
        }
    }

    /// Trains a zero-initialized model on `dataset` with momentum descent.
    ///
    /// # Errors
    /// Fails before any computation if the configuration doesn't fit the
    /// dataset (more units than examples, bad hyperparameters).
    pub fn run(&self, dataset: &Dataset) -> Result<Model> {
        self.config.validate()?;

        let num_examples = NonZeroUsize::new(dataset.num_examples())
            .expect("dataset is never empty by construction");

        let mut optimizer = MomentumSgd::new(
            self.num_classes,
            dataset.layout(),
            self.config.alpha,
            self.config.gamma,
            num_examples,
        );

        self.run_with(dataset, &mut optimizer)
    }

    /// Trains a zero-initialized model using a caller-supplied optimizer.
    pub fn run_with<O: Optimizer>(&self, dataset: &Dataset, optimizer: &mut O) -> Result<Model> {
        let units = self.config.units.get();
        let iterations = self.config.iterations.get();

        let shards = partition(dataset.num_examples(), units)?;
        let dropped = dropped_remainder(dataset.num_examples(), units);
        if dropped > 0 {
            warn!(
                "{dropped} of {} examples don't fill a shard and are dropped",
                dataset.num_examples()
            );
        }

        info!(
            "training started: examples={} units={units} iterations={iterations}",
            dataset.num_examples()
        );

        let mut model = Model::zeroed(self.num_classes, dataset.layout());

        for t in 0..iterations {
            // Every unit reads the same weight snapshot; collect() joins all
            // of them before aggregation begins.
            let partials: Vec<Box<[f32]>> = shards
                .par_iter()
                .map(|shard| partial_gradient(dataset, &model, shard.clone()))
                .collect();

            let combined = sum_partials(partials);
            optimizer.step(&combined, model.weights_mut())?;

            debug!("iteration {}/{iterations} complete", t + 1);
        }

        info!("training finished");
        Ok(model)
    }
}
