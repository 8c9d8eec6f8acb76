//! Parallel full-batch trainer for one-vs-rest logistic regression.
//!
//! The example range is split into fixed-size shards, one per compute unit;
//! each unit computes a partial gradient against the current weight snapshot,
//! the partials are summed in unit order, and a momentum step updates the
//! weights. The loop runs for a fixed iteration budget with no convergence
//! check.

pub mod aggregate;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod gradient;
pub mod layout;
pub mod model;
pub mod optimize;
pub mod partition;
pub mod train;

pub use config::{RunConfig, TrainingConfig};
pub use data::Dataset;
pub use error::{Result, TrainErr};
pub use eval::Accuracy;
pub use layout::RowLayout;
pub use model::Model;
pub use optimize::{MomentumSgd, Optimizer};
pub use train::Trainer;
