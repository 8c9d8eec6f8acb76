mod dataset;
mod loader;

pub use dataset::Dataset;
pub use loader::{load_dataset, read_dataset};

pub(crate) use loader::tokens;
