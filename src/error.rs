use std::{error::Error, fmt, io};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, TrainErr>;

/// Failures surfaced by the training pipeline.
#[derive(Debug)]
pub enum TrainErr {
    Io(io::Error),
    /// The run configuration is unusable — caught before any computation.
    InvalidConfig(String),
    /// More compute units were requested than there are examples to split.
    TooManyUnits { units: usize, examples: usize },
    /// A dataset line could not be parsed.
    Parse {
        line: usize,
        token: String,
    },
    /// A dataset label falls outside `[0, num_classes)`.
    LabelOutOfRange {
        line: usize,
        label: usize,
        num_classes: usize,
    },
    /// A dataset line holds the wrong number of feature values.
    RowLengthMismatch {
        line: usize,
        got: usize,
        expected: usize,
    },
    /// The dataset file ran out of lines before `num_examples` were read.
    NotEnoughExamples { got: usize, expected: usize },
    /// A gradient buffer doesn't match the weight matrix shape.
    GradientLengthMismatch { got: usize, expected: usize },
}

impl fmt::Display for TrainErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainErr::Io(e) => write!(f, "io error: {e}"),
            TrainErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            TrainErr::TooManyUnits { units, examples } => write!(
                f,
                "cannot split {examples} examples among {units} compute units"
            ),
            TrainErr::Parse { line, token } => {
                write!(f, "line {line}: cannot parse '{token}'")
            }
            TrainErr::LabelOutOfRange {
                line,
                label,
                num_classes,
            } => write!(
                f,
                "line {line}: label {label} out of range (num_classes={num_classes})"
            ),
            TrainErr::RowLengthMismatch {
                line,
                got,
                expected,
            } => write!(
                f,
                "line {line}: expected {expected} feature values, got {got}"
            ),
            TrainErr::NotEnoughExamples { got, expected } => {
                write!(f, "expected {expected} examples, file holds {got}")
            }
            TrainErr::GradientLengthMismatch { got, expected } => write!(
                f,
                "gradient length mismatch: got {got}, expected {expected}"
            ),
        }
    }
}

impl Error for TrainErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TrainErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TrainErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
