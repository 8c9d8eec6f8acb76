use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;

use crate::{
    data::tokens,
    error::{Result, TrainErr},
    model::Model,
};

/// Held-out classification accuracy of a trained model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    pub fn ratio(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f32 / self.total as f32
        }
    }
}

/// Classifies every example of a delimited-text test set.
///
/// Lines starting with `#` or a space are comments and skipped, as are empty
/// lines. Each remaining line holds the label followed by exactly
/// `num_features` feature values; labels may be written as floats
/// (`3` and `3.0` both parse).
pub fn evaluate<R: BufRead>(reader: R, model: &Model) -> Result<Accuracy> {
    let num_features = model.layout().num_features();
    let mut example = vec![0.0f32; num_features];
    let mut acc = Accuracy {
        correct: 0,
        total: 0,
    };

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') || line.starts_with(' ') {
            continue;
        }

        let lineno = lineno + 1;
        let mut toks = tokens(&line);

        let Some(first) = toks.next() else {
            continue;
        };
        let label = first.parse::<f32>().map_err(|_| TrainErr::Parse {
            line: lineno,
            token: first.to_string(),
        })? as usize;

        let mut count = 0;
        for tok in toks {
            if count == num_features {
                count += 1;
                break;
            }
            example[count] = tok.parse::<f32>().map_err(|_| TrainErr::Parse {
                line: lineno,
                token: tok.to_string(),
            })?;
            count += 1;
        }

        if count != num_features {
            return Err(TrainErr::RowLengthMismatch {
                line: lineno,
                got: count,
                expected: num_features,
            });
        }

        if model.classify(&example) == label {
            acc.correct += 1;
        }
        acc.total += 1;
    }

    debug!("evaluated {} examples, {} correct", acc.total, acc.correct);
    Ok(acc)
}

/// Evaluates a test file. See [`evaluate`].
pub fn evaluate_file(path: &Path, model: &Model) -> Result<Accuracy> {
    let file = File::open(path)?;
    evaluate(BufReader::new(file), model)
}
