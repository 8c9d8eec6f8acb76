use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;

use super::Dataset;
use crate::{
    error::{Result, TrainErr},
    layout::RowLayout,
};

/// Splits a dataset line into value tokens.
///
/// Commas, whitespace and the decoration characters some export formats wrap
/// values in (`(`, `)`, `[`, `]`, `=`) all count as delimiters.
pub(crate) fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')' | '[' | ']' | '='))
        .filter(|t| !t.is_empty())
}

/// Reads a delimited-text training set into the padded layout.
///
/// Each non-empty line holds the integer class label followed by
/// `layout.num_features()` feature values. Exactly `num_examples` rows are
/// consumed; trailing lines are ignored.
///
/// # Errors
/// - `Parse` / `LabelOutOfRange` / `RowLengthMismatch` for malformed lines
/// - `NotEnoughExamples` if the input ends early
pub fn read_dataset<R: BufRead>(
    reader: R,
    layout: RowLayout,
    num_classes: usize,
    num_examples: usize,
) -> Result<Dataset> {
    let stride = layout.stride();
    let mut features = vec![0.0f32; num_examples * stride];
    let mut labels = Vec::with_capacity(num_examples);

    for (lineno, line) in reader.lines().enumerate() {
        if labels.len() == num_examples {
            break;
        }

        let line = line?;
        let mut toks = tokens(&line);

        let Some(first) = toks.next() else {
            continue;
        };

        let lineno = lineno + 1;
        let label = first.parse::<usize>().map_err(|_| TrainErr::Parse {
            line: lineno,
            token: first.to_string(),
        })?;

        if label >= num_classes {
            return Err(TrainErr::LabelOutOfRange {
                line: lineno,
                label,
                num_classes,
            });
        }

        let base = labels.len() * stride;
        let mut count = 0;

        for tok in toks {
            if count == layout.num_features() {
                count += 1;
                break;
            }
            features[base + count] = tok.parse::<f32>().map_err(|_| TrainErr::Parse {
                line: lineno,
                token: tok.to_string(),
            })?;
            count += 1;
        }

        if count != layout.num_features() {
            return Err(TrainErr::RowLengthMismatch {
                line: lineno,
                got: count,
                expected: layout.num_features(),
            });
        }

        features[base + layout.bias()] = 1.0;
        labels.push(label);
    }

    if labels.len() < num_examples {
        return Err(TrainErr::NotEnoughExamples {
            got: labels.len(),
            expected: num_examples,
        });
    }

    debug!("read {} examples of {} features", labels.len(), layout.num_features());
    Ok(Dataset::new(layout, features, labels))
}

/// Reads a training set from a file. See [`read_dataset`].
pub fn load_dataset(
    path: &Path,
    layout: RowLayout,
    num_classes: usize,
    num_examples: usize,
) -> Result<Dataset> {
    let file = File::open(path)?;
    read_dataset(BufReader::new(file), layout, num_classes, num_examples)
}
