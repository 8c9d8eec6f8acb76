use std::ops::Range;

use crate::error::{Result, TrainErr};

/// Splits `[0, num_examples)` into `num_units` contiguous equal-length shards.
///
/// Every shard has exactly `num_examples / num_units` examples; remainder
/// examples are dropped and processed by no unit. The fixed-chunk policy is
/// part of the numeric contract: shard boundaries determine the floating
/// point accumulation order, so they must not depend on anything but the two
/// arguments.
///
/// # Errors
/// Returns `TooManyUnits` if `num_units` is zero or exceeds `num_examples`.
pub fn partition(num_examples: usize, num_units: usize) -> Result<Vec<Range<usize>>> {
    if num_units == 0 || num_examples < num_units {
        return Err(TrainErr::TooManyUnits {
            units: num_units,
            examples: num_examples,
        });
    }

    let chunk = num_examples / num_units;
    Ok((0..num_units).map(|u| u * chunk..(u + 1) * chunk).collect())
}

/// Number of examples `partition` would leave unassigned.
pub fn dropped_remainder(num_examples: usize, num_units: usize) -> usize {
    num_examples % num_units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_split_covers_everything() {
        let shards = partition(12, 4).unwrap();

        assert_eq!(shards, vec![0..3, 3..6, 6..9, 9..12]);
        assert_eq!(dropped_remainder(12, 4), 0);
    }

    #[test]
    fn remainder_examples_are_dropped() {
        let shards = partition(10, 3).unwrap();

        assert_eq!(shards, vec![0..3, 3..6, 6..9]);
        assert_eq!(dropped_remainder(10, 3), 1);
    }

    #[test]
    fn shards_are_ordered_disjoint_and_equal_length() {
        for (n, units) in [(124800, 4), (7, 7), (100, 9)] {
            let shards = partition(n, units).unwrap();
            let chunk = n / units;

            assert_eq!(shards.len(), units);
            for (u, shard) in shards.iter().enumerate() {
                assert_eq!(shard.len(), chunk);
                if u > 0 {
                    assert_eq!(shard.start, shards[u - 1].end);
                }
            }
            assert_eq!(shards.last().unwrap().end, units * chunk);
        }
    }

    #[test]
    fn zero_units_is_rejected() {
        assert!(matches!(
            partition(10, 0),
            Err(TrainErr::TooManyUnits { units: 0, examples: 10 })
        ));
    }

    #[test]
    fn more_units_than_examples_is_rejected() {
        assert!(matches!(
            partition(3, 4),
            Err(TrainErr::TooManyUnits { units: 4, examples: 3 })
        ));
    }

    #[test]
    fn single_unit_takes_the_whole_range() {
        assert_eq!(partition(5, 1).unwrap(), vec![0..5]);
    }
}
