use std::ops::Range;

use crate::{data::Dataset, model::Model};

/// Computes the partial gradient of one shard against a weight snapshot.
///
/// Per example and class: dot product over the real feature slots plus the
/// bias weight, independent logistic probability (one-vs-rest, deliberately
/// not softmax-normalized), error against the label indicator, and
/// accumulation of `error * feature` over the feature and bias slots.
///
/// The returned buffer is weight-matrix shaped and freshly zeroed; padding
/// slots would only ever accumulate zero and are skipped. Examples are
/// processed strictly in shard order, classes in ascending order, so the
/// floating point rounding of the accumulation is reproducible.
pub fn partial_gradient(dataset: &Dataset, model: &Model, shard: Range<usize>) -> Box<[f32]> {
    let layout = dataset.layout();
    assert_eq!(layout, model.layout(), "dataset/model layout mismatch");

    let stride = layout.stride();
    let num_features = layout.num_features();

    let mut partial = vec![0.0f32; model.num_classes() * stride].into_boxed_slice();

    for i in shard {
        let row = dataset.row(i);
        let label = dataset.label(i);

        for k in 0..model.num_classes() {
            let weights = model.class_row(k);
            let mut dot = weights[layout.bias()];

            for (w, x) in weights[..num_features].iter().zip(row) {
                dot += w * x;
            }

            let mut err = 1.0 / (1.0 + (-dot).exp());
            if label == k {
                err -= 1.0;
            }

            let acc = &mut partial[k * stride..k * stride + layout.active()];
            for (g, x) in acc.iter_mut().zip(row) {
                *g += err * x;
            }
        }
    }

    partial
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use crate::layout::RowLayout;

    use super::*;

    fn layout(n: usize) -> RowLayout {
        RowLayout::new(NonZeroUsize::new(n).unwrap())
    }

    fn assert_close(got: &[f32], want: &[f32], tol: f32) {
        assert_eq!(got.len(), want.len());
        for (i, (g, w)) in got.iter().zip(want).enumerate() {
            assert!(
                (g - w).abs() <= tol,
                "slot {i}: got {g}, want {w} (tol {tol})"
            );
        }
    }

    #[test]
    fn zero_weights_give_half_probabilities() {
        // With all weights zero every dot is 0 and every probability 0.5, so
        // the error is -0.5 for the labeled class and +0.5 otherwise.
        let layout = layout(2);
        let dataset = Dataset::from_dense(
            layout,
            &[&[1.0, 2.0], &[0.5, -1.0], &[-2.0, 0.0]],
            vec![0, 1, 0],
        );
        let model = Model::zeroed(NonZeroUsize::new(2).unwrap(), layout);

        let partial = partial_gradient(&dataset, &model, 0..3);
        let stride = layout.stride();

        // class 0: errors are [-0.5, +0.5, -0.5]
        assert_close(
            &partial[..3],
            &[
                -0.5 * 1.0 + 0.5 * 0.5 + -0.5 * -2.0,
                -0.5 * 2.0 + 0.5 * -1.0 + -0.5 * 0.0,
                -0.5 + 0.5 - 0.5,
            ],
            1e-6,
        );
        // class 1: errors are [+0.5, -0.5, +0.5]
        assert_close(
            &partial[stride..stride + 3],
            &[
                0.5 * 1.0 + -0.5 * 0.5 + 0.5 * -2.0,
                0.5 * 2.0 + -0.5 * -1.0 + 0.5 * 0.0,
                0.5 - 0.5 + 0.5,
            ],
            1e-6,
        );
    }

    #[test]
    fn known_weights_match_hand_computed_gradient() {
        let layout = layout(2);
        let dataset = Dataset::from_dense(
            layout,
            &[&[1.0, 2.0], &[0.5, -1.0], &[-2.0, 0.0]],
            vec![0, 1, 0],
        );

        let mut model = Model::zeroed(NonZeroUsize::new(2).unwrap(), layout);
        let stride = layout.stride();
        model.weights_mut()[..3].copy_from_slice(&[0.1, -0.2, 0.05]);
        model.weights_mut()[stride..stride + 3].copy_from_slice(&[-0.3, 0.4, 0.0]);

        let partial = partial_gradient(&dataset, &model, 0..3);

        // Worked out by hand from the per-class sigmoid errors:
        //   class 0 dots: -0.25, 0.3, -0.15 -> errors -0.5621765, 0.5744425, -0.5374299
        //   class 1 dots:  0.5, -0.55, 0.6  -> errors  0.6224593, -0.6341356, 0.6456563
        assert_close(&partial[..3], &[0.7999046, -1.6987956, -0.5251639], 1e-4);
        assert_close(
            &partial[stride..stride + 3],
            &[-0.9859211, 1.8790543, 0.6339800],
            1e-4,
        );
    }

    #[test]
    fn padding_slots_stay_zero() {
        let layout = layout(2);
        let dataset = Dataset::from_dense(layout, &[&[1.0, 2.0]], vec![0]);
        let model = Model::zeroed(NonZeroUsize::new(2).unwrap(), layout);

        let partial = partial_gradient(&dataset, &model, 0..1);
        let stride = layout.stride();

        for k in 0..2 {
            let pad = &partial[k * stride + layout.active()..(k + 1) * stride];
            assert!(pad.iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn shard_bounds_select_examples() {
        let layout = layout(2);
        let dataset = Dataset::from_dense(
            layout,
            &[&[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]],
            vec![0, 1, 0],
        );
        let model = Model::zeroed(NonZeroUsize::new(2).unwrap(), layout);

        let all = partial_gradient(&dataset, &model, 0..3);
        let head = partial_gradient(&dataset, &model, 0..1);
        let tail = partial_gradient(&dataset, &model, 1..3);

        for (a, (h, t)) in all.iter().zip(head.iter().zip(tail.iter())) {
            assert!((a - (h + t)).abs() <= 1e-6);
        }
    }
}
