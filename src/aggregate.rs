/// Sums partial gradient matrices element-wise into one combined gradient.
///
/// Partials are consumed in ascending unit order and the summation order is
/// fixed, so the floating point result is reproducible across runs with the
/// same inputs.
///
/// # Panics
/// If `partials` is empty or the buffers disagree in length. Both cases are
/// impossible for buffers produced by `partition` + `partial_gradient`.
pub fn sum_partials(partials: Vec<Box<[f32]>>) -> Box<[f32]> {
    let mut parts = partials.into_iter();
    let mut combined = parts.next().expect("at least one partial gradient");

    for partial in parts {
        assert_eq!(partial.len(), combined.len(), "partial gradient shape mismatch");
        for (acc, p) in combined.iter_mut().zip(&partial) {
            *acc += p;
        }
    }

    combined
}
