use rand::Rng;

use crate::sampling::error::SampleError;

/// Draw one value from `values` with probability proportional to `weights`.
pub fn choose<'a, T, R>(
    values: &'a [T],
    weights: &[f64],
    rng: &mut R,
) -> Result<&'a T, SampleError>
where
    R: Rng + ?Sized,
{
    if values.len() != weights.len() {
        return Err(SampleError::LengthMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }

    let index = choose_index(weights, rng)?;
    Ok(&values[index])
}

/// Draw an index into `weights` with probability proportional to its weight.
///
/// `r` is drawn uniformly from `[0, total)` and the first index with a positive
/// weight whose inclusive cumulative weight reaches `r` wins. Zero-weight
/// entries can never be returned. Any finite weight is accepted, including
/// weights whose sum does not fit in an `f64`.
pub fn choose_index<R>(weights: &[f64], rng: &mut R) -> Result<usize, SampleError>
where
    R: Rng + ?Sized,
{
    if weights.is_empty() {
        return Err(SampleError::Empty);
    }

    let mut total = 0.0_f64;
    let mut largest = 0.0_f64;
    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() {
            return Err(SampleError::NonFiniteWeight { index, value });
        }
        if value < 0.0 {
            return Err(SampleError::NegativeWeight { index, value });
        }
        total += value;
        largest = largest.max(value);
    }

    if total <= 0.0 {
        return Err(SampleError::ZeroTotalWeight);
    }

    // Finite weights can still overflow when summed; relative to the largest
    // weight the total is at most `weights.len()`.
    let scale = if total.is_finite() { 1.0 } else { largest.recip() };
    if scale != 1.0 {
        total = weights.iter().map(|weight| weight * scale).sum();
    }

    let r = rng.gen_range(0.0..total);
    let mut cumulative = 0.0_f64;
    let mut last_positive = 0;

    for (index, &weight) in weights.iter().enumerate() {
        if weight == 0.0 {
            continue;
        }
        cumulative += weight * scale;
        last_positive = index;
        if cumulative >= r {
            return Ok(index);
        }
    }

    // Rounding can leave `cumulative` a hair below `r`.
    Ok(last_positive)
}
