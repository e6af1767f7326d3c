use ark_ff::Field;
use ark_std::cfg_iter_mut;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::GkrResult;
use crate::field::try_inverse;

const MIN_PARALLEL_LEN: usize = 1 << 10;

/// Boolean point of index `k`, variable `j` taken from bit `j`.
pub fn to_boolean_point<F: Field>(k: usize, num_vars: usize) -> Vec<F> {
    (0..num_vars)
        .map(|j| F::from(((k >> j) & 1) as u64))
        .collect()
}

/// `eq(a, b) = prod_j (a_j * b_j + (1 - a_j) * (1 - b_j))`
pub fn eq_eval<F: Field>(a: &[F], b: &[F]) -> F {
    assert_eq!(a.len(), b.len());

    a.iter()
        .zip(b.iter())
        .map(|(a_j, b_j)| *a_j * b_j + (F::one() - a_j) * (F::one() - b_j))
        .product()
}

/// Table of `eq(point, x)` over every boolean `x`, indexed little-endian.
pub fn eq_evals<F: Field>(point: &[F]) -> Vec<F> {
    let mut evals = vec![F::zero(); 1 << point.len()];
    evals[0] = F::one();

    for (j, r_j) in point.iter().enumerate() {
        let size = 1 << j;
        let (low, high) = evals[..2 * size].split_at_mut(size);

        cfg_iter_mut!(low, MIN_PARALLEL_LEN)
            .zip(cfg_iter_mut!(high, MIN_PARALLEL_LEN))
            .for_each(|(lo, hi)| {
                *hi = *lo * r_j;
                *lo -= *hi;
            });
    }

    evals
}

/// Evaluates at `r` the univariate polynomial of degree `< evals.len()`
/// taking `evals[i]` at `X = i`.
pub fn evaluate_univariate_on_evals<F: Field>(evals: &[F], r: F) -> GkrResult<F> {
    let nodes = (0..evals.len() as u64).map(F::from).collect::<Vec<_>>();
    let mut res = F::zero();

    for (i, (x_i, y_i)) in nodes.iter().zip(evals).enumerate() {
        let mut numerator = F::one();
        let mut denominator = F::one();

        for (j, x_j) in nodes.iter().enumerate() {
            if i != j {
                numerator *= r - x_j;
                denominator *= *x_i - x_j;
            }
        }

        let inv = try_inverse(denominator, "interpolating a round polynomial")?;
        res += *y_i * numerator * inv;
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use crate::field::{to_f, Goldilocks, F97};
    use super::*;

    #[test]
    fn eq_evals_match_eq_eval() {
        let point = to_f::<Goldilocks>(&[3, 11, 29]);
        let table = eq_evals(&point);

        assert_eq!(table.len(), 8);
        for (k, value) in table.iter().enumerate() {
            assert_eq!(*value, eq_eval(&point, &to_boolean_point(k, 3)));
        }
    }

    #[test]
    fn eq_evals_on_boolean_point_is_indicator() {
        let point = to_boolean_point::<Goldilocks>(0b101, 3);
        let table = eq_evals(&point);

        for (k, value) in table.iter().enumerate() {
            let expected = if k == 0b101 { 1 } else { 0 };
            assert_eq!(*value, Goldilocks::from(expected as u64));
        }
    }

    #[test]
    fn univariate_from_evals() {
        // 2x^2 + 3x + 5
        let evals = to_f::<F97>(&[5, 10, 19]);

        assert_eq!(evaluate_univariate_on_evals(&evals, F97::from(1u64)).unwrap(), F97::from(10u64));
        assert_eq!(evaluate_univariate_on_evals(&evals, F97::from(4u64)).unwrap(), F97::from(49u64));
        assert_eq!(evaluate_univariate_on_evals(&evals, F97::from(10u64)).unwrap(), F97::from(41u64));
    }

    #[test]
    fn univariate_with_colliding_nodes_fails() {
        // 98 nodes collapse modulo 97
        let evals = vec![F97::from(1u64); 98];

        assert!(evaluate_univariate_on_evals(&evals, F97::from(3u64)).is_err());
    }
}
