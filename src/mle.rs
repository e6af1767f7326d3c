use std::ops::Deref;
use ark_ff::Field;
use ark_poly::{DenseMultilinearExtension, MultilinearExtension};
use ark_std::cfg_iter_mut;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::poly_utils::eq_evals;

const MIN_PARALLEL_LEN: usize = 1 << 10;

/// Multilinear extension of a boolean-indexed value table.
///
/// Variable `j` of the extension corresponds to bit `j` of the table index,
/// matching `ark-poly`. Binding always consumes the first (lowest) variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilinearPoly<F: Field>(DenseMultilinearExtension<F>);

impl<F: Field> MultilinearPoly<F> {
    pub fn new(poly: DenseMultilinearExtension<F>) -> Self {
        Self(poly)
    }

    /// Table of `values`, zero padded to the next power of two.
    pub fn from_values(values: &[F]) -> Self {
        let len = values.len().max(1).next_power_of_two();
        let mut evaluations = values.to_vec();
        evaluations.resize(len, F::zero());

        Self(DenseMultilinearExtension::from_evaluations_vec(
            len.trailing_zeros() as usize,
            evaluations,
        ))
    }

    pub fn values(&self) -> &[F] {
        &self.0.evaluations
    }

    /// `sum_x table[x] * eq(point, x)`.
    pub fn evaluate_at(&self, point: &[F]) -> F {
        assert_eq!(point.len(), self.num_vars());

        eq_evals(point)
            .iter()
            .zip(self.values())
            .map(|(basis, value)| *basis * value)
            .sum()
    }

    /// Binds the first variable to `r`, halving the table in place.
    pub fn fix_first_variable(&mut self, r: F) {
        assert!(self.num_vars() > 0, "no variable left to bind");

        let table = self.values();
        let mut folded = vec![F::zero(); table.len() / 2];

        // pairs (2i, 2i + 1) differ in the first variable only
        cfg_iter_mut!(folded, MIN_PARALLEL_LEN)
            .enumerate()
            .for_each(|(i, e)| {
                let lo = table[2 * i];
                let hi = table[2 * i + 1];
                *e = lo + r * (hi - lo);
            });

        self.0.evaluations = folded;
        self.0.num_vars -= 1;
    }

    /// The value once every variable is bound.
    pub fn final_value(&self) -> F {
        assert_eq!(self.num_vars(), 0);

        self.values()[0]
    }
}

impl<F: Field> Deref for MultilinearPoly<F> {
    type Target = DenseMultilinearExtension<F>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F: Field> From<Vec<F>> for MultilinearPoly<F> {
    fn from(values: Vec<F>) -> Self {
        Self::from_values(&values)
    }
}

#[cfg(test)]
mod tests {
    use ark_poly::Polynomial;
    use ark_std::{test_rng, UniformRand};
    use crate::field::{to_f, Goldilocks, F97};
    use crate::poly_utils::to_boolean_point;
    use super::*;

    #[test]
    fn agrees_with_table_on_hypercube() {
        let poly = MultilinearPoly::from_values(&to_f::<F97>(&[4, 8, 15, 16, 23, 42, 7, 1]));

        for k in 0..8 {
            assert_eq!(poly.evaluate_at(&to_boolean_point(k, 3)), poly.values()[k]);
        }
    }

    #[test]
    fn pads_to_power_of_two() {
        let poly = MultilinearPoly::from_values(&to_f::<F97>(&[1, 2, 3]));

        assert_eq!(poly.num_vars(), 2);
        assert_eq!(poly.values(), to_f::<F97>(&[1, 2, 3, 0]).as_slice());

        let single = MultilinearPoly::from_values(&to_f::<F97>(&[9]));
        assert_eq!(single.num_vars(), 0);
        assert_eq!(single.evaluate_at(&[]), F97::from(9u64));
    }

    #[test]
    fn two_variable_extension() {
        // f(x0, x1) = 3 (1-x0)(1-x1) + 5 x0 (1-x1) + 7 (1-x0) x1 + 11 x0 x1
        let poly = MultilinearPoly::from_values(&to_f::<F97>(&[3, 5, 7, 11]));
        let point = to_f::<F97>(&[2, 3]);

        // 3*(-1)(-2) + 5*2*(-2) + 7*(-1)*3 + 11*2*3 = 6 - 20 - 21 + 66
        assert_eq!(poly.evaluate_at(&point), F97::from(31u64));
    }

    #[test]
    fn binding_matches_evaluation() {
        let mut rng = test_rng();
        let values = (0..16).map(|_| Goldilocks::rand(&mut rng)).collect::<Vec<_>>();
        let point = (0..4).map(|_| Goldilocks::rand(&mut rng)).collect::<Vec<_>>();

        let full = MultilinearPoly::from_values(&values);
        let expected = full.evaluate_at(&point);
        assert_eq!(expected, full.evaluate(&point));

        let mut bound = full.clone();
        for (i, r) in point.iter().enumerate() {
            bound.fix_first_variable(*r);
            assert_eq!(bound.num_vars(), 3 - i);
            assert_eq!(bound.values().len(), 1 << (3 - i));
            assert_eq!(bound.evaluate_at(&point[i + 1..]), expected);
        }

        assert_eq!(bound.final_value(), expected);
    }

    #[test]
    fn binding_matches_ark_fix_variables() {
        let values = to_f::<F97>(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let r = F97::from(13u64);

        let mut ours = MultilinearPoly::from_values(&values);
        ours.fix_first_variable(r);
        let theirs = DenseMultilinearExtension::from_evaluations_vec(3, values).fix_variables(&[r]);

        assert_eq!(ours.values(), theirs.evaluations.as_slice());
    }
}
