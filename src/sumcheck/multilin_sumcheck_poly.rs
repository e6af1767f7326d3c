use std::ops::Deref;
use ark_ff::Field;
use crate::mle::MultilinearPoly;
use crate::sumcheck::OracleEvaluation;
use crate::sumcheck::sumcheck_poly::SumCheckPoly;

/// Sumcheck over a single multilinear table, degree 1 per round.
#[derive(Clone, Debug)]
pub struct DenseMultilinSumcheckPoly<F: Field>(MultilinearPoly<F>);

impl<F: Field> DenseMultilinSumcheckPoly<F> {
    pub fn new(poly: MultilinearPoly<F>) -> Self {
        Self(poly)
    }

    pub fn from_values(values: &[F]) -> Self {
        Self(MultilinearPoly::from_values(values))
    }

    pub fn sum(&self) -> F {
        self.0.values().iter().copied().sum()
    }
}

impl<F: Field> Deref for DenseMultilinSumcheckPoly<F> {
    type Target = MultilinearPoly<F>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F: Field> SumCheckPoly<F> for DenseMultilinSumcheckPoly<F> {
    fn num_vars(&self) -> usize {
        self.0.num_vars
    }

    fn degree(&self) -> usize {
        1
    }

    fn round_evaluations(&self) -> Vec<F> {
        let (zeroes, ones) = self
            .0
            .values()
            .iter()
            .enumerate()
            .fold((F::zero(), F::zero()), |(zeroes, ones), (i, e)| {
                if i & 1 == 0 {
                    (zeroes + e, ones)
                } else {
                    (zeroes, ones + e)
                }
            });

        vec![zeroes, ones]
    }

    fn fix_first_variable(&mut self, r: F) {
        self.0.fix_first_variable(r);
    }
}

pub struct DenseMultilinFinalEvaluationOracle<F: Field>(MultilinearPoly<F>);

impl<F: Field> DenseMultilinFinalEvaluationOracle<F> {
    pub fn new(poly: MultilinearPoly<F>) -> Self {
        Self(poly)
    }
}

impl<F: Field> OracleEvaluation<F> for DenseMultilinFinalEvaluationOracle<F> {
    fn final_eval(&self, r: &[F]) -> F {
        self.0.evaluate_at(r)
    }
}
