use ark_ff::PrimeField;
use crate::error::GkrResult;
use crate::sumcheck::prover::prove;
use crate::sumcheck::verifier::{verify, SumCheckOutcome};
use crate::sumcheck::{OracleEvaluation, SumCheckPoly, SumCheckProof};
use crate::transcript::Transcript;

pub struct SumCheckProtocol {
    max_step_partial_poly_degree: usize,
}

impl SumCheckProtocol {
    pub fn new(max_step_partial_poly_degree: usize) -> Self {
        Self { max_step_partial_poly_degree }
    }

    pub fn prove<F: PrimeField, S: SumCheckPoly<F>>(
        &self,
        poly: &mut S,
        transcript: &mut Transcript<F>,
    ) -> (SumCheckProof<F>, Vec<F>) {
        assert_eq!(poly.degree(), self.max_step_partial_poly_degree);

        prove(poly, transcript)
    }

    pub fn verify<F: PrimeField, E: OracleEvaluation<F>>(
        &self,
        final_evaluation_oracle: &E,
        proof: &SumCheckProof<F>,
        claimed_sum: F,
        num_vars: usize,
        transcript: &mut Transcript<F>,
    ) -> GkrResult<SumCheckOutcome<F>> {
        verify(
            final_evaluation_oracle,
            proof,
            claimed_sum,
            num_vars,
            self.max_step_partial_poly_degree,
            transcript,
        )
    }
}
