use ark_ff::PrimeField;
use tracing::debug;

use crate::error::{GkrError, GkrResult};
use crate::gkr::circuit::Circuit;
use crate::gkr::common::{absorb_statement, combine_claims, OUTPUT_POINT_LABEL};
use crate::gkr::proof::{GKRProof, GKRProofLayer};
use crate::mle::MultilinearPoly;
use crate::poly_utils::eq_evals;
use crate::sumcheck::{OracleEvaluation, SumCheckOutcome, SumCheckProtocol};
use crate::transcript::Transcript;
use crate::verdict::{RejectReason, Verdict};

/// Evaluates the layer polynomial at the end of the sumcheck using the
/// wiring of layer `k` and the two claims the prover sent on layer `k - 1`.
#[derive(Debug, Clone)]
pub struct GKRFinalOracle<'a, F: PrimeField> {
    circuit: &'a Circuit,
    k: usize,
    weights: &'a [F],
    claimed_left: F,
    claimed_right: F,
}

impl<'a, F: PrimeField> GKRFinalOracle<'a, F> {
    pub fn new(circuit: &'a Circuit, k: usize, weights: &'a [F], claimed_left: F, claimed_right: F) -> Self {
        Self { circuit, k, weights, claimed_left, claimed_right }
    }
}

impl<F: PrimeField> OracleEvaluation<F> for GKRFinalOracle<'_, F> {
    fn final_eval(&self, r: &[F]) -> F {
        let (b, c) = r.split_at(r.len() / 2);
        let (add_eval, mul_eval) = self.circuit.predicate_eval(self.k, self.weights, b, c);

        add_eval * (self.claimed_left + self.claimed_right)
            + mul_eval * self.claimed_left * self.claimed_right
    }
}

/// Checks `proof` against `circuit` and the caller's `claimed_output`.
///
/// A proof that does not convince yields `Ok(Verdict::Reject(..))`;
/// `Err` is kept for calls that are malformed on the caller's side.
#[tracing::instrument(skip_all, name = "GKR::verify", fields(depth = circuit.depth()))]
pub fn verify<F: PrimeField>(
    circuit: &Circuit,
    claimed_output: &[F],
    proof: &GKRProof<F>,
    sum_check_protocol: &SumCheckProtocol,
    transcript: &mut Transcript<F>,
) -> GkrResult<Verdict> {
    circuit.validate()?;

    let depth = circuit.depth();
    if claimed_output.len() != circuit.output_size() {
        return Err(GkrError::ShapeMismatch {
            expected: circuit.output_size(),
            actual: claimed_output.len(),
        });
    }
    if proof.inputs.len() != circuit.input_size() {
        return Ok(Verdict::reject(0, 0, RejectReason::MalformedProof));
    }
    if proof.layers.len() != depth {
        return Ok(Verdict::reject(depth, 0, RejectReason::MalformedProof));
    }

    absorb_statement(transcript, circuit, &proof.inputs, claimed_output)?;

    let r0 = transcript.challenge_vector(OUTPUT_POINT_LABEL, circuit.num_vars(depth));
    let mut mi = MultilinearPoly::from_values(claimed_output).evaluate_at(&r0);
    let mut weights = eq_evals(&r0);
    let mut last_point = vec![];

    for (GKRProofLayer { sumcheck_proof, claimed_left, claimed_right }, k) in
        proof.layers.iter().zip((1..=depth).rev())
    {
        let final_oracle = GKRFinalOracle::new(circuit, k, &weights, *claimed_left, *claimed_right);

        let point = match sum_check_protocol.verify(
            &final_oracle,
            sumcheck_proof,
            mi,
            circuit.rounds(k),
            transcript,
        )? {
            SumCheckOutcome::Accepted { point } => point,
            SumCheckOutcome::Rejected { round, reason } => {
                debug!(layer = k, round, ?reason, "layer rejected");
                return Ok(Verdict::reject(k, round, reason));
            }
        };

        let (b, c) = point.split_at(point.len() / 2);
        (weights, mi) = combine_claims(transcript, b, c, *claimed_left, *claimed_right);
        last_point = point;
    }

    let (b, c) = last_point.split_at(last_point.len() / 2);
    let inputs = MultilinearPoly::from_values(&proof.inputs);
    let Some((claimed_left, claimed_right)) = proof.input_claims() else {
        return Ok(Verdict::reject(0, 0, RejectReason::MalformedProof));
    };

    if inputs.evaluate_at(b) != claimed_left || inputs.evaluate_at(c) != claimed_right {
        debug!("input layer evaluation does not match");
        return Ok(Verdict::reject(0, 0, RejectReason::InputEvaluation));
    }

    Ok(Verdict::Accept)
}
