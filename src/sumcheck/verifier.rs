use ark_ff::PrimeField;
use crate::error::GkrResult;
use crate::poly_utils::evaluate_univariate_on_evals;
use crate::sumcheck::proof::SumCheckProof;
use crate::sumcheck::prover::{CHALLENGE_LABEL, ROUND_LABEL};
use crate::sumcheck::sumcheck_poly::OracleEvaluation;
use crate::transcript::Transcript;
use crate::verdict::RejectReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SumCheckOutcome<F> {
    /// Every round and the terminal check passed at `point`.
    Accepted { point: Vec<F> },
    Rejected { round: usize, reason: RejectReason },
}

pub fn verify<F: PrimeField, O: OracleEvaluation<F>>(
    oracle: &O,
    proof: &SumCheckProof<F>,
    H: F,
    num_vars: usize,
    max_degree: usize,
    transcript: &mut Transcript<F>,
) -> GkrResult<SumCheckOutcome<F>> {
    if proof.num_rounds() != num_vars {
        return Ok(SumCheckOutcome::Rejected {
            round: proof.num_rounds().min(num_vars) + 1,
            reason: RejectReason::MalformedProof,
        });
    }

    let mut claim = H;
    let mut point = Vec::with_capacity(num_vars);

    for (i, evals) in proof.round_polys.iter().enumerate() {
        let round = i + 1;

        if evals.len() != max_degree + 1 {
            return Ok(SumCheckOutcome::Rejected { round, reason: RejectReason::DegreeBound });
        }
        if evals[0] + evals[1] != claim {
            tracing::debug!(round, "round sum does not match the running claim");
            return Ok(SumCheckOutcome::Rejected { round, reason: RejectReason::SumcheckMismatch });
        }

        transcript.append_scalars(ROUND_LABEL, evals);
        let r = transcript.challenge_scalar(CHALLENGE_LABEL);

        claim = evaluate_univariate_on_evals(evals, r)?;
        point.push(r);
    }

    if oracle.final_eval(&point) != claim {
        tracing::debug!(num_vars, "terminal oracle evaluation does not match");
        return Ok(SumCheckOutcome::Rejected {
            round: num_vars,
            reason: RejectReason::FinalEvaluation,
        });
    }

    Ok(SumCheckOutcome::Accepted { point })
}
