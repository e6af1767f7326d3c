use ark_ff::PrimeField;
use crate::sumcheck::proof::SumCheckProof;
use crate::sumcheck::sumcheck_poly::SumCheckPoly;
use crate::transcript::Transcript;

pub(crate) const ROUND_LABEL: &[u8] = b"sumcheck_round";
pub(crate) const CHALLENGE_LABEL: &[u8] = b"sumcheck_challenge";

/// Runs every round on `poly`, leaving it fully bound.
/// Returns the proof and the challenges in round order.
#[tracing::instrument(skip_all, name = "SumCheck::prove", fields(num_vars = poly.num_vars()))]
pub fn prove<F: PrimeField, S: SumCheckPoly<F>>(
    poly: &mut S,
    transcript: &mut Transcript<F>,
) -> (SumCheckProof<F>, Vec<F>) {
    let num_vars = poly.num_vars();

    let mut round_polys = Vec::with_capacity(num_vars);
    let mut challenges = Vec::with_capacity(num_vars);

    for _ in 0..num_vars {
        let evals = poly.round_evaluations();
        debug_assert_eq!(evals.len(), poly.degree() + 1);

        transcript.append_scalars(ROUND_LABEL, &evals);
        let r = transcript.challenge_scalar(CHALLENGE_LABEL);
        poly.fix_first_variable(r);

        round_polys.push(evals);
        challenges.push(r);
    }

    (SumCheckProof::new(round_polys), challenges)
}
