use ark_ff::PrimeField;
use crate::error::GkrResult;
use crate::gkr::circuit::Circuit;
use crate::poly_utils::eq_evals;
use crate::transcript::Transcript;

/// Degree bound of the layer polynomial
/// `add(b, c) * (V(b) + V(c)) + mul(b, c) * V(b) * V(c)`:
/// at most two of its linear factors depend on any one variable.
pub const LAYER_SUMCHECK_DEGREE: usize = 2;

pub(crate) const OUTPUT_POINT_LABEL: &[u8] = b"gkr_output_point";
pub(crate) const LAYER_CLAIMS_LABEL: &[u8] = b"gkr_layer_claims";
pub(crate) const ALPHA_LABEL: &[u8] = b"gkr_alpha";
pub(crate) const BETA_LABEL: &[u8] = b"gkr_beta";

/// Binds the transcript to the circuit, the public inputs and the claimed outputs.
pub(crate) fn absorb_statement<F: PrimeField>(
    transcript: &mut Transcript<F>,
    circuit: &Circuit,
    inputs: &[F],
    outputs: &[F],
) -> GkrResult<()> {
    transcript.append_message(b"gkr_circuit");
    transcript.append_bytes(&circuit.to_bytes()?);
    transcript.append_scalars(b"gkr_inputs", inputs);
    transcript.append_scalars(b"gkr_outputs", outputs);

    Ok(())
}

/// Absorbs the two claims on the layer below and folds them with fresh
/// `alpha`, `beta` into the weights `alpha * eq(b, .) + beta * eq(c, .)`
/// and the combined claim `alpha * v_b + beta * v_c`.
pub(crate) fn combine_claims<F: PrimeField>(
    transcript: &mut Transcript<F>,
    b: &[F],
    c: &[F],
    claimed_left: F,
    claimed_right: F,
) -> (Vec<F>, F) {
    transcript.append_scalars(LAYER_CLAIMS_LABEL, &[claimed_left, claimed_right]);
    let alpha = transcript.challenge_scalar(ALPHA_LABEL);
    let beta = transcript.challenge_scalar(BETA_LABEL);

    let weights = eq_evals(b)
        .into_iter()
        .zip(eq_evals(c))
        .map(|(eq_b, eq_c)| alpha * eq_b + beta * eq_c)
        .collect();

    (weights, alpha * claimed_left + beta * claimed_right)
}
