use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;

/// The main sumcheck proof representation.
///
/// Challenges are not stored: the verifier re-derives them from the
/// transcript after absorbing each round polynomial.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize)]
pub struct SumCheckProof<F: PrimeField> {
    /// One entry per round, the round polynomial given by its
    /// evaluations at `0, 1, .., degree`.
    pub round_polys: Vec<Vec<F>>,
}

impl<F: PrimeField> SumCheckProof<F> {
    /// Creates a new sumcheck proof.
    pub fn new(round_polys: Vec<Vec<F>>) -> Self {
        SumCheckProof { round_polys }
    }

    pub fn num_rounds(&self) -> usize {
        self.round_polys.len()
    }
}
