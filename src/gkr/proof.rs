use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use crate::sumcheck::SumCheckProof;

/// Reduction of one layer's claim to two claims on the layer below.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize)]
pub struct GKRProofLayer<F: PrimeField> {
    pub sumcheck_proof: SumCheckProof<F>,
    /// MLE of the layer below at the first half of the sumcheck point.
    pub claimed_left: F,
    /// MLE of the layer below at the second half of the sumcheck point.
    pub claimed_right: F,
}

#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize)]
pub struct GKRProof<F: PrimeField> {
    /// Public input vector.
    pub inputs: Vec<F>,
    /// Output vector the prover computed.
    pub outputs: Vec<F>,
    /// Output layer first, layer 1 last.
    pub layers: Vec<GKRProofLayer<F>>,
}

impl<F: PrimeField> GKRProof<F> {
    /// Claimed input-layer evaluations the verifier checks last.
    pub fn input_claims(&self) -> Option<(F, F)> {
        self.layers
            .last()
            .map(|layer| (layer.claimed_left, layer.claimed_right))
    }

    /// Sumcheck rounds per layer, output layer first.
    pub fn rounds_per_layer(&self) -> Vec<usize> {
        self.layers
            .iter()
            .map(|layer| layer.sumcheck_proof.num_rounds())
            .collect()
    }

    /// Field elements carried by the reduction, inputs and outputs excluded.
    pub fn reduction_size(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| {
                layer.sumcheck_proof.round_polys.iter().map(Vec::len).sum::<usize>() + 2
            })
            .sum()
    }
}
