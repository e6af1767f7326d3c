#![allow(non_snake_case)]

pub mod codec;
pub mod config;
pub mod error;
pub mod field;
pub mod gkr;
pub mod mle;
pub mod poly_utils;
pub mod sumcheck;
pub mod transcript;
pub mod verdict;

use ark_ff::PrimeField;

pub use config::GkrConfig;
pub use error::{GkrError, GkrResult};
pub use field::{DefaultField, Goldilocks, F97};
pub use gkr::{Circuit, CircuitBuilder, GKRProof, GKRProofLayer, GKRProtocol, Gate, GateType, Layer};
pub use transcript::{Transcript, TranscriptTrace};
pub use verdict::{RejectReason, Rejection, Verdict};

/// Proves `circuit(inputs)` with the default configuration.
pub fn prove<F: PrimeField>(circuit: &Circuit, inputs: &[F]) -> GkrResult<GKRProof<F>> {
    GKRProtocol::default().prove(circuit, inputs)
}

/// Verifies `proof` for `claimed_output` with the default configuration.
pub fn verify<F: PrimeField>(
    circuit: &Circuit,
    claimed_output: &[F],
    proof: &GKRProof<F>,
) -> GkrResult<Verdict> {
    GKRProtocol::default().verify(circuit, claimed_output, proof)
}
