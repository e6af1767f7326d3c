mod circuit;
mod common;
mod proof;
mod protocol;
mod prover;
mod verifier;
#[cfg(test)]
pub(crate) mod test_utils;

pub use circuit::{Circuit, CircuitBuilder, CircuitDescription, Gate, GateType, Layer, Witness};
pub use common::LAYER_SUMCHECK_DEGREE;
pub use proof::{GKRProof, GKRProofLayer};
pub use protocol::GKRProtocol;
pub use prover::{prove, LayerRoundPoly};
pub use verifier::{verify, GKRFinalOracle};
