mod protocol;
mod prover;
mod verifier;
mod sumcheck_poly;
mod multilin_sumcheck_poly;
mod proof;

pub use proof::*;
pub use sumcheck_poly::*;
pub use protocol::*;
pub use verifier::SumCheckOutcome;
pub use multilin_sumcheck_poly::{DenseMultilinFinalEvaluationOracle, DenseMultilinSumcheckPoly};
