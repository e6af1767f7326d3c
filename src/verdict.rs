use std::fmt;

/// Why a proof was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// `s_i(0) + s_i(1)` disagrees with the running claim.
    SumcheckMismatch,
    /// A round polynomial carries the wrong number of evaluations.
    DegreeBound,
    /// The terminal oracle evaluation disagrees with `s_n(r_n)`.
    FinalEvaluation,
    /// The last claims disagree with the public input vector.
    InputEvaluation,
    /// Layer or round counts do not fit the circuit.
    MalformedProof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rejection {
    pub layer: usize,
    /// 1-based sumcheck round, 0 for checks outside any sumcheck.
    pub round: usize,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    pub fn reject(layer: usize, round: usize, reason: RejectReason) -> Self {
        Verdict::Reject(Rejection { layer, round, reason })
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accept => write!(f, "accept"),
            Verdict::Reject(Rejection { layer, round, reason }) => {
                write!(f, "reject at layer {layer}, round {round}: {reason:?}")
            }
        }
    }
}
