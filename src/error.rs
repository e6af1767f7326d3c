use ark_serialize::SerializationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GkrError {
    #[error("Expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("Invalid wiring at layer {layer}, gate {gate}: {reason}")]
    InvalidWiring {
        layer: usize,
        gate: usize,
        reason: String,
    },
    #[error("Division by zero while {0}")]
    DivisionByZero(&'static str),
    #[error("Prover and verifier transcripts diverged at step {0}")]
    TranscriptDesync(usize),
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<SerializationError> for GkrError {
    fn from(err: SerializationError) -> Self {
        GkrError::Serialization(err.to_string())
    }
}

pub type GkrResult<T> = Result<T, GkrError>;
