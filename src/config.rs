use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{GkrError, GkrResult};

pub const DEFAULT_TRANSCRIPT_LABEL: &str = "zkml-gkr-v1";

/// Knobs shared by prover and verifier. Both sides must agree on
/// `transcript_label` or every challenge differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GkrConfig {
    /// Domain separator for the initial transcript state.
    pub transcript_label: String,
    /// Minimum number of table pairs a rayon task works on.
    pub parallel_threshold: usize,
}

impl Default for GkrConfig {
    fn default() -> Self {
        Self {
            transcript_label: DEFAULT_TRANSCRIPT_LABEL.to_string(),
            parallel_threshold: 1 << 9,
        }
    }
}

impl GkrConfig {
    pub fn with_label(label: &str) -> Self {
        Self {
            transcript_label: label.to_string(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> GkrResult<Self> {
        serde_json::from_str(json).map_err(|e| GkrError::Serialization(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> GkrResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| GkrError::Serialization(format!("{}: {e}", path.display())))?;

        Self::from_json(&json)
    }
}
