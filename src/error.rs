use std::fmt;
use thiserror::Error;

/// Which per-participant input a join key was missing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSource {
    Snapshot,
    Events,
    GameInfo,
}

impl fmt::Display for JoinSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinSource::Snapshot => write!(f, "snapshot"),
            JoinSource::Events => write!(f, "event counters"),
            JoinSource::GameInfo => write!(f, "participant info"),
        }
    }
}

/// Failures of the feature pipeline. None of them are recoverable for the
/// match being processed.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Frame index {index} out of range: timeline has {frames} frames")]
    OutOfRange { index: usize, frames: usize },

    #[error("Malformed match data: {0}")]
    DataIntegrity(String),

    #[error("Participant {participant_id} missing from {source_name}")]
    JoinMismatch {
        participant_id: u8,
        source_name: JoinSource,
    },

    #[error("Role resolution failed: {0}")]
    RoleResolution(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
