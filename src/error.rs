//! Crate-level error types.

use std::fmt;

/// Errors produced by the colony-anim crate.
#[derive(Debug)]
pub enum ColonyError {
    /// A snapshot references identifiers the world model itself requires
    /// but that are missing or inconsistent.
    MalformedSnapshot {
        /// Index of the offending step, when known.
        step: Option<usize>,
        /// Human-readable description of the inconsistency.
        reason: String,
    },
    /// JSON replay or snapshot decoding failure.
    Json(serde_json::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// A step index past the end of the replay was requested.
    StepOutOfRange {
        /// Requested step.
        step: usize,
        /// Number of steps in the replay.
        len: usize,
    },
}

impl ColonyError {
    /// Malformed snapshot error without a step index.
    #[must_use]
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            step: None,
            reason: reason.into(),
        }
    }

    /// Attach a step index to a malformed-snapshot error.
    #[must_use]
    pub fn at_step(self, index: usize) -> Self {
        match self {
            Self::MalformedSnapshot { reason, .. } => Self::MalformedSnapshot {
                step: Some(index),
                reason,
            },
            other => other,
        }
    }
}

impl fmt::Display for ColonyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSnapshot {
                step: Some(step),
                reason,
            } => write!(f, "malformed snapshot at step {step}: {reason}"),
            Self::MalformedSnapshot { step: None, reason } => {
                write!(f, "malformed snapshot: {reason}")
            }
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::StepOutOfRange { step, len } => {
                write!(f, "step {step} out of range (replay has {len} steps)")
            }
        }
    }
}

impl std::error::Error for ColonyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ColonyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for ColonyError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
