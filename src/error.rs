use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// The pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Fetch,
    Unwrap,
    Parse,
    Normalize,
    Emit,
}

#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum IngestError {
    #[error("failed to fetch {url}: {reason}")]
    FetchError { url: String, reason: String },

    #[error("unexpected data format: {0}")]
    FormatError(String),

    #[error("failed to parse JSONC payload: {0}")]
    ParseError(String),

    #[error("schema error in {context}: {detail}")]
    SchemaError { context: String, detail: String },

    #[error("failed to write {path}: {reason}")]
    EmitError { path: String, reason: String },
}

impl IngestError {
    pub(crate) fn schema(context: impl Into<String>, detail: impl Into<String>) -> Self {
        IngestError::SchemaError {
            context: context.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn emit(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        IngestError::EmitError {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Which stage of the pipeline produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            IngestError::FetchError { .. } => Stage::Fetch,
            IngestError::FormatError(_) => Stage::Unwrap,
            IngestError::ParseError(_) => Stage::Parse,
            IngestError::SchemaError { .. } => Stage::Normalize,
            IngestError::EmitError { .. } => Stage::Emit,
        }
    }
}
