//! Common error types used across the workspace.
//!
//! Each layer reports typed errors and converts into [`TiAdminError`]
//! via `#[from]`.

/// Top-level error for dashboard operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TiAdminError {
    #[error("Validation error")]
    Validation(#[from] ValidationError),

    #[error("API error")]
    Api(#[from] ApiError),
}

/// The new-process form was submitted without a required selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid selection: no service chosen")]
    MissingService,

    #[error("invalid selection: no host chosen")]
    MissingHost,
}

/// A call to the REST backend did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (network down, CORS, aborted, …).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The body could not be decoded into the expected type.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, when the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// JSON error body the backend sends alongside non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelError {
    pub err_code: i32,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub reason: String,
}
