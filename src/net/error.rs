//! Errors produced by the API client.

use crate::session::StorageError;

/// Failure classes surfaced to views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No session token; the request was never sent.
    Unauthenticated,
    /// Transport failure, non-2xx status, or an undecodable body.
    NetworkOrServer,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No session token was available for a protected request.
    #[error("not authenticated")]
    Unauthenticated,

    /// The configured backend URL does not form a valid request URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// The HTTP request could not be built or sent.
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status. 401 is not special-cased.
    #[error("server returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The session token could not be persisted.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::InvalidUrl(_)
            | Self::Transport(_)
            | Self::Status { .. }
            | Self::Decode(_)
            | Self::Storage(_) => ErrorKind::NetworkOrServer,
        }
    }

    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        self.kind() == ErrorKind::Unauthenticated
    }
}
