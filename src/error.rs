//! Unified error types for the snapshot service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Unified error type for the snapshot service.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Document store query error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Fetched records do not fit the door grid.
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

/// Document store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The configured endpoint is not a usable URL.
    #[error("invalid store endpoint {url:?}: {reason}")]
    InvalidEndpoint {
        /// The endpoint as configured.
        url: String,
        /// Reason for rejection.
        reason: String,
    },

    /// The master key is not valid base64.
    #[error("invalid master key: {0}")]
    InvalidKey(String),

    /// HTTP request failed (connect, timeout, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("query rejected with HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// Response body could not be decoded into elevator records.
    #[error("failed to decode query response: {0}")]
    Decode(String),
}

/// A stored enum code is outside its known range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    /// Which enumeration.
    pub kind: &'static str,
    /// The offending value.
    pub code: i16,
}

/// Door grid expansion errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Fewer elevator records than shafts in the building.
    #[error("expected at least {expected} elevator records, found {found}")]
    NotEnoughElevators {
        /// Shafts the grid is built for.
        expected: usize,
        /// Records actually fetched.
        found: usize,
    },
}

impl SnapshotError {
    /// Short label used for failure metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Grid(_) => "grid",
        }
    }

    /// HTTP status reported to the caller.
    ///
    /// Both variants mean the store did not yield a usable snapshot.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(_) | Self::Grid(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for SnapshotError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, SnapshotError>;
