use std::path::PathBuf;

use thiserror::Error;

/// Failures a client backend raises outside the normal envelope contract.
///
/// A reported operation failure travels inside `Outcome::Failure`; these
/// variants cover everything else — broken session artifacts, rejected
/// logins, and unexpected backend errors the gateway maps to HTTP 500.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("session artifact {path}: {source}")]
    Session {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session artifact {path} is malformed: {source}")]
    MalformedSession {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("login rejected for {username}: {reason}")]
    Auth { username: String, reason: String },

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("client unavailable: {0}")]
    Unavailable(String),
}
