//! Error types for the `aws` CLI inventory.

use thiserror::Error;

use crate::command::CommandError;

/// Error codes the EC2 API uses to signal request throttling.
const THROTTLING_CODES: &[&str] = &[
    "RequestLimitExceeded",
    "Throttling",
    "ThrottlingException",
];

/// Errors raised while talking to EC2 through the `aws` CLI.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ProviderError {
    /// The API rejected the call with a classified error code.
    #[error("{operation} failed with {code}: {message}")]
    Api {
        /// CLI operation that failed (for example `describe-volumes`).
        operation: String,
        /// Error code reported by EC2 (for example `VolumeInUse`).
        code: String,
        /// Provider supplied detail.
        message: String,
    },
    /// Raised when `aws` exits non-zero without a recognisable API error.
    #[error("{program} exited with status {status_text}: {stderr}")]
    CommandFailure {
        /// Program that failed (typically `aws`).
        program: String,
        /// Exit status reported by the OS.
        status: Option<i32>,
        /// Human readable representation of the exit status.
        status_text: String,
        /// Stderr captured from the command.
        stderr: String,
    },
    /// Raised when JSON output from the CLI cannot be parsed.
    #[error("failed to parse {resource} output: {message}")]
    Parse {
        /// Resource type being parsed (for example `volumes`).
        resource: String,
        /// Parser error message.
        message: String,
    },
    /// Raised when the CLI cannot be started at all.
    #[error(transparent)]
    Runner(#[from] CommandError),
}

impl ProviderError {
    /// Returns the EC2 error code when the failure was classified.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// Returns `true` when EC2 throttled the request.
    #[must_use]
    pub fn is_throttling(&self) -> bool {
        self.code()
            .is_some_and(|code| THROTTLING_CODES.contains(&code))
    }
}

/// Extracts `(code, message)` from `aws` CLI stderr of the form
/// `An error occurred (Code) when calling the Op operation: message`.
pub(super) fn parse_api_error(stderr: &str) -> Option<(String, String)> {
    let (_, rest) = stderr.split_once("An error occurred (")?;
    let (code, tail) = rest.split_once(')')?;
    if code.trim().is_empty() {
        return None;
    }
    let message = tail.split_once(": ").map_or("", |(_, detail)| detail);
    Some((code.trim().to_owned(), message.trim().to_owned()))
}
