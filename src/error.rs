use crate::record::RecordId;
use thiserror::Error;

/// Transport-level failures from the remote gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

/// Required-field check failures on a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Failures surfaced by [`crate::manager::UserManager`] operations.
///
/// Only `FetchFailed` comes from the network; its message is the same flat
/// string written to the error channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    #[error("{0}")]
    FetchFailed(String),
    #[error(transparent)]
    Invalid(#[from] DraftError),
    #[error("no user with id {0}")]
    UnknownRecord(RecordId),
    #[error("user {0} is not being edited")]
    NotEditing(RecordId),
    #[error("user manager was torn down before the response arrived")]
    TornDown,
}
