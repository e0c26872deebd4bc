use thiserror::Error;

use super::controller::SubmissionState;
use super::fields::Field;

/// Why a submit attempt did not end in `Success`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("field `{field}` failed validation")]
    Invalid { field: Field },
    #[error("cannot accept a submission while {0}")]
    NotAccepting(SubmissionState),
    #[error("network error: {0}")]
    Network(String),
    #[error("endpoint returned HTTP {status}")]
    Http { status: u16, message: Option<String> },
    #[error("endpoint rejected the submission: {0}")]
    Rejected(String),
    #[error("could not decode endpoint response: {0}")]
    Decode(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("could not serialize draft: {0}")]
    Serialize(String),
    #[error("stored draft is corrupt: {0}")]
    Corrupt(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("{0} is not loaded")]
    Unavailable(&'static str),
    #[error("tracking call failed: {0}")]
    Failed(String),
}
