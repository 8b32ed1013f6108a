//! Monitor error types.

use thiserror::Error;

/// Errors from one monitor cycle.
///
/// Both variants wrap errors produced across the callback boundary;
/// the classifier itself is total and contributes no failure mode.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("failed to fetch load snapshot: {0}")]
    Fetch(#[source] anyhow::Error),

    #[error("failed to publish demand report: {0}")]
    Publish(#[source] anyhow::Error),
}

pub type MonitorResult<T> = Result<T, MonitorError>;
