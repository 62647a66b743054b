use std::{future::Future, time::Duration};
use thiserror::Error;

/// Reasons a single message could not be handed over to a provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliveryError {
    #[error("{0} provider is not configured")]
    NotConfigured(&'static str),
    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),
    #[error("Provider rejected the message with status {status}. Error message: `{message}`")]
    Rejected { status: u16, message: String },
    #[error("Provider could not be reached. Error message: `{0}`")]
    Transport(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// Bounds a provider call by `duration`. An elapsed call is reported as
/// `DeliveryError::Timeout`.
pub async fn with_timeout<T, E, F>(duration: Duration, call: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DeliveryError>,
{
    match tokio::time::timeout(duration, call).await {
        Ok(res) => res,
        Err(_) => Err(DeliveryError::Timeout(duration).into()),
    }
}
