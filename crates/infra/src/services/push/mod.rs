mod inmemory;
mod webpush;

pub use webpush::WebPushProvider;
pub use inmemory::{InMemoryPushProvider, SentPush};

use super::DeliveryError;
use salon_notifier_domain::PushSubscription;
use thiserror::Error;

const HTTP_GONE: u16 = 410;

/// Failure reported by the push service for one subscription
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Push delivery failed with status {status_code:?}. Error message: `{message}`")]
pub struct PushError {
    pub status_code: Option<u16>,
    pub message: String,
}

impl PushError {
    pub fn new(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// The push service will never accept messages for this subscription again
    pub fn is_gone(&self) -> bool {
        self.status_code == Some(HTTP_GONE)
    }
}

impl From<DeliveryError> for PushError {
    fn from(e: DeliveryError) -> Self {
        let status_code = match &e {
            DeliveryError::Rejected { status, .. } => Some(*status),
            _ => None,
        };
        Self::new(status_code, e.to_string())
    }
}

#[async_trait::async_trait]
pub trait IPushProvider: Send + Sync {
    /// Delivers a JSON `payload` to a single subscription
    async fn send(&self, subscription: &PushSubscription, payload: &str) -> Result<(), PushError>;
}
