mod inmemory;
mod twilio;

pub use inmemory::{InMemorySmsProvider, SentSms};
pub use twilio::TwilioSmsProvider;

use super::DeliveryError;

/// Acknowledgement of an accepted SMS
#[derive(Debug, Clone, PartialEq)]
pub struct SmsReceipt {
    pub provider_message_id: String,
}

#[async_trait::async_trait]
pub trait ISmsProvider: Send + Sync {
    /// Whether credentials for the provider are present at all
    fn is_configured(&self) -> bool;
    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, DeliveryError>;
}
