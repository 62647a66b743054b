use super::{ISmsProvider, SmsReceipt};
use crate::services::DeliveryError;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct SentSms {
    pub to: String,
    pub body: String,
}

/// Records SMS instead of sending them
pub struct InMemorySmsProvider {
    configured: bool,
    sent: Mutex<Vec<SentSms>>,
}

impl InMemorySmsProvider {
    pub fn new() -> Self {
        Self {
            configured: true,
            sent: Mutex::new(vec![]),
        }
    }

    /// Behaves like a provider without credentials
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            sent: Mutex::new(vec![]),
        }
    }

    pub fn sent(&self) -> Vec<SentSms> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ISmsProvider for InMemorySmsProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, DeliveryError> {
        if !self.configured {
            return Err(DeliveryError::NotConfigured("SMS"));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentSms {
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(SmsReceipt {
            provider_message_id: format!("SM{}", sent.len()),
        })
    }
}
