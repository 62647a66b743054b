use super::{EmailMessage, IEmailProvider};
use crate::services::DeliveryError;
use std::{collections::HashSet, sync::Mutex};

/// Records emails instead of sending them
pub struct InMemoryEmailProvider {
    sent: Mutex<Vec<EmailMessage>>,
    failing_recipients: Mutex<HashSet<String>>,
}

impl InMemoryEmailProvider {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing_recipients: Mutex::new(HashSet::new()),
        }
    }

    /// Emails to `to` will be rejected from now on
    pub fn fail_for(&self, to: &str) {
        self.failing_recipients.lock().unwrap().insert(to.to_string());
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IEmailProvider for InMemoryEmailProvider {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        if self.failing_recipients.lock().unwrap().contains(&message.to) {
            return Err(DeliveryError::Rejected {
                status: 422,
                message: format!("Invalid recipient: {}", message.to),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
