use super::{IPushProvider, PushError};
use salon_notifier_domain::PushSubscription;
use std::{collections::HashMap, sync::Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct SentPush {
    pub endpoint: String,
    pub payload: serde_json::Value,
}

/// Records push messages instead of sending them. Endpoints can be made to
/// fail with a given status code.
pub struct InMemoryPushProvider {
    sent: Mutex<Vec<SentPush>>,
    attempts: Mutex<Vec<String>>,
    failing_endpoints: Mutex<HashMap<String, u16>>,
}

impl InMemoryPushProvider {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            attempts: Mutex::new(vec![]),
            failing_endpoints: Mutex::new(HashMap::new()),
        }
    }

    pub fn fail_with(&self, endpoint: &str, status_code: u16) {
        self.failing_endpoints
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), status_code);
    }

    /// Successfully delivered messages
    pub fn sent(&self) -> Vec<SentPush> {
        self.sent.lock().unwrap().clone()
    }

    /// Endpoints of every delivery attempt, failed ones included
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IPushProvider for InMemoryPushProvider {
    async fn send(&self, subscription: &PushSubscription, payload: &str) -> Result<(), PushError> {
        self.attempts
            .lock()
            .unwrap()
            .push(subscription.endpoint.clone());

        let failure = self
            .failing_endpoints
            .lock()
            .unwrap()
            .get(&subscription.endpoint)
            .copied();
        if let Some(status_code) = failure {
            return Err(PushError::new(Some(status_code), "Push service refused"));
        }

        let payload = serde_json::from_str(payload)
            .map_err(|e| PushError::new(None, format!("Payload is not JSON: {}", e)))?;
        self.sent.lock().unwrap().push(SentPush {
            endpoint: subscription.endpoint.clone(),
            payload,
        });
        Ok(())
    }
}
