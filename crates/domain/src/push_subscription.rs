use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A Web Push endpoint a `User` opted in to from one of their browsers
/// or devices.
///
/// Subscriptions are removed automatically once the push service reports
/// the endpoint as gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    pub id: ID,
    pub user_id: ID,
    pub endpoint: String,
    /// Public key of the user agent, base64 url encoded
    pub p256dh: String,
    /// Authentication secret, base64 url encoded
    pub auth: String,
}

impl PushSubscription {
    pub fn new(
        user_id: ID,
        endpoint: impl Into<String>,
        p256dh: impl Into<String>,
        auth: impl Into<String>,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            endpoint: endpoint.into(),
            p256dh: p256dh.into(),
            auth: auth.into(),
        }
    }
}

impl Entity for PushSubscription {
    fn id(&self) -> &ID {
        &self.id
    }
}
