use super::{IPushProvider, PushError};
use crate::{config::PushConfig, services::DeliveryError};
use salon_notifier_domain::PushSubscription;
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushError, WebPushMessage, WebPushMessageBuilder,
};

/// Seconds the push service keeps an undelivered message around
const PUSH_TTL_SECS: u32 = 60 * 60 * 24;

/// Delivers encrypted Web Push messages signed with the configured
/// VAPID key
pub struct WebPushProvider {
    client: IsahcWebPushClient,
    config: Option<PushConfig>,
}

impl WebPushProvider {
    pub fn new(config: Option<PushConfig>) -> anyhow::Result<Self> {
        let client = IsahcWebPushClient::new()
            .map_err(|e| anyhow::anyhow!("Unable to create web push client: {:?}", e))?;
        Ok(Self { client, config })
    }
}

fn build_message(
    config: &PushConfig,
    subscription: &PushSubscription,
    payload: &str,
) -> Result<WebPushMessage, WebPushError> {
    let info = SubscriptionInfo::new(
        subscription.endpoint.clone(),
        subscription.p256dh.clone(),
        subscription.auth.clone(),
    );

    let mut signature =
        VapidSignatureBuilder::from_pem(config.vapid_private_key_pem.as_bytes(), &info)?;
    signature.add_claim("sub", config.subject.as_str());

    let mut builder = WebPushMessageBuilder::new(&info);
    builder.set_ttl(PUSH_TTL_SECS);
    builder.set_payload(ContentEncoding::Aes128Gcm, payload.as_bytes());
    builder.set_vapid_signature(signature.build()?);
    builder.build()
}

impl From<WebPushError> for PushError {
    fn from(e: WebPushError) -> Self {
        let status_code = match &e {
            WebPushError::EndpointNotValid { .. } => Some(410),
            WebPushError::EndpointNotFound { .. } => Some(404),
            _ => None,
        };
        PushError::new(status_code, format!("{:?}", e))
    }
}

#[async_trait::async_trait]
impl IPushProvider for WebPushProvider {
    async fn send(&self, subscription: &PushSubscription, payload: &str) -> Result<(), PushError> {
        let config = self
            .config
            .as_ref()
            .ok_or(DeliveryError::NotConfigured("Push"))?;

        let message = build_message(config, subscription, payload)?;
        self.client.send(message).await?;
        Ok(())
    }
}
