use super::{ISmsProvider, SmsReceipt};
use crate::{config::SmsConfig, services::DeliveryError};
use reqwest::Client;
use serde::Deserialize;

const TWILIO_API_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

pub struct TwilioSmsProvider {
    client: Client,
    config: Option<SmsConfig>,
}

impl TwilioSmsProvider {
    pub fn new(config: Option<SmsConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    message: String,
}

#[async_trait::async_trait]
impl ISmsProvider for TwilioSmsProvider {
    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, DeliveryError> {
        let config = self
            .config
            .as_ref()
            .ok_or(DeliveryError::NotConfigured("SMS"))?;

        let res = self
            .client
            .post(&format!(
                "{}/Accounts/{}/Messages.json",
                TWILIO_API_BASE_URL, config.account_sid
            ))
            .basic_auth(&config.account_sid, Some(&config.auth_token))
            .form(&[("To", to), ("From", config.from_number.as_str()), ("Body", body)])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = match res.json::<TwilioErrorResponse>().await {
                Ok(err) => err.message,
                Err(_) => status.to_string(),
            };
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let message = res.json::<TwilioMessageResponse>().await?;
        Ok(SmsReceipt {
            provider_message_id: message.sid,
        })
    }
}
