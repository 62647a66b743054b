use super::{EmailMessage, IEmailProvider};
use crate::{config::EmailConfig, services::DeliveryError};
use reqwest::Client;
use serde::Serialize;

/// Sends emails through a transactional email HTTP API that accepts
/// `{ from, to, subject, html }` with a bearer api key.
pub struct HttpEmailProvider {
    client: Client,
    config: Option<EmailConfig>,
}

impl HttpEmailProvider {
    pub fn new(config: Option<EmailConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
}

#[async_trait::async_trait]
impl IEmailProvider for HttpEmailProvider {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        let config = self
            .config
            .as_ref()
            .ok_or(DeliveryError::NotConfigured("Email"))?;

        let body = SendEmailRequest {
            from: &config.from,
            to: vec![&message.to],
            subject: &message.subject,
            html: &message.body,
        };
        let res = self
            .client
            .post(&config.api_url)
            .bearer_auth(&config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                message: res.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}
