mod http;
mod inmemory;

pub use http::HttpEmailProvider;
pub use inmemory::InMemoryEmailProvider;

use super::DeliveryError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    /// HTML body
    pub body: String,
}

#[async_trait::async_trait]
pub trait IEmailProvider: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}
