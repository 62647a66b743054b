mod base;
mod notification;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse, TriggerAuth};
use notification::NotificationClient;
pub use salon_notifier_api_structs::dtos::*;
pub use salon_notifier_api_structs::send_notifications::APIResponse as NotificationRunResponse;
use status::StatusClient;
use std::sync::Arc;

/// Salon Notifier Server SDK
///
/// The SDK contains methods for interacting with the Salon Notifier server
/// API.
#[derive(Clone)]
pub struct NotifierSDK {
    pub notification: NotificationClient,
    pub status: StatusClient,
}

impl NotifierSDK {
    pub fn new<T: Into<String>>(address: T) -> Self {
        let base = Arc::new(BaseClient::new(address.into()));
        let notification = NotificationClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            notification,
            status,
        }
    }
}
