use crate::{APIResponse, BaseClient, TriggerAuth};
use reqwest::StatusCode;
use salon_notifier_api_structs::send_notifications;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Starts a notifications run the way a manual caller does
    pub async fn trigger(
        &self,
        auth: &TriggerAuth,
    ) -> APIResponse<send_notifications::APIResponse> {
        self.base
            .post(
                serde_json::json!({}),
                "cron/notifications".into(),
                auth,
                StatusCode::OK,
            )
            .await
    }

    /// Starts a notifications run the way a cron scheduler does
    pub async fn trigger_scheduled(
        &self,
        auth: &TriggerAuth,
    ) -> APIResponse<send_notifications::APIResponse> {
        self.base
            .get("cron/notifications".into(), auth, StatusCode::OK)
            .await
    }
}
