use crate::dtos::NotificationDetailsDTO;
use serde::{Deserialize, Serialize};

pub mod send_notifications {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct QueryParams {
        pub secret: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub details: NotificationDetailsDTO,
    }

    impl APIResponse {
        pub fn new(details: NotificationDetailsDTO) -> Self {
            Self {
                success: true,
                message: format!(
                    "Successfully processed {} notifications and sent {} SMS",
                    details.notifications(),
                    details.sms_sent
                ),
                details,
            }
        }
    }

}
