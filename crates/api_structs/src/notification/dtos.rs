use serde::{Deserialize, Serialize};

/// Per window counters of a notifications run
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDetailsDTO {
    pub reminders_24h: usize,
    pub reminders_12h: usize,
    pub reminders_2h: usize,
    pub reminders_30m: usize,
    pub thank_you: usize,
    pub sms_sent: usize,
}

impl NotificationDetailsDTO {
    /// Notifications claimed across all windows
    pub fn notifications(&self) -> usize {
        self.reminders_24h
            + self.reminders_12h
            + self.reminders_2h
            + self.reminders_30m
            + self.thank_you
    }
}
