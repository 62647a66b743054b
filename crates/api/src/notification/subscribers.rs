use super::send_notifications::{RunSummary, SendNotificationsUseCase};
use crate::shared::usecase::Subscriber;
use salon_notifier_infra::NotifierContext;
use tracing::info;

pub struct LogRunSummary;

#[async_trait::async_trait(?Send)]
impl Subscriber<SendNotificationsUseCase> for LogRunSummary {
    async fn notify(&self, summary: &RunSummary, _ctx: &NotifierContext) {
        info!(
            reminders_24h = summary.reminders_24h,
            reminders_12h = summary.reminders_12h,
            reminders_2h = summary.reminders_2h,
            reminders_30m = summary.reminders_30m,
            thank_you = summary.thank_you,
            sms_sent = summary.sms_sent,
            emails_sent = summary.emails_sent,
            push_delivered = summary.push_delivered,
            subscriptions_removed = summary.subscriptions_removed,
            skipped = summary.skipped,
            "Processed {} notifications and sent {} SMS",
            summary.sent_count(),
            summary.sms_sent
        );
    }
}
