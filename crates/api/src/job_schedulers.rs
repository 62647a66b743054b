use crate::{
    notification::send_notifications::{RunTrigger, SendNotificationsUseCase},
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use salon_notifier_infra::NotifierContext;
use std::time::Duration;
use tracing::info;

/// Time left until the next whole minute after `now_ts` (millis). A
/// timestamp exactly on a minute waits for the following one.
fn secs_to_next_minute(now_ts: i64) -> u64 {
    (60 - (now_ts / 1000).rem_euclid(60)) as u64
}

/// Runs the notifications use case every `reminder_job_interval_minutes`,
/// starting at the next whole minute. Runs may overlap with runs started
/// over http.
pub fn start_send_reminders_job(ctx: NotifierContext) {
    let every_minutes = ctx.config.reminder_job_interval_minutes;
    if every_minutes == 0 {
        info!("In-process reminders job is disabled, waiting for an external scheduler.");
        return;
    }

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let start = Instant::now() + Duration::from_secs(secs_to_next_minute(now));

        sleep_until(start).await;
        let mut reminders_interval = interval(Duration::from_secs(60 * every_minutes));
        loop {
            reminders_interval.tick().await;
            let usecase = SendNotificationsUseCase {
                trigger: RunTrigger::JobScheduler,
            };
            // Errors are logged by the executor, the next tick retries
            let _ = execute(usecase, &ctx).await;
        }
    });
}
