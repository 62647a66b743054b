use salon_notifier_api::Application;
use salon_notifier_infra::{NotifierContext, StaticTimeSys};
use salon_notifier_sdk::NotifierSDK;
use std::sync::Arc;

// 2021-03-14T12:00:00Z
pub const NOW: i64 = 1615723200000;

pub struct TestApp {
    /// Shares repositories and providers with the running server
    pub ctx: NotifierContext,
}

// Launch the application as a background task
pub async fn spawn_app(cron_secret: Option<&str>) -> (TestApp, NotifierSDK, String) {
    spawn_app_with(cron_secret, |_| {}).await
}

/// Like `spawn_app`, but lets the caller swap parts of the context before
/// the server starts
pub async fn spawn_app_with<F>(
    cron_secret: Option<&str>,
    customize: F,
) -> (TestApp, NotifierSDK, String)
where
    F: FnOnce(&mut NotifierContext),
{
    let mut ctx = NotifierContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.cron_secret = cron_secret.map(String::from);
    ctx.config.scheduler_user_agents = vec!["vercel-cron".into()];
    ctx.config.timezone = salon_notifier_domain::Tz::UTC;
    ctx.config.reminder_job_interval_minutes = 0;
    ctx.sys = Arc::new(StaticTimeSys(NOW));
    customize(&mut ctx);

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { ctx };
    let sdk = NotifierSDK::new(address.clone());
    (app, sdk, address)
}
