mod telemetry;

use salon_notifier_api::Application;
use salon_notifier_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("salon_notifier_server".into(), "info".into());
    init_subscriber(subscriber);

    run_migration()
        .await
        .expect("Database migrations to succeed");

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
