mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EmailConfig, PushConfig, SmsConfig};
pub use repos::{
    AppointmentQuery, IAppointmentRepo, IPushSubscriptionRepo, IUserRepo, Repos,
};
pub use services::email::{EmailMessage, HttpEmailProvider, IEmailProvider, InMemoryEmailProvider};
pub use services::push::{
    IPushProvider, InMemoryPushProvider, PushError, SentPush, WebPushProvider,
};
pub use services::sms::{ISmsProvider, InMemorySmsProvider, SentSms, SmsReceipt, TwilioSmsProvider};
pub use services::{with_timeout, DeliveryError};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, StaticTimeSys};
use system::RealSys;
use tracing::warn;

/// The external services notifications are delivered through
#[derive(Clone)]
pub struct Providers {
    pub email: Arc<dyn IEmailProvider>,
    pub sms: Arc<dyn ISmsProvider>,
    pub push: Arc<dyn IPushProvider>,
}

impl Providers {
    pub fn create(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            email: Arc::new(HttpEmailProvider::new(config.email.clone())),
            sms: Arc::new(TwilioSmsProvider::new(config.sms.clone())),
            push: Arc::new(WebPushProvider::new(config.push.clone())?),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            email: Arc::new(InMemoryEmailProvider::new()),
            sms: Arc::new(InMemorySmsProvider::new()),
            push: Arc::new(InMemoryPushProvider::new()),
        }
    }
}

#[derive(Clone)]
pub struct NotifierContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub providers: Providers,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl NotifierContext {
    async fn create(params: ContextParams) -> Self {
        let config = Config::new();
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string)
                .await
                .expect("Postgres credentials must be valid"),
            None => {
                warn!("DATABASE_URL is not set, appointments are kept in memory.");
                Repos::create_inmemory()
            }
        };
        let providers = Providers::create(&config).expect("Providers to be created");
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            providers,
        }
    }

    /// Context backed by inmemory repositories and providers. Useful for tests.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            providers: Providers::create_inmemory(),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> NotifierContext {
    NotifierContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .ok()
        .filter(|s| !s.is_empty())
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match get_psql_connection_string() {
        Some(s) => s,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
