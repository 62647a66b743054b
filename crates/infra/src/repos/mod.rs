mod appointment;
mod push_subscription;
mod shared;
mod user;

pub use appointment::{
    AppointmentQuery, IAppointmentRepo, InMemoryAppointmentRepo, PostgresAppointmentRepo,
};
pub use push_subscription::{
    IPushSubscriptionRepo, InMemoryPushSubscriptionRepo, PostgresPushSubscriptionRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub appointments: Arc<dyn IAppointmentRepo>,
    pub push_subscriptions: Arc<dyn IPushSubscriptionRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            appointments: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            push_subscriptions: Arc::new(PostgresPushSubscriptionRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            appointments: Arc::new(InMemoryAppointmentRepo::new()),
            push_subscriptions: Arc::new(InMemoryPushSubscriptionRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
