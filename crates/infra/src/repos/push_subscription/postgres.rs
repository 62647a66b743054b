use super::IPushSubscriptionRepo;
use salon_notifier_domain::{PushSubscription, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresPushSubscriptionRepo {
    pool: PgPool,
}

impl PostgresPushSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PushSubscriptionRaw {
    subscription_uid: Uuid,
    user_uid: Uuid,
    endpoint: String,
    p256dh: String,
    auth: String,
}

impl From<PushSubscriptionRaw> for PushSubscription {
    fn from(raw: PushSubscriptionRaw) -> Self {
        Self {
            id: raw.subscription_uid.into(),
            user_id: raw.user_uid.into(),
            endpoint: raw.endpoint,
            p256dh: raw.p256dh,
            auth: raw.auth,
        }
    }
}

#[async_trait::async_trait]
impl IPushSubscriptionRepo for PostgresPushSubscriptionRepo {
    async fn insert(&self, subscription: &PushSubscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO push_subscriptions
            (subscription_uid, user_uid, endpoint, p256dh, auth)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*subscription.id.inner_ref())
        .bind(*subscription.user_id.inner_ref())
        .bind(&subscription.endpoint)
        .bind(&subscription.p256dh)
        .bind(&subscription.auth)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<PushSubscription>> {
        let subscriptions = sqlx::query_as::<_, PushSubscriptionRaw>(
            r#"
            SELECT * FROM push_subscriptions AS s
            WHERE s.user_uid = $1
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions.into_iter().map(|s| s.into()).collect())
    }

    async fn delete(&self, subscription_id: &ID) -> anyhow::Result<Option<PushSubscription>> {
        let deleted = sqlx::query_as::<_, PushSubscriptionRaw>(
            r#"
            DELETE FROM push_subscriptions AS s
            WHERE s.subscription_uid = $1
            RETURNING *
            "#,
        )
        .bind(*subscription_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.map(|s| s.into()))
    }
}
