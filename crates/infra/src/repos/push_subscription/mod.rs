mod inmemory;
mod postgres;

pub use inmemory::InMemoryPushSubscriptionRepo;
pub use postgres::PostgresPushSubscriptionRepo;
use salon_notifier_domain::{PushSubscription, ID};

#[async_trait::async_trait]
pub trait IPushSubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &PushSubscription) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<PushSubscription>>;
    async fn delete(&self, subscription_id: &ID) -> anyhow::Result<Option<PushSubscription>>;
}
