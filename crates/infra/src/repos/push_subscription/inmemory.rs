use super::IPushSubscriptionRepo;
use crate::repos::shared::inmemory_repo::*;
use salon_notifier_domain::{PushSubscription, ID};

pub struct InMemoryPushSubscriptionRepo {
    subscriptions: std::sync::Mutex<Vec<PushSubscription>>,
}

impl InMemoryPushSubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IPushSubscriptionRepo for InMemoryPushSubscriptionRepo {
    async fn insert(&self, subscription: &PushSubscription) -> anyhow::Result<()> {
        insert(subscription, &self.subscriptions);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<PushSubscription>> {
        Ok(find_by(&self.subscriptions, |s| s.user_id == *user_id))
    }

    async fn delete(&self, subscription_id: &ID) -> anyhow::Result<Option<PushSubscription>> {
        Ok(delete(subscription_id, &self.subscriptions))
    }
}
