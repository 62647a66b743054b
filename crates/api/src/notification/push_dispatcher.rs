use super::templates::{self, AppointmentDetails};
use futures::future::join_all;
use salon_notifier_domain::{Appointment, PushSubscription, RecipientRole, ReminderWindow, ID};
use salon_notifier_infra::{with_timeout, IPushProvider, IPushSubscriptionRepo};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushData {
    pub appointment_id: String,
    pub urgent: bool,
    pub window: String,
}

/// The JSON document delivered to the service worker of a subscription
#[derive(Debug, Clone, Serialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    pub url: String,
    pub data: PushData,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PushOutcome {
    pub delivered: usize,
    /// Subscriptions deleted because the push service reported them gone
    pub removed: usize,
}

impl PushOutcome {
    fn add(&mut self, other: PushOutcome) {
        self.delivered += other.delivered;
        self.removed += other.removed;
    }
}

enum Attempt {
    Delivered,
    Gone,
    Failed,
}

pub struct PushDispatcher<'a> {
    provider: &'a dyn IPushProvider,
    subscriptions: &'a dyn IPushSubscriptionRepo,
    timeout: Duration,
    app_url: &'a str,
}

impl<'a> PushDispatcher<'a> {
    pub fn new(
        provider: &'a dyn IPushProvider,
        subscriptions: &'a dyn IPushSubscriptionRepo,
        timeout: Duration,
        app_url: &'a str,
    ) -> Self {
        Self {
            provider,
            subscriptions,
            timeout,
            app_url,
        }
    }

    fn recipients(window: ReminderWindow, appointment: &Appointment) -> Vec<(RecipientRole, ID)> {
        let mut recipients = vec![];
        if let Some(user_id) = appointment.client.as_ref().and_then(|c| c.user_id.clone()) {
            recipients.push((RecipientRole::Client, user_id));
        }
        if window != ReminderWindow::ThankYou {
            if let Some(user_id) = appointment.barber.as_ref().and_then(|b| b.user_id.clone()) {
                recipients.push((RecipientRole::Barber, user_id));
            }
        }
        recipients
    }

    fn payload(
        &self,
        window: ReminderWindow,
        role: RecipientRole,
        appointment: &Appointment,
        details: &AppointmentDetails,
    ) -> PushPayload {
        let content = templates::push(window, role, details);
        PushPayload {
            title: content.title,
            body: content.body,
            url: format!("{}/appointments/{}", self.app_url, appointment.id),
            data: PushData {
                appointment_id: appointment.id.to_string(),
                urgent: window.is_urgent(),
                window: window.label().to_string(),
            },
        }
    }

    /// Pushes the notification of `window` to every device of every recipient
    pub async fn dispatch(
        &self,
        window: ReminderWindow,
        appointment: &Appointment,
        details: &AppointmentDetails,
    ) -> PushOutcome {
        let mut outcome = PushOutcome::default();
        for (role, user_id) in Self::recipients(window, appointment) {
            let payload = self.payload(window, role, appointment, details);
            outcome.add(self.dispatch_to_user(&user_id, &payload).await);
        }
        outcome
    }

    /// Fans `payload` out to all subscriptions of `user_id`. The attempts are
    /// independent of each other, and subscriptions reported as gone are
    /// deleted.
    pub async fn dispatch_to_user(&self, user_id: &ID, payload: &PushPayload) -> PushOutcome {
        let subscriptions = match self.subscriptions.find_by_user(user_id).await {
            Ok(subscriptions) => subscriptions,
            Err(e) => {
                error!(
                    "Unable to load push subscriptions of user {}: {:?}",
                    user_id, e
                );
                return PushOutcome::default();
            }
        };
        if subscriptions.is_empty() {
            return PushOutcome::default();
        }

        let payload = match serde_json::to_string(payload) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Unable to serialize push payload: {:?}", e);
                return PushOutcome::default();
            }
        };

        let attempts = subscriptions
            .iter()
            .map(|subscription| self.attempt(subscription, &payload));
        let mut outcome = PushOutcome::default();
        for attempt in join_all(attempts).await {
            match attempt {
                Attempt::Delivered => outcome.delivered += 1,
                Attempt::Gone => outcome.removed += 1,
                Attempt::Failed => {}
            }
        }
        outcome
    }

    async fn attempt(&self, subscription: &PushSubscription, payload: &str) -> Attempt {
        let res = with_timeout(self.timeout, self.provider.send(subscription, payload)).await;
        match res {
            Ok(()) => Attempt::Delivered,
            Err(e) if e.is_gone() => match self.subscriptions.delete(&subscription.id).await {
                Ok(Some(_)) => {
                    info!(
                        "Push subscription {} of user {} is gone, removed it",
                        subscription.id, subscription.user_id
                    );
                    Attempt::Gone
                }
                Ok(None) => {
                    warn!(
                        "Push subscription {} of user {} is gone but was already removed",
                        subscription.id, subscription.user_id
                    );
                    Attempt::Failed
                }
                Err(e) => {
                    error!(
                        "Unable to remove gone push subscription {} of user {}: {:?}",
                        subscription.id, subscription.user_id, e
                    );
                    Attempt::Failed
                }
            },
            Err(e) => {
                warn!(
                    "Unable to push to subscription {} of user {}: {}",
                    subscription.id, subscription.user_id, e
                );
                Attempt::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salon_notifier_domain::{AppointmentStatus, Contact};
    use salon_notifier_infra::{InMemoryPushProvider, Repos};

    struct ReadOnlySubscriptions {
        subscriptions: Vec<PushSubscription>,
    }

    #[async_trait::async_trait]
    impl IPushSubscriptionRepo for ReadOnlySubscriptions {
        async fn insert(&self, _subscription: &PushSubscription) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("read only"))
        }

        async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<PushSubscription>> {
            Ok(self
                .subscriptions
                .iter()
                .filter(|s| s.user_id == *user_id)
                .cloned()
                .collect())
        }

        async fn delete(&self, _subscription_id: &ID) -> anyhow::Result<Option<PushSubscription>> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    fn subscription(user_id: &ID, endpoint: &str) -> PushSubscription {
        PushSubscription::new(user_id.clone(), endpoint.to_string(), "p256dh", "auth")
    }

    #[actix_web::main]
    #[test]
    async fn removes_gone_subscriptions_and_keeps_the_rest() {
        let repos = Repos::create_inmemory();
        let provider = InMemoryPushProvider::new();
        let user_id = ID::default();
        for endpoint in &["https://push/gone", "https://push/busy", "https://push/ok"] {
            repos
                .push_subscriptions
                .insert(&subscription(&user_id, endpoint))
                .await
                .unwrap();
        }
        provider.fail_with("https://push/gone", 410);
        provider.fail_with("https://push/busy", 503);

        let dispatcher = PushDispatcher::new(
            &provider,
            repos.push_subscriptions.as_ref(),
            Duration::from_secs(1),
            "https://salon.example",
        );
        let mut appointment = Appointment::new(
            NaiveDate::from_ymd(2021, 3, 15),
            "12:00",
            AppointmentStatus::Confirmed,
        );
        appointment.client = Some(Contact {
            user_id: Some(user_id.clone()),
            ..Default::default()
        });
        let details = AppointmentDetails::new(&appointment);

        let outcome = dispatcher
            .dispatch(ReminderWindow::TwoHours, &appointment, &details)
            .await;
        assert_eq!(
            outcome,
            PushOutcome {
                delivered: 1,
                removed: 1
            }
        );

        let endpoints = repos
            .push_subscriptions
            .find_by_user(&user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.endpoint)
            .collect::<Vec<_>>();
        assert!(!endpoints.contains(&"https://push/gone".to_string()));
        assert_eq!(endpoints.len(), 2);

        let sent = provider.sent();
        assert_eq!(sent[0].payload["data"]["urgent"], true);
        assert_eq!(
            sent[0].payload["data"]["appointmentId"],
            appointment.id.to_string()
        );
        assert_eq!(
            sent[0].payload["url"],
            format!("https://salon.example/appointments/{}", appointment.id)
        );
    }

    #[actix_web::main]
    #[test]
    async fn does_not_count_gone_subscriptions_it_could_not_remove() {
        let user_id = ID::default();
        let subscriptions = ReadOnlySubscriptions {
            subscriptions: vec![
                subscription(&user_id, "https://push/gone"),
                subscription(&user_id, "https://push/ok"),
            ],
        };
        let provider = InMemoryPushProvider::new();
        provider.fail_with("https://push/gone", 410);

        let dispatcher = PushDispatcher::new(
            &provider,
            &subscriptions,
            Duration::from_secs(1),
            "https://salon.example",
        );
        let payload = PushPayload {
            title: "Appointment in 2 hours".into(),
            body: "Haircut".into(),
            url: "https://salon.example/appointments/1".into(),
            data: PushData {
                appointment_id: "1".into(),
                urgent: true,
                window: "2h".into(),
            },
        };

        let outcome = dispatcher.dispatch_to_user(&user_id, &payload).await;
        assert_eq!(
            outcome,
            PushOutcome {
                delivered: 1,
                removed: 0
            }
        );
    }
}
