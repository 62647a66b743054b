use salon_notifier_domain::{Appointment, ReminderFlag, ID};
use salon_notifier_infra::{AppointmentQuery, IAppointmentRepo};
use std::sync::Arc;

/// Answers candidate lookups of the day before window and fails all others
pub struct FailsAfterDayBeforeRepo {
    pub inner: Arc<dyn IAppointmentRepo>,
}

#[async_trait::async_trait]
impl IAppointmentRepo for FailsAfterDayBeforeRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        self.inner.insert(appointment).await
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        self.inner.find(appointment_id).await
    }

    async fn find_candidates(&self, query: &AppointmentQuery) -> anyhow::Result<Vec<Appointment>> {
        if query.unsent_flags.contains(&ReminderFlag::Notification24h) {
            self.inner.find_candidates(query).await
        } else {
            Err(anyhow::anyhow!("connection to the store was lost"))
        }
    }

    async fn try_claim(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<bool> {
        self.inner.try_claim(appointment_id, flag).await
    }

    async fn set_flag(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<()> {
        self.inner.set_flag(appointment_id, flag).await
    }
}
