use super::{AppointmentQuery, IAppointmentRepo};
use crate::repos::shared::inmemory_repo::*;
use salon_notifier_domain::{Appointment, ReminderFlag, ID};

pub struct InMemoryAppointmentRepo {
    appointments: std::sync::Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        insert(appointment, &self.appointments);
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        find(appointment_id, &self.appointments)
    }

    async fn find_candidates(&self, query: &AppointmentQuery) -> anyhow::Result<Vec<Appointment>> {
        Ok(find_by(&self.appointments, |a| query.matches(a)))
    }

    async fn try_claim(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<bool> {
        Ok(update_if(
            appointment_id,
            &self.appointments,
            |a| !a.flags.is_sent(flag),
            |a| a.flags.mark_sent(flag),
        ))
    }

    async fn set_flag(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<()> {
        update_if(
            appointment_id,
            &self.appointments,
            |_| true,
            |a| a.flags.mark_sent(flag),
        );
        Ok(())
    }
}
