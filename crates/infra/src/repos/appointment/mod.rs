mod inmemory;
mod postgres;

use chrono::NaiveDate;
pub use inmemory::InMemoryAppointmentRepo;
pub use postgres::PostgresAppointmentRepo;
use salon_notifier_domain::{Appointment, AppointmentStatus, ReminderFlag, ID};

/// Coarse selection of reminder candidates. The store filters on calendar
/// dates, callers narrow the result down to exact instants.
#[derive(Debug, Clone)]
pub struct AppointmentQuery {
    /// First date to include
    pub from_date: NaiveDate,
    /// Last date to include
    pub to_date: NaiveDate,
    pub statuses: Vec<AppointmentStatus>,
    /// An appointment matches if at least one of these flags is still unset
    pub unsent_flags: Vec<ReminderFlag>,
}

impl AppointmentQuery {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.from_date <= appointment.date
            && appointment.date <= self.to_date
            && self.statuses.contains(&appointment.status)
            && self
                .unsent_flags
                .iter()
                .any(|flag| !appointment.flags.is_sent(*flag))
    }
}

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn find(&self, appointment_id: &ID) -> Option<Appointment>;
    async fn find_candidates(&self, query: &AppointmentQuery) -> anyhow::Result<Vec<Appointment>>;
    /// Atomically sets `flag` if it is not already set. Returns `true` iff this
    /// call was the one that set it.
    async fn try_claim(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<bool>;
    /// Unconditionally sets `flag`. Flags are never reset.
    async fn set_flag(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<()>;
}
