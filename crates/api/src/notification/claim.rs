use salon_notifier_domain::{Appointment, ReminderFlag, ReminderWindow};
use salon_notifier_infra::IAppointmentRepo;
use tracing::debug;

/// Gate in front of every dispatch: an appointment is handed to a channel for
/// a window only by the caller that flips the corresponding flag.
///
/// The flip is a conditional update in the store, so two overlapping runs can
/// never both win the same flag.
pub struct ClaimCoordinator<'a> {
    appointments: &'a dyn IAppointmentRepo,
}

impl<'a> ClaimCoordinator<'a> {
    pub fn new(appointments: &'a dyn IAppointmentRepo) -> Self {
        Self { appointments }
    }

    /// Returns `true` iff this call claimed `flag` for `appointment`. Losing
    /// the claim is not an error, the appointment was handled elsewhere.
    pub async fn try_claim(
        &self,
        appointment: &Appointment,
        window: ReminderWindow,
        flag: ReminderFlag,
    ) -> anyhow::Result<bool> {
        // The candidate snapshot already shows it as handled
        if appointment.flags.is_sent(flag) {
            return Ok(false);
        }

        let claimed = self.appointments.try_claim(&appointment.id, flag).await?;
        if !claimed {
            debug!(
                "Appointment {} was already claimed for {} {}",
                appointment.id, window, flag
            );
        }
        Ok(claimed)
    }
}
