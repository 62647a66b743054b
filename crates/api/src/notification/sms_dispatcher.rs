use super::templates::{self, AppointmentDetails};
use futures::future::join_all;
use salon_notifier_domain::{Appointment, AppointmentStatus, RecipientRole, ReminderWindow, User};
use salon_notifier_infra::{with_timeout, ISmsProvider};
use std::time::Duration;
use tracing::{info, warn};

pub struct SmsDispatcher<'a> {
    provider: &'a dyn ISmsProvider,
    timeout: Duration,
}

impl<'a> SmsDispatcher<'a> {
    pub fn new(provider: &'a dyn ISmsProvider, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Recipients of the SMS of `window` with their phone numbers.
    ///
    /// The day before, only a still pending client is texted and asked to
    /// confirm. Two hours before, client, barber and admin are each texted if
    /// they have a phone number.
    fn recipients<'b>(
        window: ReminderWindow,
        appointment: &'b Appointment,
        admin: Option<&'b User>,
    ) -> Vec<(RecipientRole, &'b str)> {
        let client_phone = appointment.client.as_ref().and_then(|c| c.phone());
        match window {
            ReminderWindow::TwentyFourHours => {
                if appointment.status != AppointmentStatus::Pending {
                    info!(
                        "Appointment {} is {}, skipping the confirmation SMS",
                        appointment.id, appointment.status
                    );
                    return vec![];
                }
                client_phone
                    .map(|phone| vec![(RecipientRole::Client, phone)])
                    .unwrap_or_default()
            }
            ReminderWindow::TwoHours => {
                let barber_phone = appointment.barber.as_ref().and_then(|b| b.phone());
                let admin_phone = admin
                    .and_then(|a| a.phone.as_deref())
                    .map(str::trim)
                    .filter(|p| !p.is_empty());
                vec![
                    (RecipientRole::Client, client_phone),
                    (RecipientRole::Barber, barber_phone),
                    (RecipientRole::Admin, admin_phone),
                ]
                .into_iter()
                .filter_map(|(role, phone)| phone.map(|phone| (role, phone)))
                .collect()
            }
            _ => vec![],
        }
    }

    /// Texts the recipients of `window`. Returns the number of SMS the
    /// provider accepted.
    pub async fn dispatch(
        &self,
        window: ReminderWindow,
        appointment: &Appointment,
        details: &AppointmentDetails,
        admin: Option<&User>,
    ) -> usize {
        if !self.provider.is_configured() {
            info!(
                "SMS provider is not configured, skipping the {} SMS of appointment {}",
                window, appointment.id
            );
            return 0;
        }

        let recipients = Self::recipients(window, appointment, admin);
        if recipients.is_empty() {
            info!(
                "No SMS recipients for appointment {} in the {} window",
                appointment.id, window
            );
            return 0;
        }

        let sends = recipients.into_iter().map(|(role, to)| async move {
            let body = templates::sms(window, role, details);
            match with_timeout(self.timeout, self.provider.send(to, &body)).await {
                Ok(receipt) => {
                    info!(
                        "Sent {} SMS to the {} of appointment {}: {}",
                        window, role, appointment.id, receipt.provider_message_id
                    );
                    true
                }
                Err(e) => {
                    warn!(
                        "Unable to text the {} of appointment {} for the {} window: {}",
                        role, appointment.id, window, e
                    );
                    false
                }
            }
        });

        join_all(sends).await.into_iter().filter(|sent| *sent).count()
    }
}
