use super::templates::{self, AppointmentDetails};
use futures::future::join_all;
use salon_notifier_domain::{Appointment, RecipientRole, ReminderWindow};
use salon_notifier_infra::{with_timeout, EmailMessage, IEmailProvider};
use std::time::Duration;
use tracing::{error, info, warn};

pub struct EmailDispatcher<'a> {
    provider: &'a dyn IEmailProvider,
    timeout: Duration,
}

impl<'a> EmailDispatcher<'a> {
    pub fn new(provider: &'a dyn IEmailProvider, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Roles that are emailed for `window` together with their addresses.
    /// Parties without an email address are left out.
    fn recipients(
        window: ReminderWindow,
        appointment: &Appointment,
    ) -> Vec<(RecipientRole, String)> {
        let mut recipients = vec![];
        if let Some(email) = appointment.client.as_ref().and_then(|c| c.email()) {
            recipients.push((RecipientRole::Client, email.to_string()));
        }
        if window != ReminderWindow::ThankYou {
            if let Some(email) = appointment.barber.as_ref().and_then(|b| b.email()) {
                recipients.push((RecipientRole::Barber, email.to_string()));
            }
        }
        recipients
    }

    /// Emails every recipient of `window`. Failures are logged and do not
    /// affect the other recipients. Returns the number of accepted emails.
    pub async fn dispatch(
        &self,
        window: ReminderWindow,
        appointment: &Appointment,
        details: &AppointmentDetails,
    ) -> usize {
        let recipients = Self::recipients(window, appointment);
        if recipients.is_empty() {
            info!(
                "No email recipients for appointment {} in the {} window",
                appointment.id, window
            );
            return 0;
        }

        let sends = recipients.into_iter().map(|(role, to)| async move {
            let content = match templates::email(window, role, details) {
                Ok(content) => content,
                Err(e) => {
                    error!(
                        "Failed to render the {} email for appointment {}: {}",
                        window, appointment.id, e
                    );
                    return false;
                }
            };
            let message = EmailMessage {
                to,
                subject: content.subject,
                body: content.html,
            };
            match with_timeout(self.timeout, self.provider.send(&message)).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        "Unable to email the {} of appointment {} for the {} window: {}",
                        role, appointment.id, window, e
                    );
                    false
                }
            }
        });

        join_all(sends).await.into_iter().filter(|sent| *sent).count()
    }
}
