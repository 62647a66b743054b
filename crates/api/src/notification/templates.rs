use askama::Template;
use salon_notifier_domain::{Appointment, RecipientRole, ReminderWindow};

/// The parts of an `Appointment` that show up in messages
#[derive(Debug, Clone)]
pub struct AppointmentDetails {
    pub client_name: String,
    pub barber_name: String,
    pub service_name: String,
    /// e.g. `Monday, March 15`
    pub date: String,
    /// e.g. `14:30`
    pub time: String,
}

impl AppointmentDetails {
    pub fn new(appointment: &Appointment) -> Self {
        let time = match appointment.clock_time() {
            Ok(time) => time.format("%H:%M").to_string(),
            Err(_) => appointment.time.clone(),
        };
        Self {
            client_name: appointment.client_name().to_string(),
            barber_name: appointment.barber_name().to_string(),
            service_name: appointment.service_name().to_string(),
            date: appointment.date.format("%A, %B %-d").to_string(),
            time,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PushContent {
    pub title: String,
    pub body: String,
}

fn time_until(window: ReminderWindow) -> &'static str {
    match window {
        ReminderWindow::TwentyFourHours => "tomorrow",
        ReminderWindow::TwelveHours => "in 12 hours",
        ReminderWindow::TwoHours => "in 2 hours",
        ReminderWindow::ThirtyMinutes => "in 30 minutes",
        ReminderWindow::ThankYou => "today",
    }
}

#[derive(Template)]
#[template(path = "email/reminder_client.html")]
struct ClientReminderEmail<'a> {
    subject: &'a str,
    details: &'a AppointmentDetails,
}

#[derive(Template)]
#[template(path = "email/reminder_barber.html")]
struct BarberReminderEmail<'a> {
    subject: &'a str,
    details: &'a AppointmentDetails,
}

#[derive(Template)]
#[template(path = "email/thank_you.html")]
struct ThankYouEmail<'a> {
    subject: &'a str,
    details: &'a AppointmentDetails,
}

pub fn email(
    window: ReminderWindow,
    role: RecipientRole,
    details: &AppointmentDetails,
) -> Result<EmailContent, askama::Error> {
    match (window, role) {
        (ReminderWindow::ThankYou, _) => {
            let subject = "Thank you for your visit".to_string();
            let html = ThankYouEmail {
                subject: &subject,
                details,
            }
            .render()?;
            Ok(EmailContent { subject, html })
        }
        (_, RecipientRole::Barber) | (_, RecipientRole::Admin) => {
            let subject = format!(
                "Upcoming appointment {}: {}",
                time_until(window),
                details.client_name
            );
            let html = BarberReminderEmail {
                subject: &subject,
                details,
            }
            .render()?;
            Ok(EmailContent { subject, html })
        }
        (_, RecipientRole::Client) => {
            let subject = format!("Reminder: your appointment is {}", time_until(window));
            let html = ClientReminderEmail {
                subject: &subject,
                details,
            }
            .render()?;
            Ok(EmailContent { subject, html })
        }
    }
}

pub fn push(
    window: ReminderWindow,
    role: RecipientRole,
    details: &AppointmentDetails,
) -> PushContent {
    match (window, role) {
        (ReminderWindow::ThankYou, _) => PushContent {
            title: "Thank you for your visit".into(),
            body: format!(
                "We hope you enjoyed your {} with {}.",
                details.service_name, details.barber_name
            ),
        },
        (_, RecipientRole::Client) => PushContent {
            title: format!("Appointment {}", time_until(window)),
            body: format!(
                "{} with {} at {}",
                details.service_name, details.barber_name, details.time
            ),
        },
        (_, _) => PushContent {
            title: format!("Upcoming appointment {}", time_until(window)),
            body: format!(
                "{} for {} at {}",
                details.client_name, details.service_name, details.time
            ),
        },
    }
}

/// The 24h text asks a pending client to confirm
pub fn sms(window: ReminderWindow, role: RecipientRole, details: &AppointmentDetails) -> String {
    match (window, role) {
        (ReminderWindow::TwentyFourHours, _) => format!(
            "Hi {}, you have a {} with {} tomorrow, {} at {}. \
             Reply YES to confirm or NO to cancel.",
            details.client_name,
            details.service_name,
            details.barber_name,
            details.date,
            details.time
        ),
        (_, RecipientRole::Client) => format!(
            "Reminder: your {} with {} is {}, at {}.",
            details.service_name,
            details.barber_name,
            time_until(window),
            details.time
        ),
        (_, RecipientRole::Barber) => format!(
            "Reminder: {} is booked for {} {}, at {}.",
            details.client_name,
            details.service_name,
            time_until(window),
            details.time
        ),
        (_, RecipientRole::Admin) => format!(
            "Upcoming {}: {} with {} for {} at {}.",
            time_until(window),
            details.client_name,
            details.barber_name,
            details.service_name,
            details.time
        ),
    }
}
