use crate::shared::entity::{Entity, ID};
use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::NoShow => "NO_SHOW",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Appointment status: {0} is not recognized")]
pub struct InvalidStatusError(String);

impl FromStr for AppointmentStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            "NO_SHOW" => Ok(Self::NoShow),
            _ => Err(InvalidStatusError(s.to_string())),
        }
    }
}

/// One of the per channel and per window markers on an `Appointment`.
///
/// A flag starts out `false` and is flipped to `true` exactly once, at the
/// moment a dispatch attempt for its channel and window is claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderFlag {
    Notification24h,
    Sms24h,
    Notification12h,
    Notification2h,
    Sms2h,
    Notification30m,
    ThankYou,
}

impl ReminderFlag {
    pub const ALL: [ReminderFlag; 7] = [
        Self::Notification24h,
        Self::Sms24h,
        Self::Notification12h,
        Self::Notification2h,
        Self::Sms2h,
        Self::Notification30m,
        Self::ThankYou,
    ];

    /// Column name of the flag in the appointments table
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Notification24h => "notification_24h_sent",
            Self::Sms24h => "sms_24h_sent",
            Self::Notification12h => "notification_12h_sent",
            Self::Notification2h => "notification_2h_sent",
            Self::Sms2h => "sms_2h_sent",
            Self::Notification30m => "notification_30m_sent",
            Self::ThankYou => "thank_you_sent",
        }
    }
}

impl Display for ReminderFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderFlags {
    pub notification_24h_sent: bool,
    pub sms_24h_sent: bool,
    pub notification_12h_sent: bool,
    pub notification_2h_sent: bool,
    pub sms_2h_sent: bool,
    pub notification_30m_sent: bool,
    pub thank_you_sent: bool,
}

impl ReminderFlags {
    pub fn is_sent(&self, flag: ReminderFlag) -> bool {
        match flag {
            ReminderFlag::Notification24h => self.notification_24h_sent,
            ReminderFlag::Sms24h => self.sms_24h_sent,
            ReminderFlag::Notification12h => self.notification_12h_sent,
            ReminderFlag::Notification2h => self.notification_2h_sent,
            ReminderFlag::Sms2h => self.sms_2h_sent,
            ReminderFlag::Notification30m => self.notification_30m_sent,
            ReminderFlag::ThankYou => self.thank_you_sent,
        }
    }

    /// Flags are never reset
    pub fn mark_sent(&mut self, flag: ReminderFlag) {
        let field = match flag {
            ReminderFlag::Notification24h => &mut self.notification_24h_sent,
            ReminderFlag::Sms24h => &mut self.sms_24h_sent,
            ReminderFlag::Notification12h => &mut self.notification_12h_sent,
            ReminderFlag::Notification2h => &mut self.notification_2h_sent,
            ReminderFlag::Sms2h => &mut self.sms_2h_sent,
            ReminderFlag::Notification30m => &mut self.notification_30m_sent,
            ReminderFlag::ThankYou => &mut self.thank_you_sent,
        };
        *field = true;
    }
}

/// Contact details of a party to an `Appointment`. The client of an
/// appointment may not have a user account, a barber always has one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub user_id: Option<ID>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Contact {
    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(&self.phone)
    }
}

fn non_empty(val: &Option<String>) -> Option<&str> {
    val.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTimeError {
    #[error("Appointment time: `{0}` is not a valid clock time")]
    Malformed(String),
    #[error("Appointment at {0} {1} does not exist in the configured timezone")]
    NonExistent(NaiveDate, String),
}

#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: ID,
    pub date: NaiveDate,
    /// Clock time as entered when booking, e.g. `14:30`
    pub time: String,
    pub status: AppointmentStatus,
    pub client: Option<Contact>,
    pub barber: Option<Contact>,
    pub service_name: Option<String>,
    pub flags: ReminderFlags,
}

impl Appointment {
    pub fn new(date: NaiveDate, time: impl Into<String>, status: AppointmentStatus) -> Self {
        Self {
            id: Default::default(),
            date,
            time: time.into(),
            status,
            client: None,
            barber: None,
            service_name: None,
            flags: Default::default(),
        }
    }

    pub fn clock_time(&self) -> Result<NaiveTime, InvalidTimeError> {
        let time = self.time.trim();
        NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|_| InvalidTimeError::Malformed(self.time.clone()))
    }

    /// The instant of the appointment in millis, interpreting `date` and `time`
    /// as wall clock time in `tz`
    pub fn starts_at(&self, tz: &Tz) -> Result<i64, InvalidTimeError> {
        let local = self.date.and_time(self.clock_time()?);
        tz.from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.timestamp_millis())
            .ok_or_else(|| InvalidTimeError::NonExistent(self.date, self.time.clone()))
    }

    pub fn client_name(&self) -> &str {
        self.client
            .as_ref()
            .and_then(|c| non_empty(&c.name))
            .unwrap_or("Client")
    }

    pub fn barber_name(&self) -> &str {
        self.barber
            .as_ref()
            .and_then(|b| non_empty(&b.name))
            .unwrap_or("Barber")
    }

    pub fn service_name(&self) -> &str {
        non_empty(&self.service_name).unwrap_or("Service")
    }
}

impl Entity for Appointment {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(time: &str) -> Appointment {
        Appointment::new(
            NaiveDate::from_ymd(2021, 3, 14),
            time,
            AppointmentStatus::Confirmed,
        )
    }

    #[test]
    fn it_parses_statuses() {
        for status in &[
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ] {
            assert_eq!(status.as_str().parse::<AppointmentStatus>(), Ok(*status));
        }
        assert!("pending".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn it_computes_start_instant_in_timezone() {
        let utc = appointment("14:30").starts_at(&Tz::UTC).unwrap();
        assert_eq!(utc, 1615732200000);

        let oslo = appointment("14:30").starts_at(&chrono_tz::Europe::Oslo).unwrap();
        assert_eq!(utc - oslo, 1000 * 60 * 60);

        let with_secs = appointment("14:30:00").starts_at(&Tz::UTC).unwrap();
        assert_eq!(with_secs, utc);
    }

    #[test]
    fn it_rejects_malformed_time() {
        assert_eq!(
            appointment("half past two").starts_at(&Tz::UTC),
            Err(InvalidTimeError::Malformed("half past two".into()))
        );
    }

    #[test]
    fn it_falls_back_to_placeholder_names() {
        let mut appointment = appointment("10:00");
        assert_eq!(appointment.client_name(), "Client");
        assert_eq!(appointment.barber_name(), "Barber");
        assert_eq!(appointment.service_name(), "Service");

        appointment.client = Some(Contact {
            name: Some("Ada".into()),
            ..Default::default()
        });
        appointment.barber = Some(Contact {
            name: Some("  ".into()),
            ..Default::default()
        });
        appointment.service_name = Some("Beard trim".into());
        assert_eq!(appointment.client_name(), "Ada");
        assert_eq!(appointment.barber_name(), "Barber");
        assert_eq!(appointment.service_name(), "Beard trim");
    }

    #[test]
    fn flags_only_move_forward() {
        let mut flags = ReminderFlags::default();
        for flag in ReminderFlag::ALL.iter() {
            assert!(!flags.is_sent(*flag));
        }
        flags.mark_sent(ReminderFlag::Sms2h);
        flags.mark_sent(ReminderFlag::Sms2h);
        assert!(flags.is_sent(ReminderFlag::Sms2h));
        assert!(!flags.is_sent(ReminderFlag::Notification2h));
    }
}
