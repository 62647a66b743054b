use crate::{
    appointment::{AppointmentStatus, ReminderFlag},
    timespan::TimeSpan,
};
use chrono::{TimeZone, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const MINUTE: i64 = 1000 * 60;
const HOUR: i64 = MINUTE * 60;

/// A class of reminders that fire at a fixed offset relative to an
/// `Appointment`.
///
/// The timed windows select appointments starting in
/// `[now + offset, now + offset + tolerance]`. The tolerance is there because
/// the reminders job runs periodically, and without some slack an
/// appointment could fall between two runs and never be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderWindow {
    TwentyFourHours,
    TwelveHours,
    TwoHours,
    ThirtyMinutes,
    /// Completed appointments from the start of today up until now
    ThankYou,
}

impl ReminderWindow {
    /// All windows in the order a run evaluates them
    pub const ALL: [ReminderWindow; 5] = [
        Self::TwentyFourHours,
        Self::TwelveHours,
        Self::TwoHours,
        Self::ThirtyMinutes,
        Self::ThankYou,
    ];

    pub fn offset_millis(&self) -> i64 {
        match self {
            Self::TwentyFourHours => 24 * HOUR,
            Self::TwelveHours => 12 * HOUR,
            Self::TwoHours => 2 * HOUR,
            Self::ThirtyMinutes => 30 * MINUTE,
            Self::ThankYou => 0,
        }
    }

    pub fn tolerance_millis(&self) -> i64 {
        match self {
            Self::TwentyFourHours | Self::TwelveHours => 60 * MINUTE,
            Self::TwoHours => 30 * MINUTE,
            Self::ThirtyMinutes => 15 * MINUTE,
            Self::ThankYou => 0,
        }
    }

    /// The interval of appointment start times this window selects at `now_ts`
    pub fn interval(&self, now_ts: i64, tz: &Tz) -> TimeSpan {
        match self {
            Self::ThankYou => TimeSpan::new(start_of_day(now_ts, tz), now_ts),
            _ => {
                let start = now_ts + self.offset_millis();
                TimeSpan::new(start, start + self.tolerance_millis())
            }
        }
    }

    pub fn eligible_statuses(&self) -> Vec<AppointmentStatus> {
        match self {
            Self::ThankYou => vec![AppointmentStatus::Completed],
            _ => vec![AppointmentStatus::Pending, AppointmentStatus::Confirmed],
        }
    }

    /// Flag guarding the email and push notifications of this window
    pub fn notification_flag(&self) -> ReminderFlag {
        match self {
            Self::TwentyFourHours => ReminderFlag::Notification24h,
            Self::TwelveHours => ReminderFlag::Notification12h,
            Self::TwoHours => ReminderFlag::Notification2h,
            Self::ThirtyMinutes => ReminderFlag::Notification30m,
            Self::ThankYou => ReminderFlag::ThankYou,
        }
    }

    /// Flag guarding the SMS of this window, if it sends any
    pub fn sms_flag(&self) -> Option<ReminderFlag> {
        match self {
            Self::TwentyFourHours => Some(ReminderFlag::Sms24h),
            Self::TwoHours => Some(ReminderFlag::Sms2h),
            _ => None,
        }
    }

    pub fn flags(&self) -> Vec<ReminderFlag> {
        let mut flags = vec![self.notification_flag()];
        flags.extend(self.sms_flag());
        flags
    }

    /// Reminders close to the appointment are delivered as urgent
    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::TwoHours | Self::ThirtyMinutes)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TwentyFourHours => "24h",
            Self::TwelveHours => "12h",
            Self::TwoHours => "2h",
            Self::ThirtyMinutes => "30m",
            Self::ThankYou => "thank-you",
        }
    }
}

impl Display for ReminderWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn start_of_day(now_ts: i64, tz: &Tz) -> i64 {
    let local = tz.timestamp_millis(now_ts).naive_local();
    match tz
        .from_local_datetime(&local.date().and_hms(0, 0, 0))
        .earliest()
    {
        Some(midnight) => midnight.timestamp_millis(),
        // Midnight skipped by a DST transition
        None => {
            let elapsed = local.time().num_seconds_from_midnight() as i64 * 1000
                + local.time().nanosecond() as i64 / 1_000_000;
            now_ts - elapsed
        }
    }
}

/// Who a reminder is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientRole {
    Client,
    Barber,
    Admin,
}

impl Display for RecipientRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Self::Client => "client",
            Self::Barber => "barber",
            Self::Admin => "admin",
        };
        write!(f, "{}", role)
    }
}
