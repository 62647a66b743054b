mod appointment;
mod push_subscription;
mod reminder;
mod shared;
mod timespan;
mod user;

pub use appointment::{
    Appointment, AppointmentStatus, Contact, InvalidStatusError, InvalidTimeError, ReminderFlag,
    ReminderFlags,
};
pub use chrono_tz::Tz;
pub use push_subscription::PushSubscription;
pub use reminder::{RecipientRole, ReminderWindow};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use timespan::TimeSpan;
pub use user::{User, UserRole};
