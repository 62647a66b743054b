mod delivery;
pub mod email;
pub mod push;
pub mod sms;

pub use delivery::{with_timeout, DeliveryError};
