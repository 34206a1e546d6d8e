//! Data model shared by every innkeep crate: rooms, bookings, room blocks,
//! the public enquiry forms, and calendar-date helpers.

#[macro_use]
mod macros;

pub mod dates;
pub mod models;
pub mod pii;

pub use dates::{nights_between, parse_calendar_date, DateError, StayRange};
pub use pii::Masked;
