pub mod block;
pub mod booking;
pub mod enquiry;
pub mod room;

pub use block::{NewRoomBlock, RoomBlock};
pub use booking::{Booking, BookingStatus, BookingStatusUpdate, NewBooking, PaymentStatus};
pub use enquiry::{
    BanquetEnquiry, BanquetStatus, ContactMessage, ContactStatus, NewBanquetEnquiry,
    NewContactMessage, NewTableBooking, TableBooking, TableBookingStatus, Venue,
};
pub use room::Room;

/// A stored status string that does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} '{value}'")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}
