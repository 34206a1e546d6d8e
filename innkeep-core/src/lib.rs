pub mod availability;
pub mod bookings;
pub mod pricing;
pub mod repository;

use innkeep_shared::DateError;
use uuid::Uuid;

pub use availability::{Availability, AvailabilityCalculator, BlockPolicy};
pub use bookings::{BookingRequest, BookingService};
pub use pricing::{calculate_booking_amount, BookingAmount, DEFAULT_TAX_PERCENT};
pub use repository::{
    BookingRepository, EnquiryRepository, RepoError, RepoResult, RoomBlockRepository,
    RoomRepository,
};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),
    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error(transparent)]
    InvalidDate(#[from] DateError),
    #[error("Query failed: {0}")]
    QueryFailed(#[from] RepoError),
}

pub type CoreResult<T> = Result<T, CoreError>;
