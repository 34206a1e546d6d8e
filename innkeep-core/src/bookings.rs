use std::sync::Arc;

use innkeep_shared::models::{Booking, BookingStatus, BookingStatusUpdate, NewBooking, PaymentStatus};
use innkeep_shared::{Masked, StayRange};
use tracing::info;
use uuid::Uuid;

use crate::pricing::calculate_booking_amount;
use crate::repository::{BookingRepository, RoomRepository};
use crate::{CoreError, CoreResult};

/// Guest input for a new room booking, already checked for presence.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub room_id: String,
    pub guest_name: String,
    pub guest_email: Masked<String>,
    pub guest_phone: Masked<String>,
    pub stay: StayRange,
    pub number_of_guests: i32,
    pub special_requests: Option<String>,
}

pub struct BookingService {
    rooms: Arc<dyn RoomRepository>,
    bookings: Arc<dyn BookingRepository>,
    default_tax_percent: i64,
}

impl BookingService {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingRepository>,
        default_tax_percent: i64,
    ) -> Self {
        Self {
            rooms,
            bookings,
            default_tax_percent,
        }
    }

    /// Prices the stay from the room's rates and stores it as pending.
    ///
    /// Availability is not re-checked here; the booking pages run the
    /// availability check first.
    pub async fn create_booking(&self, req: BookingRequest) -> CoreResult<Booking> {
        if !req.stay.is_ordered() {
            return Err(CoreError::ValidationError(
                "Check-out must be after check-in".to_string(),
            ));
        }
        if req.number_of_guests < 1 {
            return Err(CoreError::ValidationError(
                "At least one guest is required".to_string(),
            ));
        }

        let id = Uuid::parse_str(&req.room_id).map_err(|_| CoreError::RoomNotFound(req.room_id.clone()))?;
        let room = self
            .rooms
            .get_room(id)
            .await?
            .ok_or_else(|| CoreError::RoomNotFound(req.room_id.clone()))?;
        if req.number_of_guests > room.capacity {
            return Err(CoreError::ValidationError(format!(
                "{} sleeps at most {} guests",
                room.name, room.capacity
            )));
        }

        let nights = req.stay.nights();
        let amount = calculate_booking_amount(
            room.price_per_night,
            nights,
            room.tax_percent_or(self.default_tax_percent),
        );

        let booking = self
            .bookings
            .create_booking(NewBooking {
                room_id: room.id,
                room_name: room.name,
                guest_name: req.guest_name,
                guest_email: req.guest_email,
                guest_phone: req.guest_phone,
                stay: req.stay,
                number_of_guests: req.number_of_guests,
                number_of_nights: nights as i32,
                room_price: amount.room_price,
                tax_amount: amount.tax_amount,
                total_amount: amount.total_amount,
                booking_status: BookingStatus::Pending,
                payment_status: PaymentStatus::Pending,
                special_requests: req.special_requests,
            })
            .await?;

        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            nights,
            total_amount = booking.total_amount,
            "Booking created"
        );
        Ok(booking)
    }

    pub async fn get_booking(&self, id: Uuid) -> CoreResult<Booking> {
        self.bookings
            .get_booking(id)
            .await?
            .ok_or(CoreError::BookingNotFound(id))
    }

    pub async fn update_status(&self, id: Uuid, update: &BookingStatusUpdate) -> CoreResult<Booking> {
        let booking = self
            .bookings
            .update_booking_status(id, update)
            .await?
            .ok_or(CoreError::BookingNotFound(id))?;

        info!(
            booking_id = %id,
            booking_status = %booking.booking_status,
            payment_status = %booking.payment_status,
            "Booking status updated"
        );
        Ok(booking)
    }
}
