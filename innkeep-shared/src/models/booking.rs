use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::StayRange;
use crate::pii::Masked;

status_enum!(
    /// Lifecycle of a room booking.
    BookingStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
        CheckedIn => "checked_in",
        CheckedOut => "checked_out",
    }
);

status_enum!(PaymentStatus {
    Pending => "pending",
    Paid => "paid",
    Failed => "failed",
    Refunded => "refunded",
});

impl BookingStatus {
    /// Statuses that hold a physical unit for the stay.
    pub const OCCUPYING: [BookingStatus; 2] = [BookingStatus::Confirmed, BookingStatus::CheckedIn];

    pub fn occupies_unit(&self) -> bool {
        Self::OCCUPYING.contains(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub room_id: Uuid,
    pub room_name: String,
    pub guest_name: String,
    pub guest_email: Masked<String>,
    pub guest_phone: Masked<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub number_of_nights: i32,
    /// Room charge for the whole stay, in paise.
    pub room_price: i64,
    pub tax_amount: i64,
    pub total_amount: i64,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn stay(&self) -> StayRange {
        StayRange::new(self.check_in_date, self.check_out_date)
    }
}

/// A booking as submitted, before the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: Uuid,
    pub room_name: String,
    pub guest_name: String,
    pub guest_email: Masked<String>,
    pub guest_phone: Masked<String>,
    pub stay: StayRange,
    pub number_of_guests: i32,
    pub number_of_nights: i32,
    pub room_price: i64,
    pub tax_amount: i64,
    pub total_amount: i64,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub special_requests: Option<String>,
}

impl NewBooking {
    pub fn into_booking(self, id: Uuid, now: DateTime<Utc>) -> Booking {
        Booking {
            id,
            room_id: self.room_id,
            room_name: self.room_name,
            guest_name: self.guest_name,
            guest_email: self.guest_email,
            guest_phone: self.guest_phone,
            check_in_date: self.stay.check_in,
            check_out_date: self.stay.check_out,
            number_of_guests: self.number_of_guests,
            number_of_nights: self.number_of_nights,
            room_price: self.room_price,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
            booking_status: self.booking_status,
            payment_status: self.payment_status,
            payment_id: None,
            special_requests: self.special_requests,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update: only the fields that are `Some` change.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusUpdate {
    pub booking_status: BookingStatus,
    pub payment_status: Option<PaymentStatus>,
    pub payment_id: Option<String>,
}

impl BookingStatusUpdate {
    pub fn apply(&self, booking: &mut Booking, now: DateTime<Utc>) {
        booking.booking_status = self.booking_status;
        if let Some(payment_status) = self.payment_status {
            booking.payment_status = payment_status;
        }
        if let Some(payment_id) = &self.payment_id {
            booking.payment_id = Some(payment_id.clone());
        }
        booking.updated_at = now;
    }
}
