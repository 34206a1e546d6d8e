use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pii::Masked;

status_enum!(Venue {
    Restaurant => "restaurant",
    FoodCourt => "foodcourt",
});

status_enum!(TableBookingStatus {
    Requested => "requested",
    Confirmed => "confirmed",
    Cancelled => "cancelled",
});

status_enum!(BanquetStatus {
    Pending => "pending",
    Contacted => "contacted",
    Confirmed => "confirmed",
    Cancelled => "cancelled",
});

status_enum!(ContactStatus {
    Unread => "unread",
    Read => "read",
    Replied => "replied",
});

/// Table reservation request for the restaurant or the food court.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBooking {
    pub id: Uuid,
    pub guest_name: String,
    pub guest_phone: Masked<String>,
    pub guest_email: Option<Masked<String>>,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub number_of_guests: i32,
    pub venue: Venue,
    pub status: TableBookingStatus,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTableBooking {
    pub guest_name: String,
    pub guest_phone: Masked<String>,
    pub guest_email: Option<Masked<String>>,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub number_of_guests: i32,
    pub venue: Venue,
    pub special_requests: Option<String>,
}

impl NewTableBooking {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> TableBooking {
        TableBooking {
            id,
            guest_name: self.guest_name,
            guest_phone: self.guest_phone,
            guest_email: self.guest_email,
            booking_date: self.booking_date,
            booking_time: self.booking_time,
            number_of_guests: self.number_of_guests,
            venue: self.venue,
            status: TableBookingStatus::Requested,
            special_requests: self.special_requests,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanquetEnquiry {
    pub id: Uuid,
    pub name: String,
    pub phone: Masked<String>,
    pub email: Option<Masked<String>>,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub expected_guests: i32,
    pub message: Option<String>,
    pub status: BanquetStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBanquetEnquiry {
    pub name: String,
    pub phone: Masked<String>,
    pub email: Option<Masked<String>>,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub expected_guests: i32,
    pub message: Option<String>,
}

impl NewBanquetEnquiry {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> BanquetEnquiry {
        BanquetEnquiry {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            event_date: self.event_date,
            event_type: self.event_type,
            expected_guests: self.expected_guests,
            message: self.message,
            status: BanquetStatus::Pending,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: Masked<String>,
    pub phone: Option<Masked<String>>,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Masked<String>,
    pub phone: Option<Masked<String>>,
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            status: ContactStatus::Unread,
            created_at: now,
        }
    }
}
