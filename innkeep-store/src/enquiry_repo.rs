use async_trait::async_trait;
use chrono::Utc;
use innkeep_core::{EnquiryRepository, RepoResult};
use innkeep_shared::models::{
    BanquetEnquiry, ContactMessage, NewBanquetEnquiry, NewContactMessage, NewTableBooking,
    TableBooking,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::app_config::CollectionsConfig;

/// The three public forms only ever insert, so they share one repository.
pub struct StoreEnquiryRepository {
    pool: PgPool,
    table_bookings: String,
    banquet_enquiries: String,
    contact_messages: String,
}

impl StoreEnquiryRepository {
    pub fn new(pool: PgPool, collections: &CollectionsConfig) -> Self {
        Self {
            pool,
            table_bookings: collections.table_bookings.clone(),
            banquet_enquiries: collections.banquet_enquiries.clone(),
            contact_messages: collections.contact_messages.clone(),
        }
    }
}

#[async_trait]
impl EnquiryRepository for StoreEnquiryRepository {
    async fn create_table_booking(&self, booking: NewTableBooking) -> RepoResult<TableBooking> {
        let record = booking.into_record(Uuid::new_v4(), Utc::now());
        let sql = format!(
            r#"
            INSERT INTO {} (id, guest_name, guest_phone, guest_email, booking_date, booking_time,
                number_of_guests, venue, status, special_requests, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
            self.table_bookings
        );

        sqlx::query(&sql)
            .bind(record.id)
            .bind(&record.guest_name)
            .bind(record.guest_phone.expose())
            .bind(record.guest_email.as_ref().map(|e| e.expose()))
            .bind(record.booking_date)
            .bind(&record.booking_time)
            .bind(record.number_of_guests)
            .bind(record.venue.as_str())
            .bind(record.status.as_str())
            .bind(&record.special_requests)
            .bind(record.created_at)
            .execute(&self.pool)
            .await?;

        Ok(record)
    }

    async fn create_banquet_enquiry(&self, enquiry: NewBanquetEnquiry) -> RepoResult<BanquetEnquiry> {
        let record = enquiry.into_record(Uuid::new_v4(), Utc::now());
        let sql = format!(
            r#"
            INSERT INTO {} (id, name, phone, email, event_date, event_type, expected_guests,
                message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
            self.banquet_enquiries
        );

        sqlx::query(&sql)
            .bind(record.id)
            .bind(&record.name)
            .bind(record.phone.expose())
            .bind(record.email.as_ref().map(|e| e.expose()))
            .bind(record.event_date)
            .bind(&record.event_type)
            .bind(record.expected_guests)
            .bind(&record.message)
            .bind(record.status.as_str())
            .bind(record.created_at)
            .execute(&self.pool)
            .await?;

        Ok(record)
    }

    async fn create_contact_message(&self, message: NewContactMessage) -> RepoResult<ContactMessage> {
        let record = message.into_record(Uuid::new_v4(), Utc::now());
        let sql = format!(
            r#"
            INSERT INTO {} (id, name, email, phone, subject, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
            self.contact_messages
        );

        sqlx::query(&sql)
            .bind(record.id)
            .bind(&record.name)
            .bind(record.email.expose())
            .bind(record.phone.as_ref().map(|p| p.expose()))
            .bind(&record.subject)
            .bind(&record.message)
            .bind(record.status.as_str())
            .bind(record.created_at)
            .execute(&self.pool)
            .await?;

        Ok(record)
    }
}
