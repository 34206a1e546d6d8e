use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use innkeep_core::{BookingRepository, RepoResult};
use innkeep_shared::models::{Booking, BookingStatus, BookingStatusUpdate, NewBooking};
use innkeep_shared::{Masked, StayRange};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

pub struct StoreBookingRepository {
    pool: PgPool,
    table: String,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_string(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    room_id: Uuid,
    room_name: String,
    guest_name: String,
    guest_email: String,
    guest_phone: String,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    number_of_guests: i32,
    number_of_nights: i32,
    room_price: i64,
    tax_amount: i64,
    total_amount: i64,
    booking_status: String,
    payment_status: String,
    payment_id: Option<String>,
    special_requests: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = innkeep_shared::models::UnknownStatus;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            room_id: row.room_id,
            room_name: row.room_name,
            guest_name: row.guest_name,
            guest_email: Masked(row.guest_email),
            guest_phone: Masked(row.guest_phone),
            check_in_date: row.check_in_date,
            check_out_date: row.check_out_date,
            number_of_guests: row.number_of_guests,
            number_of_nights: row.number_of_nights,
            room_price: row.room_price,
            tax_amount: row.tax_amount,
            total_amount: row.total_amount,
            booking_status: row.booking_status.parse()?,
            payment_status: row.payment_status.parse()?,
            payment_id: row.payment_id,
            special_requests: row.special_requests,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn create_booking(&self, booking: NewBooking) -> RepoResult<Booking> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, room_id, room_name, guest_name, guest_email, guest_phone,
                check_in_date, check_out_date, number_of_guests, number_of_nights,
                room_price, tax_amount, total_amount, booking_status, payment_status,
                special_requests, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $17)
            RETURNING *
            "#,
            self.table
        );

        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(booking.room_id)
            .bind(&booking.room_name)
            .bind(&booking.guest_name)
            .bind(booking.guest_email.expose())
            .bind(booking.guest_phone.expose())
            .bind(booking.stay.check_in)
            .bind(booking.stay.check_out)
            .bind(booking.number_of_guests)
            .bind(booking.number_of_nights)
            .bind(booking.room_price)
            .bind(booking.tax_amount)
            .bind(booking.total_amount)
            .bind(booking.booking_status.as_str())
            .bind(booking.payment_status.as_str())
            .bind(&booking.special_requests)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_into()?)
    }

    async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.table);
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Booking::try_from).transpose()?)
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        update: &BookingStatusUpdate,
    ) -> RepoResult<Option<Booking>> {
        let sql = format!(
            r#"
            UPDATE {}
            SET booking_status = $2,
                payment_status = COALESCE($3, payment_status),
                payment_id = COALESCE($4, payment_id),
                updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
            self.table
        );

        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(id)
            .bind(update.booking_status.as_str())
            .bind(update.payment_status.map(|s| s.as_str()))
            .bind(&update.payment_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Booking::try_from).transpose()?)
    }

    async fn count_overlapping_bookings(
        &self,
        room_id: Uuid,
        stay: &StayRange,
        statuses: &[BookingStatus],
    ) -> RepoResult<i64> {
        let sql = format!(
            r#"
            SELECT COUNT(*) FROM {}
            WHERE room_id = $1
              AND booking_status = ANY($2)
              AND check_in_date <= $3
              AND check_out_date >= $4
            "#,
            self.table
        );
        let statuses: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(room_id)
            .bind(&statuses)
            .bind(stay.check_out)
            .bind(stay.check_in)
            .fetch_one(&self.pool)
            .await?;

        debug!(%room_id, count, "Counted overlapping bookings");
        Ok(count)
    }
}
