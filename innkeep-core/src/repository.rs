use async_trait::async_trait;
use innkeep_shared::models::{
    BanquetEnquiry, Booking, BookingStatus, BookingStatusUpdate, ContactMessage,
    NewBanquetEnquiry, NewBooking, NewContactMessage, NewRoomBlock, NewTableBooking, Room,
    RoomBlock, TableBooking,
};
use innkeep_shared::StayRange;
use uuid::Uuid;

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
pub type RepoResult<T> = Result<T, RepoError>;

/// Read access to the room catalogue
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn get_room(&self, id: Uuid) -> RepoResult<Option<Room>>;

    /// Rooms with `is_available` set, cheapest first.
    async fn list_listed_rooms(&self) -> RepoResult<Vec<Room>>;

    async fn get_listed_room_by_slug(&self, slug: &str) -> RepoResult<Option<Room>>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: NewBooking) -> RepoResult<Booking>;

    async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>>;

    /// Returns `None` when no booking has this id.
    async fn update_booking_status(
        &self,
        id: Uuid,
        update: &BookingStatusUpdate,
    ) -> RepoResult<Option<Booking>>;

    /// Bookings of `room_id` in one of `statuses` whose stay overlaps `stay`
    /// under the inclusive test of [`StayRange::overlaps`].
    async fn count_overlapping_bookings(
        &self,
        room_id: Uuid,
        stay: &StayRange,
        statuses: &[BookingStatus],
    ) -> RepoResult<i64>;
}

#[async_trait]
pub trait RoomBlockRepository: Send + Sync {
    async fn create_block(&self, block: NewRoomBlock) -> RepoResult<RoomBlock>;

    /// Returns `false` when no block has this id.
    async fn delete_block(&self, id: Uuid) -> RepoResult<bool>;

    async fn count_overlapping_blocks(&self, room_id: Uuid, stay: &StayRange)
        -> RepoResult<i64>;
}

/// Write-only sink for the restaurant, banquet and contact forms
#[async_trait]
pub trait EnquiryRepository: Send + Sync {
    async fn create_table_booking(&self, booking: NewTableBooking) -> RepoResult<TableBooking>;

    async fn create_banquet_enquiry(
        &self,
        enquiry: NewBanquetEnquiry,
    ) -> RepoResult<BanquetEnquiry>;

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> RepoResult<ContactMessage>;
}
