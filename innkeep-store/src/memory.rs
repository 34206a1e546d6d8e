use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use innkeep_core::{
    BookingRepository, EnquiryRepository, RepoResult, RoomBlockRepository, RoomRepository,
};
use innkeep_shared::models::{
    BanquetEnquiry, Booking, BookingStatus, BookingStatusUpdate, ContactMessage,
    NewBanquetEnquiry, NewBooking, NewContactMessage, NewRoomBlock, NewTableBooking, Room,
    RoomBlock, TableBooking,
};
use innkeep_shared::StayRange;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store used when no database is configured, and by tests.
///
/// Applies the same filters as the SQL repositories so both backends give
/// the same availability answers.
#[derive(Default)]
pub struct MemoryStore {
    rooms: RwLock<HashMap<Uuid, Room>>,
    bookings: RwLock<HashMap<Uuid, Booking>>,
    blocks: RwLock<HashMap<Uuid, RoomBlock>>,
    table_bookings: RwLock<Vec<TableBooking>>,
    banquet_enquiries: RwLock<Vec<BanquetEnquiry>>,
    contact_messages: RwLock<Vec<ContactMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_room(&self, room: Room) {
        self.rooms.write().await.insert(room.id, room);
    }

    /// Stores a booking as-is, keeping its status and id.
    pub async fn insert_booking(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id, booking);
    }

    pub async fn table_bookings(&self) -> Vec<TableBooking> {
        self.table_bookings.read().await.clone()
    }

    pub async fn banquet_enquiries(&self) -> Vec<BanquetEnquiry> {
        self.banquet_enquiries.read().await.clone()
    }

    pub async fn contact_messages(&self) -> Vec<ContactMessage> {
        self.contact_messages.read().await.clone()
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn get_room(&self, id: Uuid) -> RepoResult<Option<Room>> {
        Ok(self.rooms.read().await.get(&id).cloned())
    }

    async fn list_listed_rooms(&self) -> RepoResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .rooms
            .read()
            .await
            .values()
            .filter(|r| r.is_available)
            .cloned()
            .collect();
        rooms.sort_by_key(|r| r.price_per_night);
        Ok(rooms)
    }

    async fn get_listed_room_by_slug(&self, slug: &str) -> RepoResult<Option<Room>> {
        Ok(self
            .rooms
            .read()
            .await
            .values()
            .find(|r| r.is_available && r.slug == slug)
            .cloned())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create_booking(&self, booking: NewBooking) -> RepoResult<Booking> {
        let booking = booking.into_booking(Uuid::new_v4(), Utc::now());
        self.bookings.write().await.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        update: &BookingStatusUpdate,
    ) -> RepoResult<Option<Booking>> {
        let mut bookings = self.bookings.write().await;
        Ok(bookings.get_mut(&id).map(|booking| {
            update.apply(booking, Utc::now());
            booking.clone()
        }))
    }

    async fn count_overlapping_bookings(
        &self,
        room_id: Uuid,
        stay: &StayRange,
        statuses: &[BookingStatus],
    ) -> RepoResult<i64> {
        let count = self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.room_id == room_id)
            .filter(|b| statuses.contains(&b.booking_status))
            .filter(|b| stay.overlaps(b.check_in_date, b.check_out_date))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl RoomBlockRepository for MemoryStore {
    async fn create_block(&self, block: NewRoomBlock) -> RepoResult<RoomBlock> {
        let block = block.into_block(Uuid::new_v4(), Utc::now());
        self.blocks.write().await.insert(block.id, block.clone());
        Ok(block)
    }

    async fn delete_block(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.blocks.write().await.remove(&id).is_some())
    }

    async fn count_overlapping_blocks(&self, room_id: Uuid, stay: &StayRange) -> RepoResult<i64> {
        let count = self
            .blocks
            .read()
            .await
            .values()
            .filter(|b| b.room_id == room_id && stay.overlaps(b.start_date, b.end_date))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl EnquiryRepository for MemoryStore {
    async fn create_table_booking(&self, booking: NewTableBooking) -> RepoResult<TableBooking> {
        let record = booking.into_record(Uuid::new_v4(), Utc::now());
        self.table_bookings.write().await.push(record.clone());
        Ok(record)
    }

    async fn create_banquet_enquiry(&self, enquiry: NewBanquetEnquiry) -> RepoResult<BanquetEnquiry> {
        let record = enquiry.into_record(Uuid::new_v4(), Utc::now());
        self.banquet_enquiries.write().await.push(record.clone());
        Ok(record)
    }

    async fn create_contact_message(&self, message: NewContactMessage) -> RepoResult<ContactMessage> {
        let record = message.into_record(Uuid::new_v4(), Utc::now());
        self.contact_messages.write().await.push(record.clone());
        Ok(record)
    }
}
