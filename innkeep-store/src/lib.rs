pub mod app_config;
pub mod block_repo;
pub mod booking_repo;
pub mod database;
pub mod enquiry_repo;
pub mod memory;
pub mod room_repo;

use std::sync::Arc;

use innkeep_core::{BookingRepository, EnquiryRepository, RoomBlockRepository, RoomRepository};

pub use app_config::{CollectionsConfig, Config};
pub use block_repo::StoreRoomBlockRepository;
pub use booking_repo::StoreBookingRepository;
pub use database::DbClient;
pub use enquiry_repo::StoreEnquiryRepository;
pub use memory::MemoryStore;
pub use room_repo::StoreRoomRepository;

/// One handle per record kind, whichever backend serves them.
#[derive(Clone)]
pub struct Repositories {
    pub rooms: Arc<dyn RoomRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub blocks: Arc<dyn RoomBlockRepository>,
    pub enquiries: Arc<dyn EnquiryRepository>,
}

impl Repositories {
    pub fn postgres(db: &DbClient, collections: &CollectionsConfig) -> Self {
        Self {
            rooms: Arc::new(StoreRoomRepository::new(db.pool.clone(), &collections.rooms)),
            bookings: Arc::new(StoreBookingRepository::new(db.pool.clone(), &collections.bookings)),
            blocks: Arc::new(StoreRoomBlockRepository::new(db.pool.clone(), &collections.room_blocks)),
            enquiries: Arc::new(StoreEnquiryRepository::new(db.pool.clone(), collections)),
        }
    }

    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            rooms: store.clone(),
            bookings: store.clone(),
            blocks: store.clone(),
            enquiries: store,
        }
    }
}
