use std::sync::Arc;

use innkeep_core::{AvailabilityCalculator, BookingService, EnquiryRepository, RoomBlockRepository, RoomRepository};
use innkeep_store::app_config::BookingRules;
use innkeep_store::Repositories;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub admin_password: String,
}

#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<dyn RoomRepository>,
    pub blocks: Arc<dyn RoomBlockRepository>,
    pub enquiries: Arc<dyn EnquiryRepository>,
    pub availability: Arc<AvailabilityCalculator>,
    pub bookings: Arc<BookingService>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(repos: Repositories, auth: AuthConfig, rules: &BookingRules) -> Self {
        let availability = AvailabilityCalculator::new(
            repos.rooms.clone(),
            repos.bookings.clone(),
            repos.blocks.clone(),
        );
        let bookings = BookingService::new(repos.rooms.clone(), repos.bookings, rules.default_tax_percent);

        Self {
            rooms: repos.rooms,
            blocks: repos.blocks,
            enquiries: repos.enquiries,
            availability: Arc::new(availability),
            bookings: Arc::new(bookings),
            auth,
        }
    }
}
