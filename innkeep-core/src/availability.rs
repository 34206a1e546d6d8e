use std::sync::Arc;

use innkeep_shared::models::BookingStatus;
use innkeep_shared::StayRange;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::repository::{BookingRepository, RoomBlockRepository, RoomRepository};
use crate::{CoreError, CoreResult};

/// Whether administrative room blocks take part in the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPolicy {
    /// Guest-facing check: only bookings are counted.
    IgnoreBlocks,
    /// Admin check: any overlapping block empties the whole room type.
    WholeRoomType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    pub available_units: i64,
    pub total_units: i64,
    pub booked_units: i64,
    #[serde(skip)]
    pub blocked: bool,
}

impl Availability {
    /// `available_units` is not clamped: an overbooked room reports a
    /// negative count.
    pub fn tally(total_units: i64, booked_units: i64, blocked: bool) -> Self {
        let available_units = if blocked { 0 } else { total_units - booked_units };

        Self {
            available: available_units > 0,
            available_units,
            total_units,
            booked_units,
            blocked,
        }
    }
}

/// Counts free units of a room type for a stay.
///
/// Read-only: nothing is reserved, so a booking created right after a
/// positive answer can still collide with a concurrent one.
pub struct AvailabilityCalculator {
    rooms: Arc<dyn RoomRepository>,
    bookings: Arc<dyn BookingRepository>,
    blocks: Arc<dyn RoomBlockRepository>,
}

impl AvailabilityCalculator {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingRepository>,
        blocks: Arc<dyn RoomBlockRepository>,
    ) -> Self {
        Self {
            rooms,
            bookings,
            blocks,
        }
    }

    pub async fn check_availability(
        &self,
        room_id: &str,
        check_in: &str,
        check_out: &str,
        policy: BlockPolicy,
    ) -> CoreResult<Availability> {
        let id = Uuid::parse_str(room_id).map_err(|_| CoreError::RoomNotFound(room_id.to_string()))?;
        let room = self
            .rooms
            .get_room(id)
            .await?
            .ok_or_else(|| CoreError::RoomNotFound(room_id.to_string()))?;

        let stay = StayRange::parse(check_in, check_out)?;
        let total_units = room.unit_count();

        let booked = self
            .bookings
            .count_overlapping_bookings(room.id, &stay, &BookingStatus::OCCUPYING);
        let blocks = async {
            match policy {
                BlockPolicy::IgnoreBlocks => Ok(0),
                BlockPolicy::WholeRoomType => {
                    self.blocks.count_overlapping_blocks(room.id, &stay).await
                }
            }
        };
        let (booked_units, block_count) = tokio::try_join!(booked, blocks)?;

        let availability = Availability::tally(total_units, booked_units, block_count > 0);
        debug!(
            room_id = %room.id,
            total_units,
            booked_units,
            block_count,
            available_units = availability.available_units,
            "Availability computed"
        );

        Ok(availability)
    }
}
