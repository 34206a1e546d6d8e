use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Administrative hold (maintenance, private event) on a room type.
///
/// A block has no unit count: while it overlaps a stay, every unit of the
/// room type is treated as unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomBlock {
    pub id: Uuid,
    pub room_id: Uuid,
    pub room_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRoomBlock {
    pub room_id: Uuid,
    pub room_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

impl NewRoomBlock {
    pub fn into_block(self, id: Uuid, now: DateTime<Utc>) -> RoomBlock {
        RoomBlock {
            id,
            room_id: self.room_id,
            room_name: self.room_name,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
            created_at: now,
        }
    }
}
