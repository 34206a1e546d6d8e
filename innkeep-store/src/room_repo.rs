use async_trait::async_trait;
use innkeep_core::{RepoResult, RoomRepository};
use innkeep_shared::models::Room;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoreRoomRepository {
    pool: PgPool,
    table: String,
}

impl StoreRoomRepository {
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_string(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    name: String,
    slug: String,
    description: Option<String>,
    price_per_night: i64,
    capacity: i32,
    beds: i32,
    size_sq_ft: Option<i32>,
    image_urls: Option<Vec<String>>,
    amenities: Option<Vec<String>>,
    is_available: bool,
    total_units: Option<i64>,
    tax_percent: Option<i64>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description.unwrap_or_default(),
            price_per_night: row.price_per_night,
            capacity: row.capacity,
            beds: row.beds,
            size_sq_ft: row.size_sq_ft,
            image_urls: row.image_urls.unwrap_or_default(),
            amenities: row.amenities.unwrap_or_default(),
            is_available: row.is_available,
            total_units: row.total_units,
            tax_percent: row.tax_percent,
        }
    }
}

#[async_trait]
impl RoomRepository for StoreRoomRepository {
    async fn get_room(&self, id: Uuid) -> RepoResult<Option<Room>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.table);
        let row = sqlx::query_as::<_, RoomRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Room::from))
    }

    async fn list_listed_rooms(&self) -> RepoResult<Vec<Room>> {
        let sql = format!(
            "SELECT * FROM {} WHERE is_available = TRUE ORDER BY price_per_night ASC",
            self.table
        );
        let rows = sqlx::query_as::<_, RoomRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn get_listed_room_by_slug(&self, slug: &str) -> RepoResult<Option<Room>> {
        let sql = format!(
            "SELECT * FROM {} WHERE slug = $1 AND is_available = TRUE LIMIT 1",
            self.table
        );
        let row = sqlx::query_as::<_, RoomRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Room::from))
    }
}
