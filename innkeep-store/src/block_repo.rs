use async_trait::async_trait;
use chrono::Utc;
use innkeep_core::{RepoResult, RoomBlockRepository};
use innkeep_shared::models::{NewRoomBlock, RoomBlock};
use innkeep_shared::StayRange;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

pub struct StoreRoomBlockRepository {
    pool: PgPool,
    table: String,
}

impl StoreRoomBlockRepository {
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_string(),
        }
    }
}

#[async_trait]
impl RoomBlockRepository for StoreRoomBlockRepository {
    async fn create_block(&self, block: NewRoomBlock) -> RepoResult<RoomBlock> {
        let block = block.into_block(Uuid::new_v4(), Utc::now());
        let sql = format!(
            r#"
            INSERT INTO {} (id, room_id, room_name, start_date, end_date, reason, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
            self.table
        );

        sqlx::query(&sql)
            .bind(block.id)
            .bind(block.room_id)
            .bind(&block.room_name)
            .bind(block.start_date)
            .bind(block.end_date)
            .bind(&block.reason)
            .bind(block.created_at)
            .execute(&self.pool)
            .await?;

        Ok(block)
    }

    async fn delete_block(&self, id: Uuid) -> RepoResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_overlapping_blocks(&self, room_id: Uuid, stay: &StayRange) -> RepoResult<i64> {
        let sql = format!(
            r#"
            SELECT COUNT(*) FROM {}
            WHERE room_id = $1
              AND start_date <= $2
              AND end_date >= $3
            "#,
            self.table
        );

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(room_id)
            .bind(stay.check_out)
            .bind(stay.check_in)
            .fetch_one(&self.pool)
            .await?;

        debug!(%room_id, count, "Counted overlapping room blocks");
        Ok(count)
    }
}
