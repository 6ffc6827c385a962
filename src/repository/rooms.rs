//! Rooms repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RoomStatus,
        room::{CreateRoom, Room, UpdateRoom},
    },
};

#[derive(Clone)]
pub struct RoomsRepository {
    pool: Pool<Postgres>,
}

impl RoomsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all rooms ordered by room number
    pub async fn list(&self) -> AppResult<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY room_number")
            .fetch_all(&self.pool)
            .await?;
        Ok(rooms)
    }

    /// Get room by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Room> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))
    }

    /// Get room by room number
    pub async fn get_by_number(&self, room_number: &str) -> AppResult<Room> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE room_number = $1")
            .bind(room_number)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_number)))
    }

    /// Create a new room
    pub async fn create(&self, room: &CreateRoom) -> AppResult<Room> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE room_number = $1)")
                .bind(&room.room_number)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Err(AppError::Conflict(format!(
                "Room number {} already exists",
                room.room_number
            )));
        }

        let created = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (room_number, room_type, capacity, rate_per_night, status, notes)
            VALUES ($1, $2, $3, $4, 'available', $5)
            RETURNING *
            "#,
        )
        .bind(&room.room_number)
        .bind(&room.room_type)
        .bind(room.capacity)
        .bind(room.rate_per_night)
        .bind(&room.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update a room's mutable fields
    pub async fn update(&self, id: i32, update: &UpdateRoom) -> AppResult<Room> {
        let room = self.get_by_id(id).await?;

        let updated = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET room_type = $1, capacity = $2, rate_per_night = $3, notes = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(update.room_type.as_ref().unwrap_or(&room.room_type))
        .bind(update.capacity.unwrap_or(room.capacity))
        .bind(update.rate_per_night.unwrap_or(room.rate_per_night))
        .bind(update.notes.as_ref().or(room.notes.as_ref()))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Set a room's status
    pub async fn update_status(&self, id: i32, status: RoomStatus) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))
    }

    /// Delete a room; refused while active bookings reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get_by_id(id).await?;

        let has_active: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE room_id = $1 AND status IN ('pending', 'confirmed', 'checked_in')
            )
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if has_active {
            return Err(AppError::Conflict(
                "Room has active bookings and cannot be deleted".to_string(),
            ));
        }

        sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
