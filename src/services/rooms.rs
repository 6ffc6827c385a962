//! Room management service

use chrono::NaiveDate;

use crate::{
    availability::{self, RoomPartition},
    error::{AppError, AppResult},
    models::{
        enums::RoomStatus,
        room::{CreateRoom, Room, UpdateRoom},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RoomsService {
    repository: Repository,
}

impl RoomsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Room>> {
        self.repository.rooms.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Room> {
        self.repository.rooms.get_by_id(id).await
    }

    pub async fn create(&self, room: CreateRoom) -> AppResult<Room> {
        validator::Validate::validate(&room).map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.rooms.create(&room).await
    }

    pub async fn update(&self, id: i32, update: UpdateRoom) -> AppResult<Room> {
        self.repository.rooms.update(id, &update).await
    }

    pub async fn update_status(&self, id: i32, status: &str) -> AppResult<Room> {
        let status = RoomStatus::parse(status)
            .ok_or_else(|| AppError::Validation(format!("Unknown room status: {}", status)))?;
        self.repository.rooms.update_status(id, status).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.rooms.delete(id).await
    }

    /// Rooms free for the whole requested range. Runs the same half-open
    /// overlap test the booking conflict scan uses, over all current
    /// bookings; maintenance rooms are never offered.
    pub async fn available_for_range(
        &self,
        checkin: NaiveDate,
        checkout: NaiveDate,
    ) -> AppResult<Vec<Room>> {
        let today = chrono::Utc::now().date_naive();
        availability::validate_booking_dates(checkin, checkout, today)
            .map_err(AppError::Validation)?;

        let rooms = self.repository.rooms.list().await?;
        let windows = self.repository.bookings.list_windows().await?;

        Ok(rooms
            .into_iter()
            .filter(|room| room.status != "maintenance")
            .filter(|room| {
                availability::is_room_available_for_range(
                    &room.room_number,
                    checkin,
                    checkout,
                    &windows,
                    None,
                )
            })
            .collect())
    }

    /// Partition all rooms into available / occupied / maintenance for a date
    pub async fn occupancy_on(&self, date: NaiveDate) -> AppResult<RoomPartition> {
        let rooms = self.repository.rooms.list().await?;
        let windows = self.repository.bookings.list_windows().await?;
        Ok(availability::categorize_rooms_on(&rooms, &windows, date))
    }
}
