//! Room management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    availability::RoomPartition,
    error::AppResult,
    models::room::{AvailabilityQuery, CreateRoom, Room, UpdateRoom},
};

#[derive(Serialize, ToSchema)]
pub struct RoomsResponse {
    pub success: bool,
    pub rooms: Vec<Room>,
}

#[derive(Serialize, ToSchema)]
pub struct RoomResponse {
    pub success: bool,
    pub room: Room,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateRoomStatus {
    /// available | occupied | maintenance
    pub status: String,
}

#[derive(Deserialize, ToSchema)]
pub struct OccupancyQuery {
    /// Date to evaluate; defaults to today
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct OccupancyResponse {
    pub success: bool,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub partition: RoomPartition,
}

/// List all rooms
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    responses(
        (status = 200, description = "List of rooms", body = RoomsResponse)
    )
)]
pub async fn list_rooms(State(state): State<crate::AppState>) -> AppResult<Json<RoomsResponse>> {
    let rooms = state.services.rooms.list().await?;
    Ok(Json(RoomsResponse { success: true, rooms }))
}

/// Rooms free for an entire date range (checkout day excluded)
#[utoipa::path(
    get,
    path = "/rooms/available",
    tag = "rooms",
    params(
        ("checkin_date" = NaiveDate, Query, description = "Requested check-in date"),
        ("checkout_date" = NaiveDate, Query, description = "Requested checkout date")
    ),
    responses(
        (status = 200, description = "Available rooms", body = RoomsResponse),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn available_rooms(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<RoomsResponse>> {
    let rooms = state
        .services
        .rooms
        .available_for_range(query.checkin_date, query.checkout_date)
        .await?;
    Ok(Json(RoomsResponse { success: true, rooms }))
}

/// Partition rooms into available / occupied / maintenance for a date
#[utoipa::path(
    get,
    path = "/rooms/occupancy",
    tag = "rooms",
    params(
        ("date" = Option<NaiveDate>, Query, description = "Date to evaluate (default today)")
    ),
    responses(
        (status = 200, description = "Room occupancy partition", body = OccupancyResponse)
    )
)]
pub async fn room_occupancy(
    State(state): State<crate::AppState>,
    Query(query): Query<OccupancyQuery>,
) -> AppResult<Json<OccupancyResponse>> {
    let date = query.date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let partition = state.services.rooms.occupancy_on(date).await?;
    Ok(Json(OccupancyResponse {
        success: true,
        date,
        partition,
    }))
}

/// Get room by ID
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "rooms",
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room details", body = RoomResponse),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RoomResponse>> {
    let room = state.services.rooms.get(id).await?;
    Ok(Json(RoomResponse { success: true, room }))
}

/// Create a new room
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "rooms",
    request_body = CreateRoom,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Room number already exists")
    )
)]
pub async fn create_room(
    State(state): State<crate::AppState>,
    Json(room): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<RoomResponse>)> {
    let room = state.services.rooms.create(room).await?;
    Ok((StatusCode::CREATED, Json(RoomResponse { success: true, room })))
}

/// Update an existing room
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    tag = "rooms",
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    request_body = UpdateRoom,
    responses(
        (status = 200, description = "Room updated", body = RoomResponse),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(update): Json<UpdateRoom>,
) -> AppResult<Json<RoomResponse>> {
    let room = state.services.rooms.update(id, update).await?;
    Ok(Json(RoomResponse { success: true, room }))
}

/// Set a room's status
#[utoipa::path(
    put,
    path = "/rooms/{id}/status",
    tag = "rooms",
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    request_body = UpdateRoomStatus,
    responses(
        (status = 200, description = "Status updated", body = RoomResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateRoomStatus>,
) -> AppResult<Json<RoomResponse>> {
    let room = state.services.rooms.update_status(id, &body.status).await?;
    Ok(Json(RoomResponse { success: true, room }))
}

/// Delete a room
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    tag = "rooms",
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room has active bookings")
    )
)]
pub async fn delete_room(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.rooms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
