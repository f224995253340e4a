//! Room inventory: availability lookups and occupancy flips.
//!
//! A room's status is a stored flag, not something derived from live
//! bookings. It only stays in step with the ledger because booking marks a
//! room occupied and checkout marks it available again.

use sqlx::SqliteConnection;

use crate::models::room::{Room, RoomStatus, RoomType};

/// First available room of the given type, in room-number order.
pub async fn find_available(
    conn: &mut SqliteConnection,
    room_type: RoomType,
) -> Result<Option<Room>, sqlx::Error> {
    sqlx::query_as::<_, Room>(
        "SELECT * FROM rooms WHERE room_type = ? AND status = ? ORDER BY room_number LIMIT 1",
    )
    .bind(room_type)
    .bind(RoomStatus::Available)
    .fetch_optional(conn)
    .await
}

pub async fn mark_occupied(conn: &mut SqliteConnection, room_id: i64) -> Result<(), sqlx::Error> {
    set_status(conn, room_id, RoomStatus::Occupied).await
}

pub async fn mark_available(conn: &mut SqliteConnection, room_id: i64) -> Result<(), sqlx::Error> {
    set_status(conn, room_id, RoomStatus::Available).await
}

async fn set_status(
    conn: &mut SqliteConnection,
    room_id: i64,
    status: RoomStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE rooms SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(status)
        .bind(room_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn list_rooms(conn: &mut SqliteConnection) -> Result<Vec<Room>, sqlx::Error> {
    sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY room_number")
        .fetch_all(conn)
        .await
}

pub async fn count_rooms(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
        .fetch_one(conn)
        .await
}

pub async fn count_by_status(
    conn: &mut SqliteConnection,
    status: RoomStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE status = ?")
        .bind(status)
        .fetch_one(conn)
        .await
}
