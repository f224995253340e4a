//! Read-only aggregation behind the dashboard stat cards.

use sqlx::SqliteConnection;

use crate::models::room::RoomStatus;
use crate::services::{inventory, ledger};

/// Counts shown at the top of the dashboard. Room counts come straight off
/// the rooms table while `active_guests` counts bookings, so the two can
/// disagree when room statuses are edited by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_rooms: i64,
    pub occupied_rooms: i64,
    pub available_rooms: i64,
    /// Bookings currently `confirmed` or `checked_in`, not distinct guests:
    /// one guest with two open bookings counts twice.
    pub active_guests: i64,
}

pub async fn summarize(conn: &mut SqliteConnection) -> Result<DashboardSummary, sqlx::Error> {
    let total_rooms = inventory::count_rooms(&mut *conn).await?;
    let occupied_rooms = inventory::count_by_status(&mut *conn, RoomStatus::Occupied).await?;
    let available_rooms = inventory::count_by_status(&mut *conn, RoomStatus::Available).await?;
    let active_guests = ledger::count_active(conn).await?;

    Ok(DashboardSummary {
        total_rooms,
        occupied_rooms,
        available_rooms,
        active_guests,
    })
}
