use std::fmt;

use serde::Deserialize;
use sqlx::FromRow;

/// Lifecycle of a booking. Only `Confirmed` and `CheckedOut` are ever
/// assigned: bookings are born confirmed and checkout jumps straight to
/// checked out. `Pending`, `CheckedIn` and `Cancelled` are kept in the
/// schema for data written by hand or by future flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }

    /// Active bookings count towards the dashboard guest tally and still
    /// offer a checkout action.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i64,
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: chrono::NaiveDate,
    pub check_out_date: chrono::NaiveDate,
    pub number_of_guests: i64,
    pub special_requests: Option<String>,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Raw booking form submission. Dates stay as strings so a malformed value
/// reaches the ledger and comes back as a notice instead of failing at the
/// form extractor.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub room_type: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_guests: i64,
    pub special_requests: Option<String>,
}

/// Booking joined with its guest and room for display.
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: i64,
    pub guest_name: String,
    pub room_number: String,
    pub check_in_date: chrono::NaiveDate,
    pub check_out_date: chrono::NaiveDate,
    pub number_of_guests: i64,
    pub total_price: f64,
    pub status: BookingStatus,
}
