use std::fmt;

use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Dorm,
    Suite,
}

impl RoomType {
    /// Parses the lowercase wire form (`single`, `double`, `dorm`, `suite`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(Self::Single),
            "double" => Some(Self::Double),
            "dorm" => Some(Self::Dorm),
            "suite" => Some(Self::Suite),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Dorm => "dorm",
            Self::Suite => "suite",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Single => "Single Room",
            Self::Double => "Double Room",
            Self::Dorm => "Dorm Bed",
            Self::Suite => "Suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Maintenance` is never assigned by any operation; it exists so rooms can
/// be taken off the market by hand without inventing a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub floor: i64,
    pub room_type: RoomType,
    pub capacity: i64,
    pub price_per_night: f64,
    pub status: RoomStatus,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
