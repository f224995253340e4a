//! Booking ledger: the two state transitions a booking can take and the
//! pricing rule between them.
//!
//! Bookings are created `confirmed` and checkout moves them straight to
//! `checked_out`. Each entry point runs as one transaction, so a failure at
//! any step leaves no guest, booking or room-status residue behind.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{AppError, AppResult};
use crate::models::booking::{BookingRequest, BookingRow, BookingStatus};
use crate::models::room::RoomType;
use crate::services::{inventory, registry};

/// Payload for the confirmation notice after a successful booking.
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub booking_id: i64,
    pub guest_name: String,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: i64,
    pub total_price: f64,
}

impl BookingConfirmation {
    pub fn message(&self) -> String {
        format!(
            "Booking confirmed: room {} for {}, {} to {} ({} night{}), total ${:.2}",
            self.room_number,
            self.guest_name,
            self.check_in_date,
            self.check_out_date,
            self.nights,
            if self.nights == 1 { "" } else { "s" },
            self.total_price,
        )
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub booking_id: i64,
    pub guest_name: String,
    pub room_number: String,
}

impl CheckoutReceipt {
    pub fn message(&self) -> String {
        format!(
            "Checked out {} from room {}",
            self.guest_name, self.room_number
        )
    }
}

pub async fn create_booking(
    pool: &SqlitePool,
    request: &BookingRequest,
) -> AppResult<BookingConfirmation> {
    let mut tx = pool.begin().await?;

    // 1. Resolve the guest by email, creating one on first contact.
    let guest = registry::get_or_create(&mut *tx, &request.email, &request.name, &request.phone)
        .await?;

    // 2. Pick any available room of the requested type. An unrecognised type
    //    string falls through to the same error: the inventory simply has no
    //    such room.
    let room = match RoomType::parse(&request.room_type) {
        Some(room_type) => inventory::find_available(&mut *tx, room_type).await?,
        None => None,
    };
    let Some(room) = room else {
        return Err(AppError::NoRoomAvailable {
            room_type: request.room_type.clone(),
        });
    };

    // 3. Parse the dates, then 4. check the range.
    let check_in = parse_date(&request.check_in_date)?;
    let check_out = parse_date(&request.check_out_date)?;
    if check_out <= check_in {
        return Err(AppError::InvalidDateRange);
    }

    // 5. Price linearly over whole nights.
    let nights = (check_out - check_in).num_days();
    let total_price = room.price_per_night * (nights as f64);

    // 6. Insert the booking already confirmed.
    let special_requests = request
        .special_requests
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let booking_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO bookings
            (guest_id, room_id, check_in_date, check_out_date,
             number_of_guests, special_requests, total_price, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(guest.id)
    .bind(room.id)
    .bind(check_in)
    .bind(check_out)
    .bind(request.number_of_guests)
    .bind(special_requests)
    .bind(total_price)
    .bind(BookingStatus::Confirmed)
    .fetch_one(&mut *tx)
    .await?;

    // 7. Take the room off the market in the same transaction.
    inventory::mark_occupied(&mut *tx, room.id).await?;

    tx.commit().await?;

    Ok(BookingConfirmation {
        booking_id,
        guest_name: guest.name,
        room_number: room.room_number,
        check_in_date: check_in,
        check_out_date: check_out,
        nights,
        total_price,
    })
}

/// Marks the booking checked out and frees its room. The room is freed
/// unconditionally, even if other active bookings still point at it;
/// availability is a single stored flag, not a date-range check.
pub async fn checkout(pool: &SqlitePool, booking_id: i64) -> AppResult<CheckoutReceipt> {
    let mut tx = pool.begin().await.map_err(checkout_fault)?;

    let row = sqlx::query_as::<_, CheckoutRow>(
        r#"
        SELECT b.room_id, g.name AS guest_name, r.room_number
        FROM bookings b
        JOIN guests g ON g.id = b.guest_id
        JOIN rooms r ON r.id = b.room_id
        WHERE b.id = ?
        "#,
    )
    .bind(booking_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(checkout_fault)?
    .ok_or(AppError::BookingNotFound(booking_id))?;

    sqlx::query("UPDATE bookings SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(BookingStatus::CheckedOut)
        .bind(booking_id)
        .execute(&mut *tx)
        .await
        .map_err(checkout_fault)?;

    inventory::mark_available(&mut *tx, row.room_id)
        .await
        .map_err(checkout_fault)?;

    tx.commit().await.map_err(checkout_fault)?;

    Ok(CheckoutReceipt {
        booking_id,
        guest_name: row.guest_name,
        room_number: row.room_number,
    })
}

pub async fn list_bookings(conn: &mut SqliteConnection) -> Result<Vec<BookingRow>, sqlx::Error> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        SELECT b.id, g.name AS guest_name, r.room_number,
               b.check_in_date, b.check_out_date,
               b.number_of_guests, b.total_price, b.status
        FROM bookings b
        JOIN guests g ON g.id = b.guest_id
        JOIN rooms r ON r.id = b.room_id
        ORDER BY b.id DESC
        "#,
    )
    .fetch_all(conn)
    .await
}

pub async fn count_active(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE status IN (?, ?)")
        .bind(BookingStatus::Confirmed)
        .bind(BookingStatus::CheckedIn)
        .fetch_one(conn)
        .await
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDateFormat(value.to_string()))
}

/// Store faults during checkout surface as `CheckoutFailed`; a missing
/// booking keeps its own variant.
fn checkout_fault(err: sqlx::Error) -> AppError {
    AppError::CheckoutFailed(err.to_string())
}

#[derive(sqlx::FromRow)]
struct CheckoutRow {
    room_id: i64,
    guest_name: String,
    room_number: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db;
    use crate::models::booking::Booking;
    use crate::models::room::RoomStatus;
    use crate::services::fixtures;

    fn request(room_type: &str, check_in: &str, check_out: &str) -> BookingRequest {
        BookingRequest {
            name: "Ana Lopez".to_string(),
            email: "ana@example.com".to_string(),
            phone: "555-0101".to_string(),
            room_type: room_type.to_string(),
            check_in_date: check_in.to_string(),
            check_out_date: check_out.to_string(),
            number_of_guests: 2,
            special_requests: None,
        }
    }

    async fn booking(pool: &sqlx::SqlitePool, id: i64) -> Booking {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
            .expect("booking row")
    }

    async fn table_count(pool: &sqlx::SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .expect("count")
    }

    #[tokio::test]
    async fn booking_confirms_and_occupies_the_room() {
        let pool = db::test_pool().await;
        let room_id = fixtures::insert_room(&pool, "102", RoomType::Double, 65.0).await;

        let confirmation = create_booking(&pool, &request("double", "2026-09-01", "2026-09-04"))
            .await
            .unwrap();

        assert_eq!(confirmation.room_number, "102");
        assert_eq!(confirmation.nights, 3);
        assert_eq!(confirmation.total_price, 195.0);

        let stored = booking(&pool, confirmation.booking_id).await;
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert_eq!(stored.total_price, 195.0);
        assert_eq!(stored.room_id, room_id);
        assert_eq!(fixtures::room_status(&pool, room_id).await, RoomStatus::Occupied);
    }

    #[tokio::test]
    async fn single_night_booking_prices_one_night() {
        let pool = db::test_pool().await;
        fixtures::insert_room(&pool, "101", RoomType::Single, 45.0).await;

        let confirmation = create_booking(&pool, &request("single", "2026-09-01", "2026-09-02"))
            .await
            .unwrap();

        assert_eq!(confirmation.nights, 1);
        assert_eq!(confirmation.total_price, 45.0);
        assert!(confirmation.message().contains("(1 night)"));
    }

    #[tokio::test]
    async fn exhausted_room_type_is_rejected() {
        let pool = db::test_pool().await;
        fixtures::insert_room(&pool, "101", RoomType::Single, 45.0).await;

        create_booking(&pool, &request("single", "2026-09-01", "2026-09-02"))
            .await
            .unwrap();
        let err = create_booking(&pool, &request("single", "2026-09-05", "2026-09-06"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NoRoomAvailable { .. }));
        assert_eq!(table_count(&pool, "bookings").await, 1);
    }

    #[tokio::test]
    async fn unknown_room_type_reads_as_no_availability() {
        let pool = db::test_pool().await;
        fixtures::insert_room(&pool, "101", RoomType::Single, 45.0).await;

        let err = create_booking(&pool, &request("penthouse", "2026-09-01", "2026-09-02"))
            .await
            .unwrap_err();

        match err {
            AppError::NoRoomAvailable { room_type } => assert_eq!(room_type, "penthouse"),
            other => panic!("expected NoRoomAvailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_date_is_rejected() {
        let pool = db::test_pool().await;
        fixtures::insert_room(&pool, "102", RoomType::Double, 65.0).await;

        for bad in ["01/09/2026", "2026-13-40", "soon", ""] {
            let err = create_booking(&pool, &request("double", bad, "2026-09-04"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidDateFormat(_)), "input {bad:?}");
        }

        assert_eq!(table_count(&pool, "bookings").await, 0);
    }

    #[tokio::test]
    async fn inverted_or_equal_dates_are_rejected_without_residue() {
        let pool = db::test_pool().await;
        let room_id = fixtures::insert_room(&pool, "102", RoomType::Double, 65.0).await;

        for (check_in, check_out) in [("2026-09-04", "2026-09-01"), ("2026-09-01", "2026-09-01")] {
            let err = create_booking(&pool, &request("double", check_in, check_out))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidDateRange));
        }

        // The whole transaction rolled back: no guest, no booking, room free.
        assert_eq!(table_count(&pool, "guests").await, 0);
        assert_eq!(table_count(&pool, "bookings").await, 0);
        assert_eq!(fixtures::room_status(&pool, room_id).await, RoomStatus::Available);
    }

    #[tokio::test]
    async fn repeat_email_reuses_the_guest() {
        let pool = db::test_pool().await;
        fixtures::insert_room(&pool, "101", RoomType::Single, 45.0).await;
        fixtures::insert_room(&pool, "202", RoomType::Single, 45.0).await;

        let first = create_booking(&pool, &request("single", "2026-09-01", "2026-09-02"))
            .await
            .unwrap();
        let mut second_request = request("single", "2026-09-05", "2026-09-06");
        second_request.name = "Ana L.".to_string();
        let second = create_booking(&pool, &second_request).await.unwrap();

        assert_eq!(table_count(&pool, "guests").await, 1);
        let first_row = booking(&pool, first.booking_id).await;
        let second_row = booking(&pool, second.booking_id).await;
        assert_eq!(first_row.guest_id, second_row.guest_id);
        // Stored profile wins over the resubmitted name.
        assert_eq!(second.guest_name, "Ana Lopez");
    }

    #[tokio::test]
    async fn special_requests_are_trimmed_and_optional() {
        let pool = db::test_pool().await;
        fixtures::insert_room(&pool, "104", RoomType::Suite, 95.0).await;

        let mut with_request = request("suite", "2026-09-01", "2026-09-03");
        with_request.special_requests = Some("  late arrival  ".to_string());
        let confirmation = create_booking(&pool, &with_request).await.unwrap();

        let stored = booking(&pool, confirmation.booking_id).await;
        assert_eq!(stored.special_requests.as_deref(), Some("late arrival"));
    }

    #[tokio::test]
    async fn blank_special_requests_store_null() {
        let pool = db::test_pool().await;
        fixtures::insert_room(&pool, "104", RoomType::Suite, 95.0).await;

        let mut blank = request("suite", "2026-09-01", "2026-09-03");
        blank.special_requests = Some("   ".to_string());
        let confirmation = create_booking(&pool, &blank).await.unwrap();

        let stored = booking(&pool, confirmation.booking_id).await;
        assert!(stored.special_requests.is_none());
    }

    #[tokio::test]
    async fn checkout_closes_the_booking_and_frees_the_room() {
        let pool = db::test_pool().await;
        let room_id = fixtures::insert_room(&pool, "102", RoomType::Double, 65.0).await;

        let confirmation = create_booking(&pool, &request("double", "2026-09-01", "2026-09-04"))
            .await
            .unwrap();
        let receipt = checkout(&pool, confirmation.booking_id).await.unwrap();

        assert_eq!(receipt.room_number, "102");
        assert_eq!(receipt.guest_name, "Ana Lopez");

        let stored = booking(&pool, confirmation.booking_id).await;
        assert_eq!(stored.status, BookingStatus::CheckedOut);
        assert_eq!(fixtures::room_status(&pool, room_id).await, RoomStatus::Available);
    }

    #[tokio::test]
    async fn checkout_of_unknown_booking_fails() {
        let pool = db::test_pool().await;

        let err = checkout(&pool, 41).await.unwrap_err();
        assert!(matches!(err, AppError::BookingNotFound(41)));
    }

    #[tokio::test]
    async fn checkout_is_idempotent_on_status() {
        let pool = db::test_pool().await;
        let room_id = fixtures::insert_room(&pool, "102", RoomType::Double, 65.0).await;

        let confirmation = create_booking(&pool, &request("double", "2026-09-01", "2026-09-04"))
            .await
            .unwrap();
        checkout(&pool, confirmation.booking_id).await.unwrap();
        // A second checkout of the same booking is not an error; the room
        // just stays available.
        checkout(&pool, confirmation.booking_id).await.unwrap();

        let stored = booking(&pool, confirmation.booking_id).await;
        assert_eq!(stored.status, BookingStatus::CheckedOut);
        assert_eq!(fixtures::room_status(&pool, room_id).await, RoomStatus::Available);
    }

    #[tokio::test]
    async fn listing_joins_guest_and_room_newest_first() {
        let pool = db::test_pool().await;
        fixtures::insert_room(&pool, "101", RoomType::Single, 45.0).await;
        fixtures::insert_room(&pool, "102", RoomType::Double, 65.0).await;

        let first = create_booking(&pool, &request("single", "2026-09-01", "2026-09-02"))
            .await
            .unwrap();
        let second = create_booking(&pool, &request("double", "2026-09-01", "2026-09-03"))
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let rows = list_bookings(&mut conn).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, second.booking_id);
        assert_eq!(rows[0].room_number, "102");
        assert_eq!(rows[1].id, first.booking_id);
        assert_eq!(rows[1].guest_name, "Ana Lopez");
    }
}
