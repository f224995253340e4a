use actix_session::Session;
use actix_web::{web, HttpResponse};
use askama::Template;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::handlers::{html, redirect, set_flash, signed_in_user, take_flash, Notice};
use crate::models::booking::BookingRow;
use crate::models::guest::Guest;
use crate::models::room::{Room, RoomStatus};
use crate::services::dashboard::DashboardSummary;
use crate::services::{dashboard, inventory, ledger, registry};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    notice: Option<Notice>,
    summary: DashboardSummary,
    rooms: Vec<Room>,
    bookings: Vec<BookingRow>,
}

pub async fn index(pool: web::Data<SqlitePool>, session: Session) -> AppResult<HttpResponse> {
    let mut conn = pool.acquire().await?;
    let summary = dashboard::summarize(&mut conn).await?;
    let rooms = inventory::list_rooms(&mut conn).await?;
    let bookings = ledger::list_bookings(&mut conn).await?;

    let page = IndexTemplate {
        notice: take_flash(&session),
        summary,
        rooms,
        bookings,
    };
    Ok(html(page.render()?))
}

#[derive(Template)]
#[template(path = "data.html")]
struct DataTemplate {
    notice: Option<Notice>,
    username: String,
    occupied_rooms: i64,
    rooms: Vec<Room>,
    guests: Vec<Guest>,
    bookings: Vec<BookingRow>,
}

pub async fn data(pool: web::Data<SqlitePool>, session: Session) -> AppResult<HttpResponse> {
    let Some(username) = signed_in_user(&session) else {
        set_flash(&session, Notice::error("Please log in to view the data page"));
        return Ok(redirect("/login"));
    };

    let mut conn = pool.acquire().await?;
    let occupied_rooms = inventory::count_by_status(&mut conn, RoomStatus::Occupied).await?;
    let rooms = inventory::list_rooms(&mut conn).await?;
    let guests = registry::list_guests(&mut conn).await?;
    let bookings = ledger::list_bookings(&mut conn).await?;

    let page = DataTemplate {
        notice: take_flash(&session),
        username,
        occupied_rooms,
        rooms,
        guests,
        bookings,
    };
    Ok(html(page.render()?))
}
