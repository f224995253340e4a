use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::handlers::{redirect, set_flash, Notice};
use crate::models::booking::BookingRequest;
use crate::services::ledger;

/// POST /book. Every outcome, success or failure, lands back on the
/// dashboard with a notice; the ledger decides which.
pub async fn create(
    pool: web::Data<SqlitePool>,
    session: Session,
    form: web::Form<BookingRequest>,
) -> HttpResponse {
    let request = form.into_inner();
    match ledger::create_booking(pool.get_ref(), &request).await {
        Ok(confirmation) => set_flash(&session, Notice::success(confirmation.message())),
        Err(err) => set_flash(&session, Notice::error(err.to_string())),
    }
    redirect("/")
}

/// POST /checkout/{booking_id}.
pub async fn checkout(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> HttpResponse {
    let booking_id = path.into_inner();
    match ledger::checkout(pool.get_ref(), booking_id).await {
        Ok(receipt) => set_flash(&session, Notice::success(receipt.message())),
        Err(err) => set_flash(&session, Notice::error(err.to_string())),
    }
    redirect("/")
}
