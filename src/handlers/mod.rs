//! HTTP boundary: route table, session helpers and flash notices.

use actix_session::Session;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

pub mod accounts;
pub mod bookings;
pub mod pages;

const FLASH_KEY: &str = "_flash";
const SESSION_ACCOUNT_ID: &str = "account_id";
const SESSION_USERNAME: &str = "username";

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::index))
        .route("/book", web::post().to(bookings::create))
        .route("/checkout/{booking_id}", web::post().to(bookings::checkout))
        .route("/data", web::get().to(pages::data))
        .route("/login", web::get().to(accounts::login_page))
        .route("/login", web::post().to(accounts::login))
        .route("/register", web::get().to(accounts::register_page))
        .route("/register", web::post().to(accounts::register))
        .route("/logout", web::get().to(accounts::logout));
}

/// One-shot notice carried through the session to the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Queues `notice` for the next page render. Losing a notice beats failing
/// the request, so session errors are swallowed.
fn set_flash(session: &Session, notice: Notice) {
    let _ = session.insert(FLASH_KEY, notice);
}

fn take_flash(session: &Session) -> Option<Notice> {
    session.remove_as::<Notice>(FLASH_KEY).and_then(Result::ok)
}

fn sign_in(session: &Session, account_id: i64, username: &str) {
    session.renew();
    let _ = session.insert(SESSION_ACCOUNT_ID, account_id);
    let _ = session.insert(SESSION_USERNAME, username);
}

fn sign_out(session: &Session) {
    session.remove(SESSION_ACCOUNT_ID);
    session.remove(SESSION_USERNAME);
    session.renew();
}

fn signed_in_user(session: &Session) -> Option<String> {
    session.get::<i64>(SESSION_ACCOUNT_ID).ok().flatten()?;
    session.get::<String>(SESSION_USERNAME).ok().flatten()
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
