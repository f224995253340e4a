use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Everything that can go wrong between the HTTP boundary and the store.
/// The booking and checkout handlers recover all of these into flash
/// notices; the status codes below only surface on routes that let errors
/// escape (page renders, direct API calls).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No {room_type} rooms are available")]
    NoRoomAvailable { room_type: String },

    #[error("Invalid date `{0}`: expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("Booking {0} not found")]
    BookingNotFound(i64),

    #[error("Checkout failed: {0}")]
    CheckoutFailed(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoRoomAvailable { .. } => StatusCode::CONFLICT,
            AppError::InvalidDateFormat(_)
            | AppError::InvalidDateRange
            | AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::BookingNotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            AppError::CheckoutFailed(_)
            | AppError::Database(_)
            | AppError::Render(_)
            | AppError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("unexpected error: {self}");
        }
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
