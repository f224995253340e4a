//! Staff accounts for the data page, with bcrypt-hashed passwords.

use sqlx::SqliteConnection;

use crate::error::{AppError, AppResult};
use crate::models::account::Account;

pub async fn create(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    password: &str,
) -> AppResult<Account> {
    if username.is_empty() {
        return Err(AppError::ValidationFailed("Username is required".to_string()));
    }
    if email.is_empty() {
        return Err(AppError::ValidationFailed("Email is required".to_string()));
    }

    let username_taken: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE username = ?)")
            .bind(username)
            .fetch_one(&mut *conn)
            .await?;
    if username_taken {
        return Err(AppError::ValidationFailed(format!(
            "Username `{username}` is already taken"
        )));
    }

    let email_taken: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE email = ?)")
            .bind(email)
            .fetch_one(&mut *conn)
            .await?;
    if email_taken {
        return Err(AppError::ValidationFailed(format!(
            "An account with email `{email}` already exists"
        )));
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let account = sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (username, email, password_hash) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(&password_hash)
    .fetch_one(conn)
    .await?;

    Ok(account)
}

/// Checks the credentials against the stored hash. A missing account and a
/// wrong password are deliberately indistinguishable to the caller.
pub async fn verify(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> AppResult<Account> {
    let Some(account) = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = ?")
        .bind(username)
        .fetch_optional(conn)
        .await?
    else {
        return Err(AppError::AuthenticationFailed);
    };

    if !bcrypt::verify(password, &account.password_hash)? {
        return Err(AppError::AuthenticationFailed);
    }

    Ok(account)
}
