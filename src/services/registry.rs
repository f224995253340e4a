//! Guest registry, keyed by email address.

use sqlx::SqliteConnection;

use crate::models::guest::Guest;

/// Looks a guest up by email, creating one on first contact. A returning
/// email wins over the submitted name and phone: the stored profile is kept
/// as-is, typos included.
pub async fn get_or_create(
    conn: &mut SqliteConnection,
    email: &str,
    name: &str,
    phone: &str,
) -> Result<Guest, sqlx::Error> {
    if let Some(guest) = sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE email = ?")
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?
    {
        return Ok(guest);
    }

    sqlx::query_as::<_, Guest>(
        "INSERT INTO guests (name, email, phone) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .fetch_one(conn)
    .await
}

pub async fn list_guests(conn: &mut SqliteConnection) -> Result<Vec<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>("SELECT * FROM guests ORDER BY id")
        .fetch_all(conn)
        .await
}
