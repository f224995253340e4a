use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
