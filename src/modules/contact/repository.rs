use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct CreateContactMessagePayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateContactMessagePayload,
) -> Result<ContactMessage, Error> {
    sqlx::query_as::<_, ContactMessage>(
        "
        INSERT INTO contact_messages (id, name, email, message)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.name)
    .bind(payload.email)
    .bind(payload.message)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while saving a contact message: {}", err);
        Error::UnexpectedError
    })
}
