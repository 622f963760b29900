use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct EmailLog {
    pub id: String,
    pub subject: String,
    pub message: String,
    pub recipient: String,
    pub sent_at: NaiveDateTime,
    pub user_id: Option<String>,
    pub is_otp: bool,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct CreateEmailLogPayload {
    pub subject: String,
    pub message: String,
    pub recipient: String,
    pub user_id: Option<String>,
}

pub async fn create_email_log<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateEmailLogPayload,
) -> Result<EmailLog, Error> {
    sqlx::query_as::<_, EmailLog>(
        "
        INSERT INTO email_logs (id, subject, message, recipient, user_id, is_otp)
        VALUES ($1, $2, $3, $4, $5, FALSE)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.subject)
    .bind(payload.message)
    .bind(payload.recipient)
    .bind(payload.user_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while logging a sent email: {}", err);
        Error::UnexpectedError
    })
}
