use sqlx::PgExecutor;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Bumps the failed login counter of the user and returns the new count.
pub async fn record_failed_login<'e, E: PgExecutor<'e>>(e: E, user_id: String) -> Result<i32> {
    sqlx::query_scalar::<_, i32>(
        "
        INSERT INTO failed_login_attempts (user_id, attempt_count, last_attempt_at)
        VALUES ($1, 1, NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            attempt_count = failed_login_attempts.attempt_count + 1,
            last_attempt_at = NOW()
        RETURNING attempt_count
        ",
    )
    .bind(user_id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while recording failed login of user {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn clear_failed_logins<'e, E: PgExecutor<'e>>(e: E, user_id: String) -> Result<()> {
    sqlx::query("DELETE FROM failed_login_attempts WHERE user_id = $1")
        .bind(user_id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while clearing failed logins of user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
}
