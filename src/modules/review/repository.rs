use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

crate::text_enum! {
    pub enum TargetType {
        Restaurant => "restaurant",
        MenuItem => "menu_item",
        DeliveryPerson => "delivery_person",
    }
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub target_type: TargetType,
    pub target_id: String,
    pub rating: BigDecimal,
    pub comment: Option<String>,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct UpsertReviewPayload {
    pub user_id: String,
    pub target_type: TargetType,
    pub target_id: String,
    pub rating: BigDecimal,
    pub comment: Option<String>,
}

/// Inserts the review, or overwrites the one this user already left on the
/// same target.
pub async fn upsert<'e, E: PgExecutor<'e>>(e: E, payload: UpsertReviewPayload) -> Result<Review> {
    sqlx::query_as::<_, Review>(
        "
        INSERT INTO reviews (id, user_id, target_type, target_id, rating, comment)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, target_type, target_id) DO UPDATE SET
            rating = EXCLUDED.rating,
            comment = EXCLUDED.comment,
            is_deleted = FALSE,
            updated_at = NOW()
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_id)
    .bind(payload.target_type)
    .bind(payload.target_id)
    .bind(payload.rating)
    .bind(payload.comment)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while saving a review: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_ratings_by_target<'e, E: PgExecutor<'e>>(
    e: E,
    target_type: TargetType,
    target_id: String,
) -> Result<Vec<BigDecimal>> {
    sqlx::query_scalar::<_, BigDecimal>(
        "
        SELECT
            rating
        FROM
            reviews
        WHERE
            target_type = $1
            AND target_id = $2
            AND is_deleted = FALSE
        ",
    )
    .bind(target_type)
    .bind(target_id.clone())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching ratings of {} {}: {}",
            target_type,
            target_id,
            err
        );
        Error::UnexpectedError
    })
}
