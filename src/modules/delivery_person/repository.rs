use bigdecimal::BigDecimal;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct DeliveryPerson {
    pub id: String,
    pub user_id: String,
    pub aadhaar_card_number: String,
    pub vehicle_details: Option<String>,
    pub availability_status: bool,
    pub rating: BigDecimal,
    pub is_deleted: bool,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct CreateDeliveryPersonPayload {
    pub user_id: String,
    pub aadhaar_card_number: String,
    pub vehicle_details: Option<String>,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateDeliveryPersonPayload,
) -> Result<DeliveryPerson> {
    sqlx::query_as::<_, DeliveryPerson>(
        "
        INSERT INTO delivery_persons (id, user_id, aadhaar_card_number, vehicle_details)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_id)
    .bind(payload.aadhaar_card_number)
    .bind(payload.vehicle_details)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating delivery person: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<DeliveryPerson>> {
    sqlx::query_as::<_, DeliveryPerson>(
        "SELECT * FROM delivery_persons WHERE id = $1 AND is_deleted = FALSE",
    )
    .bind(id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching delivery person with id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Option<DeliveryPerson>> {
    sqlx::query_as::<_, DeliveryPerson>(
        "SELECT * FROM delivery_persons WHERE user_id = $1 AND is_deleted = FALSE",
    )
    .bind(user_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred in find_by_user_id: {}", err);
        Error::UnexpectedError
    })
}

pub struct UpdateDeliveryPersonPayload {
    pub vehicle_details: Option<String>,
    pub availability_status: Option<bool>,
}

pub async fn update_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    payload: UpdateDeliveryPersonPayload,
) -> Result<()> {
    sqlx::query(
        "
        UPDATE delivery_persons SET
            vehicle_details = COALESCE($1, vehicle_details),
            availability_status = COALESCE($2, availability_status)
        WHERE
            user_id = $3
        ",
    )
    .bind(payload.vehicle_details)
    .bind(payload.availability_status)
    .bind(user_id.clone())
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating delivery person of user {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

/// Marks the best rated available delivery person with an active account as
/// unavailable and returns them. Rows already locked by a concurrent claim are
/// skipped, so two callers never receive the same person.
pub async fn claim_available<'e, E: PgExecutor<'e>>(e: E) -> Result<Option<DeliveryPerson>> {
    sqlx::query_as::<_, DeliveryPerson>(
        "
        UPDATE delivery_persons SET
            availability_status = FALSE
        WHERE
            id = (
                SELECT
                    delivery_persons.id
                FROM
                    delivery_persons
                    JOIN users ON users.id = delivery_persons.user_id
                WHERE
                    delivery_persons.availability_status = TRUE
                    AND delivery_persons.is_deleted = FALSE
                    AND users.is_active = TRUE
                    AND users.is_deleted = FALSE
                ORDER BY
                    delivery_persons.rating DESC,
                    delivery_persons.id ASC
                LIMIT 1
                FOR UPDATE OF delivery_persons SKIP LOCKED
            )
        RETURNING *
        ",
    )
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while claiming a delivery person: {}", err);
        Error::UnexpectedError
    })
}

pub async fn set_availability<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    availability_status: bool,
) -> Result<()> {
    sqlx::query("UPDATE delivery_persons SET availability_status = $1 WHERE id = $2")
        .bind(availability_status)
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while updating availability of delivery person {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn set_rating<'e, E: PgExecutor<'e>>(e: E, id: String, rating: BigDecimal) -> Result<()> {
    sqlx::query("UPDATE delivery_persons SET rating = $1 WHERE id = $2")
        .bind(rating)
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while updating rating of delivery person {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn soft_delete_by_user_id<'e, E: PgExecutor<'e>>(e: E, user_id: String) -> Result<()> {
    sqlx::query(
        "UPDATE delivery_persons SET is_deleted = TRUE, availability_status = FALSE WHERE user_id = $1",
    )
    .bind(user_id)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Error occurred while deleting delivery person: {}", err);
        Error::UnexpectedError
    })
}
