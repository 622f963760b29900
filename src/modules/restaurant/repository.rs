use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{types::Json, PgExecutor};
use ulid::Ulid;

use crate::utils::storage::UploadedMedia;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Restaurant {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub description: String,
    pub gst_number: String,
    pub profile_picture: Option<Json<UploadedMedia>>,
    pub rating: BigDecimal,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct CreateRestaurantPayload {
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub description: String,
    pub gst_number: String,
    pub profile_picture: Option<UploadedMedia>,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateRestaurantPayload,
) -> Result<Restaurant> {
    sqlx::query_as::<_, Restaurant>(
        "
        INSERT INTO restaurants (
            id,
            owner_id,
            name,
            address,
            phone_number,
            email,
            description,
            gst_number,
            profile_picture
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.owner_id)
    .bind(payload.name)
    .bind(payload.address)
    .bind(payload.phone_number)
    .bind(payload.email)
    .bind(payload.description)
    .bind(payload.gst_number)
    .bind(payload.profile_picture.map(Json))
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating a restaurant: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Restaurant>> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1 AND is_deleted = FALSE")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching restaurant with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_many<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<Restaurant>> {
    sqlx::query_as::<_, Restaurant>(
        "SELECT * FROM restaurants WHERE is_deleted = FALSE ORDER BY created_at DESC",
    )
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching restaurants: {}", err);
        Error::UnexpectedError
    })
}

/// Whether the restaurant belongs to the restaurant owner profile of `user_id`.
pub async fn is_owned_by_user<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    user_id: String,
) -> Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "
        SELECT EXISTS (
            SELECT
                1
            FROM
                restaurants
            INNER JOIN restaurant_owners ON restaurants.owner_id = restaurant_owners.id
            WHERE
                restaurants.id = $1
                AND restaurants.is_deleted = FALSE
                AND restaurant_owners.user_id = $2
                AND restaurant_owners.is_deleted = FALSE
        )
        ",
    )
    .bind(restaurant_id)
    .bind(user_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while checking restaurant ownership: {}", err);
        Error::UnexpectedError
    })
}

pub async fn set_rating<'e, E: PgExecutor<'e>>(e: E, id: String, rating: BigDecimal) -> Result<()> {
    sqlx::query("UPDATE restaurants SET rating = $1, updated_at = NOW() WHERE id = $2")
        .bind(rating)
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while updating rating of restaurant {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}
