use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{types::Json, PgExecutor};
use ulid::Ulid;

use crate::utils::storage::UploadedMedia;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub preparation_time: i32,
    pub availability: bool,
    pub picture: Option<Json<UploadedMedia>>,
    pub rating: BigDecimal,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct CreateMenuItemPayload {
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub preparation_time: i32,
    pub availability: bool,
    pub picture: Option<UploadedMedia>,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateMenuItemPayload) -> Result<MenuItem> {
    sqlx::query_as::<_, MenuItem>(
        "
        INSERT INTO menu_items (
            id,
            restaurant_id,
            name,
            description,
            price,
            preparation_time,
            availability,
            picture
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.restaurant_id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.preparation_time)
    .bind(payload.availability)
    .bind(payload.picture.map(Json))
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating a menu item: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<MenuItem>> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = $1 AND is_deleted = FALSE")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching menu item with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_many<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<MenuItem>> {
    sqlx::query_as::<_, MenuItem>(
        "SELECT * FROM menu_items WHERE is_deleted = FALSE ORDER BY created_at DESC",
    )
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching menu items: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_many_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<Vec<MenuItem>> {
    sqlx::query_as::<_, MenuItem>(
        "
        SELECT
            *
        FROM
            menu_items
        WHERE
            restaurant_id = $1
            AND is_deleted = FALSE
        ORDER BY
            created_at DESC
        ",
    )
    .bind(restaurant_id.clone())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching menu of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

/// Fetches the requested items of one restaurant. Ids that do not exist, are
/// deleted, or belong to another restaurant are absent from the result.
pub async fn find_many_by_ids_in_restaurant<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    ids: Vec<String>,
) -> Result<Vec<MenuItem>> {
    sqlx::query_as::<_, MenuItem>(
        "
        SELECT
            *
        FROM
            menu_items
        WHERE
            id = ANY($1)
            AND restaurant_id = $2
            AND is_deleted = FALSE
        ",
    )
    .bind(ids)
    .bind(restaurant_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred in find_many_by_ids_in_restaurant: {}", err);
        Error::UnexpectedError
    })
}

pub async fn set_rating<'e, E: PgExecutor<'e>>(e: E, id: String, rating: BigDecimal) -> Result<()> {
    sqlx::query("UPDATE menu_items SET rating = $1, updated_at = NOW() WHERE id = $2")
        .bind(rating)
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while updating rating of menu item {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}
