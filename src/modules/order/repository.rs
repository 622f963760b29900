use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

use crate::{
    modules::payment::repository::Payment,
    utils::pagination::{Paginated, Pagination},
};

type Result<T> = std::result::Result<T, Error>;

crate::text_enum! {
    pub enum OrderStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
        Preparing => "preparing",
        Delivered => "delivered",
    }
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub restaurant_id: String,
    pub delivery_person_id: Option<String>,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub total_amount: BigDecimal,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Serialize, Clone, Debug)]
pub struct FullOrder {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub payment: Option<Payment>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct CreateOrderPayload {
    pub user_id: String,
    pub restaurant_id: String,
    pub delivery_address: String,
    pub total_amount: BigDecimal,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateOrderPayload) -> Result<Order> {
    sqlx::query_as::<_, Order>(
        "
        INSERT INTO orders (id, user_id, restaurant_id, status, delivery_address, total_amount)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_id)
    .bind(payload.restaurant_id)
    .bind(OrderStatus::Pending)
    .bind(payload.delivery_address)
    .bind(payload.total_amount)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating an order: {}", err);
        Error::UnexpectedError
    })
}

pub struct CreateOrderItemPayload {
    pub order_id: String,
    pub menu_item_id: String,
    pub quantity: i32,
    pub price: BigDecimal,
}

pub async fn create_item<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateOrderItemPayload,
) -> Result<OrderItem> {
    sqlx::query_as::<_, OrderItem>(
        "
        INSERT INTO order_items (id, order_id, menu_item_id, quantity, price)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.order_id)
    .bind(payload.menu_item_id)
    .bind(payload.quantity)
    .bind(payload.price)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating an order item: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Order>> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching order with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_items_by_order_id<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
) -> Result<Vec<OrderItem>> {
    sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id")
        .bind(order_id.clone())
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching items of order {}: {}",
                order_id,
                err
            );
            Error::UnexpectedError
        })
}

/// Order history of a customer, newest first.
pub async fn find_many_by_user_id<'e, E>(
    e: E,
    pagination: Pagination,
    user_id: String,
) -> Result<Paginated<Order>>
where
    E: PgExecutor<'e> + Copy,
{
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM orders WHERE user_id = $1 AND is_deleted = FALSE",
    )
    .bind(user_id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while counting orders of {}: {}", user_id, err);
        Error::UnexpectedError
    })?;

    let orders = sqlx::query_as::<_, Order>(
        "
        SELECT
            *
        FROM
            orders
        WHERE
            user_id = $1
            AND is_deleted = FALSE
        ORDER BY
            created_at DESC,
            id DESC
        LIMIT $2 OFFSET $3
        ",
    )
    .bind(user_id.clone())
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching orders of {}: {}", user_id, err);
        Error::UnexpectedError
    })?;

    Ok(Paginated::new(
        orders,
        total as u32,
        pagination.page.max(1),
        pagination.limit() as u32,
    ))
}

pub struct UpdateStatusPayload {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub soft_delete: bool,
}

/// Moves the order to `to` only if it is still in `from`. `None` means another
/// request changed the order first.
pub async fn update_status<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateStatusPayload,
) -> Result<Option<Order>> {
    sqlx::query_as::<_, Order>(
        "
        UPDATE orders SET
            status = $1,
            is_deleted = is_deleted OR $2,
            updated_at = NOW()
        WHERE
            id = $3
            AND status = $4
        RETURNING *
        ",
    )
    .bind(payload.to)
    .bind(payload.soft_delete)
    .bind(id.clone())
    .bind(payload.from)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating status of order {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

/// Attaches a delivery person to a confirmed order that has none yet.
pub async fn set_delivery_person<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    delivery_person_id: String,
) -> Result<Option<Order>> {
    sqlx::query_as::<_, Order>(
        "
        UPDATE orders SET
            delivery_person_id = $1,
            updated_at = NOW()
        WHERE
            id = $2
            AND status = $3
            AND delivery_person_id IS NULL
        RETURNING *
        ",
    )
    .bind(delivery_person_id)
    .bind(id.clone())
    .bind(OrderStatus::Confirmed)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while assigning a delivery person to order {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}
