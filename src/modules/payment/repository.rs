use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

crate::text_enum! {
    pub enum PaymentMethod {
        CashOnDelivery => "cash_on_delivery",
    }
}

crate::text_enum! {
    pub enum PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
    }
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    pub payment_method: PaymentMethod,
    pub amount: BigDecimal,
    pub payment_status: PaymentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Every order starts with a pending cash on delivery payment for its total.
pub async fn create_pending<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
    amount: BigDecimal,
) -> Result<Payment> {
    sqlx::query_as::<_, Payment>(
        "
        INSERT INTO payments (id, order_id, payment_method, amount, payment_status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(order_id)
    .bind(PaymentMethod::CashOnDelivery)
    .bind(amount)
    .bind(PaymentStatus::Pending)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating a payment: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_order_id<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
) -> Result<Option<Payment>> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE order_id = $1")
        .bind(order_id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching payment of order {}: {}",
                order_id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn update_status_by_order_id<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
    payment_status: PaymentStatus,
) -> Result<()> {
    sqlx::query("UPDATE payments SET payment_status = $1, updated_at = NOW() WHERE order_id = $2")
        .bind(payment_status)
        .bind(order_id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while updating payment of order {}: {}",
                order_id,
                err
            );
            Error::UnexpectedError
        })
}
