//! Order lifecycle rules shared by the order routes.
//!
//! ```text
//! pending   -> confirmed  (restaurant owner)
//! pending   -> cancelled  (restaurant owner, rejects the order)
//! confirmed -> preparing  (restaurant owner)
//! preparing -> delivered  (assigned delivery person)
//! ```

use super::repository::{self, Order, OrderStatus};
use crate::{
    modules::{
        delivery_person,
        payment::{self, repository::PaymentStatus},
        restaurant,
        user::repository::{self as user_repository, User},
    },
    types::Context,
};
use bigdecimal::BigDecimal;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Actor {
    RestaurantOwner,
    DeliveryPerson,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Confirm,
    Reject,
    StartPreparing,
    Deliver,
}

impl Transition {
    pub fn source(&self) -> OrderStatus {
        match self {
            Self::Confirm | Self::Reject => OrderStatus::Pending,
            Self::StartPreparing => OrderStatus::Confirmed,
            Self::Deliver => OrderStatus::Preparing,
        }
    }

    pub fn target(&self) -> OrderStatus {
        match self {
            Self::Confirm => OrderStatus::Confirmed,
            Self::Reject => OrderStatus::Cancelled,
            Self::StartPreparing => OrderStatus::Preparing,
            Self::Deliver => OrderStatus::Delivered,
        }
    }

    pub fn actor(&self) -> Actor {
        match self {
            Self::Deliver => Actor::DeliveryPerson,
            _ => Actor::RestaurantOwner,
        }
    }
}

pub fn is_allowed(current: OrderStatus, transition: Transition) -> bool {
    current == transition.source()
}

pub fn can_assign_delivery_person(order: &Order) -> bool {
    order.status == OrderStatus::Confirmed && order.delivery_person_id.is_none()
}

pub struct Line {
    pub price: BigDecimal,
    pub quantity: i32,
}

pub fn compute_total(lines: &[Line]) -> BigDecimal {
    lines
        .iter()
        .fold(BigDecimal::from(0), |total, line| {
            total + line.price.clone() * BigDecimal::from(line.quantity)
        })
}

#[derive(Debug)]
pub enum AccessError {
    Forbidden,
    UnexpectedError,
}

pub async fn ensure_restaurant_owner(
    ctx: Arc<Context>,
    user: &User,
    order: &Order,
) -> Result<(), AccessError> {
    if !user_repository::is_restaurant_owner(user) {
        return Err(AccessError::Forbidden);
    }

    let owns_restaurant = restaurant::repository::is_owned_by_user(
        &ctx.db_conn.pool,
        order.restaurant_id.clone(),
        user.id.clone(),
    )
    .await
    .map_err(|_| AccessError::UnexpectedError)?;

    match owns_restaurant {
        true => Ok(()),
        false => Err(AccessError::Forbidden),
    }
}

pub async fn ensure_assigned_delivery_person(
    ctx: Arc<Context>,
    user: &User,
    order: &Order,
) -> Result<delivery_person::repository::DeliveryPerson, AccessError> {
    if !user_repository::is_delivery_person(user) {
        return Err(AccessError::Forbidden);
    }

    let delivery_person =
        delivery_person::repository::find_by_user_id(&ctx.db_conn.pool, user.id.clone())
            .await
            .map_err(|_| AccessError::UnexpectedError)?
            .ok_or(AccessError::Forbidden)?;

    match order.delivery_person_id.as_deref() == Some(delivery_person.id.as_str()) {
        true => Ok(delivery_person),
        false => Err(AccessError::Forbidden),
    }
}

/// The customer who placed the order, the owner of its restaurant and the
/// delivery person carrying it may read it.
pub async fn ensure_can_view(
    ctx: Arc<Context>,
    user: &User,
    order: &Order,
) -> Result<(), AccessError> {
    if order.user_id == user.id {
        return Ok(());
    }

    match user.user_type {
        user_repository::UserType::RestaurantOwner => {
            ensure_restaurant_owner(ctx, user, order).await
        }
        user_repository::UserType::DeliveryPerson => {
            ensure_assigned_delivery_person(ctx, user, order)
                .await
                .map(|_| ())
        }
        user_repository::UserType::Customer => Err(AccessError::Forbidden),
    }
}

#[derive(Debug)]
pub enum TransitionError {
    OrderNotFound,
    Forbidden,
    InvalidTransition(OrderStatus),
    Conflict,
    UnexpectedError,
}

impl From<AccessError> for TransitionError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Forbidden => Self::Forbidden,
            AccessError::UnexpectedError => Self::UnexpectedError,
        }
    }
}

/// Applies `transition` to the order on behalf of `user` along with its side
/// effects on the payment and the delivery person.
pub async fn apply_transition(
    ctx: Arc<Context>,
    user: &User,
    order_id: String,
    transition: Transition,
) -> Result<Order, TransitionError> {
    let order = repository::find_by_id(&ctx.db_conn.pool, order_id.clone())
        .await
        .map_err(|_| TransitionError::UnexpectedError)?
        .ok_or(TransitionError::OrderNotFound)?;

    match transition.actor() {
        Actor::RestaurantOwner => ensure_restaurant_owner(ctx.clone(), user, &order).await?,
        Actor::DeliveryPerson => {
            ensure_assigned_delivery_person(ctx.clone(), user, &order).await?;
        }
    }

    if !is_allowed(order.status, transition) {
        return Err(TransitionError::InvalidTransition(order.status));
    }

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        TransitionError::UnexpectedError
    })?;

    let updated_order = repository::update_status(
        &mut *tx,
        order_id,
        repository::UpdateStatusPayload {
            from: transition.source(),
            to: transition.target(),
            soft_delete: transition == Transition::Reject,
        },
    )
    .await
    .map_err(|_| TransitionError::UnexpectedError)?
    .ok_or(TransitionError::Conflict)?;

    match transition {
        Transition::Reject => {
            payment::repository::update_status_by_order_id(
                &mut *tx,
                updated_order.id.clone(),
                PaymentStatus::Failed,
            )
            .await
            .map_err(|_| TransitionError::UnexpectedError)?;
        }
        Transition::Deliver => {
            payment::repository::update_status_by_order_id(
                &mut *tx,
                updated_order.id.clone(),
                PaymentStatus::Completed,
            )
            .await
            .map_err(|_| TransitionError::UnexpectedError)?;

            if let Some(delivery_person_id) = updated_order.delivery_person_id.clone() {
                delivery_person::repository::set_availability(&mut *tx, delivery_person_id, true)
                    .await
                    .map_err(|_| TransitionError::UnexpectedError)?;
            }
        }
        Transition::Confirm | Transition::StartPreparing => (),
    }

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        TransitionError::UnexpectedError
    })?;

    tracing::info!(
        "Order {} moved from {} to {}",
        updated_order.id,
        transition.source(),
        transition.target()
    );

    Ok(updated_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    const TRANSITIONS: [Transition; 4] = [
        Transition::Confirm,
        Transition::Reject,
        Transition::StartPreparing,
        Transition::Deliver,
    ];

    const STATUSES: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Cancelled,
        OrderStatus::Preparing,
        OrderStatus::Delivered,
    ];

    fn order(status: OrderStatus, delivery_person_id: Option<&str>) -> Order {
        Order {
            id: String::from("order"),
            user_id: String::from("customer"),
            restaurant_id: String::from("restaurant"),
            delivery_person_id: delivery_person_id.map(String::from),
            status,
            delivery_address: String::from("12 MG Road"),
            total_amount: BigDecimal::from(0),
            is_deleted: false,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn lifecycle_table() {
        assert_eq!(
            (Transition::Confirm.source(), Transition::Confirm.target()),
            (OrderStatus::Pending, OrderStatus::Confirmed)
        );
        assert_eq!(
            (Transition::Reject.source(), Transition::Reject.target()),
            (OrderStatus::Pending, OrderStatus::Cancelled)
        );
        assert_eq!(
            (
                Transition::StartPreparing.source(),
                Transition::StartPreparing.target()
            ),
            (OrderStatus::Confirmed, OrderStatus::Preparing)
        );
        assert_eq!(
            (Transition::Deliver.source(), Transition::Deliver.target()),
            (OrderStatus::Preparing, OrderStatus::Delivered)
        );
    }

    #[test]
    fn only_delivery_is_left_to_the_delivery_person() {
        for transition in TRANSITIONS {
            let expected = match transition {
                Transition::Deliver => Actor::DeliveryPerson,
                _ => Actor::RestaurantOwner,
            };
            assert_eq!(transition.actor(), expected);
        }
    }

    #[test]
    fn each_transition_is_allowed_from_exactly_one_status() {
        for transition in TRANSITIONS {
            let allowed = STATUSES
                .iter()
                .filter(|status| is_allowed(**status, transition))
                .collect::<Vec<_>>();
            assert_eq!(allowed, vec![&transition.source()]);
        }
    }

    #[test]
    fn terminal_statuses_accept_nothing() {
        for status in [OrderStatus::Cancelled, OrderStatus::Delivered] {
            assert!(TRANSITIONS
                .iter()
                .all(|transition| !is_allowed(status, *transition)));
        }
    }

    #[test]
    fn skipping_steps_is_rejected() {
        assert!(!is_allowed(OrderStatus::Pending, Transition::StartPreparing));
        assert!(!is_allowed(OrderStatus::Pending, Transition::Deliver));
        assert!(!is_allowed(OrderStatus::Confirmed, Transition::Deliver));
        assert!(!is_allowed(OrderStatus::Preparing, Transition::Confirm));
    }

    #[test]
    fn delivery_person_is_assigned_once_after_confirmation() {
        assert!(can_assign_delivery_person(&order(
            OrderStatus::Confirmed,
            None
        )));
        assert!(!can_assign_delivery_person(&order(
            OrderStatus::Confirmed,
            Some("rider")
        )));
        assert!(!can_assign_delivery_person(&order(OrderStatus::Pending, None)));
        assert!(!can_assign_delivery_person(&order(
            OrderStatus::Preparing,
            None
        )));
    }

    #[test]
    fn total_multiplies_price_by_quantity() {
        let lines = vec![
            Line {
                price: BigDecimal::from_str("149.50").unwrap(),
                quantity: 2,
            },
            Line {
                price: BigDecimal::from_str("60.00").unwrap(),
                quantity: 3,
            },
        ];

        assert_eq!(
            compute_total(&lines),
            BigDecimal::from_str("479.00").unwrap()
        );
    }

    #[test]
    fn total_of_nothing_is_zero() {
        assert_eq!(compute_total(&[]), BigDecimal::from(0));
    }
}
