pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub id: String,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::order::{
        repository::{Order, OrderStatus},
        service::TransitionError,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        OrderDelivered(Order),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderDelivered(order) => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Order delivered",
                        "order_id": order.id,
                        "status": order.status
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        NotAssignedDeliveryPerson,
        InvalidTransition(OrderStatus),
        OrderChangedConcurrently,
        FailedToUpdateOrder,
    }

    impl From<TransitionError> for Error {
        fn from(err: TransitionError) -> Self {
            match err {
                TransitionError::OrderNotFound => Self::OrderNotFound,
                TransitionError::Forbidden => Self::NotAssignedDeliveryPerson,
                TransitionError::InvalidTransition(status) => Self::InvalidTransition(status),
                TransitionError::Conflict => Self::OrderChangedConcurrently,
                TransitionError::UnexpectedError => Self::FailedToUpdateOrder,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::NotAssignedDeliveryPerson => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "This order is not assigned to you" })),
                )
                    .into_response(),
                Self::InvalidTransition(status) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("Only orders being prepared can be delivered, this order is {status}") })),
                )
                    .into_response(),
                Self::OrderChangedConcurrently => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "The order was updated by another request" })),
                )
                    .into_response(),
                Self::FailedToUpdateOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update order" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

#[cfg(test)]
mod tests {
    use super::response::Error;
    use crate::modules::order::repository::OrderStatus;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    #[tokio::test]
    async fn invalid_transition_names_the_current_status() {
        let response = Error::InvalidTransition(OrderStatus::Pending).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice::<Value>(&bytes).unwrap();
        assert_eq!(
            body["error"],
            "Only orders being prepared can be delivered, this order is pending"
        );
    }
}
