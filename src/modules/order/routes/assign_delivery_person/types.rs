pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub id: String,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::{
        delivery_person::repository::DeliveryPerson, order::repository::Order,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        DeliveryPersonAssigned {
            order: Order,
            delivery_person: DeliveryPerson,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DeliveryPersonAssigned {
                    order,
                    delivery_person,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Delivery person assigned",
                        "order_id": order.id,
                        "delivery_person_id": delivery_person.id
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        NotRestaurantOwner,
        OrderNotAssignable,
        NoAvailableDeliveryPerson,
        FailedToAssignDeliveryPerson,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::NotRestaurantOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You are not the owner of this restaurant" })),
                )
                    .into_response(),
                Self::OrderNotAssignable => (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "Only confirmed orders without a delivery person can be assigned one"
                    })),
                )
                    .into_response(),
                Self::NoAvailableDeliveryPerson => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "No available delivery person" })),
                )
                    .into_response(),
                Self::FailedToAssignDeliveryPerson => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to assign a delivery person" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
