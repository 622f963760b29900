pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::{Deserialize, Serialize};
    use validator::Validate;

    #[derive(Deserialize, Serialize, Validate)]
    pub struct Item {
        pub item_id: String,
        #[validate(range(
            min = 1,
            code = "INVALID_QUANTITY",
            message = "Quantity must be at least 1"
        ))]
        pub quantity: i32,
    }

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(
            length(min = 1, code = "EMPTY_ORDER", message = "An order needs at least one item"),
            nested
        )]
        pub items: Vec<Item>,
    }

    pub struct Payload {
        pub restaurant_id: String,
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::utils::validation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OrderPlaced {
            user_id: String,
            restaurant_id: String,
            order_id: String,
            total_amount: BigDecimal,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderPlaced {
                    user_id,
                    restaurant_id,
                    order_id,
                    total_amount,
                } => (
                    StatusCode::CREATED,
                    Json(json!({
                        "success": true,
                        "user_id": user_id,
                        "restaurant_id": restaurant_id,
                        "order_id": order_id,
                        "total_amount": total_amount
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        OnlyCustomersCanOrder,
        RestaurantNotFound,
        MenuItemNotFound(String),
        MenuItemUnavailable(String),
        MissingDeliveryAddress,
        FailedToPlaceOrder,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::OnlyCustomersCanOrder => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only customers can place orders" })),
                )
                    .into_response(),
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::MenuItemNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": format!("Menu item {id} not found in this restaurant") })),
                )
                    .into_response(),
                Self::MenuItemUnavailable(name) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("{name} is currently unavailable") })),
                )
                    .into_response(),
                Self::MissingDeliveryAddress => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Add an address to your profile before ordering" })),
                )
                    .into_response(),
                Self::FailedToPlaceOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to place order" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

#[cfg(test)]
mod tests {
    use super::request::{Body, Item};
    use validator::Validate;

    fn item(quantity: i32) -> Item {
        Item {
            item_id: String::from("01HZY3T1C8P5"),
            quantity,
        }
    }

    #[test]
    fn order_needs_at_least_one_item() {
        let errors = Body { items: vec![] }.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn quantities_start_at_one() {
        assert!(Body {
            items: vec![item(2), item(0)]
        }
        .validate()
        .is_err());
        assert!(Body {
            items: vec![item(1), item(3)]
        }
        .validate()
        .is_ok());
    }
}
