pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_price};
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;
    use validator::Validate;

    #[derive(TryFromMultipart, Validate)]
    pub struct Body {
        pub restaurant_id: String,
        #[validate(length(min = 1, max = 255, code = "INVALID_NAME"))]
        pub name: String,
        pub description: String,
        #[validate(custom(function = "validate_price"))]
        pub price: String,
        #[validate(range(
            min = 1,
            code = "INVALID_PREPARATION_TIME",
            message = "Preparation time must be at least one minute"
        ))]
        pub preparation_time: i32,
        pub availability: Option<bool>,
        #[form_data(limit = "10MiB")]
        pub picture: Option<FieldData<NamedTempFile>>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{modules::menu_item::repository::MenuItem, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        MenuItemCreated(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemCreated(item) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "success": true,
                        "message": "Menu item created successfully",
                        "menu_item_id": item.id
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        NotRestaurantOwner,
        ImageUploadFailed,
        FailedToCreateMenuItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::NotRestaurantOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You are not the owner of this restaurant" })),
                )
                    .into_response(),
                Self::ImageUploadFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to upload image" })),
                )
                    .into_response(),
                Self::FailedToCreateMenuItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
