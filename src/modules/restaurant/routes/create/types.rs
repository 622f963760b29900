pub mod request {
    use crate::modules::auth::middleware::Auth;
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;
    use validator::Validate;

    #[derive(TryFromMultipart, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 255, code = "INVALID_NAME"))]
        pub name: String,
        #[validate(length(min = 1, code = "INVALID_ADDRESS"))]
        pub address: String,
        #[validate(length(min = 1, max = 20, code = "INVALID_PHONE_NUMBER"))]
        pub phone_number: String,
        #[validate(email(code = "INVALID_EMAIL", message = "Invalid email address"))]
        pub email: String,
        pub description: String,
        #[validate(length(
            equal = 15,
            code = "INVALID_GST_NUMBER",
            message = "GST number must be 15 characters long"
        ))]
        pub gst_number: String,
        #[form_data(limit = "10MiB")]
        pub profile_picture: Option<FieldData<NamedTempFile>>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::utils::validation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        RestaurantCreated { restaurant_id: String },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantCreated { restaurant_id } => (
                    StatusCode::CREATED,
                    Json(json!({
                        "success": true,
                        "message": "Restaurant created successfully",
                        "restaurant_id": restaurant_id
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        NotARestaurantOwner,
        ImageUploadFailed,
        RestaurantCreationFailed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::NotARestaurantOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only restaurant owners can create restaurants" })),
                )
                    .into_response(),
                Self::ImageUploadFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to upload image" })),
                )
                    .into_response(),
                Self::RestaurantCreationFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Restaurant creation failed" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
