pub mod request {
    use crate::{
        modules::user::repository::UserType,
        utils::validation::{validate_aadhaar_number, validate_password},
    };
    use chrono::NaiveDate;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(
            min = 1,
            max = 150,
            code = "INVALID_USERNAME",
            message = "Username must be between 1 and 150 characters"
        ))]
        pub username: String,
        pub name: Option<String>,
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Invalid email address"))]
        pub email: String,
        #[validate(custom(function = "validate_password"))]
        pub password: String,
        pub user_type: UserType,
        pub phone_number: Option<String>,
        pub address: Option<String>,
        #[validate(custom(function = "validate_aadhaar_number"))]
        pub aadhaar_number: Option<String>,
        pub vehicle_details: Option<String>,
        pub date_of_birth: Option<NaiveDate>,
    }

    impl Payload {
        pub fn requires_aadhaar_number(&self) -> bool {
            matches!(
                self.user_type,
                UserType::RestaurantOwner | UserType::DeliveryPerson
            )
        }
    }
}

pub mod response {
    use crate::utils::validation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        SignedUp { user_id: String },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedUp { user_id } => (
                    StatusCode::CREATED,
                    Json(json!({
                        "success": true,
                        "message": "Check your email to activate your account",
                        "user_id": user_id
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToFetchUser,
        UsernameAlreadyInUse,
        EmailAlreadyInUse,
        SignupFailed,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::UsernameAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Username already in use" })),
                )
                    .into_response(),
                Self::EmailAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Email already in use" })),
                )
                    .into_response(),
                Self::SignupFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sign up failed!" })),
                )
                    .into_response(),
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sorry an error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
