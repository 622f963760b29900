pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Invalid email address"))]
        pub email: String,
        #[validate(length(min = 1, code = "REQUIRED", message = "Password is required"))]
        pub password: String,
    }
}

pub mod response {
    use crate::{modules::user::repository::UserType, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        SignedIn {
            access_token: String,
            user_type: UserType,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedIn {
                    access_token,
                    user_type,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "access_token": access_token,
                        "user_type": user_type
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        InvalidCredentials,
        AccountNotActivated,
        TooManyFailedAttempts,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid email or password" })),
                )
                    .into_response(),
                Self::AccountNotActivated => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Account not activated" })),
                )
                    .into_response(),
                Self::TooManyFailedAttempts => (
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "error": "Too many failed login attempts. A password reset link has been sent to your email."
                    })),
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
