pub mod request {
    use crate::utils::validation::validate_password;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(custom(function = "validate_password"))]
        pub new_password: String,
    }

    pub struct Payload {
        pub uidb64: String,
        pub token: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::utils::validation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        PasswordReset,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PasswordReset => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Your password has been reset. You can now log in."
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        InvalidLink,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::InvalidLink => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Password reset link is invalid or expired." })),
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
