pub mod request {
    pub struct Payload {
        pub uidb64: String,
        pub token: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        AccountActivated,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AccountActivated => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Your account has been activated. You can now log in."
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidLink,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidLink => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Activation link is invalid or expired." })),
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
