pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub id: String,
        pub auth: Auth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        UserDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserDeleted => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "message": "User deleted successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        CannotDeleteAnotherUser,
        FailedToDeleteUser,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CannotDeleteAnotherUser => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You can only delete your own account" })),
                )
                    .into_response(),
                Self::FailedToDeleteUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete user" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
