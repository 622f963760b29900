pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(
            min = 1,
            max = 150,
            code = "INVALID_USERNAME",
            message = "Username must be between 1 and 150 characters"
        ))]
        pub username: Option<String>,
        pub name: Option<String>,
        pub phone_number: Option<String>,
        pub address: Option<String>,
        pub vehicle_details: Option<String>,
        pub availability_status: Option<bool>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{modules::user::repository::User, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        ProfileUpdated(User),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProfileUpdated(user) => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Profile updated successfully",
                        "user": user
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        UsernameAlreadyInUse,
        FailedToUpdateProfile,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::UsernameAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Username already in use" })),
                )
                    .into_response(),
                Self::FailedToUpdateProfile => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update profile" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
