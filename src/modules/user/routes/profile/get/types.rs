pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::{
        delivery_person::repository::DeliveryPerson,
        user::repository::{CustomerDetail, RestaurantOwner, User},
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(untagged)]
    pub enum Details {
        Customer(CustomerDetail),
        RestaurantOwner(RestaurantOwner),
        DeliveryPerson(DeliveryPerson),
    }

    pub enum Success {
        Profile { user: User, details: Details },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Profile { user, details } => (
                    StatusCode::OK,
                    Json(json!({ "user": user, "profile": details })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        ProfileNotFound,
        FailedToFetchProfile,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProfileNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Profile not found" })),
                )
                    .into_response(),
                Self::FailedToFetchProfile => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch profile" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
