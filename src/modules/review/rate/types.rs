pub mod request {
    use crate::modules::{auth::middleware::Auth, review::repository::TargetType};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(range(
            min = 1.0,
            max = 5.0,
            code = "INVALID_RATING",
            message = "Rating must be between 1 and 5"
        ))]
        pub rating: f64,
        #[validate(length(max = 1000, code = "INVALID_COMMENT"))]
        pub comment: Option<String>,
    }

    pub struct Payload {
        pub target_type: TargetType,
        pub target_id: String,
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{modules::review::repository::Review, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        Rated {
            review: Review,
            aggregate: BigDecimal,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Rated { review, aggregate } => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Rating submitted successfully",
                        "rating": aggregate,
                        "review": review
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        OnlyCustomersCanRate,
        TargetNotFound,
        FailedToRate,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::OnlyCustomersCanRate => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only customers can leave ratings" })),
                )
                    .into_response(),
                Self::TargetNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Nothing to rate was found with that id" })),
                )
                    .into_response(),
                Self::FailedToRate => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to submit rating" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
