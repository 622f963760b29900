use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Same as `axum::Json`, but a body that cannot be read answers with the
/// `{"error": ..}` shape every other failure uses.
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(into_response(rejection)),
        }
    }
}

pub fn into_response(rejection: JsonRejection) -> Response {
    tracing::warn!("Rejected request body: {}", rejection.body_text());

    let (status, message) = match rejection {
        JsonRejection::JsonSyntaxError(_) => (StatusCode::BAD_REQUEST, "Invalid JSON format."),
        JsonRejection::MissingJsonContentType(_) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected a request body with content type application/json.",
        ),
        JsonRejection::JsonDataError(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Request body has missing or invalid fields.",
        ),
        rejection => (rejection.status(), "Failed to read the request body."),
    };

    (status, axum::Json(json!({ "error": message }))).into_response()
}
