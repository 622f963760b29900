use crate::modules::user::{self, repository::User};
use crate::types::Context;
use axum::extract::{Extension, FromRequestParts};
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

fn invalid_session() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid session token"})),
    )
        .into_response()
}

async fn get_user_from_token(ctx: Arc<Context>, access_token: String) -> Result<User, Response> {
    let user = user::repository::find_by_access_token(&ctx.db_conn.pool, access_token)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Sorry an error occurred"})),
            )
                .into_response()
        })?
        .ok_or_else(invalid_session)?;

    let now = chrono::Utc::now().naive_utc();

    if user.is_deleted || !user.is_active || !user::repository::has_live_access_token(&user, now) {
        return Err(invalid_session());
    }

    Ok(user)
}

/// An authenticated user, resolved from an `Authorization: Bearer <token>`
/// header.
#[derive(Serialize, Clone)]
pub struct Auth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| {
                tracing::error!("Context extension missing from request: {}", err);
                err.into_response()
            })?;

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| invalid_session())?;

        get_user_from_token(ctx, bearer.token().to_string())
            .await
            .map(|user| Self { user })
    }
}
