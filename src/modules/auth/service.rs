use crate::{
    modules::{
        notification,
        user::{self, repository::User},
    },
    types::Context,
    utils::token::{self, Purpose, Subject},
};
use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;
use ulid::Ulid;

pub const ACCESS_TOKEN_LIFETIME_DAYS: i64 = 7;
pub const MAX_FAILED_LOGIN_ATTEMPTS: i32 = 5;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

fn subject(user: &User) -> Subject<'_> {
    Subject {
        user_id: user.id.as_str(),
        password_hash: user.password_hash.as_str(),
        is_active: user.is_active,
    }
}

fn link(ctx: &Context, path: &str, purpose: Purpose, user: &User) -> String {
    format!(
        "{}/api/auth/{}/{}/{}",
        ctx.app.url.trim_end_matches('/'),
        path,
        token::encode_uid(&user.id),
        token::make(&ctx.auth.secret_key, purpose, &subject(user), now())
    )
}

pub fn activation_link(ctx: &Context, user: &User) -> String {
    link(ctx, "activate", token::ACCOUNT_ACTIVATION, user)
}

pub fn password_reset_link(ctx: &Context, user: &User) -> String {
    link(ctx, "password-reset", token::PASSWORD_RESET, user)
}

pub fn check_activation_token(ctx: &Context, user: &User, raw_token: &str) -> bool {
    token::check(
        &ctx.auth.secret_key,
        token::ACCOUNT_ACTIVATION,
        &subject(user),
        raw_token,
        now(),
    )
}

pub fn check_password_reset_token(ctx: &Context, user: &User, raw_token: &str) -> bool {
    token::check(
        &ctx.auth.secret_key,
        token::PASSWORD_RESET,
        &subject(user),
        raw_token,
        now(),
    )
}

/// Resolves the user an emailed link was issued for.
pub async fn find_user_by_uidb64(ctx: Arc<Context>, uidb64: &str) -> Result<Option<User>, Error> {
    let Some(user_id) = token::decode_uid(uidb64) else {
        return Ok(None);
    };

    user::repository::find_by_id(&ctx.db_conn.pool, user_id)
        .await
        .map(|user| user.filter(|user| !user.is_deleted))
        .map_err(|_| Error::UnexpectedError)
}

/// Returns the user's cached access token while it is live, otherwise issues
/// and caches a fresh one.
pub async fn issue_access_token(ctx: Arc<Context>, user: &User) -> Result<String, Error> {
    let now = now();

    if user::repository::has_live_access_token(user, now) {
        if let Some(access_token) = user.access_token.clone() {
            return Ok(access_token);
        }
    }

    let access_token = Ulid::new().to_string();

    user::repository::set_access_token(
        &ctx.db_conn.pool,
        user.id.clone(),
        access_token.clone(),
        now + Duration::days(ACCESS_TOKEN_LIFETIME_DAYS),
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    Ok(access_token)
}

pub fn is_locked_out(failed_attempts: i32) -> bool {
    failed_attempts >= MAX_FAILED_LOGIN_ATTEMPTS
}

pub async fn send_activation_email(ctx: Arc<Context>, user: User) {
    let link = activation_link(&ctx, &user);
    let user_id = user.id.clone();

    if notification::service::send(
        ctx,
        notification::service::Notification::account_activation(user, link),
    )
    .await
    .is_err()
    {
        tracing::warn!("Activation email for user {} was not sent", user_id);
    }
}

pub async fn send_password_reset_email(
    ctx: Arc<Context>,
    user: User,
) -> Result<(), notification::service::Error> {
    let link = password_reset_link(&ctx, &user);

    notification::service::send(
        ctx,
        notification::service::Notification::password_reset(user, link),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockout_starts_at_the_fifth_failure() {
        assert!(!is_locked_out(1));
        assert!(!is_locked_out(4));
        assert!(is_locked_out(5));
        assert!(is_locked_out(6));
    }
}
