pub mod email;

use crate::{modules::user::repository::User, types::Context};
use std::sync::Arc;

pub mod types {
    use super::User;

    #[derive(Clone)]
    pub struct AccountActivation {
        pub user: User,
        pub link: String,
    }

    #[derive(Clone)]
    pub struct PasswordReset {
        pub user: User,
        pub link: String,
    }
}

#[derive(Clone)]
pub enum Notification {
    AccountActivation(types::AccountActivation),
    PasswordReset(types::PasswordReset),
}

impl Notification {
    pub fn account_activation(user: User, link: String) -> Self {
        Notification::AccountActivation(types::AccountActivation { user, link })
    }

    pub fn password_reset(user: User, link: String) -> Self {
        Notification::PasswordReset(types::PasswordReset { user, link })
    }

    pub fn recipient(&self) -> &User {
        match self {
            Notification::AccountActivation(n) => &n.user,
            Notification::PasswordReset(n) => &n.user,
        }
    }
}

#[derive(Debug)]
pub enum Error {
    NotSent,
}

pub type Result<T> = std::result::Result<T, Error>;

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    email::send(ctx, notification).await
}
