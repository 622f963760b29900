use super::{Error, Notification, Result};
use crate::{
    modules::{notification::repository, user::repository::User},
    types::Context,
};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub struct Email {
    pub subject: String,
    pub body: String,
}

fn display_name(user: &User) -> &str {
    user.name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(user.username.as_str())
}

pub fn render(notification: &Notification) -> Email {
    match notification {
        Notification::AccountActivation(n) => Email {
            subject: String::from("Activate your Khana account"),
            body: format!(
                "<p>Hi {},</p>\
                 <p>Thanks for signing up. Please click the link below to activate your account:</p>\
                 <p><a href=\"{link}\">{link}</a></p>\
                 <p>The link expires in 3 days.</p>",
                display_name(&n.user),
                link = n.link
            ),
        },
        Notification::PasswordReset(n) => Email {
            subject: String::from("Reset your Khana password"),
            body: format!(
                "<p>Hi {},</p>\
                 <p>We received a request to reset your password. Use the link below to choose a new one:</p>\
                 <p><a href=\"{link}\">{link}</a></p>\
                 <p>If you did not ask for this, you can ignore this email.</p>",
                display_name(&n.user),
                link = n.link
            ),
        },
    }
}

async fn send_email(ctx: Arc<Context>, user: &User, email: Email) -> Result<()> {
    let from = ctx.mail.sender.parse::<Mailbox>().map_err(|err| {
        tracing::error!("Invalid mail sender {}: {}", ctx.mail.sender, err);
        Error::NotSent
    })?;

    let to = format!("{} <{}>", display_name(user), user.email)
        .parse::<Mailbox>()
        .map_err(|err| {
            tracing::error!("Invalid recipient {}: {}", user.email, err);
            Error::NotSent
        })?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(email.body.clone())
        .map_err(|err| {
            tracing::error!("Failed to build email: {}", err);
            Error::NotSent
        })?;

    let transport: AsyncSmtpTransport<Tokio1Executor> =
        AsyncSmtpTransport::<Tokio1Executor>::relay(&ctx.mail.host)
            .map_err(|err| {
                tracing::error!("Failed to create mail transport: {}", err);
                Error::NotSent
            })?
            .credentials(Credentials::new(
                ctx.mail.user.clone(),
                ctx.mail.password.clone(),
            ))
            .build();

    transport.send(message).await.map_err(|err| {
        tracing::error!("Failed to send email: {}", err);
        Error::NotSent
    })?;

    // a missing log entry must not fail a sent email
    let _ = repository::create_email_log(
        &ctx.db_conn.pool,
        repository::CreateEmailLogPayload {
            subject: email.subject,
            message: email.body,
            recipient: user.email.clone(),
            user_id: Some(user.id.clone()),
        },
    )
    .await;

    Ok(())
}

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    let email = render(&notification);
    send_email(ctx, notification.recipient(), email).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::repository::UserType;
    use chrono::NaiveDate;

    fn user(name: Option<&str>) -> User {
        User {
            id: String::from("01HZY3T1C8P4"),
            username: String::from("asha"),
            email: String::from("asha@example.com"),
            name: name.map(String::from),
            phone_number: None,
            address: None,
            user_type: UserType::Customer,
            password_hash: String::from("hash"),
            is_active: false,
            is_deleted: false,
            access_token: None,
            access_token_expires_at: None,
            profile_picture: None,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn activation_email_carries_the_link() {
        let email = render(&Notification::account_activation(
            user(Some("Asha Rao")),
            String::from("http://localhost:8000/api/auth/activate/uid/token"),
        ));

        assert_eq!(email.subject, "Activate your Khana account");
        assert!(email.body.contains("Hi Asha Rao,"));
        assert!(email
            .body
            .contains("href=\"http://localhost:8000/api/auth/activate/uid/token\""));
    }

    #[test]
    fn greeting_falls_back_to_username() {
        let email = render(&Notification::password_reset(
            user(None),
            String::from("http://localhost:8000/reset"),
        ));

        assert_eq!(email.subject, "Reset your Khana password");
        assert!(email.body.contains("Hi asha,"));
    }
}
