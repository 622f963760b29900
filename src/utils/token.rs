//! Stateless, single-use tokens for account activation and password reset.
//!
//! A token is `<issued_at hex>-<hmac hex>`. The mac covers the user id, the
//! current password hash and the activation flag, so a token stops verifying
//! as soon as any of them changes.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, NaiveDateTime};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const ACCOUNT_ACTIVATION: Purpose = Purpose {
    name: "account-activation",
    validity_days: 3,
};

pub const PASSWORD_RESET: Purpose = Purpose {
    name: "password-reset",
    validity_days: 3,
};

#[derive(Clone, Copy)]
pub struct Purpose {
    name: &'static str,
    validity_days: i64,
}

pub struct Subject<'a> {
    pub user_id: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
}

fn mac_for(secret: &str, purpose: Purpose, subject: &Subject, issued_at: i64) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any size");
    mac.update(purpose.name.as_bytes());
    mac.update(b"|");
    mac.update(subject.user_id.as_bytes());
    mac.update(b"|");
    mac.update(subject.password_hash.as_bytes());
    mac.update(b"|");
    mac.update(if subject.is_active { b"1" } else { b"0" });
    mac.update(b"|");
    mac.update(issued_at.to_string().as_bytes());
    mac
}

pub fn make(secret: &str, purpose: Purpose, subject: &Subject, now: NaiveDateTime) -> String {
    let issued_at = now.and_utc().timestamp();
    let signature = mac_for(secret, purpose, subject, issued_at)
        .finalize()
        .into_bytes();

    format!(
        "{:x}-{}",
        issued_at,
        base16ct::lower::encode_string(&signature)
    )
}

pub fn check(
    secret: &str,
    purpose: Purpose,
    subject: &Subject,
    token: &str,
    now: NaiveDateTime,
) -> bool {
    let Some((raw_issued_at, raw_signature)) = token.split_once('-') else {
        return false;
    };

    let Ok(issued_at) = i64::from_str_radix(raw_issued_at, 16) else {
        return false;
    };

    let Ok(signature) = base16ct::lower::decode_vec(raw_signature) else {
        return false;
    };

    if mac_for(secret, purpose, subject, issued_at)
        .verify_slice(&signature)
        .is_err()
    {
        return false;
    }

    let age = now.and_utc().timestamp() - issued_at;
    age >= 0 && age <= Duration::days(purpose.validity_days).num_seconds()
}

/// Encodes a user id for use in an emailed link.
pub fn encode_uid(user_id: &str) -> String {
    URL_SAFE_NO_PAD.encode(user_id.as_bytes())
}

pub fn decode_uid(uidb64: &str) -> Option<String> {
    URL_SAFE_NO_PAD
        .decode(uidb64)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SECRET: &str = "test-secret";

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn subject(is_active: bool, password_hash: &str) -> Subject<'_> {
        Subject {
            user_id: "01HZY3T1C8P4",
            password_hash,
            is_active,
        }
    }

    #[test]
    fn token_verifies_for_the_same_state() {
        let token = make(SECRET, ACCOUNT_ACTIVATION, &subject(false, "h1"), now());
        assert!(check(
            SECRET,
            ACCOUNT_ACTIVATION,
            &subject(false, "h1"),
            &token,
            now() + Duration::hours(1)
        ));
    }

    #[test]
    fn activation_token_is_single_use() {
        let token = make(SECRET, ACCOUNT_ACTIVATION, &subject(false, "h1"), now());
        assert!(!check(
            SECRET,
            ACCOUNT_ACTIVATION,
            &subject(true, "h1"),
            &token,
            now()
        ));
    }

    #[test]
    fn reset_token_dies_with_a_password_change() {
        let token = make(SECRET, PASSWORD_RESET, &subject(true, "h1"), now());
        assert!(!check(
            SECRET,
            PASSWORD_RESET,
            &subject(true, "h2"),
            &token,
            now()
        ));
    }

    #[test]
    fn purposes_are_not_interchangeable() {
        let token = make(SECRET, ACCOUNT_ACTIVATION, &subject(true, "h1"), now());
        assert!(!check(
            SECRET,
            PASSWORD_RESET,
            &subject(true, "h1"),
            &token,
            now()
        ));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let token = make(SECRET, PASSWORD_RESET, &subject(true, "h1"), now());
        assert!(!check(
            SECRET,
            PASSWORD_RESET,
            &subject(true, "h1"),
            &token,
            now() + Duration::days(4)
        ));
    }

    #[test]
    fn malformed_or_tampered_tokens_are_rejected() {
        let token = make(SECRET, PASSWORD_RESET, &subject(true, "h1"), now());
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('0') { '1' } else { '0' });

        for candidate in ["", "nodash", "zz-abcd", tampered.as_str()] {
            assert!(!check(
                SECRET,
                PASSWORD_RESET,
                &subject(true, "h1"),
                candidate,
                now()
            ));
        }
    }

    #[test]
    fn uid_round_trips() {
        let encoded = encode_uid("01HZY3T1C8P4");
        assert_eq!(decode_uid(&encoded).as_deref(), Some("01HZY3T1C8P4"));
        assert_eq!(decode_uid("***"), None);
    }
}
