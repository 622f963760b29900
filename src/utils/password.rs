use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use regex::Regex;
use std::fmt;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, PartialEq, Eq)]
pub enum StrengthError {
    TooShort,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSpecialCharacter,
}

impl fmt::Display for StrengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(
                f,
                "Password must be at least {} characters long.",
                MIN_PASSWORD_LENGTH
            ),
            Self::MissingUppercase => {
                write!(f, "Password must contain at least one uppercase letter.")
            }
            Self::MissingLowercase => {
                write!(f, "Password must contain at least one lowercase letter.")
            }
            Self::MissingDigit => write!(f, "Password must contain at least one digit."),
            Self::MissingSpecialCharacter => {
                write!(f, "Password must contain at least one special character.")
            }
        }
    }
}

/// Rules are checked in order and the first one broken is reported.
pub fn check_strength(password: &str) -> Result<(), StrengthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(StrengthError::TooShort);
    }

    let rules = [
        (r"[A-Z]", StrengthError::MissingUppercase),
        (r"[a-z]", StrengthError::MissingLowercase),
        (r"\d", StrengthError::MissingDigit),
        (
            r#"[!@#$%^&*(),.?":{}|<>]"#,
            StrengthError::MissingSpecialCharacter,
        ),
    ];

    for (pattern, err) in rules {
        let regex = Regex::new(pattern).expect("Invalid password rule regex");
        if !regex.is_match(password) {
            return Err(err);
        }
    }

    Ok(())
}

#[derive(Debug)]
pub enum Error {
    HashingFailed,
    Mismatch,
}

pub fn hash(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("Failed to hash password: {}", err);
            Error::HashingFailed
        })
}

pub fn verify(password: &str, hash: &str) -> Result<(), Error> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| Error::Mismatch)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| Error::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_strong_password() {
        assert_eq!(check_strength("Secr3t!"), Ok(()));
    }

    #[test]
    fn reports_the_first_broken_rule() {
        assert_eq!(check_strength("Ab1!"), Err(StrengthError::TooShort));
        assert_eq!(
            check_strength("secret1!"),
            Err(StrengthError::MissingUppercase)
        );
        assert_eq!(
            check_strength("SECRET1!"),
            Err(StrengthError::MissingLowercase)
        );
        assert_eq!(check_strength("Secret!!"), Err(StrengthError::MissingDigit));
        assert_eq!(
            check_strength("Secret12"),
            Err(StrengthError::MissingSpecialCharacter)
        );
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(
            StrengthError::TooShort.to_string(),
            "Password must be at least 6 characters long."
        );
    }

    #[test]
    fn hashed_password_verifies() {
        let hashed = hash("Secr3t!").unwrap();
        assert_ne!(hashed, "Secr3t!");
        assert!(verify("Secr3t!", &hashed).is_ok());
        assert!(verify("Wr0ng!!", &hashed).is_err());
    }

    #[test]
    fn garbage_hash_does_not_verify() {
        assert!(verify("Secr3t!", "not-a-hash").is_err());
    }
}
