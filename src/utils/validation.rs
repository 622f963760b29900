use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use bigdecimal::{BigDecimal, Zero};
use std::{borrow::Cow, str::FromStr};
use validator::{ValidationError, ValidationErrors};

use super::{aadhaar, password};

pub fn into_response(errors: ValidationErrors) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(json!({"errors": errors}))).into_response()
}

pub fn validate_password(raw: &str) -> Result<(), ValidationError> {
    password::check_strength(raw).map_err(|err| {
        ValidationError::new("WEAK_PASSWORD").with_message(Cow::from(err.to_string()))
    })
}

/// Prices arrive as multipart text; accept positive decimals with at most two places.
pub fn parse_price(raw: &str) -> Option<BigDecimal> {
    let price = BigDecimal::from_str(raw.trim()).ok()?;

    if price <= BigDecimal::zero() || price.with_scale(2) != price {
        return None;
    }

    Some(price.with_scale(2))
}

pub fn validate_price(raw: &str) -> Result<(), ValidationError> {
    match parse_price(raw) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("INVALID_PRICE")
            .with_message(Cow::from("Price must be a positive amount with at most two decimal places."))),
    }
}

pub fn validate_aadhaar_number(raw: &str) -> Result<(), ValidationError> {
    match aadhaar::is_valid(raw) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_AADHAAR_NUMBER")
            .with_message(Cow::from("Invalid Aadhaar number."))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_prices() {
        assert_eq!(parse_price("120"), BigDecimal::from_str("120.00").ok());
        assert_eq!(parse_price(" 99.5 "), BigDecimal::from_str("99.50").ok());
    }

    #[test]
    fn rejects_bad_prices() {
        for raw in ["", "abc", "0", "-4", "1.999"] {
            assert!(parse_price(raw).is_none(), "{raw} should be rejected");
        }
    }
}
