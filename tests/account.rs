//! Runs against a live server started with `cargo run` and a migrated
//! database. Run with `cargo test -- --ignored`.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use ulid::Ulid;

const BASE_URL: &str = "http://localhost:8000/api";

#[derive(Deserialize)]
struct SignUpResponse {
    success: bool,
    user_id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[tokio::test]
#[ignore]
async fn sign_up_then_sign_in_before_activation() {
    let client = Client::new();
    let suffix = Ulid::new().to_string().to_lowercase();
    let email = format!("customer-{suffix}@khana.test");

    let response = client
        .post(format!("{BASE_URL}/auth/sign-up"))
        .json(&json!({
            "username": format!("customer-{suffix}"),
            "email": email,
            "password": "Secr3t!",
            "user_type": "customer",
            "address": "12 MG Road, Bengaluru"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response.json::<SignUpResponse>().await.unwrap();
    assert!(created.success);
    assert!(!created.user_id.is_empty());

    let response = client
        .post(format!("{BASE_URL}/auth/sign-up"))
        .json(&json!({
            "username": format!("other-{suffix}"),
            "email": email,
            "password": "Secr3t!",
            "user_type": "customer"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .post(format!("{BASE_URL}/auth/sign-in"))
        .json(&json!({ "email": email, "password": "Secr3t!" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let error = response.json::<ErrorResponse>().await.unwrap();
    assert!(!error.error.is_empty());
}

#[tokio::test]
#[ignore]
async fn wrong_password_is_unauthorized() {
    let response = Client::new()
        .post(format!("{BASE_URL}/auth/sign-in"))
        .json(&json!({ "email": "nobody@khana.test", "password": "Secr3t!" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
