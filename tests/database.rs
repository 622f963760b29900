//! Runs against the database named by `DATABASE_URL`:
//! `cargo test --test database -- --ignored`

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use khanadotcom_backend::{
    app::App,
    modules::{
        delivery_person, menu_item,
        order::{self, repository::OrderStatus},
        payment::{self, repository::PaymentStatus},
        restaurant,
        review::{self, repository::TargetType},
        user::{self, repository::UserType},
    },
    types::{
        database, AppContext, AppEnvironment, AuthContext, Context, MailContext, StorageContext,
    },
    utils::password,
};
use serde_json::{json, Value};
use std::{str::FromStr, sync::Arc};
use tower::ServiceExt;
use ulid::Ulid;

const PASSWORD: &str = "Kh4na!delivery";

async fn context() -> Arc<Context> {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let db_conn = database::connect(&database_url).await;
    database::migrate(db_conn.clone()).await;

    Arc::new(Context {
        app: AppContext {
            host: String::from("127.0.0.1"),
            environment: AppEnvironment::Development,
            port: 8000,
            url: String::from("http://127.0.0.1:8000"),
        },
        db_conn,
        auth: AuthContext {
            secret_key: String::from("test-secret"),
        },
        storage: StorageContext {
            api_key: String::from("key"),
            api_secret: String::from("secret"),
            upload_endpoint: String::from("http://127.0.0.1:9/upload"),
            delete_endpoint: String::from("http://127.0.0.1:9/destroy"),
            upload_preset: String::from("preset"),
        },
        mail: MailContext {
            host: String::from("127.0.0.1"),
            sender: String::from("Khana <no-reply@khana.test>"),
            user: String::from("mailer"),
            password: String::from("password"),
        },
    })
}

async fn send(ctx: Arc<Context>, request: Request<Body>) -> (StatusCode, Value) {
    let response = App::new(ctx).router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

fn decimal(raw: &str) -> BigDecimal {
    BigDecimal::from_str(raw).unwrap()
}

async fn create_user(ctx: &Context, user_type: UserType, active: bool) -> user::repository::User {
    let suffix = Ulid::new().to_string().to_lowercase();
    let prefix = user_type.to_string();

    let user = user::repository::create(
        &ctx.db_conn.pool,
        user::repository::CreateUserPayload {
            username: format!("{prefix}-{suffix}"),
            email: format!("{prefix}-{suffix}@khana.test"),
            name: Some(String::from("Test User")),
            phone_number: None,
            address: Some(String::from("12 MG Road, Pune")),
            user_type,
            password_hash: password::hash(PASSWORD).unwrap(),
        },
    )
    .await
    .unwrap();

    if active {
        user::repository::activate(&ctx.db_conn.pool, user.id.clone())
            .await
            .unwrap();
    }

    user
}

async fn sign_in_as(ctx: &Context, user_id: &str) -> String {
    let token = Ulid::new().to_string();
    user::repository::set_access_token(
        &ctx.db_conn.pool,
        user_id.to_string(),
        token.clone(),
        (Utc::now() + Duration::days(1)).naive_utc(),
    )
    .await
    .unwrap();

    token
}

async fn create_restaurant(ctx: &Context) -> restaurant::repository::Restaurant {
    let owner_user = create_user(ctx, UserType::RestaurantOwner, true).await;
    let owner = user::repository::create_restaurant_owner(
        &ctx.db_conn.pool,
        owner_user.id.clone(),
        String::from("234123412346"),
    )
    .await
    .unwrap();

    restaurant::repository::create(
        &ctx.db_conn.pool,
        restaurant::repository::CreateRestaurantPayload {
            owner_id: owner.id,
            name: String::from("Curry Corner"),
            address: String::from("4 FC Road, Pune"),
            phone_number: String::from("9876543210"),
            email: format!("{}@curry.test", Ulid::new().to_string().to_lowercase()),
            description: String::from("North Indian"),
            gst_number: String::from("27AAPFU0939F1ZV"),
            profile_picture: None,
        },
    )
    .await
    .unwrap()
}

async fn create_menu_item(
    ctx: &Context,
    restaurant_id: &str,
    name: &str,
    price: &str,
) -> menu_item::repository::MenuItem {
    menu_item::repository::create(
        &ctx.db_conn.pool,
        menu_item::repository::CreateMenuItemPayload {
            restaurant_id: restaurant_id.to_string(),
            name: name.to_string(),
            description: String::from("House special"),
            price: decimal(price),
            preparation_time: 20,
            availability: true,
            picture: None,
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
#[ignore]
async fn placing_an_order_stores_the_total_and_a_pending_payment() {
    let ctx = context().await;
    let customer = create_user(&ctx, UserType::Customer, true).await;
    let token = sign_in_as(&ctx, &customer.id).await;
    let restaurant = create_restaurant(&ctx).await;
    let biryani = create_menu_item(&ctx, &restaurant.id, "Biryani", "149.50").await;
    let lassi = create_menu_item(&ctx, &restaurant.id, "Lassi", "60.00").await;

    let (status, body) = send(
        ctx.clone(),
        json_request(
            Method::POST,
            &format!("/api/orders/restaurant/{}", restaurant.id),
            Some(&token),
            json!({
                "items": [
                    { "item_id": biryani.id, "quantity": 2 },
                    { "item_id": lassi.id, "quantity": 3 }
                ]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(body["total_amount"].as_str().unwrap()), decimal("479"));

    let order_id = body["order_id"].as_str().unwrap().to_string();
    let order = order::repository::find_by_id(&ctx.db_conn.pool, order_id.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, decimal("479"));
    assert_eq!(order.delivery_address, "12 MG Road, Pune");

    let items = order::repository::find_items_by_order_id(&ctx.db_conn.pool, order_id.clone())
        .await
        .unwrap();
    assert_eq!(items.len(), 2);

    let payment = payment::repository::find_by_order_id(&ctx.db_conn.pool, order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.payment_status, PaymentStatus::Pending);
    assert_eq!(payment.amount, order.total_amount);
}

#[tokio::test]
#[ignore]
async fn status_write_from_a_stale_state_changes_nothing() {
    let ctx = context().await;
    let customer = create_user(&ctx, UserType::Customer, true).await;
    let restaurant = create_restaurant(&ctx).await;
    let placed = order::repository::create(
        &ctx.db_conn.pool,
        order::repository::CreateOrderPayload {
            user_id: customer.id,
            restaurant_id: restaurant.id,
            delivery_address: String::from("12 MG Road, Pune"),
            total_amount: decimal("120.00"),
        },
    )
    .await
    .unwrap();

    let confirm = || order::repository::UpdateStatusPayload {
        from: OrderStatus::Pending,
        to: OrderStatus::Confirmed,
        soft_delete: false,
    };

    let first = order::repository::update_status(&ctx.db_conn.pool, placed.id.clone(), confirm())
        .await
        .unwrap();
    assert_eq!(first.map(|order| order.status), Some(OrderStatus::Confirmed));

    let second = order::repository::update_status(&ctx.db_conn.pool, placed.id.clone(), confirm())
        .await
        .unwrap();
    assert!(second.is_none());

    let reject = order::repository::update_status(
        &ctx.db_conn.pool,
        placed.id.clone(),
        order::repository::UpdateStatusPayload {
            from: OrderStatus::Pending,
            to: OrderStatus::Cancelled,
            soft_delete: true,
        },
    )
    .await
    .unwrap();
    assert!(reject.is_none());

    let stored = order::repository::find_by_id(&ctx.db_conn.pool, placed.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, OrderStatus::Confirmed);
    assert!(!stored.is_deleted);
}

#[tokio::test]
#[ignore]
async fn rating_again_replaces_the_review_and_refreshes_the_aggregate() {
    let ctx = context().await;
    let first_customer = create_user(&ctx, UserType::Customer, true).await;
    let second_customer = create_user(&ctx, UserType::Customer, true).await;
    let restaurant = create_restaurant(&ctx).await;

    let rate = |user_id: String, rating: f64| review::service::RatePayload {
        user_id,
        target_type: TargetType::Restaurant,
        target_id: restaurant.id.clone(),
        rating,
        comment: None,
    };

    let (_, aggregate) = review::service::rate(ctx.clone(), rate(first_customer.id.clone(), 4.0))
        .await
        .unwrap();
    assert_eq!(aggregate, decimal("4"));

    let (_, aggregate) = review::service::rate(ctx.clone(), rate(first_customer.id.clone(), 2.0))
        .await
        .unwrap();
    assert_eq!(aggregate, decimal("2"));

    let ratings = review::repository::find_ratings_by_target(
        &ctx.db_conn.pool,
        TargetType::Restaurant,
        restaurant.id.clone(),
    )
    .await
    .unwrap();
    assert_eq!(ratings.len(), 1);

    let (_, aggregate) = review::service::rate(ctx.clone(), rate(second_customer.id, 5.0))
        .await
        .unwrap();
    assert_eq!(aggregate, decimal("3.50"));

    let stored = restaurant::repository::find_by_id(&ctx.db_conn.pool, restaurant.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.rating, decimal("3.50"));
}

#[tokio::test]
#[ignore]
async fn fifth_failed_sign_in_locks_the_account() {
    let ctx = context().await;
    let customer = create_user(&ctx, UserType::Customer, true).await;

    let attempt = |password: &str| {
        json_request(
            Method::POST,
            "/api/auth/sign-in",
            None,
            json!({ "email": customer.email, "password": password }),
        )
    };

    for _ in 0..4 {
        let (status, _) = send(ctx.clone(), attempt("Wr0ng!password")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // No mail server listens here, so the reset email fails and the lockout still answers.
    let (status, body) = send(ctx.clone(), attempt("Wr0ng!password")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().starts_with("Too many failed login attempts"));

    let (status, body) = send(ctx.clone(), attempt(PASSWORD)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
}

#[tokio::test]
#[ignore]
async fn inactive_delivery_person_is_never_claimed() {
    let ctx = context().await;
    let rider_user = create_user(&ctx, UserType::DeliveryPerson, false).await;
    let rider = delivery_person::repository::create(
        &ctx.db_conn.pool,
        delivery_person::repository::CreateDeliveryPersonPayload {
            user_id: rider_user.id.clone(),
            aadhaar_card_number: String::from("234123412346"),
            vehicle_details: Some(String::from("Scooter")),
        },
    )
    .await
    .unwrap();
    delivery_person::repository::set_rating(&ctx.db_conn.pool, rider.id.clone(), decimal("5.00"))
        .await
        .unwrap();

    let mut tx = ctx.db_conn.pool.begin().await.unwrap();

    // Leave this rider as the only candidate for the rest of the transaction.
    sqlx::query("UPDATE delivery_persons SET availability_status = FALSE WHERE id <> $1")
        .bind(rider.id.clone())
        .execute(&mut *tx)
        .await
        .unwrap();

    let claimed = delivery_person::repository::claim_available(&mut *tx).await.unwrap();
    assert!(claimed.is_none());

    user::repository::activate(&mut *tx, rider_user.id.clone())
        .await
        .unwrap();

    let claimed = delivery_person::repository::claim_available(&mut *tx).await.unwrap();
    assert_eq!(claimed.map(|found| found.id), Some(rider.id));

    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn changing_the_password_ends_the_current_session() {
    let ctx = context().await;
    let customer = create_user(&ctx, UserType::Customer, true).await;
    let token = sign_in_as(&ctx, &customer.id).await;

    let (status, _) = send(
        ctx.clone(),
        json_request(
            Method::POST,
            "/api/auth/change-password",
            Some(&token),
            json!({ "current_password": PASSWORD, "new_password": "N3w!khana-pass" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let stored = user::repository::find_by_id(&ctx.db_conn.pool, customer.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.access_token.is_none());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/users/profile")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(ctx.clone(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
