use actix_web::{test, web, App};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use taskvault::auth::{AuthMiddleware, Claims};
use taskvault::config::Config;
use taskvault::routes;

const SECRET: &str = "integration-test-secret";

fn test_config() -> Config {
    Config {
        database_url: String::new(),
        server_host: "127.0.0.1".to_string(),
        server_port: 8080,
        auth_secret: SECRET.to_string(),
        token_ttl_days: 7,
    }
}

/// Pool that never connects. Good enough for every request that is rejected
/// before the repository layer is reached.
fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://localhost/taskvault_unreachable")
        .expect("lazy pool")
}

fn encode_claims(claims: &Claims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

macro_rules! test_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new(test_config()))
                .service(
                    web::scope("/api/v1")
                        .wrap(AuthMiddleware::new(SECRET))
                        .configure(routes::config),
                ),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_me_without_token_is_unauthorized() {
    let pool = lazy_pool();
    let app = test_app!(pool);

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_me_with_garbage_token_is_unauthorized() {
    let pool = lazy_pool();
    let app = test_app!(pool);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .append_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_me_with_non_bearer_scheme_is_unauthorized() {
    let pool = lazy_pool();
    let app = test_app!(pool);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .append_header(("Authorization", "Basic YWxpY2U6c2VjcmV0"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_me_with_expired_token_is_unauthorized() {
    let pool = lazy_pool();
    let app = test_app!(pool);

    let expired = encode_claims(&Claims {
        sub: Uuid::new_v4().to_string(),
        email: "alice@example.com".to_string(),
        exp: chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(2))
            .expect("valid timestamp")
            .timestamp() as usize,
    });

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .append_header(("Authorization", format!("Bearer {}", expired)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_me_with_malformed_subject_is_bad_request() {
    let pool = lazy_pool();
    let app = test_app!(pool);

    // A validly signed token whose subject is not a UUID. The gate accepts
    // it; the handler rejects the identifier before touching the repository.
    let token = encode_claims(&Claims {
        sub: "not-a-uuid".to_string(),
        email: "alice@example.com".to_string(),
        exp: chrono::Utc::now()
            .checked_add_signed(chrono::Duration::hours(1))
            .expect("valid timestamp")
            .timestamp() as usize,
    });

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let pool = lazy_pool();
    let app = test_app!(pool);

    let test_cases = vec![
        // Deserialization errors (missing required fields)
        (
            json!({ "name": "Alice", "password": "secret1" }),
            actix_web::http::StatusCode::BAD_REQUEST,
            "missing email",
        ),
        (
            json!({ "email": "alice@example.com", "name": "Alice" }),
            actix_web::http::StatusCode::BAD_REQUEST,
            "missing password",
        ),
        // Validation errors, rejected before any repository access
        (
            json!({ "email": "not-an-email", "password": "secret1" }),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            "invalid email format",
        ),
        (
            json!({ "email": "alice@example.com", "password": "12345" }),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            "password too short",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body_bytes = test::read_body(resp).await;

        assert_eq!(
            status,
            expected_status,
            "Test case failed: {}. Body: {:?}",
            description,
            String::from_utf8_lossy(&body_bytes)
        );
    }
}

// Requires a running Postgres (DATABASE_URL); run with `cargo test -- --ignored`.
#[ignore]
#[actix_rt::test]
async fn test_register_login_me_flow() {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    // Clean up potential leftovers from earlier runs
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind("auth_flow@example.com")
        .execute(&pool)
        .await;

    let app = test_app!(pool);

    // Register
    let register_payload = json!({
        "email": "auth_flow@example.com",
        "name": "Flow Tester",
        "password": "secret1"
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();

    assert_eq!(status, actix_web::http::StatusCode::CREATED);
    assert_eq!(body["email"], "auth_flow@example.com");
    assert_eq!(body["name"], "Flow Tester");
    assert!(body.get("password_hash").is_none(), "hash must never leak");
    let user_id = body["id"].as_str().unwrap().to_string();

    // Duplicate registration fails with 400
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Login with the wrong password fails uniformly
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_form(&[("email", "auth_flow@example.com"), ("password", "wrong")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    // Login with the right password returns a bearer token
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_form(&[("email", "auth_flow@example.com"), ("password", "secret1")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    // Me returns the registered user
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["id"], user_id.as_str());
    assert_eq!(body["email"], "auth_flow@example.com");

    // Clean up
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind("auth_flow@example.com")
        .execute(&pool)
        .await;
}
