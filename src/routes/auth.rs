use crate::{
    auth::{
        hash_password, issue_token, verify_password, AuthClaims, LoginForm, RegisterRequest,
        TokenResponse,
    },
    config::Config,
    error::AppError,
    models::UserResponse,
    repository::UserRepository,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
///
/// Creates a new account and returns the user record (never the hash).
/// Duplicate emails are rejected with 400.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let users = UserRepository::new(pool.get_ref().clone());

    if users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::BadRequest(
            "A user with this email already exists".into(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = users
        .create(&payload.email, payload.name.as_deref(), &password_hash)
        .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Login
///
/// Authenticates form-encoded credentials and returns a bearer token.
/// Unknown email and wrong password are indistinguishable.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    form: web::Form<LoginForm>,
) -> Result<impl Responder, AppError> {
    let users = UserRepository::new(pool.get_ref().clone());

    let user = users.find_by_email(&form.email).await?;

    match user {
        Some(user) if verify_password(&form.password, &user.password_hash)? => {
            let token = issue_token(
                &config.auth_secret,
                user.id,
                &user.email,
                config.token_ttl_days,
            )?;
            Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
        }
        _ => Err(AppError::Unauthorized("Incorrect email or password".into())),
    }
}

/// Get the current authenticated user's record.
#[get("/me")]
pub async fn me(
    pool: web::Data<PgPool>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let user_id = Uuid::parse_str(&claims.0.sub)
        .map_err(|_| AppError::BadRequest("Invalid user ID format".into()))?;

    let users = UserRepository::new(pool.get_ref().clone());

    match users.find_by_id(user_id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(UserResponse::from(user))),
        None => Err(AppError::NotFound("User not found".into())),
    }
}
