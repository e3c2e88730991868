use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use picasso_db::Database;
use picasso_db::models::UserRow;
use picasso_types::api::{AuthResponse, LoginRequest, SignupRequest};
use picasso_types::models::User;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

const SIGNUP_FORMAT: &str =
    "{ firstName: <string>, lastName: <string>, email: <string>, password: <string> }";
const LOGIN_FORMAT: &str = "{ email: <string>, password: <string> }";

/// Missing-or-empty counts as missing, matching the original API's
/// falsiness check on required properties.
pub(crate) fn require<'a>(
    field: &'a Option<String>,
    name: &str,
    format: &str,
) -> Result<&'a str, ApiError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing(name, format)),
    }
}

pub(crate) fn require_id(field: Option<i64>, name: &str, format: &str) -> Result<i64, ApiError> {
    field.ok_or_else(|| missing(name, format))
}

pub(crate) fn missing(name: &str, format: &str) -> ApiError {
    ApiError::Validation(format!(
        "Expected format: {format}. You are missing a {name} property."
    ))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let first_name = require(&req.first_name, "firstName", SIGNUP_FORMAT)?;
    let last_name = require(&req.last_name, "lastName", SIGNUP_FORMAT)?;
    let email = require(&req.email, "email", SIGNUP_FORMAT)?;
    let password = require(&req.password, "password", SIGNUP_FORMAT)?;

    if state.db.get_user_by_email(email)?.is_some() {
        return Err(ApiError::Conflict("Email has already been taken".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hash failed: {e}"))?
        .to_string();

    let id = state
        .db
        .create_user(first_name, last_name, email, &password_hash)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            first_name: first_name.to_string(),
            id,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = require(&req.email, "email", LOGIN_FORMAT)?;
    let password = require(&req.password, "password", LOGIN_FORMAT)?;

    let user = state
        .db
        .get_user_by_email(email)?
        .ok_or_else(|| ApiError::NotFound("Email not found".into()))?;

    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("stored password hash unreadable: {e}"))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(ApiError::NotFound("Incorrect Password".into()));
    }

    Ok(Json(AuthResponse {
        first_name: user.first_name,
        id: user.id,
    }))
}

/// User wire shape. The password column never leaves the DB layer's row.
pub(crate) fn user_response(row: UserRow) -> User {
    User {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
    }
}
