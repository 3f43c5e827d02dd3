//! Login, registration, and caller identity

use crate::api::AppState;
use crate::auth::{hash_password, issue_token, verify_password};
use crate::domain::{AuthenticatedUser, EmailAddress, Employee, EmployeeName, Role};
use crate::{Error, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

const MIN_LOGIN_PASSWORD_CHARS: usize = 6;
const MIN_REGISTER_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Employee,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let email = parse_email(request.email)?;
    let password = request
        .password
        .filter(|p| p.len() >= MIN_LOGIN_PASSWORD_CHARS)
        .ok_or_else(|| {
            Error::validation("password", "Password must be at least 6 characters")
        })?;

    let credentials =
        crate::infrastructure::repositories::employees::find_by_email(&state.pool, email.as_ref())
            .await?
            .ok_or_else(|| Error::authentication("Invalid email or password"))?;

    if !verify_password(&password, &credentials.password_hash)? {
        return Err(Error::authentication("Invalid email or password"));
    }

    let token = issue_token(&state.settings.auth, credentials.id, credentials.role)?;
    info!(employee = %credentials.id, "employee logged in");

    Ok(Json(AuthResponse {
        token,
        user: Employee {
            id: credentials.id,
            name: credentials.name,
            email: credentials.email,
            role: credentials.role,
            created_at: credentials.created_at,
        },
    }))
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let name = request
        .name
        .ok_or_else(|| Error::validation("name", "Name is required"))
        .and_then(|name| {
            EmployeeName::try_new(name).map_err(|_| {
                Error::validation("name", "Name must be between 2 and 255 characters")
            })
        })?;
    let email = parse_email(request.email)?;
    let password = request
        .password
        .ok_or_else(|| Error::validation("password", "Password is required"))?;
    validate_password_strength(&password)?;
    let role = request.role.unwrap_or(Role::Employee);

    let password_hash = hash_password(&password)?;
    let employee = crate::infrastructure::repositories::employees::insert(
        &state.pool,
        &name,
        &email,
        &password_hash,
        role,
    )
    .await?;

    let token = issue_token(&state.settings.auth, employee.id, employee.role)?;
    info!(employee = %employee.id, "employee registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user: employee })))
}

pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
        "role": user.role,
    }))
}

fn parse_email(email: Option<String>) -> Result<EmailAddress> {
    email
        .ok_or_else(|| Error::validation("email", "Valid email is required"))
        .and_then(|email| {
            EmailAddress::try_new(email)
                .map_err(|_| Error::validation("email", "Valid email is required"))
        })
}

/// Registration passwords need length plus upper, lower, and digit
fn validate_password_strength(password: &str) -> Result<()> {
    let long_enough = password.len() >= MIN_REGISTER_PASSWORD_CHARS;
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(Error::validation(
            "password",
            "Password must be at least 8 characters and contain uppercase, lowercase, and number",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_strength_rules() {
        assert!(validate_password_strength("Test123456").is_ok());
        assert!(validate_password_strength("short1A").is_err());
        assert!(validate_password_strength("alllowercase1").is_err());
        assert!(validate_password_strength("ALLUPPERCASE1").is_err());
        assert!(validate_password_strength("NoDigitsHere").is_err());
    }

    #[test]
    fn test_email_parsing() {
        assert!(parse_email(None).is_err());
        assert!(parse_email(Some("nope".to_string())).is_err());
        assert!(parse_email(Some("user@example.com".to_string())).is_ok());
    }
}
