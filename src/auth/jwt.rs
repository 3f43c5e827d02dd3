use crate::config::AuthSettings;
use crate::domain::{EmployeeId, Role};
use crate::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Bearer token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Employee id
    pub sub: i64,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a signed token for an authenticated employee
pub fn issue_token(settings: &AuthSettings, employee_id: EmployeeId, role: Role) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: employee_id.into_inner(),
        role,
        iat: now,
        exp: now + (settings.token_expiry_hours as i64) * 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::internal(format!("Token signing failed: {e}")))
}

/// Decode and validate a bearer token; expiry is enforced here
pub fn decode_token(settings: &AuthSettings, token: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| Error::forbidden("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> AuthSettings {
        AuthSettings {
            jwt_secret: "test-secret".to_string(),
            token_expiry_hours: 1,
        }
    }

    #[test]
    fn test_issue_then_decode_round_trip() {
        let settings = test_settings();
        let token = issue_token(&settings, EmployeeId::new(7), Role::Manager).unwrap();
        let claims = decode_token(&settings, &token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, Role::Manager);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(&test_settings(), EmployeeId::new(7), Role::Employee).unwrap();
        let other = AuthSettings {
            jwt_secret: "different-secret".to_string(),
            token_expiry_hours: 1,
        };
        assert!(decode_token(&other, &token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let settings = test_settings();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 7,
            role: Role::Employee,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
        )
        .unwrap();
        assert!(decode_token(&settings, &token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(decode_token(&test_settings(), "not.a.token").is_err());
    }
}
