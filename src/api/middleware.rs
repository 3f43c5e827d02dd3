//! Request ID and authentication middleware

use crate::api::AppState;
use crate::auth::decode_token;
use crate::domain::{AuthenticatedUser, EmployeeId};
use crate::infrastructure::repositories::employees;
use crate::Error;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Ensures every request carries a unique ID for log correlation; the ID
/// is echoed back on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .unwrap_or_else(Uuid::now_v7);

    let header_value = HeaderValue::from_str(&request_id.to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("00000000-0000-0000-0000-000000000000"));

    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, header_value.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    response
}

/// Bearer-token authentication.
///
/// Decodes the JWT, loads the employee it names, and injects an
/// [`AuthenticatedUser`] extension for downstream handlers. A missing
/// token is a 401; an invalid or expired one is a 403.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Error> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| Error::authentication("Access token required"))?;

    let claims = decode_token(&state.settings.auth, token)?;

    let employee = employees::find_by_id(&state.pool, EmployeeId::new(claims.sub))
        .await?
        .ok_or_else(|| Error::authentication("Invalid token"))?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: employee.id,
        name: employee.name,
        email: employee.email,
        role: employee.role,
    });

    Ok(next.run(request).await)
}
