use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::password::check_password_blocking;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AppJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Phone number or email address
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /login/auth - Exchange phone/email + password for a bearer token
///
/// Unknown identifier, an account without a password, and a wrong password
/// all produce the same 401 so callers cannot probe for accounts.
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let identifier = payload.identifier.trim();

    let employee = state
        .gateway
        .find_employee_by_identifier(identifier)
        .await
        .map_err(|e| ApiError::persistence("Failed to authenticate", e))?;

    let Some(employee) = employee else {
        tracing::warn!("Login failed: no employee matches identifier");
        return Err(invalid_credentials());
    };

    let Some(hash) = employee.password_hash.clone() else {
        tracing::warn!(emp_id = %employee.emp_id, "Login failed: employee has no password set");
        return Err(invalid_credentials());
    };

    let verified = check_password_blocking(payload.password, hash)
        .await
        .map_err(|e| {
            tracing::error!("Password verification failed to run: {}", e);
            ApiError::internal_server_error("Failed to authenticate")
        })?;

    if !verified {
        tracing::warn!(emp_id = %employee.emp_id, "Login failed: password mismatch");
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(&employee.emp_id).map_err(|e| {
        tracing::error!("Token issuance failed: {}", e);
        ApiError::internal_server_error("Failed to authenticate")
    })?;

    tracing::info!(emp_id = %employee.emp_id, "Login succeeded");
    Ok(ApiResponse::success(LoginResponse { token }))
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid credentials")
}
