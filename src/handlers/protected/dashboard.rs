use axum::extract::State;

use crate::database::models::EmployeeList;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/dashboard - employees with the number of mappings each holds
pub async fn list(State(state): State<AppState>) -> ApiResult<EmployeeList> {
    let employees = state
        .gateway
        .dashboard()
        .await
        .map_err(|e| ApiError::persistence("Failed to fetch employees", e))?;

    Ok(ApiResponse::success(EmployeeList { employees }))
}
