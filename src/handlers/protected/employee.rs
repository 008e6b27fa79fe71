use axum::extract::{Extension, Path, State};

use crate::auth::password::{hash_password_blocking, PasswordError};
use crate::database::models::{self, Employee, EmployeePatch, NewEmployee, Validate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AppJson, AuthUser, Message};
use crate::state::AppState;

/// POST /api/employee/createemployee
pub async fn create(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    AppJson(payload): AppJson<NewEmployee>,
) -> ApiResult<Message> {
    payload.validate()?;

    let password_hash = match payload.password.clone() {
        Some(password) => Some(
            hash_password_blocking(password)
                .await
                .map_err(|e| hashing_failed("Failed to create employee", e))?,
        ),
        None => None,
    };

    let employee = payload.into_record(models::new_id(), password_hash, models::now());
    state
        .gateway
        .insert_employee(&employee)
        .await
        .map_err(|e| ApiError::persistence("Failed to create employee", e))?;

    tracing::info!(emp_id = %employee.emp_id, actor = %actor.emp_id, "Employee created");
    Ok(ApiResponse::created(Message::with_id(
        "Employee created successfully",
        employee.emp_id,
    )))
}

/// PUT /api/employee/editemployee/:employeeId
///
/// Partial update: only fields present in the body change. A `password`
/// field is hashed before it is stored. Unknown keys are rejected with 400.
pub async fn edit(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(employee_id): Path<String>,
    AppJson(mut patch): AppJson<EmployeePatch>,
) -> ApiResult<Message> {
    patch.validate()?;

    if let Some(password) = patch.password.take() {
        let hash = hash_password_blocking(password)
            .await
            .map_err(|e| hashing_failed("Failed to update employee", e))?;
        patch.password = Some(hash);
    }

    let matched = state
        .gateway
        .update_employee(&employee_id, &patch, models::now())
        .await
        .map_err(|e| ApiError::persistence("Failed to update employee", e))?;

    if !matched {
        return Err(ApiError::not_found("Employee not found"));
    }

    tracing::info!(emp_id = %employee_id, actor = %actor.emp_id, "Employee updated");
    Ok(ApiResponse::success(Message::new("Employee updated successfully")))
}

/// DELETE /api/employee/deleteemployee/:employeeId
///
/// Idempotent: acknowledges whether or not the employee existed.
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(employee_id): Path<String>,
) -> ApiResult<Message> {
    let removed = state
        .gateway
        .delete_employee(&employee_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to delete employee", e))?;

    tracing::info!(emp_id = %employee_id, actor = %actor.emp_id, removed, "Employee delete");
    Ok(ApiResponse::success(Message::new("Employee deleted successfully")))
}

/// GET /api/employee/employee/:employeeId
pub async fn get(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Employee> {
    let employee = state
        .gateway
        .find_employee(&employee_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to fetch employee", e))?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    Ok(ApiResponse::success(employee))
}

fn hashing_failed(context: &str, err: PasswordError) -> ApiError {
    tracing::error!("{}: {}", context, err);
    ApiError::internal_server_error(context)
}
