use axum::extract::{Extension, Path, State};

use crate::database::models::{self, EmployeeAssetMapping, NewMapping, Validate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AppJson, AuthUser, Message};
use crate::state::AppState;

/// POST /api/mapping/assignassetmapping
///
/// The server assigns the mapping id, sets `assigned_date` to now and the
/// status to "active". Referenced employee and asset are not checked.
pub async fn assign(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    AppJson(payload): AppJson<NewMapping>,
) -> ApiResult<Message> {
    payload.validate()?;

    let mapping = payload.into_record(models::new_id(), models::now());
    state
        .gateway
        .insert_mapping(&mapping)
        .await
        .map_err(|e| ApiError::persistence("Failed to assign asset mapping", e))?;

    tracing::info!(
        mapping_id = %mapping.mapping_id,
        employee_id = %mapping.employee_id,
        asset_id = %mapping.asset_id,
        actor = %actor.emp_id,
        "Asset mapping assigned"
    );
    Ok(ApiResponse::created(Message::with_id(
        "Asset mapping assigned successfully",
        mapping.mapping_id,
    )))
}

/// GET /api/mapping/getallassets/:employeeId
pub async fn list_for_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Vec<EmployeeAssetMapping>> {
    let mappings = state
        .gateway
        .list_mappings_for_employee(&employee_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to fetch mappings", e))?;

    Ok(ApiResponse::success(mappings))
}

/// DELETE /api/mapping/removeassetmapping/:mappingId
pub async fn remove(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(mapping_id): Path<String>,
) -> ApiResult<Message> {
    let removed = state
        .gateway
        .delete_mapping(&mapping_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to remove asset mapping", e))?;

    tracing::info!(mapping_id = %mapping_id, actor = %actor.emp_id, removed, "Asset mapping remove");
    Ok(ApiResponse::success(Message::new("Asset mapping removed successfully")))
}
