use axum::extract::{Extension, Path, State};

use crate::database::models::{self, Asset, AssetPatch, NewAsset, Validate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AppJson, AuthUser, Message};
use crate::state::AppState;

/// POST /api/asset/createasset
pub async fn create(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    AppJson(payload): AppJson<NewAsset>,
) -> ApiResult<Message> {
    payload.validate()?;

    let asset = payload.into_record(models::new_id(), models::now());
    state
        .gateway
        .insert_asset(&asset)
        .await
        .map_err(|e| ApiError::persistence("Failed to create asset", e))?;

    tracing::info!(asset_id = %asset.asset_id, actor = %actor.emp_id, "Asset created");
    Ok(ApiResponse::created(Message::with_id(
        "Asset created successfully",
        asset.asset_id,
    )))
}

/// PUT /api/asset/editasset/:assetId
pub async fn edit(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(asset_id): Path<String>,
    AppJson(patch): AppJson<AssetPatch>,
) -> ApiResult<Message> {
    patch.validate()?;

    let matched = state
        .gateway
        .update_asset(&asset_id, &patch, models::now())
        .await
        .map_err(|e| ApiError::persistence("Failed to update asset", e))?;

    if !matched {
        return Err(ApiError::not_found("Asset not found"));
    }

    tracing::info!(asset_id = %asset_id, actor = %actor.emp_id, "Asset updated");
    Ok(ApiResponse::success(Message::new("Asset updated successfully")))
}

/// DELETE /api/asset/deleteasset/:assetId
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(asset_id): Path<String>,
) -> ApiResult<Message> {
    let removed = state
        .gateway
        .delete_asset(&asset_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to delete asset", e))?;

    tracing::info!(asset_id = %asset_id, actor = %actor.emp_id, removed, "Asset delete");
    Ok(ApiResponse::success(Message::new("Asset deleted successfully")))
}

/// GET /api/asset/asset/:assetId
pub async fn get(State(state): State<AppState>, Path(asset_id): Path<String>) -> ApiResult<Asset> {
    let asset = state
        .gateway
        .find_asset(&asset_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to fetch asset", e))?
        .ok_or_else(|| ApiError::not_found("Asset not found"))?;

    Ok(ApiResponse::success(asset))
}

/// GET /api/asset/getallasset - every asset, unfiltered and unpaginated
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Asset>> {
    let assets = state
        .gateway
        .list_assets()
        .await
        .map_err(|e| ApiError::persistence("Failed to fetch assets", e))?;

    Ok(ApiResponse::success(assets))
}
