use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require, Validate};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Asset {
    pub asset_id: String,
    pub asset_name: String,
    pub asset_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewAsset {
    pub asset_name: String,
    pub asset_type: String,
}

impl Validate for NewAsset {
    fn validate(&self) -> Result<(), ApiError> {
        require("asset_name", &self.asset_name)
    }
}

impl NewAsset {
    pub fn into_record(self, asset_id: String, now: DateTime<Utc>) -> Asset {
        Asset {
            asset_id,
            asset_name: self.asset_name,
            asset_type: self.asset_type,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetPatch {
    pub asset_name: Option<String>,
    pub asset_type: Option<String>,
}

impl Validate for AssetPatch {
    fn validate(&self) -> Result<(), ApiError> {
        match &self.asset_name {
            Some(name) => require("asset_name", name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
impl AssetPatch {
    pub fn apply(&self, asset: &mut Asset) {
        if let Some(name) = &self.asset_name {
            asset.asset_name = name.clone();
        }
        if let Some(kind) = &self.asset_type {
            asset.asset_type = kind.clone();
        }
    }
}
