use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require, Validate};
use crate::error::ApiError;

/// Status given to every freshly assigned mapping
pub const STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeAssetMapping {
    pub mapping_id: String,
    pub employee_id: String,
    pub asset_id: String,
    pub assigned_date: DateTime<Utc>,
    pub status: String,
    pub notes: String,
}

/// Body of `POST /api/mapping/assignassetmapping`. Identifier, date and status are server-assigned.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewMapping {
    pub employee_id: String,
    pub asset_id: String,
    pub notes: String,
}

impl Validate for NewMapping {
    fn validate(&self) -> Result<(), ApiError> {
        require("employee_id", &self.employee_id)?;
        require("asset_id", &self.asset_id)
    }
}

impl NewMapping {
    pub fn into_record(self, mapping_id: String, now: DateTime<Utc>) -> EmployeeAssetMapping {
        EmployeeAssetMapping {
            mapping_id,
            employee_id: self.employee_id,
            asset_id: self.asset_id,
            assigned_date: now,
            status: STATUS_ACTIVE.to_string(),
            notes: self.notes,
        }
    }
}
