pub mod asset;
pub mod employee;
pub mod mapping;

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::error::ApiError;

pub use asset::{Asset, AssetPatch, NewAsset};
pub use employee::{DashboardEmployee, Employee, EmployeeList, EmployeePatch, NewEmployee};
pub use mapping::{EmployeeAssetMapping, NewMapping, STATUS_ACTIVE};

/// Request payload checks run after JSON decoding and before persistence
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{} is required", field)));
    }
    Ok(())
}

/// Fresh business identifier
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time at the precision Postgres stores
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
