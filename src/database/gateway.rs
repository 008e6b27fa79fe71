use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::manager::DatabaseError;
use super::models::{
    Asset, AssetPatch, DashboardEmployee, Employee, EmployeeAssetMapping, EmployeePatch,
};

/// Storage operations behind every controller.
///
/// Updates and deletes are keyed by the business identifier (`emp_id`,
/// `asset_id`, `mapping_id`), never the storage primary key. Updates report
/// whether a record matched; deletes report how many records were removed.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Round-trip liveness probe
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn insert_employee(&self, employee: &Employee) -> Result<(), DatabaseError>;
    async fn update_employee(
        &self,
        emp_id: &str,
        patch: &EmployeePatch,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError>;
    async fn delete_employee(&self, emp_id: &str) -> Result<u64, DatabaseError>;
    async fn find_employee(&self, emp_id: &str) -> Result<Option<Employee>, DatabaseError>;
    /// Match on phone number or email
    async fn find_employee_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Employee>, DatabaseError>;

    async fn insert_asset(&self, asset: &Asset) -> Result<(), DatabaseError>;
    async fn update_asset(
        &self,
        asset_id: &str,
        patch: &AssetPatch,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError>;
    async fn delete_asset(&self, asset_id: &str) -> Result<u64, DatabaseError>;
    async fn find_asset(&self, asset_id: &str) -> Result<Option<Asset>, DatabaseError>;
    async fn list_assets(&self) -> Result<Vec<Asset>, DatabaseError>;

    async fn insert_mapping(&self, mapping: &EmployeeAssetMapping) -> Result<(), DatabaseError>;
    async fn list_mappings_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<EmployeeAssetMapping>, DatabaseError>;
    async fn delete_mapping(&self, mapping_id: &str) -> Result<u64, DatabaseError>;

    /// Employees joined to their mappings, with the mapping count per employee
    async fn dashboard(&self) -> Result<Vec<DashboardEmployee>, DatabaseError>;
}

/// Next `updated_at`: never equal to or earlier than the previous one.
pub fn bump_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + chrono::Duration::microseconds(1);
    if now > floor {
        now
    } else {
        floor
    }
}
