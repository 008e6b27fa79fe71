use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::database::gateway::{bump_updated_at, Gateway};
use crate::database::models::{
    Asset, AssetPatch, DashboardEmployee, Employee, EmployeeAssetMapping, EmployeePatch,
};
use crate::database::DatabaseError;

#[derive(Default)]
struct Tables {
    employees: Vec<Employee>,
    assets: Vec<Asset>,
    mappings: Vec<EmployeeAssetMapping>,
}

/// In-process gateway with the same observable behavior as `PgGateway`.
#[derive(Default)]
pub struct MemoryGateway {
    tables: RwLock<Tables>,
    failing: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail like a lost database connection
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::Query("simulated failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check()
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables.employees.iter().any(|e| e.emp_id == employee.emp_id) {
            return Err(DatabaseError::Query(format!("duplicate emp_id {}", employee.emp_id)));
        }
        tables.employees.push(employee.clone());
        Ok(())
    }

    async fn update_employee(
        &self,
        emp_id: &str,
        patch: &EmployeePatch,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(employee) = tables.employees.iter_mut().find(|e| e.emp_id == emp_id) else {
            return Ok(false);
        };
        patch.apply(employee);
        employee.updated_at = bump_updated_at(employee.updated_at, now);
        Ok(true)
    }

    async fn delete_employee(&self, emp_id: &str) -> Result<u64, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.employees.len();
        tables.employees.retain(|e| e.emp_id != emp_id);
        Ok((before - tables.employees.len()) as u64)
    }

    async fn find_employee(&self, emp_id: &str) -> Result<Option<Employee>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.employees.iter().find(|e| e.emp_id == emp_id).cloned())
    }

    async fn find_employee_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Employee>, DatabaseError> {
        self.check()?;
        if identifier.is_empty() {
            return Ok(None);
        }
        let tables = self.tables.read().await;
        Ok(tables
            .employees
            .iter()
            .find(|e| e.phone_number == identifier || e.employee_email == identifier)
            .cloned())
    }

    async fn insert_asset(&self, asset: &Asset) -> Result<(), DatabaseError> {
        self.check()?;
        self.tables.write().await.assets.push(asset.clone());
        Ok(())
    }

    async fn update_asset(
        &self,
        asset_id: &str,
        patch: &AssetPatch,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(asset) = tables.assets.iter_mut().find(|a| a.asset_id == asset_id) else {
            return Ok(false);
        };
        patch.apply(asset);
        asset.updated_at = bump_updated_at(asset.updated_at, now);
        Ok(true)
    }

    async fn delete_asset(&self, asset_id: &str) -> Result<u64, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.assets.len();
        tables.assets.retain(|a| a.asset_id != asset_id);
        Ok((before - tables.assets.len()) as u64)
    }

    async fn find_asset(&self, asset_id: &str) -> Result<Option<Asset>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.assets.iter().find(|a| a.asset_id == asset_id).cloned())
    }

    async fn list_assets(&self) -> Result<Vec<Asset>, DatabaseError> {
        self.check()?;
        Ok(self.tables.read().await.assets.clone())
    }

    async fn insert_mapping(&self, mapping: &EmployeeAssetMapping) -> Result<(), DatabaseError> {
        self.check()?;
        self.tables.write().await.mappings.push(mapping.clone());
        Ok(())
    }

    async fn list_mappings_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<EmployeeAssetMapping>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .mappings
            .iter()
            .filter(|m| m.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn delete_mapping(&self, mapping_id: &str) -> Result<u64, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.mappings.len();
        tables.mappings.retain(|m| m.mapping_id != mapping_id);
        Ok((before - tables.mappings.len()) as u64)
    }

    async fn dashboard(&self) -> Result<Vec<DashboardEmployee>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .employees
            .iter()
            .map(|e| {
                let count = tables.mappings.iter().filter(|m| m.employee_id == e.emp_id).count();
                DashboardEmployee::from_employee(e, count as i64)
            })
            .collect())
    }
}
