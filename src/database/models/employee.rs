use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require, Validate};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub emp_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    pub employee_email: String,
    pub address: String,
    pub blood_group: String,
    pub emergency_contact_number: String,
    /// Argon2 PHC string; never leaves the server
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/employee/createemployee`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    pub employee_email: String,
    pub address: String,
    pub blood_group: String,
    pub emergency_contact_number: String,
    pub password: Option<String>,
}

impl Validate for NewEmployee {
    fn validate(&self) -> Result<(), ApiError> {
        require("first_name", &self.first_name)?;
        validate_email_format(&self.employee_email)?;
        if let Some(password) = &self.password {
            require("password", password)?;
        }
        Ok(())
    }
}

impl NewEmployee {
    /// Build the persisted record. The password must already be hashed.
    pub fn into_record(
        self,
        emp_id: String,
        password_hash: Option<String>,
        now: DateTime<Utc>,
    ) -> Employee {
        Employee {
            emp_id,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            phone_number: self.phone_number,
            employee_email: self.employee_email,
            address: self.address,
            blood_group: self.blood_group,
            emergency_contact_number: self.emergency_contact_number,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `PUT /api/employee/editemployee/:employeeId`. Absent fields stay untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub employee_email: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact_number: Option<String>,
    /// Plaintext on the wire; replaced by its hash before reaching the gateway
    pub password: Option<String>,
}

impl Validate for EmployeePatch {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(first_name) = &self.first_name {
            require("first_name", first_name)?;
        }
        if let Some(email) = &self.employee_email {
            validate_email_format(email)?;
        }
        if let Some(password) = &self.password {
            require("password", password)?;
        }
        Ok(())
    }
}

/// In-process merge used by the in-memory gateway; Postgres merges with COALESCE.
#[cfg(test)]
impl EmployeePatch {
    pub fn apply(&self, employee: &mut Employee) {
        macro_rules! merge {
            ($($field:ident),*) => {
                $(if let Some(v) = &self.$field { employee.$field = v.clone(); })*
            };
        }
        merge!(
            first_name,
            last_name,
            gender,
            phone_number,
            employee_email,
            address,
            blood_group,
            emergency_contact_number
        );
        if let Some(hash) = &self.password {
            employee.password_hash = Some(hash.clone());
        }
    }
}

/// Employee projection with the number of mappings that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct DashboardEmployee {
    #[serde(rename = "EmpId")]
    pub emp_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    pub employee_email: String,
    pub address: String,
    pub blood_group: String,
    pub emergency_contact_number: String,
    pub asset_count: i64,
}

#[cfg(test)]
impl DashboardEmployee {
    pub fn from_employee(employee: &Employee, asset_count: i64) -> Self {
        Self {
            emp_id: employee.emp_id.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            gender: employee.gender.clone(),
            phone_number: employee.phone_number.clone(),
            employee_email: employee.employee_email.clone(),
            address: employee.address.clone(),
            blood_group: employee.blood_group.clone(),
            emergency_contact_number: employee.emergency_contact_number.clone(),
            asset_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeList {
    #[serde(rename = "EmployeeList")]
    pub employees: Vec<DashboardEmployee>,
}

/// Basic email shape check; empty means "not provided".
pub fn validate_email_format(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Ok(());
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(ApiError::bad_request("Invalid email format")),
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    Ok(())
}
