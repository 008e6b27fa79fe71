use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;

use super::gateway::Gateway;
use super::manager::DatabaseError;
use super::models::{
    Asset, AssetPatch, DashboardEmployee, Employee, EmployeeAssetMapping, EmployeePatch,
};

const EMPLOYEE_COLUMNS: &str = "emp_id, first_name, last_name, gender, phone_number, employee_email, \
     address, blood_group, emergency_contact_number, password_hash, created_at, updated_at";

const ASSET_COLUMNS: &str = "asset_id, asset_name, asset_type, created_at, updated_at";

const MAPPING_COLUMNS: &str = "mapping_id, employee_id, asset_id, assigned_date, status, notes";

const SCHEMA_LOCK_KEY: i64 = 0x656d_705f_6173_7374;

/// Idempotent table bootstrap, one statement per entry
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employee (
        id BIGSERIAL PRIMARY KEY,
        emp_id TEXT NOT NULL UNIQUE,
        first_name TEXT NOT NULL DEFAULT '',
        last_name TEXT NOT NULL DEFAULT '',
        gender TEXT NOT NULL DEFAULT '',
        phone_number TEXT NOT NULL DEFAULT '',
        employee_email TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        blood_group TEXT NOT NULL DEFAULT '',
        emergency_contact_number TEXT NOT NULL DEFAULT '',
        password_hash TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS asset (
        id BIGSERIAL PRIMARY KEY,
        asset_id TEXT NOT NULL UNIQUE,
        asset_name TEXT NOT NULL DEFAULT '',
        asset_type TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS mapping (
        id BIGSERIAL PRIMARY KEY,
        mapping_id TEXT NOT NULL UNIQUE,
        employee_id TEXT NOT NULL,
        asset_id TEXT NOT NULL,
        assigned_date TIMESTAMPTZ NOT NULL,
        status TEXT NOT NULL,
        notes TEXT NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS mapping_employee_id_idx ON mapping (employee_id)",
];

/// Postgres-backed gateway. The pool handles its own connection reuse, so a
/// single instance is shared by every request task.
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Serialized across processes with a transaction-scoped advisory lock,
    /// since concurrent `CREATE TABLE IF NOT EXISTS` can still collide.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!("Database schema ready");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<(), DatabaseError> {
        let sql = format!(
            "INSERT INTO employee ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
            EMPLOYEE_COLUMNS
        );
        sqlx::query(&sql)
            .bind(&employee.emp_id)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(&employee.gender)
            .bind(&employee.phone_number)
            .bind(&employee.employee_email)
            .bind(&employee.address)
            .bind(&employee.blood_group)
            .bind(&employee.emergency_contact_number)
            .bind(&employee.password_hash)
            .bind(employee.created_at)
            .bind(employee.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_employee(
        &self,
        emp_id: &str,
        patch: &EmployeePatch,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE employee SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                gender = COALESCE($3, gender),
                phone_number = COALESCE($4, phone_number),
                employee_email = COALESCE($5, employee_email),
                address = COALESCE($6, address),
                blood_group = COALESCE($7, blood_group),
                emergency_contact_number = COALESCE($8, emergency_contact_number),
                password_hash = COALESCE($9, password_hash),
                updated_at = GREATEST($10, updated_at + INTERVAL '1 microsecond')
            WHERE emp_id = $11
            "#,
        )
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.gender)
        .bind(&patch.phone_number)
        .bind(&patch.employee_email)
        .bind(&patch.address)
        .bind(&patch.blood_group)
        .bind(&patch.emergency_contact_number)
        .bind(&patch.password)
        .bind(now)
        .bind(emp_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_employee(&self, emp_id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM employee WHERE emp_id = $1")
            .bind(emp_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_employee(&self, emp_id: &str) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!("SELECT {} FROM employee WHERE emp_id = $1", EMPLOYEE_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(emp_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn find_employee_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM employee
             WHERE $1 <> '' AND (phone_number = $1 OR employee_email = $1)
             ORDER BY created_at
             LIMIT 1",
            EMPLOYEE_COLUMNS
        );
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn insert_asset(&self, asset: &Asset) -> Result<(), DatabaseError> {
        let sql = format!("INSERT INTO asset ({}) VALUES ($1, $2, $3, $4, $5)", ASSET_COLUMNS);
        sqlx::query(&sql)
            .bind(&asset.asset_id)
            .bind(&asset.asset_name)
            .bind(&asset.asset_type)
            .bind(asset.created_at)
            .bind(asset.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_asset(
        &self,
        asset_id: &str,
        patch: &AssetPatch,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE asset SET
                asset_name = COALESCE($1, asset_name),
                asset_type = COALESCE($2, asset_type),
                updated_at = GREATEST($3, updated_at + INTERVAL '1 microsecond')
            WHERE asset_id = $4
            "#,
        )
        .bind(&patch.asset_name)
        .bind(&patch.asset_type)
        .bind(now)
        .bind(asset_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_asset(&self, asset_id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM asset WHERE asset_id = $1")
            .bind(asset_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_asset(&self, asset_id: &str) -> Result<Option<Asset>, DatabaseError> {
        let sql = format!("SELECT {} FROM asset WHERE asset_id = $1", ASSET_COLUMNS);
        let asset = sqlx::query_as::<_, Asset>(&sql)
            .bind(asset_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(asset)
    }

    async fn list_assets(&self) -> Result<Vec<Asset>, DatabaseError> {
        let sql = format!("SELECT {} FROM asset ORDER BY created_at, id", ASSET_COLUMNS);
        let assets = sqlx::query_as::<_, Asset>(&sql).fetch_all(&self.pool).await?;
        Ok(assets)
    }

    async fn insert_mapping(&self, mapping: &EmployeeAssetMapping) -> Result<(), DatabaseError> {
        let sql = format!("INSERT INTO mapping ({}) VALUES ($1, $2, $3, $4, $5, $6)", MAPPING_COLUMNS);
        sqlx::query(&sql)
            .bind(&mapping.mapping_id)
            .bind(&mapping.employee_id)
            .bind(&mapping.asset_id)
            .bind(mapping.assigned_date)
            .bind(&mapping.status)
            .bind(&mapping.notes)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_mappings_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<EmployeeAssetMapping>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM mapping WHERE employee_id = $1 ORDER BY assigned_date, id",
            MAPPING_COLUMNS
        );
        let mappings = sqlx::query_as::<_, EmployeeAssetMapping>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(mappings)
    }

    async fn delete_mapping(&self, mapping_id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM mapping WHERE mapping_id = $1")
            .bind(mapping_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn dashboard(&self) -> Result<Vec<DashboardEmployee>, DatabaseError> {
        let rows = sqlx::query_as::<_, DashboardEmployee>(
            r#"
            SELECT e.emp_id, e.first_name, e.last_name, e.gender, e.phone_number,
                   e.employee_email, e.address, e.blood_group, e.emergency_contact_number,
                   COUNT(m.id) AS asset_count
            FROM employee e
            LEFT JOIN mapping m ON m.employee_id = e.emp_id
            GROUP BY e.id
            ORDER BY e.created_at, e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
