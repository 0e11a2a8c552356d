use crate::domain::{models::staff::Staff, ports::StaffRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteStaffRepo {
    pool: SqlitePool,
}

impl SqliteStaffRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepository for SqliteStaffRepo {
    async fn create(&self, staff: &Staff) -> Result<Staff, AppError> {
        sqlx::query_as::<_, Staff>(
            "INSERT INTO staff (id, tenant_id, first_name, last_name, email, working_hours_json,
                                breaks_json, service_ids_json, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&staff.id)
        .bind(&staff.tenant_id)
        .bind(&staff.first_name)
        .bind(&staff.last_name)
        .bind(&staff.email)
        .bind(&staff.working_hours_json)
        .bind(&staff.breaks_json)
        .bind(&staff.service_ids_json)
        .bind(staff.is_active)
        .bind(staff.created_at)
        .bind(staff.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Staff>, AppError> {
        sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Staff>, AppError> {
        sqlx::query_as::<_, Staff>(
            "SELECT * FROM staff WHERE tenant_id = ? ORDER BY last_name, first_name",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, staff: &Staff) -> Result<Staff, AppError> {
        sqlx::query_as::<_, Staff>(
            "UPDATE staff SET first_name = ?, last_name = ?, email = ?, working_hours_json = ?,
                              breaks_json = ?, service_ids_json = ?, is_active = ?, updated_at = ?
             WHERE id = ? AND tenant_id = ?
             RETURNING *",
        )
        .bind(&staff.first_name)
        .bind(&staff.last_name)
        .bind(&staff.email)
        .bind(&staff.working_hours_json)
        .bind(&staff.breaks_json)
        .bind(&staff.service_ids_json)
        .bind(staff.is_active)
        .bind(Utc::now())
        .bind(&staff.id)
        .bind(&staff.tenant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM staff WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Staff not found".into()));
        }
        Ok(())
    }
}
