use crate::domain::{models::service::Service, ports::ServiceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteServiceRepo {
    pool: SqlitePool,
}

impl SqliteServiceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepo {
    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, tenant_id, name, description, duration_min, buffer_min, price,
                                   max_capacity, staff_required, min_advance_hours, max_advance_days,
                                   cancel_notice_hours, cancel_refund_percent, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&service.id)
        .bind(&service.tenant_id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.duration_min)
        .bind(service.buffer_min)
        .bind(service.price)
        .bind(service.max_capacity)
        .bind(service.staff_required)
        .bind(service.min_advance_hours)
        .bind(service.max_advance_days)
        .bind(service.cancel_notice_hours)
        .bind(service.cancel_refund_percent)
        .bind(service.is_active)
        .bind(service.created_at)
        .bind(service.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE tenant_id = ? ORDER BY name")
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "UPDATE services SET name = ?, description = ?, duration_min = ?, buffer_min = ?, price = ?,
                                 max_capacity = ?, staff_required = ?, min_advance_hours = ?,
                                 max_advance_days = ?, cancel_notice_hours = ?, cancel_refund_percent = ?,
                                 is_active = ?, updated_at = ?
             WHERE id = ? AND tenant_id = ?
             RETURNING *",
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.duration_min)
        .bind(service.buffer_min)
        .bind(service.price)
        .bind(service.max_capacity)
        .bind(service.staff_required)
        .bind(service.min_advance_hours)
        .bind(service.max_advance_days)
        .bind(service.cancel_notice_hours)
        .bind(service.cancel_refund_percent)
        .bind(service.is_active)
        .bind(Utc::now())
        .bind(&service.id)
        .bind(&service.tenant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Service not found".into()));
        }
        Ok(())
    }
}
