use crate::domain::models::{
    booking::{Booking, BookingStatus},
    customer::Customer,
    service::Service,
    staff::Staff,
    tenant::Tenant,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, AppError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<Customer, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Customer>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Customer>, AppError>;
    async fn update(&self, customer: &Customer) -> Result<Customer, AppError>;
    /// Tombstones the customer instead of removing the row.
    async fn mark_deleted(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Service>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Service>, AppError>;
    async fn update(&self, service: &Service) -> Result<Service, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn create(&self, staff: &Staff) -> Result<Staff, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Staff>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Staff>, AppError>;
    async fn update(&self, staff: &Staff) -> Result<Staff, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

/// Admin listing filters; all optional, all ANDed, always tenant-scoped.
/// `limit` is clamped to 1..=100 (default 50) by the store.
#[derive(Debug, Default, Clone)]
pub struct BookingQuery {
    pub staff_id: Option<String>,
    pub customer_id: Option<String>,
    pub status: Option<BookingStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of a booking listing plus the unpaged match count.
#[derive(Debug)]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    pub total: i64,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_tenant(
        &self,
        tenant_id: &str,
        query: &BookingQuery,
    ) -> Result<BookingPage, AppError>;
    /// Every booking a customer ever made, unpaged (data export).
    async fn list_by_customer(
        &self,
        tenant_id: &str,
        customer_id: &str,
    ) -> Result<Vec<Booking>, AppError>;
    /// Non-cancelled bookings intersecting `[start, end)` for one staff
    /// bucket: `Some(id)` for that staff member, `None` for the
    /// unassigned bucket (`staff_id IS NULL`), never tenant-wide.
    async fn list_active_in_range(
        &self,
        tenant_id: &str,
        staff_id: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
}
