pub mod sqlite_booking_repo;
pub mod sqlite_customer_repo;
pub mod sqlite_service_repo;
pub mod sqlite_staff_repo;
pub mod sqlite_tenant_repo;
