use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{
    BookingRepository, CustomerRepository, ServiceRepository, StaffRepository, TenantRepository,
};
use crate::domain::services::lifecycle::BookingService;
use crate::domain::services::slots::SlotGenerator;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tenant_repo: Arc<dyn TenantRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub staff_repo: Arc<dyn StaffRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub booking_service: Arc<BookingService>,
    pub slot_generator: Arc<SlotGenerator>,
}
