pub mod booking;
pub mod customer;
pub mod interval;
pub mod service;
pub mod staff;
pub mod tenant;
