//! Domain model for orders, payments and stock, plus the ports through which
//! the application layer reaches persistence and notifications.

pub mod events;
pub mod order;
pub mod payment;
pub mod ports;
pub mod stock;
