//! Application layer: the payment processors and the registry that selects
//! between them.
//!
//! `ProcessorBase` holds the flow helpers every payment method shares; each
//! processor composes one and adds its own confirmation logic.

pub mod invoice;
pub mod processor;
pub mod registry;
