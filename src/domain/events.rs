use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Published once an order transitions to `Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCompleted {
    pub order_id: u32,
    /// The payment that completed the order, if any. Orders covered entirely
    /// by discounts complete without one.
    pub payment_id: Option<Uuid>,
    pub completed_at: DateTime<Utc>,
}
