use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockTransactionKind {
    Initial,
    Correction,
    Purchase,
    Sale,
    Returns,
    Reservation,
    Incoming,
    Outgoing,
}

/// Stock change for `quantity` units, negated when stock is being depleted.
pub fn signed_change(quantity: u32, negative: bool) -> i64 {
    let change = i64::from(quantity);
    if negative { -change } else { change }
}

/// A ledger entry adjusting the stock of a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: Uuid,
    pub product: String,
    pub order_id: Option<u32>,
    pub payment_id: Option<Uuid>,
    pub kind: StockTransactionKind,
    pub change: i64,
    pub notes: String,
    pub created: DateTime<Utc>,
}
