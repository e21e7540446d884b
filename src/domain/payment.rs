use super::order::Order;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Authorized,
}

/// A payment attempt or authorization tied to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayment {
    pub id: Uuid,
    pub order_id: u32,
    pub currency: String,
    pub amount: Decimal,
    /// Key of the payment module that created this payment.
    pub payment_module_key: String,
    /// Human readable name of the payment module at creation time.
    pub payment_module: String,
    pub status: PaymentStatus,
    pub authorized: Option<DateTime<Utc>>,
    pub created: DateTime<Utc>,
}

impl OrderPayment {
    /// Builds a pending payment covering the order's remaining balance.
    pub fn pending(order: &Order, module_key: &str, module_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id: order.id,
            currency: order.currency.clone(),
            amount: order.balance_remaining(),
            payment_module_key: module_key.to_string(),
            payment_module: module_name.to_string(),
            status: PaymentStatus::Pending,
            authorized: None,
            created: Utc::now(),
        }
    }

    pub fn authorize(&mut self, at: DateTime<Utc>) {
        self.status = PaymentStatus::Authorized;
        self.authorized = Some(at);
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}
