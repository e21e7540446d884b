use super::payment::{OrderPayment, PaymentStatus};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an order. Variants are declared in lifecycle order so that
/// `status < OrderStatus::Completed` reads the same way it does in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Cart,
    Checkout,
    Confirmed,
    Paid,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// One entry of an order's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub notes: String,
    pub created: DateTime<Utc>,
}

/// A customer purchase aggregate.
///
/// `paid` is derived from the order's authorized payments and is only
/// refreshed by the order store when a payment is saved; re-read the order
/// after writing payments to observe the new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub currency: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub paid: Decimal,
    pub status_history: Vec<StatusChange>,
}

impl Order {
    pub fn new(id: u32, currency: impl Into<String>) -> Self {
        Self {
            id,
            currency: currency.into(),
            status: OrderStatus::Cart,
            items: Vec::new(),
            paid: Decimal::ZERO,
            status_history: Vec::new(),
        }
    }

    /// Adds an item, rejecting negative prices and items that would push the
    /// order total past what `Decimal` can represent. Orders built through
    /// this method never overflow in `total()`.
    pub fn add_item(&mut self, item: OrderItem) -> Result<()> {
        if item.unit_price < Decimal::ZERO {
            return Err(PaymentError::ValidationError(format!(
                "Unit price of {} must not be negative",
                item.product
            )));
        }

        self.checked_total()
            .zip(item.checked_line_total())
            .and_then(|(total, line)| total.checked_add(line))
            .ok_or_else(|| {
                PaymentError::ValidationError(format!("Order {} total overflows", self.id))
            })?;

        self.items.push(item);
        Ok(())
    }

    pub fn checked_total(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total.checked_add(item.checked_line_total()?)
        })
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    pub fn balance_remaining(&self) -> Decimal {
        self.total() - self.paid
    }

    /// An order is paid once nothing remains to be paid, which includes
    /// orders whose total is zero.
    pub fn is_paid(&self) -> bool {
        self.balance_remaining() <= Decimal::ZERO
    }

    /// Moves the order to `status` and records the change in the history.
    pub fn update_status(&mut self, status: OrderStatus, notes: impl Into<String>) -> Result<()> {
        if status >= OrderStatus::Checkout && self.items.is_empty() {
            return Err(PaymentError::ValidationError(
                "Cannot proceed to checkout without order items".to_string(),
            ));
        }

        self.status = status;
        self.status_history.push(StatusChange {
            status,
            notes: notes.into(),
            created: Utc::now(),
        });
        Ok(())
    }

    /// Sums the authorized payments made in the order's currency.
    pub fn recalculate_paid(&mut self, payments: &[OrderPayment]) {
        self.paid = payments
            .iter()
            .filter(|p| p.order_id == self.id)
            .filter(|p| p.status == PaymentStatus::Authorized && p.currency == self.currency)
            .map(|p| p.amount)
            .sum();
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O-{:09}", self.id)
    }
}
