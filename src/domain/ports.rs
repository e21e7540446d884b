use super::events::OrderCompleted;
use super::order::Order;
use super::payment::OrderPayment;
use super::stock::StockTransaction;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence for orders and their payments.
///
/// Saving a payment refreshes the owning order's `paid` total; callers that
/// hold an `Order` must `reload` it to see the new value.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn save_order(&self, order: Order) -> Result<()>;
    async fn get_order(&self, order_id: u32) -> Result<Option<Order>>;
    async fn save_payment(&self, payment: OrderPayment) -> Result<()>;
    async fn payments(&self, order_id: u32) -> Result<Vec<OrderPayment>>;
    /// Deletes the order's pending payments and returns how many were removed.
    async fn delete_pending_payments(&self, order_id: u32) -> Result<usize>;

    /// Returns a fresh copy of `order` as currently persisted.
    async fn reload(&self, order: &Order) -> Result<Order> {
        self.get_order(order.id)
            .await?
            .ok_or(PaymentError::OrderNotFound(order.id))
    }
}

#[async_trait]
pub trait StockLedger: Send + Sync {
    async fn record(&self, tx: StockTransaction) -> Result<()>;
    async fn transactions_for_order(&self, order_id: u32) -> Result<Vec<StockTransaction>>;
}

/// Receives order lifecycle notifications.
#[async_trait]
pub trait OrderEventSink: Send + Sync {
    async fn order_completed(&self, event: OrderCompleted) -> Result<()>;
}

pub type OrderStoreRef = Arc<dyn OrderStore>;
pub type StockLedgerRef = Arc<dyn StockLedger>;
pub type OrderEventSinkRef = Arc<dyn OrderEventSink>;
