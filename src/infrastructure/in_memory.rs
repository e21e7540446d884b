use crate::domain::events::OrderCompleted;
use crate::domain::order::Order;
use crate::domain::payment::OrderPayment;
use crate::domain::ports::{OrderEventSink, OrderStore, StockLedger};
use crate::domain::stock::StockTransaction;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct OrderTables {
    orders: HashMap<u32, Order>,
    payments: HashMap<u32, Vec<OrderPayment>>,
}

/// A thread-safe in-memory store for orders and their payments.
///
/// Orders and payments live behind a single lock so that saving a payment and
/// refreshing the order's `paid` total happen atomically.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    tables: Arc<RwLock<OrderTables>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save_order(&self, order: Order) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.orders.insert(order.id, order);
        Ok(())
    }

    async fn get_order(&self, order_id: u32) -> Result<Option<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.get(&order_id).cloned())
    }

    async fn save_payment(&self, payment: OrderPayment) -> Result<()> {
        let mut tables = self.tables.write().await;
        let OrderTables { orders, payments } = &mut *tables;

        let order = orders
            .get_mut(&payment.order_id)
            .ok_or(PaymentError::OrderNotFound(payment.order_id))?;

        let order_payments = payments.entry(payment.order_id).or_default();
        match order_payments.iter_mut().find(|p| p.id == payment.id) {
            Some(existing) => *existing = payment,
            None => order_payments.push(payment),
        }

        order.recalculate_paid(order_payments);
        Ok(())
    }

    async fn payments(&self, order_id: u32) -> Result<Vec<OrderPayment>> {
        let tables = self.tables.read().await;
        Ok(tables.payments.get(&order_id).cloned().unwrap_or_default())
    }

    async fn delete_pending_payments(&self, order_id: u32) -> Result<usize> {
        let mut tables = self.tables.write().await;
        let Some(order_payments) = tables.payments.get_mut(&order_id) else {
            return Ok(0);
        };

        let before = order_payments.len();
        order_payments.retain(|p| !p.is_pending());
        Ok(before - order_payments.len())
    }
}

/// A thread-safe in-memory stock ledger.
#[derive(Default, Clone)]
pub struct InMemoryStockLedger {
    transactions: Arc<RwLock<Vec<StockTransaction>>>,
}

impl InMemoryStockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<StockTransaction> {
        self.transactions.read().await.clone()
    }
}

#[async_trait]
impl StockLedger for InMemoryStockLedger {
    async fn record(&self, tx: StockTransaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        transactions.push(tx);
        Ok(())
    }

    async fn transactions_for_order(&self, order_id: u32) -> Result<Vec<StockTransaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .iter()
            .filter(|tx| tx.order_id == Some(order_id))
            .cloned()
            .collect())
    }
}

/// Keeps every published event in memory so callers can inspect them.
#[derive(Default, Clone)]
pub struct RecordingEventSink {
    completed: Arc<RwLock<Vec<OrderCompleted>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn completed(&self) -> Vec<OrderCompleted> {
        self.completed.read().await.clone()
    }
}

#[async_trait]
impl OrderEventSink for RecordingEventSink {
    async fn order_completed(&self, event: OrderCompleted) -> Result<()> {
        self.completed.write().await.push(event);
        Ok(())
    }
}
