use crate::domain::events::OrderCompleted;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::payment::OrderPayment;
use crate::domain::ports::{OrderEventSinkRef, OrderStoreRef, StockLedgerRef};
use crate::domain::stock::{StockTransaction, StockTransactionKind, signed_change};
use crate::error::{PaymentError, Result};
use crate::i18n::{Locale, MessageKey, translate};
use crate::settings::ShopSettings;
use async_trait::async_trait;
use chrono::Utc;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{Span, debug, info};
use uuid::Uuid;

/// The payment modules this shop knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorKey {
    Invoice,
}

impl ProcessorKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessorKey::Invoice => "invoice",
        }
    }

    pub fn default_name(&self) -> MessageKey {
        match self {
            ProcessorKey::Invoice => MessageKey::Invoice,
        }
    }
}

impl fmt::Display for ProcessorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessorKey {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "invoice" => Ok(ProcessorKey::Invoice),
            other => Err(PaymentError::UnknownProcessor(other.to_string())),
        }
    }
}

/// Request-scoped data a processor may need to build its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestContext {
    pub locale: Locale,
}

impl RequestContext {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

/// Named destinations a processor can send the customer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    OrderSuccess,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::OrderSuccess => "plata_order_success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
}

impl Redirect {
    pub fn to(route: Route) -> Self {
        Self { route }
    }

    pub fn target(&self) -> &'static str {
        self.route.name()
    }
}

/// One payment method's confirmation flow.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    fn key(&self) -> ProcessorKey;

    fn name(&self, locale: Locale) -> String;

    /// Whether this module may be offered for the given request.
    fn enabled_for_request(&self, _request: &RequestContext) -> bool {
        true
    }

    async fn process_order_confirmed(
        &self,
        request: &RequestContext,
        order: &Order,
    ) -> Result<Redirect>;
}

pub type PaymentProcessorBox = Box<dyn PaymentProcessor>;

/// The persistence and notification ports shared by all processors.
#[derive(Clone)]
pub struct Collaborators {
    pub orders: OrderStoreRef,
    pub stock: StockLedgerRef,
    pub events: OrderEventSinkRef,
}

/// Payment flow helpers shared by every processor.
///
/// Each processor owns its own base, which carries the processor key and the
/// span its log lines are attached to.
pub struct ProcessorBase {
    key: ProcessorKey,
    collaborators: Collaborators,
    settings: Arc<ShopSettings>,
    span: Span,
}

impl ProcessorBase {
    pub fn new(
        key: ProcessorKey,
        collaborators: Collaborators,
        settings: Arc<ShopSettings>,
        span: Span,
    ) -> Self {
        Self {
            key,
            collaborators,
            settings,
            span,
        }
    }

    pub fn key(&self) -> ProcessorKey {
        self.key
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn orders(&self) -> &OrderStoreRef {
        &self.collaborators.orders
    }

    /// Display name, honoring the shop's override for this key.
    pub fn name(&self, locale: Locale) -> String {
        self.settings
            .payment_module_names
            .get(self.key.as_str())
            .cloned()
            .unwrap_or_else(|| translate(self.key.default_name(), locale).to_string())
    }

    pub async fn clear_pending_payments(&self, order: &Order) -> Result<()> {
        let removed = self
            .collaborators
            .orders
            .delete_pending_payments(order.id)
            .await?;
        if removed > 0 {
            debug!(parent: &self.span, %order, removed, "Cleared pending payments");
        }
        Ok(())
    }

    /// Replaces any pending payments of `order` with a fresh one covering the
    /// remaining balance.
    pub async fn create_pending_payment(&self, order: &Order) -> Result<OrderPayment> {
        self.clear_pending_payments(order).await?;

        let name = self.name(self.settings.default_locale);
        let payment = OrderPayment::pending(order, self.key.as_str(), &name);
        self.collaborators
            .orders
            .save_payment(payment.clone())
            .await?;
        Ok(payment)
    }

    /// Records one stock transaction per order item, depleting stock when
    /// `negative` is set. Does nothing when stock tracking is disabled.
    pub async fn create_transactions(
        &self,
        order: &Order,
        notes: &str,
        kind: StockTransactionKind,
        negative: bool,
        payment: Option<&OrderPayment>,
    ) -> Result<Vec<StockTransaction>> {
        if !self.settings.stock_tracking {
            return Ok(Vec::new());
        }

        let mut created = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let tx = StockTransaction {
                id: Uuid::new_v4(),
                product: item.product.clone(),
                order_id: Some(order.id),
                payment_id: payment.map(|p| p.id),
                kind,
                change: signed_change(item.quantity, negative),
                notes: notes.to_string(),
                created: Utc::now(),
            };
            self.collaborators.stock.record(tx.clone()).await?;
            created.push(tx);
        }
        Ok(created)
    }

    /// Marks the order completed and notifies listeners. Orders that are
    /// already completed are left untouched. Pending payments are cleared in
    /// either case.
    pub async fn order_completed(
        &self,
        order: &Order,
        payment: Option<&OrderPayment>,
    ) -> Result<()> {
        let mut current = self.collaborators.orders.reload(order).await?;

        if current.status < OrderStatus::Completed {
            let notes = translate(MessageKey::OrderCompleted, self.settings.default_locale);
            current.update_status(OrderStatus::Completed, notes)?;
            self.collaborators.orders.save_order(current.clone()).await?;

            self.collaborators
                .events
                .order_completed(OrderCompleted {
                    order_id: current.id,
                    payment_id: payment.map(|p| p.id),
                    completed_at: Utc::now(),
                })
                .await?;
        }

        self.clear_pending_payments(&current).await
    }

    /// Handles an order that needs no further payment, e.g. one fully covered
    /// by discounts. Never creates payments or stock transactions.
    pub async fn already_paid(&self, order: &Order) -> Result<Redirect> {
        if order.status < OrderStatus::Completed {
            info!(parent: &self.span, "Order {} is already completely paid", order);
            self.order_completed(order, None).await?;
        }
        Ok(Redirect::to(Route::OrderSuccess))
    }
}
