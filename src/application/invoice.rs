//! Payment module for invoice handling.
//!
//! Every confirmed order is treated as paid on the spot: the payment is
//! authorized immediately and the order completed, leaving collection of the
//! invoice to the shop owner.

use super::processor::{
    PaymentProcessor, ProcessorBase, ProcessorKey, Redirect, RequestContext, Route,
};
use crate::domain::order::Order;
use crate::domain::stock::StockTransactionKind;
use crate::error::Result;
use crate::i18n::{Locale, MessageKey, translate};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

pub struct InvoiceProcessor {
    base: ProcessorBase,
}

impl InvoiceProcessor {
    pub fn new(base: ProcessorBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl PaymentProcessor for InvoiceProcessor {
    fn key(&self) -> ProcessorKey {
        ProcessorKey::Invoice
    }

    fn name(&self, locale: Locale) -> String {
        self.base.name(locale)
    }

    // No lock is taken between the paid check and the payment write. Two
    // concurrent confirmations of the same order can both pass the check.
    async fn process_order_confirmed(
        &self,
        request: &RequestContext,
        order: &Order,
    ) -> Result<Redirect> {
        if order.is_paid() {
            return self.base.already_paid(order).await;
        }

        info!(parent: self.base.span(), "Processing order {} using Invoice", order);

        let mut payment = self.base.create_pending_payment(order).await?;
        payment.authorize(Utc::now());
        self.base.orders().save_payment(payment.clone()).await?;
        let order = self.base.orders().reload(order).await?;

        self.base
            .create_transactions(
                &order,
                translate(MessageKey::Sale, request.locale),
                StockTransactionKind::Sale,
                true,
                Some(&payment),
            )
            .await?;
        self.base.order_completed(&order, Some(&payment)).await?;

        Ok(Redirect::to(Route::OrderSuccess))
    }
}
