use crate::domain::events::OrderCompleted;
use crate::domain::ports::OrderEventSink;
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Event sink that only reports events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

#[async_trait]
impl OrderEventSink for TracingEventSink {
    async fn order_completed(&self, event: OrderCompleted) -> Result<()> {
        info!(
            order_id = event.order_id,
            payment_id = ?event.payment_id,
            completed_at = %event.completed_at,
            "Order completed"
        );
        Ok(())
    }
}
