use crate::domain::order::OrderStatus;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Final state of one confirmed order, as reported by the CLI.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct ConfirmationOutcome {
    pub order: u32,
    pub status: OrderStatus,
    pub total: Decimal,
    pub paid: Decimal,
    pub stock_change: i64,
    pub redirect: String,
}

pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes a header followed by one row per outcome. Decimals are
    /// normalized so that `60.00` prints as `60`.
    pub fn write_outcomes(
        &mut self,
        outcomes: impl IntoIterator<Item = ConfirmationOutcome>,
    ) -> Result<()> {
        let mut wrote_any = false;
        for mut outcome in outcomes {
            outcome.total = outcome.total.normalize();
            outcome.paid = outcome.paid.normalize();
            self.writer.serialize(outcome)?;
            wrote_any = true;
        }

        if !wrote_any {
            self.writer
                .write_record(["order", "status", "total", "paid", "stock_change", "redirect"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
