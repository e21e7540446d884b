use crate::domain::order::{Order, OrderItem, OrderStatus};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// One row of the order CSV: a single item of a confirmed order.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OrderLine {
    pub order: u32,
    pub currency: String,
    pub product: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Reads order lines from a CSV source.
pub struct OrderLineReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderLineReader<R> {
    /// Creates a new `OrderLineReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes order lines.
    pub fn lines(self) -> impl Iterator<Item = Result<OrderLine>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}

/// Groups lines by order id into confirmed orders, keeping the order in which
/// ids first appear. An order whose lines disagree on the currency yields an
/// error in its slot.
pub fn assemble_orders(lines: impl IntoIterator<Item = OrderLine>) -> Vec<Result<Order>> {
    let mut ids = Vec::new();
    let mut grouped: HashMap<u32, Vec<OrderLine>> = HashMap::new();
    for line in lines {
        let group = grouped.entry(line.order).or_insert_with(|| {
            ids.push(line.order);
            Vec::new()
        });
        group.push(line);
    }

    ids.into_iter()
        .map(|id| build_order(id, grouped.remove(&id).unwrap_or_default()))
        .collect()
}

fn build_order(id: u32, lines: Vec<OrderLine>) -> Result<Order> {
    let currency = lines
        .first()
        .map(|line| line.currency.clone())
        .ok_or_else(|| PaymentError::ValidationError(format!("Order {id} has no items")))?;

    let mut order = Order::new(id, currency);
    for line in lines {
        if line.currency != order.currency {
            return Err(PaymentError::ValidationError(format!(
                "Order {id} mixes currencies {} and {}",
                order.currency, line.currency
            )));
        }
        order.add_item(OrderItem {
            product: line.product,
            quantity: line.quantity,
            unit_price: line.unit_price,
        })?;
    }

    order.update_status(OrderStatus::Confirmed, "Imported")?;
    Ok(order)
}
