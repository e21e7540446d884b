use invoice_payment::application::processor::{
    Collaborators, ProcessorKey, RequestContext, Route,
};
use invoice_payment::application::registry::ProcessorRegistry;
use invoice_payment::domain::order::{Order, OrderItem, OrderStatus};
use invoice_payment::domain::payment::PaymentStatus;
use invoice_payment::domain::ports::{OrderStore, StockLedger};
use invoice_payment::domain::stock::StockTransactionKind;
use invoice_payment::i18n::Locale;
use invoice_payment::infrastructure::in_memory::{
    InMemoryOrderStore, InMemoryStockLedger, RecordingEventSink,
};
use invoice_payment::settings::ShopSettings;
use rust_decimal_macros::dec;
use std::sync::Arc;

struct Shop {
    registry: ProcessorRegistry,
    orders: InMemoryOrderStore,
    stock: InMemoryStockLedger,
    events: RecordingEventSink,
}

fn shop(settings: ShopSettings) -> Shop {
    let orders = InMemoryOrderStore::new();
    let stock = InMemoryStockLedger::new();
    let events = RecordingEventSink::new();
    let collaborators = Collaborators {
        orders: Arc::new(orders.clone()),
        stock: Arc::new(stock.clone()),
        events: Arc::new(events.clone()),
    };
    Shop {
        registry: ProcessorRegistry::from_settings(settings, collaborators).unwrap(),
        orders,
        stock,
        events,
    }
}

async fn place_order(shop: &Shop, id: u32, items: &[(&str, u32, rust_decimal::Decimal)]) -> Order {
    let mut order = Order::new(id, "CHF");
    for (product, quantity, unit_price) in items {
        order.items.push(OrderItem {
            product: product.to_string(),
            quantity: *quantity,
            unit_price: *unit_price,
        });
    }
    order.update_status(OrderStatus::Confirmed, "").unwrap();
    shop.orders.save_order(order.clone()).await.unwrap();
    order
}

#[tokio::test]
async fn test_unpaid_order_flow() {
    let shop = shop(ShopSettings::default());
    let order = place_order(&shop, 1, &[("bike", 1, dec!(899.00))]).await;
    let invoice = shop.registry.get(ProcessorKey::Invoice).unwrap();

    let redirect = invoice
        .process_order_confirmed(&RequestContext::default(), &order)
        .await
        .unwrap();
    assert_eq!(redirect.route, Route::OrderSuccess);
    assert_eq!(redirect.target(), "plata_order_success");

    let payments = shop.orders.payments(1).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].status, PaymentStatus::Authorized);
    assert!(payments[0].authorized.is_some());
    assert_eq!(payments[0].payment_module_key, "invoice");

    let stock = shop.stock.transactions_for_order(1).await.unwrap();
    assert_eq!(stock.len(), 1);
    assert_eq!(stock[0].kind, StockTransactionKind::Sale);
    assert!(stock[0].change < 0);
    assert_eq!(stock[0].payment_id, Some(payments[0].id));

    let completed = shop.events.completed().await;
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].order_id, 1);
    assert_eq!(completed[0].payment_id, Some(payments[0].id));
}

#[tokio::test]
async fn test_multi_item_order_depletes_each_product() {
    let shop = shop(ShopSettings::default());
    let order = place_order(
        &shop,
        1,
        &[("shirt", 2, dec!(25.00)), ("belt", 1, dec!(30.00))],
    )
    .await;

    shop.registry
        .get(ProcessorKey::Invoice)
        .unwrap()
        .process_order_confirmed(&RequestContext::new(Locale::Fr), &order)
        .await
        .unwrap();

    let stock = shop.stock.transactions_for_order(1).await.unwrap();
    let changes: Vec<(String, i64)> = stock
        .iter()
        .map(|tx| (tx.product.clone(), tx.change))
        .collect();
    assert_eq!(
        changes,
        vec![("shirt".to_string(), -2), ("belt".to_string(), -1)]
    );
    assert!(stock.iter().all(|tx| tx.notes == "vente"));

    let stored = shop.orders.reload(&order).await.unwrap();
    assert_eq!(stored.paid, dec!(80.00));
    assert_eq!(stored.status, OrderStatus::Completed);
}

#[tokio::test]
async fn test_paid_order_creates_nothing() {
    let shop = shop(ShopSettings::default());
    let order = place_order(&shop, 1, &[("gift card", 1, dec!(0))]).await;

    let redirect = shop
        .registry
        .get(ProcessorKey::Invoice)
        .unwrap()
        .process_order_confirmed(&RequestContext::default(), &order)
        .await
        .unwrap();

    assert_eq!(redirect.target(), "plata_order_success");
    assert!(shop.orders.payments(1).await.unwrap().is_empty());
    assert!(shop.stock.transactions_for_order(1).await.unwrap().is_empty());

    let completed = shop.events.completed().await;
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].payment_id, None);
}

#[tokio::test]
async fn test_partially_paid_order_invoices_remainder() {
    let shop = shop(ShopSettings::default());
    let order = place_order(&shop, 1, &[("tent", 1, dec!(300.00))]).await;

    // An earlier authorized payment covers part of the order
    let mut deposit = invoice_payment::domain::payment::OrderPayment::pending(
        &order, "invoice", "Invoice",
    );
    deposit.amount = dec!(100.00);
    deposit.authorize(chrono::Utc::now());
    shop.orders.save_payment(deposit).await.unwrap();
    let order = shop.orders.reload(&order).await.unwrap();
    assert!(!order.is_paid());

    shop.registry
        .get(ProcessorKey::Invoice)
        .unwrap()
        .process_order_confirmed(&RequestContext::default(), &order)
        .await
        .unwrap();

    let payments = shop.orders.payments(1).await.unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[1].amount, dec!(200.00));
    assert!(shop.orders.reload(&order).await.unwrap().is_paid());
}

#[tokio::test]
async fn test_display_name_override() {
    let mut settings = ShopSettings::default();
    settings
        .payment_module_names
        .insert("invoice".to_string(), "Bank transfer".to_string());
    let shop = shop(settings);
    let order = place_order(&shop, 1, &[("sofa", 1, dec!(1200.00))]).await;

    let invoice = shop.registry.get(ProcessorKey::Invoice).unwrap();
    assert_eq!(invoice.name(Locale::De), "Bank transfer");

    invoice
        .process_order_confirmed(&RequestContext::default(), &order)
        .await
        .unwrap();
    let payments = shop.orders.payments(1).await.unwrap();
    assert_eq!(payments[0].payment_module, "Bank transfer");
}
