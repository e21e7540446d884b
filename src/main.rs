use clap::Parser;
use invoice_payment::application::processor::{Collaborators, ProcessorKey, RequestContext};
use invoice_payment::application::registry::ProcessorRegistry;
use invoice_payment::domain::ports::{OrderStore, StockLedger};
use invoice_payment::i18n::Locale;
use invoice_payment::infrastructure::in_memory::{InMemoryOrderStore, InMemoryStockLedger};
use invoice_payment::infrastructure::log_sink::TracingEventSink;
use invoice_payment::interfaces::csv::order_reader::{OrderLineReader, assemble_orders};
use invoice_payment::interfaces::csv::outcome_writer::{ConfirmationOutcome, OutcomeWriter};
use invoice_payment::logging;
use invoice_payment::settings::ShopSettings;
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, error};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV of confirmed order lines
    input: PathBuf,

    /// Shop settings JSON file (optional)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Locale of the simulated requests; defaults to the shop's default locale
    #[arg(long)]
    locale: Option<String>,

    /// Payment module used to confirm every order
    #[arg(long, default_value = "invoice")]
    module: String,

    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with_level(cli.log_level);

    let settings = match &cli.settings {
        Some(path) => ShopSettings::from_path(path).into_diagnostic()?,
        None => ShopSettings::default(),
    };
    let locale = match &cli.locale {
        Some(raw) => raw.parse::<Locale>().into_diagnostic()?,
        None => settings.default_locale,
    };
    let key: ProcessorKey = cli.module.parse().into_diagnostic()?;

    let orders = Arc::new(InMemoryOrderStore::new());
    let stock = Arc::new(InMemoryStockLedger::new());
    let collaborators = Collaborators {
        orders: orders.clone(),
        stock: stock.clone(),
        events: Arc::new(TracingEventSink),
    };
    let registry = ProcessorRegistry::from_settings(settings, collaborators).into_diagnostic()?;
    let processor = registry
        .get(key)
        .ok_or_else(|| miette!("Payment module '{}' is not enabled", key))?;

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OrderLineReader::new(file);
    let mut lines = Vec::new();
    for line_result in reader.lines() {
        match line_result {
            Ok(line) => lines.push(line),
            Err(e) => error!("Error reading order line: {}", e),
        }
    }

    let request = RequestContext::new(locale);
    let mut outcomes = Vec::new();
    for order_result in assemble_orders(lines) {
        let order = match order_result {
            Ok(order) => order,
            Err(e) => {
                error!("Error assembling order: {}", e);
                continue;
            }
        };

        orders.save_order(order.clone()).await.into_diagnostic()?;
        let redirect = match processor.process_order_confirmed(&request, &order).await {
            Ok(redirect) => redirect,
            Err(e) => {
                error!("Error confirming order {}: {}", order, e);
                continue;
            }
        };

        let order = orders.reload(&order).await.into_diagnostic()?;
        let stock_change = stock
            .transactions_for_order(order.id)
            .await
            .into_diagnostic()?
            .iter()
            .map(|tx| tx.change)
            .sum();
        outcomes.push(ConfirmationOutcome {
            order: order.id,
            status: order.status,
            total: order.total(),
            paid: order.paid,
            stock_change,
            redirect: redirect.target().to_string(),
        });
    }

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());
    writer.write_outcomes(outcomes).into_diagnostic()?;

    Ok(())
}
