use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes `orders` single-line orders, each buying `quantity` units at 1.00 CHF.
pub fn generate_orders_csv(path: &Path, orders: u32, quantity: u32) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["order", "currency", "product", "quantity", "unit_price"])?;

    for i in 1..=orders {
        wtr.write_record([
            &i.to_string(),
            "CHF",
            "widget",
            &quantity.to_string(),
            "1.00",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
