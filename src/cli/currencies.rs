use super::ui;
use crate::core::{Currency, RateClient};
use anyhow::Result;
use comfy_table::{Cell, Table};

pub async fn run(client: &RateClient) -> Result<()> {
    let pb = ui::new_spinner("Loading currencies");
    let currencies = client.load_currencies().await;
    pb.finish_and_clear();

    if currencies.is_empty() {
        println!(
            "{}",
            ui::style_text("No currencies available.", ui::StyleType::Error)
        );
        return Ok(());
    }

    println!("{}", ui::style_text("Currencies", ui::StyleType::Title));
    println!("{}", currency_table(&currencies));
    println!(
        "{}",
        ui::style_text(
            &format!("{} currencies", currencies.len()),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}

fn currency_table(currencies: &[Currency]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Name")]);
    for currency in currencies {
        table.add_row(vec![Cell::new(&currency.code), Cell::new(&currency.name)]);
    }
    table
}
