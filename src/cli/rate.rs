use super::{resolve_pair, ui};
use crate::core::config::DisplayConfig;
use crate::core::{RateClient, RateSnapshot};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

/// Prints the rate for a pair on `date`, today when none is given.
pub async fn run_rate(
    client: &RateClient,
    display: &DisplayConfig,
    from: &str,
    to: &str,
    date: Option<NaiveDate>,
) -> Result<()> {
    let (from, to) = resolve_pair(client, from, to).await?;
    let date = date.unwrap_or_else(|| client.today());

    let pb = ui::new_spinner("Fetching rate");
    let snapshot = client.get_rate_snapshot(date, &from, &to).await;
    pb.finish_and_clear();

    match snapshot {
        Some(snapshot) => println!(
            "{}",
            ui::style_text(
                &describe_snapshot(&snapshot, display.rate_decimals),
                ui::StyleType::Result
            )
        ),
        None => println!(
            "{}",
            ui::style_text(
                &format!("No rate available for {}/{} on {}.", from.code, to.code, date),
                ui::StyleType::Error
            )
        ),
    }
    Ok(())
}

/// Prints yesterday's and today's rate for a pair along with the change.
pub async fn run_change(
    client: &RateClient,
    display: &DisplayConfig,
    from: &str,
    to: &str,
) -> Result<()> {
    let (from, to) = resolve_pair(client, from, to).await?;
    let (today, yesterday) = (client.today(), client.yesterday());

    let pb = ui::new_spinner("Fetching rates");
    let rate_today = client.get_rate_snapshot(today, &from, &to).await;
    let rate_yesterday = client.get_rate_snapshot(yesterday, &from, &to).await;
    pb.finish_and_clear();
    let delta = snapshot_delta(rate_today.as_ref(), rate_yesterday.as_ref());

    println!(
        "{}",
        ui::style_text(
            &format!("{} → {}", from, to),
            ui::StyleType::Title
        )
    );
    println!(
        "{}",
        change_table(
            [(yesterday, rate_yesterday), (today, rate_today)],
            display.rate_decimals
        )
    );
    match delta {
        Some(delta) => println!(
            "Change: {}",
            ui::style_text(
                &ui::format_signed(delta, display.rate_decimals),
                ui::StyleType::Result
            )
        ),
        None => println!(
            "{}",
            ui::style_text(
                "Could not determine the rate change since yesterday.",
                ui::StyleType::Error
            )
        ),
    }
    Ok(())
}

/// Change between the two snapshots, only when both were fetched.
fn snapshot_delta(
    today: Option<&RateSnapshot>,
    yesterday: Option<&RateSnapshot>,
) -> Option<Decimal> {
    Some(today?.rate - yesterday?.rate)
}

fn describe_snapshot(snapshot: &RateSnapshot, decimals: u32) -> String {
    format!(
        "1 {} = {} {} on {}",
        snapshot.from.code,
        ui::format_decimal(snapshot.rate, decimals),
        snapshot.to.code,
        snapshot.date.format("%Y-%m-%d")
    )
}

fn change_table(rows: [(NaiveDate, Option<RateSnapshot>); 2], decimals: u32) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Requested"),
        ui::header_cell("Reported"),
        ui::header_cell("Rate"),
    ]);
    for (requested, snapshot) in rows {
        let requested = Cell::new(requested.format("%Y-%m-%d"));
        match snapshot {
            Some(snapshot) => table.add_row(vec![
                requested,
                Cell::new(snapshot.date.format("%Y-%m-%d")),
                ui::decimal_cell(snapshot.rate, decimals),
            ]),
            None => table.add_row(vec![requested, ui::na_cell(), ui::na_cell()]),
        };
    }
    table
}
