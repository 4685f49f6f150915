use super::{resolve_pair, ui};
use crate::core::config::DisplayConfig;
use crate::core::{ConversionRequest, RateClient};
use anyhow::Result;
use rust_decimal::Decimal;

/// Converts an amount and reports the day-over-day rate change for the pair.
pub async fn run(
    client: &RateClient,
    display: &DisplayConfig,
    amount: Decimal,
    from: &str,
    to: &str,
) -> Result<()> {
    let (from, to) = resolve_pair(client, from, to).await?;
    let request = ConversionRequest::new(amount, from, to)?;

    let pb = ui::new_spinner("Converting");
    let converted = client
        .convert(request.amount, &request.from, &request.to)
        .await;
    let delta = match converted {
        Some(_) => client.get_rate_delta(&request.from, &request.to).await,
        None => None,
    };
    pb.finish_and_clear();

    for (line, style_type) in report(&request, converted, delta, display) {
        println!("{}", ui::style_text(&line, style_type));
    }
    Ok(())
}

fn report(
    request: &ConversionRequest,
    converted: Option<Decimal>,
    delta: Option<Decimal>,
    display: &DisplayConfig,
) -> Vec<(String, ui::StyleType)> {
    let Some(converted) = converted else {
        return vec![("Conversion failed.".to_string(), ui::StyleType::Error)];
    };

    let mut lines = vec![(
        format!(
            "{} {} = {} {}",
            request.amount.normalize(),
            request.from.code,
            ui::format_decimal(converted, display.amount_decimals),
            request.to.code
        ),
        ui::StyleType::Result,
    )];

    match delta {
        Some(delta) => lines.push((
            format!(
                "Rate change since yesterday: {}",
                ui::format_signed(delta, display.rate_decimals)
            ),
            ui::StyleType::Subtle,
        )),
        None => lines.push((
            "Could not determine the rate change since yesterday.".to_string(),
            ui::StyleType::Error,
        )),
    }
    lines
}
