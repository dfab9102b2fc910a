//! Summary, health and API-spec handlers.

use std::path::PathBuf;

use tabled::Tabled;

use networth_api::ApiClient;
use networth_core::{CoreError, HealthStatus, NetWorthSummary};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Summary ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "Class")]
    class: &'static str,
    #[tabled(rename = "Records")]
    records: usize,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Share")]
    share: String,
}

fn summary_detail(summary: &NetWorthSummary, color: bool) -> String {
    let allocation = summary.allocation();
    let shares = allocation.shares();
    let c = &summary.counts;
    let classes = [
        ("Cash", c.cash, summary.cash),
        ("Stocks", c.stocks, summary.stocks),
        ("Crypto", c.crypto, summary.crypto),
        ("Real estate", c.real_estate, summary.real_estate_equity),
        ("Equity", c.equity, summary.equity),
        ("Manual", c.manual, summary.manual),
    ];
    let rows: Vec<ClassRow> = classes
        .into_iter()
        .map(|(class, records, value)| ClassRow {
            class,
            records,
            value: output::money(value),
            share: shares
                .iter()
                .find(|(label, _)| *label == class)
                .map(|(_, pct)| format!("{pct:.1}%"))
                .unwrap_or_default(),
        })
        .collect();
    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();

    let totals = output::detail_block(&[
        ("Total assets", output::money(summary.total_assets)),
        ("Liabilities", output::money(summary.total_liabilities)),
        ("Net worth", output::signed(summary.net_worth, color)),
    ]);
    format!("{table}\n{totals}")
}

pub async fn summary(client: &ApiClient, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = NetWorthSummary::fetch(client).await?;
    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        &summary,
        |s| summary_detail(s, color),
        |s| format!("{:.2}", s.net_worth),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Health ──────────────────────────────────────────────────────────

fn health_detail(health: &HealthStatus, color: bool) -> String {
    let mut pairs = vec![
        ("Status", output::status(&health.status, health.is_healthy(), color)),
        ("Version", health.version.clone().unwrap_or_default()),
    ];
    for (name, service) in health.services() {
        pairs.push((name, output::status(&service.label(), service.is_healthy(), color)));
    }
    output::detail_block(&pairs)
}

pub async fn health(client: &ApiClient, global: &GlobalOpts) -> Result<(), CliError> {
    let health = client.health().await.map_err(CoreError::from)?;
    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        &health,
        |h| health_detail(h, color),
        |h| h.status.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── API spec ────────────────────────────────────────────────────────

pub async fn api_spec(
    client: &ApiClient,
    out: Option<PathBuf>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let spec = client.api_spec_raw().await.map_err(CoreError::from)?;
    match out {
        Some(path) => {
            std::fs::write(&path, &spec)?;
            output::notice(&format!("API spec written to {}", path.display()), global.quiet);
        }
        None => output::print_output(&spec, global.quiet),
    }
    Ok(())
}
