// ── Net-worth summary ──
//
// Aggregates every asset class into the dashboard totals. Values are
// summed as reported; records in different currencies are not converted.

use serde::Serialize;
use tracing::debug;

use networth_api::ApiClient;

use crate::chart::ChartSeries;
use crate::error::CoreError;
use crate::model::{
    AssetKind, AssetRecord, CashHolding, CryptoHolding, EquityGrant, ManualEntry,
    RealEstateProperty, StockHolding,
};
use crate::transform;

/// Totals across all asset classes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetWorthSummary {
    pub cash: f64,
    pub stocks: f64,
    pub crypto: f64,
    /// Current value of all properties (before mortgages).
    pub real_estate: f64,
    /// Property value net of mortgages.
    pub real_estate_equity: f64,
    /// Vested equity compensation.
    pub equity: f64,
    pub manual: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    /// Number of records counted, per class.
    pub counts: SummaryCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub cash: usize,
    pub stocks: usize,
    pub crypto: usize,
    pub real_estate: usize,
    pub equity: usize,
    pub manual: usize,
}

fn sum<T: AssetRecord>(items: &[T]) -> f64 {
    items.iter().map(AssetRecord::market_value).sum()
}

impl NetWorthSummary {
    pub fn from_parts(
        cash: &[CashHolding],
        stocks: &[StockHolding],
        crypto: &[CryptoHolding],
        real_estate: &[RealEstateProperty],
        equity: &[EquityGrant],
        manual: &[ManualEntry],
    ) -> Self {
        let mortgages: f64 = real_estate.iter().map(|p| p.outstanding_mortgage).sum();
        let property_value = sum(real_estate);

        let mut summary = Self {
            cash: sum(cash),
            stocks: sum(stocks),
            crypto: sum(crypto),
            real_estate: property_value,
            real_estate_equity: property_value - mortgages,
            equity: sum(equity),
            manual: sum(manual),
            total_liabilities: mortgages,
            counts: SummaryCounts {
                cash: cash.len(),
                stocks: stocks.len(),
                crypto: crypto.len(),
                real_estate: real_estate.len(),
                equity: equity.len(),
                manual: manual.len(),
            },
            ..Self::default()
        };
        summary.total_assets = summary.cash
            + summary.stocks
            + summary.crypto
            + summary.real_estate
            + summary.equity
            + summary.manual;
        summary.net_worth = summary.total_assets - summary.total_liabilities;
        summary
    }

    /// Allocation of assets by class, for the dashboard chart.
    pub fn allocation(&self) -> ChartSeries {
        let mut series = ChartSeries::new("Allocation");
        series.push("Cash", self.cash);
        series.push("Stocks", self.stocks);
        series.push("Crypto", self.crypto);
        series.push("Real estate", self.real_estate_equity);
        series.push("Equity", self.equity);
        series.push("Manual", self.manual);
        series
    }

    /// Fetch every asset class concurrently and summarize.
    pub async fn fetch(client: &ApiClient) -> Result<Self, CoreError> {
        let (cash, stocks, crypto, real_estate, equity, manual) = tokio::try_join!(
            client.list_resource(AssetKind::Cash.resource()),
            client.list_resource(AssetKind::Stocks.resource()),
            client.list_resource(AssetKind::Crypto.resource()),
            client.list_resource(AssetKind::RealEstate.resource()),
            client.list_resource(AssetKind::Equity.resource()),
            client.list_resource(AssetKind::ManualEntries.resource()),
        )?;
        debug!("fetched all asset classes for summary");

        Ok(Self::from_parts(
            &transform::cash_holdings(&cash),
            &transform::stock_holdings(&stocks),
            &transform::crypto_holdings(&crypto),
            &transform::real_estate(&real_estate),
            &transform::equity_grants(&equity),
            &transform::manual_entries(&manual),
        ))
    }
}
