//! Table rows and detail views for each record type.

use chrono::{DateTime, NaiveDate, Utc};
use tabled::Tabled;

use networth_core::{
    AssetCategory, AssetRecord, CashHolding, CryptoHolding, EquityGrant, ManualEntry,
    RealEstateProperty, StockHolding,
};

use crate::output::{money, opt, signed};

/// How one record type is shown by `list` and `show`.
pub trait RecordView: AssetRecord {
    type Row: Tabled;

    fn row(&self, color: bool) -> Self::Row;

    /// Labeled fields for the detail view, in display order.
    fn detail(&self) -> Vec<(&'static str, String)>;
}

fn date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Timestamps are shown in UTC to the minute.
fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default()
}

// ── Cash ────────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct CashRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Institution")]
    institution: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "APY %")]
    rate: String,
}

impl RecordView for CashHolding {
    type Row = CashRow;

    fn row(&self, _color: bool) -> CashRow {
        CashRow {
            id: self.id.get(),
            institution: self.institution_name.clone(),
            account: self.account_name.clone(),
            account_type: self.account_type.clone(),
            balance: money(self.current_balance),
            rate: opt(self.interest_rate),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Institution", self.institution_name.clone()),
            ("Account", self.account_name.clone()),
            ("Type", self.account_type.clone()),
            ("Balance", format!("{} {}", money(self.current_balance), self.currency)),
            ("Interest rate", opt(self.interest_rate)),
            ("Notes", self.notes.clone().unwrap_or_default()),
            ("Updated", timestamp(self.updated_at)),
        ]
    }
}

// ── Stocks ──────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct StockRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Shares")]
    shares: f64,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Gain")]
    gain: String,
}

impl RecordView for StockHolding {
    type Row = StockRow;

    fn row(&self, color: bool) -> StockRow {
        StockRow {
            id: self.id.get(),
            symbol: self.symbol.clone(),
            company: self.company_name.clone().unwrap_or_default(),
            shares: self.shares_owned,
            price: self.current_price.map(money).unwrap_or_default(),
            value: money(self.market_value()),
            gain: self
                .unrealized_gain()
                .map(|g| signed(g, color))
                .unwrap_or_default(),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Symbol", self.symbol.clone()),
            ("Company", self.company_name.clone().unwrap_or_default()),
            ("Shares", self.shares_owned.to_string()),
            ("Cost basis", self.cost_basis.map(money).unwrap_or_default()),
            ("Price", self.current_price.map(money).unwrap_or_default()),
            ("Value", format!("{} {}", money(self.market_value()), self.currency)),
            ("Gain", self.unrealized_gain().map(money).unwrap_or_default()),
            ("Institution", self.institution_name.clone().unwrap_or_default()),
            ("Updated", timestamp(self.updated_at)),
        ]
    }
}

// ── Crypto ──────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct CryptoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Balance")]
    balance: f64,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Where")]
    location: String,
}

impl RecordView for CryptoHolding {
    type Row = CryptoRow;

    fn row(&self, _color: bool) -> CryptoRow {
        CryptoRow {
            id: self.id.get(),
            symbol: self.symbol.clone(),
            balance: self.balance_tokens,
            price: self.current_price.map(money).unwrap_or_default(),
            value: money(self.market_value()),
            location: self
                .institution_name
                .clone()
                .or_else(|| self.wallet_address.clone())
                .unwrap_or_default(),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Symbol", self.symbol.clone()),
            ("Name", self.name.clone().unwrap_or_default()),
            ("Balance", self.balance_tokens.to_string()),
            ("Purchase price", self.purchase_price.map(money).unwrap_or_default()),
            ("Price", self.current_price.map(money).unwrap_or_default()),
            ("Value", format!("{} {}", money(self.market_value()), self.currency)),
            ("Institution", self.institution_name.clone().unwrap_or_default()),
            ("Wallet", self.wallet_address.clone().unwrap_or_default()),
            ("Updated", timestamp(self.updated_at)),
        ]
    }
}

// ── Real estate ─────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct PropertyRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    property_type: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Mortgage")]
    mortgage: String,
    #[tabled(rename = "Equity")]
    equity: String,
}

impl RecordView for RealEstateProperty {
    type Row = PropertyRow;

    fn row(&self, color: bool) -> PropertyRow {
        PropertyRow {
            id: self.id.get(),
            name: self.property_name.clone(),
            property_type: self.property_type.clone(),
            value: money(self.current_value),
            mortgage: money(self.outstanding_mortgage),
            equity: signed(self.equity(), color),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.property_name.clone()),
            ("Type", self.property_type.clone()),
            ("Address", self.address.clone().unwrap_or_default()),
            ("Purchased", date(self.purchase_date)),
            ("Purchase price", money(self.purchase_price)),
            ("Value", format!("{} {}", money(self.current_value), self.currency)),
            ("Mortgage", money(self.outstanding_mortgage)),
            ("Equity", money(self.equity())),
            ("Appreciation", money(self.appreciation())),
        ]
    }
}

// ── Equity ──────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct GrantRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Type")]
    grant_type: String,
    #[tabled(rename = "Vested")]
    vested: String,
    #[tabled(rename = "Spread")]
    spread: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl RecordView for EquityGrant {
    type Row = GrantRow;

    fn row(&self, _color: bool) -> GrantRow {
        GrantRow {
            id: self.id.get(),
            company: self.company_symbol.clone(),
            grant_type: self.grant_type.to_uppercase(),
            vested: format!(
                "{}/{} ({:.0}%)",
                self.shares_vested,
                self.shares_granted,
                self.vested_fraction() * 100.0
            ),
            spread: money(self.spread()),
            value: money(self.market_value()),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Company", self.company_symbol.clone()),
            ("Type", self.grant_type.to_uppercase()),
            ("Granted", self.shares_granted.to_string()),
            ("Vested", self.shares_vested.to_string()),
            ("Unvested", self.unvested_shares().to_string()),
            ("Strike", money(self.strike_price)),
            ("Price", self.current_price.map(money).unwrap_or_default()),
            ("Vested value", money(self.market_value())),
            ("Grant date", date(self.grant_date)),
            ("Vest start", date(self.vest_start_date)),
        ]
    }
}

// ── Manual entries ──────────────────────────────────────────────────

#[derive(Tabled)]
pub struct EntryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Type")]
    entry_type: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl RecordView for ManualEntry {
    type Row = EntryRow;

    fn row(&self, color: bool) -> EntryRow {
        EntryRow {
            id: self.id.get(),
            entry_type: self.entry_type.clone(),
            description: self.display_name(),
            category: opt(self.category_id),
            amount: signed(self.amount, color),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("ID", self.id.to_string()),
            ("Type", self.entry_type.clone()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Account", opt(self.account_id)),
            ("Category", opt(self.category_id)),
            ("Amount", money(self.amount)),
            ("Created", timestamp(self.created_at)),
        ];
        if !self.data.is_empty() {
            pairs.push(("Data", serde_json::Value::Object(self.data.clone()).to_string()));
        }
        pairs
    }
}

// ── Categories ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct CategoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    category_type: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl RecordView for AssetCategory {
    type Row = CategoryRow;

    fn row(&self, _color: bool) -> CategoryRow {
        CategoryRow {
            id: self.id.get(),
            name: self.name.clone(),
            category_type: self.category_type.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Type", self.category_type.clone().unwrap_or_default()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Color", self.color.clone().unwrap_or_default()),
            ("Icon", self.icon.clone().unwrap_or_default()),
            ("Sort order", self.sort_order.to_string()),
        ]
    }
}
