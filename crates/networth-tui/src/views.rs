//! How each record type appears on its asset screen: table columns, card
//! summary, detail popup, and the form used when the backend declares no
//! schema for the type.

use ratatui::layout::Constraint;

use networth_core::{
    AssetCategory, AssetRecord, CashHolding, CryptoHolding, EquityGrant, FieldType, FormField,
    FormSchema, ManualEntry, RealEstateProperty, StockHolding,
};

use crate::widgets::money::{fmt_money, fmt_opt_money, fmt_quantity};

/// Screen-side presentation of an [`AssetRecord`].
pub trait AssetView: AssetRecord + Default {
    /// Column headers with their widths.
    fn columns() -> &'static [(&'static str, Constraint)];

    /// One cell per column.
    fn cells(&self) -> Vec<String>;

    /// Second line of a card, under the display name.
    fn subtitle(&self) -> String;

    /// Labeled fields for the view popup, in display order.
    fn detail(&self) -> Vec<(&'static str, String)>;

    /// Form fields used when the backend offers no schema.
    fn fallback_schema() -> FormSchema {
        FormSchema::default()
    }
}

fn field(name: &str, label: &str, field_type: FieldType, required: bool) -> FormField {
    FormField {
        name: name.into(),
        field_type,
        label: label.into(),
        required,
        options: None,
        validation: None,
        placeholder: None,
        default_value: None,
        help_text: None,
    }
}

fn stamp<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl AssetView for CashHolding {
    fn columns() -> &'static [(&'static str, Constraint)] {
        &[
            ("Institution", Constraint::Fill(2)),
            ("Account", Constraint::Fill(2)),
            ("Type", Constraint::Length(12)),
            ("Balance", Constraint::Length(16)),
            ("APY %", Constraint::Length(7)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.institution_name.clone(),
            self.account_name.clone(),
            self.account_type.clone(),
            fmt_money(self.current_balance),
            stamp(self.interest_rate),
        ]
    }

    fn subtitle(&self) -> String {
        format!("{} · {}", self.institution_name, self.account_type)
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Institution", self.institution_name.clone()),
            ("Account", self.account_name.clone()),
            ("Type", self.account_type.clone()),
            ("Balance", format!("{} {}", fmt_money(self.current_balance), self.currency)),
            ("Interest rate", stamp(self.interest_rate)),
            ("Notes", self.notes.clone().unwrap_or_default()),
            ("Updated", stamp(self.updated_at)),
        ]
    }
}

impl AssetView for StockHolding {
    fn columns() -> &'static [(&'static str, Constraint)] {
        &[
            ("Symbol", Constraint::Length(8)),
            ("Company", Constraint::Fill(2)),
            ("Shares", Constraint::Length(12)),
            ("Price", Constraint::Length(12)),
            ("Value", Constraint::Length(16)),
            ("Gain", Constraint::Length(14)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.symbol.clone(),
            self.company_name.clone().unwrap_or_default(),
            fmt_quantity(self.shares_owned),
            fmt_opt_money(self.current_price),
            fmt_money(self.market_value()),
            fmt_opt_money(self.unrealized_gain()),
        ]
    }

    fn subtitle(&self) -> String {
        format!("{} shares of {}", fmt_quantity(self.shares_owned), self.symbol)
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Symbol", self.symbol.clone()),
            ("Company", self.company_name.clone().unwrap_or_default()),
            ("Shares", fmt_quantity(self.shares_owned)),
            ("Cost basis", fmt_opt_money(self.cost_basis)),
            ("Price", fmt_opt_money(self.current_price)),
            ("Value", format!("{} {}", fmt_money(self.market_value()), self.currency)),
            ("Gain", fmt_opt_money(self.unrealized_gain())),
            ("Institution", self.institution_name.clone().unwrap_or_default()),
        ]
    }
}

impl AssetView for CryptoHolding {
    fn columns() -> &'static [(&'static str, Constraint)] {
        &[
            ("Symbol", Constraint::Length(8)),
            ("Name", Constraint::Fill(2)),
            ("Tokens", Constraint::Length(16)),
            ("Price", Constraint::Length(14)),
            ("Value", Constraint::Length(16)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.symbol.clone(),
            self.name.clone().unwrap_or_default(),
            fmt_quantity(self.balance_tokens),
            fmt_opt_money(self.current_price),
            fmt_money(self.market_value()),
        ]
    }

    fn subtitle(&self) -> String {
        format!("{} {}", fmt_quantity(self.balance_tokens), self.symbol)
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Symbol", self.symbol.clone()),
            ("Name", self.name.clone().unwrap_or_default()),
            ("Tokens", fmt_quantity(self.balance_tokens)),
            ("Purchase price", fmt_opt_money(self.purchase_price)),
            ("Price", fmt_opt_money(self.current_price)),
            ("Value", format!("{} {}", fmt_money(self.market_value()), self.currency)),
            ("Institution", self.institution_name.clone().unwrap_or_default()),
            ("Wallet", self.wallet_address.clone().unwrap_or_default()),
        ]
    }
}

impl AssetView for RealEstateProperty {
    fn columns() -> &'static [(&'static str, Constraint)] {
        &[
            ("Property", Constraint::Fill(2)),
            ("Type", Constraint::Length(14)),
            ("Value", Constraint::Length(16)),
            ("Mortgage", Constraint::Length(16)),
            ("Equity", Constraint::Length(16)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.property_name.clone(),
            self.property_type.clone(),
            fmt_money(self.current_value),
            fmt_money(self.outstanding_mortgage),
            fmt_money(self.equity()),
        ]
    }

    fn subtitle(&self) -> String {
        format!("equity {}", fmt_money(self.equity()))
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Property", self.property_name.clone()),
            ("Type", self.property_type.clone()),
            ("Address", self.address.clone().unwrap_or_default()),
            ("Purchase price", fmt_money(self.purchase_price)),
            ("Purchased", stamp(self.purchase_date)),
            ("Current value", format!("{} {}", fmt_money(self.current_value), self.currency)),
            ("Mortgage", fmt_money(self.outstanding_mortgage)),
            ("Equity", fmt_money(self.equity())),
            ("Appreciation", fmt_money(self.appreciation())),
        ]
    }
}

impl AssetView for EquityGrant {
    fn columns() -> &'static [(&'static str, Constraint)] {
        &[
            ("Company", Constraint::Length(10)),
            ("Type", Constraint::Length(8)),
            ("Granted", Constraint::Length(12)),
            ("Vested", Constraint::Length(12)),
            ("Strike", Constraint::Length(12)),
            ("Vested value", Constraint::Fill(1)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.company_symbol.clone(),
            self.grant_type.clone(),
            fmt_quantity(self.shares_granted),
            fmt_quantity(self.shares_vested),
            fmt_money(self.strike_price),
            fmt_money(self.market_value()),
        ]
    }

    fn subtitle(&self) -> String {
        format!(
            "{} · {:.0}% vested",
            self.grant_type,
            self.vested_fraction() * 100.0
        )
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Company", self.company_symbol.clone()),
            ("Grant type", self.grant_type.clone()),
            ("Shares granted", fmt_quantity(self.shares_granted)),
            ("Shares vested", fmt_quantity(self.shares_vested)),
            ("Unvested", fmt_quantity(self.unvested_shares())),
            ("Strike price", fmt_money(self.strike_price)),
            ("Price", fmt_opt_money(self.current_price)),
            ("Spread", fmt_money(self.spread())),
            ("Vested value", fmt_money(self.market_value())),
            ("Grant date", stamp(self.grant_date)),
            ("Vest start", stamp(self.vest_start_date)),
        ]
    }
}

impl AssetView for ManualEntry {
    fn columns() -> &'static [(&'static str, Constraint)] {
        &[
            ("Type", Constraint::Length(18)),
            ("Description", Constraint::Fill(2)),
            ("Category", Constraint::Length(9)),
            ("Amount", Constraint::Length(16)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.entry_type.clone(),
            self.description.clone().unwrap_or_default(),
            stamp(self.category_id),
            fmt_money(self.amount),
        ]
    }

    fn subtitle(&self) -> String {
        self.entry_type.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("ID", self.id.to_string()),
            ("Type", self.entry_type.clone()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Category", stamp(self.category_id)),
            ("Account", stamp(self.account_id)),
            ("Amount", fmt_money(self.amount)),
            ("Created", stamp(self.created_at)),
        ];
        if !self.data.is_empty() {
            pairs.push(("Data", serde_json::Value::Object(self.data.clone()).to_string()));
        }
        pairs
    }

    fn fallback_schema() -> FormSchema {
        FormSchema {
            name: "manual_entry".into(),
            description: None,
            fields: vec![
                field("entry_type", "Entry type", FieldType::Text, true),
                field("category_id", "Category ID", FieldType::Number, false),
                field("description", "Description", FieldType::Text, false),
                field("amount", "Amount", FieldType::Currency, true),
            ],
        }
    }
}

impl AssetView for AssetCategory {
    fn columns() -> &'static [(&'static str, Constraint)] {
        &[
            ("Name", Constraint::Fill(1)),
            ("Type", Constraint::Length(14)),
            ("Description", Constraint::Fill(2)),
            ("Order", Constraint::Length(6)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category_type.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            self.sort_order.to_string(),
        ]
    }

    fn subtitle(&self) -> String {
        self.description.clone().unwrap_or_default()
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

    fn fallback_schema() -> FormSchema {
        FormSchema {
            name: "asset_category".into(),
            description: None,
            fields: vec![
                field("name", "Name", FieldType::Text, true),
                field("category_type", "Type", FieldType::Text, false),
                field("description", "Description", FieldType::Textarea, false),
                field("color", "Color", FieldType::Text, false),
                field("sort_order", "Sort order", FieldType::Number, false),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cells_match_columns() {
        fn check<T: AssetView>() {
            assert_eq!(T::default().cells().len(), T::columns().len());
        }
        check::<CashHolding>();
        check::<StockHolding>();
        check::<CryptoHolding>();
        check::<RealEstateProperty>();
        check::<EquityGrant>();
        check::<ManualEntry>();
        check::<AssetCategory>();
    }

    #[test]
    fn schema_less_kinds_have_fallback_forms() {
        assert_eq!(ManualEntry::fallback_schema().fields.len(), 4);
        assert!(AssetCategory::fallback_schema().field("name").is_some_and(|f| f.required));
        assert!(CashHolding::fallback_schema().fields.is_empty());
    }

    #[test]
    fn cash_cells_format_money() {
        let cash = CashHolding {
            account_name: "Emergency fund".into(),
            current_balance: 12_500.0,
            ..CashHolding::default()
        };
        assert_eq!(cash.cells()[1], "Emergency fund");
        assert_eq!(cash.cells()[3], "12,500.00");
    }
}
