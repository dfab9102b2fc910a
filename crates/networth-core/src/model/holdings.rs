// ── Liquid holdings: cash accounts, brokerage positions, crypto wallets ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{AssetId, AssetRecord, Transform};
use super::kind::AssetKind;
use crate::transform;

/// A bank or brokerage cash account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashHolding {
    pub id: AssetId,
    pub institution_name: String,
    pub account_name: String,
    pub account_type: String,
    pub current_balance: f64,
    /// Annual percentage yield, when the account pays interest.
    pub interest_rate: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AssetRecord for CashHolding {
    const KIND: AssetKind = AssetKind::Cash;

    fn id(&self) -> AssetId {
        self.id
    }

    fn display_name(&self) -> String {
        if self.institution_name.is_empty() {
            self.account_name.clone()
        } else {
            format!("{} ({})", self.account_name, self.institution_name)
        }
    }

    fn market_value(&self) -> f64 {
        self.current_balance
    }

    fn transform() -> Option<Transform<Self>> {
        Some(transform::cash_holdings)
    }
}

/// A brokerage stock position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockHolding {
    pub id: AssetId,
    pub symbol: String,
    pub company_name: Option<String>,
    pub shares_owned: f64,
    /// Total cost basis of the position.
    pub cost_basis: Option<f64>,
    pub current_price: Option<f64>,
    pub institution_name: Option<String>,
    pub currency: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StockHolding {
    /// Unrealized gain against the cost basis, when both sides are known.
    pub fn unrealized_gain(&self) -> Option<f64> {
        let basis = self.cost_basis?;
        self.current_price.map(|_| self.market_value() - basis)
    }
}

impl AssetRecord for StockHolding {
    const KIND: AssetKind = AssetKind::Stocks;

    fn id(&self) -> AssetId {
        self.id
    }

    fn display_name(&self) -> String {
        match &self.company_name {
            Some(name) if !name.is_empty() => format!("{} ({name})", self.symbol),
            _ => self.symbol.clone(),
        }
    }

    fn market_value(&self) -> f64 {
        self.shares_owned * self.current_price.unwrap_or(0.0)
    }

    fn transform() -> Option<Transform<Self>> {
        Some(transform::stock_holdings)
    }
}

/// A cryptocurrency balance held on an exchange or in a wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CryptoHolding {
    pub id: AssetId,
    pub symbol: String,
    pub name: Option<String>,
    pub balance_tokens: f64,
    /// Average purchase price per token.
    pub purchase_price: Option<f64>,
    pub current_price: Option<f64>,
    pub institution_name: Option<String>,
    pub wallet_address: Option<String>,
    pub currency: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AssetRecord for CryptoHolding {
    const KIND: AssetKind = AssetKind::Crypto;

    fn id(&self) -> AssetId {
        self.id
    }

    fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => format!("{name} ({})", self.symbol),
            _ => self.symbol.clone(),
        }
    }

    fn market_value(&self) -> f64 {
        self.balance_tokens * self.current_price.unwrap_or(0.0)
    }

    fn transform() -> Option<Transform<Self>> {
        Some(transform::crypto_holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_value_and_gain() {
        let stock = StockHolding {
            symbol: "AAPL".into(),
            shares_owned: 10.0,
            cost_basis: Some(1500.0),
            current_price: Some(200.0),
            ..StockHolding::default()
        };
        assert!((stock.market_value() - 2000.0).abs() < f64::EPSILON);
        assert_eq!(stock.unrealized_gain(), Some(500.0));
        assert_eq!(stock.display_name(), "AAPL");
    }

    #[test]
    fn crypto_without_price_is_worth_nothing() {
        let coin = CryptoHolding {
            symbol: "BTC".into(),
            name: Some("Bitcoin".into()),
            balance_tokens: 0.5,
            ..CryptoHolding::default()
        };
        assert!(coin.market_value().abs() < f64::EPSILON);
        assert_eq!(coin.display_name(), "Bitcoin (BTC)");
    }
}
