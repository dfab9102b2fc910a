// ── Asset kinds ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The seven backend resources managed through the generic CRUD page.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum AssetKind {
    #[strum(to_string = "cash", serialize = "cash-holdings")]
    Cash,
    #[strum(to_string = "stocks", serialize = "stock", serialize = "stock-holdings")]
    Stocks,
    #[strum(to_string = "crypto", serialize = "crypto-holdings")]
    Crypto,
    #[strum(to_string = "real-estate", serialize = "property", serialize = "properties")]
    RealEstate,
    #[strum(to_string = "equity", serialize = "equity-grants", serialize = "grants")]
    Equity,
    #[strum(to_string = "manual", serialize = "manual-entries", serialize = "entries")]
    ManualEntries,
    #[strum(to_string = "categories", serialize = "category", serialize = "asset-categories")]
    Categories,
}

impl AssetKind {
    /// REST resource segment under `/api/v1/`.
    pub fn resource(self) -> &'static str {
        match self {
            Self::Cash => "cash-holdings",
            Self::Stocks => "stock-holdings",
            Self::Crypto => "crypto-holdings",
            Self::RealEstate => "real-estate",
            Self::Equity => "equity-grants",
            Self::ManualEntries => "manual-entries",
            Self::Categories => "asset-categories",
        }
    }

    /// Key under which an object-wrapped list payload carries its records.
    pub fn payload_key(self) -> &'static str {
        match self {
            Self::Cash => "cash_holdings",
            Self::Stocks => "stock_holdings",
            Self::Crypto => "crypto_holdings",
            Self::RealEstate => "properties",
            Self::Equity => "equity_grants",
            Self::ManualEntries => "entries",
            Self::Categories => "categories",
        }
    }

    /// Plural label used in page titles and load errors.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "cash holdings",
            Self::Stocks => "stock holdings",
            Self::Crypto => "crypto holdings",
            Self::RealEstate => "real estate",
            Self::Equity => "equity grants",
            Self::ManualEntries => "manual entries",
            Self::Categories => "asset categories",
        }
    }

    /// Capitalized singular noun used in success messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Cash => "Cash holding",
            Self::Stocks => "Stock holding",
            Self::Crypto => "Crypto holding",
            Self::RealEstate => "Property",
            Self::Equity => "Equity grant",
            Self::ManualEntries => "Manual entry",
            Self::Categories => "Category",
        }
    }

    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Stocks => "Stocks",
            Self::Crypto => "Crypto",
            Self::RealEstate => "Real Estate",
            Self::Equity => "Equity",
            Self::ManualEntries => "Manual",
            Self::Categories => "Categories",
        }
    }

    /// Backend plugin whose form schema describes this kind's records.
    pub fn plugin(self) -> Option<&'static str> {
        match self {
            Self::Cash => Some("cash_holding"),
            Self::Stocks => Some("stock_holding"),
            Self::Crypto => Some("crypto_holding"),
            Self::RealEstate => Some("real_estate"),
            Self::Equity => Some("equity_compensation"),
            Self::ManualEntries | Self::Categories => None,
        }
    }
}
