// ── Real estate ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{AssetId, AssetRecord, Transform};
use super::kind::AssetKind;
use crate::transform;

/// An owned property, optionally mortgaged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealEstateProperty {
    pub id: AssetId,
    pub property_name: String,
    pub property_type: String,
    pub address: Option<String>,
    pub purchase_price: f64,
    pub current_value: f64,
    pub outstanding_mortgage: f64,
    pub purchase_date: Option<NaiveDate>,
    pub currency: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RealEstateProperty {
    /// Owner's equity: current value less the outstanding mortgage.
    pub fn equity(&self) -> f64 {
        self.current_value - self.outstanding_mortgage
    }

    /// Appreciation since purchase.
    pub fn appreciation(&self) -> f64 {
        self.current_value - self.purchase_price
    }
}

impl AssetRecord for RealEstateProperty {
    const KIND: AssetKind = AssetKind::RealEstate;

    fn id(&self) -> AssetId {
        self.id
    }

    fn display_name(&self) -> String {
        self.property_name.clone()
    }

    fn market_value(&self) -> f64 {
        self.current_value
    }

    fn transform() -> Option<Transform<Self>> {
        Some(transform::real_estate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equity_subtracts_mortgage() {
        let home = RealEstateProperty {
            property_name: "Home".into(),
            purchase_price: 300_000.0,
            current_value: 450_000.0,
            outstanding_mortgage: 200_000.0,
            ..RealEstateProperty::default()
        };
        assert!((home.equity() - 250_000.0).abs() < f64::EPSILON);
        assert!((home.appreciation() - 150_000.0).abs() < f64::EPSILON);
    }
}
