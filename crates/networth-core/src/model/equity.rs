// ── Equity compensation ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{AssetId, AssetRecord, Transform};
use super::kind::AssetKind;
use crate::transform;

/// An RSU or option grant from an employer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityGrant {
    pub id: AssetId,
    pub company_symbol: String,
    /// `rsu`, `iso`, `nso`, `espp`, ... as reported by the backend.
    pub grant_type: String,
    pub shares_granted: f64,
    pub shares_vested: f64,
    /// Exercise price; zero for RSUs.
    pub strike_price: f64,
    pub current_price: Option<f64>,
    pub grant_date: Option<NaiveDate>,
    pub vest_start_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EquityGrant {
    /// Intrinsic value of one share: never negative (underwater options are worth zero).
    pub fn spread(&self) -> f64 {
        (self.current_price.unwrap_or(0.0) - self.strike_price).max(0.0)
    }

    pub fn unvested_shares(&self) -> f64 {
        (self.shares_granted - self.shares_vested).max(0.0)
    }

    /// Fraction of the grant vested so far, in `[0, 1]`.
    pub fn vested_fraction(&self) -> f64 {
        if self.shares_granted > 0.0 {
            (self.shares_vested / self.shares_granted).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl AssetRecord for EquityGrant {
    const KIND: AssetKind = AssetKind::Equity;

    fn id(&self) -> AssetId {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} {}", self.company_symbol, self.grant_type.to_uppercase())
    }

    /// Value of the vested portion only.
    fn market_value(&self) -> f64 {
        self.shares_vested * self.spread()
    }

    fn transform() -> Option<Transform<Self>> {
        Some(transform::equity_grants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underwater_options_are_worth_zero() {
        let grant = EquityGrant {
            company_symbol: "ACME".into(),
            grant_type: "iso".into(),
            shares_granted: 1000.0,
            shares_vested: 250.0,
            strike_price: 30.0,
            current_price: Some(20.0),
            ..EquityGrant::default()
        };
        assert!(grant.market_value().abs() < f64::EPSILON);
        assert!((grant.vested_fraction() - 0.25).abs() < f64::EPSILON);
        assert_eq!(grant.display_name(), "ACME ISO");
    }

    #[test]
    fn rsu_value_uses_vested_shares() {
        let grant = EquityGrant {
            shares_granted: 100.0,
            shares_vested: 40.0,
            current_price: Some(50.0),
            ..EquityGrant::default()
        };
        assert!((grant.market_value() - 2000.0).abs() < f64::EPSILON);
        assert!((grant.unvested_shares() - 60.0).abs() < f64::EPSILON);
    }
}
