// ── Payload transformers ──
//
// The backend is loosely typed: numbers arrive as strings, optional members
// go missing, lists are sometimes wrapped in an object. Every helper here is
// total. Malformed input degrades to a neutral value (0, "", None) and
// never fails the whole payload. Only a record without a usable `id` is
// dropped, since the CRUD actions cannot address it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::dedupe::dedupe_manual_entries;
use crate::model::{
    AssetId, AssetKind, CashHolding, CryptoHolding, EquityGrant, ManualEntry, RealEstateProperty,
    StockHolding,
};

const DEFAULT_CURRENCY: &str = "USD";

// ── Coercion helpers ─────────────────────────────────────────────────

/// First present, non-null member among `keys`.
pub fn field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| !v.is_null())
}

/// Finite number from a JSON number or numeric string.
pub fn opt_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Like [`opt_number`], with `0.0` for anything unusable.
pub fn number(value: Option<&Value>) -> f64 {
    opt_number(value).unwrap_or(0.0)
}

/// Whole number from a JSON integer, integral float, or numeric string.
#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
pub fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// String form of a scalar; `""` for missing, null, or structured values.
pub fn string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Like [`string`], with `None` for blank results.
pub fn opt_string(value: Option<&Value>) -> Option<String> {
    Some(string(value)).filter(|s| !s.is_empty())
}

/// Timestamp from RFC 3339, a naive `YYYY-MM-DD[ HH:MM:SS]` form, or epoch seconds.
pub fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|t| t.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                        .map(|t| t.and_utc())
                })
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|t| t.and_utc())
                })
        }
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    }
}

/// Calendar date from `YYYY-MM-DD` or any form [`timestamp`] accepts.
pub fn date(value: Option<&Value>) -> Option<NaiveDate> {
    if let Some(Value::String(s)) = value {
        if let Ok(d) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
            return Some(d);
        }
    }
    timestamp(value).map(|t| t.date_naive())
}

/// Elements of a JSON array; empty for anything else.
pub fn array(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Members of a JSON object; empty for anything else.
pub fn object(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

/// Records of a list payload: a bare array, or an object wrapping the
/// array under `key`, `data` or `items`.
pub fn payload_items<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    match raw {
        Value::Array(items) => items,
        Value::Object(_) => [key, "data", "items"]
            .iter()
            .find_map(|k| match raw.get(*k) {
                Some(Value::Array(items)) => Some(items.as_slice()),
                _ => None,
            })
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Map each record with a usable id through `build`, dropping the rest.
fn records<T>(raw: &Value, key: &str, build: impl Fn(&Value, AssetId) -> T) -> Vec<T> {
    let items = payload_items(raw, key);
    let mut out = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for record in items {
        match integer(record.get("id")) {
            Some(id) => out.push(build(record, AssetId(id))),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(key, dropped, "dropped records without a usable id");
    }
    out
}

fn currency(record: &Value) -> String {
    opt_string(record.get("currency"))
        .map_or_else(|| DEFAULT_CURRENCY.to_owned(), |c| c.to_uppercase())
}

// ── Serde pass-through ───────────────────────────────────────────────

/// Deserialize each record directly, skipping (and logging) ones that do not fit.
pub fn passthrough<T: DeserializeOwned>(raw: &Value, key: &str) -> Vec<T> {
    let items = payload_items(raw, key);
    let out: Vec<T> = items
        .iter()
        .filter_map(|record| match serde_json::from_value(record.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key, error = %e, "skipping record that does not match its shape");
                None
            }
        })
        .collect();
    out
}

// ── Per-asset transformers ───────────────────────────────────────────

pub fn cash_holdings(raw: &Value) -> Vec<CashHolding> {
    records(raw, AssetKind::Cash.payload_key(), |r, id| CashHolding {
        id,
        institution_name: string(field(r, &["institution_name", "institution"])),
        account_name: string(field(r, &["account_name", "name"])),
        account_type: string(r.get("account_type")),
        current_balance: number(field(r, &["current_balance", "balance"])),
        interest_rate: opt_number(r.get("interest_rate")),
        currency: currency(r),
        notes: opt_string(r.get("notes")),
        created_at: timestamp(r.get("created_at")),
        updated_at: timestamp(r.get("updated_at")),
    })
}

pub fn stock_holdings(raw: &Value) -> Vec<StockHolding> {
    records(raw, AssetKind::Stocks.payload_key(), |r, id| StockHolding {
        id,
        symbol: string(field(r, &["symbol", "ticker_symbol"])).to_uppercase(),
        company_name: opt_string(r.get("company_name")),
        shares_owned: number(field(r, &["shares_owned", "shares"])),
        cost_basis: opt_number(r.get("cost_basis")),
        current_price: opt_number(field(r, &["current_price", "price"])),
        institution_name: opt_string(r.get("institution_name")),
        currency: currency(r),
        created_at: timestamp(r.get("created_at")),
        updated_at: timestamp(r.get("updated_at")),
    })
}

pub fn crypto_holdings(raw: &Value) -> Vec<CryptoHolding> {
    records(raw, AssetKind::Crypto.payload_key(), |r, id| CryptoHolding {
        id,
        symbol: string(r.get("symbol")).to_uppercase(),
        name: opt_string(r.get("name")),
        balance_tokens: number(field(r, &["balance_tokens", "balance", "quantity"])),
        purchase_price: opt_number(r.get("purchase_price")),
        current_price: opt_number(field(r, &["current_price", "price"])),
        institution_name: opt_string(r.get("institution_name")),
        wallet_address: opt_string(r.get("wallet_address")),
        currency: currency(r),
        created_at: timestamp(r.get("created_at")),
        updated_at: timestamp(r.get("updated_at")),
    })
}

pub fn real_estate(raw: &Value) -> Vec<RealEstateProperty> {
    records(raw, AssetKind::RealEstate.payload_key(), |r, id| RealEstateProperty {
        id,
        property_name: string(field(r, &["property_name", "name"])),
        property_type: string(r.get("property_type")),
        address: opt_string(r.get("address")),
        purchase_price: number(r.get("purchase_price")),
        current_value: number(field(r, &["current_value", "estimated_value"])),
        outstanding_mortgage: number(field(r, &["outstanding_mortgage", "mortgage_balance"])),
        purchase_date: date(r.get("purchase_date")),
        currency: currency(r),
        created_at: timestamp(r.get("created_at")),
        updated_at: timestamp(r.get("updated_at")),
    })
}

pub fn equity_grants(raw: &Value) -> Vec<EquityGrant> {
    records(raw, AssetKind::Equity.payload_key(), |r, id| EquityGrant {
        id,
        company_symbol: string(field(r, &["company_symbol", "symbol"])).to_uppercase(),
        grant_type: string(r.get("grant_type")).to_lowercase(),
        shares_granted: number(field(r, &["shares_granted", "total_shares"])),
        shares_vested: number(field(r, &["shares_vested", "vested_shares"])),
        strike_price: number(r.get("strike_price")),
        current_price: opt_number(field(r, &["current_price", "price"])),
        grant_date: date(r.get("grant_date")),
        vest_start_date: date(r.get("vest_start_date")),
        created_at: timestamp(r.get("created_at")),
        updated_at: timestamp(r.get("updated_at")),
    })
}

/// Manual entries keep their plugin data as-is. The displayed amount comes
/// from the entry itself or, failing that, from a value-like data member.
/// Duplicate rows are collapsed.
pub fn manual_entries(raw: &Value) -> Vec<ManualEntry> {
    let entries = records(raw, AssetKind::ManualEntries.payload_key(), |r, id| {
        let data = object(r.get("data"));
        let data_value = Value::Object(data.clone());
        let amount = opt_number(field(r, &["amount", "value"]))
            .or_else(|| opt_number(field(&data_value, &["amount", "value", "current_value", "balance"])))
            .unwrap_or(0.0);
        ManualEntry {
            id,
            entry_type: string(field(r, &["entry_type", "type"])),
            account_id: integer(r.get("account_id")),
            category_id: integer(r.get("category_id")),
            description: opt_string(field(r, &["description", "name"])),
            amount,
            data,
            created_at: timestamp(r.get("created_at")),
            updated_at: timestamp(r.get("updated_at")),
        }
    });
    dedupe_manual_entries(entries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::model::AssetCategory;

    #[test]
    fn non_numeric_balance_becomes_zero() {
        let items = cash_holdings(&json!([
            {"id": 1, "account_name": "Checking", "current_balance": "not-a-number"}
        ]));
        assert_eq!(items.len(), 1);
        assert!(items[0].current_balance.abs() < f64::EPSILON);
        assert_eq!(items[0].currency, "USD");
    }

    #[test]
    fn numeric_strings_are_parsed() {
        assert_eq!(number(Some(&json!("1,234.50"))), 1234.5);
        assert_eq!(number(Some(&json!(" 42 "))), 42.0);
        assert_eq!(number(Some(&json!("NaN"))), 0.0);
        assert_eq!(number(Some(&json!("inf"))), 0.0);
        assert_eq!(number(Some(&json!(true))), 0.0);
        assert_eq!(number(None), 0.0);
        assert_eq!(opt_number(Some(&Value::Null)), None);
    }

    #[test]
    fn integer_accepts_integral_floats_and_strings() {
        assert_eq!(integer(Some(&json!(7))), Some(7));
        assert_eq!(integer(Some(&json!(7.0))), Some(7));
        assert_eq!(integer(Some(&json!(7.5))), None);
        assert_eq!(integer(Some(&json!("12"))), Some(12));
    }

    #[test]
    fn timestamps_in_several_shapes() {
        assert!(timestamp(Some(&json!("2024-03-01T10:00:00Z"))).is_some());
        assert!(timestamp(Some(&json!("2024-03-01T10:00:00.123456"))).is_some());
        assert!(timestamp(Some(&json!("2024-03-01 10:00:00"))).is_some());
        assert!(timestamp(Some(&json!("2024-03-01"))).is_some());
        assert!(timestamp(Some(&json!(1_709_287_200))).is_some());
        assert!(timestamp(Some(&json!("yesterday"))).is_none());
        assert_eq!(
            date(Some(&json!("2021-06-15T00:00:00Z"))),
            NaiveDate::from_ymd_opt(2021, 6, 15)
        );
    }

    #[test]
    fn wrapped_payloads_are_unwrapped() {
        let raw = json!({"stock_holdings": [{"id": 1, "symbol": "msft", "shares": "3"}]});
        let items = stock_holdings(&raw);
        assert_eq!(items[0].symbol, "MSFT");
        assert!((items[0].shares_owned - 3.0).abs() < f64::EPSILON);

        let raw = json!({"data": [{"id": 2, "symbol": "eth"}]});
        assert_eq!(crypto_holdings(&raw)[0].symbol, "ETH");

        assert!(cash_holdings(&json!({"unexpected": true})).is_empty());
        assert!(cash_holdings(&json!("garbage")).is_empty());
    }

    #[test]
    fn records_without_id_are_dropped() {
        let items = real_estate(&json!([
            {"id": 1, "property_name": "Home", "current_value": 400000, "outstanding_mortgage": "150000"},
            {"property_name": "Orphan"},
            {"id": "x", "property_name": "Bad id"}
        ]));
        assert_eq!(items.len(), 1);
        assert!((items[0].equity() - 250_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn manual_entry_amount_falls_back_to_data() {
        let items = manual_entries(&json!([
            {"id": 5, "entry_type": "other_assets", "account_id": 2,
             "data": {"name": "Watch", "current_value": "1500"}}
        ]));
        assert_eq!(items[0].amount, 1500.0);
        assert_eq!(items[0].data["name"], "Watch");
    }

    #[test]
    fn passthrough_skips_bad_records() {
        let items: Vec<AssetCategory> = passthrough(
            &json!({"categories": [{"id": 1, "name": "Vehicles"}, {"name": "no id"}]}),
            "categories",
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Vehicles");
    }
}
