use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Config, ACTIVE_STATUS, API_KEY_HEADER, UPSTREAM_TIMEOUT_SECS};
use crate::error::{AppError, Result};
use crate::types::{Coordinates, ListingAddress, ListingTimestamps, RawListing};

/// Envelope keys the provider has been seen to use, in priority order.
const ENVELOPE_KEYS: &[&str] = &["listings", "results", "data"];

pub fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
        .build()?)
}

/// Fetch active listings for the configured province and return the raw
/// listing objects, envelope stripped.
///
/// A missing credential is reported before any request is made.
pub async fn fetch_listings(client: &reqwest::Client, cfg: &Config) -> Result<Vec<Value>> {
    let Some(api_key) = cfg.api_key.as_deref() else {
        return Err(AppError::Config("REPLIERS_API_KEY is not set".to_string()));
    };

    let url = format!("{}/listings", cfg.listings_api_url.trim_end_matches('/'));
    let per_page = cfg.results_per_page.to_string();
    debug!("GET {url} state={} status={ACTIVE_STATUS}", cfg.province);

    let resp = client
        .get(&url)
        .header(API_KEY_HEADER, api_key)
        .query(&[
            ("status", ACTIVE_STATUS),
            ("state", cfg.province.as_str()),
            ("resultsPerPage", per_page.as_str()),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!("[UPSTREAM] {url} responded {status}");
        return Err(AppError::Upstream { status: status.as_u16(), body });
    }

    let body = resp.text().await?;
    let envelope: Value = serde_json::from_str(&body)?;
    Ok(extract_listings(envelope))
}

/// Strip the response envelope. Accepts `listings`, `results`, `data` or a
/// bare array; the first non-empty match wins.
pub fn extract_listings(envelope: Value) -> Vec<Value> {
    let mut envelope = match envelope {
        Value::Array(items) => return items,
        Value::Object(map) => map,
        other => {
            warn!("[UPSTREAM] unexpected envelope type: {}", json_type(&other));
            return Vec::new();
        }
    };

    for key in ENVELOPE_KEYS {
        if let Some(Value::Array(items)) = envelope.remove(*key) {
            if !items.is_empty() {
                return items;
            }
        }
    }

    let keys: Vec<&String> = envelope.keys().collect();
    debug!("[UPSTREAM] no listings in envelope, remaining keys: {keys:?}");
    Vec::new()
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse one upstream listing. Never fails: anything missing or malformed
/// becomes `None`.
pub fn parse_listing(v: &Value) -> RawListing {
    let details = v.get("details");
    let address = v.get("address");
    let timestamps = v.get("timestamps");
    let map = v.get("map");

    RawListing {
        mls_number: text(v.get("mlsNumber")).or_else(|| text(v.get("mls"))),
        list_price: number(v.get("listPrice")).or_else(|| number(v.get("price"))),
        original_price: number(v.get("originalPrice")).or_else(|| number(v.get("soldPrice"))),
        simple_days_on_market: integer(v.get("simpleDaysOnMarket")),
        list_date: date(v.get("listDate")),
        property_type: text(details.and_then(|d| d.get("propertyType")))
            .or_else(|| text(v.get("type"))),
        description: text(details.and_then(|d| d.get("description"))),
        image: text(
            v.get("images")
                .and_then(|i| i.as_array())
                .and_then(|a| a.first()),
        ),
        address: ListingAddress {
            street_number: text(address.and_then(|a| a.get("streetNumber"))),
            street_name: text(address.and_then(|a| a.get("streetName"))),
            street_suffix: text(address.and_then(|a| a.get("streetSuffix"))),
            unit_number: text(address.and_then(|a| a.get("unitNumber"))),
            city: text(address.and_then(|a| a.get("city"))),
            state: text(address.and_then(|a| a.get("state"))),
            zip: text(address.and_then(|a| a.get("zip"))),
        },
        timestamps: ListingTimestamps {
            terminated_date: date(timestamps.and_then(|t| t.get("terminatedDate"))),
            possession_date: date(timestamps.and_then(|t| t.get("possessionDate"))),
            conditional_expiry_date: date(timestamps.and_then(|t| t.get("conditionalExpiryDate"))),
            closed_date: date(timestamps.and_then(|t| t.get("closedDate"))),
        },
        coordinates: Coordinates {
            latitude: number(map.and_then(|m| m.get("latitude"))),
            longitude: number(map.and_then(|m| m.get("longitude"))),
        },
    }
}

/// Non-empty string, or a number rendered as text (street numbers and zips
/// sometimes arrive numeric).
fn text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(v: Option<&Value>) -> Option<f64> {
    let v = v?;
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .filter(|n: &f64| n.is_finite())
}

fn integer(v: Option<&Value>) -> Option<i64> {
    let v = v?;
    v.as_i64()
        .or_else(|| number(Some(v)).map(|n| n.floor() as i64))
}

fn date(v: Option<&Value>) -> Option<DateTime<Utc>> {
    v?.as_str().and_then(parse_timestamp)
}

/// Parse an upstream date. Accepts RFC 3339, a naive ISO datetime (taken as
/// UTC) or a bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc())
}
