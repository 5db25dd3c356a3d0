//! Reshaping of untyped feed payloads into canonical collections.
//!
//! The upstream service is inconsistent about how it wraps its arrays: the same
//! endpoint may answer with a bare array one day and `{"data": [...]}` or
//! `{"tokens": [...]}` the next. Everything in here is infallible: anything we
//! cannot make sense of degrades to "no data" and is logged.

use crate::error::Error;
use crate::models::{HotToken, LeaderboardTrader, RawTrade, TradeType, Trader};
use log::warn;
use serde_json::{Map, Value};

const UNKNOWN_SYMBOL: &str = "UNKNOWN";
const UNKNOWN_NAME: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

/// Pulls the record array out of `raw`, probing `wrapper_keys` in order when the
/// payload is an object. Returns an empty vector for any other shape.
pub fn canonicalize(raw: &Value, wrapper_keys: &[&str]) -> Vec<Value> {
    match raw {
        Value::Array(items) => items.clone(),
        Value::Object(fields) => {
            let unwrapped = wrapper_keys
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_array));
            match unwrapped {
                Some(items) => items.clone(),
                None => {
                    let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
                    report_malformed(Error::MalformedFeedShape(format!(
                        "object without an array under any of {:?} (keys: {:?})",
                        wrapper_keys, keys
                    )));
                    Vec::new()
                }
            }
        }
        other => {
            report_malformed(Error::MalformedFeedShape(format!(
                "expected array or object, got {}",
                shape_name(other)
            )));
            Vec::new()
        }
    }
}

fn report_malformed(err: Error) {
    warn!("{}; treating feed as empty", err);
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An entity that can be rebuilt from one loosely-typed feed record.
pub trait Canonical: Sized {
    /// Candidate wrapper keys, highest priority first.
    const WRAPPER_KEYS: &'static [&'static str];

    /// Short name used in log lines.
    const ENTITY: &'static str;

    /// `position` is the record's 0-based index in the source array.
    fn from_record(record: &Map<String, Value>, position: usize) -> Self;
}

/// Canonicalizes `raw` and coerces every object element into `T`, skipping
/// (and logging) elements that are not objects. Source order is preserved.
pub fn canonicalize_records<T: Canonical>(raw: &Value) -> Vec<T> {
    canonicalize(raw, T::WRAPPER_KEYS)
        .iter()
        .enumerate()
        .filter_map(|(position, item)| match item.as_object() {
            Some(record) => Some(T::from_record(record, position)),
            None => {
                warn!(
                    "Skipping invalid {} entry at index {}: {}",
                    T::ENTITY,
                    position,
                    shape_name(item)
                );
                None
            }
        })
        .collect()
}

/// Non-empty string field, or `sentinel`.
pub fn text_or(record: &Map<String, Value>, key: &str, sentinel: &str) -> String {
    match record.get(key).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => sentinel.to_string(),
    }
}

/// Non-negative integer field. Fractions are truncated, anything else is 0.
pub fn count(record: &Map<String, Value>, key: &str) -> u64 {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(|v| v.trunc() as u64)
                .unwrap_or(0)
        }),
        _ => 0,
    }
}

/// Non-negative real field.
pub fn amount(record: &Map<String, Value>, key: &str) -> f64 {
    signed(record, key).max(0.0)
}

/// Signed real field; wrong types become 0.
pub fn signed(record: &Map<String, Value>, key: &str) -> f64 {
    record
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn identifier(record: &Map<String, Value>, key: &str) -> i64 {
    match record.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

impl Canonical for HotToken {
    const WRAPPER_KEYS: &'static [&'static str] = &["data", "tokens", "results"];
    const ENTITY: &'static str = "hot token";

    fn from_record(record: &Map<String, Value>, _position: usize) -> Self {
        HotToken {
            symbol: text_or(record, "symbol", UNKNOWN_SYMBOL),
            token_address: text_or(record, "token_address", NOT_AVAILABLE),
            trade_count: count(record, "trade_count"),
            total_volume_sol: amount(record, "total_volume_sol"),
            total_volume_usd: amount(record, "total_volume_usd"),
            timeframe: text_or(record, "timeframe", NOT_AVAILABLE),
        }
    }
}

impl Canonical for LeaderboardTrader {
    const WRAPPER_KEYS: &'static [&'static str] = &["data", "leaderboard", "results"];
    const ENTITY: &'static str = "leaderboard";

    fn from_record(record: &Map<String, Value>, position: usize) -> Self {
        let rank = [count(record, "rank"), count(record, "ranking_position")]
            .into_iter()
            .find(|rank| *rank > 0)
            .unwrap_or(position as u64 + 1);

        LeaderboardTrader {
            id: identifier(record, "id"),
            trader_name: text_or(record, "trader_name", UNKNOWN_NAME),
            wallet_address: text_or(record, "wallet_address", NOT_AVAILABLE),
            ranking_position: u32::try_from(rank).unwrap_or(u32::MAX),
            pnl_sol: signed(record, "pnl_sol"),
            pnl_usd: signed(record, "pnl_usd"),
            wins: count(record, "wins"),
            losses: count(record, "losses"),
            timeframe: text_or(record, "timeframe", NOT_AVAILABLE),
            win_rate: amount(record, "win_rate"),
        }
    }
}

impl Canonical for Trader {
    const WRAPPER_KEYS: &'static [&'static str] = &["data", "traders", "results"];
    const ENTITY: &'static str = "trader";

    fn from_record(record: &Map<String, Value>, _position: usize) -> Self {
        Trader {
            id: identifier(record, "id"),
            trader_name: text_or(record, "trader_name", UNKNOWN_NAME),
            wallet_address: text_or(record, "wallet_address", NOT_AVAILABLE),
            total_trades: count(record, "total_trades"),
            total_volume_sol: amount(record, "total_volume_sol"),
            total_volume_usd: amount(record, "total_volume_usd"),
        }
    }
}

impl Canonical for RawTrade {
    const WRAPPER_KEYS: &'static [&'static str] = &["data", "trades", "results"];
    const ENTITY: &'static str = "trade";

    fn from_record(record: &Map<String, Value>, _position: usize) -> Self {
        RawTrade {
            trade_type: record
                .get("trade_type")
                .and_then(Value::as_str)
                .map(TradeType::parse)
                .unwrap_or(TradeType::Unknown),
            symbol: text_or(record, "symbol", UNKNOWN_NAME),
            token_address: text_or(record, "token_address", NOT_AVAILABLE),
            amount_sol: amount(record, "amount_sol"),
            trader_name: text_or(record, "trader_name", UNKNOWN_NAME),
        }
    }
}
