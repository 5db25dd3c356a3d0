use serde::{Deserialize, Serialize};
use std::fmt;

/// A token ranked by recent KOL trading activity within one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotToken {
    pub symbol: String,
    pub token_address: String,
    pub trade_count: u64,
    pub total_volume_sol: f64,
    pub total_volume_usd: f64,
    pub timeframe: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
    /// Upstream sent no side, or one we don't recognise.
    #[serde(rename = "TRADE")]
    Unknown,
}

impl TradeType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BUY" => TradeType::Buy,
            "SELL" => TradeType::Sell,
            _ => TradeType::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
            TradeType::Unknown => "TRADE",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single trade event from the recent-trades feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrade {
    pub trade_type: TradeType,
    pub symbol: String,
    pub token_address: String,
    pub amount_sol: f64,
    pub trader_name: String,
}
