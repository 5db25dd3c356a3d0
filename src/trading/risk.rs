use serde::{Deserialize, Serialize};
use std::fmt;

const HIGH_RISK_BELOW: u64 = 10;
const MEDIUM_RISK_BELOW: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Thin trading activity means a thin market: fewer than 10 trades is high
    /// risk, fewer than 50 medium, anything else low.
    pub fn from_trade_count(trade_count: u64) -> Self {
        if trade_count < HIGH_RISK_BELOW {
            RiskLevel::High
        } else if trade_count < MEDIUM_RISK_BELOW {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
