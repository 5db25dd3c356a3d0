//! Token signal scoring.
//!
//! A signal combines three independent sub-scores, each on a 0-100 scale:
//!
//! * **volume**: the token's SOL volume relative to the busiest hot token,
//! * **trader interest**: the token's trade count relative to a floor of 100,
//! * **momentum**: how many of the recent trades touched the token, saturating at 20.
//!
//! Their plain average decides BUY / HOLD / SELL. Risk is judged separately from
//! the trade count alone.

use crate::models::{HotToken, LeaderboardTrader, RawTrade};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

mod risk;
pub use risk::RiskLevel;

pub const BUY_THRESHOLD: f64 = 70.0;
pub const HOLD_THRESHOLD: f64 = 40.0;
const TRADER_INTEREST_FLOOR: f64 = 100.0;
const MOMENTUM_SATURATION: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Hold,
    Sell,
}

impl SignalAction {
    pub fn label(&self) -> &'static str {
        match self {
            SignalAction::Buy => "BUY",
            SignalAction::Hold => "HOLD",
            SignalAction::Sell => "SELL",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SignalAction::Buy => "🟢",
            SignalAction::Hold => "🟡",
            SignalAction::Sell => "🔴",
        }
    }
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMetrics {
    pub volume_score: u8,
    pub trader_score: u8,
    pub momentum_score: u8,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub action: SignalAction,
    /// 0-100.
    pub confidence: u8,
    pub token: String,
    pub token_address: String,
    pub reasoning: String,
    pub metrics: SignalMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: SignalAction,
    pub confidence: u8,
}

/// Maps an overall score onto an action. BUY and HOLD report the score itself as
/// confidence, SELL reports its complement.
pub fn decide(overall_score: f64) -> Decision {
    if overall_score >= BUY_THRESHOLD {
        Decision {
            action: SignalAction::Buy,
            confidence: to_percent(overall_score),
        }
    } else if overall_score >= HOLD_THRESHOLD {
        Decision {
            action: SignalAction::Hold,
            confidence: to_percent(overall_score),
        }
    } else {
        Decision {
            action: SignalAction::Sell,
            confidence: to_percent(100.0 - overall_score),
        }
    }
}

/// `target` volume as a share of the largest volume in `all_tokens`. Zero when
/// nothing traded.
pub fn volume_score(target: &HotToken, all_tokens: &[HotToken]) -> f64 {
    let max_volume = all_tokens
        .iter()
        .map(|t| t.total_volume_sol)
        .fold(0.0_f64, f64::max);
    if max_volume <= 0.0 {
        return 0.0;
    }
    clamp_score(target.total_volume_sol / max_volume * 100.0)
}

/// Trade count against a floor of 100 trades.
///
/// The leaderboard is not consulted yet. Blending in leaderboard rank would
/// change every recommendation, so it stays a pass-through until that is decided.
pub fn trader_score(target: &HotToken, _leaderboard: &[LeaderboardTrader]) -> f64 {
    let trade_count = target.trade_count as f64;
    let denominator = trade_count.max(TRADER_INTEREST_FLOOR);
    clamp_score((trade_count / denominator).min(1.0) * 100.0)
}

pub fn momentum_score(target: &HotToken, recent_trades: &[RawTrade]) -> f64 {
    let matching = recent_trades
        .iter()
        .filter(|trade| trade.token_address == target.token_address)
        .count() as f64;
    clamp_score((matching / MOMENTUM_SATURATION).min(1.0) * 100.0)
}

/// Scores `target` against the current market snapshot.
///
/// `target` is expected to be one of `all_tokens`; an empty `all_tokens` is
/// tolerated and yields a zero volume score.
pub fn generate_signal(
    target: &HotToken,
    all_tokens: &[HotToken],
    leaderboard: &[LeaderboardTrader],
    recent_trades: &[RawTrade],
) -> TradingSignal {
    let volume = volume_score(target, all_tokens);
    let trader = trader_score(target, leaderboard);
    let momentum = momentum_score(target, recent_trades);
    let overall = (volume + trader + momentum) / 3.0;

    let decision = decide(overall);
    debug!(
        "Scored {}: volume={:.2} trader={:.2} momentum={:.2} overall={:.2} -> {}",
        target.symbol, volume, trader, momentum, overall, decision.action
    );

    TradingSignal {
        action: decision.action,
        confidence: decision.confidence,
        token: target.symbol.clone(),
        token_address: target.token_address.clone(),
        reasoning: reasoning(decision.action, target.trade_count),
        metrics: SignalMetrics {
            volume_score: to_percent(volume),
            trader_score: to_percent(trader),
            momentum_score: to_percent(momentum),
            risk_level: RiskLevel::from_trade_count(target.trade_count),
        },
    }
}

fn reasoning(action: SignalAction, trade_count: u64) -> String {
    match action {
        SignalAction::Buy => format!(
            "Strong buy signal. High volume ({} trades), strong trader interest, and positive momentum.",
            trade_count
        ),
        SignalAction::Hold => {
            "Neutral signal. Moderate activity but not enough conviction for entry.".to_string()
        }
        SignalAction::Sell => {
            "Weak signal. Low volume or declining interest from top traders.".to_string()
        }
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

fn to_percent(score: f64) -> u8 {
    clamp_score(score).round() as u8
}
