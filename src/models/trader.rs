use serde::{Deserialize, Serialize};

/// One row of the PnL leaderboard. `ranking_position` 1 is the best trader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardTrader {
    pub id: i64,
    pub trader_name: String,
    pub wallet_address: String,
    pub ranking_position: u32,
    pub pnl_sol: f64,
    pub pnl_usd: f64,
    pub wins: u64,
    pub losses: u64,
    pub timeframe: String,
    /// Upstream-computed win rate, only meaningful when wins and losses are both zero.
    pub win_rate: f64,
}

impl LeaderboardTrader {
    /// Win percentage from the recorded wins/losses, or `None` when nothing was recorded.
    pub fn computed_win_rate(&self) -> Option<f64> {
        let total = self.wins + self.losses;
        if total == 0 {
            return None;
        }
        Some(self.wins as f64 / total as f64 * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    pub id: i64,
    pub trader_name: String,
    pub wallet_address: String,
    pub total_trades: u64,
    pub total_volume_sol: f64,
    pub total_volume_usd: f64,
}
