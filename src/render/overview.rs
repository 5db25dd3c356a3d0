use super::{signed_sol, timeframe_label};
use crate::models::{HotToken, LeaderboardTrader, Trader};

/// Timeframes the overview's feeds were requested with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewTimeframes<'a> {
    pub hot_tokens: &'a str,
    pub leaderboard: &'a str,
}

/// Market overview used as the context summary: the hottest token, the
/// top-ranked trader, then collection sizes.
pub fn render_overview(
    hot_tokens: &[HotToken],
    leaderboard: &[LeaderboardTrader],
    traders: &[Trader],
    timeframes: OverviewTimeframes<'_>,
) -> String {
    let mut summary = String::from("📊 KOL Market Overview:\n\n");

    if let Some(token) = hot_tokens.first() {
        summary.push_str(&format!(
            "🔥 Hottest Token ({}): ${}\n   • {} trades, {:.2} SOL volume\n   • Address: {}\n\n",
            timeframes.hot_tokens,
            token.symbol,
            token.trade_count,
            token.total_volume_sol,
            token.token_address
        ));
    }

    if let Some(trader) = leaderboard.first() {
        summary.push_str(&format!(
            "🏆 Top Trader ({}): {}\n   • PnL: {} SOL\n   • Win Rate: {}W / {}L\n   • Rank: #{}\n\n",
            timeframe_label(timeframes.leaderboard),
            trader.trader_name,
            signed_sol(trader.pnl_sol),
            trader.wins,
            trader.losses,
            trader.ranking_position
        ));
    }

    summary.push_str(&format!("📈 Total Active Traders: {}\n", traders.len()));
    summary.push_str(&format!("🎯 Hot Tokens Tracked: {}", hot_tokens.len()));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: OverviewTimeframes<'static> = OverviewTimeframes {
        hot_tokens: "1h",
        leaderboard: "daily",
    };

    #[test]
    fn test_overview_without_data() {
        assert_eq!(
            render_overview(&[], &[], &[], DEFAULT),
            "📊 KOL Market Overview:\n\n📈 Total Active Traders: 0\n🎯 Hot Tokens Tracked: 0"
        );
    }

    #[test]
    fn test_overview_uses_first_entries() {
        let hot = vec![
            HotToken {
                symbol: "BONK".to_string(),
                token_address: "bonk-mint".to_string(),
                trade_count: 60,
                total_volume_sol: 100.0,
                total_volume_usd: 15_000.0,
                timeframe: "1h".to_string(),
            },
            HotToken {
                symbol: "WIF".to_string(),
                token_address: "wif-mint".to_string(),
                trade_count: 10,
                total_volume_sol: 50.0,
                total_volume_usd: 7_500.0,
                timeframe: "1h".to_string(),
            },
        ];
        let leaderboard = vec![LeaderboardTrader {
            id: 9,
            trader_name: "Cented".to_string(),
            wallet_address: "wallet".to_string(),
            ranking_position: 1,
            pnl_sol: 42.0,
            pnl_usd: 6_300.0,
            wins: 8,
            losses: 2,
            timeframe: "daily".to_string(),
            win_rate: 0.0,
        }];

        let summary = render_overview(&hot, &leaderboard, &[], DEFAULT);
        assert!(summary.contains("🔥 Hottest Token (1h): $BONK\n   • 60 trades, 100.00 SOL volume\n   • Address: bonk-mint"));
        assert!(summary.contains("🏆 Top Trader (Daily): Cented\n   • PnL: +42.00 SOL\n   • Win Rate: 8W / 2L\n   • Rank: #1"));
        assert!(summary.ends_with("🎯 Hot Tokens Tracked: 2"));
        assert!(!summary.contains("WIF"));
    }

    #[test]
    fn test_overview_uses_requested_timeframes() {
        let hot = vec![HotToken {
            symbol: "BONK".to_string(),
            token_address: "bonk-mint".to_string(),
            trade_count: 60,
            total_volume_sol: 100.0,
            total_volume_usd: 15_000.0,
            timeframe: "N/A".to_string(),
        }];
        let leaderboard = vec![LeaderboardTrader {
            id: 1,
            trader_name: "Flat".to_string(),
            wallet_address: "wallet".to_string(),
            ranking_position: 1,
            pnl_sol: -0.0,
            pnl_usd: 0.0,
            wins: 0,
            losses: 0,
            timeframe: "N/A".to_string(),
            win_rate: 0.0,
        }];
        let timeframes = OverviewTimeframes {
            hot_tokens: "4h",
            leaderboard: "weekly",
        };

        let summary = render_overview(&hot, &leaderboard, &[], timeframes);
        assert!(summary.contains("🔥 Hottest Token (4h): $BONK"));
        assert!(summary.contains("🏆 Top Trader (Weekly): Flat\n   • PnL: +0.00 SOL"));
        assert!(!summary.contains("N/A"));
    }
}
