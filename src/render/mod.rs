//! Fixed-layout text for the chat front end.
//!
//! Every renderer is pure: the only input besides the data is the wall clock,
//! used for the metadata timestamp.

use crate::models::{HotToken, LeaderboardTrader, RawTrade, TradeType, Trader};
use crate::trading::SignalAction;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

mod analysis;
mod overview;

pub use analysis::{analysis_text, render_analysis};
pub use overview::{render_overview, OverviewTimeframes};

/// List views never show more than this many items.
pub const MAX_LIST_ITEMS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    HotTokens,
    Leaderboard,
    Traders,
    Trades,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::HotTokens => "hot tokens",
            View::Leaderboard => "leaderboard",
            View::Traders => "traders",
            View::Trades => "recent trades",
        }
    }

    /// `timeframe` is the one the feed was requested with; views without a
    /// timeframe ignore it.
    fn header(&self, timeframe: &str) -> String {
        match self {
            View::HotTokens => format!("🔥 **Hot Tokens ({})**", timeframe_label(timeframe)),
            View::Leaderboard => format!("🏆 **Top Traders ({})**", timeframe_label(timeframe)),
            View::Traders => "👥 **Active Traders**".to_string(),
            View::Trades => "📊 **Recent Trading Activity**".to_string(),
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            View::HotTokens => "No hot tokens data available at the moment.",
            View::Leaderboard => "No leaderboard data available at the moment.",
            View::Traders => "No trader data available at the moment.",
            View::Trades => "No recent trades available.",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Metadata {
    Listing {
        view: View,
        /// Size of the whole input, not just the displayed items.
        count: usize,
        timestamp: DateTime<Utc>,
    },
    Analysis {
        token: String,
        token_address: String,
        signal: SignalAction,
        confidence: u8,
        timestamp: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub text: String,
    pub metadata: Metadata,
}

/// A canonical collection tagged with the view that displays it.
#[derive(Debug, Clone, Copy)]
pub enum ListData<'a> {
    HotTokens(&'a [HotToken]),
    Leaderboard(&'a [LeaderboardTrader]),
    Traders(&'a [Trader]),
    Trades(&'a [RawTrade]),
}

impl ListData<'_> {
    pub fn view(&self) -> View {
        match self {
            ListData::HotTokens(_) => View::HotTokens,
            ListData::Leaderboard(_) => View::Leaderboard,
            ListData::Traders(_) => View::Traders,
            ListData::Trades(_) => View::Trades,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ListData::HotTokens(items) => items.len(),
            ListData::Leaderboard(items) => items.len(),
            ListData::Traders(items) => items.len(),
            ListData::Trades(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Human label for a feed timeframe: `1h` is "Last Hour", `daily` is "Daily".
pub fn timeframe_label(timeframe: &str) -> String {
    let timeframe = timeframe.trim();
    match timeframe.to_ascii_lowercase().as_str() {
        "1h" => return "Last Hour".to_string(),
        "daily" | "weekly" | "monthly" => {
            let mut chars = timeframe.chars();
            return match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            };
        }
        _ => {}
    }
    match timeframe.strip_suffix('h').map(str::parse::<u32>) {
        Some(Ok(hours)) => format!("Last {} Hours", hours),
        _ => timeframe.to_string(),
    }
}

/// Signed SOL amount. Zero, including `-0.0`, prints as `+0.00`.
pub fn signed_sol(amount: f64) -> String {
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{:+.2}", amount)
}

pub fn render(data: ListData<'_>, timeframe: &str) -> Rendered {
    let view = data.view();
    let text = match data {
        ListData::HotTokens(items) => list_text(view, timeframe, items, hot_token_entry),
        ListData::Leaderboard(items) => list_text(view, timeframe, items, leaderboard_entry),
        ListData::Traders(items) => list_text(view, timeframe, items, trader_entry),
        ListData::Trades(items) => list_text(view, timeframe, items, trade_entry),
    };
    Rendered {
        text,
        metadata: Metadata::Listing {
            view,
            count: data.len(),
            timestamp: Utc::now(),
        },
    }
}

pub fn render_hot_tokens(tokens: &[HotToken], timeframe: &str) -> Rendered {
    render(ListData::HotTokens(tokens), timeframe)
}

pub fn render_leaderboard(traders: &[LeaderboardTrader], timeframe: &str) -> Rendered {
    render(ListData::Leaderboard(traders), timeframe)
}

pub fn render_traders(traders: &[Trader]) -> Rendered {
    render(ListData::Traders(traders), "")
}

pub fn render_trades(trades: &[RawTrade]) -> Rendered {
    render(ListData::Trades(trades), "")
}

fn list_text<T>(
    view: View,
    timeframe: &str,
    items: &[T],
    entry: fn(usize, &T) -> String,
) -> String {
    if items.is_empty() {
        return view.empty_message().to_string();
    }

    let mut response = format!("{}\n\n", view.header(timeframe));
    for (idx, item) in items.iter().take(MAX_LIST_ITEMS).enumerate() {
        response.push_str(&entry(idx + 1, item));
        response.push_str("\n\n");
    }
    response.trim().to_string()
}

fn hot_token_entry(n: usize, token: &HotToken) -> String {
    format!(
        "{}. **${}**\n   • Trades: {}\n   • Volume: {:.2} SOL\n   • Address: `{}`",
        n, token.symbol, token.trade_count, token.total_volume_sol, token.token_address
    )
}

fn leaderboard_entry(n: usize, trader: &LeaderboardTrader) -> String {
    let win_rate = match trader.computed_win_rate() {
        Some(rate) => format!("{:.1}", rate),
        None => format!("{}", trader.win_rate),
    };
    format!(
        "{}. **{}**\n   • PnL: {} SOL\n   • Win Rate: {}% ({}W/{}L)\n   • Rank: #{}",
        n,
        trader.trader_name,
        signed_sol(trader.pnl_sol),
        win_rate,
        trader.wins,
        trader.losses,
        trader.ranking_position
    )
}

fn trader_entry(n: usize, trader: &Trader) -> String {
    format!(
        "{}. **{}**\n   • Total Trades: {}\n   • Volume: {:.2} SOL",
        n, trader.trader_name, trader.total_trades, trader.total_volume_sol
    )
}

fn trade_entry(n: usize, trade: &RawTrade) -> String {
    let emoji = if trade.trade_type == TradeType::Buy {
        "🟢"
    } else {
        "🔴"
    };
    format!(
        "{}. {} **{}** ${}\n   • Amount: {:.2} SOL\n   • Trader: {}",
        n, emoji, trade.trade_type, trade.symbol, trade.amount_sol, trade.trader_name
    )
}
