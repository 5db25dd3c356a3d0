#![allow(dead_code)]

use async_trait::async_trait;
use kol_insights::api::{FeedKind, FeedQuery, FeedSource};
use kol_insights::config::FeedsConfig;
use kol_insights::error::{Error, Result};
use kol_insights::models::HotToken;
use mockall::mock;
use serde_json::{json, Value};

pub const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
pub const WIF_MINT: &str = "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm";

mock! {
    pub Source {}

    #[async_trait]
    impl FeedSource for Source {
        async fn fetch(&self, query: &FeedQuery) -> Result<Value>;
    }
}

pub fn hot_token(symbol: &str, address: &str, volume_sol: f64, trade_count: u64) -> HotToken {
    HotToken {
        symbol: symbol.to_string(),
        token_address: address.to_string(),
        trade_count,
        total_volume_sol: volume_sol,
        total_volume_usd: volume_sol * 150.0,
        timeframe: "1h".to_string(),
    }
}

/// BONK (100 SOL, 60 trades) and WIF (50 SOL, 10 trades).
pub fn hot_tokens() -> Vec<HotToken> {
    vec![
        hot_token("BONK", BONK_MINT, 100.0, 60),
        hot_token("WIF", WIF_MINT, 50.0, 10),
    ]
}

pub fn hot_tokens_payload() -> Value {
    json!({
        "data": [
            {
                "symbol": "BONK",
                "token_address": BONK_MINT,
                "trade_count": 60,
                "total_volume_sol": 100.0,
                "total_volume_usd": 15000.0,
                "timeframe": "1h"
            },
            {
                "symbol": "WIF",
                "token_address": WIF_MINT,
                "trade_count": 10,
                "total_volume_sol": 50.0,
                "total_volume_usd": 7500.0,
                "timeframe": "1h"
            }
        ]
    })
}

pub fn leaderboard_payload() -> Value {
    json!({
        "leaderboard": [
            {
                "id": 7,
                "trader_name": "Cented",
                "wallet_address": "CyaE1VxvBrahnPWkqm5VsdCvyS2QmNht2UFrKJHga54o",
                "rank": 1,
                "pnl_sol": 42.5,
                "pnl_usd": 6375.0,
                "wins": 8,
                "losses": 2,
                "timeframe": "daily"
            },
            {
                "id": 11,
                "trader_name": "Jidn",
                "wallet_address": "3h65MmPZksoKKyEpEjnWU2Yk2iYT5oZDNitGy5cTaxoE",
                "pnl_sol": -3.0,
                "wins": 1,
                "losses": 4,
                "timeframe": "daily"
            }
        ]
    })
}

pub fn traders_payload() -> Value {
    json!([
        {
            "id": 3,
            "trader_name": "Orangie",
            "wallet_address": "96sErVjEN7LNJ6Uvj63bdRWZxNuBngj56fnT9biHLKBf",
            "total_trades": 87,
            "total_volume_sol": 410.0,
            "total_volume_usd": 61500.0
        }
    ])
}

/// `count` BONK buys followed by one WIF sell.
pub fn trades_payload(count: usize) -> Value {
    let mut trades: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "trade_type": "buy",
                "symbol": "BONK",
                "token_address": BONK_MINT,
                "amount_sol": 1.5,
                "trader_name": format!("trader-{}", i)
            })
        })
        .collect();
    trades.push(json!({
        "trade_type": "SELL",
        "symbol": "WIF",
        "token_address": WIF_MINT,
        "amount_sol": 0.75,
        "trader_name": "Euris"
    }));
    json!({ "trades": trades })
}

/// Per-feed responses for a [`MockSource`]. `None` makes that feed fail with
/// a connection error.
#[derive(Clone, Default)]
pub struct Feeds {
    pub hot_tokens: Option<Value>,
    pub leaderboard: Option<Value>,
    pub traders: Option<Value>,
    pub trades: Option<Value>,
}

impl Feeds {
    pub fn healthy() -> Self {
        Self {
            hot_tokens: Some(hot_tokens_payload()),
            leaderboard: Some(leaderboard_payload()),
            traders: Some(traders_payload()),
            trades: Some(trades_payload(25)),
        }
    }

    fn respond(&self, query: &FeedQuery) -> Result<Value> {
        let payload = match query.kind {
            FeedKind::HotTokens => &self.hot_tokens,
            FeedKind::Leaderboard => &self.leaderboard,
            FeedKind::Traders => &self.traders,
            FeedKind::Trades => &self.trades,
        };
        payload.clone().ok_or_else(|| {
            Error::ApiConnectionFailed(format!("{} endpoint unreachable", query.kind))
        })
    }
}

/// A source that answers any number of queries from `feeds`.
pub fn routed_source(feeds: Feeds) -> MockSource {
    let mut source = MockSource::new();
    source
        .expect_fetch()
        .returning(move |query| feeds.respond(query));
    source
}

pub fn test_feeds_config() -> FeedsConfig {
    FeedsConfig::default()
}
