use crate::canonical::{canonicalize_records, Canonical};
use crate::error::{Error, Result};
use crate::models::{HotToken, LeaderboardTrader, RawTrade, Trader};
use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub mod kol;

pub use kol::KolApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    HotTokens,
    Leaderboard,
    Traders,
    Trades,
}

impl FeedKind {
    pub fn path(&self) -> &'static str {
        match self {
            FeedKind::HotTokens => "/hot-tokens",
            FeedKind::Leaderboard => "/leaderboard",
            FeedKind::Traders => "/traders",
            FeedKind::Trades => "/trades",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedKind::HotTokens => "hot tokens",
            FeedKind::Leaderboard => "leaderboard",
            FeedKind::Traders => "traders",
            FeedKind::Trades => "recent trades",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub kind: FeedKind,
    pub timeframe: Option<String>,
    pub limit: u32,
}

impl FeedQuery {
    pub fn new(kind: FeedKind, limit: u32) -> Self {
        Self {
            kind,
            timeframe: None,
            limit,
        }
    }

    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = Some(timeframe.into());
        self
    }

    /// Query-string parameters, timeframe first when present.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(timeframe) = &self.timeframe {
            params.push(("timeframe", timeframe.clone()));
        }
        params.push(("limit", self.limit.to_string()));
        params
    }
}

/// Anything that can answer a feed query with raw JSON.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, query: &FeedQuery) -> Result<Value>;
}

/// Which feeds one snapshot needs. Feeds left as `None` are not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotPlan {
    pub hot_tokens: Option<FeedQuery>,
    pub leaderboard: Option<FeedQuery>,
    pub traders: Option<FeedQuery>,
    pub trades: Option<FeedQuery>,
}

impl SnapshotPlan {
    pub fn planned(&self) -> Vec<FeedKind> {
        [
            &self.hot_tokens,
            &self.leaderboard,
            &self.traders,
            &self.trades,
        ]
        .into_iter()
        .flatten()
        .map(|query| query.kind)
        .collect()
    }
}

/// Canonical collections from one round of concurrent fetches. A feed that
/// failed is empty here and listed in `failed`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSnapshot {
    pub hot_tokens: Vec<HotToken>,
    pub leaderboard: Vec<LeaderboardTrader>,
    pub traders: Vec<Trader>,
    pub trades: Vec<RawTrade>,
    pub failed: Vec<FeedKind>,
}

impl MarketSnapshot {
    pub fn is_degraded(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn has_failed(&self, kind: FeedKind) -> bool {
        self.failed.contains(&kind)
    }

    /// True when every feed in `plan` failed. An empty plan never fails.
    pub fn all_failed(&self, plan: &SnapshotPlan) -> bool {
        let planned = plan.planned();
        !planned.is_empty() && planned.iter().all(|kind| self.has_failed(*kind))
    }

    pub fn error_marker(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        Some(format!("Failed to fetch KOL data: {}", self.failed_labels()))
    }

    pub fn unavailable_summary(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        Some(format!("Data unavailable: {}", self.failed_labels()))
    }

    fn failed_labels(&self) -> String {
        self.failed
            .iter()
            .map(FeedKind::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Fetches feeds from a [`FeedSource`] and canonicalizes them.
#[derive(Debug, Clone)]
pub struct FeedAggregator<S: FeedSource> {
    source: S,
}

impl<S: FeedSource> FeedAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches one feed. Transport errors are returned to the caller; shape
    /// problems only ever produce an empty collection.
    pub async fn fetch_feed<T: Canonical>(&self, query: &FeedQuery) -> Result<Vec<T>> {
        let raw = self.source.fetch(query).await?;
        let records = canonicalize_records::<T>(&raw);
        info!("Fetched {} {} records", records.len(), query.kind);
        Ok(records)
    }

    /// Fetches every planned feed concurrently and waits for all of them.
    /// Never fails: a feed whose request fails degrades to an empty collection.
    pub async fn collect(&self, plan: &SnapshotPlan) -> MarketSnapshot {
        let (hot_tokens, leaderboard, traders, trades) = tokio::join!(
            self.fetch_planned::<HotToken>(plan.hot_tokens.as_ref()),
            self.fetch_planned::<LeaderboardTrader>(plan.leaderboard.as_ref()),
            self.fetch_planned::<Trader>(plan.traders.as_ref()),
            self.fetch_planned::<RawTrade>(plan.trades.as_ref()),
        );

        let mut failed = Vec::new();
        let snapshot = MarketSnapshot {
            hot_tokens: absorb(FeedKind::HotTokens, hot_tokens, &mut failed),
            leaderboard: absorb(FeedKind::Leaderboard, leaderboard, &mut failed),
            traders: absorb(FeedKind::Traders, traders, &mut failed),
            trades: absorb(FeedKind::Trades, trades, &mut failed),
            failed,
        };

        if snapshot.is_degraded() {
            warn!(
                "Market snapshot degraded; unavailable feeds: {:?}",
                snapshot.failed
            );
        }
        snapshot
    }

    /// Like [`collect`](Self::collect), but any failed feed fails the whole call.
    pub async fn collect_strict(&self, plan: &SnapshotPlan) -> Result<MarketSnapshot> {
        let snapshot = self.collect(plan).await;
        match snapshot.error_marker() {
            Some(marker) => Err(Error::TransportFailure(marker)),
            None => Ok(snapshot),
        }
    }

    async fn fetch_planned<T: Canonical>(
        &self,
        query: Option<&FeedQuery>,
    ) -> Option<Result<Vec<T>>> {
        match query {
            Some(query) => Some(self.fetch_feed::<T>(query).await),
            None => None,
        }
    }
}

fn absorb<T>(kind: FeedKind, outcome: Option<Result<Vec<T>>>, failed: &mut Vec<FeedKind>) -> Vec<T> {
    match outcome {
        Some(Ok(records)) => records,
        Some(Err(e)) => {
            warn!("{} feed unavailable, continuing without it: {}", kind, e);
            failed.push(kind);
            Vec::new()
        }
        None => Vec::new(),
    }
}
