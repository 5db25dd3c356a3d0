//! The three requests the chat front end can make: list a feed, analyze a
//! token, or build the market context. Each one always produces a response;
//! feed problems show up as [`Outcome::Degraded`], never as errors.

use crate::api::{FeedAggregator, FeedKind, FeedQuery, FeedSource, KolApiClient, SnapshotPlan};
use crate::config::{Config, FeedsConfig};
use crate::error::Result;
use crate::models::{HotToken, LeaderboardTrader, RawTrade, Trader};
use crate::render::{self, Metadata, OverviewTimeframes, Rendered, View};
use crate::trading::generate_signal;
use crate::validation::{require_token, TokenIdentifier};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::Serialize;

const LISTING_FAILURE: &str = "Sorry, I couldn't fetch the KOL data right now. Please try again later.";
const ANALYSIS_FAILURE: &str =
    "Sorry, I encountered an error analyzing the token. Please try again later.";
const CONTEXT_FAILURE: &str = "Failed to fetch KOL data";
const CONTEXT_UNAVAILABLE: &str = "Data unavailable";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        text: String,
        metadata: Metadata,
    },
    /// The requested token is not in the current hot-token snapshot.
    NotFound { reason: String },
    /// Built with one or more feeds missing. `metadata` is absent when there
    /// was nothing to describe.
    Degraded {
        text: String,
        metadata: Option<Metadata>,
    },
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Success { text, .. } | Outcome::Degraded { text, .. } => text,
            Outcome::NotFound { reason } => reason,
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            Outcome::Success { metadata, .. } => Some(metadata),
            Outcome::Degraded { metadata, .. } => metadata.as_ref(),
            Outcome::NotFound { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    fn from_rendered(rendered: Rendered, degraded: bool) -> Self {
        if degraded {
            Outcome::Degraded {
                text: rendered.text,
                metadata: Some(rendered.metadata),
            }
        } else {
            Outcome::Success {
                text: rendered.text,
                metadata: rendered.metadata,
            }
        }
    }
}

/// Background market data for a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketContext {
    pub hot_tokens: Vec<HotToken>,
    pub top_traders_by_pnl: Vec<LeaderboardTrader>,
    pub active_traders: Vec<Trader>,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct KolService<S: FeedSource> {
    aggregator: FeedAggregator<S>,
    feeds: FeedsConfig,
}

impl KolService<KolApiClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = KolApiClient::new(&config.api)?;
        info!("KOL service using API at {}", client.base_url());
        Ok(Self::new(client, config.feeds.clone()))
    }
}

impl<S: FeedSource> KolService<S> {
    pub fn new(source: S, feeds: FeedsConfig) -> Self {
        Self {
            aggregator: FeedAggregator::new(source),
            feeds,
        }
    }

    pub fn aggregator(&self) -> &FeedAggregator<S> {
        &self.aggregator
    }

    pub fn listing_query(&self, view: View) -> FeedQuery {
        let feeds = &self.feeds;
        match view {
            View::HotTokens => FeedQuery::new(FeedKind::HotTokens, feeds.listing_limit)
                .with_timeframe(feeds.hot_tokens_timeframe.as_str()),
            View::Leaderboard => FeedQuery::new(FeedKind::Leaderboard, feeds.listing_limit)
                .with_timeframe(feeds.leaderboard_timeframe.as_str()),
            View::Traders => FeedQuery::new(FeedKind::Traders, feeds.listing_limit),
            View::Trades => FeedQuery::new(FeedKind::Trades, feeds.trades_listing_limit),
        }
    }

    pub fn analysis_plan(&self) -> SnapshotPlan {
        let feeds = &self.feeds;
        SnapshotPlan {
            hot_tokens: Some(
                FeedQuery::new(FeedKind::HotTokens, feeds.analysis_hot_tokens_limit)
                    .with_timeframe(feeds.hot_tokens_timeframe.as_str()),
            ),
            leaderboard: Some(
                FeedQuery::new(FeedKind::Leaderboard, feeds.analysis_leaderboard_limit)
                    .with_timeframe(feeds.leaderboard_timeframe.as_str()),
            ),
            traders: None,
            trades: Some(FeedQuery::new(FeedKind::Trades, feeds.analysis_trades_limit)),
        }
    }

    pub fn context_plan(&self) -> SnapshotPlan {
        let feeds = &self.feeds;
        SnapshotPlan {
            hot_tokens: Some(
                FeedQuery::new(FeedKind::HotTokens, feeds.context_limit)
                    .with_timeframe(feeds.hot_tokens_timeframe.as_str()),
            ),
            leaderboard: Some(
                FeedQuery::new(FeedKind::Leaderboard, feeds.context_limit)
                    .with_timeframe(feeds.leaderboard_timeframe.as_str()),
            ),
            traders: Some(FeedQuery::new(FeedKind::Traders, feeds.context_limit)),
            trades: None,
        }
    }

    /// Renders one feed as a list view.
    pub async fn list(&self, view: View) -> Outcome {
        let query = self.listing_query(view);
        let rendered = match view {
            View::HotTokens => self
                .aggregator
                .fetch_feed::<HotToken>(&query)
                .await
                .map(|items| render::render_hot_tokens(&items, &self.feeds.hot_tokens_timeframe)),
            View::Leaderboard => self
                .aggregator
                .fetch_feed::<LeaderboardTrader>(&query)
                .await
                .map(|items| {
                    render::render_leaderboard(&items, &self.feeds.leaderboard_timeframe)
                }),
            View::Traders => self
                .aggregator
                .fetch_feed::<Trader>(&query)
                .await
                .map(|items| render::render_traders(&items)),
            View::Trades => self
                .aggregator
                .fetch_feed::<RawTrade>(&query)
                .await
                .map(|items| render::render_trades(&items)),
        };

        match rendered {
            Ok(rendered) => Outcome::from_rendered(rendered, false),
            Err(e) => {
                error!("Error fetching {} listing: {}", view, e);
                Outcome::Degraded {
                    text: LISTING_FAILURE.to_string(),
                    metadata: Some(Metadata::Listing {
                        view,
                        count: 0,
                        timestamp: Utc::now(),
                    }),
                }
            }
        }
    }

    /// Scores the identified token against a fresh market snapshot.
    pub async fn analyze(&self, id: &TokenIdentifier) -> Outcome {
        let plan = self.analysis_plan();
        let snapshot = self.aggregator.collect(&plan).await;

        if snapshot.has_failed(FeedKind::HotTokens) {
            error!("Cannot analyze {}: hot tokens feed unavailable", id);
            return Outcome::Degraded {
                text: ANALYSIS_FAILURE.to_string(),
                metadata: None,
            };
        }

        let token = match require_token(&snapshot.hot_tokens, id) {
            Ok(token) => token,
            Err(e) => {
                info!("{} ({} hot tokens checked)", e, snapshot.hot_tokens.len());
                return Outcome::NotFound {
                    reason: format!(
                        "I couldn't find token {} in the current hot tokens list. It might not have enough trading activity yet, or the symbol might be incorrect.",
                        id.as_str()
                    ),
                };
            }
        };

        let signal = generate_signal(
            token,
            &snapshot.hot_tokens,
            &snapshot.leaderboard,
            &snapshot.trades,
        );
        info!(
            "Analysis for ${}: {} ({}% confidence, {} risk)",
            signal.token, signal.action, signal.confidence, signal.metrics.risk_level
        );

        if snapshot.is_degraded() {
            warn!(
                "Analysis for {} built without: {:?}",
                signal.token, snapshot.failed
            );
        }
        Outcome::from_rendered(render::render_analysis(token, &signal), snapshot.is_degraded())
    }

    /// Hot tokens, leaderboard and active traders plus a readable summary.
    /// Feeds that answered are kept even when others failed.
    pub async fn market_context(&self) -> MarketContext {
        let plan = self.context_plan();
        let snapshot = self.aggregator.collect(&plan).await;

        let (summary, error) = if snapshot.all_failed(&plan) {
            error!("Error fetching KOL data: every context feed failed");
            (
                CONTEXT_UNAVAILABLE.to_string(),
                Some(CONTEXT_FAILURE.to_string()),
            )
        } else {
            let mut summary = render::render_overview(
                &snapshot.hot_tokens,
                &snapshot.leaderboard,
                &snapshot.traders,
                OverviewTimeframes {
                    hot_tokens: &self.feeds.hot_tokens_timeframe,
                    leaderboard: &self.feeds.leaderboard_timeframe,
                },
            );
            if let Some(notice) = snapshot.unavailable_summary() {
                summary.push_str("\n\n⚠️ ");
                summary.push_str(&notice);
            }
            (summary, snapshot.error_marker())
        };

        MarketContext {
            hot_tokens: snapshot.hot_tokens,
            top_traders_by_pnl: snapshot.leaderboard,
            active_traders: snapshot.traders,
            summary,
            timestamp: Utc::now(),
            error,
        }
    }
}
