mod common;

use common::*;
use kol_insights::canonical::canonicalize_records;
use kol_insights::models::{LeaderboardTrader, RawTrade};
use kol_insights::render::{render_analysis, render_hot_tokens};
use kol_insights::trading::{generate_signal, RiskLevel, SignalAction};

fn bonk_trades(count: usize) -> Vec<RawTrade> {
    canonicalize_records::<RawTrade>(&trades_payload(count))
}

#[test]
fn test_bonk_scores_as_buy() {
    let tokens = hot_tokens();
    let signal = generate_signal(&tokens[0], &tokens, &[], &bonk_trades(20));

    assert_eq!(signal.metrics.volume_score, 100);
    // 60 trades against the floor of 100
    assert_eq!(signal.metrics.trader_score, 60);
    assert_eq!(signal.metrics.momentum_score, 100);
    assert_eq!(signal.action, SignalAction::Buy);
    assert_eq!(signal.confidence, 87);
    assert_eq!(signal.metrics.risk_level, RiskLevel::Low);
    assert_eq!(
        signal.reasoning,
        "Strong buy signal. High volume (60 trades), strong trader interest, and positive momentum."
    );
}

#[test]
fn test_fully_saturated_token_has_full_confidence() {
    let tokens = vec![hot_token("BONK", BONK_MINT, 100.0, 150)];
    let signal = generate_signal(&tokens[0], &tokens, &[], &bonk_trades(30));
    assert_eq!(signal.action, SignalAction::Buy);
    assert_eq!(signal.confidence, 100);
}

#[test]
fn test_quiet_token_scores_as_sell() {
    let tokens = hot_tokens();
    // WIF: half the volume, 10 trades, a single recent trade
    let signal = generate_signal(&tokens[1], &tokens, &[], &bonk_trades(20));

    assert_eq!(signal.metrics.volume_score, 50);
    assert_eq!(signal.metrics.trader_score, 10);
    assert_eq!(signal.metrics.momentum_score, 5);
    assert_eq!(signal.action, SignalAction::Sell);
    // overall 21.67, confidence is the complement
    assert_eq!(signal.confidence, 78);
    assert_eq!(signal.metrics.risk_level, RiskLevel::Medium);
}

#[test]
fn test_leaderboard_does_not_change_the_signal() {
    let tokens = hot_tokens();
    let leaderboard: Vec<LeaderboardTrader> = canonicalize_records(&leaderboard_payload());
    let trades = bonk_trades(5);

    let without = generate_signal(&tokens[0], &tokens, &[], &trades);
    let with = generate_signal(&tokens[0], &tokens, &leaderboard, &trades);
    assert_eq!(without, with);
}

#[test]
fn test_rendered_analysis_carries_signal() {
    let tokens = hot_tokens();
    let signal = generate_signal(&tokens[0], &tokens, &[], &bonk_trades(20));
    let rendered = render_analysis(&tokens[0], &signal);

    assert!(rendered.text.starts_with("📊 **Token Analysis: $BONK**"));
    assert!(rendered.text.contains("🟢 **Recommendation: BUY**\nConfidence: 87%"));
    assert!(rendered.text.contains("• Risk Level: LOW"));
    assert!(rendered.text.contains(BONK_MINT));
}

#[test]
fn test_empty_hot_tokens_view() {
    assert_eq!(
        render_hot_tokens(&[], "1h").text,
        "No hot tokens data available at the moment."
    );
}
