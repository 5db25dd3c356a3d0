use super::{Metadata, Rendered};
use crate::models::HotToken;
use crate::trading::TradingSignal;
use chrono::Utc;

const DISCLAIMER: &str = "*Note: This analysis is generated from real-time KOL trading data. Always DYOR (Do Your Own Research) before investing.*";

pub fn analysis_text(token: &HotToken, signal: &TradingSignal) -> String {
    let metrics = &signal.metrics;
    format!(
        "📊 **Token Analysis: ${symbol}**\n\
         \n\
         {emoji} **Recommendation: {action}**\n\
         Confidence: {confidence}%\n\
         \n\
         **Metrics:**\n\
         • Volume Score: {volume}/100\n\
         • Trader Interest: {trader}/100\n\
         • Momentum: {momentum}/100\n\
         • Risk Level: {risk}\n\
         \n\
         **Market Data:**\n\
         • Total Trades: {trades}\n\
         • Volume: {sol:.2} SOL (${usd:.2})\n\
         • Timeframe: {timeframe}\n\
         \n\
         **Reasoning:**\n\
         {reasoning}\n\
         \n\
         **Contract:** `{address}`\n\
         \n\
         {disclaimer}",
        symbol = token.symbol,
        emoji = signal.action.emoji(),
        action = signal.action,
        confidence = signal.confidence,
        volume = metrics.volume_score,
        trader = metrics.trader_score,
        momentum = metrics.momentum_score,
        risk = metrics.risk_level,
        trades = token.trade_count,
        sol = token.total_volume_sol,
        usd = token.total_volume_usd,
        timeframe = token.timeframe,
        reasoning = signal.reasoning,
        address = token.token_address,
        disclaimer = DISCLAIMER,
    )
}

pub fn render_analysis(token: &HotToken, signal: &TradingSignal) -> Rendered {
    Rendered {
        text: analysis_text(token, signal),
        metadata: Metadata::Analysis {
            token: token.symbol.clone(),
            token_address: token.token_address.clone(),
            signal: signal.action,
            confidence: signal.confidence,
            timestamp: Utc::now(),
        },
    }
}
