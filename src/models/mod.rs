pub mod market;
pub mod trader;

pub use market::{HotToken, RawTrade, TradeType};
pub use trader::{LeaderboardTrader, Trader};
