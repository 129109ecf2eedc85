pub mod calculator;

pub use calculator::{calculate, TradeRequest, FUNDED_BALANCE};
