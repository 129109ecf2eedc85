pub mod account;
pub mod calculation;
pub mod direction;
pub mod segment;

pub use account::{AccountTier, Stage};
pub use calculation::CalculationResult;
pub use direction::TradeAction;
pub use segment::{LotPair, SegmentDefinition};
