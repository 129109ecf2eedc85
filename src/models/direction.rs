use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
        }
    }

    /// Sign applied to the take-profit offset. Stop-loss uses the opposite sign.
    pub fn sign(&self) -> f64 {
        match self {
            TradeAction::Buy => 1.0,
            TradeAction::Sell => -1.0,
        }
    }
}

impl FromStr for TradeAction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" | "LONG" => Ok(TradeAction::Buy),
            "SELL" | "SHORT" => Ok(TradeAction::Sell),
            _ => Err(ConfigError::UnknownAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("buy".parse::<TradeAction>().unwrap(), TradeAction::Buy);
        assert_eq!(" SELL ".parse::<TradeAction>().unwrap(), TradeAction::Sell);
        assert!("hold".parse::<TradeAction>().is_err());
    }

    #[test]
    fn sign_per_action() {
        assert_eq!(TradeAction::Buy.sign(), 1.0);
        assert_eq!(TradeAction::Sell.sign(), -1.0);
    }

    #[test]
    fn serializes_uppercase() {
        let json = serde_json::to_string(&TradeAction::Sell).unwrap();
        assert_eq!(json, "\"SELL\"");
    }
}
