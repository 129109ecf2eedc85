use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Prop firm account size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountTier {
    #[serde(rename = "100K")]
    K100,
    #[serde(rename = "50K")]
    K50,
    #[serde(rename = "25K")]
    K25,
    #[serde(rename = "5K")]
    K5,
}

impl AccountTier {
    pub const ALL: [AccountTier; 4] = [
        AccountTier::K100,
        AccountTier::K50,
        AccountTier::K25,
        AccountTier::K5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountTier::K100 => "100K",
            AccountTier::K50 => "50K",
            AccountTier::K25 => "25K",
            AccountTier::K5 => "5K",
        }
    }

    /// Column suffix used by the remote segment tables (`pf_lot_100k`, ...).
    pub fn column_suffix(&self) -> &'static str {
        match self {
            AccountTier::K100 => "100k",
            AccountTier::K50 => "50k",
            AccountTier::K25 => "25k",
            AccountTier::K5 => "5k",
        }
    }
}

impl fmt::Display for AccountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountTier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "100K" | "100000" => Ok(AccountTier::K100),
            "50K" | "50000" => Ok(AccountTier::K50),
            "25K" | "25000" => Ok(AccountTier::K25),
            "5K" | "5000" => Ok(AccountTier::K5),
            _ => Err(ConfigError::UnknownTier(s.to_string())),
        }
    }
}

/// Lifecycle stage of the prop firm account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    Evaluation,
    Funded,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::Evaluation, Stage::Funded];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Evaluation => "EVALUATION",
            Stage::Funded => "FUNDED",
        }
    }

    /// Name of the remote table holding this stage's segments.
    pub fn table_name(&self) -> &'static str {
        match self {
            Stage::Evaluation => "trading_segments_evaluation",
            Stage::Funded => "trading_segments_funded",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EVALUATION" | "EVAL" => Ok(Stage::Evaluation),
            "FUNDED" => Ok(Stage::Funded),
            _ => Err(ConfigError::UnknownStage(s.to_string())),
        }
    }
}
