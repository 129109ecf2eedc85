use thiserror::Error;

use crate::models::{AccountTier, Stage};

/// Failures raised by the calculator itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("segment '{segment}' ({stage}) has no lot sizes for account tier {tier}")]
    MissingLotTier {
        stage: Stage,
        segment: String,
        tier: AccountTier,
    },
}

/// Problems with reference data or with parsing its enumerations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown account tier: {0}")]
    UnknownTier(String),
    #[error("unknown stage: {0}")]
    UnknownStage(String),
    #[error("unknown trade action: {0}")]
    UnknownAction(String),
    #[error("starting balance for {tier} is invalid: {value}")]
    InvalidBalance { tier: AccountTier, value: f64 },
    #[error("no segments defined for stage {0}")]
    EmptyStage(Stage),
    #[error("duplicate segment '{segment}' in stage {stage}")]
    DuplicateSegment { stage: Stage, segment: String },
    #[error("segment '{segment}' ({stage}) is missing lot sizes for tier {tier}")]
    MissingTier {
        stage: Stage,
        segment: String,
        tier: AccountTier,
    },
    #[error("segment '{segment}' ({stage}) has invalid {field}: {value}")]
    InvalidValue {
        stage: Stage,
        segment: String,
        field: &'static str,
        value: f64,
    },
}
