use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::info;

use crate::models::{AccountTier, SegmentDefinition, Stage};
use crate::repository::{ReferenceData, SegmentRepository};

/// Lot pairs (pf, real) in tier order 100K, 50K, 25K, 5K.
type TierLots = [(f64, f64); 4];

const EVALUATION_TABLE: [(&str, f64, f64, TierLots); 6] = [
    ("P1 1ST TRADE", 20.2, 10.2, [(4.0, 0.3), (2.0, 0.18), (1.0, 0.1), (0.2, 0.02)]),
    ("P1 2ND TRADE", 30.2, 10.2, [(4.0, 0.3), (2.0, 0.18), (1.0, 0.1), (0.2, 0.02)]),
    ("P1 3RD TRADE", 80.2, 10.2, [(2.0, 0.15), (1.0, 0.09), (0.5, 0.05), (0.1, 0.01)]),
    ("P2 1ST TRADE", 12.7, 10.2, [(4.0, 0.55), (2.0, 0.32), (1.0, 0.18), (0.2, 0.036)]),
    ("P2 2ND TRADE", 22.7, 10.2, [(4.0, 0.55), (2.0, 0.32), (1.0, 0.18), (0.2, 0.036)]),
    ("P2 3RD TRADE", 32.7, 10.2, [(2.0, 0.275), (1.0, 0.16), (0.5, 0.09), (0.1, 0.018)]),
];

const FUNDED_LOTS: TierLots = [(2.4, 0.94), (1.2, 0.48), (0.6, 0.24), (0.12, 0.048)];

const FUNDED_TABLE: [(&str, f64, f64, TierLots); 4] = [
    ("1ST TRADE", 20.2, 10.2, FUNDED_LOTS),
    ("2ND TRADE", 30.2, 10.2, FUNDED_LOTS),
    ("3RD TRADE", 40.2, 10.2, FUNDED_LOTS),
    ("4TH TRADE", 50.2, 10.2, FUNDED_LOTS),
];

const STARTING_BALANCES: [(AccountTier, f64); 4] = [
    (AccountTier::K100, 1900.0),
    (AccountTier::K50, 1000.0),
    (AccountTier::K25, 500.0),
    (AccountTier::K5, 100.0),
];

fn build(table: &[(&str, f64, f64, TierLots)]) -> Vec<SegmentDefinition> {
    table
        .iter()
        .map(|(name, tp, sl, lots)| {
            AccountTier::ALL
                .iter()
                .zip(lots.iter())
                .fold(SegmentDefinition::new(name, *tp, *sl), |seg, (tier, (pf, real))| {
                    seg.with_lots(*tier, *pf, *real)
                })
        })
        .collect()
}

pub fn evaluation_segments() -> Vec<SegmentDefinition> {
    build(&EVALUATION_TABLE)
}

pub fn funded_segments() -> Vec<SegmentDefinition> {
    build(&FUNDED_TABLE)
}

pub fn starting_balances() -> BTreeMap<AccountTier, f64> {
    STARTING_BALANCES.into_iter().collect()
}

/// The compiled-in segment tables.
pub struct StaticRepository;

impl StaticRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn snapshot(&self) -> Result<ReferenceData> {
        let data = ReferenceData::new(
            evaluation_segments(),
            funded_segments(),
            starting_balances(),
            self.name(),
        )?;
        info!(
            "Loaded builtin reference data: {} evaluation / {} funded segments",
            data.segments(Stage::Evaluation).len(),
            data.segments(Stage::Funded).len()
        );
        Ok(data)
    }
}

impl Default for StaticRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SegmentRepository for StaticRepository {
    fn name(&self) -> &str {
        "builtin"
    }

    async fn load(&mut self) -> Result<ReferenceData> {
        self.snapshot()
    }
}
