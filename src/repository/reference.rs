use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

use crate::error::ConfigError;
use crate::models::{AccountTier, SegmentDefinition, Stage};

/// Immutable snapshot of everything the calculator reads: the segment list
/// for each stage and the evaluation starting balances.
///
/// Only constructible through [`ReferenceData::new`], so every snapshot in
/// circulation has passed validation.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceData {
    evaluation: Vec<SegmentDefinition>,
    funded: Vec<SegmentDefinition>,
    balances: BTreeMap<AccountTier, f64>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl ReferenceData {
    pub fn new(
        evaluation: Vec<SegmentDefinition>,
        funded: Vec<SegmentDefinition>,
        balances: BTreeMap<AccountTier, f64>,
        source: &str,
    ) -> Result<Self, ConfigError> {
        let data = Self {
            evaluation,
            funded,
            balances,
            source: source.to_string(),
            loaded_at: Utc::now(),
        };
        data.validate()?;
        Ok(data)
    }

    /// Checks the invariants the calculator relies on.
    ///
    /// Every tier that has a starting balance must have a lot pair in every
    /// segment of both stages, so a missing lot mapping surfaces here rather
    /// than at calculation time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required: Vec<AccountTier> = self.balances.keys().copied().collect();

        for (tier, balance) in &self.balances {
            if !balance.is_finite() || *balance < 0.0 {
                return Err(ConfigError::InvalidBalance {
                    tier: *tier,
                    value: *balance,
                });
            }
        }

        for stage in Stage::ALL {
            let segments = self.segments(stage);
            if segments.is_empty() {
                return Err(ConfigError::EmptyStage(stage));
            }

            let mut seen = HashSet::new();
            for seg in segments {
                if !seen.insert(seg.name.as_str()) {
                    return Err(ConfigError::DuplicateSegment {
                        stage,
                        segment: seg.name.clone(),
                    });
                }

                check_distance(stage, seg, "tp", seg.tp)?;
                check_distance(stage, seg, "sl", seg.sl)?;

                for (tier, lots) in &seg.lots {
                    for (field, value) in [("pf lot", lots.pf), ("real lot", lots.real)] {
                        if !value.is_finite() || value < 0.0 {
                            warn!(
                                "Rejecting {} segment '{}': {} {} = {}",
                                stage, seg.name, tier, field, value
                            );
                            return Err(ConfigError::InvalidValue {
                                stage,
                                segment: seg.name.clone(),
                                field,
                                value,
                            });
                        }
                    }
                }

                if let Some(tier) = seg.missing_tiers(&required).next() {
                    warn!(
                        "{} segment '{}' has no lot sizes for {}",
                        stage, seg.name, tier
                    );
                    return Err(ConfigError::MissingTier {
                        stage,
                        segment: seg.name.clone(),
                        tier,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn segments(&self, stage: Stage) -> &[SegmentDefinition] {
        match stage {
            Stage::Evaluation => &self.evaluation,
            Stage::Funded => &self.funded,
        }
    }

    /// Exact, case-sensitive name match within the stage.
    pub fn find_segment(&self, stage: Stage, name: &str) -> Option<&SegmentDefinition> {
        self.segments(stage).iter().find(|s| s.name == name)
    }

    pub fn segment_names(&self, stage: Stage) -> Vec<&str> {
        self.segments(stage).iter().map(|s| s.name.as_str()).collect()
    }

    pub fn starting_balance(&self, tier: AccountTier) -> Option<f64> {
        self.balances.get(&tier).copied()
    }

    pub fn balances(&self) -> &BTreeMap<AccountTier, f64> {
        &self.balances
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn check_distance(
    stage: Stage,
    seg: &SegmentDefinition,
    field: &'static str,
    value: f64,
) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        stage,
        segment: seg.name.clone(),
        field,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(name: &str) -> SegmentDefinition {
        SegmentDefinition::new(name, 20.2, 10.2)
            .with_lots(AccountTier::K100, 4.0, 0.3)
            .with_lots(AccountTier::K50, 2.0, 0.18)
    }

    fn balances() -> BTreeMap<AccountTier, f64> {
        BTreeMap::from([(AccountTier::K100, 1900.0), (AccountTier::K50, 1000.0)])
    }

    #[test]
    fn accepts_consistent_tables() {
        let data = ReferenceData::new(
            vec![seg("P1 1ST TRADE"), seg("P1 2ND TRADE")],
            vec![seg("1ST TRADE")],
            balances(),
            "test",
        )
        .unwrap();

        assert_eq!(data.segment_names(Stage::Evaluation), vec!["P1 1ST TRADE", "P1 2ND TRADE"]);
        assert!(data.find_segment(Stage::Funded, "1ST TRADE").is_some());
        assert!(data.find_segment(Stage::Funded, "1st trade").is_none());
        assert_eq!(data.starting_balance(AccountTier::K100), Some(1900.0));
        assert_eq!(data.starting_balance(AccountTier::K5), None);
        assert_eq!(data.source(), "test");
    }

    #[test]
    fn rejects_tier_with_balance_but_no_lots() {
        let mut bal = balances();
        bal.insert(AccountTier::K5, 100.0);

        let err = ReferenceData::new(vec![seg("P1 1ST TRADE")], vec![seg("1ST TRADE")], bal, "test")
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::MissingTier {
                stage: Stage::Evaluation,
                segment: "P1 1ST TRADE".to_string(),
                tier: AccountTier::K5,
            }
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = ReferenceData::new(
            vec![seg("P1 1ST TRADE")],
            vec![seg("1ST TRADE"), seg("1ST TRADE")],
            balances(),
            "test",
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateSegment { stage: Stage::Funded, .. }));
    }

    #[test]
    fn rejects_empty_stage() {
        let err = ReferenceData::new(vec![seg("P1 1ST TRADE")], vec![], balances(), "test")
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyStage(Stage::Funded));
    }

    #[test]
    fn rejects_non_finite_offsets() {
        let mut bad = seg("P1 1ST TRADE");
        bad.tp = f64::NAN;
        let err = ReferenceData::new(vec![bad], vec![seg("1ST TRADE")], balances(), "test")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "tp", .. }));
    }

    #[test]
    fn rejects_negative_or_non_finite_balance() {
        let mut bal = balances();
        bal.insert(AccountTier::K50, -1000.0);
        let err = ReferenceData::new(vec![seg("P1 1ST TRADE")], vec![seg("1ST TRADE")], bal, "test")
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBalance {
                tier: AccountTier::K50,
                value: -1000.0,
            }
        );

        let mut bal = balances();
        bal.insert(AccountTier::K100, f64::INFINITY);
        let err = ReferenceData::new(vec![seg("P1 1ST TRADE")], vec![seg("1ST TRADE")], bal, "test")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBalance { tier: AccountTier::K100, .. }));
    }

    #[test]
    fn rejects_negative_lot() {
        let bad = seg("P1 1ST TRADE").with_lots(AccountTier::K50, -1.0, 0.18);
        let err = ReferenceData::new(vec![bad], vec![seg("1ST TRADE")], balances(), "test")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "pf lot", .. }));
    }
}
