use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::AccountTier;

/// Position sizes for the prop firm account and the mirrored real account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LotPair {
    pub pf: f64,
    pub real: f64,
}

impl LotPair {
    pub fn new(pf: f64, real: f64) -> Self {
        Self { pf, real }
    }
}

/// One named trade step within a stage, e.g. "P1 1ST TRADE".
///
/// `tp` and `sl` are price distances from the open price and are shared by
/// every account tier. Lots are looked up per tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDefinition {
    pub name: String,
    pub lots: BTreeMap<AccountTier, LotPair>,
    pub tp: f64,
    pub sl: f64,
}

impl SegmentDefinition {
    pub fn new(name: &str, tp: f64, sl: f64) -> Self {
        Self {
            name: name.to_string(),
            lots: BTreeMap::new(),
            tp,
            sl,
        }
    }

    pub fn with_lots(mut self, tier: AccountTier, pf: f64, real: f64) -> Self {
        self.lots.insert(tier, LotPair::new(pf, real));
        self
    }

    pub fn lot_for(&self, tier: AccountTier) -> Option<LotPair> {
        self.lots.get(&tier).copied()
    }

    pub fn missing_tiers<'a>(
        &'a self,
        required: &'a [AccountTier],
    ) -> impl Iterator<Item = AccountTier> + 'a {
        required
            .iter()
            .copied()
            .filter(move |t| !self.lots.contains_key(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lot_lookup_by_tier() {
        let seg = SegmentDefinition::new("P1 1ST TRADE", 20.2, 10.2)
            .with_lots(AccountTier::K100, 4.0, 0.3)
            .with_lots(AccountTier::K50, 2.0, 0.18);

        assert_eq!(seg.lot_for(AccountTier::K100), Some(LotPair::new(4.0, 0.3)));
        assert_eq!(seg.lot_for(AccountTier::K5), None);
    }

    #[test]
    fn reports_missing_tiers() {
        let seg = SegmentDefinition::new("1ST TRADE", 20.2, 10.2)
            .with_lots(AccountTier::K100, 2.4, 0.94);

        let missing: Vec<AccountTier> = seg.missing_tiers(&AccountTier::ALL).collect();
        assert_eq!(
            missing,
            vec![AccountTier::K50, AccountTier::K25, AccountTier::K5]
        );
    }
}
