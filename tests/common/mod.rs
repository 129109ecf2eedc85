use std::collections::BTreeMap;

use pf_trade_calculator::models::{AccountTier, SegmentDefinition};

/// Segments defining lots only for 100K/50K/25K, matching a balance table
/// without a 5K entry.
pub fn three_tier_segments(names: &[(&str, f64)]) -> Vec<SegmentDefinition> {
    names
        .iter()
        .map(|&(name, tp)| {
            SegmentDefinition::new(name, tp, 10.2)
                .with_lots(AccountTier::K100, 4.0, 0.3)
                .with_lots(AccountTier::K50, 2.0, 0.18)
                .with_lots(AccountTier::K25, 1.0, 0.1)
        })
        .collect()
}

pub fn three_tier_balances() -> BTreeMap<AccountTier, f64> {
    BTreeMap::from([
        (AccountTier::K100, 1900.0),
        (AccountTier::K50, 1000.0),
        (AccountTier::K25, 500.0),
    ])
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
