use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CalcError;
use crate::models::{AccountTier, CalculationResult, Stage, TradeAction};
use crate::repository::ReferenceData;

/// Equity baseline shown for every funded-stage calculation.
pub const FUNDED_BALANCE: f64 = 1000.0;

/// One set of calculator inputs as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub account: AccountTier,
    pub stage: Stage,
    pub segment: String,
    pub action: TradeAction,
    pub pf_open: f64,
    pub real_open: f64,
}

impl TradeRequest {
    pub fn evaluate(&self, reference: &ReferenceData) -> Result<CalculationResult, CalcError> {
        calculate(
            reference,
            self.account,
            self.stage,
            &self.segment,
            self.action,
            self.pf_open,
            self.real_open,
        )
    }
}

/// Derives lots, TP/SL prices and balance for one trade.
///
/// An unknown segment name is not an error: it yields
/// [`CalculationResult::zero`]. A matched segment without lots for `tier`
/// is a configuration problem and returns [`CalcError::MissingLotTier`].
///
/// Prices are taken as given. NaN or infinite open prices propagate into
/// the derived prices.
pub fn calculate(
    reference: &ReferenceData,
    tier: AccountTier,
    stage: Stage,
    segment: &str,
    action: TradeAction,
    pf_open: f64,
    real_open: f64,
) -> Result<CalculationResult, CalcError> {
    let seg = match reference.find_segment(stage, segment) {
        Some(s) => s,
        None => {
            debug!("No {} segment named '{}'", stage, segment);
            return Ok(CalculationResult::zero());
        }
    };

    let lots = seg.lot_for(tier).ok_or_else(|| CalcError::MissingLotTier {
        stage,
        segment: seg.name.clone(),
        tier,
    })?;

    // SELL profits on a decline: TP below entry, SL above. BUY is the mirror.
    let sign = action.sign();
    let tp_offset = sign * seg.tp;
    let sl_offset = -sign * seg.sl;

    let balance = match stage {
        Stage::Evaluation => reference.starting_balance(tier).unwrap_or(0.0),
        Stage::Funded => FUNDED_BALANCE,
    };

    let result = CalculationResult {
        pf_lot: lots.pf,
        real_lot: lots.real,
        pf_tp: round3(pf_open + tp_offset),
        pf_sl: round3(pf_open + sl_offset),
        real_tp: round3(real_open + tp_offset),
        real_sl: round3(real_open + sl_offset),
        balance,
    };

    debug!(
        "{} {} {} {} | pf {} -> tp {:.3} sl {:.3} | real {} -> tp {:.3} sl {:.3}",
        stage,
        tier,
        seg.name,
        action,
        pf_open,
        result.pf_tp,
        result.pf_sl,
        real_open,
        result.real_tp,
        result.real_sl
    );

    Ok(result)
}

/// Rounds to 3 decimals on the exact binary value of `x`, ties away from zero.
pub fn round3(x: f64) -> f64 {
    // Doubles at or above 2^53 have no fractional part.
    if !x.is_finite() || x.abs() >= 9_007_199_254_740_992.0 {
        return x;
    }

    // 60 fractional digits is the full expansion for any |x| >= 2^-8.
    let exact = format!("{:.60}", x.abs());
    let (whole, frac) = match exact.split_once('.') {
        Some(parts) => parts,
        None => return x,
    };

    let mut thousandths: u64 = match format!("{}{}", whole, &frac[..3]).parse() {
        Ok(n) => n,
        Err(_) => return x,
    };
    if frac.as_bytes()[3] >= b'5' {
        thousandths += 1;
    }

    format!("{}.{:03}", thousandths / 1000, thousandths % 1000)
        .parse::<f64>()
        .map(|r| r.copysign(x))
        .unwrap_or(x)
}
