use serde::{Deserialize, Serialize};

/// Output of one calculator run. Prices are rounded to 3 decimals, lots are not.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub pf_lot: f64,
    pub real_lot: f64,
    #[serde(rename = "pfTP")]
    pub pf_tp: f64,
    #[serde(rename = "pfSL")]
    pub pf_sl: f64,
    #[serde(rename = "realTP")]
    pub real_tp: f64,
    #[serde(rename = "realSL")]
    pub real_sl: f64,
    pub balance: f64,
}

impl CalculationResult {
    /// Result returned for a segment name that matches nothing.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_result_is_all_zero() {
        let r = CalculationResult::zero();
        assert!(r.is_zero());
        assert_eq!(r.pf_lot, 0.0);
        assert_eq!(r.balance, 0.0);
    }

    #[test]
    fn json_field_names() {
        let r = CalculationResult {
            pf_lot: 4.0,
            real_lot: 0.3,
            pf_tp: 3976.18,
            pf_sl: 4006.58,
            real_tp: 3976.1,
            real_sl: 4006.5,
            balance: 1900.0,
        };
        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v["pfLot"], 4.0);
        assert_eq!(v["realLot"], 0.3);
        assert_eq!(v["pfTP"], 3976.18);
        assert_eq!(v["realSL"], 4006.5);
        assert_eq!(v["balance"], 1900.0);
    }
}
