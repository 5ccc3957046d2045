use crate::types::RefPrice;

/// Percentage drop from the current price to the reference price, rounded
/// half away from zero to a whole percent (19.5 rounds to 20).
///
/// Returns `None` when no meaningful drop can be computed: a zero or
/// non-finite original price, or a current price above the reference
/// (a raise, not a drop). Callers treat `None` as "no discount".
pub fn percentage_drop(price: f64, reference: RefPrice) -> Option<u32> {
    let original = match reference {
        RefPrice::Savings(savings) => savings + price,
        RefPrice::Was(was) => was,
    };
    if !original.is_finite() || original <= 0.0 {
        return None;
    }
    let drop = (1.0 - price / original) * 100.0;
    if !drop.is_finite() || drop < 0.0 {
        return None;
    }
    Some(drop.round() as u32)
}

/// Threshold comparison is inclusive: a drop exactly at the configured
/// threshold qualifies for the alert.
pub fn qualifies(drop: u32, threshold: u32) -> bool {
    drop >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RefPrice::{Savings, Was};

    #[test]
    fn was_price_formula() {
        // $8.00 now, was $10.00
        assert_eq!(percentage_drop(8.0, Was(10.0)), Some(20));
        assert_eq!(percentage_drop(7.5, Was(10.0)), Some(25));
    }

    #[test]
    fn savings_reconstructs_original() {
        // $9.50 now with $0.50 saved means the original was $10.00
        assert_eq!(percentage_drop(9.5, Savings(0.5)), Some(5));
        assert_eq!(percentage_drop(8.0, Savings(2.0)), Some(20));
    }

    #[test]
    fn zero_savings_is_zero_drop() {
        assert_eq!(percentage_drop(12.99, Savings(0.0)), Some(0));
    }

    #[test]
    fn equal_was_price_is_zero_drop() {
        assert_eq!(percentage_drop(10.0, Was(10.0)), Some(0));
    }

    #[test]
    fn price_above_was_is_no_drop() {
        assert_eq!(percentage_drop(11.0, Was(10.0)), None);
    }

    #[test]
    fn zero_or_negative_reference_is_no_drop() {
        assert_eq!(percentage_drop(5.0, Was(0.0)), None);
        assert_eq!(percentage_drop(0.0, Savings(0.0)), None);
        assert_eq!(percentage_drop(5.0, Was(-1.0)), None);
    }

    #[test]
    fn non_finite_reference_is_no_drop() {
        assert_eq!(percentage_drop(5.0, Was(f64::NAN)), None);
        assert_eq!(percentage_drop(5.0, Was(f64::INFINITY)), None);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 12.5% is exact in binary, so the half-boundary is genuinely hit
        assert_eq!(percentage_drop(87.5, Was(100.0)), Some(13));
        assert_eq!(percentage_drop(87.5, Savings(12.5)), Some(13));
        assert_eq!(percentage_drop(87.6, Was(100.0)), Some(12));
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert!(qualifies(20, 20));
        assert!(!qualifies(19, 20));
        assert!(qualifies(21, 20));
    }
}
