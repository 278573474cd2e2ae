//! Core pricing calculation functions.
//!
//! Pure functions for delivery fee math - no database access.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::{ItemType, RuleTerms};

/// Minor currency units per major unit.
const MINOR_UNITS: Decimal = Decimal::ONE_HUNDRED;

/// Round to specified decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use delivery_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.005), 2), dec!(1.01));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Rate charged per kilometre beyond the base distance.
///
/// Perishable deliveries use the rule's `km_price`. Non-perishable deliveries
/// are always billed one currency unit per extra kilometre.
pub fn extra_rate_per_km(terms: &RuleTerms, item_type: ItemType) -> Decimal {
    match item_type {
        ItemType::Perishable => terms.km_price,
        ItemType::NonPerishable => Decimal::ONE,
    }
}

/// Distance billed at the extra rate; never negative.
///
/// `None` if the difference does not fit in a `Decimal`.
pub fn extra_distance(terms: &RuleTerms, total_distance_km: Decimal) -> Option<Decimal> {
    total_distance_km
        .checked_sub(terms.base_distance_in_km)
        .map(|extra| extra.max(Decimal::ZERO))
}

/// Calculate the delivery total for a trip under a pricing rule.
///
/// The fixed price covers the base distance; anything past it is charged at
/// [`extra_rate_per_km`]. Accumulation happens in minor units and the result
/// always carries exactly two decimal places.
///
/// Returns `None` when the total, in minor units, overflows `Decimal`.
pub fn delivery_total(
    terms: &RuleTerms,
    total_distance_km: Decimal,
    item_type: ItemType,
) -> Option<Decimal> {
    let mut minor = terms.fix_price.checked_mul(MINOR_UNITS)?;

    let extra = extra_distance(terms, total_distance_km)?;
    if extra > Decimal::ZERO {
        let extra_minor = extra
            .checked_mul(extra_rate_per_km(terms, item_type))?
            .checked_mul(MINOR_UNITS)?;
        minor = minor.checked_add(extra_minor)?;
    }

    let mut total = round_money(minor.checked_div(MINOR_UNITS)?, 2);
    total.rescale(2);
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn terms(base: Decimal, km: Decimal, fix: Decimal) -> RuleTerms {
        RuleTerms {
            base_distance_in_km: base,
            km_price: km,
            fix_price: fix,
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(3));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-3));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(0), 2), dec!(0));
    }

    // ==================== extra rate tests ====================

    #[test]
    fn test_extra_rate_perishable_uses_km_price() {
        let t = terms(dec!(5), dec!(1.5), dec!(10));
        assert_eq!(extra_rate_per_km(&t, ItemType::Perishable), dec!(1.5));
    }

    #[test]
    fn test_extra_rate_non_perishable_is_flat_one() {
        let t = terms(dec!(5), dec!(7.25), dec!(10));
        assert_eq!(extra_rate_per_km(&t, ItemType::NonPerishable), dec!(1));
    }

    #[test]
    fn test_extra_distance_clamped_at_zero() {
        let t = terms(dec!(5), dec!(1), dec!(10));
        assert_eq!(extra_distance(&t, dec!(12)), Some(dec!(7)));
        assert_eq!(extra_distance(&t, dec!(5)), Some(dec!(0)));
        assert_eq!(extra_distance(&t, dec!(2)), Some(dec!(0)));
    }

    // ==================== delivery_total tests ====================

    #[test]
    fn test_delivery_total_perishable() {
        // 10 + (12 - 5) * 1.5
        let t = terms(dec!(5), dec!(1.5), dec!(10));
        let total = delivery_total(&t, dec!(12), ItemType::Perishable).unwrap();
        assert_eq!(total, dec!(20.50));
        assert_eq!(total.to_string(), "20.50");
    }

    #[test]
    fn test_delivery_total_non_perishable_ignores_km_price() {
        // 10 + (12 - 5) * 1
        let t = terms(dec!(5), dec!(1.5), dec!(10));
        let total = delivery_total(&t, dec!(12), ItemType::NonPerishable).unwrap();
        assert_eq!(total.to_string(), "17.00");
    }

    #[test]
    fn test_delivery_total_within_base_distance_is_fix_price() {
        let t = terms(dec!(5), dec!(1.5), dec!(10));
        for item_type in [ItemType::Perishable, ItemType::NonPerishable] {
            assert_eq!(delivery_total(&t, dec!(5), item_type).unwrap().to_string(), "10.00");
            assert_eq!(delivery_total(&t, dec!(3.2), item_type).unwrap().to_string(), "10.00");
        }
    }

    #[test]
    fn test_delivery_total_negative_distance_is_fix_price() {
        let t = terms(dec!(5), dec!(2), dec!(8.4));
        let total = delivery_total(&t, dec!(-4), ItemType::Perishable).unwrap();
        assert_eq!(total.to_string(), "8.40");
    }

    #[test]
    fn test_delivery_total_fractional_distance() {
        // 3.99 + (7.333 - 2.5) * 0.45 = 3.99 + 2.17485
        let t = terms(dec!(2.5), dec!(0.45), dec!(3.99));
        let total = delivery_total(&t, dec!(7.333), ItemType::Perishable).unwrap();
        assert_eq!(total.to_string(), "6.16");
    }

    #[test]
    fn test_delivery_total_no_float_drift() {
        // 0.1 + 0.2 style inputs stay exact
        let t = terms(dec!(1), dec!(0.1), dec!(0.2));
        let total = delivery_total(&t, dec!(2), ItemType::Perishable).unwrap();
        assert_eq!(total.to_string(), "0.30");
    }

    #[test]
    fn test_delivery_total_huge_distance_overflows() {
        let t = terms(dec!(1), dec!(1), dec!(1));
        let distance = Decimal::from_scientific("1e27").unwrap();
        assert_eq!(delivery_total(&t, distance, ItemType::NonPerishable), None);
        assert_eq!(delivery_total(&t, Decimal::MAX, ItemType::Perishable), None);
    }

    #[test]
    fn test_delivery_total_huge_fix_price_overflows() {
        let t = terms(dec!(5), dec!(1), Decimal::from_scientific("8e26").unwrap());
        assert_eq!(delivery_total(&t, dec!(1), ItemType::Perishable), None);
    }

    #[test]
    fn test_extra_distance_overflow() {
        let t = terms(Decimal::MIN, dec!(1), dec!(1));
        assert_eq!(extra_distance(&t, Decimal::MAX), None);
    }
}
