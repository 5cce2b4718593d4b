//! Ledger arithmetic and the replenishment policy
//!
//! These rules are the pure heart of the stock ledger: the signed delta a
//! movement applies to a balance, the stock status classification, and the
//! per-ingredient consumption of a production.

use rust_decimal::Decimal;

use crate::types::{MovementKind, ReplenishmentStatus};

/// Signed delta a movement applies to the stock balance.
///
/// Entries always add the magnitude, exits always subtract it, adjustments
/// carry their own sign.
pub fn movement_delta(kind: MovementKind, quantity: Decimal) -> Decimal {
    match kind {
        MovementKind::Entry => quantity.abs(),
        MovementKind::Exit => -quantity.abs(),
        MovementKind::Adjustment => quantity,
    }
}

/// Classify current stock against the minimum threshold.
///
/// `Low` at or below the minimum, `Warning` within 20% above it, `Ok` beyond.
pub fn replenishment_status(current: Decimal, minimum: Decimal) -> ReplenishmentStatus {
    if current <= minimum {
        ReplenishmentStatus::Low
    } else if current <= minimum * Decimal::new(12, 1) {
        ReplenishmentStatus::Warning
    } else {
        ReplenishmentStatus::Ok
    }
}

/// Quantity of an ingredient consumed by producing `units` recipe units.
///
/// The waste percentage is applied multiplicatively on top of the recipe
/// quantity: `per_unit * units * (1 + waste_pct / 100)`.
pub fn consumption_quantity(per_unit: Decimal, units: i32, waste_pct: Decimal) -> Decimal {
    let waste_factor = Decimal::ONE + waste_pct / Decimal::ONE_HUNDRED;
    per_unit * Decimal::from(units) * waste_factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn entry_delta_is_positive() {
        assert_eq!(movement_delta(MovementKind::Entry, dec("5")), dec("5"));
        assert_eq!(movement_delta(MovementKind::Entry, dec("-5")), dec("5"));
    }

    #[test]
    fn exit_delta_is_negative() {
        assert_eq!(movement_delta(MovementKind::Exit, dec("5")), dec("-5"));
        assert_eq!(movement_delta(MovementKind::Exit, dec("-5")), dec("-5"));
    }

    #[test]
    fn adjustment_delta_keeps_sign() {
        assert_eq!(movement_delta(MovementKind::Adjustment, dec("3.2")), dec("3.2"));
        assert_eq!(movement_delta(MovementKind::Adjustment, dec("-3.2")), dec("-3.2"));
    }

    #[test]
    fn status_boundaries() {
        assert_eq!(replenishment_status(dec("4"), dec("10")), ReplenishmentStatus::Low);
        assert_eq!(replenishment_status(dec("10"), dec("10")), ReplenishmentStatus::Low);
        assert_eq!(replenishment_status(dec("11"), dec("10")), ReplenishmentStatus::Warning);
        assert_eq!(replenishment_status(dec("12"), dec("10")), ReplenishmentStatus::Warning);
        assert_eq!(replenishment_status(dec("12.01"), dec("10")), ReplenishmentStatus::Ok);
        assert_eq!(replenishment_status(dec("15"), dec("10")), ReplenishmentStatus::Ok);
    }

    #[test]
    fn status_with_zero_minimum() {
        assert_eq!(replenishment_status(dec("0"), dec("0")), ReplenishmentStatus::Low);
        assert_eq!(replenishment_status(dec("-2"), dec("0")), ReplenishmentStatus::Low);
        assert_eq!(replenishment_status(dec("1"), dec("0")), ReplenishmentStatus::Ok);
    }

    #[test]
    fn consumption_applies_waste() {
        // 5 per unit, 12% waste, 3 units: 5 * 3 * 1.12 = 16.8
        assert_eq!(consumption_quantity(dec("5"), 3, dec("12")), dec("16.80"));
    }

    #[test]
    fn consumption_without_waste() {
        assert_eq!(consumption_quantity(dec("2.5"), 4, Decimal::ZERO), dec("10.0"));
    }
}
