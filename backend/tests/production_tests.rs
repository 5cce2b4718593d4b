//! Production engine tests
//!
//! Tests for recipe production including:
//! - Waste-adjusted consumption quantities
//! - Production cost accumulation
//! - Void and edit reversal arithmetic
//! - Purchase unit cost feeding production costs

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    consumption_quantity, movement_delta, unit_cost_from_purchase, MovementKind, Unit,
};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// 5 per unit, 3 units, 12% waste: 5 * 3 * 1.12 = 16.8
    #[test]
    fn test_consumption_with_waste() {
        assert_eq!(consumption_quantity(dec("5"), 3, dec("12")), dec("16.8"));
    }

    /// Zero waste consumes exactly the recipe quantity times units
    #[test]
    fn test_consumption_without_waste() {
        assert_eq!(consumption_quantity(dec("2.5"), 4, Decimal::ZERO), dec("10"));
    }

    /// One unit with fractional waste
    #[test]
    fn test_consumption_fractional_waste() {
        // 200 * 1 * 1.025 = 205
        assert_eq!(consumption_quantity(dec("200"), 1, dec("2.5")), dec("205"));
    }

    /// Cost of one consumption line is quantity times standing unit cost
    #[test]
    fn test_consumption_line_cost() {
        let consumed = consumption_quantity(dec("5"), 3, dec("12"));
        let cost = consumed * dec("0.028");

        // 16.8 * 0.028 = 0.4704
        assert_eq!(cost, dec("0.4704"));
    }

    /// The production total is the sum of all consumption line costs
    #[test]
    fn test_total_cost_accumulates() {
        let lines = vec![
            (dec("5"), dec("12"), dec("0.028")),   // flour
            (dec("0.8"), dec("5"), dec("1.25")),   // butter
            (dec("2"), Decimal::ZERO, dec("0.4")), // eggs
        ];
        let units = 3;

        let total: Decimal = lines
            .iter()
            .map(|(per_unit, waste, unit_cost)| {
                consumption_quantity(*per_unit, units, *waste) * unit_cost
            })
            .sum();

        // 16.8*0.028 + 2.52*1.25 + 6*0.4 = 0.4704 + 3.15 + 2.4 = 6.0204
        assert_eq!(total, dec("6.0204"));
    }

    /// Unit cost from a purchase flows into the consumption cost
    #[test]
    fn test_purchase_cost_feeds_production() {
        // Buy 2 kg of flour for 56, tracked in grams: 0.028 per gram
        let unit_cost =
            unit_cost_from_purchase(dec("56"), dec("2"), Unit::Kilogram, Unit::Gram).unwrap();
        assert_eq!(unit_cost, dec("0.028"));

        let consumed = consumption_quantity(dec("5"), 3, dec("12"));
        assert_eq!(consumed * unit_cost, dec("0.4704"));
    }

    /// Voiding restores exactly the consumed quantity per ingredient
    #[test]
    fn test_void_restores_consumed_quantity() {
        let consumed = consumption_quantity(dec("5"), 3, dec("12"));

        let start = dec("100");
        let after_produce = start + movement_delta(MovementKind::Exit, consumed);
        let after_void = after_produce + movement_delta(MovementKind::Entry, consumed);

        assert_eq!(after_produce, dec("83.2"));
        assert_eq!(after_void, start);
    }

    /// Editing is a void plus a re-produce: the net stock effect is the
    /// difference between the new and old consumption
    #[test]
    fn test_edit_net_stock_effect() {
        let old_consumed = consumption_quantity(dec("5"), 3, dec("12"));
        let new_consumed = consumption_quantity(dec("5"), 5, dec("12"));

        let start = dec("100");
        let balance = start
            + movement_delta(MovementKind::Exit, old_consumed)
            + movement_delta(MovementKind::Entry, old_consumed)
            + movement_delta(MovementKind::Exit, new_consumed);

        assert_eq!(balance, start - new_consumed);
        assert_eq!(balance, dec("72"));
    }

    /// Edit recomputes cost from the current unit cost, not the original
    #[test]
    fn test_edit_uses_current_cost() {
        let consumed = consumption_quantity(dec("5"), 3, dec("12"));

        let original_cost = consumed * dec("0.028");
        // A purchase between produce and edit raised the standing cost
        let recomputed_cost = consumed * dec("0.035");

        assert_eq!(original_cost, dec("0.4704"));
        assert_eq!(recomputed_cost, dec("0.588"));
        assert!(recomputed_cost > original_cost);
    }

    /// Production with a huge unit count stays exact (no float drift)
    #[test]
    fn test_large_unit_count_exact() {
        let consumed = consumption_quantity(dec("0.125"), 10_000, dec("8"));
        // 0.125 * 10000 * 1.08 = 1350
        assert_eq!(consumed, dec("1350"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for recipe quantities per unit
    fn per_unit_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100_000i64).prop_map(|n| Decimal::new(n, 3)) // 0.001 to 100.000
    }

    /// Strategy for waste percentages
    fn waste_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=5000i64).prop_map(|n| Decimal::new(n, 2)) // 0.00% to 50.00%
    }

    /// Strategy for unit costs
    fn cost_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 4))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Consumption scales linearly with the unit count
        #[test]
        fn prop_consumption_linear_in_units(
            per_unit in per_unit_strategy(),
            waste in waste_strategy(),
            units in 1i32..=500
        ) {
            let one = consumption_quantity(per_unit, 1, waste);
            let many = consumption_quantity(per_unit, units, waste);
            prop_assert_eq!(many, one * Decimal::from(units));
        }

        /// Waste never decreases consumption
        #[test]
        fn prop_waste_never_decreases_consumption(
            per_unit in per_unit_strategy(),
            waste in waste_strategy(),
            units in 1i32..=500
        ) {
            let without = consumption_quantity(per_unit, units, Decimal::ZERO);
            let with = consumption_quantity(per_unit, units, waste);
            prop_assert!(with >= without);
        }

        /// Consumption is strictly positive for positive recipe quantities
        #[test]
        fn prop_consumption_positive(
            per_unit in per_unit_strategy(),
            waste in waste_strategy(),
            units in 1i32..=500
        ) {
            prop_assert!(consumption_quantity(per_unit, units, waste) > Decimal::ZERO);
        }

        /// Produce-then-void leaves every ingredient balance unchanged
        #[test]
        fn prop_produce_void_is_stock_neutral(
            start in (0i64..=10_000_000i64).prop_map(|n| Decimal::new(n, 2)),
            per_unit in per_unit_strategy(),
            waste in waste_strategy(),
            units in 1i32..=500
        ) {
            let consumed = consumption_quantity(per_unit, units, waste);
            let balance = start
                + movement_delta(MovementKind::Exit, consumed)
                + movement_delta(MovementKind::Entry, consumed);
            prop_assert_eq!(balance, start);
        }

        /// Total cost equals the sum over lines in any grouping
        #[test]
        fn prop_total_cost_is_line_sum(
            lines in prop::collection::vec(
                (per_unit_strategy(), waste_strategy(), cost_strategy()),
                1..8
            ),
            units in 1i32..=100
        ) {
            let line_costs: Vec<Decimal> = lines
                .iter()
                .map(|(per_unit, waste, cost)| {
                    consumption_quantity(*per_unit, units, *waste) * cost
                })
                .collect();

            let total: Decimal = line_costs.iter().copied().sum();
            let folded = line_costs.iter().fold(Decimal::ZERO, |acc, c| acc + c);

            prop_assert_eq!(total, folded);
            prop_assert!(total > Decimal::ZERO);
        }

        /// The purchase unit cost scales inversely with the quantity bought
        #[test]
        fn prop_unit_cost_inverse_in_quantity(
            price in (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2)),
            qty in 1i64..=10_000
        ) {
            let qty = Decimal::from(qty);
            let single = unit_cost_from_purchase(price, qty, Unit::Gram, Unit::Gram).unwrap();
            let doubled = unit_cost_from_purchase(price, qty * Decimal::from(2), Unit::Gram, Unit::Gram).unwrap();
            prop_assert_eq!(doubled * Decimal::from(2), single);
        }
    }
}

// ============================================================================
// Production Simulation
// ============================================================================

#[cfg(test)]
mod production_simulation {
    use super::*;

    /// One recipe line: quantity per unit, waste percentage, unit cost
    struct Line {
        per_unit: Decimal,
        waste_pct: Decimal,
        unit_cost: Decimal,
    }

    /// Replays the production engine's arithmetic over in-memory balances
    fn produce(
        balances: &mut Vec<Decimal>,
        lines: &[Line],
        units: i32,
    ) -> (Decimal, Vec<Decimal>) {
        let mut total_cost = Decimal::ZERO;
        let mut consumed = Vec::with_capacity(lines.len());
        for (balance, line) in balances.iter_mut().zip(lines) {
            let qty = consumption_quantity(line.per_unit, units, line.waste_pct);
            *balance += movement_delta(MovementKind::Exit, qty);
            total_cost += qty * line.unit_cost;
            consumed.push(qty);
        }
        (total_cost, consumed)
    }

    fn void(balances: &mut [Decimal], consumed: &[Decimal]) {
        for (balance, qty) in balances.iter_mut().zip(consumed) {
            *balance += movement_delta(MovementKind::Entry, *qty);
        }
    }

    #[test]
    fn test_produce_void_reproduce_round_trip() {
        let lines = vec![
            Line { per_unit: dec("5"), waste_pct: dec("12"), unit_cost: dec("0.028") },
            Line { per_unit: dec("0.8"), waste_pct: dec("5"), unit_cost: dec("1.25") },
        ];
        let mut balances = vec![dec("1000"), dec("50")];

        let (cost_a, consumed_a) = produce(&mut balances, &lines, 3);
        assert_eq!(balances, vec![dec("983.2"), dec("47.48")]);
        assert_eq!(cost_a, dec("3.6204"));

        // Edit to 5 units: void, then re-produce
        void(&mut balances, &consumed_a);
        assert_eq!(balances, vec![dec("1000"), dec("50")]);

        let (cost_b, _) = produce(&mut balances, &lines, 5);
        assert_eq!(balances, vec![dec("972"), dec("45.8")]);
        assert_eq!(cost_b, dec("6.034"));
    }

    #[test]
    fn test_production_into_negative_stock() {
        let lines = vec![Line {
            per_unit: dec("5"),
            waste_pct: Decimal::ZERO,
            unit_cost: dec("0.1"),
        }];
        let mut balances = vec![dec("8")];

        // Exits are never blocked; the balance simply goes negative
        let (_, consumed) = produce(&mut balances, &lines, 2);
        assert_eq!(balances, vec![dec("-2")]);

        void(&mut balances, &consumed);
        assert_eq!(balances, vec![dec("8")]);
    }
}
