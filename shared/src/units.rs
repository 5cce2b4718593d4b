//! Unit conversion between heterogeneous measurement units
//!
//! Conversion is only defined within a measurement group (mass, volume,
//! count); each unit has a fixed factor to the canonical magnitude of its
//! group, so every conversion is a single multiply/divide.

use rust_decimal::Decimal;

use crate::types::Unit;

/// Reasons a conversion can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("quantity must be strictly positive")]
    NonPositiveQuantity,
    #[error("price must be strictly positive")]
    NonPositivePrice,
    #[error("cannot convert between {from} and {to}: different measurement groups")]
    IncompatibleGroups { from: Unit, to: Unit },
}

/// Convert a quantity between two units of the same measurement group.
///
/// Same-unit conversion is an identity. Fails for non-positive quantities
/// and for cross-group unit pairs.
pub fn convert_quantity(
    quantity: Decimal,
    from: Unit,
    to: Unit,
) -> Result<Decimal, ConversionError> {
    if quantity <= Decimal::ZERO {
        return Err(ConversionError::NonPositiveQuantity);
    }
    if from.group() != to.group() {
        return Err(ConversionError::IncompatibleGroups { from, to });
    }
    if from == to {
        return Ok(quantity);
    }
    Ok(quantity * from.factor_to_canonical() / to.factor_to_canonical())
}

/// Cost per one base unit implied by a purchase.
///
/// Converts the purchased quantity to the ingredient's base unit and divides
/// the total price by it.
pub fn unit_cost_from_purchase(
    total_price: Decimal,
    quantity: Decimal,
    purchase_unit: Unit,
    base_unit: Unit,
) -> Result<Decimal, ConversionError> {
    if total_price <= Decimal::ZERO {
        return Err(ConversionError::NonPositivePrice);
    }
    let converted = convert_quantity(quantity, purchase_unit, base_unit)?;
    Ok(total_price / converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn identity_conversion() {
        for unit in [
            Unit::Gram,
            Unit::Kilogram,
            Unit::Milliliter,
            Unit::Liter,
            Unit::Piece,
        ] {
            assert_eq!(convert_quantity(dec("3.5"), unit, unit), Ok(dec("3.5")));
        }
    }

    #[test]
    fn kilogram_to_gram() {
        assert_eq!(
            convert_quantity(dec("2"), Unit::Kilogram, Unit::Gram),
            Ok(dec("2000"))
        );
    }

    #[test]
    fn gram_to_kilogram() {
        assert_eq!(
            convert_quantity(dec("500"), Unit::Gram, Unit::Kilogram),
            Ok(dec("0.5"))
        );
    }

    #[test]
    fn liter_to_milliliter() {
        assert_eq!(
            convert_quantity(dec("1.25"), Unit::Liter, Unit::Milliliter),
            Ok(dec("1250"))
        );
    }

    #[test]
    fn cross_group_fails() {
        assert_eq!(
            convert_quantity(dec("1"), Unit::Kilogram, Unit::Liter),
            Err(ConversionError::IncompatibleGroups {
                from: Unit::Kilogram,
                to: Unit::Liter,
            })
        );
        assert!(convert_quantity(dec("1"), Unit::Gram, Unit::Piece).is_err());
        assert!(convert_quantity(dec("1"), Unit::Piece, Unit::Milliliter).is_err());
    }

    #[test]
    fn non_positive_quantity_fails() {
        assert_eq!(
            convert_quantity(Decimal::ZERO, Unit::Gram, Unit::Gram),
            Err(ConversionError::NonPositiveQuantity)
        );
        assert_eq!(
            convert_quantity(dec("-1"), Unit::Gram, Unit::Kilogram),
            Err(ConversionError::NonPositiveQuantity)
        );
    }

    #[test]
    fn purchase_unit_cost_in_smaller_base_unit() {
        // Buying 2 kg for 1000 with a gram base unit: 1000 / 2000 = 0.5 per gram
        assert_eq!(
            unit_cost_from_purchase(dec("1000"), dec("2"), Unit::Kilogram, Unit::Gram),
            Ok(dec("0.5"))
        );
    }

    #[test]
    fn purchase_unit_cost_same_unit() {
        assert_eq!(
            unit_cost_from_purchase(dec("30"), dec("12"), Unit::Piece, Unit::Piece),
            Ok(dec("2.5"))
        );
    }

    #[test]
    fn purchase_unit_cost_rejects_bad_inputs() {
        assert_eq!(
            unit_cost_from_purchase(Decimal::ZERO, dec("2"), Unit::Kilogram, Unit::Gram),
            Err(ConversionError::NonPositivePrice)
        );
        assert_eq!(
            unit_cost_from_purchase(dec("10"), dec("-2"), Unit::Kilogram, Unit::Gram),
            Err(ConversionError::NonPositiveQuantity)
        );
        assert!(
            unit_cost_from_purchase(dec("10"), dec("2"), Unit::Liter, Unit::Gram).is_err()
        );
    }

    proptest! {
        /// Scaling the quantity scales the converted result.
        #[test]
        fn conversion_is_linear(q in 1i64..=1_000_000) {
            let q = Decimal::new(q, 3); // 0.001 .. 1000.0
            let single = convert_quantity(q, Unit::Kilogram, Unit::Gram).unwrap();
            let doubled = convert_quantity(q * Decimal::from(2), Unit::Kilogram, Unit::Gram).unwrap();
            prop_assert_eq!(doubled, single * Decimal::from(2));
        }

        /// Converting there and back returns the original quantity.
        #[test]
        fn conversion_round_trips(q in 1i64..=1_000_000) {
            let q = Decimal::new(q, 3);
            let grams = convert_quantity(q, Unit::Kilogram, Unit::Gram).unwrap();
            let back = convert_quantity(grams, Unit::Gram, Unit::Kilogram).unwrap();
            prop_assert_eq!(back, q);
        }
    }
}
