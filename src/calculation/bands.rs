//! Progressive band evaluation shared by the income tax and surtax calculators.
//!
//! ## Slice Structure
//!
//! Each band taxes only the slice of income above the previous band's bound
//! and up to (and including) its own bound. Income above the last bound
//! falls into the unbounded top band.
//!
//! For the surtax reference table (€12,012 @ 0.5%, €28,700 @ 2%, 4% above),
//! an income of €20,000 produces two slices:
//! - €12,012 × 0.5% = €60.06
//! - €7,988 × 2% = €159.76

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BandTable;
use crate::error::EngineResult;
use crate::models::Money;

/// The part of an income that fell inside one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSlice {
    /// Lower bound of the band (exclusive).
    pub lower_bound: Money,
    /// Upper bound of the band (inclusive); `None` for the top band.
    pub upper_bound: Option<Money>,
    /// The rate applied to this slice.
    pub rate: Decimal,
    /// The amount of income inside the band.
    pub taxable: Money,
    /// `taxable × rate`.
    pub liability: Money,
}

/// Splits an income into the slices each band taxes.
///
/// Bands the income never reaches produce no slice, so a zero income
/// yields an empty vector.
///
/// # Errors
///
/// Returns `InvalidAmount` if a slice's liability overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::slice_income;
/// use payroll_engine::config::{Band, BandTable};
/// use payroll_engine::models::Money;
/// use rust_decimal::Decimal;
///
/// let table = BandTable::new(
///     vec![Band::new(Money::parse("bound", "44000").unwrap(), Decimal::new(20, 2))],
///     Decimal::new(40, 2),
/// );
///
/// let slices = slice_income(Money::parse("income", "52000").unwrap(), &table).unwrap();
/// assert_eq!(slices.len(), 2);
/// assert_eq!(slices[0].liability, Money::parse("x", "8800").unwrap());
/// assert_eq!(slices[1].liability, Money::parse("x", "3200").unwrap());
/// ```
pub fn slice_income(income: Money, table: &BandTable) -> EngineResult<Vec<BandSlice>> {
    let mut slices = Vec::with_capacity(table.bands.len() + 1);
    let mut lower_bound = Money::ZERO;

    for band in &table.bands {
        if income <= lower_bound {
            return Ok(slices);
        }

        let taxable = income.min(band.upper_bound) - lower_bound;
        slices.push(BandSlice {
            lower_bound,
            upper_bound: Some(band.upper_bound),
            rate: band.rate,
            taxable,
            liability: taxable.try_mul("liability", band.rate)?,
        });
        lower_bound = band.upper_bound;
    }

    if income > lower_bound {
        let taxable = income - lower_bound;
        slices.push(BandSlice {
            lower_bound,
            upper_bound: None,
            rate: table.top_rate,
            taxable,
            liability: taxable.try_mul("liability", table.top_rate)?,
        });
    }

    Ok(slices)
}

/// Returns the total liability of an income across every band.
///
/// # Errors
///
/// Returns `InvalidAmount` if the liability overflows.
pub fn banded_liability(income: Money, table: &BandTable) -> EngineResult<Money> {
    let slices = slice_income(income, table)?;
    total_liability(&slices)
}

/// Sums the liabilities of a set of slices.
pub(crate) fn total_liability(slices: &[BandSlice]) -> EngineResult<Money> {
    Money::try_sum("liability", slices.iter().map(|slice| slice.liability))
}

/// Renders slices as "€12012 × 0.005 + €7988 × 0.02" for audit reasoning.
pub(crate) fn describe_slices(slices: &[BandSlice]) -> String {
    if slices.is_empty() {
        return "no taxable income".to_string();
    }
    slices
        .iter()
        .map(|s| format!("€{} × {}", s.taxable.amount().normalize(), s.rate.normalize()))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Serializes slices for an audit step's output.
pub(crate) fn slices_json(slices: &[BandSlice]) -> serde_json::Value {
    serde_json::Value::Array(
        slices
            .iter()
            .map(|s| {
                serde_json::json!({
                    "lower_bound": s.lower_bound.amount().normalize().to_string(),
                    "upper_bound": s.upper_bound.map(|u| u.amount().normalize().to_string()),
                    "rate": s.rate.normalize().to_string(),
                    "taxable": s.taxable.amount().normalize().to_string(),
                    "liability": s.liability.amount().normalize().to_string()
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Band;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::parse("test", s).unwrap()
    }

    fn surtax_table() -> BandTable {
        BandTable::new(
            vec![
                Band::new(money("12012"), dec("0.005")),
                Band::new(money("28700"), dec("0.02")),
            ],
            dec("0.04"),
        )
    }

    #[test]
    fn test_zero_income_has_no_slices() {
        assert!(slice_income(Money::ZERO, &surtax_table()).unwrap().is_empty());
        assert_eq!(banded_liability(Money::ZERO, &surtax_table()).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_income_in_first_band() {
        let slices = slice_income(money("10000"), &surtax_table()).unwrap();

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].taxable, money("10000"));
        assert_eq!(slices[0].liability, money("50"));
    }

    #[test]
    fn test_income_in_second_band() {
        let slices = slice_income(money("20000"), &surtax_table()).unwrap();

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].liability, money("60.06"));
        assert_eq!(slices[1].lower_bound, money("12012"));
        assert_eq!(slices[1].taxable, money("7988"));
        assert_eq!(slices[1].liability, money("159.76"));
        assert_eq!(
            banded_liability(money("20000"), &surtax_table()).unwrap(),
            money("219.82")
        );
    }

    #[test]
    fn test_income_in_top_band() {
        let slices = slice_income(money("52000"), &surtax_table()).unwrap();

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[2].upper_bound, None);
        assert_eq!(slices[2].taxable, money("23300"));
        // 60.06 + 333.76 + 932
        assert_eq!(
            banded_liability(money("52000"), &surtax_table()).unwrap(),
            money("1325.82")
        );
    }

    #[test]
    fn test_boundary_belongs_to_lower_band() {
        let slices = slice_income(money("12012"), &surtax_table()).unwrap();

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].rate, dec("0.005"));
        assert_eq!(slices[0].liability, money("60.06"));
    }

    #[test]
    fn test_just_above_boundary_uses_next_rate() {
        let slices = slice_income(money("12012.01"), &surtax_table()).unwrap();

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].taxable, money("0.01"));
        assert_eq!(slices[1].liability, money("0.0002"));
    }

    #[test]
    fn test_empty_table_is_flat_rate() {
        let table = BandTable::new(vec![], dec("0.1"));
        assert_eq!(banded_liability(money("500"), &table).unwrap(), money("50"));
    }

    #[test]
    fn test_liability_overflow_is_an_error() {
        let table = BandTable::new(vec![], dec("3"));
        let income = Money::non_negative("income", Decimal::MAX).unwrap();

        let err = slice_income(income, &table).unwrap_err();
        assert!(matches!(err, crate::error::EngineError::InvalidAmount { .. }));
        assert!(banded_liability(income, &table).is_err());
    }

    #[test]
    fn test_slices_sum_to_income() {
        let income = money("31234.56");
        let slices = slice_income(income, &surtax_table()).unwrap();
        let total: Money = slices.iter().map(|s| s.taxable).sum();
        assert_eq!(total, income);
    }

    #[test]
    fn test_describe_slices() {
        let slices = slice_income(money("20000"), &surtax_table()).unwrap();
        assert_eq!(describe_slices(&slices), "€12012 × 0.005 + €7988 × 0.02");
        assert_eq!(describe_slices(&[]), "no taxable income");
    }

    #[test]
    fn test_slices_json_marks_top_band_unbounded() {
        let slices = slice_income(money("30000"), &surtax_table()).unwrap();
        let json = slices_json(&slices);

        assert_eq!(json.as_array().unwrap().len(), 3);
        assert!(json[2]["upper_bound"].is_null());
        assert_eq!(json[2]["taxable"].as_str().unwrap(), "1300");
    }
}
