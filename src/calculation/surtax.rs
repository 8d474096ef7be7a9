//! Tiered surtax (USC) calculation.
//!
//! The surtax is evaluated cumulatively over its tiers, each tier taxing
//! only the slice of income inside it. No credit applies.

use serde::{Deserialize, Serialize};

use super::bands::{BandSlice, describe_slices, slice_income, slices_json, total_liability};
use crate::config::SurtaxPolicy;
use crate::error::EngineResult;
use crate::models::{AuditStep, Money};

/// The result of a surtax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurtaxResult {
    /// Annual surtax liability.
    pub liability: Money,
    /// Per-tier breakdown.
    pub slices: Vec<BandSlice>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates annual surtax for an annualized gross income.
///
/// # Errors
///
/// Returns `InvalidAmount` if the liability overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_surtax;
/// use payroll_engine::config::{Band, BandTable, SurtaxPolicy};
/// use payroll_engine::models::Money;
/// use rust_decimal::Decimal;
///
/// let policy = SurtaxPolicy {
///     table: BandTable::new(
///         vec![
///             Band::new(Money::parse("bound", "12012").unwrap(), Decimal::new(5, 3)),
///             Band::new(Money::parse("bound", "28700").unwrap(), Decimal::new(2, 2)),
///         ],
///         Decimal::new(4, 2),
///     ),
/// };
///
/// // 12012 × 0.005 + 7988 × 0.02
/// let gross = Money::parse("gross", "20000").unwrap();
/// let result = calculate_surtax(gross, &policy, 1).unwrap();
/// assert_eq!(result.liability, Money::parse("x", "219.82").unwrap());
/// ```
pub fn calculate_surtax(
    annual_gross: Money,
    policy: &SurtaxPolicy,
    step_number: u32,
) -> EngineResult<SurtaxResult> {
    let slices = slice_income(annual_gross, &policy.table)?;
    let liability = total_liability(&slices)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "surtax".to_string(),
        rule_name: "Surtax (USC)".to_string(),
        input: serde_json::json!({
            "annual_gross": annual_gross.amount().normalize().to_string()
        }),
        output: serde_json::json!({
            "tiers": slices_json(&slices),
            "liability": liability.amount().normalize().to_string()
        }),
        reasoning: format!(
            "{} = €{}",
            describe_slices(&slices),
            liability.amount().normalize()
        ),
    };

    Ok(SurtaxResult {
        liability,
        slices,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Band, BandTable};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::parse("test", s).unwrap()
    }

    fn reference_policy() -> SurtaxPolicy {
        SurtaxPolicy {
            table: BandTable::new(
                vec![
                    Band::new(money("12012"), dec("0.005")),
                    Band::new(money("28700"), dec("0.02")),
                ],
                dec("0.04"),
            ),
        }
    }

    #[test]
    fn test_tier_one_only() {
        // 200 a week annualized
        let result = calculate_surtax(money("10400"), &reference_policy(), 1).unwrap();
        assert_eq!(result.liability, money("52"));
    }

    #[test]
    fn test_tier_one_example() {
        let result = calculate_surtax(money("10000"), &reference_policy(), 1).unwrap();
        assert_eq!(result.liability, money("50"));
    }

    #[test]
    fn test_tier_two() {
        // 400 a week annualized: 12012 × 0.005 + (20800 - 12012) × 0.02
        let result = calculate_surtax(money("20800"), &reference_policy(), 1).unwrap();
        assert_eq!(result.liability, money("235.82"));
    }

    #[test]
    fn test_above_tier_two() {
        // 60.06 + 333.76 + (52000 - 28700) × 0.04
        let result = calculate_surtax(money("52000"), &reference_policy(), 1).unwrap();
        assert_eq!(result.liability, money("1325.82"));
        assert_eq!(result.slices.len(), 3);
    }

    #[test]
    fn test_exactly_at_tier_two_bound() {
        let result = calculate_surtax(money("28700"), &reference_policy(), 1).unwrap();
        assert_eq!(result.slices.len(), 2);
        assert_eq!(result.liability, money("393.82"));
    }

    #[test]
    fn test_zero_income_has_no_surtax() {
        let result = calculate_surtax(Money::ZERO, &reference_policy(), 1).unwrap();
        assert_eq!(result.liability, Money::ZERO);
    }

    #[test]
    fn test_audit_step_records_tiers() {
        let result = calculate_surtax(money("20000"), &reference_policy(), 4).unwrap();

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "surtax");
        assert_eq!(
            result.audit_step.output["tiers"].as_array().unwrap().len(),
            2
        );
        assert_eq!(
            result.audit_step.output["liability"].as_str().unwrap(),
            "219.82"
        );
        assert!(result.audit_step.reasoning.ends_with("= €219.82"));
    }
}
