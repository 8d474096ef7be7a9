//! Progressive income tax (PAYE) calculation.
//!
//! This module computes the annual income tax liability of an annualized
//! gross income from the configured bands, then subtracts the flat credit.
//! The liability is clamped at zero: a credit larger than the computed tax
//! means no tax is owed, never a refund.

use serde::{Deserialize, Serialize};

use super::bands::{BandSlice, describe_slices, slice_income, slices_json, total_liability};
use crate::config::IncomeTaxPolicy;
use crate::error::EngineResult;
use crate::models::{AuditStep, Money};

/// The result of an income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxResult {
    /// Liability before the credit.
    pub gross_liability: Money,
    /// The part of the credit actually used (never more than the gross liability).
    pub credit_applied: Money,
    /// Annual liability after the credit, never negative.
    pub liability: Money,
    /// Per-band breakdown of the gross liability.
    pub slices: Vec<BandSlice>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates annual income tax for an annualized gross income.
///
/// # Arguments
///
/// * `annual_gross` - Annualized gross income
/// * `policy` - Income tax bands, top rate and flat credit
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `InvalidAmount` if the liability overflows.
///
/// # Examples
///
/// ## Income above the standard rate cut-off
///
/// ```
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::config::{Band, BandTable, IncomeTaxPolicy};
/// use payroll_engine::models::Money;
/// use rust_decimal::Decimal;
///
/// let policy = IncomeTaxPolicy {
///     table: BandTable::new(
///         vec![Band::new(Money::parse("bound", "44000").unwrap(), Decimal::new(20, 2))],
///         Decimal::new(40, 2),
///     ),
///     credit: Money::parse("credit", "3750").unwrap(),
/// };
///
/// // 44000 × 0.20 + 8000 × 0.40 - 3750
/// let gross = Money::parse("gross", "52000").unwrap();
/// let result = calculate_income_tax(gross, &policy, 1).unwrap();
/// assert_eq!(result.liability, Money::parse("x", "8250").unwrap());
/// ```
///
/// ## Credit exceeds computed tax
///
/// ```
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::config::{Band, BandTable, IncomeTaxPolicy};
/// use payroll_engine::models::Money;
/// use rust_decimal::Decimal;
///
/// let policy = IncomeTaxPolicy {
///     table: BandTable::new(
///         vec![Band::new(Money::parse("bound", "44000").unwrap(), Decimal::new(20, 2))],
///         Decimal::new(40, 2),
///     ),
///     credit: Money::parse("credit", "3750").unwrap(),
/// };
///
/// let gross = Money::parse("gross", "10000").unwrap();
/// let result = calculate_income_tax(gross, &policy, 1).unwrap();
/// assert!(result.liability.is_zero());
/// ```
pub fn calculate_income_tax(
    annual_gross: Money,
    policy: &IncomeTaxPolicy,
    step_number: u32,
) -> EngineResult<IncomeTaxResult> {
    let slices = slice_income(annual_gross, &policy.table)?;
    let gross_liability = total_liability(&slices)?;

    let liability = (gross_liability - policy.credit).clamp_non_negative();
    let credit_applied = gross_liability - liability;

    let reasoning = format!(
        "{} = €{}; less credit €{} = €{}",
        describe_slices(&slices),
        gross_liability.amount().normalize(),
        policy.credit.amount().normalize(),
        liability.amount().normalize()
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax (PAYE)".to_string(),
        input: serde_json::json!({
            "annual_gross": annual_gross.amount().normalize().to_string(),
            "credit": policy.credit.amount().normalize().to_string()
        }),
        output: serde_json::json!({
            "bands": slices_json(&slices),
            "gross_liability": gross_liability.amount().normalize().to_string(),
            "credit_applied": credit_applied.amount().normalize().to_string(),
            "liability": liability.amount().normalize().to_string()
        }),
        reasoning,
    };

    Ok(IncomeTaxResult {
        gross_liability,
        credit_applied,
        liability,
        slices,
        audit_step,
    })
}
