//! Overtime calculation functionality.
//!
//! Hours worked beyond the scheduled hours are overtime. Overtime pay is a
//! premium on top of straight-time pay: `overtime hours × rate × multiplier`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AuditStep, Money};

/// The result of an overtime calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// Hours worked beyond the schedule (zero if none).
    pub overtime_hours: Decimal,
    /// Overtime premium.
    pub overtime_pay: Money,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates overtime hours and overtime pay.
///
/// Inputs are expected to be non-negative; the employee record rejects
/// negative values before they reach this function.
///
/// # Arguments
///
/// * `hours_worked` - Hours worked this period
/// * `hours_scheduled` - Scheduled hours, the overtime baseline
/// * `hourly_rate` - Base hourly rate
/// * `multiplier` - Overtime premium multiplier (1.5 for time and a half)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `InvalidAmount` if the overtime pay overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_overtime;
/// use payroll_engine::models::Money;
/// use rust_decimal::Decimal;
///
/// let result = calculate_overtime(
///     Decimal::from(45),
///     Decimal::from(40),
///     Money::parse("rate", "20").unwrap(),
///     Decimal::new(15, 1),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.overtime_hours, Decimal::from(5));
/// assert_eq!(result.overtime_pay, Money::parse("x", "150").unwrap());
/// ```
pub fn calculate_overtime(
    hours_worked: Decimal,
    hours_scheduled: Decimal,
    hourly_rate: Money,
    multiplier: Decimal,
    step_number: u32,
) -> EngineResult<OvertimeResult> {
    let overtime_hours = (hours_worked - hours_scheduled).max(Decimal::ZERO);
    let overtime_pay = hourly_rate
        .try_mul("overtime_pay", overtime_hours)?
        .try_mul("overtime_pay", multiplier)?;

    let reasoning = if overtime_hours > Decimal::ZERO {
        format!(
            "{} hours worked exceeds {} scheduled: {} hours × €{} × {} = €{}",
            hours_worked.normalize(),
            hours_scheduled.normalize(),
            overtime_hours.normalize(),
            hourly_rate.amount().normalize(),
            multiplier.normalize(),
            overtime_pay.amount().normalize()
        )
    } else {
        format!(
            "{} hours worked does not exceed {} scheduled; no overtime",
            hours_worked.normalize(),
            hours_scheduled.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime".to_string(),
        input: serde_json::json!({
            "hours_worked": hours_worked.normalize().to_string(),
            "hours_scheduled": hours_scheduled.normalize().to_string(),
            "hourly_rate": hourly_rate.amount().normalize().to_string(),
            "multiplier": multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "overtime_pay": overtime_pay.amount().normalize().to_string()
        }),
        reasoning,
    };

    Ok(OvertimeResult {
        overtime_hours,
        overtime_pay,
        audit_step,
    })
}
