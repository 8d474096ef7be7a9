//! Per-employee payroll result models.
//!
//! This module contains the [`PayPeriodResult`] type and the structures it is
//! made of: annual figures, period-to-date projections and the audit trail
//! recording each calculation step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Money, PayPeriod};
use crate::error::EngineResult;

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "overtime".to_string(),
///     rule_name: "Overtime".to_string(),
///     input: serde_json::json!({"hours_worked": "45", "hours_scheduled": "40"}),
///     output: serde_json::json!({"overtime_hours": "5"}),
///     reasoning: "5 hours above schedule".to_string(),
/// };
/// assert_eq!(step.rule_id, "overtime");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Yearly figures behind a weekly result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualFigures {
    /// Weekly gross multiplied by the periods per year.
    pub gross: Money,
    /// Income tax liability after the credit.
    pub income_tax: Money,
    /// Surtax liability.
    pub surtax: Money,
    /// Income tax plus surtax.
    pub total_tax: Money,
    /// Annual gross less total tax.
    pub net: Money,
}

/// Period-to-date figures.
///
/// These are a linear projection (weekly figure multiplied by the number of
/// elapsed periods), not a ledger of what was actually paid in earlier weeks.
/// They diverge from true year-to-date totals as soon as pay varies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodToDate {
    /// Number of periods the weekly figures were multiplied by.
    pub periods_elapsed: u32,
    /// Projected gross to date.
    pub gross: Money,
    /// Projected income tax plus surtax to date.
    pub tax: Money,
    /// Projected net to date.
    pub net: Money,
}

impl PeriodToDate {
    /// Projects weekly figures across `periods_elapsed` periods.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if a projected figure overflows.
    pub fn project(
        gross: Money,
        tax: Money,
        net: Money,
        periods_elapsed: u32,
    ) -> EngineResult<Self> {
        let factor = Decimal::from(periods_elapsed);
        Ok(Self {
            periods_elapsed,
            gross: gross.try_mul("gross_to_date", factor)?,
            tax: tax.try_mul("tax_to_date", factor)?,
            net: net.try_mul("net_to_date", factor)?,
        })
    }
}

/// The payroll result for one employee and one pay period.
///
/// Produced by the payroll engine; monetary values keep full precision and
/// are rounded only when converted to a [`Payslip`](super::Payslip).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriodResult {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// The employee's department tag, if known.
    pub department: Option<String>,
    /// The pay period the result covers.
    pub period: PayPeriod,
    /// Hourly pay rate.
    pub hourly_rate: Money,
    /// Hours worked this period.
    pub hours_worked: Decimal,
    /// Hourly rate multiplied by all hours worked.
    pub base_pay: Money,
    /// Hours worked beyond the schedule.
    pub overtime_hours: Decimal,
    /// Overtime premium paid on top of base pay.
    pub overtime_pay: Money,
    /// Base pay plus overtime pay.
    pub gross: Money,
    /// Weekly income tax (PAYE).
    pub income_tax: Money,
    /// Weekly surtax (USC).
    pub surtax: Money,
    /// Weekly income tax plus surtax.
    pub total_tax: Money,
    /// Weekly gross less total tax.
    pub net: Money,
    /// The annualized figures the weekly taxes were derived from.
    pub annual: AnnualFigures,
    /// Linear period-to-date projection.
    pub period_to_date: PeriodToDate,
    /// Audit trail of calculation steps.
    pub audit_steps: Vec<AuditStep>,
}
