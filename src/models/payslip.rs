//! Display-ready views of payroll results.
//!
//! Report renderers read these instead of the raw results: every monetary
//! value is already rounded to the currency's minor unit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Money, PayPeriodResult, PayrollTotals};

/// One employee's payslip with every amount rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// The department tag, if known.
    pub department: Option<String>,
    /// The pay period number.
    pub period_number: u32,
    /// Hourly pay rate.
    pub hourly_rate: Money,
    /// Hours worked this period.
    pub hours_worked: Decimal,
    /// Hours worked beyond the schedule.
    pub overtime_hours: Decimal,
    /// Rate multiplied by all hours worked.
    pub base_pay: Money,
    /// Overtime premium.
    pub overtime_pay: Money,
    /// Weekly gross pay.
    pub gross: Money,
    /// Weekly income tax.
    pub income_tax: Money,
    /// Weekly surtax.
    pub surtax: Money,
    /// Weekly income tax plus surtax.
    pub total_tax: Money,
    /// Weekly net pay.
    pub net: Money,
    /// Annualized gross.
    pub annual_gross: Money,
    /// Annual income tax.
    pub annual_income_tax: Money,
    /// Annual surtax.
    pub annual_surtax: Money,
    /// Annual total tax.
    pub annual_total_tax: Money,
    /// Annual net.
    pub annual_net: Money,
    /// Projected gross to date.
    pub gross_to_date: Money,
    /// Projected tax to date.
    pub tax_to_date: Money,
    /// Projected net to date.
    pub net_to_date: Money,
}

impl From<&PayPeriodResult> for Payslip {
    fn from(result: &PayPeriodResult) -> Self {
        Self {
            employee_id: result.employee_id.clone(),
            name: result.name.clone(),
            department: result.department.clone(),
            period_number: result.period.number(),
            hourly_rate: result.hourly_rate.round_for_display(),
            hours_worked: result.hours_worked.normalize(),
            overtime_hours: result.overtime_hours.normalize(),
            base_pay: result.base_pay.round_for_display(),
            overtime_pay: result.overtime_pay.round_for_display(),
            gross: result.gross.round_for_display(),
            income_tax: result.income_tax.round_for_display(),
            surtax: result.surtax.round_for_display(),
            total_tax: result.total_tax.round_for_display(),
            net: result.net.round_for_display(),
            annual_gross: result.annual.gross.round_for_display(),
            annual_income_tax: result.annual.income_tax.round_for_display(),
            annual_surtax: result.annual.surtax.round_for_display(),
            annual_total_tax: result.annual.total_tax.round_for_display(),
            annual_net: result.annual.net.round_for_display(),
            gross_to_date: result.period_to_date.gross.round_for_display(),
            tax_to_date: result.period_to_date.tax.round_for_display(),
            net_to_date: result.period_to_date.net.round_for_display(),
        }
    }
}

/// Company-wide summary with rounded totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Number of employees paid.
    pub employee_count: usize,
    /// Total weekly gross.
    pub gross: Money,
    /// Total overtime pay.
    pub overtime: Money,
    /// Total weekly net.
    pub net: Money,
    /// Total weekly tax.
    pub tax: Money,
}

impl From<&PayrollTotals> for PayrollSummary {
    fn from(totals: &PayrollTotals) -> Self {
        Self {
            employee_count: totals.employee_count,
            gross: totals.gross.round_for_display(),
            overtime: totals.overtime.round_for_display(),
            net: totals.net.round_for_display(),
            tax: totals.tax.round_for_display(),
        }
    }
}
