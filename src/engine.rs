//! The payroll engine.
//!
//! [`PayrollEngine`] turns each employee record into a [`PayPeriodResult`]
//! and folds the results into [`PayrollTotals`]. Per-employee results are
//! pure functions of the record, the policy and the pay period; the fold is
//! a separate step over the successful results.
//!
//! A record that fails validation is reported as a failure tagged with the
//! employee's identifier. It never aborts the run and never touches the
//! totals of other employees.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{calculate_income_tax, calculate_overtime, calculate_surtax};
use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AnnualFigures, AuditStep, EmployeeFields, EmployeeRecord, PayPeriod, PayPeriodResult,
    PayrollTotals, PeriodToDate,
};

/// The outcome of one payroll run.
#[derive(Debug)]
pub struct PayrollRun {
    /// The pay period the run covered.
    pub period: PayPeriod,
    /// Results for every employee that was processed successfully, in input order.
    pub results: Vec<PayPeriodResult>,
    /// One error per employee that could not be processed, tagged with its id.
    pub failures: Vec<EngineError>,
    /// Totals over `results`.
    pub totals: PayrollTotals,
}

impl PayrollRun {
    fn from_outcomes<I>(period: PayPeriod, outcomes: I) -> Self
    where
        I: IntoIterator<Item = EngineResult<PayPeriodResult>>,
    {
        let mut results = Vec::new();
        let mut failures = Vec::new();
        let mut totals = PayrollTotals::new();
        for outcome in outcomes {
            let folded = outcome.and_then(|result| {
                totals
                    .add(&result)
                    .map_err(|err| err.for_employee(&result.employee_id))?;
                Ok(result)
            });
            match folded {
                Ok(result) => results.push(result),
                Err(err) => failures.push(err),
            }
        }

        Self {
            period,
            results,
            failures,
            totals,
        }
    }

    /// Returns true if every employee was processed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Computes weekly payroll under one validated policy.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{Band, BandTable, IncomeTaxPolicy, PayrollPolicy, SurtaxPolicy};
/// use payroll_engine::engine::PayrollEngine;
/// use payroll_engine::models::{EmployeeFields, EmployeeRecord, Money, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let money = |s: &str| Money::parse("amount", s).unwrap();
/// let policy = PayrollPolicy::new(
///     52,
///     Decimal::new(15, 1),
///     IncomeTaxPolicy {
///         table: BandTable::new(
///             vec![Band::new(money("44000"), Decimal::new(20, 2))],
///             Decimal::new(40, 2),
///         ),
///         credit: money("3750"),
///     },
///     SurtaxPolicy {
///         table: BandTable::new(
///             vec![
///                 Band::new(money("12012"), Decimal::new(5, 3)),
///                 Band::new(money("28700"), Decimal::new(2, 2)),
///             ],
///             Decimal::new(4, 2),
///         ),
///     },
/// )
/// .unwrap();
///
/// let engine = PayrollEngine::new(policy);
/// let fields = EmployeeFields::new()
///     .with("name", "John Doe")
///     .with("rate", "25")
///     .with("hours_worked", "40")
///     .with("hours_scheduled", "40");
/// let record = EmployeeRecord::from_fields("1234567A", &fields).unwrap();
///
/// let result = engine
///     .calculate_employee(&record, PayPeriod::new(10).unwrap())
///     .unwrap();
/// assert_eq!(result.gross, money("1000"));
/// assert_eq!(result.net, result.gross - result.income_tax - result.surtax);
/// ```
#[derive(Debug, Clone)]
pub struct PayrollEngine {
    policy: PayrollPolicy,
}

impl PayrollEngine {
    /// Creates an engine for a validated policy.
    pub fn new(policy: PayrollPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy the engine computes under.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Computes one employee's result for a pay period.
    ///
    /// Steps:
    /// 1. Overtime hours and overtime premium
    /// 2. Weekly gross = rate × all hours worked + overtime premium
    /// 3. Annual gross = weekly gross × pay periods per year
    /// 4. Annual income tax and annual surtax on the annual gross
    /// 5. Weekly taxes = annual taxes ÷ pay periods per year
    /// 6. Weekly net = weekly gross − weekly taxes
    /// 7. Period-to-date = weekly figures × elapsed periods
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, tagged with the employee id, if the record
    /// holds a negative rate or negative hours, or if an amount is too large
    /// to compute.
    pub fn calculate_employee(
        &self,
        employee: &EmployeeRecord,
        period: PayPeriod,
    ) -> EngineResult<PayPeriodResult> {
        self.compute(employee, period)
            .map_err(|err| err.for_employee(&employee.id))
    }

    fn compute(
        &self,
        employee: &EmployeeRecord,
        period: PayPeriod,
    ) -> EngineResult<PayPeriodResult> {
        employee.validate()?;

        let periods_per_year = self.policy.pay_periods_per_year();
        let mut audit_steps: Vec<AuditStep> = Vec::with_capacity(5);
        let mut step_number: u32 = 1;

        let overtime = calculate_overtime(
            employee.hours_worked,
            employee.hours_scheduled,
            employee.hourly_rate,
            self.policy.overtime_multiplier(),
            step_number,
        )?;
        audit_steps.push(overtime.audit_step);
        step_number += 1;

        let base_pay = employee
            .hourly_rate
            .try_mul("base_pay", employee.hours_worked)?;
        let gross = base_pay.try_add("gross", overtime.overtime_pay)?;
        let annual_gross = gross.try_mul("annual_gross", Decimal::from(periods_per_year))?;
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "gross_pay".to_string(),
            rule_name: "Gross Pay".to_string(),
            input: serde_json::json!({
                "hourly_rate": employee.hourly_rate.amount().normalize().to_string(),
                "hours_worked": employee.hours_worked.normalize().to_string(),
                "overtime_pay": overtime.overtime_pay.amount().normalize().to_string(),
                "pay_periods_per_year": periods_per_year
            }),
            output: serde_json::json!({
                "base_pay": base_pay.amount().normalize().to_string(),
                "gross": gross.amount().normalize().to_string(),
                "annual_gross": annual_gross.amount().normalize().to_string()
            }),
            reasoning: format!(
                "€{} × {} hours + €{} overtime = €{}; × {} periods = €{}",
                employee.hourly_rate.amount().normalize(),
                employee.hours_worked.normalize(),
                overtime.overtime_pay.amount().normalize(),
                gross.amount().normalize(),
                periods_per_year,
                annual_gross.amount().normalize()
            ),
        });
        step_number += 1;

        let income_tax =
            calculate_income_tax(annual_gross, self.policy.income_tax(), step_number)?;
        audit_steps.push(income_tax.audit_step);
        step_number += 1;

        let surtax = calculate_surtax(annual_gross, self.policy.surtax(), step_number)?;
        audit_steps.push(surtax.audit_step);
        step_number += 1;

        let weekly_income_tax = income_tax.liability / periods_per_year;
        let weekly_surtax = surtax.liability / periods_per_year;
        let total_tax = weekly_income_tax.try_add("total_tax", weekly_surtax)?;
        let net = gross
            .try_sub("net", weekly_income_tax)?
            .try_sub("net", weekly_surtax)?;

        let annual_total_tax = income_tax
            .liability
            .try_add("annual_total_tax", surtax.liability)?;
        let annual = AnnualFigures {
            gross: annual_gross,
            income_tax: income_tax.liability,
            surtax: surtax.liability,
            total_tax: annual_total_tax,
            net: annual_gross.try_sub("annual_net", annual_total_tax)?,
        };

        let periods_elapsed = period.number().min(periods_per_year);
        let period_to_date = PeriodToDate::project(gross, total_tax, net, periods_elapsed)?;

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "net_pay".to_string(),
            rule_name: "Net Pay".to_string(),
            input: serde_json::json!({
                "gross": gross.amount().normalize().to_string(),
                "annual_income_tax": income_tax.liability.amount().normalize().to_string(),
                "annual_surtax": surtax.liability.amount().normalize().to_string(),
                "pay_periods_per_year": periods_per_year
            }),
            output: serde_json::json!({
                "income_tax": weekly_income_tax.to_string(),
                "surtax": weekly_surtax.to_string(),
                "net": net.to_string(),
                "periods_elapsed": periods_elapsed
            }),
            reasoning: format!(
                "€{} − (€{} income tax + €{} surtax) = €{}",
                gross, weekly_income_tax, weekly_surtax, net
            ),
        });

        debug!(
            employee_id = %employee.id,
            gross = %gross,
            overtime_pay = %overtime.overtime_pay,
            total_tax = %total_tax,
            net = %net,
            "Calculated employee pay"
        );

        Ok(PayPeriodResult {
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            department: employee.department.clone(),
            period,
            hourly_rate: employee.hourly_rate,
            hours_worked: employee.hours_worked,
            base_pay,
            overtime_hours: overtime.overtime_hours,
            overtime_pay: overtime.overtime_pay,
            gross,
            income_tax: weekly_income_tax,
            surtax: weekly_surtax,
            total_tax,
            net,
            annual,
            period_to_date,
            audit_steps,
        })
    }

    /// Validates raw attributes and computes the employee's result.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` or `InvalidAmount`, tagged with `employee_id`.
    pub fn calculate_fields(
        &self,
        employee_id: &str,
        fields: &EmployeeFields,
        period: PayPeriod,
    ) -> EngineResult<PayPeriodResult> {
        let record = EmployeeRecord::from_fields(employee_id, fields)
            .map_err(|err| err.for_employee(employee_id))?;
        self.calculate_employee(&record, period)
    }

    /// Runs payroll over validated records.
    pub fn run(&self, employees: &[EmployeeRecord], period: PayPeriod) -> PayrollRun {
        let started = Instant::now();
        let run = PayrollRun::from_outcomes(
            period,
            employees
                .iter()
                .map(|employee| self.calculate_employee(employee, period)),
        );
        log_run(&run, started);
        run
    }

    /// Runs payroll over raw `id → attributes` entries.
    ///
    /// Entries that fail validation are recorded in
    /// [`PayrollRun::failures`]; the remaining employees are still paid.
    pub fn run_fields<'a, I>(&self, entries: I, period: PayPeriod) -> PayrollRun
    where
        I: IntoIterator<Item = (&'a str, &'a EmployeeFields)>,
    {
        let started = Instant::now();
        let run = PayrollRun::from_outcomes(
            period,
            entries
                .into_iter()
                .map(|(id, fields)| self.calculate_fields(id, fields, period)),
        );
        log_run(&run, started);
        run
    }
}

fn log_run(run: &PayrollRun, started: Instant) {
    for failure in &run.failures {
        warn!(
            employee_id = failure.employee_id().unwrap_or("unknown"),
            error = %failure.root(),
            "Employee skipped"
        );
    }
    info!(
        period = run.period.number(),
        processed = run.results.len(),
        failed = run.failures.len(),
        gross = %run.totals.gross,
        net = %run.totals.net,
        duration_us = started.elapsed().as_micros() as u64,
        "Payroll run completed"
    );
}
