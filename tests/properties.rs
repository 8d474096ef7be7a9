//! Property-based tests for the payroll calculations.

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    banded_liability, calculate_income_tax, calculate_overtime, calculate_surtax,
};
use payroll_engine::config::{ConfigLoader, PayrollPolicy};
use payroll_engine::engine::PayrollEngine;
use payroll_engine::models::{EmployeeRecord, Money, PayPeriod};

fn reference_policy() -> PayrollPolicy {
    ConfigLoader::load("./config/ie_2024")
        .expect("Failed to load config")
        .into_policy()
}

fn cents(value: u64) -> Money {
    Money::non_negative("amount", Decimal::new(value as i64, 2)).unwrap()
}

fn quarter_hours(value: u32) -> Decimal {
    Decimal::new(value as i64 * 25, 2)
}

fn record(id: usize, rate_cents: u64, worked: u32, scheduled: u32) -> EmployeeRecord {
    EmployeeRecord {
        id: format!("emp_{:03}", id),
        name: format!("Employee {}", id),
        department: None,
        hourly_rate: cents(rate_cents),
        hours_worked: quarter_hours(worked),
        hours_scheduled: quarter_hours(scheduled),
    }
}

proptest! {
    #[test]
    fn test_income_tax_is_monotonic(a in 0u64..50_000_000u64, b in 0u64..50_000_000u64) {
        let policy = reference_policy();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let low_tax = calculate_income_tax(cents(low), policy.income_tax(), 1)
            .unwrap()
            .liability;
        let high_tax = calculate_income_tax(cents(high), policy.income_tax(), 1)
            .unwrap()
            .liability;

        prop_assert!(
            low_tax <= high_tax,
            "tax({}) = {} > tax({}) = {}",
            low,
            low_tax,
            high,
            high_tax
        );
    }

    #[test]
    fn test_surtax_is_monotonic(a in 0u64..50_000_000u64, b in 0u64..50_000_000u64) {
        let policy = reference_policy();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let low_tax = calculate_surtax(cents(low), policy.surtax(), 1).unwrap().liability;
        let high_tax = calculate_surtax(cents(high), policy.surtax(), 1).unwrap().liability;

        prop_assert!(low_tax <= high_tax);
    }

    #[test]
    fn test_income_tax_never_negative(income in 0u64..2_000_000u64) {
        let policy = reference_policy();
        let result = calculate_income_tax(cents(income), policy.income_tax(), 1).unwrap();

        prop_assert!(result.liability >= Money::ZERO);
        prop_assert!(result.credit_applied <= policy.income_tax().credit);
    }

    #[test]
    fn test_no_overtime_within_schedule(
        worked in 0u32..400u32,
        extra in 0u32..100u32,
        rate in 0u64..20_000u64
    ) {
        let result = calculate_overtime(
            quarter_hours(worked),
            quarter_hours(worked + extra),
            cents(rate),
            Decimal::new(15, 1),
            1,
        )
        .unwrap();

        prop_assert_eq!(result.overtime_hours, Decimal::ZERO);
        prop_assert!(result.overtime_pay.is_zero());
    }

    #[test]
    fn test_net_is_gross_less_taxes(
        rate in 0u64..20_000u64,
        worked in 0u32..320u32,
        scheduled in 0u32..200u32,
        period in 1u32..=53u32
    ) {
        let engine = PayrollEngine::new(reference_policy());
        let employee = record(1, rate, worked, scheduled);
        let result = engine
            .calculate_employee(&employee, PayPeriod::new(period).unwrap())
            .unwrap();

        prop_assert_eq!(result.net, result.gross - result.income_tax - result.surtax);
        prop_assert_eq!(result.gross, result.base_pay + result.overtime_pay);
    }

    #[test]
    fn test_totals_independent_of_order(
        employees in prop::collection::vec((0u64..10_000u64, 0u32..240u32, 0u32..200u32), 0..12),
        rotation in 0usize..12usize
    ) {
        let engine = PayrollEngine::new(reference_policy());
        let period = PayPeriod::new(10).unwrap();
        let mut records: Vec<EmployeeRecord> = employees
            .iter()
            .enumerate()
            .map(|(i, (rate, worked, scheduled))| record(i, *rate, *worked, *scheduled))
            .collect();

        let forward = engine.run(&records, period);
        if !records.is_empty() {
            let by = rotation % records.len();
            records.rotate_left(by);
        }
        records.reverse();
        let shuffled = engine.run(&records, period);

        prop_assert_eq!(forward.totals.employee_count, records.len());
        prop_assert_eq!(&forward.totals, &shuffled.totals);

        let gross: Money = forward.results.iter().map(|r| r.gross).sum();
        prop_assert_eq!(forward.totals.gross, gross);
    }
}

proptest! {
    #[test]
    fn test_extreme_rates_fail_alone(exponent in 0u32..28u32, hours in 0u32..400u32) {
        let engine = PayrollEngine::new(reference_policy());
        let rate = Decimal::from_i128_with_scale(10i128.pow(exponent), 0);
        let huge = EmployeeRecord {
            hourly_rate: Money::non_negative("rate", rate).unwrap(),
            ..record(1, 0, hours, 160)
        };
        let records = vec![record(0, 2000, 180, 160), huge];

        let run = engine.run(&records, PayPeriod::new(1).unwrap());

        prop_assert_eq!(run.results.len() + run.failures.len(), 2);
        prop_assert_eq!(&run.results[0].employee_id, "emp_000");
        for failure in &run.failures {
            prop_assert_eq!(failure.employee_id(), Some("emp_001"));
        }
    }
}

#[test]
fn test_liability_continuous_at_band_boundaries() {
    let policy = reference_policy();
    let step = cents(1);

    for table in [&policy.income_tax().table, &policy.surtax().table] {
        let max_rate = table
            .bands
            .iter()
            .map(|b| b.rate)
            .chain(std::iter::once(table.top_rate))
            .max()
            .unwrap();
        let max_jump = step * max_rate;

        for band in &table.bands {
            let at = banded_liability(band.upper_bound, table).unwrap();
            let below = banded_liability(band.upper_bound - step, table).unwrap();
            let above = banded_liability(band.upper_bound + step, table).unwrap();

            assert!(at - below <= max_jump, "jump below {}", band.upper_bound);
            assert!(above - at <= max_jump, "jump above {}", band.upper_bound);
            assert!(below <= at && at <= above);
        }
    }
}
