//! Company-wide payroll totals.

use serde::{Deserialize, Serialize};

use super::{Money, PayPeriodResult};
use crate::error::EngineResult;

/// Sums of weekly figures across every employee processed in one run.
///
/// Totals are built by folding per-employee results; a fresh value starts
/// at zero and nothing carries over between runs.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollTotals;
///
/// let totals = PayrollTotals::new();
/// assert_eq!(totals.employee_count, 0);
/// assert!(totals.gross.is_zero());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Number of results folded in.
    pub employee_count: usize,
    /// Sum of weekly gross pay.
    pub gross: Money,
    /// Sum of weekly overtime pay.
    pub overtime: Money,
    /// Sum of weekly net pay.
    pub net: Money,
    /// Sum of weekly income tax plus surtax.
    pub tax: Money,
}

impl PayrollTotals {
    /// Creates empty totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one employee's weekly figures into the totals.
    ///
    /// Either every figure is added or, on overflow, none is.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if a running total overflows.
    pub fn add(&mut self, result: &PayPeriodResult) -> EngineResult<()> {
        *self = Self {
            employee_count: self.employee_count + 1,
            gross: self.gross.try_add("total_gross", result.gross)?,
            overtime: self.overtime.try_add("total_overtime", result.overtime_pay)?,
            net: self.net.try_add("total_net", result.net)?,
            tax: self.tax.try_add("total_tax", result.total_tax)?,
        };
        Ok(())
    }

    /// Combines two partial totals.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if a combined total overflows.
    pub fn merge(self, other: PayrollTotals) -> EngineResult<Self> {
        Ok(Self {
            employee_count: self.employee_count + other.employee_count,
            gross: self.gross.try_add("total_gross", other.gross)?,
            overtime: self.overtime.try_add("total_overtime", other.overtime)?,
            net: self.net.try_add("total_net", other.net)?,
            tax: self.tax.try_add("total_tax", other.tax)?,
        })
    }

    /// Folds a sequence of results.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if a running total overflows.
    pub fn from_results<'a, I>(results: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = &'a PayPeriodResult>,
    {
        results.into_iter().try_fold(Self::new(), |mut totals, result| {
            totals.add(result)?;
            Ok(totals)
        })
    }
}
