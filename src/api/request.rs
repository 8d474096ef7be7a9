//! Request types for the payroll API.
//!
//! This module defines the JSON request structure for the `/payroll` endpoint.
//! Employee attributes are kept loosely typed here; the engine validates
//! them one employee at a time so a bad record fails alone.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineResult;
use crate::models::{EmployeeFields, PayPeriod};

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The pay date; its ISO week is the pay period.
    #[serde(default)]
    pub pay_date: Option<NaiveDate>,
    /// An explicit pay period number, taking precedence over `pay_date`.
    #[serde(default)]
    pub period_number: Option<u32>,
    /// The employees to pay.
    pub employees: Vec<EmployeeRequest>,
}

impl PayrollRequest {
    /// Resolves the pay period of the request.
    ///
    /// `period_number` wins over `pay_date`; with neither, the current
    /// week is used.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayPeriod` if `period_number` is out of range.
    pub fn pay_period(&self) -> EngineResult<PayPeriod> {
        match (self.period_number, self.pay_date) {
            (Some(number), _) => PayPeriod::new(number),
            (None, Some(date)) => Ok(PayPeriod::from_date(date)),
            (None, None) => Ok(PayPeriod::from_date(Utc::now().date_naive())),
        }
    }
}

/// One employee in a payroll request.
///
/// Everything except `id` is collected as raw attributes. Numbers may be
/// sent as JSON numbers or strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Remaining attributes (`name`, `rate`, `hours_worked`, ...).
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl From<&EmployeeRequest> for EmployeeFields {
    fn from(req: &EmployeeRequest) -> Self {
        req.attributes
            .iter()
            .filter_map(|(field, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((field.clone(), text))
            })
            .collect()
    }
}
