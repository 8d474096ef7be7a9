//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type identifying which week of the
//! pay year a payroll run covers.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The largest ordinal a weekly pay period can take (ISO years have up to 53 weeks).
pub const MAX_PERIOD_NUMBER: u32 = 53;

/// The pay period a run is computed for.
///
/// The period number is the 1-based ordinal of the week within the pay year
/// and drives the period-to-date projections.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::from_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
/// assert_eq!(period.number(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PayPeriod(u32);

impl PayPeriod {
    /// Creates a pay period from its ordinal number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayPeriod` if `number` is zero or above
    /// [`MAX_PERIOD_NUMBER`].
    pub fn new(number: u32) -> EngineResult<Self> {
        if number == 0 || number > MAX_PERIOD_NUMBER {
            return Err(EngineError::InvalidPayPeriod { period: number });
        }
        Ok(Self(number))
    }

    /// Returns the pay period containing `date`, using its ISO week number.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.iso_week().week())
    }

    /// Returns the 1-based period number.
    pub fn number(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for PayPeriod {
    type Error = EngineError;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        PayPeriod::new(number)
    }
}

impl From<PayPeriod> for u32 {
    fn from(period: PayPeriod) -> Self {
        period.0
    }
}
