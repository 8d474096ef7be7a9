//! Monetary value type.
//!
//! [`Money`] wraps a [`Decimal`] so that every amount flowing through the
//! engine uses exact base-10 arithmetic. Rounding happens only when a value
//! is prepared for display.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of decimal places monetary values are rounded to for display.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// An exact, non-negative-at-the-boundary currency amount.
///
/// Arithmetic keeps full decimal precision. Values constructed from external
/// input are checked to be numeric and non-negative; intermediate results of
/// subtraction may go below zero and are clamped by the calculators that
/// produce them.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Money;
///
/// let rate = Money::parse("rate", "20.00").unwrap();
/// let pay = rate * rust_decimal::Decimal::from(45);
/// assert_eq!(pay.to_string(), "900.00");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero in the display currency.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a monetary value, rejecting negative amounts.
    pub fn non_negative(field: &str, value: Decimal) -> EngineResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(EngineError::InvalidAmount {
                field: field.to_string(),
                value: value.to_string(),
                message: "must not be negative".to_string(),
            });
        }
        Ok(Money(value))
    }

    /// Parses a monetary value from external text.
    ///
    /// Fails with `InvalidAmount` when the text is not a decimal number or
    /// when it is negative.
    pub fn parse(field: &str, text: &str) -> EngineResult<Self> {
        let value = parse_decimal(field, text)?;
        Self::non_negative(field, value)
    }

    /// Wraps a decimal without validation, for values derived inside the engine.
    pub(crate) fn from_decimal(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns the underlying decimal amount.
    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is exactly zero.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Clamps negative amounts to zero.
    pub fn clamp_non_negative(self) -> Self {
        self.max(Money::ZERO)
    }

    /// Multiplies by `factor`, failing with `InvalidAmount` on overflow.
    ///
    /// `field` names the amount being computed.
    pub fn try_mul(self, field: &str, factor: Decimal) -> EngineResult<Money> {
        self.0
            .checked_mul(factor)
            .map(Money)
            .ok_or_else(|| out_of_range(field, format!("{} × {}", self.0, factor)))
    }

    /// Adds `other`, failing with `InvalidAmount` on overflow.
    pub fn try_add(self, field: &str, other: Money) -> EngineResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| out_of_range(field, format!("{} + {}", self.0, other.0)))
    }

    /// Subtracts `other`, failing with `InvalidAmount` on overflow.
    pub fn try_sub(self, field: &str, other: Money) -> EngineResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| out_of_range(field, format!("{} − {}", self.0, other.0)))
    }

    /// Sums amounts, failing with `InvalidAmount` on overflow.
    pub fn try_sum<I>(field: &str, amounts: I) -> EngineResult<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.try_add(field, amount))
    }

    /// Rounds to the display currency's minor unit.
    ///
    /// Uses banker's rounding (half to even), matching how the source figures
    /// have always been formatted. The result always carries exactly two
    /// decimal places.
    pub fn round_for_display(self) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(DISPLAY_DECIMAL_PLACES);
        Money(rounded)
    }
}

/// Parses a non-negative decimal such as an hours figure.
pub(crate) fn parse_non_negative(field: &str, text: &str) -> EngineResult<Decimal> {
    let value = parse_decimal(field, text)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidAmount {
            field: field.to_string(),
            value: text.to_string(),
            message: "must not be negative".to_string(),
        });
    }
    Ok(value)
}

fn out_of_range(field: &str, value: String) -> EngineError {
    EngineError::InvalidAmount {
        field: field.to_string(),
        value,
        message: "out of range".to_string(),
    }
}

fn parse_decimal(field: &str, text: &str) -> EngineResult<Decimal> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| EngineError::InvalidAmount {
            field: field.to_string(),
            value: text.to_string(),
            message: "not a decimal number".to_string(),
        })
}

impl TryFrom<Decimal> for Money {
    type Error = EngineError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::non_negative("amount", value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.round_for_display().0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, rhs: Decimal) -> Money {
        Money(self.0 * rhs)
    }
}

/// Division by a period count, used to de-annualize liabilities.
impl Div<u32> for Money {
    type Output = Money;

    fn div(self, rhs: u32) -> Money {
        Money(self.0 / Decimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
