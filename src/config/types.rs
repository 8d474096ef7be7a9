//! Configuration types for payroll policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML policy files, together with the validation
//! that runs once before any employee is processed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Money;

/// Default number of pay periods per year (weekly pay).
pub const DEFAULT_PAY_PERIODS_PER_YEAR: u32 = 52;

/// Default overtime premium multiplier (time and a half).
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Metadata about the payroll policy.
///
/// Identifies which jurisdiction and tax year a set of bands describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyMetadata {
    /// Short policy code (e.g., "IE-2024").
    pub code: String,
    /// Human-readable policy name.
    pub name: String,
    /// The tax year the rates apply to.
    pub tax_year: String,
}

/// One bounded band of a progressive table.
///
/// Income up to and including `upper_bound` (and above the previous band's
/// bound) is taxed at `rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Upper bound of annual income for this band, inclusive.
    pub upper_bound: Money,
    /// Marginal rate applied to the slice of income inside the band.
    pub rate: Decimal,
}

impl Band {
    /// Creates a band from an upper bound and a rate.
    pub fn new(upper_bound: Money, rate: Decimal) -> Self {
        Self { upper_bound, rate }
    }
}

/// An ordered progressive table.
///
/// The bounded bands are followed by an implicit unbounded band taxed at
/// `top_rate`.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{Band, BandTable};
/// use payroll_engine::models::Money;
/// use rust_decimal::Decimal;
///
/// let table = BandTable::new(
///     vec![Band::new(Money::parse("bound", "44000").unwrap(), Decimal::new(20, 2))],
///     Decimal::new(40, 2),
/// );
/// assert!(table.validate("income_tax").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTable {
    /// Bounded bands in ascending order of upper bound.
    #[serde(alias = "tiers")]
    pub bands: Vec<Band>,
    /// Rate of the final, unbounded band.
    pub top_rate: Decimal,
}

impl BandTable {
    /// Creates a table from its bounded bands and the unbounded top rate.
    pub fn new(bands: Vec<Band>, top_rate: Decimal) -> Self {
        Self { bands, top_rate }
    }

    /// Checks the table invariants.
    ///
    /// Bounds must be positive and strictly increasing; every rate,
    /// including the top rate, must be non-negative.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBandTable` naming `table` on the first violation.
    pub fn validate(&self, table: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidBandTable {
            table: table.to_string(),
            message,
        };

        let mut previous = Money::ZERO;
        for (index, band) in self.bands.iter().enumerate() {
            if band.upper_bound <= previous {
                return Err(invalid(format!(
                    "band {} upper bound {} must be greater than {}",
                    index + 1,
                    band.upper_bound.amount(),
                    previous.amount()
                )));
            }
            if band.rate.is_sign_negative() && !band.rate.is_zero() {
                return Err(invalid(format!(
                    "band {} rate {} must not be negative",
                    index + 1,
                    band.rate
                )));
            }
            previous = band.upper_bound;
        }

        if self.top_rate.is_sign_negative() && !self.top_rate.is_zero() {
            return Err(invalid(format!(
                "top rate {} must not be negative",
                self.top_rate
            )));
        }

        Ok(())
    }
}

/// Progressive income tax (PAYE) policy: a band table and a flat credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxPolicy {
    /// The progressive bands.
    #[serde(flatten)]
    pub table: BandTable,
    /// Flat credit subtracted from the computed liability.
    pub credit: Money,
}

/// Tiered surtax (USC) policy. No credit applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurtaxPolicy {
    /// The cumulative tiers.
    #[serde(flatten)]
    pub table: BandTable,
}

/// Every value the payroll engine needs from its caller.
///
/// Build it with [`PayrollPolicy::new`] or load it with
/// [`ConfigLoader`](super::ConfigLoader); both validate the policy before it
/// can reach the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollPolicy {
    pay_periods_per_year: u32,
    overtime_multiplier: Decimal,
    income_tax: IncomeTaxPolicy,
    surtax: SurtaxPolicy,
}

impl PayrollPolicy {
    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// - `InvalidBandTable` if either table breaks its invariants
    /// - `InvalidPolicy` if `pay_periods_per_year` is zero or the overtime
    ///   multiplier is negative
    pub fn new(
        pay_periods_per_year: u32,
        overtime_multiplier: Decimal,
        income_tax: IncomeTaxPolicy,
        surtax: SurtaxPolicy,
    ) -> EngineResult<Self> {
        if pay_periods_per_year == 0 {
            return Err(EngineError::InvalidPolicy {
                message: "pay_periods_per_year must be at least 1".to_string(),
            });
        }
        if overtime_multiplier.is_sign_negative() && !overtime_multiplier.is_zero() {
            return Err(EngineError::InvalidPolicy {
                message: format!(
                    "overtime_multiplier {} must not be negative",
                    overtime_multiplier
                ),
            });
        }
        income_tax.table.validate("income_tax")?;
        surtax.table.validate("surtax")?;

        Ok(Self {
            pay_periods_per_year,
            overtime_multiplier,
            income_tax,
            surtax,
        })
    }

    /// Pay periods per year, used to annualize and de-annualize.
    pub fn pay_periods_per_year(&self) -> u32 {
        self.pay_periods_per_year
    }

    /// Overtime premium multiplier.
    pub fn overtime_multiplier(&self) -> Decimal {
        self.overtime_multiplier
    }

    /// Income tax bands and credit.
    pub fn income_tax(&self) -> &IncomeTaxPolicy {
        &self.income_tax
    }

    /// Surtax tiers.
    pub fn surtax(&self) -> &SurtaxPolicy {
        &self.surtax
    }
}

/// Contents of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PolicyFile {
    #[serde(flatten)]
    pub metadata: PolicyMetadata,
    #[serde(default = "default_pay_periods_per_year")]
    pub pay_periods_per_year: u32,
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
}

fn default_pay_periods_per_year() -> u32 {
    DEFAULT_PAY_PERIODS_PER_YEAR
}

fn default_overtime_multiplier() -> Decimal {
    DEFAULT_OVERTIME_MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::parse("test", s).unwrap()
    }

    fn surtax_table() -> BandTable {
        BandTable::new(
            vec![
                Band::new(money("12012"), dec("0.005")),
                Band::new(money("28700"), dec("0.02")),
            ],
            dec("0.04"),
        )
    }

    fn income_tax() -> IncomeTaxPolicy {
        IncomeTaxPolicy {
            table: BandTable::new(vec![Band::new(money("44000"), dec("0.20"))], dec("0.40")),
            credit: money("3750"),
        }
    }

    #[test]
    fn test_valid_table_passes() {
        assert!(surtax_table().validate("surtax").is_ok());
    }

    #[test]
    fn test_empty_table_is_flat_rate_and_valid() {
        let table = BandTable::new(vec![], dec("0.1"));
        assert!(table.validate("flat").is_ok());
    }

    #[test]
    fn test_equal_bounds_are_rejected() {
        let table = BandTable::new(
            vec![
                Band::new(money("12012"), dec("0.005")),
                Band::new(money("12012"), dec("0.02")),
            ],
            dec("0.04"),
        );

        match table.validate("surtax") {
            Err(EngineError::InvalidBandTable { table, message }) => {
                assert_eq!(table, "surtax");
                assert!(message.contains("band 2"));
            }
            other => panic!("Expected InvalidBandTable, got {:?}", other),
        }
    }

    #[test]
    fn test_decreasing_bounds_are_rejected() {
        let table = BandTable::new(
            vec![
                Band::new(money("28700"), dec("0.005")),
                Band::new(money("12012"), dec("0.02")),
            ],
            dec("0.04"),
        );
        assert!(table.validate("surtax").is_err());
    }

    #[test]
    fn test_zero_bound_is_rejected() {
        let table = BandTable::new(vec![Band::new(Money::ZERO, dec("0.1"))], dec("0.2"));
        assert!(table.validate("income_tax").is_err());
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let table = BandTable::new(vec![Band::new(money("100"), dec("-0.1"))], dec("0.2"));
        assert!(matches!(
            table.validate("income_tax"),
            Err(EngineError::InvalidBandTable { .. })
        ));
    }

    #[test]
    fn test_negative_top_rate_is_rejected() {
        let table = BandTable::new(vec![], dec("-0.2"));
        assert!(table.validate("income_tax").is_err());
    }

    #[test]
    fn test_policy_new_accepts_reference_values() {
        let policy = PayrollPolicy::new(
            DEFAULT_PAY_PERIODS_PER_YEAR,
            DEFAULT_OVERTIME_MULTIPLIER,
            income_tax(),
            SurtaxPolicy {
                table: surtax_table(),
            },
        )
        .unwrap();

        assert_eq!(policy.pay_periods_per_year(), 52);
        assert_eq!(policy.overtime_multiplier(), dec("1.5"));
        assert_eq!(policy.income_tax().credit, money("3750"));
        assert_eq!(policy.surtax().table.bands.len(), 2);
    }

    #[test]
    fn test_policy_rejects_zero_periods() {
        let result = PayrollPolicy::new(
            0,
            DEFAULT_OVERTIME_MULTIPLIER,
            income_tax(),
            SurtaxPolicy {
                table: surtax_table(),
            },
        );
        assert!(matches!(result, Err(EngineError::InvalidPolicy { .. })));
    }

    #[test]
    fn test_policy_rejects_bad_surtax_table() {
        let mut table = surtax_table();
        table.bands.reverse();
        let result = PayrollPolicy::new(52, dec("1.5"), income_tax(), SurtaxPolicy { table });

        match result {
            Err(EngineError::InvalidBandTable { table, .. }) => assert_eq!(table, "surtax"),
            other => panic!("Expected InvalidBandTable, got {:?}", other),
        }
    }

    #[test]
    fn test_default_overtime_multiplier_is_time_and_a_half() {
        assert_eq!(DEFAULT_OVERTIME_MULTIPLIER, dec("1.5"));
    }

    #[test]
    fn test_deserialize_surtax_tiers_from_yaml() {
        let yaml = r#"
tiers:
  - upper_bound: "12012"
    rate: "0.005"
  - upper_bound: "28700"
    rate: "0.02"
top_rate: "0.04"
"#;
        let surtax: SurtaxPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(surtax.table, surtax_table());
    }

    #[test]
    fn test_policy_file_defaults() {
        let yaml = r#"
code: "TEST"
name: "Test policy"
tax_year: "2024"
"#;
        let file: PolicyFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.metadata.code, "TEST");
        assert_eq!(file.pay_periods_per_year, DEFAULT_PAY_PERIODS_PER_YEAR);
        assert_eq!(file.overtime_multiplier, DEFAULT_OVERTIME_MULTIPLIER);
    }
}
