//! Employee model and related types.
//!
//! This module defines the strongly-typed [`EmployeeRecord`] consumed by the
//! payroll engine and the loosely-typed [`EmployeeFields`] attribute map it
//! is built from.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{Money, parse_non_negative};
use crate::error::{EngineError, EngineResult};

/// Attribute name for the employee's display name.
pub const FIELD_NAME: &str = "name";
/// Attribute name for the department tag.
pub const FIELD_DEPARTMENT: &str = "department";
/// Attribute name for the hourly pay rate.
pub const FIELD_RATE: &str = "rate";
/// Attribute name for hours worked this period.
pub const FIELD_HOURS_WORKED: &str = "hours_worked";
/// Attribute name for hours scheduled this period.
pub const FIELD_HOURS_SCHEDULED: &str = "hours_scheduled";

/// Raw per-employee attributes as supplied by the loading layer.
///
/// Values are kept as text until [`EmployeeRecord::from_fields`] validates
/// every required attribute at once.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmployeeFields;
///
/// let fields = EmployeeFields::new()
///     .with("name", "John Doe")
///     .with("rate", "25.00")
///     .with("hours_worked", "40")
///     .with("hours_scheduled", "40");
/// assert_eq!(fields.get("name"), Some("John Doe"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeFields(BTreeMap<String, String>);

impl EmployeeFields {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style variant of [`EmployeeFields::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Returns the raw value of an attribute, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn require(&self, field: &str) -> EngineResult<&str> {
        self.get(field).ok_or_else(|| EngineError::MissingField {
            field: field.to_string(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EmployeeFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A validated employee ready for payroll processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee (e.g. a PPSN).
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// Organisational tag, if the source supplied one.
    #[serde(default)]
    pub department: Option<String>,
    /// Pay per hour worked.
    pub hourly_rate: Money,
    /// Hours worked this period.
    pub hours_worked: Decimal,
    /// Hours scheduled this period; the overtime baseline.
    pub hours_scheduled: Decimal,
}

impl EmployeeRecord {
    /// Builds a record from raw attributes.
    ///
    /// `name`, `rate`, `hours_worked` and `hours_scheduled` are required;
    /// `department` is optional. Numeric attributes must parse as
    /// non-negative decimals.
    ///
    /// # Errors
    ///
    /// - `MissingField` if a required attribute is absent or blank
    /// - `InvalidAmount` if a numeric attribute is non-numeric or negative
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{EmployeeFields, EmployeeRecord};
    ///
    /// let fields = EmployeeFields::new()
    ///     .with("name", "Siobhan O'Neill")
    ///     .with("rate", "30.00")
    ///     .with("hours_worked", "35")
    ///     .with("hours_scheduled", "35");
    ///
    /// let record = EmployeeRecord::from_fields("8765432B", &fields).unwrap();
    /// assert_eq!(record.name, "Siobhan O'Neill");
    /// ```
    pub fn from_fields(id: &str, fields: &EmployeeFields) -> EngineResult<Self> {
        if id.trim().is_empty() {
            return Err(EngineError::MissingField {
                field: "id".to_string(),
            });
        }

        let name = fields.require(FIELD_NAME)?.trim();
        if name.is_empty() {
            return Err(EngineError::MissingField {
                field: FIELD_NAME.to_string(),
            });
        }

        let hourly_rate = Money::parse(FIELD_RATE, fields.require(FIELD_RATE)?)?;
        let hours_worked =
            parse_non_negative(FIELD_HOURS_WORKED, fields.require(FIELD_HOURS_WORKED)?)?;
        let hours_scheduled = parse_non_negative(
            FIELD_HOURS_SCHEDULED,
            fields.require(FIELD_HOURS_SCHEDULED)?,
        )?;

        let department = fields
            .get(FIELD_DEPARTMENT)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            department,
            hourly_rate,
            hours_worked,
            hours_scheduled,
        })
    }

    /// Re-checks the numeric invariants of a record built in code.
    ///
    /// Records deserialized or constructed directly bypass
    /// [`EmployeeRecord::from_fields`]; the engine calls this before use.
    pub fn validate(&self) -> EngineResult<()> {
        Money::non_negative(FIELD_RATE, self.hourly_rate.amount())?;
        for (field, hours) in [
            (FIELD_HOURS_WORKED, self.hours_worked),
            (FIELD_HOURS_SCHEDULED, self.hours_scheduled),
        ] {
            if hours.is_sign_negative() && !hours.is_zero() {
                return Err(EngineError::InvalidAmount {
                    field: field.to_string(),
                    value: hours.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn complete_fields() -> EmployeeFields {
        EmployeeFields::new()
            .with("name", "John Doe")
            .with("department", "Warehouse")
            .with("rate", "25.00")
            .with("hours_worked", "42.5")
            .with("hours_scheduled", "40")
    }

    #[test]
    fn test_from_fields_builds_record() {
        let record = EmployeeRecord::from_fields("1234567A", &complete_fields()).unwrap();

        assert_eq!(record.id, "1234567A");
        assert_eq!(record.name, "John Doe");
        assert_eq!(record.department.as_deref(), Some("Warehouse"));
        assert_eq!(record.hourly_rate.amount(), dec("25.00"));
        assert_eq!(record.hours_worked, dec("42.5"));
        assert_eq!(record.hours_scheduled, dec("40"));
    }

    #[test]
    fn test_department_is_optional() {
        let fields: EmployeeFields = [
            ("name", "Siobhan O'Neill"),
            ("rate", "30.00"),
            ("hours_worked", "35"),
            ("hours_scheduled", "35"),
        ]
        .into_iter()
        .collect();

        let record = EmployeeRecord::from_fields("8765432B", &fields).unwrap();
        assert_eq!(record.department, None);
    }

    #[test]
    fn test_missing_rate_is_missing_field() {
        let mut fields = complete_fields();
        fields.0.remove("rate");

        match EmployeeRecord::from_fields("1234567A", &fields) {
            Err(EngineError::MissingField { field }) => assert_eq!(field, "rate"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_name_is_missing_field() {
        let fields = complete_fields().with("name", "   ");
        let result = EmployeeRecord::from_fields("1234567A", &fields);
        assert!(matches!(result, Err(EngineError::MissingField { .. })));
    }

    #[test]
    fn test_blank_id_is_missing_field() {
        let result = EmployeeRecord::from_fields("", &complete_fields());
        match result {
            Err(EngineError::MissingField { field }) => assert_eq!(field, "id"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_hours_is_invalid_amount() {
        let fields = complete_fields().with("hours_worked", "forty");
        match EmployeeRecord::from_fields("1234567A", &fields) {
            Err(EngineError::InvalidAmount { field, value, .. }) => {
                assert_eq!(field, "hours_worked");
                assert_eq!(value, "forty");
            }
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rate_is_invalid_amount() {
        let fields = complete_fields().with("rate", "-12");
        let result = EmployeeRecord::from_fields("1234567A", &fields);
        assert!(matches!(result, Err(EngineError::InvalidAmount { .. })));
    }

    #[test]
    fn test_negative_scheduled_hours_is_invalid_amount() {
        let fields = complete_fields().with("hours_scheduled", "-1");
        let result = EmployeeRecord::from_fields("1234567A", &fields);
        assert!(matches!(result, Err(EngineError::InvalidAmount { .. })));
    }

    #[test]
    fn test_validate_rejects_negative_hours_built_in_code() {
        let mut record = EmployeeRecord::from_fields("1234567A", &complete_fields()).unwrap();
        record.hours_worked = dec("-3");
        assert!(matches!(
            record.validate(),
            Err(EngineError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_deserialize_employee_record() {
        let json = r#"{
            "id": "1234567A",
            "name": "John Doe",
            "hourly_rate": "25.00",
            "hours_worked": "40",
            "hours_scheduled": "40"
        }"#;

        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1234567A");
        assert_eq!(record.department, None);
        assert_eq!(record.hourly_rate.amount(), dec("25.00"));
    }

    #[test]
    fn test_later_insert_replaces_value() {
        let fields = complete_fields().with("rate", "26.00");
        assert_eq!(fields.get("rate"), Some("26.00"));
    }
}
