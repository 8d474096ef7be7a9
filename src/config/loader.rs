//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a payroll
//! policy from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{IncomeTaxPolicy, PayrollPolicy, PolicyFile, PolicyMetadata, SurtaxPolicy};

/// Loads and provides access to a payroll policy.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates the band tables once, and hands out the resulting
/// [`PayrollPolicy`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/ie_2024/
/// ├── policy.yaml      # Metadata, pay periods per year, overtime multiplier
/// ├── income_tax.yaml  # Income tax bands, top rate and credit
/// └── surtax.yaml      # Surtax tiers and top rate
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ie_2024").unwrap();
/// println!("Loaded policy: {}", loader.metadata().name);
/// println!("Periods per year: {}", loader.policy().pay_periods_per_year());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    metadata: PolicyMetadata,
    policy: PayrollPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/ie_2024")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or a negative amount (`ConfigParseError`)
    /// - A band table is out of order or has a negative rate (`InvalidBandTable`)
    /// - Pay periods per year is zero (`InvalidPolicy`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_file = Self::load_yaml::<PolicyFile>(&path.join("policy.yaml"))?;
        let income_tax = Self::load_yaml::<IncomeTaxPolicy>(&path.join("income_tax.yaml"))?;
        let surtax = Self::load_yaml::<SurtaxPolicy>(&path.join("surtax.yaml"))?;

        let policy = PayrollPolicy::new(
            policy_file.pay_periods_per_year,
            policy_file.overtime_multiplier,
            income_tax,
            surtax,
        )?;

        info!(
            code = %policy_file.metadata.code,
            tax_year = %policy_file.metadata.tax_year,
            income_tax_bands = policy.income_tax().table.bands.len(),
            surtax_tiers = policy.surtax().table.bands.len(),
            "Loaded payroll policy"
        );

        Ok(Self {
            metadata: policy_file.metadata,
            policy,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();
        debug!(path = %path_str, "Reading policy file");

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Returns the validated payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Consumes the loader, returning the payroll policy.
    pub fn into_policy(self) -> PayrollPolicy {
        self.policy
    }
}
