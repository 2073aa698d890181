//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payslip
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{DocumentConfig, OrganizationConfig, PayrollConfig, SalaryStructure};

/// Loads and provides access to payslip configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/payroll/
/// ├── organization.yaml      # Issuer name and footer notice
/// ├── salary_structure.yaml  # CTC split and statutory deductions
/// └── document.yaml          # File name, currency, fonts
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll")?;
/// println!("Issuer: {}", loader.config().organization.name);
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or
    /// holds values the calculator cannot use (zero months, ratios outside
    /// `0..=1`, zero default days payable).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let organization =
            Self::load_yaml::<OrganizationConfig>(&path.join("organization.yaml"))?;

        let structure_path = path.join("salary_structure.yaml");
        let structure = Self::load_yaml::<SalaryStructure>(&structure_path)?;
        Self::validate_structure(&structure, &structure_path.display().to_string())?;

        let document = Self::load_yaml::<DocumentConfig>(&path.join("document.yaml"))?;

        tracing::debug!(path = %path.display(), "Loaded payslip configuration");

        Ok(Self {
            config: PayrollConfig {
                organization,
                structure,
                document,
            },
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_structure(structure: &SalaryStructure, path: &str) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::ConfigParseError {
            path: path.to_string(),
            message: message.to_string(),
        };

        if structure.months_per_year == 0 {
            return Err(invalid("months_per_year must be greater than zero"));
        }
        if structure.default_days_payable == 0 {
            return Err(invalid("default_days_payable must be greater than zero"));
        }
        for (name, ratio) in [
            ("basic_ratio", structure.basic_ratio),
            ("hra_ratio_of_basic", structure.hra_ratio_of_basic),
        ] {
            if ratio < Decimal::ZERO || ratio > Decimal::ONE {
                return Err(invalid(&format!("{} must be between 0 and 1", name)));
            }
        }
        Ok(())
    }

    /// Returns the underlying payslip configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }
}
