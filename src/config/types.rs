//! Configuration types for payslip generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::DEFAULT_DAYS_PAYABLE;

/// The organization issuing the payslip.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrganizationConfig {
    /// Organization name printed in the footer.
    pub name: String,
    /// Closing note printed under the footer.
    pub notice: String,
}

/// Fixed statutory deductions taken every month.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatutoryDeductions {
    /// Employee provident fund contribution.
    pub pf_employee: Decimal,
    /// Employer provident fund contribution.
    pub pf_employer: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
}

/// How the monthly CTC is split into earning components.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SalaryStructure {
    /// Number of months the annual CTC is spread over.
    pub months_per_year: u32,
    /// Basic pay as a fraction of the monthly CTC.
    pub basic_ratio: Decimal,
    /// HRA as a fraction of basic pay.
    pub hra_ratio_of_basic: Decimal,
    /// Days payable on a fresh form.
    pub default_days_payable: u32,
    /// Fixed monthly deductions.
    pub statutory: StatutoryDeductions,
}

/// Output document settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentConfig {
    /// File name the exported payslip is delivered under.
    pub file_name: String,
    /// Currency symbol used in amount headers and the net-pay line.
    pub currency_symbol: String,
    /// Extra font files handed to the exporter.
    #[serde(default)]
    pub font_paths: Vec<String>,
}

/// The complete payslip configuration.
///
/// [`PayrollConfig::default`] matches the files shipped in `config/payroll`.
///
/// # Example
///
/// ```
/// use payslip_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::default();
/// assert_eq!(config.structure.statutory.professional_tax, Decimal::new(200, 0));
/// assert_eq!(config.document.file_name, "Payslip.pdf");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollConfig {
    /// Issuing organization.
    pub organization: OrganizationConfig,
    /// Salary split and statutory deductions.
    pub structure: SalaryStructure,
    /// Document output settings.
    pub document: DocumentConfig,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            organization: OrganizationConfig {
                name: "UXINTERFACELY IT Solution".to_string(),
                notice: "This is a computer-generated payslip.".to_string(),
            },
            structure: SalaryStructure {
                months_per_year: 12,
                basic_ratio: Decimal::new(5, 1),
                hra_ratio_of_basic: Decimal::new(4, 1),
                default_days_payable: DEFAULT_DAYS_PAYABLE,
                statutory: StatutoryDeductions {
                    pf_employee: Decimal::new(1800, 0),
                    pf_employer: Decimal::new(1800, 0),
                    professional_tax: Decimal::new(200, 0),
                },
            },
            document: DocumentConfig {
                file_name: "Payslip.pdf".to_string(),
                currency_symbol: "₹".to_string(),
                font_paths: vec![],
            },
        }
    }
}
