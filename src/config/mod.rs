//! Configuration loading and management for the Payslip Engine.
//!
//! This module provides functionality to load payslip configurations from
//! YAML files: the issuing organization, the salary structure with its
//! statutory deductions, and document output settings.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Issuer: {}", config.config().organization.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DocumentConfig, OrganizationConfig, PayrollConfig, SalaryStructure, StatutoryDeductions,
};
