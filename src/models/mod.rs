//! Core data models for the Payslip Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compensation;
mod payroll_result;

pub use compensation::{
    CompensationInput, DEFAULT_DAYS_PAYABLE, FormField, coerce_amount, coerce_days,
    parse_join_date,
};
pub use payroll_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult, PayrollResult};
