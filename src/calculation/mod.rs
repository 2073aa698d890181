//! Calculation logic for the Payslip Engine.
//!
//! This module contains the payroll rules: splitting the annual CTC into
//! monthly earnings, resolving the optional bonus and variable pay, the loss
//! of pay deduction, the gross deductions total, and the pipeline that runs
//! them in order.

mod deductions;
mod lop_deduction;
mod optional_components;
mod payroll;
mod salary_split;

pub use deductions::{GrossDeductionsResult, calculate_gross_deductions};
pub use lop_deduction::{LOP_EXCEEDS_DAYS_WARNING, LopDeductionResult, calculate_lop_deduction};
pub use optional_components::{
    NEGATIVE_COMPONENT_WARNING, OptionalComponentsResult, resolve_optional_components,
};
pub use payroll::{ENGINE_VERSION, calculate_payroll};
pub use salary_split::{NEGATIVE_CTC_WARNING, SalarySplitResult, calculate_salary_split};
