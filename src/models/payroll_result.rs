//! Payroll result models for the Payslip Engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures that capture all outputs from a payslip calculation: the derived
//! earnings and deductions, and an audit trace of how they were reached.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The monthly figures derived from a [`CompensationInput`].
///
/// Every value is recomputed from the input on each render; nothing here is
/// stored or updated in place.
///
/// [`CompensationInput`]: super::CompensationInput
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Annual CTC spread over the year.
    pub monthly_ctc: Decimal,
    /// Basic pay.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Remainder of the monthly CTC after basic and HRA.
    pub special_allowance: Decimal,
    /// Bonus paid this month (zero when disabled).
    pub bonus: Decimal,
    /// Variable pay withheld this month (zero when disabled).
    pub variable_pay: Decimal,
    /// Sum of all earning lines.
    pub gross_earnings: Decimal,
    /// Gross earnings divided by days payable.
    pub per_day_salary: Decimal,
    /// Employee provident fund contribution.
    pub pf_employee: Decimal,
    /// Employer provident fund contribution.
    pub pf_employer: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Deduction for loss of pay days.
    pub lop_deduction: Decimal,
    /// Sum of all deduction lines.
    pub gross_deductions: Decimal,
    /// Gross earnings less gross deductions.
    pub net_salary: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag input that was accepted but looks wrong, such as a negative
/// CTC that had to be treated as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use payslip_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(!trace.has_warning("NEGATIVE_CTC_COERCED"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete result of a payslip calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced this result.
    pub engine_version: String,
    /// The derived payroll figures.
    pub payroll: PayrollResult,
    /// The audit trace for this calculation.
    pub audit_trace: AuditTrace,
}
