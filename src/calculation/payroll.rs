//! Payslip calculation pipeline.
//!
//! Runs every rule in order against one [`CompensationInput`] and assembles
//! the [`PayrollResult`] with its audit trace.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, CalculationResult, CompensationInput, PayrollResult};

use super::deductions::calculate_gross_deductions;
use super::lop_deduction::calculate_lop_deduction;
use super::optional_components::resolve_optional_components;
use super::salary_split::calculate_salary_split;

/// The version reported in every [`CalculationResult`].
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Calculates the monthly payslip figures for a compensation input.
///
/// The calculation is pure apart from the generated id and timestamp:
/// the same input and configuration always yield the same [`PayrollResult`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `days_payable` is zero, or when
/// an amount is so large that a total leaves the decimal range.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_payroll;
/// use payslip_engine::config::PayrollConfig;
/// use payslip_engine::models::{CompensationInput, FormField};
/// use rust_decimal::Decimal;
///
/// let input = CompensationInput::default().with_field(FormField::AnnualCtc, "600000");
/// let result = calculate_payroll(&input, &PayrollConfig::default()).unwrap();
///
/// assert_eq!(result.payroll.gross_earnings, Decimal::new(50000, 0));
/// assert_eq!(result.payroll.gross_deductions, Decimal::new(3800, 0));
/// assert_eq!(result.payroll.net_salary, Decimal::new(46200, 0));
/// ```
pub fn calculate_payroll(
    input: &CompensationInput,
    config: &PayrollConfig,
) -> EngineResult<CalculationResult> {
    let start_time = Instant::now();
    let structure = &config.structure;
    let mut steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let split = calculate_salary_split(input.annual_ctc, structure, step_number);
    steps.push(split.audit_step);
    warnings.extend(split.warnings);
    step_number += 1;

    let components = resolve_optional_components(input.bonus, input.variable_pay, step_number);
    steps.push(components.audit_step);
    warnings.extend(components.warnings);
    step_number += 1;

    // basic + HRA + special never exceeds the monthly CTC; only the bonus can overflow.
    let gross_earnings = (split.basic + split.hra + split.special_allowance)
        .checked_add(components.bonus)
        .ok_or_else(|| EngineError::amount_too_large("bonus"))?;

    let lop = calculate_lop_deduction(
        gross_earnings,
        input.days_payable,
        input.lop_days,
        step_number,
    )?;
    steps.push(lop.audit_step);
    warnings.extend(lop.warnings);
    step_number += 1;

    let deductions = calculate_gross_deductions(
        &structure.statutory,
        lop.lop_deduction,
        components.variable_pay,
        step_number,
    )?;
    steps.push(deductions.audit_step);

    let net_salary = gross_earnings
        .checked_sub(deductions.gross_deductions)
        .ok_or_else(|| EngineError::amount_too_large("gross_deductions"))?;

    for warning in &warnings {
        debug!(code = %warning.code, message = %warning.message, "Calculation warning");
    }

    let payroll = PayrollResult {
        monthly_ctc: split.monthly_ctc,
        basic: split.basic,
        hra: split.hra,
        special_allowance: split.special_allowance,
        bonus: components.bonus,
        variable_pay: components.variable_pay,
        gross_earnings,
        per_day_salary: lop.per_day_salary,
        pf_employee: structure.statutory.pf_employee,
        pf_employer: structure.statutory.pf_employer,
        professional_tax: structure.statutory.professional_tax,
        lop_deduction: lop.lop_deduction,
        gross_deductions: deductions.gross_deductions,
        net_salary,
    };

    let duration_us = start_time.elapsed().as_micros() as u64;
    info!(
        associate_id = %input.associate_id,
        gross_earnings = %payroll.gross_earnings.round_dp(2),
        net_salary = %payroll.net_salary.round_dp(2),
        warnings = warnings.len(),
        duration_us,
        "Payroll calculated"
    );

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        payroll,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}
