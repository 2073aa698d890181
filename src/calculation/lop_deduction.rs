//! Loss of pay (LOP) deduction.
//!
//! Unpaid leave is deducted pro rata: gross earnings are divided by the days
//! payable to get a per-day salary, which is multiplied by the LOP days.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning};

/// Warning code recorded when LOP days exceed the days payable.
pub const LOP_EXCEEDS_DAYS_WARNING: &str = "LOP_EXCEEDS_DAYS_PAYABLE";

/// The result of an LOP deduction calculation.
#[derive(Debug, Clone)]
pub struct LopDeductionResult {
    /// Gross earnings divided by days payable.
    pub per_day_salary: Decimal,
    /// Amount deducted for the LOP days.
    pub lop_deduction: Decimal,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the deduction for unpaid leave days.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for `days_payable` when it is zero,
/// since no per-day salary exists.
///
/// LOP days greater than the days payable are not clamped; the deduction is
/// calculated as given and [`LOP_EXCEEDS_DAYS_WARNING`] is recorded.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_lop_deduction;
/// use rust_decimal::Decimal;
///
/// let result = calculate_lop_deduction(Decimal::new(30000, 0), 30, 3, 4).unwrap();
/// assert_eq!(result.per_day_salary, Decimal::new(1000, 0));
/// assert_eq!(result.lop_deduction, Decimal::new(3000, 0));
/// ```
pub fn calculate_lop_deduction(
    gross_earnings: Decimal,
    days_payable: u32,
    lop_days: u32,
    step_number: u32,
) -> EngineResult<LopDeductionResult> {
    if days_payable == 0 {
        return Err(EngineError::invalid_input(
            "days_payable",
            "must be greater than zero",
        ));
    }

    let mut warnings = Vec::new();
    if lop_days > days_payable {
        warnings.push(AuditWarning::new(
            LOP_EXCEEDS_DAYS_WARNING,
            format!(
                "LOP days ({}) exceed days payable ({})",
                lop_days, days_payable
            ),
            "medium",
        ));
    }

    // days_payable >= 1, so the division cannot grow the amount.
    let per_day_salary = gross_earnings / Decimal::from(days_payable);
    let lop_deduction = per_day_salary
        .checked_mul(Decimal::from(lop_days))
        .ok_or_else(|| EngineError::amount_too_large("lop_days"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "lop_deduction".to_string(),
        rule_name: "Loss of Pay Deduction".to_string(),
        input: serde_json::json!({
            "gross_earnings": gross_earnings.to_string(),
            "days_payable": days_payable,
            "lop_days": lop_days
        }),
        output: serde_json::json!({
            "per_day_salary": per_day_salary.to_string(),
            "lop_deduction": lop_deduction.to_string()
        }),
        reasoning: format!(
            "{} LOP day(s) x per-day salary {} ({} / {} days)",
            lop_days,
            per_day_salary.round_dp(2),
            gross_earnings,
            days_payable
        ),
    };

    Ok(LopDeductionResult {
        per_day_salary,
        lop_deduction,
        warnings,
        audit_step,
    })
}
