//! Gross deductions.
//!
//! Sums the fixed statutory deductions with the LOP deduction and any
//! withheld variable pay.

use rust_decimal::Decimal;

use crate::config::StatutoryDeductions;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of totalling the deduction lines.
#[derive(Debug, Clone)]
pub struct GrossDeductionsResult {
    /// Sum of all deductions.
    pub gross_deductions: Decimal,
    /// The audit step recording the total.
    pub audit_step: AuditStep,
}

/// Totals the deduction side of the payslip.
///
/// gross deductions = PF employee + PF employer + professional tax
/// + LOP deduction + variable pay
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming the line whose addition
/// leaves the decimal range.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_gross_deductions;
/// use payslip_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let statutory = PayrollConfig::default().structure.statutory;
/// let result = calculate_gross_deductions(&statutory, Decimal::ZERO, Decimal::ZERO, 4).unwrap();
/// assert_eq!(result.gross_deductions, Decimal::new(3800, 0));
/// ```
pub fn calculate_gross_deductions(
    statutory: &StatutoryDeductions,
    lop_deduction: Decimal,
    variable_pay: Decimal,
    step_number: u32,
) -> EngineResult<GrossDeductionsResult> {
    let lines = [
        ("pf_employee", statutory.pf_employee),
        ("pf_employer", statutory.pf_employer),
        ("professional_tax", statutory.professional_tax),
        ("lop_days", lop_deduction),
        ("variable_pay", variable_pay),
    ];
    let gross_deductions = lines
        .iter()
        .try_fold(Decimal::ZERO, |total, (field, amount)| {
            total
                .checked_add(*amount)
                .ok_or_else(|| EngineError::amount_too_large(*field))
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_deductions".to_string(),
        rule_name: "Gross Deductions".to_string(),
        input: serde_json::json!({
            "pf_employee": statutory.pf_employee.to_string(),
            "pf_employer": statutory.pf_employer.to_string(),
            "professional_tax": statutory.professional_tax.to_string(),
            "lop_deduction": lop_deduction.to_string(),
            "variable_pay": variable_pay.to_string()
        }),
        output: serde_json::json!({
            "gross_deductions": gross_deductions.to_string()
        }),
        reasoning: format!(
            "PF {} + {} and professional tax {} with LOP {} and variable pay {} total {}",
            statutory.pf_employee,
            statutory.pf_employer,
            statutory.professional_tax,
            lop_deduction.round_dp(2),
            variable_pay,
            gross_deductions.round_dp(2)
        ),
    };

    Ok(GrossDeductionsResult {
        gross_deductions,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollConfig;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn statutory() -> StatutoryDeductions {
        PayrollConfig::default().structure.statutory
    }

    #[test]
    fn test_statutory_only() {
        let result =
            calculate_gross_deductions(&statutory(), Decimal::ZERO, Decimal::ZERO, 1).unwrap();
        assert_eq!(result.gross_deductions, dec("3800"));
    }

    #[test]
    fn test_variable_pay_adds_exactly() {
        let base = calculate_gross_deductions(&statutory(), dec("100"), Decimal::ZERO, 1).unwrap();
        let with_vp =
            calculate_gross_deductions(&statutory(), dec("100"), dec("3000"), 1).unwrap();
        assert_eq!(with_vp.gross_deductions - base.gross_deductions, dec("3000"));
    }

    #[test]
    fn test_lop_is_included() {
        let result =
            calculate_gross_deductions(&statutory(), dec("8333.33"), Decimal::ZERO, 1).unwrap();
        assert_eq!(result.gross_deductions, dec("12133.33"));
        assert_eq!(result.audit_step.rule_id, "gross_deductions");
    }

    #[test]
    fn test_overflowing_variable_pay_is_invalid_input() {
        match calculate_gross_deductions(&statutory(), Decimal::ZERO, Decimal::MAX, 1) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "variable_pay");
                assert_eq!(message, "amount too large");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
