//! Bonus and variable pay resolution.
//!
//! Both components are optional on the payslip. A bonus adds to gross
//! earnings; variable pay is withheld and counts as a deduction.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning};

/// Warning code recorded when a negative optional amount is treated as zero.
pub const NEGATIVE_COMPONENT_WARNING: &str = "NEGATIVE_COMPONENT_COERCED";

/// The resolved monthly amounts for the optional pay components.
#[derive(Debug, Clone)]
pub struct OptionalComponentsResult {
    /// Bonus added to earnings (zero when disabled).
    pub bonus: Decimal,
    /// Variable pay added to deductions (zero when disabled).
    pub variable_pay: Decimal,
    /// Warnings raised while resolving.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording the resolution.
    pub audit_step: AuditStep,
}

/// Resolves the bonus and variable pay toggles into amounts.
///
/// `None` means the component is switched off and contributes zero. Negative
/// amounts are treated as zero and flagged.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::resolve_optional_components;
/// use rust_decimal::Decimal;
///
/// let result = resolve_optional_components(Some(Decimal::new(5000, 0)), None, 2);
/// assert_eq!(result.bonus, Decimal::new(5000, 0));
/// assert_eq!(result.variable_pay, Decimal::ZERO);
/// ```
pub fn resolve_optional_components(
    bonus: Option<Decimal>,
    variable_pay: Option<Decimal>,
    step_number: u32,
) -> OptionalComponentsResult {
    let mut warnings = Vec::new();
    let resolved_bonus = resolve_amount("bonus", bonus, &mut warnings);
    let resolved_variable_pay = resolve_amount("variable_pay", variable_pay, &mut warnings);

    let audit_step = AuditStep {
        step_number,
        rule_id: "optional_components".to_string(),
        rule_name: "Bonus and Variable Pay".to_string(),
        input: serde_json::json!({
            "bonus_enabled": bonus.is_some(),
            "bonus_amount": bonus.map(|b| b.to_string()),
            "variable_pay_enabled": variable_pay.is_some(),
            "variable_pay_amount": variable_pay.map(|v| v.to_string())
        }),
        output: serde_json::json!({
            "bonus": resolved_bonus.to_string(),
            "variable_pay": resolved_variable_pay.to_string()
        }),
        reasoning: format!(
            "Bonus {} is added to earnings; variable pay {} is withheld as a deduction",
            resolved_bonus, resolved_variable_pay
        ),
    };

    OptionalComponentsResult {
        bonus: resolved_bonus,
        variable_pay: resolved_variable_pay,
        warnings,
        audit_step,
    }
}

fn resolve_amount(
    name: &str,
    amount: Option<Decimal>,
    warnings: &mut Vec<AuditWarning>,
) -> Decimal {
    match amount {
        None => Decimal::ZERO,
        Some(value) if value < Decimal::ZERO => {
            warnings.push(AuditWarning::new(
                NEGATIVE_COMPONENT_WARNING,
                format!("{} amount {} is negative and was treated as 0", name, value),
                "medium",
            ));
            Decimal::ZERO
        }
        Some(value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_disabled_components_are_zero() {
        let result = resolve_optional_components(None, None, 1);
        assert_eq!(result.bonus, Decimal::ZERO);
        assert_eq!(result.variable_pay, Decimal::ZERO);
        assert!(result.warnings.is_empty());
        assert_eq!(result.audit_step.input["bonus_enabled"], false);
    }

    #[test]
    fn test_enabled_components_pass_through() {
        let result = resolve_optional_components(Some(dec("5000")), Some(dec("3000")), 1);
        assert_eq!(result.bonus, dec("5000"));
        assert_eq!(result.variable_pay, dec("3000"));
        assert_eq!(result.audit_step.input["variable_pay_enabled"], true);
    }

    #[test]
    fn test_enabled_with_zero_amount() {
        let result = resolve_optional_components(Some(Decimal::ZERO), None, 1);
        assert_eq!(result.bonus, Decimal::ZERO);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_negative_amount_is_treated_as_zero() {
        let result = resolve_optional_components(Some(dec("-10")), Some(dec("-5")), 1);
        assert_eq!(result.bonus, Decimal::ZERO);
        assert_eq!(result.variable_pay, Decimal::ZERO);
        assert_eq!(result.warnings.len(), 2);
        assert!(
            result
                .warnings
                .iter()
                .all(|w| w.code == NEGATIVE_COMPONENT_WARNING)
        );
    }
}
