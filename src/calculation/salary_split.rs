//! Monthly salary split.
//!
//! This module spreads the annual CTC over the year and divides the monthly
//! figure into basic pay, HRA and special allowance.

use rust_decimal::Decimal;

use crate::config::SalaryStructure;
use crate::models::{AuditStep, AuditWarning};

/// Warning code recorded when a negative CTC is treated as zero.
pub const NEGATIVE_CTC_WARNING: &str = "NEGATIVE_CTC_COERCED";

/// The result of splitting the annual CTC into monthly components.
#[derive(Debug, Clone)]
pub struct SalarySplitResult {
    /// Annual CTC divided by the months in a year.
    pub monthly_ctc: Decimal,
    /// Basic pay.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Monthly CTC left after basic and HRA.
    pub special_allowance: Decimal,
    /// Warnings raised while splitting.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

/// Splits an annual CTC into its monthly earning components.
///
/// With the default structure:
/// - monthly CTC = annual CTC ÷ 12
/// - basic = 50% of monthly CTC
/// - HRA = 40% of basic
/// - special allowance = monthly CTC − (basic + HRA)
///
/// Because the special allowance is the remainder, the three components
/// always add back up to the monthly CTC. A negative CTC is treated as zero
/// and flagged with [`NEGATIVE_CTC_WARNING`].
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_salary_split;
/// use payslip_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::default();
/// let split = calculate_salary_split(Decimal::new(600000, 0), &config.structure, 1);
///
/// assert_eq!(split.monthly_ctc, Decimal::new(50000, 0));
/// assert_eq!(split.basic, Decimal::new(25000, 0));
/// assert_eq!(split.hra, Decimal::new(10000, 0));
/// assert_eq!(split.special_allowance, Decimal::new(15000, 0));
/// ```
pub fn calculate_salary_split(
    annual_ctc: Decimal,
    structure: &SalaryStructure,
    step_number: u32,
) -> SalarySplitResult {
    let mut warnings = Vec::new();

    let effective_ctc = if annual_ctc < Decimal::ZERO {
        warnings.push(AuditWarning::new(
            NEGATIVE_CTC_WARNING,
            format!("Annual CTC {} is negative and was treated as 0", annual_ctc),
            "high",
        ));
        Decimal::ZERO
    } else {
        annual_ctc
    };

    let monthly_ctc = effective_ctc / Decimal::from(structure.months_per_year);
    let basic = monthly_ctc * structure.basic_ratio;
    let hra = basic * structure.hra_ratio_of_basic;
    let special_allowance = monthly_ctc - (basic + hra);

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_split".to_string(),
        rule_name: "Monthly Salary Split".to_string(),
        input: serde_json::json!({
            "annual_ctc": annual_ctc.to_string(),
            "months_per_year": structure.months_per_year,
            "basic_ratio": structure.basic_ratio.to_string(),
            "hra_ratio_of_basic": structure.hra_ratio_of_basic.to_string()
        }),
        output: serde_json::json!({
            "monthly_ctc": monthly_ctc.to_string(),
            "basic": basic.to_string(),
            "hra": hra.to_string(),
            "special_allowance": special_allowance.to_string()
        }),
        reasoning: format!(
            "Monthly CTC {} = {} / {}; basic {} at {}; HRA {} at {} of basic; special allowance {} is the remainder",
            monthly_ctc,
            effective_ctc,
            structure.months_per_year,
            basic,
            structure.basic_ratio,
            hra,
            structure.hra_ratio_of_basic,
            special_allowance
        ),
    };

    SalarySplitResult {
        monthly_ctc,
        basic,
        hra,
        special_allowance,
        warnings,
        audit_step,
    }
}
