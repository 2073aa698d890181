//! Fixed-layout payslip document.
//!
//! [`render_payslip`] turns an input and its calculated figures into a
//! [`PayslipDocument`]: every cell already formatted, every optional row
//! already decided. Exporters only lay the surface out on a page.

use serde::Serialize;

use crate::config::PayrollConfig;
use crate::models::{CompensationInput, FormField, PayrollResult};

use super::format::{format_date, format_inr};

/// A label and its value in the identity block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledValue {
    /// Field label, e.g. "Associate ID".
    pub label: String,
    /// Field value as printed.
    pub value: String,
}

impl LabeledValue {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// One row of the identity block. The right half may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityRow {
    /// Left-hand field.
    pub left: LabeledValue,
    /// Right-hand field, if any.
    pub right: Option<LabeledValue>,
}

/// A single earning or deduction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Line label, e.g. "HRA".
    pub label: String,
    /// Formatted amount.
    pub amount: String,
}

impl LineItem {
    fn new(label: &str, amount: rust_decimal::Decimal) -> Self {
        Self {
            label: label.to_string(),
            amount: format_inr(amount),
        }
    }
}

/// One row of the earnings/deductions table.
///
/// A side is `None` when that cell pair is printed blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryRow {
    /// Earning column.
    pub earning: Option<LineItem>,
    /// Deduction column.
    pub deduction: Option<LineItem>,
}

/// Footer lines under the net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Issuing organization.
    pub organization: String,
    /// Organization address.
    pub address: String,
    /// Tax registration line ("GSTIN: ...").
    pub tax_registration: String,
    /// Closing notice.
    pub notice: String,
}

/// The rendered payslip surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayslipDocument {
    /// Title printed at the top of the page.
    pub heading: String,
    /// Employee identity rows.
    pub identity: Vec<IdentityRow>,
    /// Table headers: earnings label, amount, deductions label, amount.
    pub salary_header: [String; 4],
    /// Table body rows, without the totals.
    pub salary_rows: Vec<SalaryRow>,
    /// Totals row.
    pub totals: SalaryRow,
    /// Net pay line.
    pub net_pay: String,
    /// Footer block.
    pub footer: Footer,
}

/// Renders a payslip from the current input and its calculated figures.
///
/// Optional content follows the toggles on the input:
/// - the UAN row only appears when a UAN is set;
/// - the bonus / variable pay row appears when either is set, with the side
///   of a disabled component left blank.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_payroll;
/// use payslip_engine::config::PayrollConfig;
/// use payslip_engine::models::{CompensationInput, FormField};
/// use payslip_engine::render::render_payslip;
///
/// let config = PayrollConfig::default();
/// let input = CompensationInput::default().with_field(FormField::AnnualCtc, "600000");
/// let result = calculate_payroll(&input, &config).unwrap();
///
/// let document = render_payslip(&input, &result.payroll, &config);
/// assert_eq!(document.net_pay, "Net Salary / Month : ₹46,200.00");
/// assert_eq!(document.salary_rows.len(), 3);
/// ```
pub fn render_payslip(
    input: &CompensationInput,
    payroll: &PayrollResult,
    config: &PayrollConfig,
) -> PayslipDocument {
    let currency = &config.document.currency_symbol;

    let field = |f: FormField, value: &str| LabeledValue::new(f.label(), value);

    let mut identity = vec![
        IdentityRow {
            left: field(FormField::PayslipFor, &input.payslip_for),
            right: Some(field(FormField::Name, &input.name)),
        },
        IdentityRow {
            left: field(FormField::AssociateId, &input.associate_id),
            right: Some(field(FormField::Designation, &input.designation)),
        },
        IdentityRow {
            left: field(FormField::Location, &input.location),
            right: Some(field(FormField::Department, &input.department)),
        },
        IdentityRow {
            left: field(FormField::JoinDate, &format_date(input.join_date)),
            right: Some(field(
                FormField::DaysPayable,
                &input.days_payable.to_string(),
            )),
        },
    ];
    if let Some(uan) = &input.uan {
        identity.push(IdentityRow {
            left: LabeledValue::new("UAN", uan.as_str()),
            right: None,
        });
    }

    let mut salary_rows = vec![
        SalaryRow {
            earning: Some(LineItem::new("Basic", payroll.basic)),
            deduction: Some(LineItem::new("PF Employee", payroll.pf_employee)),
        },
        SalaryRow {
            earning: Some(LineItem::new("HRA", payroll.hra)),
            deduction: Some(LineItem::new("Professional Tax", payroll.professional_tax)),
        },
        SalaryRow {
            earning: Some(LineItem::new("Special Allowance", payroll.special_allowance)),
            deduction: Some(LineItem::new("LOP Deduction", payroll.lop_deduction)),
        },
    ];
    if input.bonus.is_some() || input.variable_pay.is_some() {
        salary_rows.push(SalaryRow {
            earning: input
                .bonus
                .map(|_| LineItem::new("Bonus", payroll.bonus)),
            deduction: input
                .variable_pay
                .map(|_| LineItem::new("Variable Pay", payroll.variable_pay)),
        });
    }

    let amount_header = format!("AMOUNT ({})", currency);

    PayslipDocument {
        heading: config.organization.name.clone(),
        identity,
        salary_header: [
            "EARNINGS".to_string(),
            amount_header.clone(),
            "DEDUCTIONS".to_string(),
            amount_header,
        ],
        salary_rows,
        totals: SalaryRow {
            earning: Some(LineItem::new("Total", payroll.gross_earnings)),
            deduction: Some(LineItem::new("Total", payroll.gross_deductions)),
        },
        net_pay: format!(
            "Net Salary / Month : {}{}",
            currency,
            format_inr(payroll.net_salary)
        ),
        footer: Footer {
            organization: config.organization.name.clone(),
            address: input.address.clone(),
            tax_registration: format!("GSTIN: {}", input.gst),
            notice: config.organization.notice.clone(),
        },
    }
}
