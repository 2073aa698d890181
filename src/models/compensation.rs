//! Compensation input model.
//!
//! This module defines the [`CompensationInput`] record that every payslip is
//! derived from, and the [`FormField`] keys used to update it one field at a
//! time.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;

/// Days payable assumed for a fresh form.
pub const DEFAULT_DAYS_PAYABLE: u32 = 30;

/// The compensation record a payslip is calculated from.
///
/// Optional pay components are modelled as `Option`s: `Some(amount)` means the
/// component is enabled on the payslip, `None` means it is switched off.
///
/// The record is never mutated in place. Each update returns a new value, so
/// the previous input stays available to whoever holds it.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{CompensationInput, FormField};
/// use rust_decimal::Decimal;
///
/// let input = CompensationInput::default()
///     .with_field(FormField::Name, "Asha Rao")
///     .with_field(FormField::AnnualCtc, "600000")
///     .with_bonus(Some(Decimal::new(5000, 0)));
///
/// assert_eq!(input.annual_ctc, Decimal::new(600000, 0));
/// assert_eq!(input.days_payable, 30);
/// assert!(input.bonus.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompensationInput {
    /// Employee name.
    pub name: String,
    /// The period the payslip covers (e.g. "January 2026").
    pub payslip_for: String,
    /// Role or title.
    pub designation: String,
    /// Employee identifier.
    pub associate_id: String,
    /// Date the employee joined.
    pub join_date: Option<NaiveDate>,
    /// Work location.
    pub location: String,
    /// Department.
    pub department: String,
    /// Organization address printed in the footer.
    pub address: String,
    /// Tax registration string (GSTIN) printed in the footer.
    pub gst: String,
    /// Annual cost to company.
    pub annual_ctc: Decimal,
    /// Number of payable days in the month.
    pub days_payable: u32,
    /// Number of unpaid leave (loss of pay) days.
    pub lop_days: u32,
    /// Variable pay withheld this month, when enabled.
    pub variable_pay: Option<Decimal>,
    /// Bonus paid this month, when enabled.
    pub bonus: Option<Decimal>,
    /// Universal account number, when enabled.
    pub uan: Option<String>,
}

impl Default for CompensationInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            payslip_for: String::new(),
            designation: String::new(),
            associate_id: String::new(),
            join_date: None,
            location: String::new(),
            department: String::new(),
            address: String::new(),
            gst: String::new(),
            annual_ctc: Decimal::ZERO,
            days_payable: DEFAULT_DAYS_PAYABLE,
            lop_days: 0,
            variable_pay: None,
            bonus: None,
            uan: None,
        }
    }
}

impl CompensationInput {
    /// Returns a copy of this input with one field replaced by a raw form value.
    ///
    /// Numeric fields are coerced with [`coerce_amount`] / [`coerce_days`], so
    /// text that is not a number becomes zero instead of failing.
    pub fn with_field(self, field: FormField, raw: &str) -> Self {
        let text = raw.to_string();
        match field {
            FormField::Name => Self { name: text, ..self },
            FormField::PayslipFor => Self {
                payslip_for: text,
                ..self
            },
            FormField::Designation => Self {
                designation: text,
                ..self
            },
            FormField::AssociateId => Self {
                associate_id: text,
                ..self
            },
            FormField::JoinDate => Self {
                join_date: parse_join_date(raw),
                ..self
            },
            FormField::Location => Self {
                location: text,
                ..self
            },
            FormField::Department => Self {
                department: text,
                ..self
            },
            FormField::Address => Self {
                address: text,
                ..self
            },
            FormField::Gst => Self { gst: text, ..self },
            FormField::AnnualCtc => Self {
                annual_ctc: coerce_amount(raw),
                ..self
            },
            FormField::DaysPayable => Self {
                days_payable: coerce_days(raw),
                ..self
            },
            FormField::LopDays => Self {
                lop_days: coerce_days(raw),
                ..self
            },
        }
    }

    /// Returns a copy with variable pay switched on (`Some`) or off (`None`).
    pub fn with_variable_pay(self, amount: Option<Decimal>) -> Self {
        Self {
            variable_pay: amount,
            ..self
        }
    }

    /// Returns a copy with the bonus switched on (`Some`) or off (`None`).
    pub fn with_bonus(self, amount: Option<Decimal>) -> Self {
        Self {
            bonus: amount,
            ..self
        }
    }

    /// Returns a copy with the UAN line switched on (`Some`) or off (`None`).
    pub fn with_uan(self, uan: Option<String>) -> Self {
        Self { uan, ..self }
    }
}

/// The text and number fields of the payslip form.
///
/// The three toggled components (variable pay, bonus, UAN) are not listed
/// here; they are set through the dedicated `with_*` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// Employee name.
    Name,
    /// Payslip period label.
    PayslipFor,
    /// Role or title.
    Designation,
    /// Annual cost to company.
    AnnualCtc,
    /// Employee identifier.
    AssociateId,
    /// Join date.
    JoinDate,
    /// Work location.
    Location,
    /// Department.
    Department,
    /// Payable days.
    DaysPayable,
    /// Loss of pay days.
    LopDays,
    /// Organization address.
    Address,
    /// Tax registration string.
    Gst,
}

impl FormField {
    /// Every form field in display order.
    pub const ALL: [FormField; 12] = [
        FormField::Name,
        FormField::PayslipFor,
        FormField::Designation,
        FormField::AnnualCtc,
        FormField::AssociateId,
        FormField::JoinDate,
        FormField::Location,
        FormField::Department,
        FormField::DaysPayable,
        FormField::LopDays,
        FormField::Address,
        FormField::Gst,
    ];

    /// The snake_case key used in requests and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::PayslipFor => "payslip_for",
            FormField::Designation => "designation",
            FormField::AnnualCtc => "annual_ctc",
            FormField::AssociateId => "associate_id",
            FormField::JoinDate => "join_date",
            FormField::Location => "location",
            FormField::Department => "department",
            FormField::DaysPayable => "days_payable",
            FormField::LopDays => "lop_days",
            FormField::Address => "address",
            FormField::Gst => "gst",
        }
    }

    /// The human-readable label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::PayslipFor => "Payslip For",
            FormField::Designation => "Designation",
            FormField::AnnualCtc => "Annual CTC",
            FormField::AssociateId => "Associate ID",
            FormField::JoinDate => "Join Date",
            FormField::Location => "Location",
            FormField::Department => "Department",
            FormField::DaysPayable => "Days Payable",
            FormField::LopDays => "LOP Days",
            FormField::Address => "Address",
            FormField::Gst => "GST",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| EngineError::invalid_input(s, "unknown form field"))
    }
}

/// Coerces raw form text into a monetary amount.
///
/// Blank or non-numeric text becomes zero. The sign is preserved; the
/// calculator decides what a negative amount means.
///
/// ```
/// use payslip_engine::models::coerce_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(coerce_amount(" 1250.50 "), Decimal::new(125050, 2));
/// assert_eq!(coerce_amount("twelve"), Decimal::ZERO);
/// ```
pub fn coerce_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        Ok(value) => value,
        Err(_) => {
            debug!(raw = %raw, "Non-numeric amount coerced to zero");
            Decimal::ZERO
        }
    }
}

/// Coerces raw form text into a whole number of days.
///
/// Fractions are truncated; blank, negative or non-numeric text becomes zero.
pub fn coerce_days(raw: &str) -> u32 {
    let value = coerce_amount(raw).trunc();
    if value.is_sign_negative() {
        debug!(raw = %raw, "Negative day count coerced to zero");
        return 0;
    }
    value.to_u32().unwrap_or_else(|| {
        debug!(raw = %raw, "Day count out of range coerced to zero");
        0
    })
}

/// Parses an ISO `YYYY-MM-DD` join date; anything else yields `None`.
pub fn parse_join_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_input_is_empty_with_thirty_days() {
        let input = CompensationInput::default();
        assert!(input.name.is_empty());
        assert_eq!(input.annual_ctc, Decimal::ZERO);
        assert_eq!(input.days_payable, 30);
        assert_eq!(input.lop_days, 0);
        assert!(input.variable_pay.is_none());
        assert!(input.bonus.is_none());
        assert!(input.uan.is_none());
    }

    #[test]
    fn test_with_field_replaces_only_that_field() {
        let before = CompensationInput::default().with_field(FormField::Name, "Asha");
        let after = before.clone().with_field(FormField::Department, "Design");

        assert_eq!(before.department, "");
        assert_eq!(after.department, "Design");
        assert_eq!(after.name, "Asha");
    }

    #[test]
    fn test_with_field_coerces_numbers() {
        let input = CompensationInput::default()
            .with_field(FormField::AnnualCtc, "600000")
            .with_field(FormField::DaysPayable, "31")
            .with_field(FormField::LopDays, "2");

        assert_eq!(input.annual_ctc, dec("600000"));
        assert_eq!(input.days_payable, 31);
        assert_eq!(input.lop_days, 2);
    }

    #[test]
    fn test_non_numeric_ctc_becomes_zero() {
        let input = CompensationInput::default().with_field(FormField::AnnualCtc, "6 lakh");
        assert_eq!(input.annual_ctc, Decimal::ZERO);
    }

    #[test]
    fn test_blank_days_payable_becomes_zero() {
        let input = CompensationInput::default().with_field(FormField::DaysPayable, "");
        assert_eq!(input.days_payable, 0);
    }

    #[test]
    fn test_coerce_days_truncates_and_clamps() {
        assert_eq!(coerce_days("4.9"), 4);
        assert_eq!(coerce_days("-3"), 0);
        assert_eq!(coerce_days("abc"), 0);
        assert_eq!(coerce_days("99999999999"), 0);
    }

    #[test]
    fn test_coerce_amount_accepts_scientific_notation() {
        assert_eq!(coerce_amount("6e5"), dec("600000"));
    }

    #[test]
    fn test_coerce_amount_keeps_sign() {
        assert_eq!(coerce_amount("-100"), dec("-100"));
    }

    #[test]
    fn test_join_date_parsing() {
        let input = CompensationInput::default().with_field(FormField::JoinDate, "2023-06-01");
        assert_eq!(input.join_date, NaiveDate::from_ymd_opt(2023, 6, 1));

        let input = input.with_field(FormField::JoinDate, "not a date");
        assert_eq!(input.join_date, None);
    }

    #[test]
    fn test_toggles_replace_optional_components() {
        let input = CompensationInput::default()
            .with_bonus(Some(dec("5000")))
            .with_variable_pay(Some(dec("3000")))
            .with_uan(Some("100200300400".to_string()));
        assert_eq!(input.bonus, Some(dec("5000")));
        assert_eq!(input.variable_pay, Some(dec("3000")));

        let input = input.with_bonus(None).with_uan(None);
        assert!(input.bonus.is_none());
        assert!(input.uan.is_none());
        assert_eq!(input.variable_pay, Some(dec("3000")));
    }

    #[test]
    fn test_form_field_round_trips_through_key() {
        for field in FormField::ALL {
            assert_eq!(field.key().parse::<FormField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_form_field_is_invalid_input() {
        match "salary".parse::<FormField>() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "salary"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_partial_input_uses_defaults() {
        let json = r#"{
            "name": "Asha Rao",
            "annual_ctc": "600000",
            "bonus": "5000"
        }"#;

        let input: CompensationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.name, "Asha Rao");
        assert_eq!(input.annual_ctc, dec("600000"));
        assert_eq!(input.days_payable, 30);
        assert_eq!(input.bonus, Some(dec("5000")));
        assert!(input.variable_pay.is_none());
    }
}
