//! Request types for the Payslip Engine API.
//!
//! This module defines the JSON body shared by the `/payslip/calculate` and
//! `/payslip/export` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CompensationInput, FormField, coerce_amount};

/// A form value sent either as a JSON number or as text.
///
/// Text that is not a number is coerced to zero when the request is
/// converted, the same way a form field would be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// A JSON number such as `600000` or `1250.5`.
    Number(serde_json::Number),
    /// A JSON string such as `"600000"`.
    Text(String),
}

impl RawField {
    /// The value as form text.
    pub fn as_text(&self) -> String {
        match self {
            RawField::Number(number) => number.to_string(),
            RawField::Text(text) => text.clone(),
        }
    }

    /// The value coerced to an amount.
    pub fn to_amount(&self) -> Decimal {
        coerce_amount(&self.as_text())
    }
}

impl From<&str> for RawField {
    fn from(text: &str) -> Self {
        RawField::Text(text.to_string())
    }
}

impl From<u64> for RawField {
    fn from(value: u64) -> Self {
        RawField::Number(value.into())
    }
}

/// Request body for the payslip endpoints.
///
/// Every field is optional. Absent text fields are blank, absent numbers are
/// zero, and `days_payable` falls back to the configured default. The three
/// toggled components are switched off when absent or `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayslipRequest {
    /// Employee name.
    pub name: String,
    /// The period the payslip covers.
    pub payslip_for: String,
    /// Role or title.
    pub designation: String,
    /// Employee identifier.
    pub associate_id: String,
    /// Join date as `YYYY-MM-DD`.
    pub join_date: String,
    /// Work location.
    pub location: String,
    /// Department.
    pub department: String,
    /// Employer address for the footer.
    pub address: String,
    /// Tax registration for the footer.
    pub gst: String,
    /// Annual cost to company.
    pub annual_ctc: Option<RawField>,
    /// Days payable in the month.
    pub days_payable: Option<RawField>,
    /// Loss-of-pay days.
    pub lop_days: Option<RawField>,
    /// Variable pay amount; absent means switched off.
    pub variable_pay: Option<RawField>,
    /// Bonus amount; absent means switched off.
    pub bonus: Option<RawField>,
    /// UAN; absent means switched off.
    pub uan: Option<String>,
}

impl PayslipRequest {
    /// Converts the request into a compensation input.
    ///
    /// `default_days_payable` is used when the request omits `days_payable`.
    pub fn into_input(self, default_days_payable: u32) -> CompensationInput {
        let base = CompensationInput {
            days_payable: default_days_payable,
            ..CompensationInput::default()
        };

        let text_fields = [
            (FormField::Name, Some(self.name)),
            (FormField::PayslipFor, Some(self.payslip_for)),
            (FormField::Designation, Some(self.designation)),
            (FormField::AssociateId, Some(self.associate_id)),
            (FormField::JoinDate, Some(self.join_date)),
            (FormField::Location, Some(self.location)),
            (FormField::Department, Some(self.department)),
            (FormField::Address, Some(self.address)),
            (FormField::Gst, Some(self.gst)),
            (FormField::AnnualCtc, self.annual_ctc.map(|v| v.as_text())),
            (FormField::DaysPayable, self.days_payable.map(|v| v.as_text())),
            (FormField::LopDays, self.lop_days.map(|v| v.as_text())),
        ];

        text_fields
            .into_iter()
            .fold(base, |input, (field, raw)| match raw {
                Some(raw) => input.with_field(field, &raw),
                None => input,
            })
            .with_variable_pay(self.variable_pay.map(|v| v.to_amount()))
            .with_bonus(self.bonus.map(|v| v.to_amount()))
            .with_uan(self.uan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_deserialize_payslip_request() {
        let json = r#"{
            "name": "Asha Rao",
            "payslip_for": "January 2026",
            "associate_id": "UX-042",
            "join_date": "2023-04-01",
            "annual_ctc": 600000,
            "lop_days": "5",
            "bonus": 5000,
            "uan": "100200300400"
        }"#;

        let request: PayslipRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Asha Rao");
        assert_eq!(request.annual_ctc, Some(RawField::from(600000u64)));
        assert_eq!(request.lop_days, Some(RawField::from("5")));
        assert!(request.variable_pay.is_none());
    }

    #[test]
    fn test_into_input_coerces_numbers_and_strings() {
        let json = r#"{
            "annual_ctc": "600000",
            "days_payable": 31,
            "lop_days": "2",
            "join_date": "2023-04-01",
            "variable_pay": "3000.50"
        }"#;
        let request: PayslipRequest = serde_json::from_str(json).unwrap();
        let input = request.into_input(30);

        assert_eq!(input.annual_ctc, Decimal::new(600000, 0));
        assert_eq!(input.days_payable, 31);
        assert_eq!(input.lop_days, 2);
        assert_eq!(input.join_date, NaiveDate::from_ymd_opt(2023, 4, 1));
        assert_eq!(input.variable_pay, Some(Decimal::new(300050, 2)));
        assert_eq!(input.bonus, None);
    }

    #[test]
    fn test_into_input_uses_default_days_when_absent() {
        let input = PayslipRequest::default().into_input(26);
        assert_eq!(input.days_payable, 26);
        assert_eq!(input.annual_ctc, Decimal::ZERO);
    }

    #[test]
    fn test_non_numeric_text_becomes_zero() {
        let json = r#"{ "annual_ctc": "six lakh", "bonus": "lots" }"#;
        let request: PayslipRequest = serde_json::from_str(json).unwrap();
        let input = request.into_input(30);

        assert_eq!(input.annual_ctc, Decimal::ZERO);
        assert_eq!(input.bonus, Some(Decimal::ZERO));
    }

    #[test]
    fn test_null_toggle_is_off() {
        let json = r#"{ "variable_pay": null, "uan": null }"#;
        let request: PayslipRequest = serde_json::from_str(json).unwrap();
        let input = request.into_input(30);

        assert_eq!(input.variable_pay, None);
        assert_eq!(input.uan, None);
    }
}
