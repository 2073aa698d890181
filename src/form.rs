//! Payslip form session.
//!
//! [`PayslipForm`] holds the one compensation record being edited and tracks
//! where the user is in the Editing → Confirmed → Exported flow. The payslip
//! is always derived from the current input, so edits made after confirming
//! show up in the next render or export.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::calculation::calculate_payroll;
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::export::{ExportOptions, ExportedDocument, Exporter, spawn_export};
use crate::models::{CalculationResult, CompensationInput, FormField};
use crate::render::{PayslipDocument, render_payslip};
use rust_decimal::Decimal;

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    /// Fields are being filled in; no payslip is shown yet.
    Editing,
    /// The form was submitted and the payslip is visible.
    Confirmed,
    /// The payslip has been exported at least once.
    Exported,
}

/// A payslip form with its current input and lifecycle status.
///
/// # Example
///
/// ```
/// use payslip_engine::config::PayrollConfig;
/// use payslip_engine::form::{FormStatus, PayslipForm};
/// use payslip_engine::models::FormField;
///
/// let mut form = PayslipForm::new(PayrollConfig::default());
/// form.update(FormField::AnnualCtc, "600000");
/// assert!(form.document().is_none());
///
/// form.confirm().unwrap();
/// assert_eq!(form.status(), FormStatus::Confirmed);
/// let document = form.document().unwrap().unwrap();
/// assert_eq!(document.net_pay, "Net Salary / Month : ₹46,200.00");
/// ```
#[derive(Debug, Clone)]
pub struct PayslipForm {
    config: PayrollConfig,
    input: CompensationInput,
    status: FormStatus,
}

impl PayslipForm {
    /// Creates an empty form in the Editing state.
    pub fn new(config: PayrollConfig) -> Self {
        let input = CompensationInput {
            days_payable: config.structure.default_days_payable,
            ..CompensationInput::default()
        };
        Self {
            config,
            input,
            status: FormStatus::Editing,
        }
    }

    /// The current lifecycle status.
    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// The current input.
    pub fn input(&self) -> &CompensationInput {
        &self.input
    }

    /// The configuration the form calculates with.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Replaces one field with a raw form value.
    pub fn update(&mut self, field: FormField, raw: &str) {
        debug!(field = %field, "Form field updated");
        self.replace_input(|input| input.with_field(field, raw));
    }

    /// Switches variable pay on with an amount, or off.
    pub fn set_variable_pay(&mut self, amount: Option<Decimal>) {
        self.replace_input(|input| input.with_variable_pay(amount));
    }

    /// Switches the bonus on with an amount, or off.
    pub fn set_bonus(&mut self, amount: Option<Decimal>) {
        self.replace_input(|input| input.with_bonus(amount));
    }

    /// Switches the UAN line on with a number, or off.
    pub fn set_uan(&mut self, uan: Option<String>) {
        self.replace_input(|input| input.with_uan(uan));
    }

    /// Replaces the whole input record.
    pub fn replace(&mut self, input: CompensationInput) {
        self.input = input;
    }

    fn replace_input(&mut self, update: impl FnOnce(CompensationInput) -> CompensationInput) {
        let current = std::mem::take(&mut self.input);
        self.input = update(current);
    }

    /// Calculates the payroll figures for the current input.
    pub fn calculate(&self) -> EngineResult<CalculationResult> {
        calculate_payroll(&self.input, &self.config)
    }

    /// Submits the form, making the payslip visible.
    ///
    /// The input is calculated once so that a form that cannot produce a
    /// payslip stays in Editing. Confirming again is a no-op.
    pub fn confirm(&mut self) -> EngineResult<()> {
        self.calculate()?;
        if self.status == FormStatus::Editing {
            self.status = FormStatus::Confirmed;
            info!(associate_id = %self.input.associate_id, "Payslip confirmed");
        }
        Ok(())
    }

    /// Renders the payslip for the current input.
    ///
    /// Returns `None` while the form is still being edited.
    pub fn document(&self) -> Option<EngineResult<PayslipDocument>> {
        if self.status == FormStatus::Editing {
            return None;
        }
        Some(
            self.calculate()
                .map(|result| render_payslip(&self.input, &result.payroll, &self.config)),
        )
    }

    /// Exports the payslip for the current input.
    ///
    /// Allowed once confirmed, any number of times. A failed export leaves the
    /// status unchanged and the form usable.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidInput`] on field `form` while still Editing
    /// - any calculation error for the current input
    /// - [`EngineError::ExportFailure`] from the exporter
    pub async fn export(&mut self, exporter: Arc<dyn Exporter>) -> EngineResult<ExportedDocument> {
        let document = match self.document() {
            None => {
                return Err(EngineError::invalid_input(
                    "form",
                    "confirm the payslip before exporting",
                ));
            }
            Some(document) => document?,
        };

        let options = ExportOptions::from_config(&self.config.document);
        let exported = spawn_export(exporter, document, options).await?;
        self.status = FormStatus::Exported;
        Ok(exported)
    }
}
