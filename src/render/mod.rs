//! Payslip rendering.
//!
//! Formats the identity fields and calculated figures into a fixed-layout
//! [`PayslipDocument`] that an [`Exporter`](crate::export::Exporter) can place
//! on a page.

mod document;
mod format;

pub use document::{
    Footer, IdentityRow, LabeledValue, LineItem, PayslipDocument, SalaryRow, render_payslip,
};
pub use format::{format_date, format_inr, parse_inr};
