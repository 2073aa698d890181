//! Payslip Engine
//!
//! This crate turns an employee's annual cost to company into a monthly
//! payslip: it splits the salary into its components, applies loss-of-pay
//! and statutory deductions, lays the figures out as a payslip document and
//! exports that document as a single-page PDF.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod models;
pub mod render;
