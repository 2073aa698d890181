//! HTTP API module for the Payslip Engine.
//!
//! This module provides the REST API endpoints for calculating and exporting
//! payslips.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayslipRequest, RawField};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
