//! Application state for the Payslip Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayrollConfig};
use crate::export::Exporter;

/// Shared application state.
///
/// Holds the read-only payslip configuration and the exporter used by the
/// export endpoint.
#[derive(Clone)]
pub struct AppState {
    config: Arc<PayrollConfig>,
    exporter: Arc<dyn Exporter>,
}

impl AppState {
    /// Creates a new application state from a loaded configuration and an
    /// exporter.
    pub fn new(config: ConfigLoader, exporter: Arc<dyn Exporter>) -> Self {
        Self {
            config: Arc::new(config.config().clone()),
            exporter,
        }
    }

    /// Returns the payslip configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns a shared handle to the exporter.
    pub fn exporter(&self) -> Arc<dyn Exporter> {
        Arc::clone(&self.exporter)
    }
}
