//! Document export.
//!
//! An [`Exporter`] turns a rendered [`PayslipDocument`] into a downloadable
//! artifact. Exporting is the only slow step in producing a payslip, so
//! [`spawn_export`] runs it on the blocking pool and hands back an
//! [`ExportHandle`] to await.

mod pdf;
mod typst_markup;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::DocumentConfig;
use crate::error::{EngineError, EngineResult};
use crate::render::PayslipDocument;

pub use pdf::{PDF_CONTENT_TYPE, PdfExporter};
pub use typst_markup::to_typst_markup;

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    /// Page width.
    pub width_mm: f32,
    /// Page height.
    pub height_mm: f32,
}

impl PageSize {
    /// ISO A4 portrait.
    pub const A4_PORTRAIT: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

/// Settings for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Page the document is placed on, full bleed.
    pub page: PageSize,
    /// Name the artifact is delivered under.
    pub file_name: String,
}

impl ExportOptions {
    /// Builds export options from the document configuration.
    pub fn from_config(document: &DocumentConfig) -> Self {
        Self {
            page: PageSize::A4_PORTRAIT,
            file_name: document.file_name.clone(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            page: PageSize::A4_PORTRAIT,
            file_name: "Payslip.pdf".to_string(),
        }
    }
}

/// A finished document ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// File name to deliver the document under.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub content_type: String,
    /// Encoded document.
    pub bytes: Vec<u8>,
}

/// Converts a rendered payslip into a single-page document artifact.
///
/// Implementations are synchronous and may be slow; callers in async code
/// should go through [`spawn_export`].
pub trait Exporter: Send + Sync {
    /// Exports `document` with the given options.
    fn export(
        &self,
        document: &PayslipDocument,
        options: &ExportOptions,
    ) -> EngineResult<ExportedDocument>;
}

/// Starts an export on the blocking thread pool.
///
/// Must be called from within a tokio runtime. The returned handle resolves to
/// the export result; dropping it discards the outcome.
pub fn spawn_export(
    exporter: Arc<dyn Exporter>,
    document: PayslipDocument,
    options: ExportOptions,
) -> ExportHandle {
    let inner = tokio::task::spawn_blocking(move || {
        let result = exporter.export(&document, &options);
        match &result {
            Ok(exported) => info!(
                file_name = %exported.file_name,
                bytes = exported.bytes.len(),
                "Payslip exported"
            ),
            Err(err) => warn!(error = %err, "Payslip export failed"),
        }
        result
    });
    ExportHandle { inner }
}

/// A pending export started by [`spawn_export`].
#[derive(Debug)]
pub struct ExportHandle {
    inner: JoinHandle<EngineResult<ExportedDocument>>,
}

impl ExportHandle {
    /// Cancels the export if it has not started running yet.
    ///
    /// An export already in progress runs to completion but its result is
    /// discarded; awaiting the handle afterwards yields an
    /// [`EngineError::ExportFailure`].
    pub fn abort(&self) {
        self.inner.abort();
    }
}

impl Future for ExportHandle {
    type Output = EngineResult<ExportedDocument>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(EngineError::export_failure("export cancelled")),
            Err(err) => Err(EngineError::export_failure(format!(
                "exporter panicked: {}",
                err
            ))),
        })
    }
}
