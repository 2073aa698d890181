//! PDF export via Typst.
//!
//! Compiles the Typst layout of a payslip to PDF bytes using typst-as-lib.
//! The fonts embedded in typst-assets are always available; font files named
//! in the document configuration are added on top of them.

use std::fs;

use typst::foundations::Bytes;
use typst::layout::PagedDocument;
use typst_as_lib::TypstEngine;

use crate::config::DocumentConfig;
use crate::error::{EngineError, EngineResult};
use crate::render::PayslipDocument;

use super::typst_markup::to_typst_markup;
use super::{ExportOptions, ExportedDocument, Exporter};

/// MIME type of the documents produced by [`PdfExporter`].
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Exports payslips as single-page PDF documents.
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    fonts: Vec<Bytes>,
}

impl PdfExporter {
    /// Creates an exporter using only the embedded fonts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an exporter loading the font files listed in the document
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] for a font path that cannot be
    /// read.
    pub fn from_config(document: &DocumentConfig) -> EngineResult<Self> {
        let fonts = document
            .font_paths
            .iter()
            .map(|path| {
                fs::read(path)
                    .map(Bytes::new)
                    .map_err(|_| EngineError::ConfigNotFound { path: path.clone() })
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self { fonts })
    }

    /// Embedded fonts followed by the configured ones.
    fn font_data(&self) -> Vec<Bytes> {
        typst_assets::fonts()
            .map(Bytes::new)
            .chain(self.fonts.iter().cloned())
            .collect()
    }

    fn compile(&self, markup: String) -> EngineResult<PagedDocument> {
        // fonts() replaces the list, so every font goes in a single call.
        let engine = TypstEngine::builder()
            .main_file(markup)
            .fonts(self.font_data())
            .build();

        engine
            .compile()
            .output
            .map_err(|e| EngineError::export_failure(format!("{:?}", e)))
    }
}

impl Exporter for PdfExporter {
    fn export(
        &self,
        document: &PayslipDocument,
        options: &ExportOptions,
    ) -> EngineResult<ExportedDocument> {
        let compiled_document = self.compile(to_typst_markup(document, options.page))?;

        let pdf_options = typst_pdf::PdfOptions::default();
        let bytes = typst_pdf::pdf(&compiled_document, &pdf_options).map_err(|e| {
            EngineError::export_failure(format!("PDF generation failed: {:?}", e))
        })?;

        Ok(ExportedDocument {
            file_name: options.file_name.clone(),
            content_type: PDF_CONTENT_TYPE.to_string(),
            bytes: bytes.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_payroll;
    use crate::config::PayrollConfig;
    use crate::models::{CompensationInput, FormField};
    use crate::render::render_payslip;
    use rust_decimal::Decimal;
    use typst::layout::{Frame, FrameItem};

    fn sample_document() -> PayslipDocument {
        let config = PayrollConfig::default();
        let input = CompensationInput::default()
            .with_field(FormField::Name, "Asha Rao")
            .with_field(FormField::AnnualCtc, "600000")
            .with_bonus(Some(Decimal::new(5000, 0)))
            .with_uan(Some("100200300400".to_string()));
        let result = calculate_payroll(&input, &config).unwrap();
        render_payslip(&input, &result.payroll, &config)
    }

    fn collect_text(frame: &Frame, out: &mut String) {
        for (_, item) in frame.items() {
            match item {
                FrameItem::Group(group) => collect_text(&group.frame, out),
                FrameItem::Text(text) => out.push_str(&text.text),
                _ => {}
            }
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_export_produces_pdf() {
        let exporter = PdfExporter::new();
        let result = exporter.export(&sample_document(), &ExportOptions::default());

        assert!(result.is_ok(), "Export failed: {:?}", result.err());
        let exported = result.unwrap();
        assert_eq!(exported.file_name, "Payslip.pdf");
        assert_eq!(exported.content_type, PDF_CONTENT_TYPE);
        assert!(
            exported.bytes.starts_with(b"%PDF"),
            "Output doesn't start with PDF header"
        );
    }

    #[test]
    fn test_default_exporter_embeds_a_font() {
        let exported = PdfExporter::new()
            .export(&sample_document(), &ExportOptions::default())
            .unwrap();

        assert!(contains(&exported.bytes, b"/Font"), "PDF has no font resource");
        assert!(contains(&exported.bytes, b"/FontFile"), "PDF has no embedded font program");
    }

    #[test]
    fn test_default_exporter_lays_out_net_pay_text() {
        let document = sample_document();
        let compiled = PdfExporter::new()
            .compile(to_typst_markup(&document, ExportOptions::default().page))
            .unwrap();

        let mut text = String::new();
        for page in &compiled.pages {
            collect_text(&page.frame, &mut text);
        }

        let amount = document.net_pay.rsplit('₹').next().unwrap();
        assert!(!amount.is_empty());
        assert!(text.contains("Net"), "Laid out text: {}", text);
        assert!(text.contains(amount), "Net pay {} missing from: {}", amount, text);
        assert!(text.contains("Asha Rao"));
    }

    #[test]
    fn test_export_uses_configured_file_name() {
        let options = ExportOptions {
            file_name: "Payslip-UX-042.pdf".to_string(),
            ..ExportOptions::default()
        };
        let exported = PdfExporter::new()
            .export(&sample_document(), &options)
            .unwrap();
        assert_eq!(exported.file_name, "Payslip-UX-042.pdf");
    }

    #[test]
    fn test_missing_font_file_is_config_not_found() {
        let mut document = PayrollConfig::default().document;
        document.font_paths = vec!["./fonts/does-not-exist.ttf".to_string()];

        match PdfExporter::from_config(&document) {
            Err(EngineError::ConfigNotFound { path }) => {
                assert_eq!(path, "./fonts/does-not-exist.ttf")
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_config_without_fonts_uses_embedded_fonts() {
        let exporter = PdfExporter::from_config(&PayrollConfig::default().document).unwrap();
        assert!(exporter.fonts.is_empty());
        assert_eq!(exporter.font_data().len(), typst_assets::fonts().count());
    }

    #[test]
    fn test_every_configured_font_is_passed_to_typst() {
        let dir = tempfile::tempdir().unwrap();
        let embedded: Vec<&[u8]> = typst_assets::fonts().take(2).collect();
        let mut document = PayrollConfig::default().document;
        for (i, data) in embedded.iter().enumerate() {
            let path = dir.path().join(format!("extra-{}.otf", i));
            fs::write(&path, data).unwrap();
            document.font_paths.push(path.to_string_lossy().into_owned());
        }

        let exporter = PdfExporter::from_config(&document).unwrap();
        let fonts = exporter.font_data();
        let base = typst_assets::fonts().count();

        assert_eq!(fonts.len(), base + 2);
        assert_eq!(fonts[base].as_slice(), embedded[0]);
        assert_eq!(fonts[base + 1].as_slice(), embedded[1]);

        let exported = exporter
            .export(&sample_document(), &ExportOptions::default())
            .unwrap();
        assert!(exported.bytes.starts_with(b"%PDF"));
    }
}
