//! Typst layout of the payslip surface.
//!
//! User-supplied text is always emitted as Typst string literals, never as
//! markup, so names or addresses containing `#`, `*` or `[` print verbatim.

use std::fmt::Write;

use crate::render::{IdentityRow, LineItem, PayslipDocument, SalaryRow};

use super::PageSize;

/// Lays the payslip out as a Typst source document on a single page.
///
/// ```
/// use payslip_engine::export::{to_typst_markup, PageSize};
/// use payslip_engine::render::{Footer, PayslipDocument, SalaryRow};
///
/// let document = PayslipDocument {
///     heading: "Acme".to_string(),
///     identity: vec![],
///     salary_header: ["E".into(), "A".into(), "D".into(), "A".into()],
///     salary_rows: vec![],
///     totals: SalaryRow { earning: None, deduction: None },
///     net_pay: "Net Salary / Month : ₹0.00".to_string(),
///     footer: Footer {
///         organization: "Acme".to_string(),
///         address: String::new(),
///         tax_registration: "GSTIN: ".to_string(),
///         notice: String::new(),
///     },
/// };
/// let markup = to_typst_markup(&document, PageSize::A4_PORTRAIT);
/// assert!(markup.starts_with("#set page(width: 210mm, height: 297mm, margin: 0pt)"));
/// ```
pub fn to_typst_markup(document: &PayslipDocument, page: PageSize) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "#set page(width: {}mm, height: {}mm, margin: 0pt)",
        page.width_mm, page.height_mm
    );
    out.push_str("#set text(size: 10pt)\n");
    out.push_str("#block(width: 100%, inset: 16mm)[\n");

    let _ = writeln!(
        out,
        "#align(center, text(size: 16pt, weight: \"bold\", {}))",
        literal(&document.heading)
    );
    out.push_str("#v(12pt)\n");

    write_identity(&mut out, &document.identity);
    out.push_str("#v(12pt)\n");

    write_salary_table(&mut out, document);
    out.push_str("#v(12pt)\n");

    let _ = writeln!(
        out,
        "#text(size: 12pt, weight: \"bold\", {})",
        literal(&document.net_pay)
    );
    out.push_str("#v(24pt)\n");

    let footer = &document.footer;
    let _ = writeln!(
        out,
        "#align(center, stack(spacing: 4pt, strong({}), text({}), text({}), emph({})))",
        literal(&footer.organization),
        literal(&footer.address),
        literal(&footer.tax_registration),
        literal(&footer.notice)
    );

    out.push_str("]\n");
    out
}

fn write_identity(out: &mut String, rows: &[IdentityRow]) {
    out.push_str("#table(\n");
    out.push_str("  columns: (auto, auto, 1fr, 12pt, auto, auto, 1fr),\n");
    out.push_str("  stroke: none,\n");
    out.push_str("  table.vline(x: 3, stroke: 0.5pt),\n");
    for row in rows {
        let _ = write!(
            out,
            "  {}, \":\", {}, [],",
            literal(&row.left.label),
            literal(&row.left.value)
        );
        match &row.right {
            Some(right) => {
                let _ = writeln!(
                    out,
                    " {}, \":\", {},",
                    literal(&right.label),
                    literal(&right.value)
                );
            }
            None => out.push_str(" [], [], [],\n"),
        }
    }
    out.push_str(")\n");
}

fn write_salary_table(out: &mut String, document: &PayslipDocument) {
    out.push_str("#table(\n");
    out.push_str("  columns: (1fr, auto, 1fr, auto),\n");
    out.push_str("  stroke: 0.5pt,\n");
    let headers: Vec<String> = document
        .salary_header
        .iter()
        .map(|h| format!("strong({})", literal(h)))
        .collect();
    let _ = writeln!(out, "  table.header({}),", headers.join(", "));

    for row in &document.salary_rows {
        write_salary_row(out, row, false);
    }
    write_salary_row(out, &document.totals, true);
    out.push_str(")\n");
}

fn write_salary_row(out: &mut String, row: &SalaryRow, bold: bool) {
    let cells = |item: &Option<LineItem>| match item {
        Some(item) if bold => format!(
            "strong({}), strong({})",
            literal(&item.label),
            literal(&item.amount)
        ),
        Some(item) => format!("{}, {}", literal(&item.label), literal(&item.amount)),
        None => "[], []".to_string(),
    };
    let _ = writeln!(out, "  {}, {},", cells(&row.earning), cells(&row.deduction));
}

/// Quotes `text` as a Typst string literal.
fn literal(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
