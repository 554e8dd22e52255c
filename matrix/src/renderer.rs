//! Text and HTML rendering of a [`TrainingMatrix`].

use std::fmt::Write as _;

use skillcert_approvals::Badge;

use crate::matrix::{split_operation_label, LineFilter, TrainingMatrix};
use crate::stats::CertificationStats;

/// Renders the matrix as a fixed-width table.
///
/// Operation columns are headed by their code; a legend maps codes to names
/// below the table. Codes shared by several columns (name-only operations all
/// read `OP`) are replaced by the full label.
#[must_use]
pub fn render_text(matrix: &TrainingMatrix) -> String {
    let mut out = String::new();
    let filter = match &matrix.filter {
        LineFilter::All => "all lines".to_owned(),
        LineFilter::Line(line) => line.clone(),
    };
    let _ = writeln!(out, "Training matrix ({filter})");
    if matrix.is_empty() {
        out.push_str("(no certifications)\n");
        return out;
    }

    let codes = column_headers(&matrix.operations);
    let name_width = matrix
        .rows
        .iter()
        .map(|r| r.employee.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let widths: Vec<usize> = codes.iter().map(|c| c.chars().count().max(4)).collect();

    let _ = write!(out, "{:<8} {:<name_width$}", "Number", "Name");
    for (code, &width) in codes.iter().zip(&widths) {
        let _ = write!(out, " {code:>width$}");
    }
    out.push('\n');

    for row in &matrix.rows {
        let _ = write!(
            out,
            "{:<8} {:<name_width$}",
            row.employee.number, row.employee.name
        );
        for (operation, &width) in matrix.operations.iter().zip(&widths) {
            let shown = row.certifications.get(operation).copied().unwrap_or(0);
            let glyph = Badge::for_percentage(shown).glyph();
            let _ = write!(out, " {glyph:>width$}");
        }
        out.push('\n');
    }

    out.push('\n');
    for (operation, header) in matrix.operations.iter().zip(&codes) {
        let (code, name) = split_operation_label(operation);
        if *header == code && code != name {
            let _ = writeln!(out, "  {code}: {name}");
        }
    }
    out
}

fn column_headers(operations: &[String]) -> Vec<&str> {
    let codes: Vec<&str> = operations
        .iter()
        .map(|op| split_operation_label(op).0)
        .collect();
    codes
        .iter()
        .zip(operations)
        .map(|(code, operation)| {
            if codes.iter().filter(|c| *c == code).count() > 1 {
                operation.as_str()
            } else {
                *code
            }
        })
        .collect()
}

/// Renders statistics as a single summary line.
#[must_use]
pub fn render_stats_text(stats: &CertificationStats) -> String {
    format!(
        "Summary: {} certifications; 25%: {}, 50%: {}, 75%: {}, 100%: {}, average {}%\n",
        stats.total, stats.at_25, stats.at_50, stats.at_75, stats.at_100, stats.average
    )
}

/// Renders the matrix as a standalone HTML page. Each cell carries the
/// `cert-*` class of its badge.
#[must_use]
pub fn render_html(matrix: &TrainingMatrix, title: &str) -> String {
    let mut header = String::new();
    for operation in &matrix.operations {
        let (code, name) = split_operation_label(operation);
        let _ = write!(
            header,
            "<th title=\"{}\">{}</th>",
            escape_html(name),
            escape_html(code)
        );
    }

    let mut rows = String::new();
    for row in &matrix.rows {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td>",
            escape_html(&row.employee.number),
            escape_html(&row.employee.name),
            escape_html(&row.employee.hire_date),
        );
        for operation in &matrix.operations {
            let shown = row.certifications.get(operation).copied().unwrap_or(0);
            let badge = Badge::for_percentage(shown);
            let _ = write!(
                rows,
                "<td class=\"{}\">{}</td>",
                badge.css_class(),
                if shown == 0 { String::new() } else { format!("{shown}%") }
            );
        }
        rows.push_str("</tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
</head>
<body>
<main id="main-content">
<h1>{title}</h1>
<table class="training-matrix">
<thead>
<tr><th>Number</th><th>Name</th><th>Hire date</th>{header}</tr>
</thead>
<tbody>
{rows}</tbody>
</table>
</main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Escapes HTML special characters in a string.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use skillcert_approvals::{ApprovalPolicy, CertificationRecord};

    use super::*;

    fn matrix() -> TrainingMatrix {
        let mut record = CertificationRecord::new("6685", "OP001 - Costura", 75).with_line("L1");
        record.employee_name = "Juan <Alcantar>".to_owned();
        let records = vec![
            record,
            CertificationRecord::new("7218", "OP002 - Corte", 100).with_line("L1"),
        ];
        TrainingMatrix::build(&records, &LineFilter::All, ApprovalPolicy::standard())
    }

    #[test]
    fn text_table_has_codes_and_legend() {
        let text = render_text(&matrix());
        assert!(text.starts_with("Training matrix (all lines)"));
        assert!(text.contains("OP001"));
        assert!(text.contains("OP002: Corte"));
        let row = text.lines().find(|l| l.starts_with("6685")).expect("row for 6685");
        assert!(row.contains("75"));
        let gated = text.lines().find(|l| l.starts_with("7218")).expect("row for 7218");
        assert!(!gated.contains("100"));
    }

    #[test]
    fn html_escapes_and_uses_badges() {
        let html = render_html(&matrix(), "Matriz & Co");
        assert!(html.contains("<title>Matriz &amp; Co</title>"));
        assert!(html.contains("Juan &lt;Alcantar&gt;"));
        assert!(html.contains("<td class=\"cert-75\">75%</td>"));
        assert!(html.contains("<td class=\"cert-none\"></td>"));
        assert!(!html.contains("cert-100"));
    }

    #[test]
    fn colliding_codes_use_full_labels() {
        let records = vec![
            CertificationRecord::new("6685", "OP - Empaque", 50).with_line("L1"),
            CertificationRecord::new("6685", "OP - Etiquetado", 75).with_line("L1"),
            CertificationRecord::new("6685", "OP003 - Corte", 25).with_line("L1"),
        ];
        let matrix = TrainingMatrix::build(&records, &LineFilter::All, ApprovalPolicy::standard());
        let text = render_text(&matrix);
        let header = text.lines().nth(1).expect("header line");
        assert!(header.contains("OP - Empaque"));
        assert!(header.contains("OP - Etiquetado"));
        assert!(header.contains("OP003"));
        assert!(!header.contains("OP003 - Corte"));
        assert!(text.contains("OP003: Corte"));
        assert!(!text.contains("OP: Empaque"));
    }

    #[test]
    fn empty_matrix_text() {
        let empty = TrainingMatrix::build(&[], &LineFilter::All, ApprovalPolicy::standard());
        assert!(render_text(&empty).contains("(no certifications)"));
    }

    #[test]
    fn stats_line() {
        let stats = CertificationStats {
            total: 2,
            at_25: 1,
            at_50: 0,
            at_75: 1,
            at_100: 0,
            average: 50,
        };
        assert!(render_stats_text(&stats).contains("average 50%"));
    }
}
