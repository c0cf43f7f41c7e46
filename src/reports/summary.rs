//! Summary and table report generators for terminal output.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::model::{Bom, Report, ReportItem, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Apply ANSI color codes if colored output is enabled
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn status_color(status: Status) -> &'static str {
    match status {
        Status::Ok => "green",
        Status::Failed => "red",
        Status::Skipped => "dim",
    }
}

const fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Summary reporter for compact shell output
pub struct SummaryReporter {
    /// Use colors in output
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &Report, bom: &Bom) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("Bill of Material Check", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!(
            "{}  {}",
            self.color("Product:", "cyan"),
            bom.summary.partnumber
        ));
        let assemblies = bom.assemblies.len();
        lines.push(format!(
            "{}  {} {}, {} summary {}",
            self.color("Size:", "cyan"),
            assemblies,
            plural(assemblies, "assembly", "assemblies"),
            bom.summary.len(),
            plural(bom.summary.len(), "item", "items"),
        ));

        let counts = report.count_by_status();
        lines.push(format!(
            "{}  {} ok, {} failed",
            self.color("Items:", "cyan"),
            self.color(&counts.ok.to_string(), "green"),
            self.color(&counts.failed.to_string(), if counts.failed > 0 { "red" } else { "dim" }),
        ));

        let failed: Vec<&ReportItem> = report.failed_items().collect();
        if !failed.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Failed items:", "bold"));
            for item in failed {
                lines.push(format!(
                    "  {} {} {}",
                    self.color("✗", "red"),
                    item.partnumber,
                    self.color(&format!("(in {})", item.parent_partnumber), "dim"),
                ));
                for rule in item.failed_rules() {
                    lines.push(format!("      {rule}"));
                }
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "{}  {}",
            self.color("Status:", "bold"),
            self.color(report.status.as_str(), status_color(report.status)),
        ));

        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

const STATUS_WIDTH: usize = 8;
const PARENT_WIDTH: usize = 24;
const PARTNUMBER_WIDTH: usize = 32;

/// Table reporter for aligned per-item output
pub struct TableReporter {
    /// Use colors in output
    colored: bool,
}

impl TableReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Pad first so escape codes do not count toward the column width
    fn cell(&self, text: &str, width: usize, color: &str) -> String {
        ansi_color(&pad(&truncate(text, width), width), color, self.colored)
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate(&self, report: &Report, _bom: &Bom) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} {} {} {}",
            self.cell("STATUS", STATUS_WIDTH, "bold"),
            self.cell("ASSEMBLY", PARENT_WIDTH, "bold"),
            self.cell("PART NUMBER", PARTNUMBER_WIDTH, "bold"),
            ansi_color("FAILED RULES", "bold", self.colored),
        ));
        lines.push("─".repeat(STATUS_WIDTH + PARENT_WIDTH + PARTNUMBER_WIDTH + 16));

        for item in &report.items {
            let failed: Vec<&str> = item.failed_rules().collect();
            let rules = if failed.is_empty() {
                "-".to_string()
            } else {
                failed.join(", ")
            };
            lines.push(
                format!(
                    "{} {} {} {}",
                    self.cell(item.status.as_str(), STATUS_WIDTH, status_color(item.status)),
                    self.cell(&item.parent_partnumber, PARENT_WIDTH, ""),
                    self.cell(&item.partnumber, PARTNUMBER_WIDTH, ""),
                    rules,
                )
                .trim_end()
                .to_string(),
            );
        }

        if report.items.is_empty() {
            lines.push(ansi_color("No items validated", "dim", self.colored));
        }

        let counts = report.count_by_status();
        lines.push(String::new());
        lines.push(format!(
            "{} ({} ok, {} failed)",
            ansi_color(report.status.as_str(), status_color(report.status), self.colored),
            counts.ok,
            counts.failed,
        ));

        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// Cut `s` to at most `max_width` display columns, marking the cut with `...`.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let (budget, ellipsis) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ellipsis);
    out
}

/// Right-pad `s` with spaces to `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BomAssembly;

    fn sample() -> (Report, Bom) {
        let bom = Bom::new(
            vec![BomAssembly::new("A1", "/cad/A1.CATProduct")],
            BomAssembly::new("TOP", "/cad/TOP.CATProduct"),
        );
        let mut report = Report::new();
        let mut ok = ReportItem::new("P1", None, "A1", "/cad/A1.CATProduct");
        ok.record("Revision", Status::Ok);
        report.push(ok);
        let mut failed = ReportItem::new("P2", None, "A1", "/cad/A1.CATProduct");
        failed.record("Revision", Status::Failed);
        failed.record("Project number", Status::Failed);
        report.push(failed);
        (report, bom)
    }

    #[test]
    fn summary_lists_failed_rules() {
        let (report, bom) = sample();
        let out = SummaryReporter::new()
            .no_color()
            .generate(&report, &bom)
            .expect("render");
        assert!(out.contains("Items:  1 ok, 1 failed"));
        assert!(out.contains("✗ P2 (in A1)"));
        assert!(out.contains("      Project number"));
        assert!(out.contains("Status:  FAILED"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn table_rows_are_aligned() {
        let (report, bom) = sample();
        let out = TableReporter::new()
            .no_color()
            .generate(&report, &bom)
            .expect("render");
        let rows: Vec<&str> = out.lines().filter(|l| l.contains(" A1 ")).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("OK      "));
        assert!(rows[1].ends_with("Revision, Project number"));
        assert_eq!(rows[0].find("P1"), rows[1].find("P2"));
    }

    #[test]
    fn truncate_counts_display_width() {
        assert_eq!(truncate("Stückliste", 20), "Stückliste");
        assert_eq!(truncate("Stückliste", 6), "Stü...");
        assert_eq!(truncate("部品番号部品番号", 7), "部品...");
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(pad("部品", 6), "部品  ");
    }
}
