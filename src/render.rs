use crate::{config::Config, report::ReportRecord};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write;

const RULE_WIDTH: usize = 50;
const BLOB_INDENT: &str = "    ";

#[derive(Debug, Clone)]
pub struct Rendered {
    pub json: String,
    pub text: String,
}

pub fn render(cfg: &Config, record: &ReportRecord) -> Result<Rendered> {
    Ok(Rendered {
        json: render_json(record)?,
        text: render_text(cfg, record)?,
    })
}

pub fn render_json(record: &ReportRecord) -> Result<String> {
    serde_json::to_string_pretty(record).with_context(|| "serializing report record")
}

pub fn render_text(cfg: &Config, record: &ReportRecord) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, cfg, record).with_context(|| "formatting text report")?;
    Ok(out)
}

fn write_text(w: &mut String, cfg: &Config, record: &ReportRecord) -> std::fmt::Result {
    let s = &record.test_summary;

    writeln!(w, "{}", cfg.report.title)?;
    writeln!(w, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(w)?;

    writeln!(w, "Test run time: {}", record.timestamp)?;
    writeln!(w, "Total tests: {}", s.total_tests)?;
    writeln!(w, "Passed tests: {}", s.passed_tests)?;
    writeln!(w, "Failed tests: {}", s.failed_tests)?;
    writeln!(w, "Success rate: {}", s.success_rate)?;
    writeln!(w)?;

    writeln!(w, "Browser test results:")?;
    write_entries(w, &record.browser_tests)?;

    writeln!(w)?;
    writeln!(w, "Mobile simulation test results:")?;
    write_entries(w, &record.mobile_tests)?;

    writeln!(w)?;
    writeln!(w, "PWA test results:")?;
    write_entries(w, &record.pwa)?;

    if !record.performance.is_empty() {
        writeln!(w)?;
        writeln!(w, "Performance test results:")?;
        for (key, blob) in record.performance.entries() {
            writeln!(w, "  {key}:")?;
            writeln!(w, "{BLOB_INDENT}{}", indent_blob(blob))?;
        }
    }

    Ok(())
}

fn write_entries(w: &mut String, entries: &BTreeMap<String, String>) -> std::fmt::Result {
    for (key, value) in entries {
        writeln!(w, "  {key}: {value}")?;
    }
    Ok(())
}

/// Continuation lines of a multi-line blob get the same indent as the first.
pub fn indent_blob(blob: &str) -> String {
    blob.replace('\n', &format!("\n{BLOB_INDENT}"))
}
