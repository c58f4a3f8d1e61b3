//! Human-readable text for analyses and stored designs

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::analysis::AnalysisResult;
use crate::store::DesignRecord;

/// Coverage as a percentage with two decimals, e.g. `25.00%`
pub fn format_coverage(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Canvas size, e.g. `100 × 50px`
pub fn format_dimensions(width: f64, height: f64) -> String {
    format!("{} × {}px", width, height)
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// One line per stored design: filename, status, rectangle count, upload time
pub fn list_row(record: &DesignRecord) -> String {
    let analysis = &record.analysis;
    format!(
        "{}  {:<24} {:<13} {:>4} rect(s)  {}",
        record.id,
        analysis.filename(),
        analysis.status().label(),
        analysis.items_count(),
        format_timestamp(record.created_at)
    )
}

/// Multi-line summary of an analysis
pub fn summary(analysis: &AnalysisResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", analysis.filename());
    let _ = writeln!(out, "  Status:     {}", analysis.status().label());
    let _ = writeln!(
        out,
        "  Dimensions: {}",
        format_dimensions(analysis.svg_width(), analysis.svg_height())
    );
    let _ = writeln!(out, "  Rectangles: {}", analysis.items_count());
    let _ = writeln!(out, "  Coverage:   {}", format_coverage(analysis.coverage_ratio()));
    write_issues(&mut out, analysis);
    out
}

/// Summary of a stored design, with its id and upload time
pub fn detail(record: &DesignRecord) -> String {
    let mut out = summary(&record.analysis);
    let _ = writeln!(out, "  Id:         {}", record.id);
    let _ = writeln!(out, "  Uploaded:   {}", format_timestamp(record.created_at));
    let _ = writeln!(out, "  File:       {}", record.file_path);
    out
}

fn write_issues(out: &mut String, analysis: &AnalysisResult) {
    if analysis.issues().is_empty() {
        let _ = writeln!(out, "  Issues:     none");
        return;
    }
    let _ = writeln!(out, "  Issues:");
    for issue in analysis.issues() {
        let _ = writeln!(out, "    - {}", issue.description());
    }
}
