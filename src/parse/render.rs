//! Canonical text form of a coverage model.
//!
//! The output re-parses to an equal model: every scope carries an explicit
//! `Coverage:` line and floats use Rust's shortest round-trip formatting.

use std::fmt::Write;

use crate::model::{Bin, BinScope, CoverageReport};

pub fn render_report_text(report: &CoverageReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Design: {}", report.design_name);
    let _ = writeln!(out, "Overall Coverage: {}%", report.overall_coverage_percent);
    for cg in &report.covergroups {
        let _ = writeln!(out);
        let _ = writeln!(out, "Covergroup: {}", cg.name);
        let _ = writeln!(out, "Coverage: {}%", cg.coverage_percent);
        for cp in &cg.coverpoints {
            render_scope(&mut out, "Coverpoint", cp);
        }
        for cross in &cg.crosses {
            render_scope(&mut out, "Cross", cross);
        }
    }
    out
}

fn render_scope<S: BinScope>(out: &mut String, keyword: &str, scope: &S) {
    let _ = writeln!(out, "  {keyword}: {}", scope.name());
    let _ = writeln!(out, "  Coverage: {}%", scope.coverage_percent());
    for bin in scope.bins() {
        render_bin(out, bin);
    }
}

fn render_bin(out: &mut String, bin: &Bin) {
    let _ = writeln!(
        out,
        "    Bin: {} - Hits: {} - Status: {}",
        bin.name, bin.hits, bin.status
    );
}
