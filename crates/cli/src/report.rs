// Human-readable rendering for `jobrecon run` and `jobrecon missing-ids`.
// Pure functions: engine results in, text out.

use std::fmt::Write;

use jobrecon_engine::ids::IdDiff;
use jobrecon_engine::model::{Discrepancy, DiscrepancyKind, ReconReport};

use crate::util::{display_width, format_money, pad_left, pad_right};

/// Minimum width of the business-unit column; it grows to the longest name.
const UNIT_COL: usize = 34;
const COUNT_COL: usize = 6;
const MONEY_COL: usize = 16;

/// Render the full job reconciliation report.
pub fn render_report(report: &ReconReport, top: usize) -> String {
    let mut out = String::new();
    let meta = &report.meta;
    let s = &report.summary;
    let (left, right) = (meta.left_label.as_str(), meta.right_label.as_str());

    let _ = writeln!(out, "=== JOB RECONCILIATION: {} ===", meta.config_name);
    let _ = writeln!(out, "{left} jobs: {}{}", s.left_jobs, load_note(&report.load.left));
    let _ = writeln!(out, "{right} jobs: {}{}", s.right_jobs, load_note(&report.load.right));
    let _ = writeln!(
        out,
        "Jobs compared: {}   Discrepancies: {} (DIFFERENT {}, {} {}, {} {})",
        s.union_jobs,
        s.discrepancies,
        s.different,
        DiscrepancyKind::LeftOnly.label(left, right),
        s.left_only,
        DiscrepancyKind::RightOnly.label(left, right),
        s.right_only,
    );
    let _ = writeln!(
        out,
        "Differences are {} (tolerance {})",
        match meta.direction {
            jobrecon_engine::config::Direction::LeftMinusRight => format!("{left} minus {right}"),
            jobrecon_engine::config::Direction::RightMinusLeft => format!("{right} minus {left}"),
        },
        format_money(meta.tolerance),
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "=== SUMMARY BY BUSINESS UNIT ===");
    if report.by_unit.is_empty() {
        let _ = writeln!(out, "No discrepancies.");
    } else {
        let unit_col = report
            .by_unit
            .keys()
            .map(|bu| display_width(bu))
            .fold(UNIT_COL, usize::max);
        let _ = writeln!(
            out,
            "{} {} {} {}",
            pad_right("Business unit", unit_col),
            pad_left("Jobs", COUNT_COL),
            pad_left("Labor diff", MONEY_COL),
            pad_left("Materials diff", MONEY_COL),
        );
        for (bu, unit) in &report.by_unit {
            let _ = writeln!(
                out,
                "{} {} {} {}",
                pad_right(bu, unit_col),
                pad_left(&unit.count.to_string(), COUNT_COL),
                pad_left(&format_money(unit.labor_diff), MONEY_COL),
                pad_left(&format_money(unit.materials_diff), MONEY_COL),
            );
        }
        let _ = writeln!(
            out,
            "{} {} {} {}",
            pad_right("Total", unit_col),
            pad_left(&s.discrepancies.to_string(), COUNT_COL),
            pad_left(&format_money(s.total_labor_diff), MONEY_COL),
            pad_left(&format_money(s.total_materials_diff), MONEY_COL),
        );
    }

    if top > 0 && !report.discrepancies.is_empty() {
        let shown = top.min(report.discrepancies.len());
        let _ = writeln!(out);
        let _ = writeln!(out, "=== TOP {shown} JOBS WITH LARGEST DISCREPANCIES ===");
        for (i, d) in report.discrepancies.iter().take(shown).enumerate() {
            let _ = writeln!(out);
            write_discrepancy(&mut out, i + 1, d, left, right);
        }
    }

    out
}

fn load_note(stats: &jobrecon_engine::model::LoadStats) -> String {
    let mut notes = Vec::new();
    if stats.skipped_lines > 0 {
        notes.push(format!("{} malformed line(s) skipped", stats.skipped_lines));
    }
    if stats.duplicate_ids > 0 {
        notes.push(format!("{} duplicate id(s) overwritten", stats.duplicate_ids));
    }
    if notes.is_empty() {
        String::new()
    } else {
        format!(" ({})", notes.join(", "))
    }
}

fn write_discrepancy(out: &mut String, rank: usize, d: &Discrepancy, left: &str, right: &str) {
    let _ = writeln!(out, "{rank}. Job {} ({}):", d.job_id, d.business_unit);
    let _ = writeln!(out, "   Type: {}", d.kind.label(left, right));
    match &d.sides {
        Some(sides) => {
            let _ = writeln!(
                out,
                "   Labor: {left}={} vs {right}={} (Diff: {})",
                format_money(sides.left_labor),
                format_money(sides.right_labor),
                format_money(d.labor_diff),
            );
            let _ = writeln!(
                out,
                "   Materials: {left}={} vs {right}={} (Diff: {})",
                format_money(sides.left_materials),
                format_money(sides.right_materials),
                format_money(d.materials_diff),
            );
        }
        None => {
            let _ = writeln!(out, "   Labor Difference: {}", format_money(d.labor_diff));
            let _ = writeln!(out, "   Materials Difference: {}", format_money(d.materials_diff));
        }
    }
}

/// Render an identifier reconciliation, listing at most `limit` ids per side.
pub fn render_id_diff(diff: &IdDiff, limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Reference ids: {}", diff.reference_count);
    let _ = writeln!(out, "Our ids: {}", diff.ours_count);

    let _ = writeln!(out);
    let _ = writeln!(out, "=== MISSING FROM OURS ===");
    write_id_list(&mut out, "Missing ids:", &diff.missing, limit);

    let _ = writeln!(out);
    let _ = writeln!(out, "=== EXTRA IN OURS (not in reference) ===");
    write_id_list(&mut out, "Extra ids:", &diff.extra, limit);

    out
}

fn write_id_list(out: &mut String, heading: &str, ids: &[String], limit: usize) {
    let _ = writeln!(out, "Count: {}", ids.len());
    if ids.is_empty() {
        return;
    }
    let _ = writeln!(out, "{heading}");
    for id in ids.iter().take(limit) {
        let _ = writeln!(out, "  {id}");
    }
    if ids.len() > limit {
        let _ = writeln!(out, "  ... {} more (showing first {limit})", ids.len() - limit);
    }
}
