use std::path::PathBuf;

use jobrecon_engine::config::JobReconConfig;
use jobrecon_engine::ids::{diff_ids, read_id_csv, read_id_lines};
use jobrecon_engine::loader::load_source;
use jobrecon_engine::model::{DiscrepancyKind, ReconReport};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

fn load_and_run(config_toml: &str) -> ReconReport {
    let config = JobReconConfig::from_toml(config_toml).unwrap();
    let left = load_source(&config.left, &read_fixture(&config.left.file)).unwrap();
    let right = load_source(&config.right, &read_fixture(&config.right.file)).unwrap();
    jobrecon_engine::run(&config, &left, &right)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// -------------------------------------------------------------------------
// Job comparison
// -------------------------------------------------------------------------

#[test]
fn october_feed_against_database() {
    let report = load_and_run(&read_fixture("october.recon.toml"));

    assert_eq!(report.meta.config_name, "October close");
    assert_eq!(report.load.left.skipped_lines, 1);
    assert_eq!(report.summary.left_jobs, 11);
    assert_eq!(report.summary.right_jobs, 11);
    assert_eq!(report.summary.union_jobs, 13);
    assert_eq!(report.summary.discrepancies, 5);
    assert_eq!(report.summary.left_only, 2);
    assert_eq!(report.summary.right_only, 1);
    assert_eq!(report.summary.different, 2);

    let order: Vec<&str> = report.discrepancies.iter().map(|d| d.job_id.as_str()).collect();
    assert_eq!(
        order,
        vec!["388972633", "388934314", "397700002", "397576600", "397656424"]
    );
}

#[test]
fn october_signs_are_feed_minus_database() {
    let report = load_and_run(&read_fixture("october.recon.toml"));
    let find = |id: &str| report.discrepancies.iter().find(|d| d.job_id == id).unwrap();

    // Feed-only job: positive
    let st_only = find("388972633");
    assert_eq!(st_only.kind, DiscrepancyKind::LeftOnly);
    assert!(approx(st_only.labor_diff, 704.0));
    assert!(approx(st_only.materials_diff, 98.66));

    // Database-only job: negative
    let db_only = find("397700002");
    assert_eq!(db_only.kind, DiscrepancyKind::RightOnly);
    assert!(approx(db_only.labor_diff, -412.5));
    assert!(approx(db_only.materials_diff, -55.0));

    // Payroll adjustment missing from the database
    let different = find("388934314");
    assert_eq!(different.kind, DiscrepancyKind::Different);
    assert!(approx(different.labor_diff, 628.66));
    assert!(approx(different.materials_diff, 0.0));
}

#[test]
fn october_quiet_jobs_not_reported() {
    let report = load_and_run(&read_fixture("october.recon.toml"));
    let ids: Vec<&str> = report.discrepancies.iter().map(|d| d.job_id.as_str()).collect();

    // Zero-activity database-only job
    assert!(!ids.contains(&"397700001"));
    // Materials off by less than a cent
    assert!(!ids.contains(&"397663774"));
    // Zero-activity job present on both sides
    assert!(!ids.contains(&"389664342"));
}

#[test]
fn october_business_unit_rollup() {
    let report = load_and_run(&read_fixture("october.recon.toml"));
    let units: Vec<&str> = report.by_unit.keys().map(String::as_str).collect();
    assert_eq!(
        units,
        vec![
            "Andy's Painting-Production",
            "Commercial-AZ-Production",
            "Guaranteed Painting-Production",
            "Tucson-Production",
        ]
    );

    let guaranteed = &report.by_unit["Guaranteed Painting-Production"];
    assert_eq!(guaranteed.count, 2);
    assert!(approx(guaranteed.labor_diff, 704.0));
    assert!(approx(guaranteed.materials_diff, 198.66));

    let tucson = &report.by_unit["Tucson-Production"];
    assert_eq!(tucson.count, 1);
    assert!(approx(tucson.labor_diff, -412.5));
}

#[test]
fn reversed_direction_is_database_minus_feed() {
    let config = format!(
        "direction = \"right_minus_left\"\n{}",
        read_fixture("october.recon.toml")
    );
    let report = load_and_run(&config);
    let st_only = report.discrepancies.iter().find(|d| d.job_id == "388972633").unwrap();
    assert!(approx(st_only.labor_diff, -704.0));
    let db_only = report.discrepancies.iter().find(|d| d.job_id == "397700002").unwrap();
    assert!(approx(db_only.labor_diff, 412.5));
}

#[test]
fn wide_tolerance_hides_small_differences() {
    let config = format!("tolerance = 150.0\n{}", read_fixture("october.recon.toml"));
    let report = load_and_run(&config);
    // 397656424 differs by exactly 100.00 in materials
    assert!(report.discrepancies.iter().all(|d| d.job_id != "397656424"));
    assert_eq!(report.summary.different, 1);
}

#[test]
fn report_serializes_to_json() {
    let report = load_and_run(&read_fixture("october.recon.toml"));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["meta"]["direction"], "left_minus_right");
    assert_eq!(json["summary"]["discrepancies"], 5);
    assert_eq!(json["discrepancies"][0]["kind"], "left_only");
    assert!(json["discrepancies"][1]["sides"].is_object());
}

// -------------------------------------------------------------------------
// Identifier reconciliation
// -------------------------------------------------------------------------

#[test]
fn missing_and_extra_ids() {
    let reference = read_id_lines(&read_fixture("st_job_ids.txt"));
    let ours = read_id_csv("ours", &read_fixture("our_job_ids.csv"), "job_id").unwrap();
    assert_eq!(reference.len(), 6);
    assert_eq!(ours.len(), 4);

    let diff = diff_ids(&reference, &ours);
    assert_eq!(diff.missing, vec!["388742795", "388972633", "397576600"]);
    assert_eq!(diff.extra, vec!["397700002"]);
    assert_eq!(diff.missing_file_contents(), "388742795\n388972633\n397576600\n");
}
