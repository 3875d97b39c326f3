use qa_report::{aggregator::ReportAggregator, config::Config, report::ReportRecord};
use std::fs;
use tempfile::TempDir;

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("chrome")).unwrap();
    fs::create_dir_all(root.join("mobile-ios")).unwrap();
    fs::write(root.join("mobile-ios/result.txt"), "PASS: all good").unwrap();
    fs::create_dir_all(root.join("performance")).unwrap();
    fs::write(root.join("performance/scores.txt"), "perf: 90\nseo: 100").unwrap();
    dir
}

#[test]
fn run_writes_both_reports() {
    let dir = fixture();
    let paths = ReportAggregator::new(&Config::default())
        .run(dir.path())
        .unwrap();

    assert_eq!(paths.json, dir.path().join("test-report.json"));
    assert_eq!(paths.text, dir.path().join("test-report.txt"));

    let record: ReportRecord =
        serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
    assert_eq!(record.test_summary.total_tests, 2);
    assert_eq!(record.test_summary.success_rate, "100.0%");

    let text = fs::read_to_string(&paths.text).unwrap();
    assert!(text.contains("  chrome: COMPLETED\n"));
    assert!(text.contains("    perf: 90\n    seo: 100\n"));
}

#[test]
fn rerun_overwrites_and_is_stable() {
    let dir = fixture();
    let agg = ReportAggregator::new(&Config::default());
    fs::write(dir.path().join("test-report.txt"), "stale").unwrap();

    let paths = agg.run(dir.path()).unwrap();
    let first = fs::read_to_string(&paths.text).unwrap();
    agg.run(dir.path()).unwrap();
    let second = fs::read_to_string(&paths.text).unwrap();

    let strip = |s: &str| {
        s.lines()
            .filter(|l| !l.starts_with("Test run time:"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert!(!first.contains("stale"));
    assert_eq!(strip(&first), strip(&second));
}

#[test]
fn configured_output_names() {
    let dir = fixture();
    let mut cfg = Config::default();
    cfg.output.json_filename = "qa.json".into();
    cfg.output.text_filename = "qa.txt".into();

    ReportAggregator::new(&cfg).run(dir.path()).unwrap();
    assert!(dir.path().join("qa.json").is_file());
    assert!(dir.path().join("qa.txt").is_file());
    assert!(!dir.path().join("test-report.json").exists());
}

#[test]
fn missing_root_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("results");

    assert!(ReportAggregator::new(&Config::default()).run(&missing).is_err());
    assert!(!missing.exists());
}
