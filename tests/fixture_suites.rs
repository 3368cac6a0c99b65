//! Runs every YAML suite under tests/suites through the fixture harness.

use std::path::PathBuf;

use jobsafe::test_harness::{collect_results, partition_results, HarnessConfig, TestResult};

#[test]
fn all_fixture_suites_pass() {
    let config = HarnessConfig {
        suite_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/suites"),
        use_colors: false,
    };
    let results = collect_results(None, &config);
    let failures: Vec<&TestResult> = results
        .iter()
        .filter(|r| matches!(r, TestResult::Fail { .. }))
        .collect();
    assert!(failures.is_empty(), "{:#?}", failures);

    let summary = partition_results(&results);
    assert!(summary.passed >= 10, "only {} cases ran", summary.passed);
}
