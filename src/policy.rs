use crate::{config::Config, report::TestSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

/// An entry passes when any configured marker occurs anywhere in it.
pub fn classify(cfg: &Config, result: &str) -> Outcome {
    let passed = cfg
        .policy
        .pass_markers
        .iter()
        .any(|m| !m.is_empty() && result.contains(m.as_str()));
    if passed {
        Outcome::Passed
    } else {
        Outcome::Failed
    }
}

pub fn summarize<'a, I>(cfg: &Config, results: I) -> TestSummary
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total_tests = 0usize;
    let mut passed_tests = 0usize;
    for r in results {
        total_tests += 1;
        if classify(cfg, r) == Outcome::Passed {
            passed_tests += 1;
        }
    }

    TestSummary {
        total_tests,
        passed_tests,
        failed_tests: total_tests - passed_tests,
        success_rate: success_rate(passed_tests, total_tests),
    }
}

pub fn success_rate(passed: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", passed as f64 / total as f64 * 100.0)
}
