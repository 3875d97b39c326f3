use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything gathered from one results directory. Field order is the
/// serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub timestamp: String,
    pub test_summary: TestSummary,
    pub browser_tests: BTreeMap<String, String>,
    pub mobile_tests: BTreeMap<String, String>,
    pub performance: Performance,
    pub pwa: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub success_rate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighthouse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_times: Option<String>,
}

impl Performance {
    pub fn is_empty(&self) -> bool {
        self.lighthouse.is_none() && self.response_times.is_none()
    }

    /// Present blobs in serialized order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(v) = &self.lighthouse {
            out.push(("lighthouse", v.as_str()));
        }
        if let Some(v) = &self.response_times {
            out.push(("response_times", v.as_str()));
        }
        out
    }
}
