use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub report: Report,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw)
            .with_context(|| format!("parsing TOML: {}", path.display()))?;
        Ok(cfg)
    }
}

/// Directory and file naming conventions used by the external test runners.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub browsers: Vec<String>,
    pub mobile_prefix: String,
    pub result_file: String,
    pub performance_dir: String,
    pub lighthouse_file: String,
    pub response_times_file: String,
    pub pwa_dir: String,
    pub pwa_checks: Vec<String>,
    pub pwa_result_suffix: String,
}
impl Default for Layout {
    fn default() -> Self {
        Self {
            browsers: vec!["chrome".into(), "firefox".into(), "edge".into()],
            mobile_prefix: "mobile-".into(),
            result_file: "result.txt".into(),
            performance_dir: "performance".into(),
            lighthouse_file: "scores.txt".into(),
            response_times_file: "response-times.txt".into(),
            pwa_dir: "pwa".into(),
            pwa_checks: vec!["manifest".into(), "sw".into()],
            pwa_result_suffix: "-result.txt".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Value recorded for a browser directory that has no result file.
    pub browser_default: String,
    /// Case-sensitive substrings that mark an entry as passed.
    pub pass_markers: Vec<String>,
}
impl Default for Policy {
    fn default() -> Self {
        Self {
            browser_default: "COMPLETED".into(),
            pass_markers: vec!["PASS".into(), "COMPLETED".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Output {
    pub json_filename: String,
    pub text_filename: String,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            json_filename: "test-report.json".into(),
            text_filename: "test-report.txt".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Report {
    pub title: String,
}
impl Default for Report {
    fn default() -> Self {
        Self {
            title: "TODO-LIST Mobile QA Test Results".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
