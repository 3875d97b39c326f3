use crate::{
    config::Config,
    policy,
    render::{self, Rendered},
    report::{Performance, ReportRecord},
    util::{now_rfc3339, read_trimmed, write_file},
};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct ReportAggregator {
    cfg: Config,
}

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub text: PathBuf,
}

impl ReportAggregator {
    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    pub fn run(&self, results_dir: &Path) -> Result<ReportPaths> {
        let record = self.collect(results_dir)?;
        info!(
            "summary total={} passed={} failed={} success_rate={}",
            record.test_summary.total_tests,
            record.test_summary.passed_tests,
            record.test_summary.failed_tests,
            record.test_summary.success_rate
        );
        let rendered = self.render(&record)?;
        self.write(results_dir, &rendered)
    }

    pub fn collect(&self, results_dir: &Path) -> Result<ReportRecord> {
        let layout = &self.cfg.layout;
        let mut browser_tests = BTreeMap::new();
        let mut mobile_tests = BTreeMap::new();

        for (name, dir) in list_subdirs(results_dir)? {
            if layout.browsers.iter().any(|b| *b == name) {
                let value = match read_trimmed(&dir.join(&layout.result_file))? {
                    Some(v) => v,
                    None => {
                        debug!("browser {name} has no {}; defaulting", layout.result_file);
                        self.cfg.policy.browser_default.clone()
                    }
                };
                browser_tests.insert(name, value);
            } else if name.starts_with(layout.mobile_prefix.as_str()) {
                match read_trimmed(&dir.join(&layout.result_file))? {
                    Some(v) => {
                        mobile_tests.insert(name, v);
                    }
                    None => debug!("mobile {name} has no {}; skipped", layout.result_file),
                }
            } else {
                debug!("ignoring directory {name}");
            }
        }

        let performance = self.collect_performance(results_dir)?;
        let pwa = self.collect_pwa(results_dir)?;

        // Performance blobs are informational and never counted.
        let test_summary = policy::summarize(
            &self.cfg,
            browser_tests
                .values()
                .chain(mobile_tests.values())
                .chain(pwa.values())
                .map(String::as_str),
        );

        let record = ReportRecord {
            timestamp: now_rfc3339(),
            test_summary,
            browser_tests,
            mobile_tests,
            performance,
            pwa,
        };

        debug!(
            browsers = record.browser_tests.len(),
            mobile = record.mobile_tests.len(),
            pwa = record.pwa.len(),
            performance = !record.performance.is_empty(),
            "collected results from {}",
            results_dir.display()
        );
        Ok(record)
    }

    pub fn render(&self, record: &ReportRecord) -> Result<Rendered> {
        render::render(&self.cfg, record)
    }

    /// Overwrites both report files under `results_dir`.
    pub fn write(&self, results_dir: &Path, rendered: &Rendered) -> Result<ReportPaths> {
        let paths = ReportPaths {
            json: results_dir.join(&self.cfg.output.json_filename),
            text: results_dir.join(&self.cfg.output.text_filename),
        };
        write_file(&paths.json, &rendered.json)?;
        write_file(&paths.text, &rendered.text)?;
        info!(
            "wrote {} and {}",
            paths.json.display(),
            paths.text.display()
        );
        Ok(paths)
    }

    fn collect_performance(&self, results_dir: &Path) -> Result<Performance> {
        let layout = &self.cfg.layout;
        let perf_dir = results_dir.join(&layout.performance_dir);
        if !perf_dir.is_dir() {
            return Ok(Performance::default());
        }
        Ok(Performance {
            lighthouse: read_trimmed(&perf_dir.join(&layout.lighthouse_file))?,
            response_times: read_trimmed(&perf_dir.join(&layout.response_times_file))?,
        })
    }

    fn collect_pwa(&self, results_dir: &Path) -> Result<BTreeMap<String, String>> {
        let layout = &self.cfg.layout;
        let mut pwa = BTreeMap::new();
        let pwa_dir = results_dir.join(&layout.pwa_dir);
        if !pwa_dir.is_dir() {
            return Ok(pwa);
        }
        for check in &layout.pwa_checks {
            let file = format!("{check}{}", layout.pwa_result_suffix);
            if let Some(v) = read_trimmed(&pwa_dir.join(&file))? {
                pwa.insert(check.clone(), v);
            }
        }
        Ok(pwa)
    }
}

/// Immediate subdirectories of `root`, sorted by name.
fn list_subdirs(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("reading results directory: {}", root.display()))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("reading results directory: {}", root.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => out.push((name, path)),
            Err(raw) => warn!("skipping non UTF-8 directory name: {:?}", raw),
        }
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}
