use crate::error::{AssetError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AssetKind {
    Screenshot,
    PromoTile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum JobStatus {
    Pending,
    Processed,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetJob {
    pub locale: String,
    pub kind: AssetKind,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub file_name: String,
    pub status: JobStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub fitted_size: Option<(u32, u32)>,
}

impl AssetJob {
    pub fn new(locale: &str, kind: AssetKind, source: PathBuf, destination: PathBuf) -> Self {
        let file_name = source
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Self {
            locale: locale.to_string(),
            kind,
            source,
            destination,
            file_name,
            status: JobStatus::Pending,
            started_at: Utc::now(),
            finished_at: None,
            fitted_size: None,
        }
    }

    pub fn complete(&mut self, fitted_size: Option<(u32, u32)>) {
        self.status = JobStatus::Processed;
        self.fitted_size = fitted_size;
        self.finished_at = Some(Utc::now());
    }

    pub fn skip(&mut self, reason: String) {
        self.status = JobStatus::Skipped(reason);
        self.finished_at = Some(Utc::now());
    }

    pub fn fail(&mut self, error: String) {
        self.status = JobStatus::Failed(error);
        self.finished_at = Some(Utc::now());
    }
}

/// A locale whose batch could not run at all, e.g. its input directory is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleFailure {
    pub locale: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub dry_run: bool,
    pub jobs: Vec<AssetJob>,
    pub locale_failures: Vec<LocaleFailure>,
}

impl BatchReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            dry_run,
            jobs: Vec::new(),
            locale_failures: Vec::new(),
        }
    }

    pub fn push(&mut self, job: AssetJob) {
        self.jobs.push(job);
    }

    pub fn fail_locale(&mut self, locale: &str, error: String) {
        self.locale_failures.push(LocaleFailure {
            locale: locale.to_string(),
            error,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn processed(&self) -> Vec<&AssetJob> {
        self.jobs
            .iter()
            .filter(|job| matches!(job.status, JobStatus::Processed))
            .collect()
    }

    pub fn skipped(&self) -> Vec<&AssetJob> {
        self.jobs
            .iter()
            .filter(|job| matches!(job.status, JobStatus::Skipped(_)))
            .collect()
    }

    pub fn failed(&self) -> Vec<&AssetJob> {
        self.jobs
            .iter()
            .filter(|job| matches!(job.status, JobStatus::Failed(_)))
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.locale_failures.is_empty() || !self.failed().is_empty()
    }

    pub fn get_stats(&self) -> BatchStats {
        BatchStats {
            total: self.jobs.len(),
            processed: self.processed().len(),
            skipped: self.skipped().len(),
            failed: self.failed().len(),
            failed_locales: self.locale_failures.len(),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| AssetError::io(path, e))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failed_locales: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn job(name: &str) -> AssetJob {
        AssetJob::new(
            "en",
            AssetKind::Screenshot,
            PathBuf::from("in").join(name),
            PathBuf::from("out").join(name),
        )
    }

    #[test]
    fn test_job_lifecycle() {
        let mut item = job("a.png");
        assert_eq!(item.file_name, "a.png");
        assert_eq!(item.status, JobStatus::Pending);
        assert!(item.finished_at.is_none());

        item.complete(Some((1280, 720)));
        assert_eq!(item.status, JobStatus::Processed);
        assert_eq!(item.fitted_size, Some((1280, 720)));
        assert!(item.finished_at.unwrap() >= item.started_at);
    }

    #[test]
    fn test_stats() {
        let mut report = BatchReport::new(false);
        let mut a = job("a.png");
        a.complete(None);
        let mut b = job("b.png");
        b.fail("corrupt".to_string());
        let mut c = job("c.png");
        c.skip("missing".to_string());
        report.push(a);
        report.push(b);
        report.push(c);

        assert_eq!(
            report.get_stats(),
            BatchStats {
                total: 3,
                processed: 1,
                skipped: 1,
                failed: 1,
                failed_locales: 0,
            }
        );
        assert!(report.has_failures());
    }

    #[test]
    fn test_locale_failure_counts_as_failure() {
        let mut report = BatchReport::new(false);
        assert!(!report.has_failures());
        report.fail_locale("zh_CN", "missing input".to_string());
        assert!(report.has_failures());
        assert_eq!(report.get_stats().failed_locales, 1);
    }

    #[test]
    fn test_write_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut report = BatchReport::new(true);
        report.push(job("a.png"));
        report.finish();
        report.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["dry_run"], true);
        assert_eq!(value["jobs"][0]["file_name"], "a.png");
        assert_eq!(value["jobs"][0]["kind"], "Screenshot");
    }
}
