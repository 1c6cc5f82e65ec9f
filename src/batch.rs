use crate::config::{AssetConfig, LocaleConfig, TargetSize};
use crate::error::{AssetError, Result};
use crate::fit::{self, FitOptions};
use crate::report::{AssetJob, AssetKind, BatchReport};
use crate::scanner;
use std::fs;
use std::path::Path;

const DRY_RUN_REASON: &str = "dry run";

pub struct BatchRunner {
    config: AssetConfig,
    options: FitOptions,
    dry_run: bool,
}

impl BatchRunner {
    pub fn new(config: AssetConfig) -> Self {
        let options = FitOptions {
            background: config.background,
            jpeg_quality: config.jpeg_quality,
        };

        Self {
            config,
            options,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Screenshots for every locale, then the promotional tiles.
    ///
    /// Only output directory creation aborts the run. A locale whose input
    /// directory cannot be listed and a file that fails to convert are
    /// recorded in the report and the batch moves on.
    pub fn run(&self) -> Result<BatchReport> {
        let mut report = BatchReport::new(self.dry_run);
        log::info!(
            "Starting batch in {:?} for {} locale(s)",
            self.config.base_dir,
            self.config.locales.len()
        );

        for locale in &self.config.locales {
            self.process_locale(locale, &mut report)?;
        }

        self.process_promos(&mut report)?;

        report.finish();
        Ok(report)
    }

    fn process_locale(&self, locale: &LocaleConfig, report: &mut BatchReport) -> Result<()> {
        let input_dir = self.config.locale_input_dir(&locale.name);
        let output_dir = self.config.locale_output_dir(&locale.name);

        self.ensure_dir(&output_dir)?;

        let images = match scanner::scan_images(&input_dir) {
            Ok(images) => images,
            Err(e) => {
                log::error!("Skipping locale '{}': {}", locale.name, e);
                println!("❌ Locale {}: {}", locale.name, e);
                report.fail_locale(&locale.name, e.to_string());
                return Ok(());
            }
        };
        log::debug!(
            "Found {} image(s) for '{}' in {:?}",
            images.len(),
            locale.name,
            input_dir
        );

        for source in images {
            let Some(file_name) = source.file_name() else {
                continue;
            };
            let destination = output_dir.join(file_name);
            let job = AssetJob::new(&locale.name, AssetKind::Screenshot, source, destination);
            report.push(self.convert(job, self.config.screenshot_size));
        }

        Ok(())
    }

    fn process_promos(&self, report: &mut BatchReport) -> Result<()> {
        self.ensure_dir(&self.config.promo_dir())?;

        for locale in &self.config.locales {
            let Some(promo_source) = &locale.promo_source else {
                continue;
            };

            let source = self.config.locale_input_dir(&locale.name).join(promo_source);
            let destination = self.config.promo_output_path(&locale.name);
            let mut job = AssetJob::new(&locale.name, AssetKind::PromoTile, source, destination);

            if !job.source.is_file() {
                log::debug!("No promo source for '{}' at {:?}", locale.name, job.source);
                job.skip(format!("promo source not found: {}", job.source.display()));
                report.push(job);
                continue;
            }

            report.push(self.convert(job, self.config.promo_size));
        }

        Ok(())
    }

    fn convert(&self, mut job: AssetJob, target: TargetSize) -> AssetJob {
        if self.dry_run {
            println!(
                "Would process: {} -> {}",
                job.file_name,
                job.destination.display()
            );
            job.skip(DRY_RUN_REASON.to_string());
            return job;
        }

        match fit::process_file(&job.source, &job.destination, target, &self.options) {
            Ok(outcome) => {
                println!(
                    "✓ Processed: {} -> {}",
                    job.file_name,
                    job.destination.display()
                );
                job.complete(Some(outcome.fitted_size));
            }
            Err(e) => {
                log::error!("Failed to process {:?}: {}", job.source, e);
                println!("❌ Failed: {} ({})", job.file_name, e);
                job.fail(e.to_string());
            }
        }
        job
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if self.dry_run || dir.is_dir() {
            return Ok(());
        }
        log::debug!("Creating {:?}", dir);
        fs::create_dir_all(dir).map_err(|e| AssetError::io(dir, e))
    }
}
