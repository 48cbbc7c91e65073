use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::document::{
    convert_package, extract_footnotes, DocxPackage, Footnote, PackageReport, PartReport,
};
use crate::file_utils::FileManager;

// @module: Application controller for document conversion

/// What happened to one input file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// The converted document was written to `output`
    Converted {
        output: PathBuf,
        totals: PartReport,
        failed_parts: usize,
    },
    /// An output already existed and overwriting was not requested
    Skipped { output: PathBuf },
}

/// Counts for a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for document conversion
pub struct Controller {
    // @field: App configuration
    config: Arc<Config>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    // @returns: Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a plain string in the configured direction
    pub fn convert_text(&self, text: &str) -> String {
        self.config.direction.convert(text)
    }

    /// Convert a packaged document held in memory.
    ///
    /// # Arguments
    /// * `bytes` - The `.docx` archive
    ///
    /// # Returns
    /// * `Result<(Vec<u8>, PackageReport)>` - The rewritten archive and what changed
    pub fn convert_bytes(&self, bytes: Vec<u8>) -> Result<(Vec<u8>, PackageReport)> {
        convert_document_bytes(&self.config, bytes)
    }

    /// Extract the footnotes of a document on disk
    pub fn footnotes(&self, input_file: &Path) -> Result<Vec<Footnote>> {
        let package = DocxPackage::open(input_file)
            .with_context(|| format!("Failed to open document: {:?}", input_file))?;
        Ok(extract_footnotes(&package)?)
    }

    /// Convert one document, writing the result into `output_dir`
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<FileOutcome> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let config = Arc::clone(&self.config);
        let outcome = tokio::task::spawn_blocking(move || {
            convert_file(&config, &input_file, &output_dir, force_overwrite)
        })
        .await
        .context("Conversion task panicked")??;

        match &outcome {
            FileOutcome::Converted { output, .. } => {
                info!(
                    "Success: {:?} ({})",
                    output,
                    Self::format_duration(start_time.elapsed())
                );
            }
            FileOutcome::Skipped { output } => {
                warn!("Skipping file, output already exists (use -f to force overwrite): {:?}", output);
            }
        }

        Ok(outcome)
    }

    /// Convert every document under `input_dir`.
    ///
    /// Outputs go next to each input unless `output_dir` is given. Files are
    /// converted concurrently, bounded by the configured limit; a failing file
    /// is logged and counted without stopping the others.
    pub async fn run_folder(
        &self,
        input_dir: PathBuf,
        output_dir: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        let files = FileManager::find_docx_files(&input_dir, &self.config.package.output_suffix)?;
        if files.is_empty() {
            return Err(anyhow!("No .docx files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Converting files");

        let results = stream::iter(files)
            .map(|input_file| {
                let config = Arc::clone(&self.config);
                let target_dir = output_dir
                    .clone()
                    .or_else(|| input_file.parent().map(Path::to_path_buf))
                    .unwrap_or_else(|| input_dir.clone());
                let folder_pb = folder_pb.clone();

                async move {
                    let name = input_file
                        .file_name()
                        .map(|f| f.to_string_lossy().to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    let task_input = input_file.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        convert_file(&config, &task_input, &target_dir, force_overwrite)
                    })
                    .await
                    .map_err(|e| anyhow!("Conversion task panicked: {}", e))
                    .and_then(|result| result);

                    folder_pb.set_message(name.clone());
                    folder_pb.inc(1);
                    (name, result)
                }
            })
            .buffer_unordered(self.config.package.max_concurrent_files)
            .collect::<Vec<_>>()
            .await;

        let mut summary = FolderSummary::default();
        for (name, result) in results {
            match result {
                Ok(FileOutcome::Converted { .. }) => summary.converted += 1,
                Ok(FileOutcome::Skipped { output }) => {
                    debug!("Skipped {}: {:?} exists", name, output);
                    summary.skipped += 1;
                }
                Err(e) => {
                    error!("Error processing file {}: {}", name, e);
                    summary.failed += 1;
                }
            }
        }

        folder_pb.finish_with_message("Folder processing complete");
        info!(
            "Folder processing completed in {}: {} converted, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.converted,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    // @returns: Human-readable duration
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Convert an in-memory archive with the given configuration
pub fn convert_document_bytes(config: &Config, bytes: Vec<u8>) -> Result<(Vec<u8>, PackageReport)> {
    let mut package = DocxPackage::from_bytes(bytes).context("Failed to read document archive")?;
    let report = convert_package(&mut package, &config.package_options(), &config.fonts);
    let output = package.to_bytes().context("Failed to write document archive")?;
    Ok((output, report))
}

fn convert_file(config: &Config, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<FileOutcome> {
    let output = FileManager::generate_output_path(input_file, output_dir, &config.package.output_suffix);
    if output.exists() && !force_overwrite {
        return Ok(FileOutcome::Skipped { output });
    }

    debug!("Converting {:?} ({})", input_file, config.direction);
    let bytes = FileManager::read_bytes(input_file)?;
    let (converted, report) = convert_document_bytes(config, bytes)
        .with_context(|| format!("Failed to convert {:?}", input_file))?;

    let failed = report.failed_parts();
    for part in &failed {
        warn!("{:?}: part left unchanged: {}", input_file, part);
    }

    FileManager::write_atomic(&output, &converted)?;

    Ok(FileOutcome::Converted {
        output,
        totals: report.totals(),
        failed_parts: failed.len(),
    })
}
