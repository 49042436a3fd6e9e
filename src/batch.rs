//! Directory batch processing.
//!
//! Every PDF in an input directory is turned into a `<stem>.json` outline in
//! an output directory. A file that fails is logged and recorded in the
//! [`BatchReport`]; the rest of the batch still runs.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::Result;
use crate::extract::OutlineExtractor;
use crate::options::OutlineOptions;
use crate::render::{write_json, JsonFormat};

type ProgressFn = Box<dyn Fn(&Path) + Send + Sync>;

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Inputs whose outline was written
    pub processed: Vec<PathBuf>,
    /// Inputs that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Total number of inputs seen.
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs outline extraction over a directory of PDFs.
pub struct BatchProcessor {
    extractor: OutlineExtractor,
    format: JsonFormat,
    parallel: bool,
    progress: Option<ProgressFn>,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(OutlineOptions::default())
    }
}

impl BatchProcessor {
    pub fn new(options: OutlineOptions) -> Self {
        Self {
            extractor: OutlineExtractor::new(options),
            format: JsonFormat::Pretty,
            parallel: false,
            progress: None,
        }
    }

    /// Process files on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// JSON layout of the written files.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Called once per input after it has been handled.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Path) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// PDF files directly inside `input_dir`, sorted by path.
    pub fn pdf_files<P: AsRef<Path>>(&self, input_dir: P) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(input_dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file() && has_pdf_extension(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Output path for an input file.
    pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
        let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
        name.push(".json");
        output_dir.join(name)
    }

    /// Process every PDF in `input_dir`, writing outlines to `output_dir`.
    ///
    /// Only directory-level failures (unreadable input directory, output
    /// directory that cannot be created) are returned as errors.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<BatchReport> {
        let files = self.pdf_files(input_dir)?;
        log::info!("Found {} PDF files", files.len());
        self.run_files(&files, output_dir)
    }

    /// Process an already listed set of files, writing outlines to
    /// `output_dir`. Files are handled in the order given.
    pub fn run_files<Q: AsRef<Path>>(
        &self,
        files: &[PathBuf],
        output_dir: Q,
    ) -> Result<BatchReport> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let results: Vec<(PathBuf, Result<PathBuf>)> = if self.parallel {
            files
                .par_iter()
                .map(|path| (path.clone(), self.process_one(path, output_dir)))
                .collect()
        } else {
            files
                .iter()
                .map(|path| (path.clone(), self.process_one(path, output_dir)))
                .collect()
        };

        let mut report = BatchReport::default();
        for (path, result) in results {
            match result {
                Ok(_) => report.processed.push(path),
                Err(e) => report.failed.push((path, e.to_string())),
            }
        }
        Ok(report)
    }

    /// Extract one file and write its outline.
    ///
    /// When writing fails the partial output file is removed.
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output_dir: Q,
    ) -> Result<PathBuf> {
        let input = input.as_ref();
        let output = Self::output_path(input, output_dir.as_ref());
        let outline = self.extractor.extract_file(input)?;
        let mut writer = BufWriter::new(File::create(&output)?);
        if let Err(e) = write_json(&outline, &mut writer, self.format) {
            // Discard buffered bytes instead of retrying them on drop.
            let (file, _unwritten) = writer.into_parts();
            drop(file);
            if let Err(cleanup) = fs::remove_file(&output) {
                log::warn!("Cannot remove partial output {}: {}", output.display(), cleanup);
            }
            return Err(e);
        }
        Ok(output)
    }

    fn process_one(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        let start = Instant::now();
        log::info!("Processing {}", input.display());

        let result = self.process_file(input, output_dir);
        match &result {
            Ok(output) => log::info!(
                "Processed {} in {:.2} seconds, wrote {}",
                name,
                start.elapsed().as_secs_f64(),
                output.display()
            ),
            Err(e) => log::error!("Error processing {}: {}", name, e),
        }

        if let Some(progress) = &self.progress {
            progress(input);
        }
        result
    }
}
