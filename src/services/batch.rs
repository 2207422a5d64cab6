//! Batch recoloring: file discovery, per-image processing and a bounded
//! worker pool.
//!
//! Every image is independent. Work runs on tokio's blocking pool with
//! admission bounded by a semaphore; a failing image is logged, recorded in
//! the [`BatchSummary`] and the batch carries on.

use crate::error::ImageError;
use crate::rendering::{decode_image, save_image};
use palette_match::Recolorer;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// One input file and where its result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Find images under `input_dir` and map each to a mirrored path under
/// `output_dir`.
///
/// A file qualifies when its lower-cased extension is in `extensions`.
/// Jobs are sorted by input path.
pub fn discover_images(
    input_dir: &Path,
    output_dir: &Path,
    recursive: bool,
    extensions: &[String],
) -> std::io::Result<Vec<BatchJob>> {
    let extensions: Vec<String> = extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect();

    let mut files = Vec::new();
    collect_files(input_dir, recursive, &mut files)?;
    files.retain(|path| {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.contains(&e.to_ascii_lowercase()))
    });
    files.sort();

    Ok(files
        .into_iter()
        .map(|input| {
            let rel = input.strip_prefix(input_dir).unwrap_or(&input);
            let output = output_dir.join(rel);
            BatchJob { input, output }
        })
        .collect())
}

fn collect_files(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // file_type() does not follow symlinks; linked directories are skipped
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if recursive {
                collect_files(&path, recursive, files)?;
            }
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            files.push(path);
        }
    }
    Ok(())
}

/// Decodes, recolors and saves single images.
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    recolorer: Recolorer,
    optimize: bool,
}

impl ImageProcessor {
    pub fn new(recolorer: Recolorer, optimize: bool) -> Self {
        Self {
            recolorer,
            optimize,
        }
    }

    pub fn recolorer(&self) -> &Recolorer {
        &self.recolorer
    }

    /// Recolor `input` into `output`, creating parent directories.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<(), ImageError> {
        let image = decode_image(input)?;
        let recolored = self.recolorer.recolor(&image)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        save_image(&recolored, output, self.optimize)?;

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            width = image.width(),
            height = image.height(),
            alpha = image.has_alpha(),
            "Recolored file"
        );
        Ok(())
    }
}

/// A file that could not be recolored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a batch run. Serializes as the `--report` JSON document.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Sorted by path
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    fn record_failure(&mut self, path: PathBuf, error: String) {
        self.failed += 1;
        self.failures.push(BatchFailure { path, error });
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_report(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json)
    }
}

/// Runs batch jobs on the blocking pool, at most `jobs` at a time.
pub struct BatchRunner {
    processor: Arc<ImageProcessor>,
    jobs: usize,
}

impl BatchRunner {
    pub fn new(processor: ImageProcessor, jobs: usize) -> Self {
        Self {
            processor: Arc::new(processor),
            jobs: jobs.max(1),
        }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Process every job and tally the results.
    pub async fn run(&self, jobs: Vec<BatchJob>) -> BatchSummary {
        let total = jobs.len();
        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let mut set = JoinSet::new();

        tracing::info!(images = total, workers = self.jobs, "Processing batch");

        for job in jobs {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    tracing::error!(%e, "Worker pool closed");
                    break;
                }
            };
            let processor = self.processor.clone();
            set.spawn(async move {
                let input = job.input.clone();
                let result = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    processor.process_file(&job.input, &job.output)
                })
                .await;
                (input, result)
            });
        }

        let mut summary = BatchSummary::default();
        while let Some(joined) = set.join_next().await {
            let done = summary.total() + 1;
            match joined {
                Ok((path, Ok(Ok(())))) => {
                    summary.succeeded += 1;
                    tracing::info!(done, total, path = %path.display(), "Recolored");
                }
                Ok((path, Ok(Err(e)))) => {
                    tracing::warn!(done, total, path = %path.display(), %e, "Failed to recolor");
                    summary.record_failure(path, e.to_string());
                }
                Ok((path, Err(e))) => {
                    tracing::error!(path = %path.display(), %e, "Worker panicked");
                    summary.record_failure(path, format!("worker failed: {e}"));
                }
                Err(e) => {
                    tracing::error!(%e, "Batch task failed");
                    summary.record_failure(PathBuf::new(), format!("task failed: {e}"));
                }
            }
        }

        summary.failures.sort_by(|a, b| a.path.cmp(&b.path));
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_match::Palette;
    use pretty_assertions::assert_eq;

    fn extensions() -> Vec<String> {
        vec!["png".to_string(), "jpg".to_string()]
    }

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_discover_flat() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        touch(&input.join("b.png"));
        touch(&input.join("a.PNG"));
        touch(&input.join("c.jpg"));
        touch(&input.join("notes.txt"));
        touch(&input.join("sub/d.png"));

        let jobs = discover_images(&input, Path::new("/out"), false, &extensions()).unwrap();
        let inputs: Vec<_> = jobs.iter().map(|j| j.input.strip_prefix(&input).unwrap()).collect();
        assert_eq!(
            inputs,
            vec![Path::new("a.PNG"), Path::new("b.png"), Path::new("c.jpg")]
        );
        assert_eq!(jobs[0].output, Path::new("/out/a.PNG"));
    }

    #[test]
    fn test_discover_recursive_mirrors_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        touch(&input.join("top.png"));
        touch(&input.join("sub/deeper/inner.jpg"));

        let jobs = discover_images(&input, Path::new("/out"), true, &extensions()).unwrap();
        let outputs: Vec<_> = jobs.iter().map(|j| j.output.clone()).collect();
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("/out/sub/deeper/inner.jpg"),
                PathBuf::from("/out/top.png"),
            ]
        );
    }

    #[test]
    fn test_discover_skips_directories_named_like_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("folder.png")).unwrap();

        let jobs = discover_images(dir.path(), Path::new("/out"), true, &extensions()).unwrap();
        assert!(jobs.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_does_not_follow_directory_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        touch(&input.join("a.png"));
        std::os::unix::fs::symlink(&input, input.join("loop")).unwrap();
        std::os::unix::fs::symlink(input.join("a.png"), input.join("alias.png")).unwrap();

        let jobs = discover_images(&input, Path::new("/out"), true, &extensions()).unwrap();
        let outputs: Vec<_> = jobs.iter().map(|j| j.output.clone()).collect();
        assert_eq!(
            outputs,
            vec![PathBuf::from("/out/a.png"), PathBuf::from("/out/alias.png")]
        );
    }

    #[test]
    fn test_discover_missing_dir() {
        assert!(discover_images(Path::new("/nonexistent"), Path::new("/out"), false, &extensions())
            .is_err());
    }

    #[test]
    fn test_summary_report_json() {
        let summary = BatchSummary {
            succeeded: 2,
            failed: 1,
            failures: vec![BatchFailure {
                path: PathBuf::from("in/bad.png"),
                error: "Decode error: bad".to_string(),
            }],
        };
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "succeeded": 2,
                "failed": 1,
                "failures": [{ "path": "in/bad.png", "error": "Decode error: bad" }]
            })
        );
        assert!(!summary.is_success());
        assert_eq!(summary.total(), 3);
    }

    #[tokio::test]
    async fn test_runner_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = vec![
            BatchJob {
                input: dir.path().join("missing-b.png"),
                output: dir.path().join("out/b.png"),
            },
            BatchJob {
                input: dir.path().join("missing-a.png"),
                output: dir.path().join("out/a.png"),
            },
        ];
        let palette = Palette::from_hex(&["#000000"]).unwrap();
        let runner = BatchRunner::new(ImageProcessor::new(Recolorer::new(palette), false), 0);
        assert_eq!(runner.jobs(), 1);

        let summary = runner.run(jobs).await;
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.failures[0].path, dir.path().join("missing-a.png"));
        assert!(summary.failures[0].error.starts_with("IO error"));
    }

    #[tokio::test]
    async fn test_runner_empty_batch() {
        let palette = Palette::from_hex(&["#000000"]).unwrap();
        let runner = BatchRunner::new(ImageProcessor::new(Recolorer::new(palette), false), 4);
        assert_eq!(runner.run(Vec::new()).await, BatchSummary::default());
    }
}
