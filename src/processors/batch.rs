use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::engine::{process_path, DefaultEngine};
use crate::core::{Error, ProcessingStats, Recipe, ResizeAlgorithm, Result};
use crate::utils::is_supported_format;

/// Applies one recipe to every image file under a directory.
///
/// Each file runs through a fresh engine invocation; workers share nothing
/// but the immutable recipe, so per-file failures are isolated and land in
/// the aggregate stats instead of aborting the run.
pub struct BatchProcessor {
    recipe: Recipe,
    algorithm: ResizeAlgorithm,
    optimize_png: bool,
    thread_pool: Option<rayon::ThreadPool>,
}

impl BatchProcessor {
    /// `max_threads = 0` uses the global rayon pool; anything else builds a
    /// dedicated pool of that size.
    pub fn new(recipe: Recipe, max_threads: usize) -> Result<Self> {
        let thread_pool = if max_threads > 0 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(max_threads)
                    .build()
                    .map_err(|e| Error::Processing(format!("failed to create thread pool: {}", e)))?,
            )
        } else {
            None
        };

        Ok(Self {
            recipe,
            algorithm: ResizeAlgorithm::default(),
            optimize_png: false,
            thread_pool,
        })
    }

    pub fn with_algorithm(mut self, algorithm: ResizeAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        recursive: bool,
    ) -> Result<ProcessingStats> {
        self.validate_paths(input_dir, output_dir)?;

        let image_paths = self.collect_image_paths(input_dir, recursive);

        if image_paths.is_empty() {
            log::warn!("no image files found in {}", input_dir.display());
            return Ok(ProcessingStats::default());
        }

        log::info!(
            "processing {} images from {}",
            image_paths.len(),
            input_dir.display()
        );

        std::fs::create_dir_all(output_dir)?;

        let pb = self.create_progress_bar(image_paths.len());
        let output_dir = Arc::new(output_dir.to_path_buf());

        let results: Vec<(PathBuf, Result<u64>)> = if let Some(pool) = &self.thread_pool {
            pool.install(|| {
                image_paths
                    .par_iter()
                    .progress_with(pb.clone())
                    .map(|input_path| {
                        (
                            input_path.clone(),
                            self.process_single_in_batch(input_path, &output_dir),
                        )
                    })
                    .collect()
            })
        } else {
            image_paths
                .par_iter()
                .progress_with(pb.clone())
                .map(|input_path| {
                    (
                        input_path.clone(),
                        self.process_single_in_batch(input_path, &output_dir),
                    )
                })
                .collect()
        };

        let mut stats = ProcessingStats::default();
        for (input_path, result) in results {
            match result {
                Ok(output_size) => {
                    stats.processed_count += 1;
                    stats.total_size_before += input_path.metadata().map(|m| m.len()).unwrap_or(0);
                    stats.total_size_after += output_size;
                }
                Err(e) => {
                    stats
                        .errors
                        .push((input_path.display().to_string(), e.to_string()));
                }
            }
        }

        pb.finish_with_message(format!(
            "processed {} images, {} failed",
            stats.processed_count,
            stats.errors.len()
        ));

        Ok(stats)
    }

    /// One source file, one fresh engine invocation. Returns the artifact
    /// size on disk.
    fn process_single_in_batch(&self, input_path: &Path, output_dir: &Arc<PathBuf>) -> Result<u64> {
        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                Error::InvalidParameter(format!("invalid file name: {}", input_path.display()))
            })?;

        let engine = DefaultEngine::new()
            .with_algorithm(self.algorithm)
            .with_png_optimization(self.optimize_png);
        let artifact = process_path(&engine, input_path, &self.recipe)?;

        // the synthetic artifact name is just ".ext"; prepend the stem
        let output_path = output_dir.join(format!("{}{}", stem, artifact.file_name));
        std::fs::write(&output_path, &artifact.bytes)?;

        Ok(artifact.bytes.len() as u64)
    }

    fn collect_image_paths(&self, input_dir: &Path, recursive: bool) -> Vec<PathBuf> {
        let walker = if recursive {
            WalkDir::new(input_dir)
        } else {
            WalkDir::new(input_dir).max_depth(1)
        };

        walker
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| is_supported_format(entry.path()))
            .map(|entry| entry.into_path())
            .collect()
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    }

    fn validate_paths(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if !input_dir.exists() {
            return Err(Error::InvalidParameter(format!(
                "input directory does not exist: {}",
                input_dir.display()
            )));
        }

        if !input_dir.is_dir() {
            return Err(Error::InvalidParameter(format!(
                "input path is not a directory: {}",
                input_dir.display()
            )));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(Error::InvalidParameter(format!(
                "output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        if input_dir == output_dir {
            return Err(Error::InvalidParameter(
                "input and output directories cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}
