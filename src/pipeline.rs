//! Median-Degree Pipeline
//!
//! Strictly sequential fold over the event stream:
//!
//! ```text
//!  raw line -> EdgeReader -> WindowCache::update -> EdgeDiff
//!                                                      |
//!                      output line <- format <- DegreeReducer::update
//! ```
//!
//! Each record is fully reduced and written before the next one is read.
//! The first input or consistency error aborts the run.

use crate::config::PipelineConfig;
use crate::datasource::EdgeReader;
use crate::error::{DegreeError, DegreeResult};
use crate::format::format_output;
use crate::observability::{EventObservation, PipelineStats};
use crate::reducer::DegreeReducer;
use crate::window::{Edge, WindowCache, WindowPosition};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};

/// One window cache and one degree reducer driven by a single stream.
pub struct MedianDegreePipeline {
    config: PipelineConfig,
    cache: WindowCache<String>,
    reducer: DegreeReducer<String>,
    stats: PipelineStats,
}

impl MedianDegreePipeline {
    /// Validate `config` and build an empty pipeline.
    pub fn new(config: PipelineConfig) -> DegreeResult<Self> {
        config.validate()?;
        let cache = WindowCache::new(config.window_size)?;
        Ok(Self {
            config,
            cache,
            reducer: DegreeReducer::new(),
            stats: PipelineStats::new(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cache(&self) -> &WindowCache<String> {
        &self.cache
    }

    pub fn reducer(&self) -> &DegreeReducer<String> {
        &self.reducer
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Push one edge through the window and return the median degree after it.
    ///
    /// `None` means no node is active, which is distinct from a median of 0.
    pub fn process_edge(&mut self, edge: &Edge<String>) -> DegreeResult<Option<f64>> {
        let position = self.cache.classify(edge.timestamp);
        let diff = self.cache.update(edge);
        if !diff.is_empty() {
            debug!("diff: {}", diff);
        }

        let median = self.reducer.update(&diff)?;
        debug!("output (median degree): {:?}", median);

        self.stats.record_event(EventObservation {
            stale: position == WindowPosition::Behind,
            activations: diff.activations(),
            evictions: diff.evictions(),
            has_median: median.is_some(),
            active_edges: self.cache.active_edges(),
            nodes: self.reducer.node_count(),
        });
        Ok(median)
    }

    /// Read JSON-lines events from `reader` and write one formatted median per
    /// event to `writer`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        mut writer: W,
    ) -> DegreeResult<PipelineStats> {
        let edges = EdgeReader::new(reader, self.config.fields.clone());
        for record in edges {
            let edge = record?;
            let median = self.process_edge(&edge)?;
            if median.is_none() {
                warn!(
                    "no active nodes after edge {} -> {} at {}, writing '{}'",
                    edge.a, edge.b, edge.timestamp, self.config.no_data_output
                );
            }

            writeln!(writer, "{}", format_output(median, &self.config.no_data_output))
                .map_err(|e| DegreeError::io(e, "write median"))?;
        }
        writer.flush().map_err(|e| DegreeError::io(e, "flush output"))?;

        info!("window {}s: {}", self.config.window_size, self.stats);
        Ok(self.stats.clone())
    }

    /// Run over the configured input and output files.
    ///
    /// The output's parent directory is created when missing.
    pub fn run_files(&mut self) -> DegreeResult<PipelineStats> {
        let input = self.config.input.clone();
        let output = self.config.output.clone();
        info!(
            "median degree: {} -> {} (window {}s)",
            input.display(),
            output.display(),
            self.config.window_size
        );

        let reader = File::open(&input)
            .map(BufReader::new)
            .map_err(|e| DegreeError::io(e, format!("open input {}", input.display())))?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DegreeError::io(e, format!("create output directory {}", parent.display()))
            })?;
        }
        let writer = File::create(&output)
            .map(BufWriter::new)
            .map_err(|e| DegreeError::io(e, format!("create output {}", output.display())))?;

        self.run(reader, writer)
    }
}
