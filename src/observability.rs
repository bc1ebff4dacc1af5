//! Pipeline statistics for end-of-run reporting.

use std::fmt;

/// Counters collected while a stream is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Records turned into edges and pushed through the window
    pub records: u64,

    /// Records older than the window's lower bound on arrival
    pub stale_dropped: u64,

    /// Edges that entered the window
    pub activations: u64,

    /// Edges evicted by window advances
    pub evictions: u64,

    /// Outputs produced while the window held no nodes
    pub empty_outputs: u64,

    /// Most distinct active edges seen at once
    pub peak_active_edges: usize,

    /// Most nodes with positive degree seen at once
    pub peak_nodes: usize,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one processed record into the counters.
    pub fn record_event(&mut self, observation: EventObservation) {
        self.records += 1;
        if observation.stale {
            self.stale_dropped += 1;
        }
        self.activations += observation.activations as u64;
        self.evictions += observation.evictions as u64;
        if !observation.has_median {
            self.empty_outputs += 1;
        }
        self.peak_active_edges = self.peak_active_edges.max(observation.active_edges);
        self.peak_nodes = self.peak_nodes.max(observation.nodes);
    }
}

/// What one record did to the pipeline state.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventObservation {
    pub stale: bool,
    pub activations: usize,
    pub evictions: usize,
    pub has_median: bool,
    pub active_edges: usize,
    pub nodes: usize,
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "records={} stale_dropped={} activations={} evictions={} empty_outputs={} peak_active_edges={} peak_nodes={}",
            self.records,
            self.stale_dropped,
            self.activations,
            self.evictions,
            self.empty_outputs,
            self.peak_active_edges,
            self.peak_nodes
        )
    }
}
