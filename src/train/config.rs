//! Training configuration

/// Training loop settings
#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    /// Emit a debug event every N sequences
    pub log_interval: usize,

    /// Keep every step's probability trace in the state
    pub keep_probs: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            log_interval: 100,
            keep_probs: false,
        }
    }
}

impl TrainConfig {
    /// Create a new training configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging interval
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval.max(1);
        self
    }

    /// Keep probability traces in the training state
    pub fn with_probs_history(mut self, keep: bool) -> Self {
        self.keep_probs = keep;
        self
    }
}
