//! Explicit diagnostics components.
//!
//! One-shot warnings and timing aggregation are injected components with an
//! owned lifecycle, never ambient module state, so nothing leaks across
//! concurrent runs and tests can assert on what was emitted.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use tracing::{info, warn};

/// Warn-once registry. Repeat warnings for the same key are suppressed for
/// the lifetime of the component, not the process.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warned: Mutex<HashSet<String>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `message` at warn level the first time `key` is seen.
    pub fn warn_once(&self, key: &str, message: &str) {
        let mut warned = self.warned.lock().unwrap_or_else(|e| e.into_inner());
        if warned.insert(key.to_string()) {
            warn!(key = %key, "{}", message);
        }
    }

    #[cfg(test)]
    pub fn warned_keys(&self) -> Vec<String> {
        let warned = self.warned.lock().unwrap_or_else(|e| e.into_inner());
        warned.iter().cloned().collect()
    }
}

/// One recorded timing sample.
#[derive(Debug, Clone)]
struct Sample {
    operation: String,
    duration: Duration,
}

/// Timing recorder with an explicit lifecycle.
///
/// Owned by the process bootstrap: `start()` before use, `stop()` on
/// shutdown (which flushes whatever is buffered). Samples also flush when
/// the buffer reaches `flush_threshold`. No background timer exists.
#[derive(Debug)]
pub struct PerformanceRecorder {
    samples: Mutex<Vec<Sample>>,
    flush_threshold: usize,
    running: std::sync::atomic::AtomicBool,
}

impl PerformanceRecorder {
    pub fn new(flush_threshold: usize) -> Self {
        Self {
            samples: Mutex::new(Vec::new()),
            flush_threshold: flush_threshold.max(1),
            running: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn start(&self) {
        self.running
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.running
            .store(false, std::sync::atomic::Ordering::SeqCst);
        self.flush();
    }

    /// Record a timing. Dropped silently when the recorder is not running.
    pub fn record(&self, operation: &str, duration: Duration) {
        if !self.running.load(std::sync::atomic::Ordering::SeqCst) {
            return;
        }

        let should_flush = {
            let mut samples = self.samples.lock().unwrap_or_else(|e| e.into_inner());
            samples.push(Sample {
                operation: operation.to_string(),
                duration,
            });
            samples.len() >= self.flush_threshold
        };

        if should_flush {
            self.flush();
        }
    }

    /// Emit buffered samples as one aggregate log line per operation.
    pub fn flush(&self) {
        let samples: Vec<Sample> = {
            let mut buffer = self.samples.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            return;
        }

        let mut by_operation: std::collections::HashMap<String, (usize, Duration)> =
            std::collections::HashMap::new();
        for sample in samples {
            let entry = by_operation
                .entry(sample.operation)
                .or_insert((0, Duration::ZERO));
            entry.0 += 1;
            entry.1 += sample.duration;
        }

        for (operation, (count, total)) in by_operation {
            info!(
                operation = %operation,
                count,
                avg_ms = (total.as_millis() as u64) / count as u64,
                "Timing flush"
            );
        }
    }

    #[cfg(test)]
    pub fn buffered(&self) -> usize {
        self.samples.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warn_once_deduplicates_by_key() {
        let diagnostics = Diagnostics::new();
        diagnostics.warn_once("dining", "no mapping");
        diagnostics.warn_once("dining", "no mapping");
        diagnostics.warn_once("transport", "no mapping");

        let mut keys = diagnostics.warned_keys();
        keys.sort();
        assert_eq!(keys, vec!["dining", "transport"]);
    }

    #[test]
    fn recorder_drops_samples_when_stopped() {
        let recorder = PerformanceRecorder::new(10);
        recorder.record("fetch", Duration::from_millis(5));
        assert_eq!(recorder.buffered(), 0);
    }

    #[test]
    fn recorder_flushes_at_threshold() {
        let recorder = PerformanceRecorder::new(2);
        recorder.start();
        recorder.record("fetch", Duration::from_millis(5));
        assert_eq!(recorder.buffered(), 1);
        recorder.record("fetch", Duration::from_millis(7));
        assert_eq!(recorder.buffered(), 0);
    }

    #[test]
    fn stop_flushes_remaining_samples() {
        let recorder = PerformanceRecorder::new(100);
        recorder.start();
        recorder.record("enhance", Duration::from_millis(3));
        assert_eq!(recorder.buffered(), 1);
        recorder.stop();
        assert_eq!(recorder.buffered(), 0);
    }
}
