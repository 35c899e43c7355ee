//! Shared progress accounting for concurrent artifact uploads

use crate::output::OutputManager;

/// Counts settled artifacts within one make-result and reports after each
/// one. Callers hold this behind a mutex so that the increment and the
/// status report happen as one step; a lost or duplicated count is a
/// correctness defect, not a cosmetic one.
pub struct ProgressTracker {
    completed: usize,
    total: usize,
    output: OutputManager,
}

impl ProgressTracker {
    pub fn new(total: usize, output: OutputManager) -> Self {
        Self {
            completed: 0,
            total,
            output,
        }
    }

    /// Record one settled artifact (uploaded, skipped, or failed all count)
    /// and emit the status line.
    pub fn settle(&mut self) -> usize {
        self.completed += 1;
        self.output.status(&format!(
            "Uploading artifact ({}/{})",
            self.completed, self.total
        ));
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_each_settle_counts_once() {
        let mut tracker = ProgressTracker::new(3, OutputManager::new_quiet());
        assert_eq!(tracker.settle(), 1);
        assert_eq!(tracker.settle(), 2);
        assert_eq!(tracker.settle(), 3);
    }

    #[test]
    fn test_status_lines_reach_host_sink() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let output = OutputManager::new_quiet()
            .with_status_sink(Arc::new(move |msg: &str| {
                sink_seen.lock().unwrap().push(msg.to_string());
            }));

        let mut tracker = ProgressTracker::new(2, output);
        tracker.settle();
        tracker.settle();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                "Uploading artifact (1/2)".to_string(),
                "Uploading artifact (2/2)".to_string()
            ]
        );
    }
}
