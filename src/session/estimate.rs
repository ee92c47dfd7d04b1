use std::time::Duration;

/// Progress of a summarize request as shown to the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEstimate {
    pub percent: f64,
    /// `None` while no chunk has completed yet, or when the estimate is out of range
    pub remaining: Option<Duration>,
}

impl ProgressEstimate {
    /// `total` must be non-zero, which the protocol decoder guarantees.
    pub fn compute(completed: u64, total: u64, elapsed: Duration) -> Self {
        let percent = completed as f64 / total as f64 * 100.0;

        let remaining = if completed == 0 {
            None
        } else {
            let elapsed = elapsed.as_secs_f64();
            let estimated_total = elapsed / completed as f64 * total as f64;
            Duration::try_from_secs_f64((estimated_total - elapsed).max(0.0)).ok()
        };

        Self { percent, remaining }
    }

    pub fn complete() -> Self {
        Self {
            percent: 100.0,
            remaining: Some(Duration::ZERO),
        }
    }

    pub fn remaining_text(&self) -> String {
        match self.remaining {
            Some(remaining) => format!("Estimated time remaining: {}", format_remaining(remaining)),
            None => "Estimated time remaining: unknown".to_string(),
        }
    }
}

/// Formats as `minutes:seconds`, seconds zero-padded
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
