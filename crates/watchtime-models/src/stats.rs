use serde::{Deserialize, Serialize};

/// Aggregate watch time over the current watch list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchStats {
    pub total_minutes: u64,
    pub total_hours: f64,
    pub total_days: f64,
    pub total_count: usize,
    pub goal: GoalProgress,
}

/// Progress toward a watch-time goal, bounded to 0..=100 percent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    pub goal_hours: f64,
    pub percent: f64,
}
