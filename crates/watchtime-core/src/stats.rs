use watchtime_models::{GoalProgress, WatchEntry, WatchStats};

const MINUTES_PER_HOUR: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 1440.0;

/// Aggregate watch time over `entries`. Pure; nothing is cached between calls.
pub fn aggregate(entries: &[WatchEntry], goal_hours: f64) -> WatchStats {
    let total_minutes: u64 = entries.iter().map(|e| u64::from(e.movie.duration)).sum();
    let exact_hours = total_minutes as f64 / MINUTES_PER_HOUR;

    WatchStats {
        total_minutes,
        total_hours: round_one_decimal(exact_hours),
        total_days: round_one_decimal(total_minutes as f64 / MINUTES_PER_DAY),
        total_count: entries.len(),
        goal: goal_progress(exact_hours, goal_hours),
    }
}

fn goal_progress(hours: f64, goal_hours: f64) -> GoalProgress {
    let percent = if goal_hours > 0.0 {
        (hours / goal_hours * 100.0).min(100.0)
    } else if hours > 0.0 {
        100.0
    } else {
        0.0
    };

    GoalProgress {
        goal_hours,
        percent: round_one_decimal(percent),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchtime_models::{MediaType, MovieRecord};

    fn entries(durations: &[u32]) -> Vec<WatchEntry> {
        durations
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let id = format!("omdb_tt{:03}", i);
                WatchEntry::new(MovieRecord::new(id, "Movie", "2020", *d, MediaType::Movie))
            })
            .collect()
    }

    #[test]
    fn test_aggregate_mixed_durations() {
        let stats = aggregate(&entries(&[120, 45, 0]), 100.0);

        assert_eq!(stats.total_minutes, 165);
        assert_eq!(stats.total_hours, 2.8);
        assert_eq!(stats.total_days, 0.1);
        assert_eq!(stats.total_count, 3);
    }

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate(&[], 100.0);

        assert_eq!(stats.total_minutes, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.total_days, 0.0);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.goal.percent, 0.0);
    }

    #[test]
    fn test_goal_progress() {
        // 30 hours out of 100
        let stats = aggregate(&entries(&[600, 600, 600]), 100.0);
        assert_eq!(stats.goal.goal_hours, 100.0);
        assert_eq!(stats.goal.percent, 30.0);

        // capped once the goal is passed
        let stats = aggregate(&entries(&[6000, 1200]), 100.0);
        assert_eq!(stats.goal.percent, 100.0);
    }

    #[test]
    fn test_zero_goal() {
        assert_eq!(aggregate(&[], 0.0).goal.percent, 0.0);
        assert_eq!(aggregate(&entries(&[10]), 0.0).goal.percent, 100.0);
    }

    #[test]
    fn test_days_round_to_one_decimal() {
        // 2 days and 3 hours
        let stats = aggregate(&entries(&[2880, 180]), 100.0);
        assert_eq!(stats.total_days, 2.1);
        assert_eq!(stats.total_hours, 51.0);
    }
}
