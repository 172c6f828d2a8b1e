//! Goal progress tracking
//!
//! Progress is `current / target * 100`, floored at 0 with no upper bound:
//! exceeding an activity goal reports more than 100%.

use crate::config::GoalConfig;
use crate::error::{AnalyticsError, Result};
use crate::types::{Goal, GoalProgress, GoalProgressReport, GoalStatus};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default)]
pub struct GoalProgressTracker {
    config: GoalConfig,
}

impl GoalProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GoalConfig) -> Self {
        Self { config }
    }

    /// Compute progress percentage and status for a goal
    ///
    /// # Errors
    /// `InvalidGoal` when the target is not a positive number
    pub fn compute_progress(&self, goal: &Goal) -> Result<GoalProgress> {
        if !(goal.target_value.is_finite() && goal.target_value > 0.0) {
            return Err(AnalyticsError::InvalidGoal(format!(
                "target value must be positive, got {}",
                goal.target_value
            )));
        }
        if !goal.current_value.is_finite() {
            return Err(AnalyticsError::InvalidGoal(
                "current value must be a finite number".to_string(),
            ));
        }

        let percentage = (goal.current_value / goal.target_value * 100.0).max(0.0);

        Ok(GoalProgress {
            percentage,
            status: self.classify(percentage),
        })
    }

    /// Compute progress plus schedule position relative to `as_of`
    ///
    /// # Errors
    /// `InvalidGoal` for a non-positive target or a target date before the start date
    pub fn compute_progress_at(&self, goal: &Goal, as_of: NaiveDate) -> Result<GoalProgressReport> {
        self.compute_report(goal, Some(as_of))
    }

    /// Progress report; schedule fields are filled only when `as_of` is known
    pub fn compute_report(
        &self,
        goal: &Goal,
        as_of: Option<NaiveDate>,
    ) -> Result<GoalProgressReport> {
        if goal.target_date < goal.start_date {
            return Err(AnalyticsError::InvalidGoal(format!(
                "target date {} precedes start date {}",
                goal.target_date, goal.start_date
            )));
        }

        let progress = self.compute_progress(goal)?;
        let days_remaining = as_of.map(|date| (goal.target_date - date).num_days());

        Ok(GoalProgressReport {
            goal_id: goal.id.clone(),
            goal_type: goal.goal_type,
            percentage: progress.percentage,
            status: progress.status,
            days_remaining,
            overdue: days_remaining.is_some_and(|days| days < 0)
                && progress.status != GoalStatus::Completed,
        })
    }

    fn classify(&self, percentage: f64) -> GoalStatus {
        if percentage >= self.config.completed_percent {
            GoalStatus::Completed
        } else if percentage >= self.config.on_track_percent {
            GoalStatus::OnTrack
        } else {
            GoalStatus::NeedsAttention
        }
    }
}

/// [`GoalProgressTracker::compute_progress`] with the default configuration
pub fn compute_progress(goal: &Goal) -> Result<GoalProgress> {
    GoalProgressTracker::default().compute_progress(goal)
}
