//! Descriptive statistics and trend detection
//!
//! This module summarizes a numeric series (mean, extremes, population
//! standard deviation) and classifies the direction of a dated series:
//! - Exactly two points are compared directly
//! - Longer series compare the mean of the leading window with the mean of
//!   the trailing window, so a single outlier at either end is damped
//! - Confidence is a heuristic of sample size and change magnitude

use crate::config::StatisticsConfig;
use crate::error::{AnalyticsError, Result};
use crate::types::{Dataset, StatisticsResult, TrendConfidence, TrendDirection, TrendResult};

/// Statistics calculator with configurable trend thresholds
#[derive(Debug, Clone, Default)]
pub struct StatisticsCalculator {
    config: StatisticsConfig,
}

impl StatisticsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StatisticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    /// Compute descriptive statistics for `values`
    ///
    /// # Errors
    /// `InsufficientData` when `values` is empty
    pub fn compute_statistics(&self, values: &[f64]) -> Result<StatisticsResult> {
        if values.is_empty() {
            return Err(AnalyticsError::InsufficientData(
                "cannot compute statistics of an empty series".to_string(),
            ));
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let std_dev = if count == 1 {
            0.0
        } else {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
            variance.sqrt()
        };

        Ok(StatisticsResult {
            mean,
            min,
            max,
            std_dev,
            count,
        })
    }

    /// Compute statistics over the values of a dataset
    pub fn compute_dataset_statistics(&self, dataset: &Dataset) -> Result<StatisticsResult> {
        self.compute_statistics(&dataset.values()).map_err(|_| {
            AnalyticsError::InsufficientData(format!(
                "no {} readings recorded",
                dataset.metric().as_str()
            ))
        })
    }

    /// Classify the trend of a dataset
    ///
    /// `change_relative` is expressed against the mean of the raw series, so
    /// mirroring a series around its mean flips the direction and keeps the
    /// magnitude (and therefore the confidence) unchanged.
    ///
    /// # Errors
    /// `InsufficientData` with fewer than two points
    pub fn compute_trend(&self, dataset: &Dataset) -> Result<TrendResult> {
        let values = dataset.values();
        let count = values.len();

        if count < 2 {
            return Err(AnalyticsError::InsufficientData(format!(
                "trend needs at least 2 {} readings, got {}",
                dataset.metric().as_str(),
                count
            )));
        }

        // Full-length windows would coincide and flatten every series.
        let window = self.config.smoothing_window.clamp(1, count - 1);
        let first = window_mean(&values[..window]);
        let last = window_mean(&values[count - window..]);

        let change_absolute = last - first;
        let reference = (values.iter().sum::<f64>() / count as f64).abs();
        let change_relative = if reference < f64::EPSILON {
            0.0
        } else {
            change_absolute / reference * 100.0
        };

        let direction = if change_relative.abs() < self.config.stable_threshold_pct {
            TrendDirection::Stable
        } else if change_absolute > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };

        Ok(TrendResult {
            direction,
            confidence: self.classify_confidence(count, change_relative),
            change_absolute,
            change_relative,
        })
    }

    fn classify_confidence(&self, count: usize, change_relative: f64) -> TrendConfidence {
        if count >= self.config.high_confidence_min_points
            && change_relative.abs() > self.config.high_confidence_min_change_pct
        {
            TrendConfidence::High
        } else if count >= self.config.medium_confidence_min_points {
            TrendConfidence::Medium
        } else {
            TrendConfidence::Low
        }
    }
}

fn window_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// [`StatisticsCalculator::compute_statistics`] with the default configuration
pub fn compute_statistics(values: &[f64]) -> Result<StatisticsResult> {
    StatisticsCalculator::default().compute_statistics(values)
}

/// [`StatisticsCalculator::compute_trend`] with the default configuration
pub fn compute_trend(dataset: &Dataset) -> Result<TrendResult> {
    StatisticsCalculator::default().compute_trend(dataset)
}
