//! Composite health score
//!
//! Four sub-scores, each normalized to 0-100, are combined with configurable
//! weights into a single 0-100 integer:
//! - Weight status: current / ideal weight ratio
//! - Body condition: distance from the ideal BCS of 5
//! - Activity adequacy: activity level against the species' need
//! - Medication adherence: mean adherence of active medications
//!
//! Weight status and body condition depend on optional pet fields. When one is
//! absent its weight is redistributed proportionally among the remaining
//! sub-scores, so effective weights always sum to 1.0.

use crate::config::{HealthScoreConfig, HealthScoreWeights};
use crate::error::{AnalyticsError, Result};
use crate::types::{
    ComponentScore, HealthComponent, HealthDataset, HealthScoreBreakdown, Pet, ScoreWarning,
};

/// Health score calculator over a [`HealthScoreConfig`] policy
#[derive(Debug, Clone, Default)]
pub struct HealthScoreCalculator {
    config: HealthScoreConfig,
}

impl HealthScoreCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HealthScoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HealthScoreConfig {
        &self.config
    }

    /// Compute the 0-100 health score
    pub fn compute_health_score(&self, pet: &Pet, dataset: &HealthDataset) -> Result<u8> {
        Ok(self.compute_breakdown(pet, dataset)?.score)
    }

    /// Compute the health score along with its sub-scores and applied weights
    ///
    /// # Errors
    /// - `InvalidWeight` if the current weight, or a present ideal weight, is not positive
    /// - `InvalidBodyCondition` if a present BCS is outside 1-9
    /// - `InvalidRequest` if a medication's adherence is not a finite number
    pub fn compute_breakdown(
        &self,
        pet: &Pet,
        dataset: &HealthDataset,
    ) -> Result<HealthScoreBreakdown> {
        if !(pet.current_weight_kg.is_finite() && pet.current_weight_kg > 0.0) {
            return Err(AnalyticsError::InvalidWeight(format!(
                "current weight must be positive, got {} kg",
                pet.current_weight_kg
            )));
        }

        let mut warnings = Vec::new();
        let mut sub_scores: Vec<(HealthComponent, f64)> = Vec::with_capacity(4);

        match pet.ideal_weight_kg {
            Some(ideal) => {
                if !(ideal.is_finite() && ideal > 0.0) {
                    return Err(AnalyticsError::InvalidWeight(format!(
                        "ideal weight must be positive, got {ideal} kg"
                    )));
                }
                let ratio = pet.current_weight_kg / ideal;
                sub_scores.push((HealthComponent::Weight, self.weight_score(ratio)));
            }
            None => warnings.push(ScoreWarning::MissingIdealWeight),
        }

        match pet.body_condition_score {
            Some(bcs) => {
                if !(1..=9).contains(&bcs) {
                    return Err(AnalyticsError::InvalidBodyCondition(bcs));
                }
                sub_scores.push((HealthComponent::BodyCondition, self.body_condition_score(bcs)));
            }
            None => warnings.push(ScoreWarning::MissingBodyConditionScore),
        }

        sub_scores.push((HealthComponent::Activity, self.activity_score(pet)));
        sub_scores.push((HealthComponent::Medication, self.medication_score(dataset)?));

        let present: Vec<HealthComponent> = sub_scores.iter().map(|(c, _)| *c).collect();
        let effective = redistribute_weights(&self.config.weights, &present);

        let components: Vec<ComponentScore> = sub_scores
            .iter()
            .zip(&effective)
            .map(|((component, score), (_, weight))| ComponentScore {
                component: *component,
                score: *score,
                base_weight: self.config.weights.for_component(*component),
                effective_weight: *weight,
            })
            .collect();

        let weighted: f64 = components
            .iter()
            .map(|c| c.score * c.effective_weight)
            .sum();
        let score = weighted.round().clamp(0.0, 100.0) as u8;

        Ok(HealthScoreBreakdown {
            score,
            components,
            warnings,
        })
    }

    /// Peaks at ratio 1.0 and decays linearly to 0 at the floor and ceiling
    fn weight_score(&self, ratio: f64) -> f64 {
        let floor = self.config.weight_ratio_floor;
        let ceiling = self.config.weight_ratio_ceiling;

        let score = if ratio <= floor || ratio >= ceiling {
            0.0
        } else if ratio <= 1.0 {
            (ratio - floor) / (1.0 - floor) * 100.0
        } else {
            (ceiling - ratio) / (ceiling - 1.0) * 100.0
        };
        score.clamp(0.0, 100.0)
    }

    fn body_condition_score(&self, bcs: u8) -> f64 {
        let distance = (f64::from(bcs) - f64::from(self.config.ideal_body_condition)).abs();
        (100.0 - distance * self.config.body_condition_penalty_per_point).clamp(0.0, 100.0)
    }

    fn activity_score(&self, pet: &Pet) -> f64 {
        if pet.activity_level >= self.config.activity_need(pet.species) {
            self.config.adequate_activity_score
        } else {
            self.config.under_active_score
        }
    }

    /// Mean adherence of active medications; no active medication is not a problem
    fn medication_score(&self, dataset: &HealthDataset) -> Result<f64> {
        if let Some(med) = dataset
            .medications
            .iter()
            .find(|m| !m.adherence_percent.is_finite())
        {
            return Err(AnalyticsError::InvalidRequest(format!(
                "adherence of {} must be a finite percentage, got {}",
                med.name, med.adherence_percent
            )));
        }

        let adherence: Vec<f64> = dataset
            .active_medications()
            .map(|m| m.adherence_percent.clamp(0.0, 100.0))
            .collect();

        Ok(if adherence.is_empty() {
            self.config.no_active_medication_score
        } else {
            adherence.iter().sum::<f64>() / adherence.len() as f64
        })
    }
}

/// Effective weights for the `present` components.
///
/// Each present component keeps its share of the total present weight, so the
/// relative ratios of the configured weights are preserved and the result sums
/// to 1.0. If every present weight is zero the components share equally.
pub fn redistribute_weights(
    weights: &HealthScoreWeights,
    present: &[HealthComponent],
) -> Vec<(HealthComponent, f64)> {
    let total: f64 = present.iter().map(|c| weights.for_component(*c)).sum();

    if total <= 0.0 {
        let share = 1.0 / present.len().max(1) as f64;
        return present.iter().map(|c| (*c, share)).collect();
    }

    present
        .iter()
        .map(|c| (*c, weights.for_component(*c) / total))
        .collect()
}

/// [`HealthScoreCalculator::compute_health_score`] with the default configuration
pub fn compute_health_score(pet: &Pet, dataset: &HealthDataset) -> Result<u8> {
    HealthScoreCalculator::default().compute_health_score(pet, dataset)
}
