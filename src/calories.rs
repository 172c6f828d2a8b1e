//! Daily caloric target estimation
//!
//! Resting energy follows allometric scaling, `70 * weight_kg^exponent`, with
//! the exponent keyed by species. The result is scaled by an activity
//! multiplier and a nutrition goal multiplier, then rounded to whole kcal.
//!
//! The goal coefficients are fixed factors rather than a personalized
//! regression; they approximate, but do not replace, veterinary RER/MER tables.

use crate::config::CalorieConfig;
use crate::error::{AnalyticsError, Result};
use crate::types::{DailyNutritionPlan, NutritionGoal, Pet};

/// Calorie estimator over a [`CalorieConfig`] policy
#[derive(Debug, Clone, Default)]
pub struct CalorieEstimator {
    config: CalorieConfig,
}

impl CalorieEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalorieConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalorieConfig {
        &self.config
    }

    /// Resting energy before activity and goal adjustments (kcal/day)
    ///
    /// # Errors
    /// `InvalidWeight` when the current weight is not a positive number
    pub fn resting_energy(&self, pet: &Pet) -> Result<f64> {
        let weight = validate_weight(pet.current_weight_kg)?;
        let exponent = self.config.exponent_for(pet.species);
        Ok(self.config.base_coefficient * weight.powf(exponent))
    }

    /// Daily caloric target (kcal/day), always at least 1
    ///
    /// # Errors
    /// `InvalidWeight` when the current weight is zero, negative or not finite.
    /// The weight is never clamped.
    pub fn estimate_daily_calories(&self, pet: &Pet, goal: Option<NutritionGoal>) -> Result<u32> {
        let resting = self.resting_energy(pet)?;
        let activity = self
            .config
            .activity_multipliers
            .for_level(pet.activity_level);
        let goal = self.config.goal_multipliers.for_goal(goal.unwrap_or_default());

        Ok(round_kcal(resting * activity * goal))
    }

    /// Full daily feeding plan: calorie target, per-meal split and water
    pub fn estimate_plan(
        &self,
        pet: &Pet,
        goal: Option<NutritionGoal>,
    ) -> Result<DailyNutritionPlan> {
        let resting_energy_kcal = self.resting_energy(pet)?;
        let activity_multiplier = self
            .config
            .activity_multipliers
            .for_level(pet.activity_level);
        let goal_multiplier = self.config.goal_multipliers.for_goal(goal.unwrap_or_default());

        let daily_calories = round_kcal(resting_energy_kcal * activity_multiplier * goal_multiplier);
        let meals_per_day = self.config.meals_for(pet.species);
        let calories_per_meal = round_kcal(f64::from(daily_calories) / f64::from(meals_per_day));
        let water_ml = (pet.current_weight_kg * self.config.water_ml_per_kg).round() as u32;

        Ok(DailyNutritionPlan {
            daily_calories,
            resting_energy_kcal,
            activity_multiplier,
            goal_multiplier,
            meals_per_day,
            calories_per_meal,
            water_ml,
        })
    }
}

fn validate_weight(weight_kg: f64) -> Result<f64> {
    if weight_kg.is_finite() && weight_kg > 0.0 {
        Ok(weight_kg)
    } else {
        Err(AnalyticsError::InvalidWeight(format!(
            "current weight must be positive, got {weight_kg} kg"
        )))
    }
}

fn round_kcal(kcal: f64) -> u32 {
    (kcal.round() as u32).max(1)
}

/// [`CalorieEstimator::estimate_daily_calories`] with the default configuration
pub fn estimate_daily_calories(pet: &Pet, goal: Option<NutritionGoal>) -> Result<u32> {
    CalorieEstimator::default().estimate_daily_calories(pet, goal)
}
