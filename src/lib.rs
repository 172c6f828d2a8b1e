//! petcare-analytics - Health analytics and nutrition engine for companion animals
//!
//! The engine turns a pet profile and its logged observations into derived
//! results through pure, configurable calculators: descriptive statistics and
//! trends → calorie and feeding plan → weighted health score → goal progress →
//! rule-based insights.
//!
//! ## Modules
//!
//! - **Calculators**: `statistics`, `calories`, `health_score`, `goals`, `insights`
//! - **Pipeline**: Analyze a versioned JSON request into an encoded report
//! - **FFI**: C ABI over the JSON pipeline for mobile and native hosts

pub mod calories;
pub mod config;
pub mod encoder;
pub mod error;
pub mod goals;
pub mod health_score;
pub mod insights;
pub mod pipeline;
pub mod schema;
pub mod statistics;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use calories::{estimate_daily_calories, CalorieEstimator};
pub use config::EngineConfig;
pub use encoder::ReportEncoder;
pub use error::{AnalyticsError, Result};
pub use goals::{compute_progress, GoalProgressTracker};
pub use health_score::{compute_health_score, HealthScoreCalculator};
pub use insights::{generate_insights, DerivedMetrics, InsightEngine, InsightRule};
pub use pipeline::{analyze, analyze_json, AnalyticsProcessor};
pub use statistics::{compute_statistics, compute_trend, StatisticsCalculator};

// Schema exports
pub use schema::{AnalysisRequest, RequestAdapter, SCHEMA_VERSION};

/// Engine version embedded in all report payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "petcare-analytics";
