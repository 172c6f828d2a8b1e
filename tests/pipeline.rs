//! End-to-end tests over the public JSON pipeline

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use petcare_analytics::config::EngineConfig;
use petcare_analytics::encoder::{ReportEncoder, REPORT_VERSION};
use petcare_analytics::insights::{
    InsightContext, InsightEngine, InsightRule, GOAL_ATTENTION_ID, INCREASE_ACTIVITY_ID,
    MEDICATION_ADHERENCE_ID, VACCINATION_REMINDER_ID, WEIGHT_MANAGEMENT_ID, WEIGHT_TREND_ID,
};
use petcare_analytics::types::{
    ActivityLevel, GoalStatus, HealthComponent, Insight, InsightType, MetricKind, Observation,
    Pet, Priority, ReportPayload, ScoreWarning, Species, TrendDirection,
};
use petcare_analytics::{
    analyze, analyze_json, AnalysisRequest, AnalyticsError, AnalyticsProcessor, RequestAdapter,
    PRODUCER_NAME,
};

const OVERWEIGHT_DOG: &str = r#"{
    "schema_version": "petcare.analysis_request.v1",
    "request_id": "it-1",
    "pet": {
        "id": "dog-it",
        "name": "Biscuit",
        "species": "dog",
        "current_weight_kg": 27.5,
        "ideal_weight_kg": 24.0,
        "body_condition_score": 7,
        "activity_level": "low"
    },
    "observations": [
        {"date": "2024-01-01", "value": 25.0, "metric": "weight"},
        {"date": "2024-01-08", "value": 25.4, "metric": "weight"},
        {"date": "2024-01-15", "value": 25.9, "metric": "weight"},
        {"date": "2024-01-22", "value": 26.3, "metric": "weight"},
        {"date": "2024-01-29", "value": 26.6, "metric": "weight"},
        {"date": "2024-02-05", "value": 26.9, "metric": "weight"},
        {"date": "2024-02-12", "value": 27.1, "metric": "weight"},
        {"date": "2024-02-19", "value": 27.2, "metric": "weight"},
        {"date": "2024-02-26", "value": 27.4, "metric": "weight"},
        {"date": "2024-03-04", "value": 27.5, "metric": "weight"},
        {"date": "2024-03-04", "value": 25, "metric": "activity_minutes"}
    ],
    "medications": [
        {"name": "Carprofen", "start_date": "2024-02-01", "status": "active", "adherence_percent": 60}
    ],
    "goals": [
        {"id": "walks", "type": "activity", "target_value": 60, "current_value": 25, "unit": "min",
         "start_date": "2024-02-01", "target_date": "2024-04-01"}
    ],
    "nutrition_goal": "lose_weight",
    "as_of": "2024-03-04"
}"#;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn insight_ids(insights: &[Insight]) -> Vec<&str> {
    insights.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn overweight_dog_full_report() {
    let request = RequestAdapter::parse(OVERWEIGHT_DOG).unwrap();
    let report = analyze(&request).unwrap();

    assert_eq!(report.request_id.as_deref(), Some("it-1"));
    assert_eq!(report.species, Species::Dog);

    let trend = &report.trends[&MetricKind::Weight];
    assert_eq!(trend.direction, TrendDirection::Increasing);
    assert!(trend.change_absolute > 0.0);
    assert_eq!(report.statistics[&MetricKind::Weight].count, 10);
    assert_eq!(report.statistics[&MetricKind::ActivityMinutes].count, 1);
    assert!(!report.trends.contains_key(&MetricKind::ActivityMinutes));

    assert_eq!(report.health_breakdown.components.len(), 4);
    assert!((report.health_breakdown.weight_sum() - 1.0).abs() < 1e-9);
    assert!(report.health_score < 100);

    assert_eq!(report.goal_progress.len(), 1);
    assert_eq!(report.goal_progress[0].days_remaining, Some(28));
    assert_eq!(report.goal_progress[0].status, GoalStatus::NeedsAttention);

    let ids = insight_ids(&report.insights);
    for expected in [
        WEIGHT_MANAGEMENT_ID,
        INCREASE_ACTIVITY_ID,
        VACCINATION_REMINDER_ID,
        MEDICATION_ADHERENCE_ID,
        WEIGHT_TREND_ID,
        GOAL_ATTENTION_ID,
    ] {
        assert!(ids.contains(&expected), "missing insight {expected}");
    }

    let priorities: Vec<Priority> = report.insights.iter().map(|i| i.priority).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
}

#[test]
fn json_payload_round_trips() {
    let payload_json = analyze_json(OVERWEIGHT_DOG.to_string()).unwrap();
    let payload: ReportPayload = serde_json::from_str(&payload_json).unwrap();

    assert_eq!(payload.report_version, REPORT_VERSION);
    assert_eq!(payload.producer.name, PRODUCER_NAME);
    assert_eq!(payload.report.pet_id, "dog-it");

    let direct = analyze(&RequestAdapter::parse(OVERWEIGHT_DOG).unwrap()).unwrap();
    assert_eq!(payload.report.health_score, direct.health_score);
    assert_eq!(payload.report.nutrition_plan.daily_calories, direct.nutrition_plan.daily_calories);
    assert_eq!(insight_ids(&payload.report.insights), insight_ids(&direct.insights));
    assert_eq!(
        payload.report.trends[&MetricKind::Weight].direction,
        direct.trends[&MetricKind::Weight].direction
    );
}

#[test]
fn healthy_pet_gets_no_actionable_insights() {
    let pet = Pet::new("cat-ok", Species::Cat, 4.5, ActivityLevel::Medium)
        .with_ideal_weight(4.5)
        .with_body_condition(5);
    let request = AnalysisRequest::new(pet).with_observations(
        [4.5, 4.6, 4.5, 4.5]
            .iter()
            .enumerate()
            .map(|(i, value)| Observation {
                date: date(1, 1 + i as u32 * 7),
                value: *value,
                metric: MetricKind::Weight,
            })
            .collect(),
    );

    let report = analyze(&request).unwrap();
    assert_eq!(report.health_score, 100);
    assert_eq!(insight_ids(&report.insights), vec![VACCINATION_REMINDER_ID]);

    let mut config = EngineConfig::default();
    config.insights.checkup_reminder = false;
    let quiet = AnalyticsProcessor::with_config(config).process(&request).unwrap();
    assert!(quiet.insights.is_empty());
}

#[test]
fn missing_optional_fields_are_warnings() {
    let request = AnalysisRequest::new(Pet::new("rabbit-1", Species::Rabbit, 2.0, ActivityLevel::Medium));
    let report = analyze(&request).unwrap();

    assert_eq!(
        report.health_breakdown.warnings,
        vec![
            ScoreWarning::MissingIdealWeight,
            ScoreWarning::MissingBodyConditionScore
        ]
    );
    assert!(report.health_breakdown.component(HealthComponent::Weight).is_none());
    assert!((report.health_breakdown.weight_sum() - 1.0).abs() < 1e-9);
    assert!(report.statistics.is_empty());
    assert!(report.trends.is_empty());
}

#[test]
fn hard_errors_surface_unchanged() {
    let zero_weight = OVERWEIGHT_DOG.replace("\"current_weight_kg\": 27.5", "\"current_weight_kg\": 0");
    assert!(matches!(
        analyze_json(zero_weight),
        Err(AnalyticsError::InvalidWeight(_))
    ));

    let bad_bcs = OVERWEIGHT_DOG.replace("\"body_condition_score\": 7", "\"body_condition_score\": 12");
    assert!(matches!(
        analyze_json(bad_bcs),
        Err(AnalyticsError::InvalidBodyCondition(12))
    ));

    let bad_goal = OVERWEIGHT_DOG.replace("\"target_value\": 60", "\"target_value\": 0");
    assert!(matches!(
        analyze_json(bad_goal),
        Err(AnalyticsError::InvalidGoal(_))
    ));

    let old_schema = OVERWEIGHT_DOG.replace("analysis_request.v1", "analysis_request.v0");
    let err = analyze_json(old_schema).unwrap_err();
    assert_eq!(err.code(), "UNSUPPORTED_SCHEMA");
}

#[test]
fn custom_rule_extends_pipeline() {
    struct HeavyDogRule;

    impl InsightRule for HeavyDogRule {
        fn id(&self) -> &'static str {
            "heavy-dog"
        }

        fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
            (ctx.pet.species == Species::Dog && ctx.pet.current_weight_kg > 25.0).then(|| Insight {
                id: self.id().to_string(),
                insight_type: InsightType::Info,
                title: "Large breed".to_string(),
                message: "Consider joint support.".to_string(),
                priority: Priority::Low,
                suggested_action: "Ask your vet about joint supplements.".to_string(),
            })
        }
    }

    let mut rules = petcare_analytics::insights::default_rules();
    rules.push(Box::new(HeavyDogRule));
    let processor = AnalyticsProcessor::new()
        .with_insight_engine(InsightEngine::with_rules(Default::default(), rules));

    let report = processor
        .process(&RequestAdapter::parse(OVERWEIGHT_DOG).unwrap())
        .unwrap();
    assert_eq!(report.insights.last().map(|i| i.id.as_str()), Some("heavy-dog"));
}

#[test]
fn ndjson_batch() {
    let compact: serde_json::Value = serde_json::from_str(OVERWEIGHT_DOG).unwrap();
    let line = serde_json::to_string(&compact).unwrap();
    let ndjson = format!("{line}\n\n{line}\n");

    let requests = RequestAdapter::parse_ndjson(&ndjson).unwrap();
    let processor = AnalyticsProcessor::new()
        .with_encoder(ReportEncoder::with_instance_id("batch".to_string()));
    let results = processor.process_batch(&requests);

    assert_eq!(results.len(), 2);
    let first = results[0].as_ref().unwrap();
    let second = results[1].as_ref().unwrap();
    assert_eq!(first, second);
    assert_eq!(processor.encoder().instance_id(), "batch");
}
