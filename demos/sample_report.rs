//! Generate a sample report payload for manual inspection

fn main() {
    let json = r#"{
        "schema_version": "petcare.analysis_request.v1",
        "request_id": "demo-1",
        "pet": {
            "id": "pet-demo",
            "name": "Biscuit",
            "species": "dog",
            "current_weight_kg": 27.5,
            "ideal_weight_kg": 25.0,
            "body_condition_score": 6,
            "activity_level": "low",
            "age_years": 7
        },
        "observations": [
            { "date": "2024-01-01", "value": 26.4, "metric": "weight" },
            { "date": "2024-01-15", "value": 26.8, "metric": "weight" },
            { "date": "2024-02-01", "value": 27.1, "metric": "weight" },
            { "date": "2024-02-15", "value": 27.3, "metric": "weight" },
            { "date": "2024-03-01", "value": 27.5, "metric": "weight" },
            { "date": "2024-03-01", "value": 38.7, "metric": "temperature" },
            { "date": "2024-03-01", "value": 35, "metric": "activity_minutes" },
            { "date": "2024-03-02", "value": 20, "metric": "activity_minutes" }
        ],
        "medications": [
            { "name": "Joint supplement", "start_date": "2024-01-01", "status": "active", "adherence_percent": 70 }
        ],
        "goals": [
            { "id": "walks", "type": "activity", "target_value": 60, "current_value": 35, "unit": "min",
              "start_date": "2024-02-01", "target_date": "2024-04-01" }
        ],
        "nutrition_goal": "lose_weight",
        "as_of": "2024-03-02"
    }"#;

    match petcare_analytics::analyze_json(json.to_string()) {
        Ok(payload) => println!("{payload}"),
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
