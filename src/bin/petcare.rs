//! petcare CLI - Command-line interface for petcare-analytics
//!
//! Commands:
//! - analyze: Run analysis requests and emit report payloads
//! - calories: Estimate a daily feeding plan from a few flags
//! - progress: Compute progress for a single goal
//! - validate: Validate analysis requests against the schema
//! - config: Print the effective engine configuration
//! - doctor: Diagnose configuration and environment

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use petcare_analytics::calories::CalorieEstimator;
use petcare_analytics::config::EngineConfig;
use petcare_analytics::goals::GoalProgressTracker;
use petcare_analytics::pipeline::AnalyticsProcessor;
use petcare_analytics::schema::{AnalysisRequest, RequestAdapter, SCHEMA_VERSION};
use petcare_analytics::types::{
    ActivityLevel, Goal, GoalType, NutritionGoal, Pet, ReportPayload, Species,
};
use petcare_analytics::{AnalyticsError, ENGINE_VERSION, PRODUCER_NAME};

/// Environment variable holding the log filter
const LOG_ENV: &str = "PETCARE_LOG";

/// petcare - Health analytics and nutrition engine for companion animals
#[derive(Parser)]
#[command(name = "petcare")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Analyze pet health records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze requests into report payloads
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,

        /// Engine configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Estimate daily calories and feeding plan
    Calories {
        /// Species
        #[arg(long)]
        species: SpeciesArg,

        /// Current weight in kg
        #[arg(long)]
        weight: f64,

        /// Activity level
        #[arg(long, default_value = "medium")]
        activity: ActivityArg,

        /// Nutrition goal
        #[arg(long)]
        goal: Option<GoalArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute progress for a single goal
    Progress {
        /// Goal kind
        #[arg(long, default_value = "activity")]
        goal_type: GoalTypeArg,

        /// Target value
        #[arg(long)]
        target: f64,

        /// Current value
        #[arg(long)]
        current: f64,

        /// Unit label, e.g. kg or min
        #[arg(long, default_value = "")]
        unit: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,

        /// Reference date for days remaining (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Validate analysis requests
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective engine configuration as JSON
    Config {
        /// Configuration file to merge over the defaults
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check a configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// A single request object
    Json,
    /// JSON array of requests
    Array,
    /// Newline-delimited JSON (one request per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one payload per line)
    Ndjson,
    /// JSON array of payloads
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum SpeciesArg {
    Dog,
    Cat,
    Rabbit,
    Bird,
    Other,
}

impl From<SpeciesArg> for Species {
    fn from(arg: SpeciesArg) -> Self {
        match arg {
            SpeciesArg::Dog => Species::Dog,
            SpeciesArg::Cat => Species::Cat,
            SpeciesArg::Rabbit => Species::Rabbit,
            SpeciesArg::Bird => Species::Bird,
            SpeciesArg::Other => Species::Other,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ActivityArg {
    Low,
    Medium,
    High,
}

impl From<ActivityArg> for ActivityLevel {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::Low => ActivityLevel::Low,
            ActivityArg::Medium => ActivityLevel::Medium,
            ActivityArg::High => ActivityLevel::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    LoseWeight,
    Maintain,
    GainWeight,
}

impl From<GoalArg> for NutritionGoal {
    fn from(arg: GoalArg) -> Self {
        match arg {
            GoalArg::LoseWeight => NutritionGoal::LoseWeight,
            GoalArg::Maintain => NutritionGoal::Maintain,
            GoalArg::GainWeight => NutritionGoal::GainWeight,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalTypeArg {
    WeightLoss,
    WeightGain,
    Activity,
    Medication,
}

impl From<GoalTypeArg> for GoalType {
    fn from(arg: GoalTypeArg) -> Self {
        match arg {
            GoalTypeArg::WeightLoss => GoalType::WeightLoss,
            GoalTypeArg::WeightGain => GoalType::WeightGain,
            GoalTypeArg::Activity => GoalType::Activity,
            GoalTypeArg::Medication => GoalType::Medication,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| "warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
}

fn run(cli: Cli) -> Result<(), PetcareCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            input_format,
            output_format,
            config,
        } => cmd_analyze(
            &input,
            &output,
            input_format,
            output_format,
            config.as_deref(),
        ),

        Commands::Calories {
            species,
            weight,
            activity,
            goal,
            json,
        } => cmd_calories(species, weight, activity, goal, json),

        Commands::Progress {
            goal_type,
            target,
            current,
            unit,
            start,
            due,
            as_of,
        } => {
            let goal = Goal {
                id: None,
                goal_type: goal_type.into(),
                target_value: target,
                current_value: current,
                unit,
                start_date: start,
                target_date: due,
            };
            cmd_progress(&goal, as_of)
        }

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Config { file } => cmd_config(file.as_deref()),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),
    }
}

fn cmd_analyze(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), PetcareCliError> {
    let requests = read_requests(input, &input_format)?;
    if requests.is_empty() {
        return Err(PetcareCliError::NoRequests);
    }

    let processor = AnalyticsProcessor::with_config(load_config(config)?);
    let encoder = processor.encoder();

    let mut payloads: Vec<ReportPayload> = Vec::with_capacity(requests.len());
    for request in &requests {
        let report = processor.process(request)?;
        payloads.push(encoder.encode(report));
    }
    tracing::debug!(reports = payloads.len(), "analysis complete");

    let output_data = format_output(&payloads, &output_format)?;
    if output.to_string_lossy() == "-" {
        print!("{output_data}");
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_calories(
    species: SpeciesArg,
    weight: f64,
    activity: ActivityArg,
    goal: Option<GoalArg>,
    json: bool,
) -> Result<(), PetcareCliError> {
    let pet = Pet::new("cli", species.into(), weight, activity.into());
    let plan = CalorieEstimator::new().estimate_plan(&pet, goal.map(Into::into))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("Feeding Plan");
        println!("============");
        println!("Daily calories:   {} kcal", plan.daily_calories);
        println!("Resting energy:   {:.1} kcal", plan.resting_energy_kcal);
        println!("Activity factor:  {}", plan.activity_multiplier);
        println!("Goal factor:      {}", plan.goal_multiplier);
        println!(
            "Meals:            {} x {} kcal",
            plan.meals_per_day, plan.calories_per_meal
        );
        println!("Water:            {} ml", plan.water_ml);
    }

    Ok(())
}

fn cmd_progress(goal: &Goal, as_of: Option<NaiveDate>) -> Result<(), PetcareCliError> {
    let report = GoalProgressTracker::new().compute_report(goal, as_of)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_validate(
    input: &Path,
    input_format: InputFormat,
    json: bool,
) -> Result<(), PetcareCliError> {
    let requests = read_requests(input, &input_format)?;
    let results = RequestAdapter::validate_requests(&requests);

    let report = ValidationReport {
        total_requests: requests.len(),
        valid_requests: requests.len() - results.len(),
        invalid_requests: results.len(),
        errors: results
            .iter()
            .map(|r| ValidationErrorDetail {
                index: r.index,
                pet_id: r.pet_id.clone(),
                error: r.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total requests:   {}", report.total_requests);
        println!("Valid requests:   {}", report.valid_requests);
        println!("Invalid requests: {}", report.invalid_requests);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Pet {} (index {}): {}", err.pet_id, err.index, err.error);
            }
        }
    }

    if report.invalid_requests > 0 {
        Err(PetcareCliError::ValidationFailed(report.invalid_requests))
    } else {
        Ok(())
    }
}

fn cmd_config(file: Option<&Path>) -> Result<(), PetcareCliError> {
    let config = load_config(file)?;
    println!("{}", config.to_json()?);
    Ok(())
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), PetcareCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{PRODUCER_NAME} version {ENGINE_VERSION}"),
    });

    checks.push(DoctorCheck {
        name: "schema_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Input schema: {SCHEMA_VERSION}"),
    });

    if let Some(config_path) = config {
        checks.push(check_config_file(config_path));
    }

    let log_filter = std::env::var(LOG_ENV).ok();
    checks.push(DoctorCheck {
        name: "log_filter".to_string(),
        status: CheckStatus::Ok,
        message: match log_filter {
            Some(filter) => format!("{LOG_ENV}={filter}"),
            None => format!("{LOG_ENV} unset (warn)"),
        },
    });

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (pass requests with --input)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (ready to read requests)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("petcare Doctor Report");
        println!("=====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(PetcareCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn check_config_file(path: &Path) -> DoctorCheck {
    let name = "config".to_string();
    if !path.exists() {
        return DoctorCheck {
            name,
            status: CheckStatus::Warning,
            message: "Configuration file does not exist".to_string(),
        };
    }

    match fs::read_to_string(path) {
        Ok(content) => match EngineConfig::from_json(&content) {
            Ok(config) => {
                let weights = config.health_score.weights;
                let total = weights.weight
                    + weights.body_condition
                    + weights.activity
                    + weights.medication;
                if (total - 1.0).abs() > 1e-6 {
                    DoctorCheck {
                        name,
                        status: CheckStatus::Warning,
                        message: format!(
                            "Health score weights sum to {total:.3}; they are renormalized per pet"
                        ),
                    }
                } else {
                    DoctorCheck {
                        name,
                        status: CheckStatus::Ok,
                        message: "Configuration file valid".to_string(),
                    }
                }
            }
            Err(e) => DoctorCheck {
                name,
                status: CheckStatus::Error,
                message: format!("Invalid configuration JSON: {e}"),
            },
        },
        Err(e) => DoctorCheck {
            name,
            status: CheckStatus::Error,
            message: format!("Cannot read configuration file: {e}"),
        },
    }
}

// Helper functions

fn read_input(input: &Path) -> Result<String, PetcareCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn read_requests(
    input: &Path,
    input_format: &InputFormat,
) -> Result<Vec<AnalysisRequest>, PetcareCliError> {
    let input_data = read_input(input)?;
    let requests = match input_format {
        InputFormat::Json => vec![RequestAdapter::parse(&input_data)?],
        InputFormat::Array => RequestAdapter::parse_array(&input_data)?,
        InputFormat::Ndjson => RequestAdapter::parse_ndjson(&input_data)?,
    };
    Ok(requests)
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, PetcareCliError> {
    match path {
        Some(path) => Ok(EngineConfig::from_json(&fs::read_to_string(path)?)?),
        None => Ok(EngineConfig::default()),
    }
}

fn format_output(
    payloads: &[ReportPayload],
    format: &OutputFormat,
) -> Result<String, PetcareCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for payload in payloads {
                lines.push(serde_json::to_string(payload)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(payloads)? + "\n"),
        OutputFormat::JsonPretty => match payloads {
            [single] => Ok(serde_json::to_string_pretty(single)? + "\n"),
            _ => Ok(serde_json::to_string_pretty(payloads)? + "\n"),
        },
    }
}

// Error types

#[derive(Debug)]
enum PetcareCliError {
    Io(io::Error),
    Engine(AnalyticsError),
    Json(serde_json::Error),
    NoRequests,
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for PetcareCliError {
    fn from(e: io::Error) -> Self {
        PetcareCliError::Io(e)
    }
}

impl From<AnalyticsError> for PetcareCliError {
    fn from(e: AnalyticsError) -> Self {
        PetcareCliError::Engine(e)
    }
}

impl From<serde_json::Error> for PetcareCliError {
    fn from(e: serde_json::Error) -> Self {
        PetcareCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

fn engine_hint(e: &AnalyticsError) -> &'static str {
    match e {
        AnalyticsError::InsufficientData(_) => "Provide more observations for this metric",
        AnalyticsError::InvalidWeight(_) => "Weights must be positive numbers in kg",
        AnalyticsError::InvalidGoal(_) => "Goal targets must be positive and dates ordered",
        AnalyticsError::InvalidBodyCondition(_) => "Body condition score uses the 1-9 scale",
        AnalyticsError::InvalidRequest(_) => "Run 'petcare validate' for details",
        AnalyticsError::UnsupportedSchema { .. } => "Set schema_version to the supported version",
        AnalyticsError::Json(_) => "Check JSON syntax",
    }
}

impl From<PetcareCliError> for CliError {
    fn from(e: PetcareCliError) -> Self {
        match e {
            PetcareCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            PetcareCliError::Engine(e) => CliError {
                code: e.code().to_string(),
                message: e.to_string(),
                hint: Some(engine_hint(&e).to_string()),
            },
            PetcareCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            PetcareCliError::NoRequests => CliError {
                code: "NO_REQUESTS".to_string(),
                message: "No requests found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            PetcareCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{count} requests failed validation"),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            PetcareCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_requests: usize,
    valid_requests: usize,
    invalid_requests: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    pet_id: String,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
