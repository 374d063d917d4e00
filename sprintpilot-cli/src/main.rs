use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde_json::{json, Value};
use sprintpilot::config::ClientConfig;
use sprintpilot::events::LoggingEventSink;
use sprintpilot::observability::init_tracing;
use sprintpilot::pipeline::Pipeline;
use sprintpilot::stages::{
    DecomposeTasks, ParseGoal, PlanSprints, PredictSuccess, PredictionForm, Stage,
    SuggestTaskChange, DEFAULT_GOAL_TEXT,
};
use sprintpilot::store::{FileStageStore, StageStore};
use sprintpilot::transport::HttpTransport;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "sprintpilot")]
#[command(about = "Drive the SprintPilot planning stages from the command line")]
struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend origin, e.g. http://127.0.0.1:8000.
    #[arg(long, global = true)]
    api_base: Option<String>,
    /// File holding the stage outputs.
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a goal (writes FR01_OUT).
    Fr01(GoalArgs),
    /// Decompose the stored goal into tasks (writes FR02_OUT).
    Fr02,
    /// Plan sprints from the stored tasks (writes FR03_OUT).
    Fr03(PlanArgs),
    /// Suggest a change to a task of the stored plan.
    Fr04(SuggestArgs),
    /// Predict task success from a feature form.
    Fr05(PredictArgs),
    /// Run FR01 through FR04 in order, stopping at the first failure.
    Chain(ChainArgs),
    /// Show which stage outputs are stored.
    Status,
    /// Probe the backend health endpoints.
    Health,
    /// Remove every stored stage output.
    Clear,
}

#[derive(clap::Args, Debug)]
struct GoalArgs {
    #[arg(long, default_value = DEFAULT_GOAL_TEXT)]
    goal: String,
}

#[derive(clap::Args, Debug)]
struct PlanArgs {
    #[arg(long, default_value_t = 14)]
    sprint_length: i64,
    #[arg(long, default_value_t = 14)]
    velocity: i64,
    #[arg(long = "no-enrich", action = ArgAction::SetTrue)]
    no_enrich: bool,
}

impl PlanArgs {
    fn stage(&self) -> PlanSprints {
        PlanSprints {
            sprint_length_days: self.sprint_length,
            velocity_days_per_sprint: self.velocity,
            enrich_with_llm: !self.no_enrich,
        }
    }
}

#[derive(clap::Args, Debug)]
struct SuggestArgs {
    #[arg(long, default_value = "modify_task")]
    action: String,
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value_t = 3)]
    estimate: i64,
    /// Comma-separated dependency titles.
    #[arg(long, default_value = "")]
    deps: String,
}

impl SuggestArgs {
    fn stage(&self) -> SuggestTaskChange {
        SuggestTaskChange {
            action: self.action.clone(),
            current_title: self.title.clone(),
            current_est: self.estimate,
            current_deps: self.deps.clone(),
        }
    }
}

#[derive(clap::Args, Debug)]
struct PredictArgs {
    #[arg(long)]
    task_type: Option<String>,
    #[arg(long)]
    assignee_role: Option<String>,
    #[arg(long)]
    experience_years: Option<i64>,
    #[arg(long)]
    team_size: Option<i64>,
    #[arg(long)]
    sprint_length_days: Option<i64>,
    #[arg(long)]
    story_points: Option<i64>,
    #[arg(long)]
    estimated_hours: Option<i64>,
    #[arg(long)]
    dependencies_count: Option<i64>,
    #[arg(long)]
    blockers_count: Option<i64>,
    #[arg(long)]
    priority_moscow: Option<String>,
    #[arg(long)]
    requirement_changes: Option<i64>,
    #[arg(long)]
    communication_volume: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    sentiment_score: Option<f64>,
    #[arg(long)]
    ai_suggestion_used: Option<i64>,
    #[arg(long)]
    ai_acceptance_rate: Option<f64>,
}

impl PredictArgs {
    fn form(self) -> PredictionForm {
        let d = PredictionForm::default();
        PredictionForm {
            task_type: self.task_type.unwrap_or(d.task_type),
            assignee_role: self.assignee_role.unwrap_or(d.assignee_role),
            experience_years: self.experience_years.unwrap_or(d.experience_years),
            team_size: self.team_size.unwrap_or(d.team_size),
            sprint_length_days: self.sprint_length_days.unwrap_or(d.sprint_length_days),
            story_points: self.story_points.unwrap_or(d.story_points),
            estimated_hours: self.estimated_hours.unwrap_or(d.estimated_hours),
            dependencies_count: self.dependencies_count.unwrap_or(d.dependencies_count),
            blockers_count: self.blockers_count.unwrap_or(d.blockers_count),
            priority_moscow: self.priority_moscow.unwrap_or(d.priority_moscow),
            requirement_changes: self.requirement_changes.unwrap_or(d.requirement_changes),
            communication_volume: self.communication_volume.unwrap_or(d.communication_volume),
            sentiment_score: self.sentiment_score.unwrap_or(d.sentiment_score),
            ai_suggestion_used: self.ai_suggestion_used.unwrap_or(d.ai_suggestion_used),
            ai_acceptance_rate: self.ai_acceptance_rate.unwrap_or(d.ai_acceptance_rate),
        }
    }
}

#[derive(clap::Args, Debug)]
struct ChainArgs {
    #[command(flatten)]
    goal: GoalArgs,
    #[command(flatten)]
    plan: PlanArgs,
    #[command(flatten)]
    suggest: SuggestArgs,
    /// Also run FR05 with the default form.
    #[arg(long, action = ArgAction::SetTrue)]
    with_fr05: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    init_tracing(&config.log)?;
    tracing::debug!(
        api_base = %config.api_base,
        store = %config.store_path.display(),
        "Configuration loaded"
    );

    let store = Arc::new(FileStageStore::new(config.store_path.clone()));
    if let Commands::Clear = cli.command {
        store.clear()?;
        print_json(&json!({"cleared": store.path().display().to_string()}))?;
        return Ok(ExitCode::SUCCESS);
    }

    let transport = Arc::new(HttpTransport::new(config)?);
    let pipeline = Pipeline::new(store, transport).with_event_sink(Arc::new(LoggingEventSink::debug()));

    match cli.command {
        Commands::Fr01(args) => run_stage(&pipeline, &ParseGoal::new(args.goal)).await,
        Commands::Fr02 => run_stage(&pipeline, &DecomposeTasks).await,
        Commands::Fr03(args) => run_stage(&pipeline, &args.stage()).await,
        Commands::Fr04(args) => run_stage(&pipeline, &args.stage()).await,
        Commands::Fr05(args) => run_stage(&pipeline, &PredictSuccess::new(args.form())).await,
        Commands::Chain(args) => chain_command(&pipeline, args).await,
        Commands::Status => {
            print_json(&serde_json::to_value(pipeline.status()?)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Health => {
            let health = pipeline.probe_backend().await;
            print_json(&health.to_json())?;
            Ok(if health.is_up() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Clear => Ok(ExitCode::SUCCESS),
    }
}

/// Defaults or `--config`, then environment, then flags.
fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    }
    .with_env_overrides(|name| std::env::var(name).ok());

    if let Some(api_base) = &cli.api_base {
        config = config.with_api_base(api_base.clone());
    }
    if let Some(store) = &cli.store {
        config = config.with_store_path(store.clone());
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

async fn run_stage(pipeline: &Pipeline, stage: &dyn Stage) -> anyhow::Result<ExitCode> {
    let run = pipeline.run(stage).await?;
    println!("{}", run.pretty_response());
    Ok(ExitCode::SUCCESS)
}

async fn chain_command(pipeline: &Pipeline, args: ChainArgs) -> anyhow::Result<ExitCode> {
    let mut stages: Vec<Box<dyn Stage>> = vec![
        Box::new(ParseGoal::new(args.goal.goal)),
        Box::new(DecomposeTasks),
        Box::new(args.plan.stage()),
        Box::new(args.suggest.stage()),
    ];
    if args.with_fr05 {
        stages.push(Box::new(PredictSuccess::default()));
    }

    let replay = pipeline.replay(&stages).await;
    let runs: Vec<Value> = replay
        .runs
        .iter()
        .map(|run| json!({"stage": run.stage, "response": run.response}))
        .collect();
    print_json(&Value::Array(runs))?;

    match replay.failure {
        Some(err) => {
            eprintln!("error: {err}");
            Ok(ExitCode::from(1))
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fr03_flags() {
        let cli = Cli::parse_from(["sprintpilot", "fr03", "--sprint-length", "10", "--no-enrich"]);
        let Commands::Fr03(args) = cli.command else {
            panic!("expected fr03");
        };
        assert_eq!(
            args.stage(),
            PlanSprints {
                sprint_length_days: 10,
                velocity_days_per_sprint: 14,
                enrich_with_llm: false,
            }
        );
    }

    #[test]
    fn test_fr05_flags_fill_defaults() {
        let cli = Cli::parse_from([
            "sprintpilot",
            "fr05",
            "--team-size",
            "6",
            "--sentiment-score",
            "-0.5",
        ]);
        let Commands::Fr05(args) = cli.command else {
            panic!("expected fr05");
        };
        let form = args.form();
        assert_eq!(form.team_size, 6);
        assert!((form.sentiment_score + 0.5).abs() < f64::EPSILON);
        assert_eq!(form.task_type, "Bug");
        assert_eq!(form.story_points, 5);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_base": "http://backend:9000"}"#).unwrap();

        let cli = Cli::parse_from([
            "sprintpilot",
            "--config",
            path.to_str().unwrap(),
            "--store",
            "/tmp/sp.json",
            "status",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/sp.json"));
        assert!(config.api_base.starts_with("http"));
    }

    #[test]
    fn test_invalid_api_base_is_rejected() {
        let cli = Cli::parse_from(["sprintpilot", "--api-base", "not a url", "status"]);
        assert!(load_config(&cli).is_err());
    }
}
