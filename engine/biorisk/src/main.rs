use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use biorisk_eval::{AssessmentRecord, EvaluationError, RiskEvaluator};
use biorisk_panel::{FluidType, Readings, UnknownFluidTypeError};
use biorisk_rules::{ConfigurationError, RuleTable};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use thiserror::Error;

mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "biorisk",
    version,
    about = "Rule-based disease-risk screening from body-fluid biomarker panels",
    long_about = "biorisk scores biomarker readings from one body fluid (blood, saliva,\n\
        urine or csf) against a reference rule table and reports a 0-100 risk\n\
        value, a risk level, contributing factors and a recommendation per disease.\n\n\
        The results are a screening aid, not a diagnosis.\n\n\
        EXAMPLES:\n\
        \n  biorisk evaluate --fluid blood readings.json        Text report\n\
        \n  echo '{\"glucose\": 126}' | biorisk evaluate --fluid blood --format json\n\
        \n  biorisk panels --fluid urine                       Recognised urine biomarkers\n\
        \n  biorisk rules --rules custom.toml                  Check and list a rule table"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a set of readings and print one prediction per disease
    Evaluate(EvaluateArgs),
    /// List recognised biomarkers, units and accepted ranges
    Panels(PanelsArgs),
    /// Self-check a rule table and print its disease reference data
    Rules(RulesArgs),
}

#[derive(Debug, Args, Clone)]
struct RulesSource {
    /// TOML rule table to use instead of the built-in one
    #[arg(long = "rules", value_name = "FILE", env = "BIORISK_RULES")]
    path: Option<PathBuf>,
}

impl RulesSource {
    fn load(&self) -> Result<RuleTable, ConfigurationError> {
        match &self.path {
            Some(path) => RuleTable::from_path(path),
            None => RuleTable::builtin(),
        }
    }
}

#[derive(Debug, Args, Clone)]
struct EvaluateArgs {
    /// Fluid the readings were taken from (blood, saliva, urine, csf)
    #[arg(long, value_name = "FLUID")]
    fluid: String,

    /// JSON object of readings (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(flatten)]
    rules: RulesSource,

    /// Append an assessment record to this NDJSON file
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// User identifier stored with the assessment record
    #[arg(long = "user", value_name = "ID", requires = "history")]
    user: Option<String>,
}

#[derive(Debug, Args, Clone)]
struct PanelsArgs {
    /// Only list this fluid
    #[arg(long, value_name = "FLUID")]
    fluid: Option<String>,
}

#[derive(Debug, Args, Clone)]
struct RulesArgs {
    /// Only list diseases of this fluid
    #[arg(long, value_name = "FLUID")]
    fluid: Option<String>,

    #[command(flatten)]
    rules: RulesSource,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {what}: {source}")]
    Read { what: String, source: io::Error },
    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("readings must be a JSON object of numbers or nulls: {0}")]
    Input(serde_json::Error),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error("failed to serialize output: {0}")]
    Output(serde_json::Error),
}

impl From<UnknownFluidTypeError> for CliError {
    fn from(err: UnknownFluidTypeError) -> Self {
        CliError::Evaluation(err.into())
    }
}

impl CliError {
    /// `1` for rejected input, `2` for I/O and configuration failures.
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Input(_) | CliError::Evaluation(_) => 1,
            CliError::Read { .. }
            | CliError::Write { .. }
            | CliError::Configuration(_)
            | CliError::Output(_) => 2,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn read_input(input: &Option<PathBuf>) -> Result<String, CliError> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            what: format!("'{}'", path.display()),
            source,
        })
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read {
                what: "stdin".to_string(),
                source,
            })?;
        Ok(buf)
    }
}

fn append_history(path: &Path, record: &AssessmentRecord) -> Result<(), CliError> {
    let line = record.to_json_line().map_err(CliError::Output)?;
    let write_err = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    writeln!(file, "{line}").map_err(write_err)?;
    log::info!("appended assessment to {}", path.display());
    Ok(())
}

fn run_evaluate(args: &EvaluateArgs, source: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let table = args.rules.load()?;
    let fluid: FluidType = args.fluid.parse()?;
    let raw: BTreeMap<String, Option<f64>> =
        serde_json::from_str(source).map_err(CliError::Input)?;
    let readings = Readings::parse(fluid, &raw).map_err(EvaluationError::from)?;
    let predictions = RiskEvaluator::new(&table).evaluate_readings(&readings);

    let rendered = match args.format {
        OutputFormat::Text => render::predictions_report(&table, fluid, &predictions),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&predictions).map_err(CliError::Output)?;
            json.push('\n');
            json
        }
    };
    out.write_all(rendered.as_bytes())
        .map_err(|source| CliError::Write {
            path: PathBuf::from("<stdout>"),
            source,
        })?;

    if let Some(history) = &args.history {
        let record = AssessmentRecord::now(args.user.clone(), &readings, predictions);
        append_history(history, &record)?;
    }
    Ok(())
}

fn parse_fluid_filter(fluid: &Option<String>) -> Result<Option<FluidType>, CliError> {
    Ok(fluid.as_deref().map(str::parse::<FluidType>).transpose()?)
}

fn run_panels(args: &PanelsArgs) -> Result<String, CliError> {
    let fluids = match parse_fluid_filter(&args.fluid)? {
        Some(fluid) => vec![fluid],
        None => FluidType::ALL.to_vec(),
    };
    Ok(render::panel_listing(&fluids))
}

fn run_rules(args: &RulesArgs) -> Result<String, CliError> {
    let fluid = parse_fluid_filter(&args.fluid)?;
    let table = args.rules.load()?;
    Ok(render::rules_listing(&table, fluid))
}

fn report(result: Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Evaluate(args) => {
            let source = match read_input(&args.input) {
                Ok(s) => s,
                Err(e) => return report(Err(e)),
            };
            let mut stdout = io::stdout().lock();
            report(run_evaluate(&args, &source, &mut stdout))
        }
        Command::Panels(args) => report(run_panels(&args).map(|text| print!("{text}"))),
        Command::Rules(args) => report(run_rules(&args).map(|text| print!("{text}"))),
    }
}

fn main() {
    std::process::exit(run_cli());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn evaluate_args(fluid: &str) -> EvaluateArgs {
        EvaluateArgs {
            fluid: fluid.to_string(),
            input: None,
            format: OutputFormat::Json,
            rules: RulesSource { path: None },
            history: None,
            user: None,
        }
    }

    fn run(args: &EvaluateArgs, source: &str) -> (Result<(), CliError>, String) {
        let mut out = Vec::new();
        let result = run_evaluate(args, source, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn cli_parses_evaluate_arguments() {
        let cli = Cli::try_parse_from([
            "biorisk", "-vv", "evaluate", "--fluid", "urine", "--format", "json", "--history",
            "h.ndjson", "--user", "u1", "in.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Evaluate(args) => {
                assert_eq!(args.fluid, "urine");
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.input, Some(PathBuf::from("in.json")));
                assert_eq!(args.history, Some(PathBuf::from("h.ndjson")));
                assert_eq!(args.user.as_deref(), Some("u1"));
            }
            other => panic!("expected evaluate, got {other:?}"),
        }
    }

    #[test]
    fn user_without_history_is_rejected() {
        let err = Cli::try_parse_from(["biorisk", "evaluate", "--fluid", "blood", "--user", "u1"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn fluid_is_required_for_evaluate() {
        assert!(Cli::try_parse_from(["biorisk", "evaluate"]).is_err());
    }

    #[test]
    fn json_output_follows_declaration_order() {
        let (result, out) = run(&evaluate_args("csf"), r#"{"cellCount": 30, "abeta42": 400}"#);
        result.unwrap();
        let alz = out.find("\"alzheimer\"").unwrap();
        let tumor = out.find("\"brainTumor\"").unwrap();
        assert!(alz < tumor);
    }

    #[test]
    fn rejected_input_exits_with_one() {
        let (result, out) = run(&evaluate_args("blood"), r#"{"foobar": 1}"#);
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("foobar"));
        assert!(out.is_empty());

        let (result, _) = run(&evaluate_args("sweat"), r#"{}"#);
        assert_eq!(result.unwrap_err().exit_code(), 1);

        let (result, _) = run(&evaluate_args("blood"), r#"{"glucose": "high"}"#);
        assert!(matches!(result.unwrap_err(), CliError::Input(_)));
    }

    #[test]
    fn broken_rule_table_exits_with_two() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        fs::write(&path, "[[disease]]\nfluid = \"blood\"\n").unwrap();

        let mut args = evaluate_args("blood");
        args.rules.path = Some(path.clone());
        let (result, _) = run(&args, "{}");
        assert_eq!(result.unwrap_err().exit_code(), 2);

        let err = run_rules(&RulesArgs {
            fluid: None,
            rules: RulesSource { path: Some(path) },
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn history_records_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let history = dir.path().join("history.ndjson");
        let mut args = evaluate_args("blood");
        args.format = OutputFormat::Text;
        args.history = Some(history.clone());
        args.user = Some("patient-7".into());

        let (result, out) = run(&args, r#"{"glucose": 126, "hba1c": 6.6, "ldl": null}"#);
        result.unwrap();
        assert!(out.contains("Diabetes"));
        run(&args, r#"{"ldl": 170}"#).0.unwrap();

        let text = fs::read_to_string(&history).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["userId"], "patient-7");
        assert_eq!(lines[0]["fluidType"], "blood");
        assert_eq!(
            lines[0]["biomarkers"],
            serde_json::json!({"glucose": 126.0, "hba1c": 6.6})
        );
        assert_eq!(lines[0]["predictions"]["diabetes"]["riskValue"], 100);
        assert!(lines[1]["predictions"].get("diabetes").is_none());
    }

    #[test]
    fn panels_and_rules_listings() {
        let listing = run_panels(&PanelsArgs {
            fluid: Some("saliva".into()),
        })
        .unwrap();
        assert!(listing.starts_with("saliva\n"));
        assert!(listing.contains("il6"));
        assert!(!listing.contains("glucose"));

        let err = run_panels(&PanelsArgs {
            fluid: Some("Blood".into()),
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), 1);

        let rules = run_rules(&RulesArgs {
            fluid: Some("csf".into()),
            rules: RulesSource { path: None },
        })
        .unwrap();
        assert!(rules.contains("csf/alzheimer"));
        assert!(rules.contains("csf/brainTumor"));
    }

    #[test]
    fn cli_help_mentions_subcommands() {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        cmd.write_long_help(&mut buf).unwrap();
        let help = String::from_utf8(buf).unwrap();
        assert!(help.contains("evaluate"));
        assert!(help.contains("panels"));
        assert!(help.contains("rules"));
        assert!(help.contains("EXAMPLES"));
    }
}
