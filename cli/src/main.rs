use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sqlite_dialect_core::{
    RuleList, StatementKind, classify, create_table_rules, general_rules, insert_rules,
    is_suppressed, translate,
};
use sqlite_dialect_sqlite::{DeployPlan, Deployment, DialectConnection};
use tracing::Level;

const DEFAULT_PREFIX: &str = "dialect_";

/// Output format for translated statements.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

/// Built-in rule list selector.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliRuleList {
    CreateTable,
    Insert,
    General,
}

impl CliRuleList {
    fn rules(self) -> &'static RuleList {
        match self {
            Self::CreateTable => create_table_rules(),
            Self::Insert => insert_rules(),
            Self::General => general_rules(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sqlite-dialect")]
#[command(about = "Translate MySQL statements for SQLite and deploy them")]
struct Cli {
    /// Log translation and execution details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate one statement into SQLite syntax.
    Translate(TranslateArgs),
    /// Print the statement kind the classifier assigns.
    Classify(InputArgs),
    /// Print the built-in rewrite rules in application order.
    Rules(RulesArgs),
    /// Deploy a YAML plan of MySQL statements to a SQLite database.
    Deploy(DeployArgs),
    /// Show which plan versions a database has deployed.
    Status(StatusArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Statement text (reads stdin when neither this nor --file is given).
    #[arg(conflicts_with = "file")]
    statement: Option<String>,
    /// Read the statement from a file.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct TranslateArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct RulesArgs {
    /// Only print this list.
    #[arg(long)]
    list: Option<CliRuleList>,
}

#[derive(Debug, Args)]
struct DeployArgs {
    /// Database file path.
    #[arg(long)]
    db: PathBuf,
    /// YAML deploy plan.
    #[arg(long)]
    plan: PathBuf,
    /// Bookkeeping table prefix.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Database file path.
    #[arg(long)]
    db: PathBuf,
    /// Bookkeeping table prefix.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

#[derive(Debug, Serialize)]
struct TranslationOutput<'a> {
    kind: StatementKind,
    input: &'a str,
    output: &'a str,
    suppressed: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Translate(args) => run_translate(args),
        Command::Classify(args) => run_classify(args),
        Command::Rules(args) => run_rules(args),
        Command::Deploy(args) => run_deploy(args),
        Command::Status(args) => run_status(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn read_statement(input: InputArgs) -> Result<String, String> {
    if let Some(statement) = input.statement {
        return Ok(statement);
    }
    if let Some(path) = input.file {
        return fs::read_to_string(&path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()));
    }
    let mut statement = String::new();
    std::io::stdin()
        .read_to_string(&mut statement)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    Ok(statement)
}

fn run_translate(args: TranslateArgs) -> Result<(), String> {
    let statement = read_statement(args.input)?;
    let translated = translate(&statement);
    let suppressed = is_suppressed(&translated);

    match args.format {
        CliOutputFormat::Text => {
            if suppressed {
                eprintln!("Statement suppressed by skip marker; nothing to execute.");
            } else {
                println!("{}", translated.trim());
            }
        }
        CliOutputFormat::Json => {
            let output = TranslationOutput {
                kind: classify(&statement),
                input: statement.trim(),
                output: translated.trim(),
                suppressed,
            };
            let raw = serde_json::to_string_pretty(&output)
                .map_err(|err| format!("Failed to serialize translation: {err}"))?;
            println!("{raw}");
        }
    }
    Ok(())
}

fn run_classify(args: InputArgs) -> Result<(), String> {
    let statement = read_statement(args)?;
    println!("{}", classify(&statement));
    Ok(())
}

fn run_rules(args: RulesArgs) -> Result<(), String> {
    let lists: Vec<&RuleList> = match args.list {
        Some(list) => vec![list.rules()],
        None => vec![create_table_rules(), insert_rules(), general_rules()],
    };

    for (n, list) in lists.iter().enumerate() {
        if n > 0 {
            println!();
        }
        println!("{} ({} rules)", list.name(), list.len());
        for (idx, rule) in list.iter().enumerate() {
            println!("{:>3}  {}", idx + 1, rule.pattern());
            println!("     -> {:?}", rule.replacement());
        }
    }
    Ok(())
}

fn run_deploy(args: DeployArgs) -> Result<(), String> {
    let plan = DeployPlan::load(&args.plan)
        .map_err(|e| format!("Failed to load plan '{}': {e}", args.plan.display()))?;
    let conn = DialectConnection::open(&args.db)
        .map_err(|e| format!("Failed to open database '{}': {e}", args.db.display()))?;
    let mut deployment = Deployment::new(conn, &args.prefix)
        .map_err(|e| format!("Failed to initialize deployment: {e}"))?;

    let report = deployment
        .deploy(&plan)
        .map_err(|e| format!("Deploy of '{}' failed: {e}", plan.version))?;

    if report.already_deployed {
        println!(
            "Plan '{}' already deployed to '{}'; nothing to do.",
            report.version,
            args.db.display()
        );
        return Ok(());
    }
    println!("Deploy of '{}' complete:", report.version);
    println!("  Statements executed: {}", report.executed);
    println!("  Statements skipped: {}", report.skipped);
    println!("  Existing objects tolerated: {}", report.tolerated);
    Ok(())
}

fn run_status(args: StatusArgs) -> Result<(), String> {
    let conn = DialectConnection::open(&args.db)
        .map_err(|e| format!("Failed to open database '{}': {e}", args.db.display()))?;
    let deployment = Deployment::new(conn, &args.prefix)
        .map_err(|e| format!("Failed to initialize deployment: {e}"))?;
    let status = deployment
        .status()
        .map_err(|e| format!("Failed to get status: {e}"))?;

    if !status.table_exists {
        println!("No deployments recorded in '{}'.", args.db.display());
        return Ok(());
    }
    println!("Deployments ({}):", status.deployments.len());
    for deployed in &status.deployments {
        println!(
            "  {}  {} statement(s)  {}",
            deployed.version, deployed.statement_count, deployed.deployed_at
        );
    }
    Ok(())
}
