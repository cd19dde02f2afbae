mod config;
mod json_types;
mod repl;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gratex_latex::{escape_for_embedding, translate};
use gratex_payload::{
    expression_json, expression_value, GraphMode, GraphRequest, LabelSize, RenderJob, ZoomLevel,
};

use crate::config::CliConfig;
use crate::json_types::{PayloadJsonOutput, TranslateJsonOutput, SCHEMA_VERSION};

#[derive(Parser)]
#[command(
    name = "gratex_cli",
    version,
    about = "Graphing-notation to LaTeX, plus page payloads for the GraTeX calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate one expression to LaTeX
    Translate(TranslateArgs),
    /// Build the page scripts and JSON payload for one expression
    Payload(PayloadArgs),
    /// Interactive translation loop
    Repl,
    /// Show the active configuration, or write the default file
    Config(ConfigArgs),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct TranslateArgs {
    /// Expression in graphing shorthand or LaTeX
    expression: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args)]
struct PayloadArgs {
    /// Expression in graphing shorthand or LaTeX
    expression: String,
    /// Graph mode: 2d or 3d
    #[arg(long)]
    mode: Option<String>,
    /// Label size: 1, 2, 3, 4, 6 or 8
    #[arg(long)]
    label_size: Option<u8>,
    /// Zoom level between -3 and 3
    #[arg(long, allow_negative_numbers = true)]
    zoom: Option<i8>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args)]
struct ConfigArgs {
    /// Write the default configuration to gratex.toml
    #[arg(long)]
    init: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Translate(args) => run_translate(args),
        Command::Payload(args) => {
            let config = CliConfig::load();
            run_payload(args, &config)
        }
        Command::Repl => repl::run(),
        Command::Config(args) => run_config(args),
    }
}

fn run_translate(args: TranslateArgs) -> Result<()> {
    if args.expression.trim().is_empty() {
        bail!("expression must not be empty");
    }
    let latex = translate(&args.expression);
    let escaped = escape_for_embedding(&latex);
    match args.format {
        OutputFormat::Text => {
            println!("LaTeX: {latex}");
            println!("JS:    {escaped}");
        }
        OutputFormat::Json => {
            let output = TranslateJsonOutput {
                schema_version: SCHEMA_VERSION,
                source: args.expression,
                latex,
                escaped,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_payload(args: PayloadArgs, config: &CliConfig) -> Result<()> {
    let mode: GraphMode = args
        .mode
        .as_deref()
        .unwrap_or(&config.default_mode)
        .parse()?;
    let label_size = LabelSize::try_from(args.label_size.unwrap_or(config.default_label_size))?;
    let zoom = ZoomLevel::new(args.zoom.unwrap_or(config.default_zoom))?;

    let request = GraphRequest::new(args.expression)?
        .with_mode(mode)
        .with_label_size(label_size)
        .with_zoom(zoom);
    let job = RenderJob::prepare(&request);

    match args.format {
        OutputFormat::Text => {
            for warning in &job.warnings {
                println!("note: {warning}");
            }
            println!("mode:       {}", request.mode);
            println!("label size: {}", request.label_size);
            println!("zoom:       {}", request.zoom);
            println!("latex:      {}", job.latex);
            println!("payload:    {}", expression_json(&job.latex));
            println!("--- expression script ---");
            println!("{}", job.expression_script);
            if let Some(script) = &job.bounds_script {
                println!("--- bounds script ---");
                println!("{script}");
            }
        }
        OutputFormat::Json => {
            let output = PayloadJsonOutput {
                schema_version: SCHEMA_VERSION,
                mode: request.mode,
                label_size: request.label_size.as_u8(),
                zoom: request.zoom.level(),
                expression_json: expression_value(&job.latex),
                latex: job.latex,
                expression_script: job.expression_script,
                bounds_script: job.bounds_script,
                warnings: job.warnings,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_config(args: ConfigArgs) -> Result<()> {
    if args.init {
        CliConfig::default().save()?;
        println!("Wrote {}", CliConfig::FILE_NAME);
    } else {
        print!("{}", toml::to_string_pretty(&CliConfig::load())?);
    }
    Ok(())
}
