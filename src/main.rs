use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use siterun::args::{build_pipeline_params, Mode};
use siterun::assets::StaticAssetCopier;
use siterun::config::Config;
use siterun::locator::generator_locator;
use siterun::logging::init_tracing;
use siterun::supervisor::{Supervisor, TokioLauncher};

/// Preprocess content and run the site generator.
#[derive(Debug, Parser)]
#[command(name = "siterun", version, about, disable_help_subcommand = true)]
struct Cli {
    /// Config file (default: ./siterun.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "siterun=trace" (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<RunCommand>,
}

/// `<mode> [args...]`. Nothing after the mode is parsed here; the
/// preprocessor gets every token, with `--<type> <strategy>` setting a
/// placement.
#[derive(Debug, Subcommand)]
enum RunCommand {
    #[command(external_subcommand)]
    Mode(Vec<String>),
}

impl RunCommand {
    fn split(self) -> (Option<String>, Vec<String>) {
        match self {
            RunCommand::Mode(mut words) => {
                if words.is_empty() {
                    return (None, words);
                }
                let mode = words.remove(0);
                (Some(mode), words)
            }
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    init_tracing(cli.log_level.as_deref());

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let (mode, args) = match cli.command {
        Some(command) => command.split(),
        None => (None, Vec::new()),
    };
    let mode = Mode::from_arg(mode.as_deref())?;
    let project_root = std::env::current_dir().context("failed to read working directory")?;
    let config = Config::load(cli.config.as_deref(), &project_root)
        .context("failed to load configuration")?;

    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id, %mode);
    let _enter = span.enter();

    let generator = generator_locator(&config.generator, &project_root).locate()?;
    let params = build_pipeline_params(mode, &args, &config, &generator);
    for warning in &params.warnings {
        tracing::warn!("{}", warning);
    }
    tracing::debug!("Resolved placements: {:?}", params.placements);

    let copier = StaticAssetCopier::from_config(&config.assets, &project_root);
    let supervisor = Supervisor::new(TokioLauncher::new())
        .with_asset_copy(Arc::new(copier), config.assets.await_copy);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let outcome = runtime.block_on(supervisor.run(&params.plan))?;
    Ok(outcome.exit_code)
}
