use anyhow::Context;
use clap::Parser;
use safe_bet::{
    SafeBetConfig,
    init_tracing,
    replay::{
        self,
        Script,
    },
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "safe-bet",
    about = "Replay a wagering session script against an in-memory ledger",
    version
)]
struct Args {
    /// JSON session script to replay
    #[arg(short, long)]
    script: PathBuf,

    /// JSON deployment config; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log each operation to stderr (filter with RUST_LOG)
    #[arg(short, long, default_value = "false")]
    tracing: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.tracing {
        init_tracing();
    }

    let config = match &args.config {
        Some(path) => SafeBetConfig::load(path).context("loading config")?,
        None => SafeBetConfig::default(),
    };
    let script = Script::load(&args.script).context("loading script")?;
    tracing::info!(
        steps = script.steps.len(),
        option_authority = ?config.option_authority,
        "replaying session"
    );

    let report = replay::run(config, &script)?;
    let rejected = report
        .steps
        .iter()
        .filter(|step| !step.outcome.is_accepted())
        .count();
    tracing::info!(rejected, "replay finished");

    let json =
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}
