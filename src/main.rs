use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use pf_trade_calculator::config::Config;
use pf_trade_calculator::core::TradeRequest;
use pf_trade_calculator::models::{AccountTier, Stage, TradeAction};
use pf_trade_calculator::report::{self, ReportStyle};
use pf_trade_calculator::repository;

#[derive(Parser)]
#[command(name = "pf-calc", about = "Prop firm / real account trade calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive lots, TP/SL and balance for one trade
    Calc {
        /// Account size (100K, 50K, 25K, 5K); defaults to DEFAULT_ACCOUNT
        #[arg(long, short)]
        account: Option<AccountTier>,
        #[arg(long, default_value = "evaluation")]
        stage: Stage,
        /// Segment name, e.g. "P1 1ST TRADE"
        #[arg(long)]
        segment: String,
        #[arg(long)]
        action: TradeAction,
        /// Open price on the prop firm account
        #[arg(long, allow_negative_numbers = true)]
        pf_open: f64,
        /// Open price on the real account
        #[arg(long, allow_negative_numbers = true)]
        real_open: f64,
        #[arg(long, value_enum, default_value_t = ReportStyle::Table)]
        style: ReportStyle,
    },
    /// List the segment tables
    Segments {
        /// Only this stage; both when omitted
        #[arg(long)]
        stage: Option<Stage>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut repo = repository::from_config(&cfg);
    let reference = repo
        .load()
        .await
        .with_context(|| format!("Failed to load reference data from {}", repo.name()))?;
    info!(
        "Reference data ready ({}, loaded {})",
        reference.source(),
        reference.loaded_at().to_rfc3339()
    );

    match cli.command {
        Command::Calc {
            account,
            stage,
            segment,
            action,
            pf_open,
            real_open,
            style,
        } => {
            if !pf_open.is_finite() || !real_open.is_finite() {
                anyhow::bail!("Open prices must be finite numbers");
            }

            let req = TradeRequest {
                account: account.unwrap_or(cfg.default_account),
                stage,
                segment,
                action,
                pf_open,
                real_open,
            };
            let result = req.evaluate(&reference)?;
            if result.is_zero() {
                info!(
                    "Known {} segments: {}",
                    stage,
                    reference.segment_names(stage).join(", ")
                );
            }
            println!("{}", report::render(&req, &result, &reference, style)?);
        }
        Command::Segments { stage } => {
            let stages = match stage {
                Some(s) => vec![s],
                None => Stage::ALL.to_vec(),
            };
            for (i, s) in stages.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", report::render_segments(&reference, s));
            }
        }
    }

    Ok(())
}
