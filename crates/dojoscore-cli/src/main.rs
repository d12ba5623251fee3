//! dojoscore CLI — the operator-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dojoscore", version, about = "Training progression, quiz scoring, and ROI metrics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute fleet-wide ROI metrics
    Roi {
        /// Hours saved per mentor interaction (overrides config)
        #[arg(long)]
        time_saved: Option<f64>,

        /// Cost per employee hour (overrides config)
        #[arg(long)]
        cost_per_hour: Option<f64>,

        /// Minimum sessions to count as active (overrides config)
        #[arg(long)]
        threshold: Option<u64>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Save a report snapshot to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two saved ROI snapshots
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if the total value declined
        #[arg(long)]
        fail_on_decline: bool,
    },

    /// Show one user's belt and progress
    Progress {
        /// Username to look up
        #[arg(long)]
        username: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write progress for a user
    Record {
        /// Username to update
        #[arg(long)]
        username: String,

        /// Overwrite the stored score
        #[arg(long)]
        set_score: Option<u64>,

        /// Add points on top of the stored score
        #[arg(long)]
        add_points: Option<u64>,

        /// Count one usage session
        #[arg(long)]
        session: bool,

        /// Use a checked (compare-and-swap) write where the backend supports it
        #[arg(long)]
        checked: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a quiz submission against a question set
    Grade {
        /// Question set file (.toml or .json)
        #[arg(long)]
        questions: PathBuf,

        /// Submitted answers JSON (question index -> option text)
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Persist earned points to this user
        #[arg(long)]
        username: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List all users with their belts
    Roster {
        /// Output format: table, csv
        #[arg(long, default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and an example question set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dojoscore=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roi {
            time_saved,
            cost_per_hour,
            threshold,
            format,
            output,
            config,
        } => commands::roi::execute(time_saved, cost_per_hour, threshold, format, output, config)
            .await,
        Commands::Compare {
            baseline,
            current,
            format,
            fail_on_decline,
        } => commands::compare::execute(baseline, current, format, fail_on_decline),
        Commands::Progress { username, config } => {
            commands::progress::execute(username, config).await
        }
        Commands::Record {
            username,
            set_score,
            add_points,
            session,
            checked,
            config,
        } => {
            commands::record::execute(username, set_score, add_points, session, checked, config)
                .await
        }
        Commands::Grade {
            questions,
            answers,
            username,
            config,
        } => commands::grade::execute(questions, answers, username, config).await,
        Commands::Roster { format, config } => commands::roster::execute(format, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
