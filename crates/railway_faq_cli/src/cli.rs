use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "railway-faq", version)]
#[command(about = "Answer Indian Railways questions from a fixed FAQ")]
pub struct Cli {
    /// Config file (defaults to <config dir>/railway-faq/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON-lines corpus replacing the built-in railway FAQ
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Minimum similarity a match must exceed
    #[arg(long, global = true)]
    pub threshold: Option<f32>,

    /// Translate queries to English and log queries and feedback
    #[arg(long, global = true)]
    pub extended: bool,

    /// Directory holding query_log.csv and feedback_log.csv
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Skip translation even in extended mode
    #[arg(long, global = true)]
    pub no_translate: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Answer a single question
    Ask {
        question: String,
        #[arg(long)]
        show_score: bool,
    },
    /// Interactive session
    Chat,
    /// Record a rating and comment (extended mode)
    Feedback {
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Print logged queries, or feedback with --feedback
    Logs {
        #[arg(long)]
        feedback: bool,
    },
    /// List the active corpus or export it as JSON lines
    Corpus {
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Run evaluation cases against the matcher
    Eval {
        #[arg(long)]
        cases: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        min_pass_rate: f32,
    },
}
