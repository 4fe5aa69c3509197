mod cli;
mod config;
mod repl;

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use railway_faq_core::{
    evaluate_cases, load_corpus_jsonl, save_corpus_jsonl, Assistant, EvalCase, FaqCorpus,
    HttpTranslator, Matcher, SessionLog,
};

use crate::cli::{Cli, Commands};
use crate::config::Config;

fn read_eval_cases_json(path: &Path) -> Result<Vec<EvalCase>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let cases: Vec<EvalCase> = serde_json::from_reader(file).context("parse eval cases json")?;
    Ok(cases)
}

fn load_corpus(config: &Config) -> Result<FaqCorpus> {
    match &config.corpus {
        Some(path) => load_corpus_jsonl(path)
            .with_context(|| format!("load corpus {}", path.display())),
        None => Ok(FaqCorpus::railway()),
    }
}

fn build_assistant(config: &Config) -> Result<Assistant> {
    let matcher = Matcher::new(load_corpus(config)?, config.threshold);
    let mut assistant = Assistant::new(matcher);

    if config.extended {
        assistant = assistant.with_log(SessionLog::in_dir(&config.log_dir));

        if config.translate.enabled {
            let translator = HttpTranslator::new(
                config.translate.endpoint.clone(),
                config.translate.target_lang.clone(),
                Duration::from_secs(config.translate.timeout_secs),
            )
            .context("build translation client")?;
            assistant = assistant.with_translator(Box::new(translator));
        }
    }

    Ok(assistant)
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::resolve(&cli)?;

    match &cli.command {
        Commands::Ask {
            question,
            show_score,
        } => {
            let assistant = build_assistant(&config)?;
            let reply = assistant.handle(question);

            if *show_score {
                println!("decision={:?}", reply.retrieval.decision);
                println!("score={:.4}", reply.retrieval.score);
                println!(
                    "entry={}",
                    reply
                        .retrieval
                        .entry_index
                        .map(|i| i.to_string())
                        .unwrap_or_else(|| "null".to_string())
                );
            }
            println!("{}", reply.answer);
        }
        Commands::Chat => {
            let assistant = build_assistant(&config)?;
            repl::run_chat(&assistant)?;
        }
        Commands::Feedback { rating, comment } => {
            let assistant = build_assistant(&config)?;
            let record = assistant
                .submit_feedback(*rating, comment)
                .context("record feedback")?;
            println!("Thanks for your feedback! rating={}", record.rating);
        }
        Commands::Logs { feedback } => {
            let log = SessionLog::in_dir(&config.log_dir);
            if *feedback {
                for r in log.feedback.load().context("read feedback log")? {
                    println!(
                        "{} rating={} comment={}",
                        r.timestamp.to_rfc3339(),
                        r.rating,
                        r.comment
                    );
                }
            } else {
                for r in log.queries.load().context("read query log")? {
                    println!("{} {}", r.timestamp.to_rfc3339(), r.query);
                }
            }
        }
        Commands::Corpus { export } => {
            let corpus = load_corpus(&config)?;
            match export {
                Some(path) => {
                    save_corpus_jsonl(path, &corpus)
                        .with_context(|| format!("write {}", path.display()))?;
                    println!("exported_entries={} output={}", corpus.len(), path.display());
                }
                None => {
                    for (i, entry) in corpus.entries().iter().enumerate() {
                        println!("{i}\t{}\t{}", entry.question, entry.answer);
                    }
                }
            }
        }
        Commands::Eval {
            cases,
            min_pass_rate,
        } => {
            let run_id = format!("eval-{}", chrono::Utc::now().timestamp_millis());
            let matcher = Matcher::new(load_corpus(&config)?, config.threshold);
            let cases = read_eval_cases_json(cases)?;
            let summary = evaluate_cases(&matcher, &cases);

            for o in &summary.outcomes {
                println!(
                    "case={} passed={} decision={:?} entry={} score={:.4} latency={:.1}ms",
                    o.case_id,
                    o.passed,
                    o.actual_decision,
                    o.actual_entry
                        .map(|i| i.to_string())
                        .unwrap_or_else(|| "null".to_string()),
                    o.score,
                    o.latency_ms
                );
            }

            let meets = summary.pass_rate >= *min_pass_rate;
            println!(
                "run_id={} threshold={:.2} total={} passed={} failed={} pass_rate={:.4} required={:.4} meets_threshold={}",
                run_id,
                matcher.threshold(),
                summary.total,
                summary.passed,
                summary.failed,
                summary.pass_rate,
                min_pass_rate,
                meets
            );

            if !meets {
                anyhow::bail!(
                    "pass rate {:.4} below required {:.4}",
                    summary.pass_rate,
                    min_pass_rate
                );
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
