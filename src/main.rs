use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use tsens::ui::cli::args::{Cli, Command};
use tsens::ui::cli::commands;
use tsens::ui::cli::logging::init_tracing;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREY: &str = "\x1b[90m";

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Distribution(args) => {
            print_header("Weighted Label Distribution");
            emit(&commands::summarise_distribution(&args).context("failed to summarise labels")?)
        }
        Command::Combine(args) => {
            print_header("Ensemble Vote");
            emit(&commands::combine_from_file(&args).context("failed to combine members")?)
        }
        Command::Evaluate(args) => {
            print_header("Ensemble Train/Test");
            emit(&commands::evaluate(&args).context("evaluation failed")?)
        }
        Command::Schema(args) => emit(&commands::schema(&args)?),
    }
}

/// Header goes to stderr so stdout stays valid JSON.
fn print_header(title: &str) {
    eprintln!("{BOLD}{FG_CYAN}▶ {title}{RESET}  {}", timestamp_now());
    eprintln!(
        "{FG_GREY}────────────────────────────────────────────────────────────────────────{RESET}"
    );
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    format!(
        "{DIM}{}{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        RESET
    )
}
