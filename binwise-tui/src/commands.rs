//! One-shot subcommands.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use binwise_core::{BinwiseService, QuizAnswers, RegionCode, RegionMeta, SearchOutcome};
use tokio::fs;
use tracing::{info, warn};

use crate::cli::{Command, OutputFormat};
use crate::config::Config;
use crate::output::{self, Lookup};

/// Exit status of a search that recognised no material.
const NOT_FOUND: u8 = 2;

pub(crate) async fn run(command: Command, service: &BinwiseService, config: &Config) -> Result<ExitCode> {
    let mut out = io::stdout();
    match command {
        Command::Regions { output } => {
            let regions: Vec<RegionMeta> = service
                .regions()
                .into_iter()
                .map(|(code, name)| RegionMeta { code, name })
                .collect();
            output::print_regions(&mut out, &regions, output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Classify {
            region,
            label,
            output,
        } => {
            let region = resolve_region(service, region, config);
            let outcome = SearchOutcome::Found(service.classify_label(&region, &label));
            print(&mut out, &region, &label, &outcome, output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Search {
            region,
            query,
            output,
        } => {
            let region = resolve_region(service, region, config);
            let query = query.join(" ");
            let outcome = service.classify_query(&region, &query);
            print(&mut out, &region, &query, &outcome, output)?;
            Ok(match outcome {
                SearchOutcome::Found(_) => ExitCode::SUCCESS,
                SearchOutcome::NotFound => ExitCode::from(NOT_FOUND),
            })
        }
        Command::Questions { output } => {
            output::print_questionnaire(&mut out, service.questionnaire(), output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Footprint { answers, output } => {
            let answers = read_answers(&answers).await?;
            let report = service
                .score_footprint(&answers)
                .await
                .context("Footprint scoring failed")?;
            output::print_report(&mut out, &report, output)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Region given on the command line, or the configured default.
fn resolve_region(service: &BinwiseService, requested: Option<String>, config: &Config) -> RegionCode {
    let region = requested.map_or_else(|| config.region.clone(), RegionCode::from);
    if service.lookup(&region).is_none() {
        warn!(%region, default = %config.region, "unknown region, using default catalog");
    }
    region
}

fn print<W: Write>(
    out: &mut W,
    region: &RegionCode,
    input: &str,
    outcome: &SearchOutcome,
    format: OutputFormat,
) -> io::Result<()> {
    let lookup = Lookup {
        region,
        input,
        outcome,
    };
    output::print_lookup(out, &lookup, format)
}

async fn read_answers(path: &Path) -> Result<QuizAnswers> {
    let text = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let answers: QuizAnswers = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON object of answers", path.display()))?;
    info!(path = %path.display(), answers = answers.len(), "loaded answers");
    Ok(answers)
}
