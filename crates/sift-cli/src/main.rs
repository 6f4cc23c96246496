use std::cmp::Reverse;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use sift_config::SiftConfig;
use sift_matcher::{best_match, PatternMatch, PatternMatchKind, PatternMatcher};

#[derive(Parser)]
#[command(
    name = "sift",
    version,
    about = "Filter identifiers with camel-case aware patterns"
)]
struct Cli {
    /// Pattern to match, e.g. `GIA`, `get value` or `Con.WL`.
    pattern: String,

    /// Read candidates from this file instead of stdin (one per line).
    #[arg(long)]
    input: Option<PathBuf>,

    /// Fall back to edit-distance matching when nothing else matches.
    #[arg(long)]
    fuzzy: bool,

    /// Treat `@` as part of identifiers in the pattern.
    #[arg(long)]
    verbatim: bool,

    /// Report the matched ranges of each candidate.
    #[arg(long)]
    spans: bool,

    /// Emit JSON instead of tab-separated lines.
    #[arg(long)]
    json: bool,

    /// Print at most this many candidates.
    #[arg(long)]
    limit: Option<usize>,

    /// Config file (defaults to `$SIFT_CONFIG` when set).
    #[arg(long)]
    config: Option<PathBuf>,
}

/// An input line, split into its dotted container and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate<'a> {
    line: &'a str,
    container: Option<&'a str>,
    name: &'a str,
}

impl<'a> Candidate<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line.rsplit_once('.') {
            Some((container, name)) if !container.is_empty() => Self {
                line,
                container: Some(container),
                name,
            },
            _ => Self {
                line,
                container: None,
                name: line,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Hit<'a> {
    candidate: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    container: Option<&'a str>,
    name: &'a str,
    kind: PatternMatchKind,
    matches: Vec<PatternMatch>,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = SiftConfig::discover(cli.config.as_deref()).context("failed to load config")?;
    sift_config::init_tracing(&config.logging);

    let mut options = config.matcher;
    options.allow_fuzzy_matching |= cli.fuzzy;
    options.verbatim_identifier_prefix_is_word_character |= cli.verbatim;
    options.include_matched_spans |= cli.spans;

    let text = read_input(cli.input.as_ref())?;
    let candidates: Vec<Candidate<'_>> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Candidate::parse)
        .collect();

    let matcher = PatternMatcher::new(&cli.pattern, options);
    if matcher.is_invalid_pattern() {
        tracing::warn!(
            target: "sift.cli",
            pattern = %cli.pattern,
            "pattern has no matchable characters"
        );
    }

    let mut hits = filter_candidates(&matcher, &candidates);
    tracing::debug!(
        target: "sift.cli",
        candidates = candidates.len(),
        hits = hits.len(),
        cached = matcher.cached_candidate_count(),
        "filtered candidates"
    );
    matcher.dispose();

    if let Some(limit) = cli.limit {
        hits.truncate(limit);
    }

    print_hits(&hits, cli.json, cli.spans)?;
    Ok(if hits.is_empty() { 1 } else { 0 })
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let mut text = String::new();
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            BufReader::new(file)
                .read_to_string(&mut text)
                .with_context(|| format!("failed to read {}", path.display()))?;
        }
        None => {
            std::io::stdin()
                .lock()
                .read_to_string(&mut text)
                .context("failed to read candidates from stdin")?;
        }
    }
    Ok(text)
}

/// Matches every candidate in parallel and orders the hits best first, then
/// by name.
fn filter_candidates<'a>(
    matcher: &PatternMatcher,
    candidates: &[Candidate<'a>],
) -> Vec<Hit<'a>> {
    let mut hits: Vec<Hit<'a>> = candidates
        .par_iter()
        .filter_map(|candidate| {
            let matches = match (matcher.is_dotted_pattern(), candidate.container) {
                (true, Some(container)) => {
                    matcher.matches_with_container(candidate.name, container)
                }
                (true, None) => matcher.matches(candidate.line),
                (false, _) => matcher.matches(candidate.name),
            };
            let kind = best_match(&matches)?.kind;
            Some(Hit {
                candidate: candidate.line,
                container: candidate.container,
                name: candidate.name,
                kind,
                matches,
            })
        })
        .collect();

    hits.sort_by_cached_key(|hit| {
        (
            Reverse(best_match(&hit.matches).map(PatternMatch::rank_key)),
            hit.name,
            hit.candidate,
        )
    });
    hits
}

fn kind_label(kind: PatternMatchKind) -> &'static str {
    match kind {
        PatternMatchKind::Exact => "exact",
        PatternMatchKind::Prefix => "prefix",
        PatternMatchKind::Substring => "substring",
        PatternMatchKind::CamelCase => "camel_case",
        PatternMatchKind::Fuzzy => "fuzzy",
    }
}

fn print_hits(hits: &[Hit<'_>], json: bool, spans: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, hits)?;
        writeln!(out)?;
        return Ok(());
    }

    for hit in hits {
        write!(out, "{}\t{}", hit.candidate, kind_label(hit.kind))?;
        if spans {
            let ranges: Vec<String> = hit
                .matches
                .iter()
                .flat_map(|m| &m.matched_spans)
                .map(|range| format!("{}..{}", u32::from(range.start()), u32::from(range.end())))
                .collect();
            write!(out, "\t{}", ranges.join(","))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
