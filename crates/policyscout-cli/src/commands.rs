//! Command handlers for the CLI.
//!
//! These are called from `main` after config and the discovery client are
//! established. Per-domain failures in batch runs are logged and recorded,
//! never propagated, so a single bad domain does not abort the run.

use std::path::Path;

use policyscout_scraper::{Discovery, ScrapeError};

/// Runs discovery for one domain and prints the result as JSON (or, with
/// `simple`, just the URL).
pub(crate) async fn run_discover(
    discovery: &Discovery,
    domain: &str,
    simple: bool,
) -> anyhow::Result<()> {
    if simple {
        if let Some(url) = discovery.discover_simple(domain).await {
            println!("{url}");
        }
        return Ok(());
    }

    let result = discovery.discover(domain).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Runs batch discovery over the given domains (plus any read from `file`)
/// and prints the result map as JSON keyed by domain.
pub(crate) async fn run_batch(
    discovery: &Discovery,
    mut domains: Vec<String>,
    file: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(path) = file {
        domains.extend(read_domain_file(path)?);
    }
    if domains.is_empty() {
        anyhow::bail!("no domains given; pass them as arguments or via --file");
    }

    let results = discovery.batch_discover(&domains).await;
    let hits = results
        .values()
        .filter(|r| r.privacy_policy_url.is_some())
        .count();

    println!("{}", serde_json::to_string_pretty(&results)?);
    eprintln!("found policies for {hits} of {} domains", results.len());
    Ok(())
}

/// Scrapes one URL, distinguishing validated, partial, and failed outcomes.
pub(crate) async fn run_scrape(discovery: &Discovery, url: &str) -> anyhow::Result<()> {
    match discovery.scrape(url).await {
        Ok(outcome) => {
            if !outcome.is_full() {
                eprintln!("warning: content did not validate as a policy; returning best effort");
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Err(e @ ScrapeError::Blocked { .. }) => {
            anyhow::bail!("{e}")
        }
        Err(e) => Err(e.into()),
    }
}

/// Prints the categorized page inventory for one domain.
pub(crate) async fn run_pages(discovery: &Discovery, domain: &str) -> anyhow::Result<()> {
    let pages = discovery.discover_relevant_pages(domain).await?;
    println!("{}", serde_json::to_string_pretty(&pages)?);
    Ok(())
}

/// Reads one domain per line, skipping blanks and `#` comments.
fn read_domain_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}
