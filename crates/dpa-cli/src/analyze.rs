//! `analyze` and `score` subcommands.

use std::path::Path;

use anyhow::Context;
use dpa_core::{AppConfig, AttributeRecord};
use dpa_scraper::{domain_of, CollectRequest, Collector};

pub(crate) struct AnalyzeArgs {
    pub url: String,
    pub instagram: Option<String>,
    pub include_search: bool,
    pub json: bool,
}

pub(crate) async fn run_analyze(config: &AppConfig, args: &AnalyzeArgs) -> anyhow::Result<()> {
    if domain_of(&args.url).is_none() {
        anyhow::bail!("'{}' is not a valid website URL", args.url);
    }

    let collector = Collector::from_config(config).context("failed to build HTTP clients")?;
    if args.include_search && !config.search_enabled {
        tracing::warn!("search is disabled by DPA_SEARCH_ENABLED; skipping search presence");
    }

    let collected = collector
        .collect(CollectRequest {
            website_url: &args.url,
            include_search: args.include_search,
            profile: args.instagram.as_deref(),
        })
        .await;

    let analysis = dpa_analysis::analyze(collected.record, collected.search, collected.profile);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", analysis.report.text);
    }
    Ok(())
}

pub(crate) fn run_score(path: &Path) -> anyhow::Result<()> {
    let record = load_record(path)?;
    let report = dpa_analysis::score(Some(&record));
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_record(path: &Path) -> anyhow::Result<AttributeRecord> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid attribute record", path.display()))
}
