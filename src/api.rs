use crate::config::ExportConfig;
use crate::engine::Engine;
use crate::error::{ExportError, Result};
use crate::rules::{LoadedRules, RulesIndex, RulesOrigin, RulesRepository};
use crate::services::fetch::{build_client, fetch_document};
use crate::services::log::ActivityLogger;
use crate::services::store::RulesCache;
use crate::tools::export::{default_file_name, write_records, Format};
use crate::types::{CardRecord, ExtractOptions, Mode};
use chrono::Local;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

// Logging helpers ignore failures so they never break an export.
fn log_info(mode: Option<&str>, event: &str, details: Option<&str>) {
    if let Ok(logger) = ActivityLogger::new() {
        let _ = logger.info(mode, event, details);
    }
}

fn log_error(mode: Option<&str>, event: &str, details: Option<&str>) {
    if let Ok(logger) = ActivityLogger::new() {
        let _ = logger.error(mode, event, details);
    }
}

/* ------------ export ------------ */

/// One export run.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Saved HTML path, `-` for stdin, or an `http(s)://` URL.
    pub input: String,
    pub mode: Mode,
    pub format: Format,
    /// Output file; defaults to `epack_<mode>_<date>.<ext>` in `out_dir`.
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
    pub mode: Mode,
    pub rules_origin: RulesOrigin,
    pub rules_version: String,
}

/// Resolve the rules table for a run according to `cfg`.
pub async fn load_rules<C: RulesCache>(cache: &C, cfg: &ExportConfig) -> Result<LoadedRules> {
    let repo = RulesRepository::new(cache, cfg.remote_rules_url(), cfg.timeout_ms)?;
    Ok(repo.ensure_rules_loaded().await)
}

/// Read the document: stdin for `-`, HTTP for URLs, else a file path.
pub async fn read_document(input: &str, timeout_ms: u64) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ExportError::InvalidInput("no input document given".into()));
    }
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    if input.starts_with("http://") || input.starts_with("https://") {
        let client = build_client(timeout_ms)?;
        return fetch_document(&client, input).await;
    }
    Ok(std::fs::read_to_string(input)?)
}

/// Build records from HTML; an empty result is an error.
pub fn extract_records(html: &str, rules: &RulesIndex, opts: ExtractOptions) -> Result<Vec<CardRecord>> {
    let records = Engine::new(rules, opts).build_records_from_html(html);
    if records.is_empty() {
        return Err(ExportError::NoCards {
            mode: opts.mode.to_string(),
        });
    }
    Ok(records)
}

fn output_path(cfg: &ExportConfig, req: &ExportRequest) -> PathBuf {
    if let Some(out) = &req.out {
        return out.clone();
    }
    let name = default_file_name(req.mode, req.format, Local::now().date_naive());
    match &cfg.out_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

async fn export_inner<C: RulesCache>(cache: &C, cfg: &ExportConfig, req: &ExportRequest) -> Result<ExportSummary> {
    let loaded = load_rules(cache, cfg).await?;
    let index = RulesIndex::new(&loaded.table);

    let html = read_document(&req.input, cfg.timeout_ms).await?;
    let records = extract_records(&html, &index, cfg.extract_options(req.mode))?;

    let path = output_path(cfg, req);
    write_records(&path, &records, req.format, req.mode)?;

    Ok(ExportSummary {
        path,
        records: records.len(),
        mode: req.mode,
        rules_origin: loaded.origin,
        rules_version: loaded.table.version,
    })
}

/// Rules, then document, then records, then one file write.
///
/// Nothing is written unless every step succeeds.
pub async fn run_export<C: RulesCache>(cache: &C, cfg: &ExportConfig, req: &ExportRequest) -> Result<ExportSummary> {
    let start_time = Instant::now();
    let result = export_inner(cache, cfg, req).await;
    let duration = start_time.elapsed();
    let mode = req.mode.as_str();

    match &result {
        Ok(summary) => {
            let details = format!(
                "succeeded in {}ms, {} rows, rules {}",
                duration.as_millis(),
                summary.records,
                summary.rules_origin
            );
            log_info(Some(mode), "export", Some(&details));
        }
        Err(e) => {
            let details = format!("failed in {}ms: {e}", duration.as_millis());
            log_error(Some(mode), "export", Some(&details));
        }
    }
    result
}

/* ------------ rules helpers ------------ */

pub async fn rules_show<C: RulesCache>(cache: &C, cfg: &ExportConfig) -> Result<LoadedRules> {
    let loaded = load_rules(cache, cfg).await?;
    log_info(None, "rules_show", Some(&format!("origin {}", loaded.origin)));
    Ok(loaded)
}

pub fn rules_clear<C: RulesCache>(cache: &C) -> Result<()> {
    let result = cache.clear();
    match &result {
        Ok(_) => log_info(None, "rules_clear", Some("succeeded")),
        Err(e) => log_error(None, "rules_clear", Some(&e.to_string())),
    }
    result
}

/// Result of `rules lookup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RulesLookup {
    pub serial: String,
    pub rules_origin: RulesOrigin,
    pub rules_version: String,
    pub display: &'static str,
}

/// Serial cell the rules give for (set, rarity), with the table it came from.
pub async fn rules_lookup<C: RulesCache>(cache: &C, cfg: &ExportConfig, set: &str, rarity: &str) -> Result<RulesLookup> {
    let loaded = load_rules(cache, cfg).await?;
    let index = RulesIndex::new(&loaded.table);
    Ok(RulesLookup {
        serial: index.serial_for(set, rarity),
        rules_origin: loaded.origin,
        rules_version: index.version().to_string(),
        display: index.display().as_str(),
    })
}
