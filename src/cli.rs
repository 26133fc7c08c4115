use crate::api::{self, ExportRequest};
use crate::config::ExportConfig;
use crate::runtime::block_on;
use crate::services::{ActivityLogger, LocalFsCache};
use crate::tools::export::Format;
use crate::types::{ApiResponse, Mode};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "epack-export", version, about = "Export e-Pack collection and checklist pages to CSV")]
pub struct Cli {
    /// Raise log verbosity (`-v` = debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to config.json in the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export a saved page (path, `-` for stdin, or URL) to CSV/JSON
    Export(ExportArgs),
    #[command(subcommand)]
    Rules(RulesCmd),
    /// Show the activity log, newest first
    Log {
        #[arg(long)]
        errors: bool,
    },
}

#[derive(Args)]
struct ExportArgs {
    input: String,
    #[arg(long, default_value = "collection")]
    mode: Mode,
    #[arg(long, default_value = "csv")]
    format: Format,
    /// Output file
    #[arg(short, long)]
    out: Option<PathBuf>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Use cached or built-in rules only
    #[arg(long)]
    offline: bool,
    #[arg(long)]
    rules_url: Option<String>,
    /// Treat a bare checkmark on the physical icon as "Yes"
    #[arg(long)]
    checkmark_yes: bool,
    /// Leave Physical/Locked/Wishlist empty
    #[arg(long)]
    no_icon_flags: bool,
}

#[derive(Subcommand)]
enum RulesCmd {
    /// Print the rules table in effect and where it came from
    Show {
        #[arg(long)]
        offline: bool,
    },
    /// Delete the persisted rules cache
    Clear {
        #[arg(long = "yes")]
        yes: bool,
    },
    /// Print the serial the rules give for a set and rarity
    Lookup {
        set: String,
        rarity: String,
        #[arg(long)]
        offline: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default = if verbose == 0 { "warn" } else { "debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ExportConfig> {
    match path {
        Some(p) => ExportConfig::load_from(p).with_context(|| format!("reading config {}", p.display())),
        None => ExportConfig::load().context("reading user config"),
    }
}

impl ExportArgs {
    fn apply(&self, cfg: &mut ExportConfig) {
        if self.offline {
            cfg.offline = true;
        }
        if let Some(url) = &self.rules_url {
            cfg.rules_url = Some(url.clone());
        }
        if self.checkmark_yes {
            cfg.physical_checkmark_means_yes = true;
        }
        if self.no_icon_flags {
            cfg.icon_flags = false;
        }
        if let Some(dir) = &self.out_dir {
            cfg.out_dir = Some(dir.clone());
        }
    }
}

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = load_config(cli.config.as_ref())?;
    let cache = LocalFsCache::new(&cfg.rules_cache_key).context("opening rules cache")?;

    let ok = match cli.cmd {
        Command::Export(args) => {
            args.apply(&mut cfg);
            let req = ExportRequest {
                input: args.input,
                mode: args.mode,
                format: args.format,
                out: args.out,
            };
            finish(block_on(api::run_export(&cache, &cfg, &req)).and_then(|r| r))
        }
        Command::Rules(rc) => rules_cmd(&cache, &mut cfg, rc),
        Command::Log { errors } => {
            let logger = ActivityLogger::new().context("opening activity log")?;
            finish(logger.read_logs(errors))
        }
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn rules_cmd(cache: &LocalFsCache, cfg: &mut ExportConfig, rc: RulesCmd) -> bool {
    match rc {
        RulesCmd::Show { offline } => {
            cfg.offline |= offline;
            finish(block_on(api::rules_show(cache, cfg)).and_then(|r| r))
        }
        RulesCmd::Clear { yes } => {
            if !yes {
                print_json(ApiResponse::<()>::err("refusing to clear without --yes"));
                return false;
            }
            finish(api::rules_clear(cache).map(|_| serde_json::json!({ "cleared": cache.path() })))
        }
        RulesCmd::Lookup { set, rarity, offline } => {
            cfg.offline |= offline;
            finish(block_on(api::rules_lookup(cache, cfg, &set, &rarity)).and_then(|r| r))
        }
    }
}

fn finish<T: serde::Serialize>(res: crate::Result<T>) -> bool {
    match res {
        Ok(v) => {
            print_json(ApiResponse::ok(v));
            true
        }
        Err(e) => {
            print_json(ApiResponse::<()>::err(e.to_string()));
            false
        }
    }
}

fn print_json<T: serde::Serialize>(val: T) {
    match serde_json::to_string_pretty(&val) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("could not render output: {e}"),
    }
}
