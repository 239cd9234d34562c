use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::{self, Settings};
use crate::installer::{CloneTarget, DryRunRunner, SystemRunner};
use crate::provision::{self, Options, Report};
use crate::select::RetryPolicy;

#[derive(Parser, Debug)]
#[command(name = "firstboot", version, about = "Pick an optional desktop environment, install it from its repository, and reboot.")]
pub struct Cli {
    /// GUI catalog (JSON array of {name, repo, installer})
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Clone into this fixed directory instead of a fresh temporary one
    #[arg(long)]
    clone_dir: Option<PathBuf>,
    /// Give up after this many invalid menu answers
    #[arg(long)]
    max_attempts: Option<u32>,
    /// Finish without rebooting
    #[arg(long, default_value_t = false)]
    no_reboot: bool,
    /// Show the commands that would run instead of running them
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Log level
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel { Trace, Debug, Info, Warn, Error }

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    let settings = config::load_settings();
    let (catalog, opts) = resolve(&cli, settings);
    log::debug!("catalog: {}, options: {:?}", catalog.display(), opts);
    if !std::io::stdin().is_terminal() {
        log::warn!("standard input is not a terminal; reading the choice from it anyway");
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    let report = if cli.dry_run {
        provision::run(&catalog, &opts, &mut input, &mut out, &mut DryRunRunner::new(std::io::stdout()))
    } else {
        provision::run(&catalog, &opts, &mut input, &mut out, &mut SystemRunner)
    }?;
    summarize(&report);
    Ok(())
}

/// Merge the config file with command-line overrides.
fn resolve(cli: &Cli, settings: Settings) -> (PathBuf, Options) {
    let catalog = cli.catalog.clone().unwrap_or(settings.catalog_path);
    let target = match cli.clone_dir.clone().or(settings.clone_dir) {
        Some(dir) => CloneTarget::Fixed(dir),
        None => CloneTarget::Fresh,
    };
    let opts = Options {
        target,
        retry: RetryPolicy { max_attempts: cli.max_attempts.or(settings.max_attempts) },
        reboot: (!cli.no_reboot).then_some(settings.reboot_command),
    };
    (catalog, opts)
}

fn summarize(report: &Report) {
    match (&report.choice, &report.install_error) {
        (Some(name), _) if report.installed() => log::info!("installed {name}"),
        (Some(name), Some(e)) => log::info!("{name} was not installed: {e}"),
        _ => log::info!("finished without installing a GUI"),
    }
    if report.rebooted {
        log::info!("reboot requested");
    } else {
        log::info!("not rebooting (--no-reboot)");
    }
}

fn init_logger(level: Option<LogLevel>) {
    let filter = match level.unwrap_or(LogLevel::Info) {
        LogLevel::Trace => log::LevelFilter::Trace,
        LogLevel::Debug => log::LevelFilter::Debug,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Warn => log::LevelFilter::Warn,
        LogLevel::Error => log::LevelFilter::Error,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(filter);
    let _ = builder.try_init();
}
