use std::io::{BufRead, Write};
use std::path::Path;

use crate::banner;
use crate::catalog::Catalog;
use crate::error::{InstallError, ProvisionError};
use crate::installer::{self, CloneTarget, Invocation, Output, Runner};
use crate::select::{self, Choice, RetryPolicy};

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub target: CloneTarget,
    pub retry: RetryPolicy,
    /// Program and arguments to reboot with; no reboot when `None`.
    pub reboot: Option<Vec<String>>,
}

/// What a finished run did.
#[derive(Debug, Default)]
pub struct Report {
    /// Name of the chosen GUI, `None` when the operator skipped.
    pub choice: Option<String>,
    pub install_error: Option<InstallError>,
    pub rebooted: bool,
}

impl Report {
    pub fn installed(&self) -> bool {
        self.choice.is_some() && self.install_error.is_none()
    }
}

/// Banner, catalog, menu, optional install, completion, reboot.
///
/// Catalog and menu failures return early without rebooting. Install
/// failures are printed and the run carries on to the reboot.
pub fn run(
    catalog_path: &Path,
    opts: &Options,
    input: &mut impl BufRead,
    out: &mut impl Write,
    runner: &mut impl Runner,
) -> Result<Report, ProvisionError> {
    banner::display(out)?;

    let catalog = Catalog::load(catalog_path)?;
    log::info!("loaded {} GUI option(s) from {}", catalog.len(), catalog_path.display());
    if catalog.is_empty() {
        log::warn!("catalog is empty; only \"None\" can be chosen");
    }
    for opt in catalog.iter() {
        log::debug!("  {}: {} ({})", opt.name, opt.repo, opt.installer);
    }

    let choice = select::select(&catalog, input, out, opts.retry)?;
    log::info!("selected {}", choice.label());
    let mut report = Report::default();
    if let Choice::Gui(opt) = choice {
        report.choice = Some(opt.name.clone());
        writeln!(out, "Installing {}...", opt.name)?;
        out.flush()?;
        if let Err(e) = installer::install(opt, runner, &opts.target) {
            log::warn!("install of {} failed: {e}", opt.name);
            if let Err(w) = writeln!(out, "Error installing GUI: {e}") {
                log::warn!("could not print install error: {w}");
            }
            report.install_error = Some(e);
        }
    }

    // A lost console must not stop the reboot
    let done = match opts.reboot {
        Some(_) => "First boot setup complete. Rebooting...",
        None => "First boot setup complete.",
    };
    if let Err(e) = writeln!(out, "{done}").and_then(|_| out.flush()) {
        log::warn!("could not print completion message: {e}");
    }
    if let Some(cmd) = &opts.reboot {
        reboot(cmd, runner);
        report.rebooted = true;
    }
    Ok(report)
}

/// Fire the reboot command. Its outcome is only logged.
fn reboot(cmd: &[String], runner: &mut impl Runner) {
    let Some((program, args)) = cmd.split_first() else {
        log::warn!("empty reboot command; not rebooting");
        return;
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match runner.run(&Invocation::new(program, &args, Output::Inherit)) {
        Ok(st) if !st.success => log::warn!("reboot command exited with {}", st.status),
        Ok(_) => {}
        Err(e) => log::warn!("could not run {program}: {e}"),
    }
}
