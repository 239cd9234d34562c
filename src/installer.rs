use std::borrow::Cow;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::catalog::GuiOption;
use crate::error::InstallError;

/// Whether a child's output goes to our terminal or is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Capture,
    Inherit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub output: Output,
}

impl Invocation {
    pub fn new(program: &str, args: &[&str], output: Output) -> Self {
        Self { program: program.into(), args: args.iter().map(|a| a.to_string()).collect(), output }
    }

    /// Shell-quoted command line, for logs and dry runs.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|a| shell_escape::escape(Cow::from(a.as_str())).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatus {
    pub success: bool,
    /// Human-readable exit status, e.g. "exit status: 1".
    pub status: String,
    /// Collected stderr when the invocation captured output.
    pub stderr: String,
}

impl RunStatus {
    pub fn ok() -> Self {
        Self { success: true, status: "exit status: 0".into(), stderr: String::new() }
    }
}

/// Seam between the provisioning flow and real child processes.
pub trait Runner {
    fn run(&mut self, inv: &Invocation) -> std::io::Result<RunStatus>;

    /// Verify an external tool is available before using it.
    fn check_tool(&self, _name: &'static str) -> Result<(), InstallError> {
        Ok(())
    }
}

/// Runs commands for real.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, inv: &Invocation) -> std::io::Result<RunStatus> {
        log::debug!("running: {}", inv.display());
        let mut cmd = Command::new(&inv.program);
        cmd.args(&inv.args);
        match inv.output {
            Output::Inherit => {
                let status = cmd.stdin(Stdio::inherit()).stdout(Stdio::inherit()).stderr(Stdio::inherit()).status()?;
                Ok(RunStatus { success: status.success(), status: status.to_string(), stderr: String::new() })
            }
            Output::Capture => {
                let out = cmd.stdin(Stdio::null()).output()?;
                Ok(RunStatus {
                    success: out.status.success(),
                    status: out.status.to_string(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                })
            }
        }
    }

    fn check_tool(&self, name: &'static str) -> Result<(), InstallError> {
        match which::which(name) {
            Ok(path) => {
                log::debug!("{name}: found at {}", path.display());
                Ok(())
            }
            Err(_) => Err(InstallError::MissingTool(name)),
        }
    }
}

/// Prints what would run and reports success without executing anything.
pub struct DryRunRunner<W: Write> {
    out: W,
}

impl<W: Write> DryRunRunner<W> {
    pub fn new(out: W) -> Self { Self { out } }
}

impl<W: Write> Runner for DryRunRunner<W> {
    fn run(&mut self, inv: &Invocation) -> std::io::Result<RunStatus> {
        writeln!(self.out, "--dry-run: would run: {}", inv.display())?;
        Ok(RunStatus::ok())
    }
}

/// Where the repository gets cloned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CloneTarget {
    /// A new unique directory under the system temp dir, removed afterwards.
    #[default]
    Fresh,
    /// A fixed path that must not exist yet. Left in place afterwards.
    Fixed(PathBuf),
}

/// Clone `opt.repo` and run its installer script with `bash`.
pub fn install(opt: &GuiOption, runner: &mut impl Runner, target: &CloneTarget) -> Result<(), InstallError> {
    let rel = installer_path(&opt.installer)?;
    runner.check_tool("git")?;
    runner.check_tool("bash")?;

    // Keeps the temp dir alive until the script has finished
    let (_guard, dir) = match target {
        CloneTarget::Fresh => {
            let tmp = tempfile::Builder::new().prefix("gui_repo.").tempdir().map_err(InstallError::TempDir)?;
            let dir = tmp.path().join("repo");
            (Some(tmp), dir)
        }
        CloneTarget::Fixed(dir) => {
            if dir.exists() {
                return Err(InstallError::CloneTargetExists(dir.clone()));
            }
            (None, dir.clone())
        }
    };
    let dir_str = dir.to_string_lossy().into_owned();

    log::info!("cloning {} into {}", opt.repo, dir.display());
    let clone = Invocation::new("git", &["clone", opt.repo.as_str(), dir_str.as_str()], Output::Capture);
    let st = runner.run(&clone).map_err(|source| InstallError::Spawn { program: "git".into(), source })?;
    if !st.success {
        return Err(InstallError::Clone { repo: opt.repo.clone(), status: st.status, stderr: st.stderr });
    }

    let script = dir.join(rel);
    let script_str = script.to_string_lossy().into_owned();
    log::info!("running installer {}", script.display());
    let started = Instant::now();
    let run = Invocation::new("bash", &[script_str.as_str()], Output::Inherit);
    let st = runner.run(&run).map_err(|source| InstallError::Spawn { program: "bash".into(), source })?;
    let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
    log::info!("installer finished in {}", humantime::format_duration(elapsed));
    if !st.success {
        return Err(InstallError::Script { path: script, status: st.status });
    }
    Ok(())
}

/// The installer path must stay inside the cloned repository.
fn installer_path(raw: &str) -> Result<&Path, InstallError> {
    let p = Path::new(raw);
    let escapes = p.components().any(|c| matches!(c, Component::RootDir | Component::Prefix(_) | Component::ParentDir));
    if raw.trim().is_empty() || escapes || p.components().all(|c| c == Component::CurDir) {
        return Err(InstallError::UnsafeInstallerPath(raw.to_string()));
    }
    Ok(p)
}
