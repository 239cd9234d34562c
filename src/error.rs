use std::path::PathBuf;

use thiserror::Error;

/// Catalog could not be loaded. Fatal: nothing is prompted or installed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("standard input closed before a choice was made")]
    InputClosed,
    #[error("no valid choice after {0} attempts")]
    TooManyAttempts(u32),
    #[error("terminal I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures that stop provisioning before anything is installed or rebooted.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("reading GUI options: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error("terminal I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Clone or installer failure. Reported to the operator, never fatal.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("required tool '{0}' not found on PATH")]
    MissingTool(&'static str),
    #[error("installer path '{0}' must be relative and stay inside the repository")]
    UnsafeInstallerPath(String),
    #[error("clone target {} already exists", .0.display())]
    CloneTargetExists(PathBuf),
    #[error("creating clone directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("git clone of {repo} failed ({status}){}", stderr_suffix(.stderr))]
    Clone {
        repo: String,
        status: String,
        stderr: String,
    },
    #[error("installer script {} failed ({status})", .path.display())]
    Script { path: PathBuf, status: String },
}

fn stderr_suffix(stderr: &str) -> String {
    let t = stderr.trim();
    if t.is_empty() { String::new() } else { format!(": {t}") }
}
