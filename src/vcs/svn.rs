//! Subversion session backed by the `svn` command-line client

use super::{CommitInfo, DiffStatus, Location, StatusKind, VcsSession};
use crate::config::SvnSettings;
use crate::error::{PatchError, Result};
use chrono::DateTime;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Session that shells out to `svn` with the configured credentials.
///
/// Every invocation is non-interactive and never caches credentials, so a
/// missing or wrong password fails fast instead of prompting. Passwords are
/// handed over with `--password-from-stdin`, which needs svn 1.10 or newer.
pub struct SvnCli {
    binary: PathBuf,
    username: Option<String>,
    password: Option<String>,
}

impl SvnCli {
    /// Resolve the client binary and capture credentials from settings.
    pub fn new(settings: &SvnSettings) -> Result<Self> {
        let binary = which::which(&settings.binary).map_err(|e| {
            PatchError::Configuration(format!(
                "Subversion client '{}' not found: {}",
                settings.binary, e
            ))
        })?;
        Ok(Self {
            binary,
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }

    fn svn(&self, args: &[String]) -> Result<String> {
        tracing::debug!("svn {}", args.join(" "));
        let run_err = |e: std::io::Error| {
            PatchError::VcsQuery(format!("failed to run {}: {}", self.binary.display(), e))
        };

        // Field labels in `svn info` are translated; parsing needs the C locale.
        let mut cmd = Command::new(&self.binary);
        cmd.env("LC_ALL", "C").args(["--non-interactive", "--no-auth-cache"]);
        if let Some(username) = &self.username {
            cmd.args(["--username", username.as_str()]);
        }
        // The password travels on stdin so it never shows up in the process list.
        if self.password.is_some() {
            cmd.arg("--password-from-stdin").stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::null());
        }
        let mut child =
            cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped()).spawn().map_err(run_err)?;

        if let (Some(password), Some(mut stdin)) = (&self.password, child.stdin.take()) {
            writeln!(stdin, "{password}").map_err(run_err)?;
        }
        let output = child.wait_with_output().map_err(run_err)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PatchError::VcsQuery(format!(
                "svn {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VcsSession for SvnCli {
    fn diff_summary(&self, old: &Location, new: &Location) -> Result<Vec<DiffStatus>> {
        let args = vec![
            "diff".to_string(),
            "--summarize".to_string(),
            "--depth".to_string(),
            "infinity".to_string(),
            format!("--old={old}"),
            format!("--new={new}"),
        ];
        let stdout = self.svn(&args)?;
        Ok(parse_summary(&stdout))
    }

    fn export_file(&self, location: &Location, dest: &Path) -> Result<()> {
        let mut args = vec!["export".to_string(), "--force".to_string()];
        args.extend(["--depth".to_string(), "empty".to_string()]);
        if let Some(rev) = location.revision {
            args.extend(["-r".to_string(), rev.to_string()]);
        }
        args.push(location.to_string());
        args.push(dest.to_string_lossy().into_owned());
        self.svn(&args).map(|_| ())
    }

    fn info(&self, url: &str, peg: Option<u64>, revision: Option<u64>) -> Result<CommitInfo> {
        let target = Location { url: url.to_string(), revision: peg };
        let mut args = vec!["info".to_string()];
        if let Some(rev) = revision {
            args.extend(["-r".to_string(), rev.to_string()]);
        }
        args.push(target.to_string());
        let stdout = self.svn(&args)?;
        parse_info(&stdout)
    }
}

/// Parse `svn diff --summarize` output.
///
/// Column 0 is the item status and column 1 the property status; the URL
/// follows the status columns.
pub(crate) fn parse_summary(output: &str) -> Vec<DiffStatus> {
    let mut statuses = Vec::new();
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let mut chars = line.chars();
        let item = chars.next().unwrap_or(' ');
        let props = chars.next().unwrap_or(' ');
        let url = chars.as_str().trim();
        if url.is_empty() {
            tracing::warn!("Ignoring unrecognised summary line: {}", line);
            continue;
        }
        let kind = match item {
            'A' => StatusKind::Added,
            'M' => StatusKind::Modified,
            'D' => StatusKind::Deleted,
            ' ' if props == 'M' => StatusKind::PropertyOnly,
            ' ' => StatusKind::Normal,
            other => StatusKind::Other(other),
        };
        statuses.push(DiffStatus::new(kind, url));
    }
    statuses
}

/// Parse the `URL`, `Last Changed Rev` and `Last Changed Date` fields of `svn info`.
pub(crate) fn parse_info(output: &str) -> Result<CommitInfo> {
    let mut url = None;
    let mut revision = None;
    let mut date = None;

    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "URL" => url = Some(value.to_string()),
            "Last Changed Rev" => {
                revision = Some(value.parse::<u64>().map_err(|_| {
                    PatchError::VcsQuery(format!("invalid Last Changed Rev '{value}'"))
                })?);
            }
            "Last Changed Date" => {
                // e.g. "2010-01-25 14:03:11 +0000 (Mon, 25 Jan 2010)"
                let stamp = value.split(" (").next().unwrap_or(value);
                date = Some(DateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S %z").map_err(
                    |e| PatchError::VcsQuery(format!("invalid Last Changed Date '{value}': {e}")),
                )?);
            }
            _ => {}
        }
    }

    match (url, revision, date) {
        (Some(url), Some(committed_revision), Some(committed_date)) => {
            Ok(CommitInfo { url, committed_revision, committed_date })
        }
        _ => Err(PatchError::VcsQuery("svn info output is missing commit fields".to_string())),
    }
}
