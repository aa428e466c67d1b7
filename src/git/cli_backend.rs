use anyhow::{Context, Result, bail};
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Output};

use crate::error::SetupError;

/// Build a `git` command, optionally rooted in `dir` via `-C`.
///
/// Every operation that touches a working copy passes its directory
/// explicitly; the process-wide working directory is never changed.
fn git(dir: Option<&Path>) -> Command {
    let mut cmd = Command::new("git");
    if let Some(d) = dir {
        cmd.arg("-C").arg(d);
    }
    cmd
}

/// Run a git command and capture its output.
///
/// A spawn failure with `ENOENT` maps to [`SetupError::GitMissing`];
/// a non-zero exit status is *not* an error at this layer, callers decide
/// what it means (some probes use the exit status as their answer).
fn run(cmd: &mut Command) -> Result<Output> {
    match cmd.output() {
        Ok(out) => Ok(out),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SetupError::GitMissing.into()),
        Err(e) => Err(e).context("failed to run git"),
    }
}

/// Run a remote-mutation step, mapping a non-zero exit to
/// [`SetupError::RemoteOperation`] naming the step.
fn run_remote_step(cmd: &mut Command, step: &'static str) -> Result<()> {
    let out = run(cmd)?;
    if !out.status.success() {
        return Err(SetupError::RemoteOperation {
            step,
            detail: stderr_line(&out),
        }
        .into());
    }
    Ok(())
}

/// Condense captured stderr into a single trimmed line for error messages.
fn stderr_line(out: &Output) -> String {
    let s = String::from_utf8_lossy(&out.stderr);
    let s = s.trim();
    if s.is_empty() {
        format!("exit status {}", out.status)
    } else {
        s.lines().last().unwrap_or(s).trim().to_string()
    }
}

/// Verify that the `git` executable is available at all.
pub fn ensure_available() -> Result<()> {
    let out = run(git(None).arg("--version"))?;
    if !out.status.success() {
        return Err(SetupError::GitMissing.into());
    }
    Ok(())
}

/// `git clone <url> <target>`.
///
/// Output is captured rather than inherited so a spinner can run while the
/// clone is in flight; on failure the last stderr line is surfaced.
pub fn clone(url: &str, target: &Path) -> Result<()> {
    let out = run(git(None).arg("clone").arg(url).arg(target))?;
    if !out.status.success() {
        bail!("git clone {} failed: {}", url, stderr_line(&out));
    }
    Ok(())
}

/// Whether `dir` is inside a git working copy.
pub fn is_work_tree(dir: &Path) -> Result<bool> {
    let out = run(git(Some(dir)).args(["rev-parse", "--is-inside-work-tree"]))?;
    Ok(out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "true")
}

/// Whether the working copy has a resolvable HEAD commit.
///
/// Used as the emptiness proxy: a fresh clone of an empty repository (or a
/// detached/broken HEAD) resolves nothing, and both are treated as "no
/// commits yet" by callers.
pub fn head_resolvable(dir: &Path) -> Result<bool> {
    let out = run(git(Some(dir)).args(["rev-parse", "--verify", "--quiet", "HEAD"]))?;
    Ok(out.status.success())
}

/// Names of all configured remotes.
pub fn remote_names(dir: &Path) -> Result<Vec<String>> {
    let out = run(git(Some(dir)).arg("remote"))?;
    if !out.status.success() {
        bail!("git remote failed: {}", stderr_line(&out));
    }
    Ok(String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

/// Fetch URL of a remote (`remote.<name>.url`), if configured.
pub fn fetch_url(dir: &Path, name: &str) -> Result<Option<String>> {
    let key = format!("remote.{name}.url");
    let out = run(git(Some(dir)).args(["config", "--get", &key]))?;
    if !out.status.success() {
        return Ok(None);
    }
    let url = String::from_utf8_lossy(&out.stdout).trim().to_string();
    Ok(if url.is_empty() { None } else { Some(url) })
}

/// Explicit push URLs of a remote (`remote.<name>.pushurl`, all values).
///
/// Returns an empty list when none are set, in which case git pushes to
/// the fetch URL implicitly. `git config --get-all` exits 1 for an unset
/// key; that is an answer, not a failure.
pub fn push_urls(dir: &Path, name: &str) -> Result<Vec<String>> {
    let key = format!("remote.{name}.pushurl");
    let out = run(git(Some(dir)).args(["config", "--get-all", &key]))?;
    if !out.status.success() {
        return Ok(Vec::new());
    }
    Ok(String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

/// The verbose remote listing (`git remote -v`), for display only.
/// Topology decisions use the structured queries above, never this text.
pub fn remote_listing(dir: &Path) -> Result<String> {
    let out = run(git(Some(dir)).args(["remote", "-v"]))?;
    if !out.status.success() {
        bail!("git remote -v failed: {}", stderr_line(&out));
    }
    Ok(String::from_utf8_lossy(&out.stdout).trim_end().to_string())
}

/// `git remote add <name> <url>`.
pub fn remote_add(dir: &Path, name: &str, url: &str) -> Result<()> {
    run_remote_step(git(Some(dir)).args(["remote", "add", name, url]), "remote add")
}

/// `git remote set-url <name> <url>` (fetch URL).
pub fn set_fetch_url(dir: &Path, name: &str, url: &str) -> Result<()> {
    run_remote_step(
        git(Some(dir)).args(["remote", "set-url", name, url]),
        "remote set-url",
    )
}

/// `git remote set-url --add --push <name> <url>`.
pub fn add_push_url(dir: &Path, name: &str, url: &str) -> Result<()> {
    run_remote_step(
        git(Some(dir)).args(["remote", "set-url", "--add", "--push", name, url]),
        "remote set-url --add --push",
    )
}

/// Set local author identity. Only the values actually provided are set.
pub fn set_identity(dir: &Path, email: Option<&str>, name: Option<&str>) -> Result<()> {
    if let Some(email) = email {
        run_remote_step(
            git(Some(dir)).args(["config", "user.email", email]),
            "config user.email",
        )?;
    }
    if let Some(name) = name {
        run_remote_step(
            git(Some(dir)).args(["config", "user.name", name]),
            "config user.name",
        )?;
    }
    Ok(())
}

/// `git push <remote> --all`.
pub fn push_all_branches(dir: &Path, remote: &str) -> Result<()> {
    let out = run(git(Some(dir)).args(["push", remote, "--all"]))?;
    if !out.status.success() {
        return Err(SetupError::PushFailed {
            remote: remote.to_string(),
            detail: stderr_line(&out),
        }
        .into());
    }
    Ok(())
}

/// `git push <remote> --tags`.
pub fn push_all_tags(dir: &Path, remote: &str) -> Result<()> {
    let out = run(git(Some(dir)).args(["push", remote, "--tags"]))?;
    if !out.status.success() {
        return Err(SetupError::PushFailed {
            remote: remote.to_string(),
            detail: stderr_line(&out),
        }
        .into());
    }
    Ok(())
}
