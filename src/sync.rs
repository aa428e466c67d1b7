use anyhow::Result;
use colored::Colorize;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

use crate::git;
use crate::progress::{err_style, ok_style, spinner_style};

/// Push all branches, then all tags, to the named remote.
///
/// Skipped with a warning (not a failure) when the working copy has no
/// resolvable commit: pushing an empty history onto possibly non-empty
/// remote branches is unsafe and of no benefit. The caller passes
/// `has_commits` from the probe it already ran, state is read once per
/// invocation.
///
/// # Errors
/// `PushFailed` on the first failing push; remote configuration applied
/// earlier in the run is kept.
pub fn synchronize(dir: &Path, remote: &str, has_commits: bool) -> Result<()> {
    if !has_commits {
        eprintln!(
            "{} no commits found, skipping push (run `git push {} --all` once you have commits)",
            "warning:".yellow().bold(),
            remote
        );
        return Ok(());
    }

    push_step(dir, remote, "branches", git::push_all_branches)?;
    push_step(dir, remote, "tags", git::push_all_tags)?;
    Ok(())
}

fn push_step(
    dir: &Path,
    remote: &str,
    what: &str,
    op: fn(&Path, &str) -> Result<()>,
) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("pushing {what} to {remote}"));

    match op(dir, remote) {
        Ok(()) => {
            pb.set_style(ok_style());
            pb.finish_with_message(format!("pushed {what} to {remote}"));
            Ok(())
        }
        Err(e) => {
            pb.set_style(err_style());
            pb.finish_with_message(format!("pushing {what} to {remote}"));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_working_copy_skips_push_without_error() {
        // has_commits = false must return Ok before any git invocation,
        // so a plain directory is enough here.
        let td = tempdir().unwrap();
        assert!(synchronize(td.path(), "origin", false).is_ok());
    }
}
