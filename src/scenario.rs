use anyhow::Result;
use colored::Colorize;
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{Config, FetchChoice, load_config};
use crate::error::SetupError;
use crate::git;
use crate::probe::{RepoState, probe};
use crate::progress::{err_style, ok_style, spinner_style};
use crate::reconcile::{self, DesiredRemote};
use crate::resolve::resolve_clone_target;
use crate::sync;

/// The single remote this tool manages.
pub const DEFAULT_REMOTE: &str = "origin";

/// Which platform a clone scenario fetches from. The other platform
/// becomes the additional push target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneSource {
    Primary,
    Secondary,
}

/// User intent shared by all scenarios: a path, the two platform URLs and
/// the optional identity / synchronize-now extras.
#[derive(Debug, Clone)]
pub struct Request {
    pub path: PathBuf,
    pub primary_url: String,
    pub secondary_url: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub push: bool,
}

impl Request {
    fn urls_for(&self, choice: FetchChoice) -> (&str, &str) {
        match choice {
            FetchChoice::Primary => (&self.primary_url, &self.secondary_url),
            FetchChoice::Secondary => (&self.secondary_url, &self.primary_url),
        }
    }
}

/// Clone scenario: clone from the called platform, then configure `origin`
/// to fetch from it and push to both platforms.
///
/// Flow: resolve path (which also rejects a pre-existing target) → clone →
/// integrity check → identity → probe → reconcile → optional push → show
/// the final remote listing.
pub fn cmd_clone(source: CloneSource, req: &Request) -> Result<()> {
    git::ensure_available()?;
    let cfg = load_config()?;

    let choice = match source {
        CloneSource::Primary => FetchChoice::Primary,
        CloneSource::Secondary => FetchChoice::Secondary,
    };
    let (fetch_url, mirror_url) = req.urls_for(choice);

    let target = resolve_clone_target(&req.path, fetch_url)?;
    clone_with_spinner(fetch_url, &target.dir)?;
    verify_clone_produced(&target.dir)?;

    apply_identity(&target.dir, req, &cfg)?;

    let state = probe(&target.dir)?;
    reconcile_remote(&target.dir, &state, fetch_url, mirror_url)?;

    if req.push {
        sync::synchronize(&target.dir, DEFAULT_REMOTE, state.has_commits)?;
    } else if !state.has_commits {
        eprintln!(
            "{} cloned repository has no commits yet",
            "warning:".yellow().bold()
        );
    }

    show_remotes(&target.dir)
}

/// Attach scenario: reconcile an existing working copy without cloning.
///
/// `fetch_from` picks which platform becomes the fetch source; the CLI
/// flag wins over the config-file default, which defaults to primary.
pub fn cmd_attach(req: &Request, fetch_from: Option<FetchChoice>) -> Result<()> {
    git::ensure_available()?;
    let cfg = load_config()?;

    if !req.path.exists() {
        return Err(SetupError::TargetMissing(req.path.clone()).into());
    }

    // probe rejects non-repositories with NotAGitRepository.
    let state = probe(&req.path)?;

    apply_identity(&req.path, req, &cfg)?;

    let choice = fetch_from
        .or(cfg.defaults.fetch_from)
        .unwrap_or(FetchChoice::Primary);
    let (fetch_url, mirror_url) = req.urls_for(choice);
    reconcile_remote(&req.path, &state, fetch_url, mirror_url)?;

    if req.push {
        sync::synchronize(&req.path, DEFAULT_REMOTE, state.has_commits)?;
    }

    show_remotes(&req.path)
}

fn clone_with_spinner(url: &str, target: &Path) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("cloning {url}"));

    match git::clone(url, target) {
        Ok(()) => {
            pb.set_style(ok_style());
            pb.finish_with_message(format!("cloned into {}", target.display()));
            Ok(())
        }
        Err(e) => {
            pb.set_style(err_style());
            pb.finish_with_message(format!("cloning {url}"));
            Err(e)
        }
    }
}

/// Guard against a clone that exits 0 without producing the target
/// directory; the error carries a listing of the parent to show what the
/// clone actually left behind.
fn verify_clone_produced(target: &Path) -> Result<()> {
    if target.is_dir() {
        return Ok(());
    }
    let listing = target
        .parent()
        .and_then(|p| fs::read_dir(p).ok())
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    Err(SetupError::CloneIntegrity {
        target: target.to_path_buf(),
        listing,
    }
    .into())
}

/// Identity passthrough: explicit flags win over config-file defaults;
/// nothing is set when neither provides a value.
fn apply_identity(dir: &Path, req: &Request, cfg: &Config) -> Result<()> {
    let email = req.email.as_deref().or(cfg.identity.email.as_deref());
    let name = req.name.as_deref().or(cfg.identity.name.as_deref());
    git::set_identity(dir, email, name)
}

fn reconcile_remote(dir: &Path, state: &RepoState, fetch_url: &str, mirror_url: &str) -> Result<()> {
    let desired = DesiredRemote::dual(DEFAULT_REMOTE, fetch_url, mirror_url);
    let plan = reconcile::plan(state.remote(DEFAULT_REMOTE), &desired);

    if plan.is_empty() {
        println!(
            "{} {} already fetches from {} and pushes to both platforms",
            "✔".green(),
            DEFAULT_REMOTE,
            fetch_url
        );
        return Ok(());
    }

    for op in &plan.ops {
        println!("{} {}", "→".cyan(), op);
    }
    reconcile::apply(dir, &plan)
}

fn show_remotes(dir: &Path) -> Result<()> {
    let listing = git::remote_listing(dir)?;
    if !listing.is_empty() {
        println!("{listing}");
    }
    Ok(())
}
