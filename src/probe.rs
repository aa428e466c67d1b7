use anyhow::Result;
use std::path::Path;

use crate::error::SetupError;
use crate::git;

/// Configuration of one named remote.
///
/// `push_urls` holds the *explicit* push URLs (`remote.<name>.pushurl`
/// entries) in configuration order, each at most once. When the list is
/// empty git pushes to the fetch URL implicitly; the reconciler accounts
/// for that distinction, which is why the probe reads structured config
/// values instead of matching substrings in `git remote -v` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSpec {
    pub name: String,
    pub fetch_url: Option<String>,
    pub push_urls: Vec<String>,
}

/// Snapshot of a working copy's state, read once per invocation.
#[derive(Debug, Clone)]
pub struct RepoState {
    /// Whether HEAD resolves to a commit. A fresh clone of an empty
    /// repository does not; neither does a detached or corrupt HEAD, and
    /// the two cases are deliberately not distinguished.
    pub has_commits: bool,
    pub remotes: Vec<RemoteSpec>,
}

impl RepoState {
    pub fn remote(&self, name: &str) -> Option<&RemoteSpec> {
        self.remotes.iter().find(|r| r.name == name)
    }
}

/// Probe a directory for its repository state.
///
/// # Errors
/// [`SetupError::NotAGitRepository`] when `dir` is not inside a git
/// working copy; otherwise any git invocation failure.
pub fn probe(dir: &Path) -> Result<RepoState> {
    if !git::is_work_tree(dir)? {
        return Err(SetupError::NotAGitRepository(dir.to_path_buf()).into());
    }

    let has_commits = git::head_resolvable(dir)?;

    let mut remotes = Vec::new();
    for name in git::remote_names(dir)? {
        let fetch_url = git::fetch_url(dir, &name)?;
        let push_urls = git::push_urls(dir, &name)?;
        remotes.push(RemoteSpec {
            name,
            fetch_url,
            push_urls,
        });
    }

    Ok(RepoState {
        has_commits,
        remotes,
    })
}
