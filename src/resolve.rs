use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::error::SetupError;

/// How a user-supplied path was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// The path did not exist: it *is* the clone target.
    Exact,
    /// The path is an existing directory: the clone target is a
    /// repository-named subdirectory inside it.
    InsideParent,
}

/// Resolved clone destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneTarget {
    pub dir: PathBuf,
    pub mode: TargetMode,
}

/// Derive a local folder name from a repository URL.
///
/// Takes the last `/`- or `:`-separated segment (so both
/// `https://host/user/repo.git` and `git@host:user/repo.git` work),
/// trims trailing slashes and strips a `.git` suffix.
pub fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let tail = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let name = tail.strip_suffix(".git").unwrap_or(tail);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Resolve a user-supplied path into a clone destination.
///
/// - If `path` does not exist it is taken as the exact target directory;
///   its parent must already exist.
/// - If `path` is an existing directory it is taken as the parent, and the
///   target is `path/<repo name derived from url>`; that target must not
///   already exist, cloning never overwrites.
///
/// Pure computation: nothing is created here, the clone does that later.
///
/// # Errors
/// [`SetupError::InvalidParent`] and [`SetupError::TargetAlreadyExists`]
/// for the precondition violations above, plus plain errors for a
/// non-directory path or a URL no name can be derived from.
pub fn resolve_clone_target(path: &Path, url: &str) -> Result<CloneTarget> {
    if path.is_dir() {
        let Some(name) = repo_name_from_url(url) else {
            bail!("could not derive a repository name from URL: {url}");
        };
        let dir = path.join(name);
        if dir.exists() {
            return Err(SetupError::TargetAlreadyExists(dir).into());
        }
        return Ok(CloneTarget {
            dir,
            mode: TargetMode::InsideParent,
        });
    }

    if path.exists() {
        bail!("path exists but is not a directory: {}", path.display());
    }

    // Exact mode: a relative single-segment path has an implicit parent of
    // the current directory, which always exists.
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent
        && !parent.is_dir()
    {
        return Err(SetupError::InvalidParent(parent.to_path_buf()).into());
    }

    Ok(CloneTarget {
        dir: path.to_path_buf(),
        mode: TargetMode::Exact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn repo_name_strips_git_suffix() {
        assert_eq!(
            repo_name_from_url("https://host-a/user/repo.git").as_deref(),
            Some("repo")
        );
    }

    #[test]
    fn repo_name_handles_scp_style_urls() {
        assert_eq!(
            repo_name_from_url("git@host-b:user/repo.git").as_deref(),
            Some("repo")
        );
        assert_eq!(repo_name_from_url("git@host-b:repo").as_deref(), Some("repo"));
    }

    #[test]
    fn repo_name_ignores_trailing_slash() {
        assert_eq!(
            repo_name_from_url("https://host-a/user/repo/").as_deref(),
            Some("repo")
        );
    }

    #[test]
    fn repo_name_none_for_empty_tail() {
        assert!(repo_name_from_url("").is_none());
        assert!(repo_name_from_url("///").is_none());
    }

    #[test]
    fn existing_dir_resolves_inside_parent() {
        let td = tempdir().unwrap();
        let got =
            resolve_clone_target(td.path(), "https://host-a/u/r.git").unwrap();
        assert_eq!(got.dir, td.path().join("r"));
        assert_eq!(got.mode, TargetMode::InsideParent);
    }

    #[test]
    fn missing_path_resolves_exact() {
        let td = tempdir().unwrap();
        let p = td.path().join("fresh");
        let got = resolve_clone_target(&p, "https://host-a/u/r.git").unwrap();
        assert_eq!(got.dir, p);
        assert_eq!(got.mode, TargetMode::Exact);
    }

    #[test]
    fn pre_existing_target_is_rejected() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("r")).unwrap();
        let err = resolve_clone_target(td.path(), "https://host-a/u/r.git")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::TargetAlreadyExists(_))
        ));
    }

    #[test]
    fn missing_parent_is_rejected() {
        let td = tempdir().unwrap();
        let p = td.path().join("no_such").join("fresh");
        let err = resolve_clone_target(&p, "https://host-a/u/r.git").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::InvalidParent(_))
        ));
    }

    #[test]
    fn file_path_is_rejected() {
        let td = tempdir().unwrap();
        let f = td.path().join("a-file");
        fs::write(&f, "").unwrap();
        assert!(resolve_clone_target(&f, "https://host-a/u/r.git").is_err());
    }
}
