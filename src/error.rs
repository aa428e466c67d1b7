use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds surfaced to the user as a single line before a non-zero exit.
///
/// Every variant is fatal: the invocation stops at the failing step with no
/// retry and no rollback. Remote configuration is idempotent and cheap to
/// re-run, so abort-and-report is the whole recovery story.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The `git` executable could not be found on PATH.
    #[error("git not found on PATH; install git and retry")]
    GitMissing,

    /// The target directory does not exist and neither does its parent.
    #[error("parent directory does not exist: {}", .0.display())]
    InvalidParent(PathBuf),

    /// A clone scenario resolved to a directory that is already present.
    /// Cloning never overwrites.
    #[error("target directory already exists: {}", .0.display())]
    TargetAlreadyExists(PathBuf),

    /// Attach was pointed at a path that does not exist. Attach never
    /// creates a working copy.
    #[error("directory does not exist: {}", .0.display())]
    TargetMissing(PathBuf),

    /// The directory is not inside a git working copy.
    #[error("not a git working copy: {}", .0.display())]
    NotAGitRepository(PathBuf),

    /// `git clone` exited 0 but the target directory is absent.
    /// The parent listing is included to help the user see what, if
    /// anything, the clone actually produced.
    #[error("clone reported success but {} is missing (parent contains: [{listing}])", .target.display())]
    CloneIntegrity { target: PathBuf, listing: String },

    /// A remote-mutation step returned a non-zero exit. Remaining plan
    /// steps are abandoned; whatever was already applied stays applied.
    #[error("{step} failed: {detail}")]
    RemoteOperation { step: &'static str, detail: String },

    /// A synchronize-now push failed. The remote configuration applied
    /// before the push is kept; only the push itself is considered failed.
    #[error("push to '{remote}' failed: {detail}")]
    PushFailed { remote: String, detail: String },
}
