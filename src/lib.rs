//! Crate entry point for **gitduo**.
//!
//! This library provides the internal implementation for the `gitduo` CLI.
//! Each submodule encapsulates one responsibility: path resolution, the
//! repository state probe, the remote-topology reconciler, the scenario
//! orchestrator, the subprocess git layer, and so on.
//! The `pub use` re-exports make the scenario commands accessible directly
//! from the crate root.

mod config;
mod error;
mod git;
mod paths;
mod probe;
mod progress;
mod reconcile;
mod resolve;
mod scenario;
mod sync;

pub use config::{Config, FetchChoice, load_config};
pub use error::SetupError;
pub use paths::{config_path, gitduo_home};
pub use probe::{RemoteSpec, RepoState, probe};
pub use reconcile::{DesiredRemote, Plan, PlanOp, apply, plan};
pub use resolve::{CloneTarget, TargetMode, repo_name_from_url, resolve_clone_target};
pub use scenario::{CloneSource, DEFAULT_REMOTE, Request, cmd_attach, cmd_clone};
