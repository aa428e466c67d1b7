//! Git integration layer.
//!
//! This module wraps the actual backend implementation (`cli_backend`),
//! which drives the `git` executable as a subprocess, and re-exports the
//! stable API used by the rest of the crate.
//!
//! Every operation takes the working-copy directory explicitly and reports
//! success or failure from the subprocess exit status; nothing here parses
//! git output for semantic success signals.

mod cli_backend;

pub use cli_backend::{
    add_push_url, clone, ensure_available, fetch_url, head_resolvable, is_work_tree,
    push_all_branches, push_all_tags, push_urls, remote_add, remote_listing, remote_names,
    set_fetch_url, set_identity,
};
