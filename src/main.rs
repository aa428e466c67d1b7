//! # gitduo
//!
//! **gitduo** configures a working copy so that `origin` fetches from one
//! hosting platform and pushes to two at once.
//!
//! Commands:
//! - `gitduo clone-primary` clones from the primary platform and mirrors
//!   pushes to the secondary
//! - `gitduo clone-secondary` does the same with the roles swapped
//! - `gitduo attach` reconciles an existing working copy
//! - `gitduo home` prints the config file path
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gitduo::{CloneSource, FetchChoice, Request, cmd_attach, cmd_clone, config_path};
use std::path::PathBuf;

/// Command-line interface definition.
///
/// Parsed using `clap` derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "gitduo",
    version,
    about = "gitduo - one remote, two hosting platforms",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Cmd {
    /// Clone from the primary platform, push to both
    ClonePrimary(CloneArgs),
    /// Clone from the secondary platform, push to both
    CloneSecondary(CloneArgs),
    /// Configure an existing working copy to push to both platforms
    Attach(AttachArgs),
    /// Print the gitduo config file path
    Home,
}

#[derive(Args, Debug)]
struct CloneArgs {
    /// Existing parent directory, or the exact target directory to create
    path: PathBuf,
    /// Primary platform repository URL
    primary_url: String,
    /// Secondary platform repository URL
    secondary_url: String,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct AttachArgs {
    /// Directory of the existing working copy
    path: PathBuf,
    /// Primary platform repository URL
    primary_url: String,
    /// Secondary platform repository URL
    secondary_url: String,
    /// Platform to fetch from (defaults to the config file, then primary)
    #[arg(long, value_enum)]
    fetch_from: Option<FetchChoice>,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Set the local author email in the working copy
    #[arg(long)]
    email: Option<String>,
    /// Set the local author name in the working copy
    #[arg(long)]
    name: Option<String>,
    /// Push all branches and tags after configuring the remote
    #[arg(long)]
    push: bool,
}

fn request(path: PathBuf, primary_url: String, secondary_url: String, common: CommonArgs) -> Request {
    Request {
        path,
        primary_url,
        secondary_url,
        email: common.email,
        name: common.name,
        push: common.push,
    }
}

/// CLI entry point.
///
/// Parses arguments with `clap` and executes the selected scenario. Any
/// error propagates out as a single line on stderr and a non-zero exit.
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::ClonePrimary(a) => cmd_clone(
            CloneSource::Primary,
            &request(a.path, a.primary_url, a.secondary_url, a.common),
        ),
        Cmd::CloneSecondary(a) => cmd_clone(
            CloneSource::Secondary,
            &request(a.path, a.primary_url, a.secondary_url, a.common),
        ),
        Cmd::Attach(a) => cmd_attach(
            &request(a.path, a.primary_url, a.secondary_url, a.common),
            a.fetch_from,
        ),
        Cmd::Home => {
            println!("{}", config_path()?.display());
            Ok(())
        }
    }
}
