#![deny(missing_docs)]

//! # Acpatch CLI
//!
//! Command line front end for the ActiveCampaign client patcher.
//!
//! Supported Commands:
//! - `apply`: Runs the client-upgrade plan against the target file.
//! - `plan`: Renders the patch plan as YAML or JSON.
//!
//! Invoking the binary with no arguments is the same as `apply` with all
//! defaults, which keeps the original one-shot entry point working.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod apply;
mod error;
mod plan;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Applies the custom-field upgrade to the ActiveCampaign API client"
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Applies the client-upgrade plan to the target file.
    Apply(apply::ApplyArgs),
    /// Renders the patch plan as YAML or JSON.
    Plan(plan::PlanArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Apply(args)) => apply::execute(args)?,
        Some(Commands::Plan(args)) => plan::execute(args)?,
        None => apply::execute(&apply::ApplyArgs::default())?,
    }

    Ok(())
}
