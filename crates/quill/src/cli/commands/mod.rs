//! Command implementations and dispatch.

pub mod config;
pub mod init;
pub mod inspect;
pub mod ls;
pub mod search;
pub mod serve;
pub mod status;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Serve(cmd) => serve::run(ctx, &cmd),
        Commands::Inspect(cmd) => inspect::run(ctx, &cmd),
        Commands::Ls(cmd) => ls::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
        Commands::Config => config::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
