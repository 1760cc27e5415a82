//! Command-line interface for quill.

mod cli;

use std::process::ExitCode;

use cli::{CommandContext, args::parse_cli, commands};
use quill::logging;

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose, cli.command.log_level());

    let ctx = if cli.command.needs_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
