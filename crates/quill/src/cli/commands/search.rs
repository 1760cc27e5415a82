//! Implementation of `quill search`.

use std::process::ExitCode;

use crate::cli::{args::SearchCommand, context::CommandContext, output::output_search_response};

/// Searches the corpus and prints ranked results.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let service = ctx.service();
    let query = cmd.query.join(" ");
    let limit = cmd
        .limit
        .unwrap_or_else(|| service.clamp_limit(None));

    match service.search(&query, limit) {
        Ok(response) => output_search_response(&response, cmd.json),
        Err(e) => {
            eprintln!("error: search failed: {e}");
            ExitCode::FAILURE
        }
    }
}
