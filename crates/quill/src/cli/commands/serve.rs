//! Implementation of `quill serve`.

use std::{process::ExitCode, sync::Arc};

use quill::server;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::cli::{args::ServeCommand, context::CommandContext};

/// Builds the index, then serves the search endpoint until interrupted.
pub fn run(ctx: &CommandContext, cmd: &ServeCommand) -> ExitCode {
    let service = Arc::new(ctx.service());
    let bind = cmd.bind.as_deref().unwrap_or(&ctx.config.server.bind);

    // A failed build is retried by the first query.
    match service.warm() {
        Ok(posts) => info!(posts, "index ready"),
        Err(e) => warn!(error = %e, "index build failed, will retry on first query"),
    }

    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(server::serve(service, bind)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: server failed on {bind}: {e}");
            ExitCode::FAILURE
        }
    }
}
