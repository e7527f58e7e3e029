//! Command-line interface for docsearch.

use std::process::ExitCode;

use clap::Parser;
use docsearch::{
    cli::{
        CommandContext,
        args::{Cli, Commands},
        commands,
    },
    logging,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx).await
}
