//! Implementation of `docsearch search`.

use std::process::ExitCode;

use docsearch_index::QueryStrategy;
use docsearch_query::parse;

use crate::{
    cli::{
        args::SearchCommand,
        context::CommandContext,
        output::{dim, header, output_response},
    },
    widget::SearchResponse,
};

/// Runs one query and prints the rendered results.
pub async fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let context = match ctx.search_context(&cmd.source).await {
        Ok(context) => context,
        Err(code) => return code,
    };

    let response = context.search(&cmd.query);

    if cmd.explain.explain {
        explain(&cmd.query, &response, context.documents().len());
        return ExitCode::SUCCESS;
    }

    output_response(
        &cmd.query,
        &response,
        &cmd.output,
        ctx.config.search.min_query_length,
    )
}

/// Prints how the input was turned into a query and how it was answered.
fn explain(query: &str, response: &SearchResponse, documents: usize) {
    let outcome = &response.outcome;

    println!("{}", header("Input:"));
    println!("   {query}");
    println!();

    if outcome.strategy == QueryStrategy::Skipped {
        println!("{}", dim("(too short to search)"));
        println!();
        return;
    }

    println!("{}", header("Expression:"));
    println!("   {}", outcome.expression);
    println!();

    println!("{}", header("Parsed clauses:"));
    match parse(&outcome.expression) {
        Ok(parsed) if parsed.is_empty() => println!("   {}", dim("(empty query)")),
        Ok(parsed) => {
            for line in parsed.to_string().lines() {
                println!("   {line}");
            }
        }
        Err(e) => println!("   {}", dim(&format!("({e})"))),
    }
    println!();

    println!("{}", header("Strategy:"));
    println!("   {}", outcome.strategy.as_str());
    println!();

    println!("{}", header("Results:"));
    println!("   Documents indexed:  {documents}");
    println!("   Matches:            {}", outcome.results.len());
    println!("   Displayed:          {}", response.panel.items.len());
    println!();
}
