//! Implementation of `docsearch check`.

use std::{collections::BTreeSet, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use docsearch_index::Document;

use crate::{
    cli::{
        args::CheckCommand,
        context::CommandContext,
        output::{dim, header, warning},
    },
    widget::SearchContext,
};

/// Counts of documents with missing fields.
#[derive(Debug, Default, PartialEq, Eq)]
struct Gaps {
    /// Documents without a title.
    title: usize,
    /// Documents without content.
    content: usize,
    /// Documents without a link target.
    url: usize,
}

impl Gaps {
    /// Tallies missing fields across `documents`.
    fn count(documents: &[Document]) -> Self {
        documents.iter().fold(Self::default(), |mut gaps, doc| {
            gaps.title += usize::from(doc.title.trim().is_empty());
            gaps.content += usize::from(doc.content.trim().is_empty());
            gaps.url += usize::from(doc.url.trim().is_empty());
            gaps
        })
    }

    /// Returns true if no field is missing anywhere.
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Loads the index, prints its documents and reports problems.
pub async fn run(ctx: &CommandContext, cmd: &CheckCommand) -> ExitCode {
    let documents = match ctx.load_documents(&cmd.source).await {
        Ok(documents) => documents,
        Err(code) => return code,
    };

    println!("{}", header("Documents:"));
    if documents.is_empty() {
        println!("  {}", dim("(none)"));
    } else {
        println!("{}", document_table(&documents));
    }
    println!();

    let sections: BTreeSet<&str> = documents
        .iter()
        .map(|doc| doc.section.as_str())
        .filter(|section| !section.is_empty())
        .collect();
    let gaps = Gaps::count(&documents);

    println!("{}", header("Summary:"));
    println!("  Documents:        {}", documents.len());
    println!("  Sections:         {}", sections.len());
    println!("  Missing title:    {}", gaps.title);
    println!("  Missing content:  {}", gaps.content);
    println!("  Missing url:      {}", gaps.url);
    println!();

    match SearchContext::build(documents, &ctx.config) {
        Ok(context) => println!("Index: ok ({} documents)", context.index().len()),
        Err(e) => {
            eprintln!("error: failed to build search index: {e}");
            return ExitCode::FAILURE;
        }
    }
    println!();

    let warnings = ctx.config.validate();
    if warnings.is_empty() && gaps.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", header("Warnings:"));
    for w in &warnings {
        println!("  {}", warning(&w.to_string()));
    }
    if !gaps.is_empty() {
        println!("  {}", warning("some documents have empty fields"));
    }
    ExitCode::FAILURE
}

/// Builds a table with one row per document.
fn document_table(documents: &[Document]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Title", "Section", "URL", "Chars"]);
    for (position, doc) in documents.iter().enumerate() {
        table.add_row(vec![
            Cell::new(position),
            Cell::new(&doc.title),
            Cell::new(&doc.section),
            Cell::new(&doc.url),
            Cell::new(doc.content.chars().count()),
        ]);
    }
    table
}
