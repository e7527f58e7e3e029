//! Implementation of `docsearch interactive`.

use std::process::ExitCode;

use docsearch_render::render_terminal;
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use crate::{
    cli::{args::InteractiveCommand, context::CommandContext, output::dim},
    widget::{PanelSnapshot, SearchWidget, WidgetEvent, run_event_loop},
};

/// Capacity of the event and update channels.
const CHANNEL_CAPACITY: usize = 64;

/// Feeds stdin lines to the search widget and prints each panel update.
pub async fn run(ctx: &CommandContext, cmd: &InteractiveCommand) -> ExitCode {
    let source = match ctx.index_source(&cmd.source) {
        Ok(source) => source,
        Err(code) => return code,
    };

    let widget = SearchWidget::initialize(true, &source, &ctx.config).await;
    let placeholder = widget
        .input()
        .map(|input| input.placeholder.clone())
        .unwrap_or_default();
    if !widget.is_ready() {
        eprintln!("error: {placeholder}");
        return ExitCode::FAILURE;
    }
    eprintln!("{}", dim(&placeholder));

    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (update_tx, mut update_rx) = mpsc::channel::<PanelSnapshot>(CHANNEL_CAPACITY);
    let event_loop = tokio::spawn(run_event_loop(widget, event_rx, update_tx));

    let html = cmd.html;
    let printer = tokio::spawn(async move {
        while let Some(snapshot) = update_rx.recv().await {
            print_snapshot(&snapshot, html);
        }
    });

    let mut exit = ExitCode::SUCCESS;
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if event_tx.send(parse_line(&line)).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                eprintln!("error: failed to read input: {e}");
                exit = ExitCode::FAILURE;
                break;
            }
        }
    }
    drop(event_tx);

    if let Err(e) = event_loop.await {
        eprintln!("error: search loop failed: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = printer.await {
        eprintln!("error: output failed: {e}");
        return ExitCode::FAILURE;
    }
    exit
}

/// Maps an input line to a widget event.
fn parse_line(line: &str) -> WidgetEvent {
    match line.trim_end() {
        ":escape" => WidgetEvent::key("Escape"),
        ":outside" => WidgetEvent::Click { inside: false },
        ":focus" => WidgetEvent::Key {
            key: "k".to_string(),
            ctrl: true,
            meta: false,
        },
        _ => WidgetEvent::Input(line.to_string()),
    }
}

/// Prints one panel update.
fn print_snapshot(snapshot: &PanelSnapshot, html: bool) {
    println!("> {}", snapshot.query);
    if !snapshot.panel.visible {
        println!("{}", dim("(results hidden)"));
    } else if html {
        println!("{}", snapshot.panel.html);
    } else {
        print!("{}", render_terminal(&snapshot.panel, &snapshot.query));
    }
}
