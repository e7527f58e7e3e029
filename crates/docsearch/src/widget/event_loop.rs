//! The widget's event loop.

use docsearch_render::Panel;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use super::{Debouncer, EventEffect, SearchWidget, WidgetEvent};

/// The panel as published after a search or a close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    /// Query the panel was rendered for.
    pub query: String,
    /// Panel contents.
    pub panel: Panel,
}

/// Drives `widget` from `events` until the event channel closes.
///
/// Input is debounced: only the last value of a burst is searched. Every search and every
/// close publishes a snapshot on `updates`. A search still pending when the events end is
/// run before returning. Stops early if `updates` is closed.
pub async fn run_event_loop(
    mut widget: SearchWidget,
    mut events: mpsc::Receiver<WidgetEvent>,
    updates: mpsc::Sender<PanelSnapshot>,
) -> SearchWidget {
    let mut debouncer = Debouncer::new(widget.debounce());
    let mut query = String::new();

    loop {
        let snapshot_query = tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match widget.handle_event(event) {
                    EventEffect::Schedule(value) => {
                        debouncer.schedule(value);
                        continue;
                    }
                    EventEffect::Closed => query.clone(),
                    EventEffect::None => continue,
                }
            }
            due = debouncer.fired() => {
                debug!(query = %due, "running debounced search");
                widget.perform_search(&due);
                query = due;
                query.clone()
            }
        };

        let snapshot = PanelSnapshot {
            query: snapshot_query,
            panel: widget.panel().clone(),
        };
        if updates.send(snapshot).await.is_err() {
            return widget;
        }
    }

    if let Some(due) = debouncer.take() {
        widget.perform_search(&due);
        let snapshot = PanelSnapshot {
            query: due,
            panel: widget.panel().clone(),
        };
        if updates.send(snapshot).await.is_err() {
            debug!("update receiver closed before final search");
        }
    }
    widget
}
