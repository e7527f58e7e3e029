//! The search box.
//!
//! A [`SearchWidget`] owns the input control state, the results panel, and the loaded
//! [`SearchContext`]. Page events arrive on a channel; [`run_event_loop`] applies them,
//! debounces typing with a [`Debouncer`], and publishes a [`PanelSnapshot`] whenever the
//! panel changes. The context is built once at initialization and only read afterwards.

mod context;
mod debounce;
mod event_loop;
mod state;

pub use context::{SearchContext, SearchResponse};
pub use debounce::Debouncer;
pub use event_loop::{PanelSnapshot, run_event_loop};
pub use state::{EventEffect, InputState, SearchWidget, WidgetEvent};
