//! Search box and results panel state.

use std::{sync::Arc, time::Duration};

use docsearch_config::{Config, WidgetSettings};
use docsearch_index::{IndexLoader, IndexSource};
use docsearch_render::Panel;
use tracing::{debug, error};

use super::SearchContext;

/// State of the search input control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    /// Whether the input accepts text.
    pub enabled: bool,
    /// Placeholder text.
    pub placeholder: String,
    /// Whether the input has keyboard focus.
    pub focused: bool,
    /// Current text.
    pub value: String,
}

/// Something the user did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The input text changed to this value.
    Input(String),
    /// A key was pressed.
    Key {
        /// Key name, e.g. `"Escape"` or `"k"`.
        key: String,
        /// Control held.
        ctrl: bool,
        /// Command/meta held.
        meta: bool,
    },
    /// A click somewhere on the page.
    Click {
        /// Whether the click landed on the input or the results panel.
        inside: bool,
    },
}

impl WidgetEvent {
    /// A key press without modifiers.
    pub fn key(key: &str) -> Self {
        Self::Key {
            key: key.to_string(),
            ctrl: false,
            meta: false,
        }
    }
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventEffect {
    /// Nothing changed that needs publishing.
    None,
    /// Schedule a debounced search for this value.
    Schedule(String),
    /// The panel was hidden.
    Closed,
}

/// The search box, its results panel, and the loaded index.
pub struct SearchWidget {
    /// The input control; `None` when the page has none.
    input: Option<InputState>,
    /// The results panel.
    panel: Panel,
    /// Loaded index; `None` until loaded or after a failed load.
    context: Option<Arc<SearchContext>>,
    /// Debounce delay and placeholder texts.
    settings: WidgetSettings,
}

impl SearchWidget {
    /// Loads the index from `source` and arms the search box.
    ///
    /// Does nothing when the page has no search input. A load or indexing failure is
    /// logged and leaves the input disabled with the unavailable placeholder; it is never
    /// retried.
    pub async fn initialize(has_input: bool, source: &IndexSource, config: &Config) -> Self {
        if !has_input {
            debug!("no search input on page, skipping initialization");
            return Self::without_input(config.widget.clone());
        }

        let loader = IndexLoader::new(config.loader.clone());
        let context = match loader.load(source).await {
            Ok(documents) => SearchContext::build(documents, config).map_err(|e| {
                error!(error = %e, "failed to build search index");
            }),
            Err(e) => {
                error!(error = %e, "failed to load search index");
                Err(())
            }
        };

        match context {
            Ok(context) => Self::ready(Arc::new(context), config.widget.clone()),
            Err(()) => Self::unavailable(config.widget.clone()),
        }
    }

    /// A widget for a page without a search input.
    pub fn without_input(settings: WidgetSettings) -> Self {
        Self {
            input: None,
            panel: Panel::hidden(),
            context: None,
            settings,
        }
    }

    /// An enabled widget searching `context`.
    pub fn ready(context: Arc<SearchContext>, settings: WidgetSettings) -> Self {
        Self {
            input: Some(InputState {
                enabled: true,
                placeholder: settings.ready_placeholder.clone(),
                focused: false,
                value: String::new(),
            }),
            panel: Panel::hidden(),
            context: Some(context),
            settings,
        }
    }

    /// A disabled widget whose index could not be loaded.
    pub fn unavailable(settings: WidgetSettings) -> Self {
        Self {
            input: Some(InputState {
                enabled: false,
                placeholder: settings.unavailable_placeholder.clone(),
                focused: false,
                value: String::new(),
            }),
            panel: Panel::hidden(),
            context: None,
            settings,
        }
    }

    /// Returns the input state, if the page has an input.
    pub fn input(&self) -> Option<&InputState> {
        self.input.as_ref()
    }

    /// Returns the results panel.
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Returns the loaded index, if any.
    pub fn context(&self) -> Option<&Arc<SearchContext>> {
        self.context.as_ref()
    }

    /// Returns true if the input is enabled and the index is loaded.
    pub fn is_ready(&self) -> bool {
        self.context.is_some() && self.input.as_ref().is_some_and(|input| input.enabled)
    }

    /// Returns the debounce quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.settings.debounce_ms)
    }

    /// Applies an event to the widget state.
    pub fn handle_event(&mut self, event: WidgetEvent) -> EventEffect {
        match event {
            WidgetEvent::Input(value) => self.handle_input(value),
            WidgetEvent::Key { key, ctrl, meta } => self.handle_key(&key, ctrl || meta),
            WidgetEvent::Click { inside } => {
                if inside {
                    EventEffect::None
                } else {
                    self.close()
                }
            }
        }
    }

    /// Runs `query` and replaces the panel with the result.
    ///
    /// Without a loaded index this leaves the panel untouched.
    pub fn perform_search(&mut self, query: &str) -> &Panel {
        if let Some(context) = &self.context {
            self.panel = context.search(query).panel;
        }
        &self.panel
    }

    /// Records new input text, ignoring it while the input is disabled.
    fn handle_input(&mut self, value: String) -> EventEffect {
        if !self.is_ready() {
            return EventEffect::None;
        }
        let Some(input) = self.input.as_mut() else {
            return EventEffect::None;
        };
        input.focused = true;
        input.value.clone_from(&value);
        EventEffect::Schedule(value)
    }

    /// Escape closes the panel while the input has focus; Ctrl/Cmd+K focuses the input.
    fn handle_key(&mut self, key: &str, modified: bool) -> EventEffect {
        let Some(input) = self.input.as_mut() else {
            return EventEffect::None;
        };
        if modified && key.eq_ignore_ascii_case("k") {
            if input.enabled {
                input.focused = true;
            }
            return EventEffect::None;
        }
        if key == "Escape" && input.focused {
            return self.close();
        }
        EventEffect::None
    }

    /// Hides the panel if it is visible.
    fn close(&mut self) -> EventEffect {
        if !self.panel.visible {
            return EventEffect::None;
        }
        self.panel.close();
        EventEffect::Closed
    }
}
