//! docsearch: search-as-you-type for static documentation sites.
//!
//! A documentation site ships its pages as a flat collection of records (title, content,
//! section, keywords, url). docsearch loads that collection once, builds an in-memory
//! full-text index over it, and answers each keystroke in the search box with a ranked,
//! highlighted results panel. Typing is debounced so a burst of keystrokes runs a single
//! query, and a failed index load disables the search box instead of breaking the page.
//!
//! The `widget` module models the search box and its event loop; the `cli` module drives
//! the same pipeline from the command line.

#![warn(missing_docs)]

pub mod cli;
pub mod logging;
pub mod widget;
