//! Terminal UI for loghub
//!
//! This crate provides the browsing interface for LogHub: application state,
//! keybindings, terminal event handling, and the widgets that make up the
//! log browser screen.

pub mod app;
pub mod config;
pub mod tui;
pub mod ui;

pub use app::{Action, AppState, FetchRequest, FetchState, FilterField, Focus};
pub use config::{KeyBinding, KeyBindings, KeyContext};
pub use tui::{Event, EventHandler, Tui};
pub use ui::components::{
    DetailView, FilterForm, HelpOverlay, PaginationBar, StatusBar, browser_hints, form_hints,
};
pub use ui::screens::LogBrowserScreen;
pub use ui::{Layout, Theme};
