pub mod components;
mod layout;
pub mod screens;
mod theme;

pub use layout::{BrowserAreas, Layout};
pub use theme::Theme;
