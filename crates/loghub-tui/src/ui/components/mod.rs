mod detail_view;
mod filter_form;
mod help_overlay;
mod pagination;
mod status_bar;

pub use detail_view::DetailView;
pub use filter_form::FilterForm;
pub use help_overlay::HelpOverlay;
pub use pagination::PaginationBar;
pub use status_bar::{StatusBar, browser_hints, form_hints};
