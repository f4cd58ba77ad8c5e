use ratatui::widgets::TableState;

use loghub_types::{LogEvent, LogFilters, LogLevel, PageResponse};

/// Fields of the filter form, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Application,
    Environment,
    Level,
    From,
    To,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Application,
        FilterField::Environment,
        FilterField::Level,
        FilterField::From,
        FilterField::To,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::Environment => "Environment",
            Self::Level => "Level",
            Self::From => "From",
            Self::To => "To",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Application => Self::Environment,
            Self::Environment => Self::Level,
            Self::Level => Self::From,
            Self::From => Self::To,
            Self::To => Self::Application,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Application => Self::To,
            Self::Environment => Self::Application,
            Self::Level => Self::Environment,
            Self::From => Self::Level,
            Self::To => Self::From,
        }
    }
}

/// Local draft of the filter form. Nothing here reaches the API until the
/// form is submitted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterDraft {
    pub application: String,
    pub environment: String,
    pub level: Option<LogLevel>,
    pub from: String,
    pub to: String,
    pub focused: Option<FilterField>,
}

impl FilterDraft {
    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focused? {
            FilterField::Application => Some(&mut self.application),
            FilterField::Environment => Some(&mut self.environment),
            FilterField::From => Some(&mut self.from),
            FilterField::To => Some(&mut self.to),
            FilterField::Level => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        match self.focused {
            Some(FilterField::Level) => self.level = None,
            _ => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
            }
        }
    }

    pub fn clear_focused(&mut self) {
        match self.focused {
            Some(FilterField::Level) => self.level = None,
            _ => {
                if let Some(text) = self.focused_text() {
                    text.clear();
                }
            }
        }
    }

    /// Cycle the level selection forward: unset -> TRACE -> .. -> ERROR -> unset.
    /// Only meaningful while the level field is focused.
    pub fn cycle_level(&mut self) {
        if self.focused != Some(FilterField::Level) {
            return;
        }
        self.level = match self.level {
            None => Some(LogLevel::ALL[0]),
            Some(LogLevel::Error) => None,
            Some(current) => {
                let idx = LogLevel::ALL.iter().position(|l| *l == current).unwrap_or(0);
                Some(LogLevel::ALL[idx + 1])
            }
        };
    }

    pub fn cycle_level_back(&mut self) {
        if self.focused != Some(FilterField::Level) {
            return;
        }
        self.level = match self.level {
            None => Some(LogLevel::Error),
            Some(LogLevel::Trace) => None,
            Some(current) => {
                let idx = LogLevel::ALL.iter().position(|l| *l == current).unwrap_or(1);
                Some(LogLevel::ALL[idx - 1])
            }
        };
    }

    pub fn focus_next(&mut self) {
        self.focused = Some(match self.focused {
            Some(field) => field.next(),
            None => FilterField::Application,
        });
    }

    pub fn focus_prev(&mut self) {
        self.focused = Some(match self.focused {
            Some(field) => field.prev(),
            None => FilterField::To,
        });
    }

    /// Snapshot the draft as filters to send. The draft itself is unchanged.
    pub fn to_filters(&self) -> LogFilters {
        LogFilters {
            application: self.application.clone(),
            environment: self.environment.clone(),
            level: self.level,
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }

    /// Reset every field to unset. Focus returns to the first field.
    pub fn reset(&mut self) {
        let focused = self.focused;
        *self = Self::default();
        self.focused = focused.map(|_| FilterField::Application);
    }

    /// Display string for one field.
    pub fn display_value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Application => &self.application,
            FilterField::Environment => &self.environment,
            FilterField::Level => self.level.map(|l| l.as_str()).unwrap_or(""),
            FilterField::From => &self.from,
            FilterField::To => &self.to,
        }
    }
}

/// Which part of the screen receives key input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Table,
}

/// Fetch lifecycle of the current page.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// A fetch the controller should issue. Carries the sequence number used to
/// discard responses that arrive after a newer request was issued.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest {
    pub seq: u64,
    pub filters: LogFilters,
    pub page: u64,
}

/// Global application state
pub struct AppState {
    /// Fetch lifecycle of the page being displayed or loaded.
    pub fetch: FetchState,

    /// Filters of the last submitted query (not the draft).
    pub filters: LogFilters,

    /// Filter form draft.
    pub draft: FilterDraft,

    /// Events of the current page.
    pub logs: Vec<LogEvent>,

    /// Zero-based current page, from the last response.
    pub page: u64,

    /// Page capacity requested from the API.
    pub size: u64,

    pub total_elements: u64,
    pub total_pages: u64,

    /// Event shown in the detail overlay, if any. Independent of fetches.
    pub selected: Option<LogEvent>,

    /// Table row selection.
    pub table_state: TableState,

    pub focus: Focus,
    pub help_visible: bool,
    pub should_quit: bool,

    /// API base URL shown in the header.
    pub api_target: String,

    /// Sequence number of the most recently issued fetch.
    latest_seq: u64,
}

impl AppState {
    pub fn new(page_size: u64) -> Self {
        Self {
            fetch: FetchState::Idle,
            filters: LogFilters::default(),
            draft: FilterDraft::default(),
            logs: Vec::new(),
            page: 0,
            size: page_size,
            total_elements: 0,
            total_pages: 0,
            selected: None,
            table_state: TableState::default(),
            focus: Focus::Table,
            help_visible: false,
            should_quit: false,
            api_target: String::new(),
            latest_seq: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.fetch == FetchState::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.fetch {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.fetch, FetchState::Failed(_)) {
            self.fetch = FetchState::Idle;
        }
    }

    fn begin_fetch(&mut self, filters: LogFilters, page: u64) -> FetchRequest {
        self.latest_seq += 1;
        self.fetch = FetchState::Loading;
        self.filters = filters.clone();
        FetchRequest {
            seq: self.latest_seq,
            filters,
            page,
        }
    }

    /// Fetch issued on startup: no filters, first page.
    pub fn initial_fetch(&mut self) -> FetchRequest {
        self.begin_fetch(LogFilters::default(), 0)
    }

    /// Submit the filter form. Ignored while a fetch is in flight (the form
    /// controls are disabled).
    pub fn submit_filters(&mut self) -> Option<FetchRequest> {
        if self.is_loading() {
            return None;
        }
        let filters = self.draft.to_filters();
        Some(self.begin_fetch(filters, 0))
    }

    /// Clear the form. Clearing is itself a submission: it resets the draft
    /// and immediately re-queries with no filters at page zero.
    pub fn clear_filters(&mut self) -> Option<FetchRequest> {
        if self.is_loading() {
            return None;
        }
        self.draft.reset();
        Some(self.begin_fetch(LogFilters::default(), 0))
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        if self.is_loading() || self.page + 1 >= self.total_pages {
            return None;
        }
        let (filters, page) = (self.filters.clone(), self.page + 1);
        Some(self.begin_fetch(filters, page))
    }

    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        if self.is_loading() || self.page == 0 {
            return None;
        }
        let (filters, page) = (self.filters.clone(), self.page - 1);
        Some(self.begin_fetch(filters, page))
    }

    pub fn goto_page(&mut self, page: u64) -> Option<FetchRequest> {
        if self.is_loading() || page >= self.total_pages || page == self.page {
            return None;
        }
        let filters = self.filters.clone();
        Some(self.begin_fetch(filters, page))
    }

    /// Re-run the current query on the current page.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        if self.is_loading() {
            return None;
        }
        let (filters, page) = (self.filters.clone(), self.page);
        Some(self.begin_fetch(filters, page))
    }

    /// Apply a successful response. Returns false (and changes nothing) when
    /// the response belongs to a superseded request.
    pub fn apply_response(&mut self, seq: u64, response: PageResponse<LogEvent>) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.logs = response.content;
        self.page = response.page;
        self.size = response.size;
        self.total_elements = response.total_elements;
        self.total_pages = response.total_pages;
        self.fetch = FetchState::Loaded;
        self.table_state
            .select((!self.logs.is_empty()).then_some(0));
        // An open detail view stays open.
        true
    }

    /// Apply a failed fetch: the list is cleared so stale rows are never
    /// shown next to the error banner. Stale failures are discarded too.
    pub fn apply_failure(&mut self, seq: u64, message: String) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.logs.clear();
        self.table_state.select(None);
        self.fetch = FetchState::Failed(message);
        true
    }

    pub fn row_down(&mut self) {
        if self.logs.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 >= self.logs.len() => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn row_up(&mut self) {
        if self.logs.is_empty() {
            return;
        }
        let prev = match self.table_state.selected() {
            Some(0) | None => self.logs.len() - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(prev));
    }

    pub fn row_top(&mut self) {
        if !self.logs.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub fn row_bottom(&mut self) {
        if !self.logs.is_empty() {
            self.table_state.select(Some(self.logs.len() - 1));
        }
    }

    /// Open the detail view for the selected row and return the event so the
    /// controller can refresh it by id in the background.
    pub fn select_row(&mut self) -> Option<LogEvent> {
        let idx = self.table_state.selected()?;
        let event = self.logs.get(idx)?.clone();
        self.selected = Some(event.clone());
        Some(event)
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Replace the open detail with an authoritative by-id fetch result, but
    /// only if the same event is still being shown.
    pub fn update_detail(&mut self, event: LogEvent) {
        let showing = self
            .selected
            .as_ref()
            .and_then(|s| s.id.as_deref())
            .zip(event.id.as_deref())
            .is_some_and(|(shown, fetched)| shown == fetched);
        if showing {
            self.selected = Some(event);
        }
    }

    pub fn focus_filters(&mut self) {
        self.focus = Focus::Filters;
        if self.draft.focused.is_none() {
            self.draft.focused = Some(FilterField::Application);
        }
    }

    pub fn focus_table(&mut self) {
        self.focus = Focus::Table;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loghub_types::LogLevel;

    fn event(id: &str, message: &str) -> LogEvent {
        LogEvent {
            id: Some(id.to_string()),
            application: "billing".to_string(),
            environment: "production".to_string(),
            level: LogLevel::Info,
            message: message.to_string(),
            timestamp: "2024-03-10T12:00:00Z".to_string(),
            trace_id: None,
            metadata: None,
            sdk: None,
        }
    }

    fn page(content: Vec<LogEvent>, page: u64, total_pages: u64) -> PageResponse<LogEvent> {
        let total_elements = total_pages * 20;
        PageResponse {
            content,
            page,
            size: 20,
            total_elements,
            total_pages,
        }
    }

    #[test]
    fn startup_fetch_is_unfiltered_page_zero() {
        let mut state = AppState::new(20);
        let req = state.initial_fetch();
        assert!(req.filters.is_empty());
        assert_eq!(req.page, 0);
        assert!(state.is_loading());
    }

    #[test]
    fn submit_and_clear_are_disabled_while_loading() {
        let mut state = AppState::new(20);
        state.initial_fetch();
        assert!(state.submit_filters().is_none());
        assert!(state.clear_filters().is_none());
    }

    #[test]
    fn clear_resets_the_draft_and_resubmits_empty() {
        let mut state = AppState::new(20);
        state.draft.application = "billing".to_string();
        state.draft.level = Some(LogLevel::Error);
        state.filters = state.draft.to_filters();
        state.page = 3;

        let req = state.clear_filters().unwrap();
        assert!(req.filters.is_empty());
        assert_eq!(req.page, 0);
        assert_eq!(state.draft, FilterDraft::default());
        assert!(state.filters.is_empty());
    }

    #[test]
    fn submit_snapshots_the_draft_at_page_zero() {
        let mut state = AppState::new(20);
        state.draft.application = "billing".to_string();
        state.draft.level = Some(LogLevel::Error);

        let req = state.submit_filters().unwrap();
        assert_eq!(req.filters.application, "billing");
        assert_eq!(req.filters.level, Some(LogLevel::Error));
        assert_eq!(req.page, 0);
        assert_eq!(state.filters, req.filters);
    }

    #[test]
    fn failure_clears_rows_and_next_success_clears_the_error() {
        let mut state = AppState::new(20);
        let req = state.initial_fetch();
        state.apply_response(req.seq, page(vec![event("1", "a")], 0, 2));
        assert_eq!(state.logs.len(), 1);

        let req = state.next_page().unwrap();
        assert!(state.apply_failure(req.seq, "boom".to_string()));
        assert!(state.logs.is_empty());
        assert_eq!(state.error_message(), Some("boom"));
        assert_eq!(state.table_state.selected(), None);

        let req = state.refresh().unwrap();
        assert!(state.apply_response(req.seq, page(vec![event("2", "b")], 1, 2)));
        assert_eq!(state.error_message(), None);
        assert_eq!(state.fetch, FetchState::Loaded);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut state = AppState::new(20);
        let first = state.initial_fetch();
        state.apply_response(first.seq, page(vec![event("1", "a")], 0, 5));

        let slow = state.next_page().unwrap();
        let newer = state.refresh();
        // next_page marked us loading, so refresh is rejected; emulate a
        // second user gesture by applying the in-flight response first.
        assert!(newer.is_none());
        state.apply_response(slow.seq, page(vec![event("2", "b")], 1, 5));

        let latest = state.next_page().unwrap();
        // The slow request from before resolves late: dropped.
        assert!(!state.apply_response(slow.seq, page(vec![event("9", "stale")], 1, 5)));
        assert!(!state.apply_failure(slow.seq, "stale error".to_string()));
        assert!(state.is_loading());

        assert!(state.apply_response(latest.seq, page(vec![event("3", "c")], 2, 5)));
        assert_eq!(state.logs[0].id.as_deref(), Some("3"));
    }

    #[test]
    fn pagination_respects_bounds() {
        let mut state = AppState::new(20);
        let req = state.initial_fetch();
        state.apply_response(req.seq, page(vec![event("1", "a")], 0, 3));

        assert!(state.prev_page().is_none(), "prev disabled at page 0");
        assert!(state.goto_page(3).is_none(), "past the last page");
        assert!(state.goto_page(0).is_none(), "already there");

        let req = state.goto_page(2).unwrap();
        assert_eq!(req.page, 2);
        state.apply_response(req.seq, page(vec![event("2", "b")], 2, 3));
        assert!(state.next_page().is_none(), "next disabled at last page");
    }

    #[test]
    fn page_change_keeps_the_submitted_filters() {
        let mut state = AppState::new(20);
        state.draft.application = "billing".to_string();
        let req = state.submit_filters().unwrap();
        state.apply_response(req.seq, page(vec![event("1", "a")], 0, 4));

        let req = state.next_page().unwrap();
        assert_eq!(req.filters.application, "billing");
        assert_eq!(req.page, 1);
    }

    #[test]
    fn detail_survives_fetch_failures() {
        let mut state = AppState::new(20);
        let req = state.initial_fetch();
        state.apply_response(req.seq, page(vec![event("1", "a")], 0, 2));
        state.row_top();
        let opened = state.select_row().unwrap();
        assert_eq!(opened.id.as_deref(), Some("1"));

        let req = state.next_page().unwrap();
        state.apply_failure(req.seq, "boom".to_string());
        assert!(state.selected.is_some(), "detail stays open across errors");

        state.close_detail();
        assert!(state.selected.is_none());
    }

    #[test]
    fn detail_refresh_only_applies_to_the_open_event() {
        let mut state = AppState::new(20);
        let req = state.initial_fetch();
        state.apply_response(req.seq, page(vec![event("1", "a"), event("2", "b")], 0, 1));
        state.row_top();
        state.select_row();

        // A refresh for some other id does not replace the open detail.
        state.update_detail(event("2", "refreshed"));
        assert_eq!(state.selected.as_ref().unwrap().message, "a");

        let mut refreshed = event("1", "authoritative");
        refreshed.trace_id = Some("trace-1".to_string());
        state.update_detail(refreshed);
        assert_eq!(state.selected.as_ref().unwrap().message, "authoritative");
    }

    #[test]
    fn level_cycling_covers_unset_and_all_levels() {
        let mut draft = FilterDraft {
            focused: Some(FilterField::Level),
            ..Default::default()
        };

        let mut seen = vec![draft.level];
        for _ in 0..6 {
            draft.cycle_level();
            seen.push(draft.level);
        }
        assert_eq!(seen[0], None);
        assert_eq!(seen[1], Some(LogLevel::Trace));
        assert_eq!(seen[5], Some(LogLevel::Error));
        assert_eq!(seen[6], None, "cycles back to unset");

        draft.cycle_level_back();
        assert_eq!(draft.level, Some(LogLevel::Error));

        // Cycling is a no-op while another field is focused.
        draft.focused = Some(FilterField::Application);
        draft.cycle_level();
        assert_eq!(draft.level, Some(LogLevel::Error));
    }

    #[test]
    fn row_navigation_wraps() {
        let mut state = AppState::new(20);
        let req = state.initial_fetch();
        state.apply_response(req.seq, page(vec![event("1", "a"), event("2", "b")], 0, 1));

        assert_eq!(state.table_state.selected(), Some(0));
        state.row_up();
        assert_eq!(state.table_state.selected(), Some(1));
        state.row_down();
        assert_eq!(state.table_state.selected(), Some(0));
        state.row_bottom();
        assert_eq!(state.table_state.selected(), Some(1));
    }
}
