use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;

use loghub_api::{ApiConfig, LogApiClient};
use loghub_tui::{
    Action, AppState, DetailView, Event, EventHandler, FetchRequest, Focus, HelpOverlay,
    KeyBindings, KeyContext, LogBrowserScreen, Tui,
};
use loghub_types::{LogEvent, PageResponse};

/// One generic user-facing message for every fetch failure; the specific
/// cause only goes to the diagnostic log.
const FETCH_ERROR_MESSAGE: &str = "Failed to load logs. Check your connection and try again.";

/// Loghub - A terminal UI for browsing LogHub log events
#[derive(Parser, Debug)]
#[command(name = "loghub")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log API base URL (defaults to LOGHUB_API_URL or the local endpoint)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// API key attached to every request (defaults to LOGHUB_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Number of log events per page
    #[arg(long, default_value = "20")]
    page_size: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr; the terminal UI owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run_app(args).await;

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

/// Results of async fetches, delivered back to the update loop.
enum FetchMsg {
    PageLoaded {
        seq: u64,
        response: PageResponse<LogEvent>,
    },
    PageFailed {
        seq: u64,
        message: String,
    },
    DetailLoaded {
        event: LogEvent,
    },
}

async fn run_app(args: Args) -> Result<()> {
    let mut config = ApiConfig::from_env();
    if let Some(url) = args.api_url {
        config.base_url = url;
    }
    if let Some(key) = args.api_key {
        config.api_key = key;
    }

    let client = LogApiClient::new(&config)?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchMsg>();

    let mut state = AppState::new(args.page_size);
    state.api_target = client.base_url().to_string();

    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(100));
    let keybindings = KeyBindings::new();

    // Initial query: no filters, first page.
    let request = state.initial_fetch();
    start_fetch(&client, &fetch_tx, request, state.size);

    render(&mut tui, &mut state)?;

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                match event {
                    Event::Key(key) => {
                        let action = if state.selected.is_some() {
                            keybindings.get_action(KeyContext::Detail, &key)
                        } else if state.focus == Focus::Filters {
                            keybindings.get_form_action(&key)
                        } else {
                            keybindings.get_action(KeyContext::Table, &key)
                        };

                        if let Some(action) = action {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Tick => {}
                    Event::Resize(_, _) => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Error(e) => {
                        tracing::warn!(error = %e, "terminal input error");
                    }
                }
            }

            Some(action) = action_rx.recv() => {
                handle_action(&mut state, &client, &fetch_tx, action);
            }

            Some(msg) = fetch_rx.recv() => {
                match msg {
                    FetchMsg::PageLoaded { seq, response } => {
                        if !state.apply_response(seq, response) {
                            tracing::debug!(seq, "discarding stale page response");
                        }
                    }
                    FetchMsg::PageFailed { seq, message } => {
                        if !state.apply_failure(seq, message) {
                            tracing::debug!(seq, "discarding stale fetch failure");
                        }
                    }
                    FetchMsg::DetailLoaded { event } => {
                        state.update_detail(event);
                    }
                }
            }
        }

        if state.should_quit {
            break;
        }

        render(&mut tui, &mut state)?;
    }

    events.shutdown();
    tui.restore()?;

    Ok(())
}

fn handle_action(
    state: &mut AppState,
    client: &LogApiClient,
    fetch_tx: &mpsc::UnboundedSender<FetchMsg>,
    action: Action,
) {
    let size = state.size;
    let issue = |request: Option<FetchRequest>| {
        if let Some(request) = request {
            start_fetch(client, fetch_tx, request, size);
        }
    };

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ToggleHelp => {
            state.help_visible = !state.help_visible;
        }
        Action::DismissError => {
            state.dismiss_error();
        }

        Action::FocusFilters => {
            state.focus_filters();
        }
        Action::FocusTable => {
            state.focus_table();
        }

        Action::NextField => {
            state.draft.focus_next();
        }
        Action::PrevField => {
            state.draft.focus_prev();
        }
        Action::FieldInput(c) => {
            state.draft.input_char(c);
        }
        Action::FieldBackspace => {
            state.draft.backspace();
        }
        Action::FieldClearInput => {
            state.draft.clear_focused();
        }
        Action::CycleLevel => {
            state.draft.cycle_level();
        }
        Action::CycleLevelBack => {
            state.draft.cycle_level_back();
        }
        Action::SubmitFilters => {
            let request = state.submit_filters();
            if request.is_some() {
                state.focus_table();
            }
            issue(request);
        }
        Action::ClearFilters => {
            issue(state.clear_filters());
        }

        Action::RowUp => state.row_up(),
        Action::RowDown => state.row_down(),
        Action::RowTop => state.row_top(),
        Action::RowBottom => state.row_bottom(),
        Action::SelectRow => {
            if let Some(event) = state.select_row() {
                // The row already has everything we display; refreshing by id
                // picks up fields added since the page was fetched.
                if let Some(id) = event.id {
                    start_detail_fetch(client, fetch_tx, id);
                }
            }
        }
        Action::CloseDetail => {
            state.close_detail();
        }

        Action::NextPage => issue(state.next_page()),
        Action::PrevPage => issue(state.prev_page()),
        Action::GotoPage(page) => issue(state.goto_page(page)),
        Action::Refresh => issue(state.refresh()),

        Action::Tick | Action::Render => {}
    }
}

/// Spawn a page query. Exactly one completion message is sent back, tagged
/// with the request's sequence number so late responses can be discarded.
fn start_fetch(
    client: &LogApiClient,
    fetch_tx: &mpsc::UnboundedSender<FetchMsg>,
    request: FetchRequest,
    size: u64,
) {
    let client = client.clone();
    let tx = fetch_tx.clone();

    tokio::spawn(async move {
        match client.fetch_logs(&request.filters, request.page, size).await {
            Ok(response) => {
                let _ = tx.send(FetchMsg::PageLoaded {
                    seq: request.seq,
                    response,
                });
            }
            Err(err) => {
                tracing::error!(error = %err, page = request.page, "log query failed");
                let _ = tx.send(FetchMsg::PageFailed {
                    seq: request.seq,
                    message: FETCH_ERROR_MESSAGE.to_string(),
                });
            }
        }
    });
}

/// Spawn a by-id refresh for the open detail view. Failures are logged only;
/// the detail keeps showing the row it was opened with.
fn start_detail_fetch(
    client: &LogApiClient,
    fetch_tx: &mpsc::UnboundedSender<FetchMsg>,
    id: String,
) {
    let client = client.clone();
    let tx = fetch_tx.clone();

    tokio::spawn(async move {
        match client.fetch_log_by_id(&id).await {
            Ok(event) => {
                let _ = tx.send(FetchMsg::DetailLoaded { event });
            }
            Err(err) => {
                tracing::debug!(error = %err, id, "detail refresh failed");
            }
        }
    });
}

fn render(tui: &mut Tui, state: &mut AppState) -> Result<()> {
    tui.terminal().draw(|frame| {
        LogBrowserScreen::render(frame, state);

        if let Some(event) = &state.selected {
            DetailView::render(frame, event);
        }

        if state.help_visible {
            HelpOverlay::render(frame);
        }
    })?;

    Ok(())
}
