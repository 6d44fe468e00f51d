//! The view controller
//!
//! One `App` owns everything the original front end kept in closure
//! captures: the data source, the current view state, the month selection,
//! the popup, and the async plumbing. Button clicks become key presses that
//! issue a [`LoadRequest`]; each request runs in a spawned task and reports
//! back over a channel polled from the tick loop.
//!
//! Per-request state machine: `Idle -> Loading -> {Loaded | Failed}`.
//! Overlapping requests are allowed; every dispatch bumps a generation
//! counter and outcomes from older generations are dropped, so a slow
//! response can never overwrite a newer view.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error};

use marquee_core::error::SourceError;
use marquee_core::model::{month_label, pick_recommendations, Movie, WatchedEntry};
use marquee_core::source::MovieSource;

use crate::tui::popups::MonthSelectPopup;
use crate::tui::theme::Theme;
use crate::tui::views;

const TICK: Duration = Duration::from_millis(100);

/// Status-bar messages rotated while a request is in flight.
const LOADING_MESSAGES: [&str; 3] = [
    "Preparing your recommendations...",
    "Fetching top genres...",
    "Retrieving movie posters...",
];

/// Ticks between loading-message rotations (1.5 s at the 100 ms tick).
const MESSAGE_ROTATE_TICKS: u64 = 15;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Watched,
    Recommendations,
}

/// One command from the user: which list to fetch, scoped to which month.
#[derive(Debug, Clone, Copy)]
pub struct LoadRequest {
    pub kind: LoadKind,
    pub month: Option<u8>,
}

/// Successfully fetched content, ready to render.
pub enum ViewContent {
    Watched(Vec<WatchedEntry>),
    Recommendations(Vec<Movie>),
}

impl ViewContent {
    fn len(&self) -> usize {
        match self {
            ViewContent::Watched(entries) => entries.len(),
            ViewContent::Recommendations(movies) => movies.len(),
        }
    }

    fn kind(&self) -> LoadKind {
        match self {
            ViewContent::Watched(_) => LoadKind::Watched,
            ViewContent::Recommendations(_) => LoadKind::Recommendations,
        }
    }
}

pub enum ViewState {
    Idle,
    Loading { kind: LoadKind },
    /// `revealed` grows one card per tick for the staggered appearance.
    Loaded { content: ViewContent, revealed: usize },
    Failed,
}

struct FetchOutcome {
    generation: u64,
    result: Result<ViewContent, SourceError>,
}

pub struct App {
    source: Arc<dyn MovieSource>,
    theme: Theme,
    state: ViewState,
    month: Option<u8>,
    popup: Option<MonthSelectPopup>,
    generation: u64,
    outcomes_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    ticks: u64,
    loading_since: u64,
    scroll: usize,
    should_quit: bool,
}

impl App {
    pub fn new(source: Arc<dyn MovieSource>, theme: Theme) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            source,
            theme,
            state: ViewState::Idle,
            month: None,
            popup: None,
            generation: 0,
            outcomes_tx,
            outcomes_rx,
            ticks: 0,
            loading_since: 0,
            scroll: 0,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // The original page fetched all watched movies on load.
        self.dispatch(LoadRequest {
            kind: LoadKind::Watched,
            month: None,
        });

        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK);
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.on_key(key);
                        }
                        Some(Err(e)) => error!("terminal event error: {e}"),
                        None => break,
                        _ => {}
                    }
                }
                _ = ticker.tick() => {
                    self.on_tick();
                    self.poll_outcomes();
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Issue a load: bump the generation, enter `Loading`, fetch in the
    /// background. Recommendation results are shuffled and capped before
    /// they reach the UI.
    fn dispatch(&mut self, req: LoadRequest) {
        self.generation += 1;
        self.state = ViewState::Loading { kind: req.kind };
        self.loading_since = self.ticks;
        self.scroll = 0;

        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = match req.kind {
                LoadKind::Watched => source.watched(req.month).await.map(ViewContent::Watched),
                LoadKind::Recommendations => {
                    // Recommendations are always per-month; no selection
                    // means the first month of the window.
                    let month = req.month.unwrap_or(1);
                    source
                        .recommendations(month)
                        .await
                        .map(|movies| ViewContent::Recommendations(pick_recommendations(movies)))
                }
            };
            let _ = tx.send(FetchOutcome { generation, result });
        });
    }

    /// Drain finished fetches. Outcomes from superseded requests are
    /// dropped here, which is what prevents the stale-response overwrite.
    fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.on_outcome(outcome);
        }
    }

    fn on_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            debug!(
                generation = outcome.generation,
                current = self.generation,
                "dropping stale fetch outcome"
            );
            return;
        }
        match outcome.result {
            Ok(content) => {
                self.state = ViewState::Loaded {
                    content,
                    revealed: 0,
                };
            }
            Err(err) => {
                error!("failed to load movies: {err}");
                self.state = ViewState::Failed;
            }
        }
    }

    fn on_tick(&mut self) {
        self.ticks += 1;
        if let ViewState::Loaded { content, revealed } = &mut self.state {
            if *revealed < content.len() {
                *revealed += 1;
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(popup) = self.popup.as_mut() {
            match key.code {
                KeyCode::Up => popup.prev(),
                KeyCode::Down => popup.next(),
                KeyCode::Enter => {
                    let month = popup.selection();
                    self.popup = None;
                    self.month = month;
                    let kind = self.current_kind();
                    self.dispatch(LoadRequest { kind, month });
                }
                KeyCode::Esc => self.popup = None,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('w') => self.dispatch(LoadRequest {
                kind: LoadKind::Watched,
                month: self.month,
            }),
            KeyCode::Char('r') => self.dispatch(LoadRequest {
                kind: LoadKind::Recommendations,
                month: self.month,
            }),
            KeyCode::Char('m') => self.popup = Some(MonthSelectPopup::new(self.month)),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => {
                if let ViewState::Loaded {
                    content: ViewContent::Watched(entries),
                    ..
                } = &self.state
                {
                    if self.scroll + 1 < entries.len() {
                        self.scroll += 1;
                    }
                }
            }
            _ => {}
        }
    }

    /// Which list a month change should reload: whatever is showing or
    /// loading, defaulting to watched.
    fn current_kind(&self) -> LoadKind {
        match &self.state {
            ViewState::Loading { kind } => *kind,
            ViewState::Loaded { content, .. } => content.kind(),
            ViewState::Idle | ViewState::Failed => LoadKind::Watched,
        }
    }

    fn month_scope(&self) -> &'static str {
        self.month.and_then(month_label).unwrap_or("All months")
    }

    fn render(&self, f: &mut Frame<'_>) {
        f.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg)),
            f.area(),
        );
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(5),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        match &self.state {
            ViewState::Idle => views::render_idle(f, chunks[1], &self.theme),
            ViewState::Loading { .. } => {
                views::skeleton::render(f, chunks[1], &self.theme, self.ticks)
            }
            ViewState::Failed => views::render_failure(f, chunks[1], &self.theme),
            ViewState::Loaded {
                content: ViewContent::Watched(entries),
                revealed,
            } => views::watched::render(f, chunks[1], &self.theme, entries, *revealed, self.scroll),
            ViewState::Loaded {
                content: ViewContent::Recommendations(movies),
                revealed,
            } => views::grid::render(f, chunks[1], &self.theme, movies, *revealed),
        }

        self.render_status(f, chunks[2]);

        if let Some(popup) = &self.popup {
            popup.render(f, &self.theme);
        }
    }

    fn render_header(&self, f: &mut Frame<'_>, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                " marquee ",
                Style::default()
                    .fg(self.theme.title)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("· ", Style::default().fg(self.theme.dim)),
            Span::styled(self.month_scope(), Style::default().fg(self.theme.accent)),
        ]);
        let hints = Line::from(Span::styled(
            " w watched  r recommendations  m month  q quit",
            Style::default().fg(self.theme.dim),
        ));
        f.render_widget(Paragraph::new(vec![title, hints]), area);
    }

    fn render_status(&self, f: &mut Frame<'_>, area: Rect) {
        let line = match &self.state {
            ViewState::Loading { .. } => {
                let elapsed = self.ticks.saturating_sub(self.loading_since);
                let message = LOADING_MESSAGES
                    [(elapsed / MESSAGE_ROTATE_TICKS) as usize % LOADING_MESSAGES.len()];
                let frame = SPINNER[self.ticks as usize % SPINNER.len()];
                Line::from(vec![
                    Span::styled(format!(" {frame} "), Style::default().fg(self.theme.accent)),
                    Span::styled(message, Style::default().fg(self.theme.text)),
                ])
            }
            ViewState::Loaded { content, .. } => {
                let summary = match content {
                    ViewContent::Watched(entries) => {
                        format!(" {} watched movies", entries.len())
                    }
                    ViewContent::Recommendations(movies) => {
                        format!(" {} recommendations", movies.len())
                    }
                };
                Line::from(Span::styled(summary, Style::default().fg(self.theme.success)))
            }
            ViewState::Failed => Line::from(Span::styled(
                " see ~/.marquee/logs/marquee.log for details",
                Style::default().fg(self.theme.dim),
            )),
            ViewState::Idle => Line::from(""),
        };
        f.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;

    use crate::tui::theme;

    struct StubSource {
        watched: Vec<WatchedEntry>,
        recommendations: Vec<Movie>,
        fail: bool,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                watched: Vec::new(),
                recommendations: Vec::new(),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl MovieSource for StubSource {
        async fn watched(&self, _month: Option<u8>) -> Result<Vec<WatchedEntry>, SourceError> {
            if self.fail {
                return Err(SourceError::Status { status: 500 });
            }
            Ok(self.watched.clone())
        }

        async fn recommendations(&self, _month: u8) -> Result<Vec<Movie>, SourceError> {
            if self.fail {
                return Err(SourceError::Status { status: 500 });
            }
            Ok(self.recommendations.clone())
        }
    }

    fn entry(display: &str) -> WatchedEntry {
        WatchedEntry {
            display: display.to_string(),
        }
    }

    fn movie(name: &str) -> Movie {
        Movie {
            name: name.to_string(),
            poster: String::new(),
            genres: vec!["Drama".to_string()],
            detail_uri: None,
            rating: Some(7.5),
        }
    }

    fn app_with(stub: StubSource) -> App {
        App::new(Arc::new(stub), theme::by_name("marquee"))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Wait for the spawned fetch and apply its outcome.
    async fn settle(app: &mut App) {
        let outcome = app.outcomes_rx.recv().await.unwrap();
        app.on_outcome(outcome);
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_starts_idle() {
        let app = app_with(StubSource::new());
        assert!(matches!(app.state, ViewState::Idle));
    }

    #[tokio::test]
    async fn test_watched_load_reaches_loaded() {
        let mut stub = StubSource::new();
        stub.watched = vec![entry("Dune (2021)"), entry("Arrival (2016)")];
        let mut app = app_with(stub);

        app.dispatch(LoadRequest {
            kind: LoadKind::Watched,
            month: None,
        });
        assert!(matches!(
            app.state,
            ViewState::Loading {
                kind: LoadKind::Watched
            }
        ));

        settle(&mut app).await;
        match &app.state {
            ViewState::Loaded {
                content: ViewContent::Watched(entries),
                revealed,
            } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(*revealed, 0);
            }
            _ => panic!("expected loaded watched state"),
        }
    }

    #[tokio::test]
    async fn test_recommendations_capped_at_eight() {
        let mut stub = StubSource::new();
        stub.recommendations = (0..20).map(|i| movie(&format!("m{i}"))).collect();
        let mut app = app_with(stub);

        app.dispatch(LoadRequest {
            kind: LoadKind::Recommendations,
            month: Some(2),
        });
        settle(&mut app).await;
        match &app.state {
            ViewState::Loaded {
                content: ViewContent::Recommendations(movies),
                ..
            } => assert_eq!(movies.len(), 8),
            _ => panic!("expected loaded recommendations state"),
        }
    }

    #[tokio::test]
    async fn test_short_recommendation_list_kept_whole() {
        let mut stub = StubSource::new();
        stub.recommendations = (0..3).map(|i| movie(&format!("m{i}"))).collect();
        let mut app = app_with(stub);

        app.dispatch(LoadRequest {
            kind: LoadKind::Recommendations,
            month: None,
        });
        settle(&mut app).await;
        match &app.state {
            ViewState::Loaded {
                content: ViewContent::Recommendations(movies),
                ..
            } => assert_eq!(movies.len(), 3),
            _ => panic!("expected loaded recommendations state"),
        }
    }

    #[tokio::test]
    async fn test_failure_sets_failed() {
        let mut stub = StubSource::new();
        stub.fail = true;
        let mut app = app_with(stub);

        app.dispatch(LoadRequest {
            kind: LoadKind::Watched,
            month: None,
        });
        settle(&mut app).await;
        assert!(matches!(app.state, ViewState::Failed));
    }

    #[tokio::test]
    async fn test_stale_outcome_is_dropped() {
        let mut app = app_with(StubSource::new());
        app.generation = 3;
        app.state = ViewState::Loading {
            kind: LoadKind::Watched,
        };

        app.on_outcome(FetchOutcome {
            generation: 2,
            result: Ok(ViewContent::Watched(vec![entry("stale")])),
        });
        assert!(matches!(app.state, ViewState::Loading { .. }));

        app.on_outcome(FetchOutcome {
            generation: 3,
            result: Ok(ViewContent::Watched(vec![entry("fresh")])),
        });
        match &app.state {
            ViewState::Loaded {
                content: ViewContent::Watched(entries),
                ..
            } => assert_eq!(entries[0].display, "fresh"),
            _ => panic!("expected loaded state"),
        }
    }

    #[test]
    fn test_reveal_progresses_and_caps() {
        let mut app = app_with(StubSource::new());
        app.state = ViewState::Loaded {
            content: ViewContent::Watched(vec![entry("a"), entry("b"), entry("c")]),
            revealed: 0,
        };
        app.on_tick();
        app.on_tick();
        match &app.state {
            ViewState::Loaded { revealed, .. } => assert_eq!(*revealed, 2),
            _ => unreachable!(),
        }
        for _ in 0..10 {
            app.on_tick();
        }
        match &app.state {
            ViewState::Loaded { revealed, .. } => assert_eq!(*revealed, 3),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_failed_renders_exact_error_text() {
        let mut app = app_with(StubSource::new());
        app.state = ViewState::Failed;
        let screen = draw(&app);
        assert!(screen.contains("Error loading movies."));
    }

    #[test]
    fn test_watched_rows_render_in_input_order() {
        let mut app = app_with(StubSource::new());
        let entries = vec![entry("Dune (2021)"), entry("Arrival (2016)")];
        app.state = ViewState::Loaded {
            content: ViewContent::Watched(entries),
            revealed: 2,
        };
        let screen = draw(&app);
        let first = screen.find("Dune (2021)").unwrap();
        let second = screen.find("Arrival (2016)").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_watched_shows_no_data_message() {
        let mut app = app_with(StubSource::new());
        app.state = ViewState::Loaded {
            content: ViewContent::Watched(Vec::new()),
            revealed: 0,
        };
        let screen = draw(&app);
        assert!(screen.contains("No watched movies to display."));
    }

    #[test]
    fn test_empty_recommendations_show_no_data_card() {
        let mut app = app_with(StubSource::new());
        app.state = ViewState::Loaded {
            content: ViewContent::Recommendations(Vec::new()),
            revealed: 0,
        };
        let screen = draw(&app);
        assert!(screen.contains("Not Enough Data"));
    }

    #[test]
    fn test_revealed_cards_appear_on_screen() {
        let mut app = app_with(StubSource::new());
        app.state = ViewState::Loaded {
            content: ViewContent::Recommendations(vec![movie("Dune"), movie("Heat")]),
            revealed: 1,
        };
        let screen = draw(&app);
        assert!(screen.contains("Dune"));
        assert!(!screen.contains("Heat"));
    }

    #[tokio::test]
    async fn test_month_popup_selection_redispatches() {
        let mut app = app_with(StubSource::new());
        app.on_key(key(KeyCode::Char('m')));
        assert!(app.popup.is_some());

        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Enter));
        assert!(app.popup.is_none());
        assert_eq!(app.month, Some(1));
        assert!(matches!(
            app.state,
            ViewState::Loading {
                kind: LoadKind::Watched
            }
        ));
    }

    #[test]
    fn test_popup_escape_keeps_month() {
        let mut app = app_with(StubSource::new());
        app.month = Some(4);
        app.on_key(key(KeyCode::Char('m')));
        app.on_key(key(KeyCode::Esc));
        assert!(app.popup.is_none());
        assert_eq!(app.month, Some(4));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with(StubSource::new());
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = app_with(StubSource::new());
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_month_scope_label() {
        let mut app = app_with(StubSource::new());
        assert_eq!(app.month_scope(), "All months");
        app.month = Some(13);
        assert_eq!(app.month_scope(), "January 2026");
    }
}
