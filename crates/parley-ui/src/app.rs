//! Main application state and TUI event loop for Parley.
//!
//! [`App`] owns the theme, the current route, the last received profile and
//! chat snapshots, and the dashboard's carousel/modal state. Key handling is
//! split out into pure methods that return [`UiCommand`]s so the route logic
//! is testable without a terminal.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;

use parley_core::carousel::Carousel;
use parley_core::catalog::Catalog;
use parley_core::gating::{self, LockReason, ScenarioGate};
use parley_core::models::Profile;
use parley_net::auth::{AuthClient, AuthSession};
use parley_runtime::orchestrator::{ChatSnapshot, RuntimeUpdate, UiCommand};

use crate::chat_view::{self, ChatViewData};
use crate::dashboard_view::{self, DashboardViewData};
use crate::signin_view::{self, SigninStage, SigninViewData};
use crate::themes::Theme;

// ── Route ─────────────────────────────────────────────────────────────────────

/// Which screen the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Stats and scenario carousel.
    Dashboard,
    /// An active conversation.
    Conversation,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the Parley TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current route.
    pub route: Route,
    /// Signed-in email shown in the header.
    pub email: String,
    /// Connection state label shown in the header.
    pub connection: String,
    /// Most recent profile snapshot, `None` until the first one arrives.
    pub profile: Option<Profile>,
    /// Carousel position over the scenario catalog.
    pub carousel: Carousel,
    /// Open upgrade modal, if any.
    pub modal: Option<LockReason>,
    /// Transient notice shown in the footer.
    pub notice: Option<String>,
    /// Scenario id of the conversation being viewed.
    pub scenario_id: Option<String>,
    /// Most recent chat snapshot for the conversation view.
    pub chat: Option<ChatSnapshot>,
    /// Contents of the chat input line.
    pub input: String,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application for a signed-in user.
    pub fn new(theme_name: &str, email: String) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            route: Route::Dashboard,
            email,
            connection: "connecting…".to_string(),
            profile: None,
            carousel: Carousel::new(Catalog::len()),
            modal: None,
            notice: None,
            scenario_id: None,
            chat: None,
            input: String::new(),
            should_quit: false,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────

    /// Run the main TUI loop, receiving runtime updates from `rx` and
    /// issuing [`UiCommand`]s on `cmd_tx`.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// that the terminal event loop stays on the current thread while
    /// runtime updates arrive on the async channel via `try_recv`.
    ///
    /// The loop exits on `q` (dashboard) or `Ctrl+C`.
    pub async fn run(
        mut self,
        mut rx: mpsc::Receiver<RuntimeUpdate>,
        cmd_tx: mpsc::Sender<UiCommand>,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(command) = self.handle_key(key) {
                        if cmd_tx.try_send(command).is_err() {
                            tracing::warn!("runtime command queue full; key dropped");
                        }
                    }
                }
            }

            // Drain any pending runtime updates (non-blocking).
            loop {
                match rx.try_recv() {
                    Ok(update) => self.update_from_runtime(update),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Update ingestion ──────────────────────────────────────────────────

    /// Fold one runtime update into the application state.
    pub fn update_from_runtime(&mut self, update: RuntimeUpdate) {
        match update {
            RuntimeUpdate::Connected => {
                self.connection = "connected".to_string();
            }
            RuntimeUpdate::ConnectionLost { reason } => {
                self.connection = "reconnecting".to_string();
                self.notice = Some(format!("Connection lost: {reason}"));
                // The session died with the transport; fall back home.
                if self.route == Route::Conversation {
                    self.leave_conversation();
                }
            }
            RuntimeUpdate::Profile(profile) => {
                self.profile = Some(profile);
            }
            RuntimeUpdate::Chat(snapshot) => {
                self.chat = Some(snapshot);
            }
            RuntimeUpdate::LimitReached => {
                self.leave_conversation();
                self.modal = Some(LockReason::DailyLimit);
            }
            RuntimeUpdate::Notice(message) => {
                self.notice = Some(message);
            }
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────

    /// Handle one key event, returning a command for the runtime if the key
    /// produced one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UiCommand> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.route {
            Route::Dashboard => self.handle_dashboard_key(key),
            Route::Conversation => self.handle_conversation_key(key),
        }
    }

    /// Dashboard keys: carousel movement, scenario selection, modal
    /// dismissal, quit.
    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Option<UiCommand> {
        // Any key dismisses an open modal and does nothing else.
        if self.modal.is_some() {
            self.modal = None;
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.carousel.prev();
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.carousel.next();
                None
            }
            KeyCode::Enter => self.select_active_scenario(),
            _ => None,
        }
    }

    /// Conversation keys: input editing, submit, leave.
    fn handle_conversation_key(&mut self, key: KeyEvent) -> Option<UiCommand> {
        match key.code {
            KeyCode::Esc => {
                self.leave_conversation();
                Some(UiCommand::LeaveConversation)
            }
            KeyCode::Enter => {
                let text = self.input.trim().to_string();
                if text.is_empty() {
                    return None;
                }
                self.input.clear();
                Some(UiCommand::SendMessage { text })
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    /// Evaluate the gate for the active scenario: navigate when open, open
    /// the upgrade modal when locked.
    fn select_active_scenario(&mut self) -> Option<UiCommand> {
        let profile = self.profile.as_ref()?;
        let scenario = Catalog::all().get(self.carousel.active())?;

        match gating::evaluate(profile, scenario) {
            ScenarioGate::Open => {
                self.route = Route::Conversation;
                self.scenario_id = Some(scenario.id.to_string());
                self.chat = None;
                self.input.clear();
                self.notice = None;
                Some(UiCommand::StartConversation {
                    scenario_id: scenario.id.to_string(),
                })
            }
            ScenarioGate::Locked(reason) => {
                self.modal = Some(reason);
                None
            }
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Return to the dashboard, dropping conversation state.
    fn leave_conversation(&mut self) {
        self.route = Route::Dashboard;
        self.scenario_id = None;
        self.chat = None;
        self.input.clear();
    }

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        match self.route {
            Route::Dashboard => {
                let data = DashboardViewData {
                    email: self.email.clone(),
                    connection: self.connection.clone(),
                    profile: self.profile.clone(),
                    active_index: self.carousel.active(),
                    modal: self.modal,
                    notice: self.notice.clone(),
                };
                dashboard_view::render_dashboard(frame, area, &data, &self.theme);
            }
            Route::Conversation => {
                let scenario_title = self
                    .scenario_id
                    .as_deref()
                    .map(|id| id.replace('-', " "))
                    .unwrap_or_default();
                let (transcript, typing) = match &self.chat {
                    Some(snapshot) => (snapshot.transcript.clone(), snapshot.typing),
                    None => (Vec::new(), false),
                };
                let data = ChatViewData {
                    scenario_title,
                    transcript,
                    typing,
                    input: self.input.clone(),
                    notice: self.notice.clone(),
                };
                chat_view::render_chat(frame, area, &data, &self.theme);
            }
        }
    }
}

// ── Sign-in loop ──────────────────────────────────────────────────────────────

/// Run the sign-in form until a session is obtained or the user quits.
///
/// Identity requests are awaited in place; the form draws a busy line first
/// so the wait is visible.
pub async fn run_signin(auth: &AuthClient, theme: &Theme) -> io::Result<Option<AuthSession>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut form = SigninViewData::new();
    let tick_rate = Duration::from_millis(250);

    let result = loop {
        terminal.draw(|frame| {
            signin_view::render_signin(frame, frame.area(), &form, theme);
        })?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                break Ok(None);
            }
            KeyCode::Esc => break Ok(None),
            KeyCode::Enter => match form.stage {
                SigninStage::EnterEmail => {
                    let email = form.email.trim().to_string();
                    if email.is_empty() {
                        continue;
                    }
                    form.busy = true;
                    form.error = None;
                    terminal.draw(|frame| {
                        signin_view::render_signin(frame, frame.area(), &form, theme);
                    })?;

                    match auth.request_magic_link(&email).await {
                        Ok(()) => form.stage = SigninStage::EnterCode,
                        Err(e) => form.error = Some(e.to_string()),
                    }
                    form.busy = false;
                }
                SigninStage::EnterCode => {
                    let email = form.email.trim().to_string();
                    let code = form.code.trim().to_string();
                    if code.is_empty() {
                        continue;
                    }
                    form.busy = true;
                    form.error = None;
                    terminal.draw(|frame| {
                        signin_view::render_signin(frame, frame.area(), &form, theme);
                    })?;

                    match auth.redeem_code(&email, &code).await {
                        Ok(session) => break Ok(Some(session)),
                        Err(e) => {
                            form.error = Some(e.to_string());
                            form.busy = false;
                        }
                    }
                }
            },
            KeyCode::Backspace => {
                form.active_field_mut().pop();
            }
            KeyCode::Char(c) => {
                form.active_field_mut().push(c);
            }
            _ => {}
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────
