mod dashboard;
mod expenses;

use std::{
    fs::File,
    io::Write,
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};

use api_types::{expense::Expense, settings::AppSettings};
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use listing::{
    Completion, ExpenseBackend, FetchOutcome, FetchRequest, PageSize, export, fetch,
    preferences::{UiPreferences, ViewMode},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    local_state::LocalState,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use dashboard::{DashboardState, RECENT_ROWS};
pub use expenses::{ExpensesMode, ExpensesState, FormField, FormState};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Expenses,
}

impl Section {
    pub const ALL: [Section; 2] = [Self::Dashboard, Self::Expenses];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Expenses => "Expenses",
        }
    }

    /// Key under which the tab is persisted.
    pub fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Expenses => "expenses",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    shown_at: Instant,
}

/// Fetch results, tagged with the view they belong to.
#[derive(Debug)]
pub enum FetchMsg {
    Dashboard(FetchOutcome),
    Expenses(FetchOutcome),
    Headline(dashboard::HeadlineOutcome),
}

#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    pub open_tabs: Vec<Section>,
    pub dashboard: DashboardState,
    pub expenses: ExpensesState,
    pub settings: AppSettings,
    pub prefs: UiPreferences,
    pub toast: Option<ToastState>,
    pub base_url: String,
    pub today: NaiveDate,
}

impl AppState {
    fn new(config: &AppConfig, prefs: UiPreferences, today: NaiveDate) -> Self {
        let mut open_tabs: Vec<Section> = prefs
            .open_tabs
            .iter()
            .filter_map(|id| Section::from_id(id))
            .collect();
        if open_tabs.is_empty() {
            open_tabs = Section::ALL.to_vec();
        }
        let section = prefs
            .active_tab
            .as_deref()
            .and_then(Section::from_id)
            .filter(|section| open_tabs.contains(section))
            .unwrap_or(open_tabs[0]);

        Self {
            section,
            open_tabs,
            dashboard: DashboardState::new(today),
            expenses: ExpensesState::new(PageSize::from_raw(Some(config.page_size))),
            settings: AppSettings {
                sound_effect: prefs.sound_effect,
                ..AppSettings::default()
            },
            prefs,
            toast: None,
            base_url: config.base_url.clone(),
            today,
        }
    }

    /// Switches to `section`, reopening its tab if it was closed.
    pub fn open_section(&mut self, section: Section) {
        if !self.open_tabs.contains(&section) {
            self.open_tabs.push(section);
        }
        self.section = section;
    }

    /// Closes the active tab unless it is the last one.
    pub fn close_section(&mut self) -> bool {
        if self.open_tabs.len() <= 1 {
            return false;
        }
        self.open_tabs.retain(|section| *section != self.section);
        self.section = self.open_tabs[0];
        true
    }

    fn sync_prefs(&mut self) {
        self.prefs.open_tabs = self
            .open_tabs
            .iter()
            .map(|section| section.id().to_string())
            .collect();
        self.prefs.active_tab = Some(self.section.id().to_string());
    }

    pub fn currency_symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Whether the key handler should treat printable keys as text.
    pub fn is_text_entry(&self) -> bool {
        self.section == Section::Expenses && self.expenses.mode.is_text_entry()
    }
}

pub struct App {
    config: AppConfig,
    client: Arc<Client>,
    local_state: LocalState,
    pub state: AppState,
    tx: UnboundedSender<FetchMsg>,
    rx: UnboundedReceiver<FetchMsg>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Arc::new(Client::new(&config.base_url)?);
        let local_state = match LocalState::load(&config.state_path) {
            Ok(local_state) => local_state,
            Err(err) => {
                tracing::warn!("ignoring unreadable state file {}: {err}", config.state_path);
                LocalState::default()
            }
        };
        let prefs = UiPreferences::load(&local_state);
        let state = AppState::new(&config, prefs, today());
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            client,
            local_state,
            state,
            tx,
            rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.load_settings().await;
        let request = self.state.dashboard.controller.begin_fetch();
        self.spawn_fetch(request, FetchMsg::Dashboard);
        self.spawn_headline();
        let request = self.state.expenses.controller.begin_fetch();
        self.spawn_fetch(request, FetchMsg::Expenses);

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        self.save_preferences();
        tracing::info!("shopdesk_tui stopped");
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.tick_ms);

        while !self.should_quit {
            self.state.today = today();
            self.drain_fetches();
            self.poll_search();
            self.expire_toast();

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            let timeout = self
                .state
                .expenses
                .controller
                .search_due_in(Instant::now())
                .map_or(tick_rate, |due| due.min(tick_rate));
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key).await?
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn load_settings(&mut self) {
        match self.client.settings().await {
            Ok(settings) => {
                tracing::info!("loaded settings from {}", self.state.base_url);
                self.state.settings = AppSettings {
                    sound_effect: self.state.prefs.sound_effect,
                    ..settings
                };
            }
            Err(err) => tracing::warn!("failed to load settings, using defaults: {err}"),
        }
    }

    fn spawn_fetch(&self, request: FetchRequest, wrap: fn(FetchOutcome) -> FetchMsg) {
        tracing::debug!(
            "fetching page {} (token {})",
            request.page,
            request.token.value()
        );
        fetch::spawn(self.client.clone(), request, self.tx.clone(), wrap);
    }

    fn spawn_expenses(&self, request: Option<FetchRequest>) {
        if let Some(request) = request {
            self.spawn_fetch(request, FetchMsg::Expenses);
        }
    }

    fn spawn_dashboard(&self, request: Option<FetchRequest>) {
        if let Some(request) = request {
            self.spawn_fetch(request, FetchMsg::Dashboard);
        }
    }

    fn spawn_headline(&mut self) {
        let request = self.state.dashboard.begin_headline(self.state.today);
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = dashboard::load_headline(client.as_ref(), request).await;
            if tx.send(FetchMsg::Headline(outcome)).is_err() {
                tracing::debug!("headline finished after the receiver closed");
            }
        });
    }

    /// Refreshes both lists and the headline figures after a write.
    fn refresh_all(&mut self) {
        let request = self.state.expenses.controller.refresh();
        self.spawn_fetch(request, FetchMsg::Expenses);
        let request = self.state.dashboard.controller.refresh();
        self.spawn_fetch(request, FetchMsg::Dashboard);
        self.spawn_headline();
    }

    fn drain_fetches(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            let today = self.state.today;
            match msg {
                FetchMsg::Dashboard(outcome) => {
                    let completion = self.state.dashboard.controller.complete(outcome, today);
                    self.after_completion(completion, FetchMsg::Dashboard);
                }
                FetchMsg::Expenses(outcome) => {
                    let completion = self.state.expenses.controller.complete(outcome, today);
                    self.state.expenses.clamp_selection();
                    self.after_completion(completion, FetchMsg::Expenses);
                }
                FetchMsg::Headline(outcome) => {
                    if let Some(err) = self.state.dashboard.complete_headline(outcome) {
                        tracing::error!("failed to load dashboard figures: {err}");
                        self.show_error(err.user_message());
                    }
                }
            }
        }
    }

    fn after_completion(&mut self, completion: Completion, wrap: fn(FetchOutcome) -> FetchMsg) {
        match completion {
            Completion::Applied | Completion::Discarded => {}
            Completion::Refetch(request) => self.spawn_fetch(request, wrap),
            Completion::Failed(err) => self.show_error(err.user_message()),
        }
    }

    fn poll_search(&mut self) {
        let request = self.state.expenses.controller.poll_search(Instant::now());
        if request.is_some() {
            self.state.expenses.selected = 0;
        }
        self.spawn_expenses(request);
    }

    fn show_toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    fn show_error(&mut self, message: impl Into<String>) {
        if self.state.prefs.sound_effect {
            ring_bell();
        }
        self.show_toast(message, ToastLevel::Error);
    }

    fn expire_toast(&mut self) {
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| toast.shown_at.elapsed() >= TOAST_TTL)
        {
            self.state.toast = None;
        }
    }

    fn save_preferences(&mut self) {
        self.state.sync_prefs();
        self.state.prefs.save(&mut self.local_state);
        if let Err(err) = self.local_state.save(&self.config.state_path) {
            tracing::error!("failed to save preferences: {err}");
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = map_key(key, self.state.is_text_entry());
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        if !self.state.is_text_entry()
            && self.state.expenses.mode != ExpensesMode::ConfirmDelete
            && let AppAction::Input(ch) = action
            && self.handle_global_key(ch).await
        {
            return Ok(());
        }

        match self.state.section {
            Section::Dashboard => self.handle_dashboard_key(action),
            Section::Expenses => self.handle_expenses_key(action).await,
        }
        Ok(())
    }

    /// Shortcuts available outside text entry. Returns whether `ch` was used.
    async fn handle_global_key(&mut self, ch: char) -> bool {
        match ch {
            '1' => self.state.open_section(Section::Dashboard),
            '2' => self.state.open_section(Section::Expenses),
            'w' => {
                if !self.state.close_section() {
                    self.show_toast("The last tab cannot be closed.", ToastLevel::Info);
                }
            }
            'v' => {
                self.state.prefs.view_mode = self.state.prefs.view_mode.toggled();
                let label = match self.state.prefs.view_mode {
                    ViewMode::Table => "Table view",
                    ViewMode::Compact => "Compact view",
                };
                self.show_toast(label, ToastLevel::Info);
            }
            'm' => self.toggle_sound().await,
            _ => return false,
        }
        self.save_preferences();
        true
    }

    async fn toggle_sound(&mut self) {
        let enabled = !self.state.prefs.sound_effect;
        self.state.prefs.sound_effect = enabled;
        self.state.settings.sound_effect = enabled;

        match self
            .client
            .update_settings(self.state.settings.clone())
            .await
        {
            Ok(()) => {
                let label = if enabled { "Sound on" } else { "Sound off" };
                self.show_toast(label, ToastLevel::Info);
            }
            Err(err) => {
                tracing::error!("failed to update settings: {err}");
                self.show_error(err.user_message());
            }
        }
    }

    fn handle_dashboard_key(&mut self, action: AppAction) {
        let today = self.state.today;
        let request = match action {
            AppAction::Input('[') | AppAction::Left => {
                let preset = self.state.dashboard.preset.prev();
                self.state.dashboard.set_preset(preset, today)
            }
            AppAction::Input(']') | AppAction::Right => {
                let preset = self.state.dashboard.preset.next();
                self.state.dashboard.set_preset(preset, today)
            }
            AppAction::Input('r') => Some(self.state.dashboard.controller.refresh()),
            _ => None,
        };
        if request.is_some() {
            self.spawn_headline();
        }
        self.spawn_dashboard(request);
    }

    async fn handle_expenses_key(&mut self, action: AppAction) {
        match self.state.expenses.mode {
            ExpensesMode::List => self.handle_list_key(action).await,
            ExpensesMode::Search => self.handle_search_key(action),
            ExpensesMode::Category => self.handle_category_key(action),
            ExpensesMode::Form => self.handle_form_key(action).await,
            ExpensesMode::ConfirmDelete => self.handle_confirm_delete_key(action).await,
        }
    }

    async fn handle_list_key(&mut self, action: AppAction) {
        let today = self.state.today;
        let expenses = &mut self.state.expenses;
        let request = match action {
            AppAction::Up | AppAction::Input('k') => {
                expenses.select_prev();
                None
            }
            AppAction::Down | AppAction::Input('j') => {
                expenses.select_next();
                None
            }
            AppAction::Left | AppAction::Input('p') => expenses.controller.prev_page(),
            AppAction::Right | AppAction::Input('n') => expenses.controller.next_page(),
            AppAction::Input('g') => expenses.controller.set_page(1),
            AppAction::Input('G') => {
                let last = i64::from(expenses.controller.total_pages().max(1));
                expenses.controller.set_page(last)
            }
            AppAction::Input('+') => {
                let size = expenses.controller.query().page_size.next();
                expenses.controller.set_page_size(size)
            }
            AppAction::Input('-') => {
                let size = expenses.controller.query().page_size.prev();
                expenses.controller.set_page_size(size)
            }
            AppAction::Input('/') => {
                expenses.mode = ExpensesMode::Search;
                None
            }
            AppAction::Input('f') => expenses.cycle_search_key(),
            AppAction::Input('c') => {
                expenses.category_input = match &expenses.controller.query().category {
                    listing::CategoryFilter::All => String::new(),
                    listing::CategoryFilter::Only(name) => name.clone(),
                };
                expenses.mode = ExpensesMode::Category;
                None
            }
            AppAction::Input('s') => expenses.cycle_sort_column(),
            AppAction::Input('S') => expenses.toggle_sort_order(),
            AppAction::Input('[') => {
                let preset = expenses.preset.prev();
                expenses.set_preset(preset, today)
            }
            AppAction::Input(']') => {
                let preset = expenses.preset.next();
                expenses.set_preset(preset, today)
            }
            AppAction::Input('x') => expenses.clear_filters(),
            AppAction::Input('r') => Some(expenses.controller.refresh()),
            AppAction::Input('a') => {
                expenses.open_form(FormState::create(today));
                None
            }
            AppAction::Input('e') | AppAction::Submit => {
                if let Some(form) = expenses.selected_expense().map(FormState::edit) {
                    expenses.open_form(form);
                }
                None
            }
            AppAction::Input('d') => {
                if let Some(expense) = expenses.selected_expense().cloned() {
                    expenses.pending_delete = Some(expense);
                    expenses.mode = ExpensesMode::ConfirmDelete;
                }
                None
            }
            AppAction::Input('E') => {
                self.export_csv().await;
                None
            }
            _ => None,
        };

        if request.is_some() {
            self.state.expenses.selected = 0;
        }
        self.spawn_expenses(request);
    }

    fn handle_search_key(&mut self, action: AppAction) {
        let expenses = &mut self.state.expenses;
        let mut input = expenses.controller.search_input().to_string();
        match action {
            AppAction::Input(ch) => input.push(ch),
            AppAction::Backspace => {
                input.pop();
            }
            AppAction::Submit | AppAction::Cancel => {
                expenses.mode = ExpensesMode::List;
                return;
            }
            _ => return,
        }
        expenses.controller.set_search_input(input, Instant::now());
    }

    fn handle_category_key(&mut self, action: AppAction) {
        let expenses = &mut self.state.expenses;
        match action {
            AppAction::Input(ch) => expenses.category_input.push(ch),
            AppAction::Backspace => {
                expenses.category_input.pop();
            }
            AppAction::Cancel => expenses.mode = ExpensesMode::List,
            AppAction::Submit => {
                expenses.mode = ExpensesMode::List;
                let request = expenses.controller.set_category(&expenses.category_input);
                if request.is_some() {
                    expenses.selected = 0;
                }
                self.spawn_expenses(request);
            }
            _ => {}
        }
    }

    async fn handle_form_key(&mut self, action: AppAction) {
        let Some(form) = self.state.expenses.form.as_mut() else {
            self.state.expenses.mode = ExpensesMode::List;
            return;
        };
        match action {
            AppAction::Input(ch) => form.push(ch),
            AppAction::Backspace => form.pop(),
            AppAction::NextField | AppAction::Down => form.focus = form.focus.next(),
            AppAction::PrevField | AppAction::Up => form.focus = form.focus.prev(),
            AppAction::Cancel => self.state.expenses.close_form(),
            AppAction::Submit => self.submit_form().await,
            _ => {}
        }
    }

    async fn submit_form(&mut self) {
        let Some(form) = self.state.expenses.form.as_mut() else {
            return;
        };
        let input = match form.draft.validate() {
            Ok(input) => input,
            Err(errors) => {
                if let Some(field) = FormField::ALL
                    .into_iter()
                    .find(|field| field.error(&errors).is_some())
                {
                    form.focus = field;
                }
                form.errors = errors;
                return;
            }
        };

        let editing = form.editing;
        let result = match editing {
            Some(id) => self.client.update(id, input).await,
            None => self.client.create(input).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                let message = if editing.is_some() {
                    "Expense updated."
                } else {
                    "Expense added."
                };
                self.state.expenses.close_form();
                self.show_toast(message, ToastLevel::Success);
                self.refresh_all();
            }
            Err(err) => {
                tracing::error!("failed to save expense: {err}");
                self.show_error(err.user_message());
            }
        }
    }

    async fn handle_confirm_delete_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input('y') | AppAction::Submit => {
                self.state.expenses.mode = ExpensesMode::List;
                if let Some(expense) = self.state.expenses.pending_delete.take() {
                    self.delete_expense(expense).await;
                }
            }
            AppAction::Input('n') | AppAction::Cancel => {
                self.state.expenses.pending_delete = None;
                self.state.expenses.mode = ExpensesMode::List;
            }
            _ => {}
        }
    }

    async fn delete_expense(&mut self, expense: Expense) {
        self.state.expenses.controller.remove_local(expense.id);
        self.state.expenses.clamp_selection();

        match self.client.delete(expense.id).await {
            Ok(()) => {
                tracing::info!("deleted expense {}", expense.id);
                self.show_toast(format!("Deleted \"{}\".", expense.title), ToastLevel::Success);
            }
            Err(err) => {
                tracing::error!("failed to delete expense {}: {err}", expense.id);
                self.show_error(err.user_message());
            }
        }
        self.refresh_all();
    }

    /// Writes every row matching the current filters, ignoring paging.
    async fn export_csv(&mut self) {
        let query = self.state.expenses.controller.query().to_summary_request();
        let rows = match self.client.list(query).await {
            Ok(page) => page.expenses,
            Err(err) => {
                tracing::error!("failed to load expenses for export: {err}");
                self.show_error(err.user_message());
                return;
            }
        };

        let path =
            Path::new(&self.config.export_dir).join(export::export_file_name(self.state.today));
        match write_export(&path, &rows) {
            Ok(()) => {
                tracing::info!("exported {} expenses to {}", rows.len(), path.display());
                self.show_toast(
                    format!("Exported {} expenses to {}", rows.len(), path.display()),
                    ToastLevel::Success,
                );
            }
            Err(err) => {
                tracing::error!("failed to export expenses: {err}");
                self.show_error(format!("Export failed: {err}"));
            }
        }
    }
}

fn write_export(path: &Path, rows: &[Expense]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    export::write_csv(rows, file)?;
    Ok(())
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    if let Err(err) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
        tracing::debug!("failed to ring the bell: {err}");
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
