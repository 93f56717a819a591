use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::io::fetcher::SuggestionFetcher;
use crate::io::http::{GalleryClient, Rotation};
use crate::io::store::ScratchStore;
use crate::model::{Category, ClientConfig, LookupScope, PhotoDetails};
use crate::ops::controls::{ButtonRow, Control};
use crate::ops::forms::{AdminForm, GradeForm, LocateForm, Submission, TagForm};
use crate::ops::map::MapView;
use crate::ops::search::SearchForm;

use super::input;
use super::jobs::{JobResult, Jobs, rotate_alert, submit_alert};
use super::lookup;
use super::render;
use super::theme::Theme;

/// Where keys go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Button row of the detail view
    Navigate,
    /// An admin form is open
    Form,
    /// The global search form has focus
    Search,
}

/// The open admin form and, for tag-like forms, its own lookup channel
pub struct OpenForm {
    pub form: AdminForm,
    pub fetcher: Option<SuggestionFetcher>,
}

/// Main application state
pub struct App {
    pub config: ClientConfig,
    pub theme: Theme,
    pub jobs: Jobs,
    pub store: ScratchStore,
    /// Photo being administered; `None` runs the search form only
    pub imgid: Option<u32>,
    pub details: Option<PhotoDetails>,
    pub map: Option<MapView>,
    pub buttons: ButtonRow,
    pub form: Option<OpenForm>,
    pub search: SearchForm,
    pub search_fetcher: SuggestionFetcher,
    pub mode: Mode,
    pub show_help: bool,
    /// A request whose outcome decides what is shown next is running
    pub busy: bool,
    /// Blocking message; any key dismisses it
    pub alert: Option<String>,
    /// Non-blocking status line text
    pub status: Option<String>,
    /// Map takes the whole content area
    pub zoom: bool,
    pub should_quit: bool,
    /// Input box of the focused widget, set during render. Suggestions are
    /// drawn directly below it.
    pub suggestion_anchor: Option<Rect>,
}

impl App {
    pub fn new(
        config: ClientConfig,
        client: GalleryClient,
        runtime: tokio::runtime::Handle,
        store: ScratchStore,
        imgid: Option<u32>,
    ) -> Self {
        let theme = Theme::from_config(&config.ui);
        let search_fetcher = SuggestionFetcher::new(
            client.clone(),
            runtime.clone(),
            LookupScope::Global,
            Duration::from_millis(config.lookup.timeout_ms),
        );
        let mut search = SearchForm::new(config.lookup.min_len_search);
        let mode = if imgid.is_some() {
            Mode::Navigate
        } else {
            search.show();
            Mode::Search
        };
        App {
            theme,
            jobs: Jobs::new(client, runtime),
            store,
            imgid,
            details: None,
            map: None,
            buttons: ButtonRow::new(),
            form: None,
            search,
            search_fetcher,
            mode,
            show_help: false,
            busy: false,
            alert: None,
            status: None,
            zoom: false,
            should_quit: false,
            suggestion_anchor: None,
            config,
        }
    }

    /// Install freshly scraped details; the map is rebuilt from them.
    pub fn set_details(&mut self, details: PhotoDetails) {
        self.map = MapView::for_details(&details);
        self.details = Some(details);
    }

    /// Ask for the detail page again (the terminal stand-in for a reload)
    pub fn reload(&mut self) {
        if let Some(imgid) = self.imgid {
            self.busy = true;
            self.jobs.load_details(imgid);
        }
    }

    pub fn has_admin_row(&self) -> bool {
        self.imgid.is_some()
    }

    /// Run a button: rotate right away, or open its form.
    pub fn activate(&mut self, control: Control) {
        let Some(imgid) = self.imgid else {
            return;
        };
        if self.form.is_some() || self.buttons.is_disabled(control) {
            return;
        }
        if let Some(rotation) = control.rotation() {
            self.start_rotate(imgid, rotation);
            return;
        }
        let form = match control {
            Control::Grade => AdminForm::Grade(GradeForm::new(
                self.details.as_ref().and_then(|d| d.grade),
            )),
            Control::Location => AdminForm::Locate(LocateForm::open(
                self.details.as_ref().and_then(|d| d.position),
                self.store.last_position(),
            )),
            _ => match control.category() {
                Some(category) => AdminForm::Tag(TagForm::new(
                    category,
                    self.config.lookup.min_len_category,
                )),
                None => return,
            },
        };
        let fetcher = match &form {
            AdminForm::Tag(f) => Some(self.tag_fetcher(f.category)),
            _ => None,
        };
        self.buttons.disable(control);
        self.form = Some(OpenForm { form, fetcher });
        self.mode = Mode::Form;
    }

    fn tag_fetcher(&self, category: Category) -> SuggestionFetcher {
        SuggestionFetcher::new(
            self.jobs.client().clone(),
            self.jobs.runtime().clone(),
            LookupScope::Category(category),
            Duration::from_millis(self.config.lookup.timeout_ms),
        )
    }

    fn start_rotate(&mut self, imgid: u32, rotation: Rotation) {
        info!(imgid, angle = rotation.angle(), "rotating");
        self.busy = true;
        self.jobs.rotate(imgid, rotation);
    }

    /// Remove the open form and give the selection back to its trigger.
    pub fn close_form(&mut self) {
        if let Some(mut open) = self.form.take()
            && let AdminForm::Tag(f) = &mut open.form
        {
            f.cancel();
        }
        self.buttons.restore();
        self.mode = Mode::Navigate;
    }

    /// Post the open form. Nothing is sent for an empty tag form.
    pub fn submit_form(&mut self) {
        let Some(imgid) = self.imgid else {
            return;
        };
        let Some(open) = &self.form else {
            return;
        };
        let submission = match &open.form {
            AdminForm::Tag(f) => f.submission(),
            AdminForm::Grade(g) => Some(g.submission()),
            AdminForm::Locate(l) => match l.submit(&mut self.store) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!(error = %e, "could not remember last position");
                    Some(Submission::Locate(l.marker))
                }
            },
        };
        if let Some(submission) = submission {
            self.busy = true;
            self.jobs.submit(imgid, submission);
        }
    }

    pub fn open_search(&mut self) {
        self.search.show();
        self.mode = Mode::Search;
    }

    /// Leave the search form; it stays hidden until opened again.
    pub fn leave_search(&mut self) {
        self.search.hide();
        self.mode = if self.form.is_some() {
            Mode::Form
        } else {
            Mode::Navigate
        };
        if self.imgid.is_none() {
            self.should_quit = true;
        }
    }

    /// Open the server's search page for the current query in the browser.
    pub fn submit_search(&mut self) {
        let url = match self.search.search_url(self.jobs.client().origin()) {
            Ok(url) => url,
            Err(e) => {
                self.alert = Some(format!("Search failed: {e}"));
                return;
            }
        };
        info!(%url, "opening search");
        match open::that(&url) {
            Ok(()) => self.status = Some(format!("Opened {url}")),
            Err(e) => self.alert = Some(format!("Could not open {url}: {e}")),
        }
    }

    /// Apply everything that finished since the last tick.
    pub fn tick(&mut self) {
        for event in lookup::drain(&self.search_fetcher) {
            self.search.dispatch(event);
        }
        if let Some(open) = &mut self.form
            && let (AdminForm::Tag(form), Some(fetcher)) = (&mut open.form, &open.fetcher)
        {
            for event in lookup::drain(fetcher) {
                form.dispatch(event);
            }
        }
        for result in self.jobs.poll() {
            self.apply_job(result);
        }
    }

    pub fn apply_job(&mut self, result: JobResult) {
        match result {
            JobResult::Rotated(Ok(())) => self.reload(),
            JobResult::Rotated(Err(e)) => {
                warn!(error = %e, "rotate failed");
                self.busy = false;
                self.alert = Some(rotate_alert(&e));
            }
            JobResult::Submitted { result: Ok(()), .. } => {
                self.close_form();
                self.reload();
            }
            JobResult::Submitted {
                what,
                result: Err(e),
            } => {
                warn!(what, error = %e, "admin form failed");
                self.busy = false;
                self.alert = Some(submit_alert(what, &e));
            }
            JobResult::Details {
                imgid,
                result: Ok(details),
            } => {
                info!(imgid, "details loaded");
                self.busy = false;
                self.set_details(details);
            }
            JobResult::Details {
                imgid,
                result: Err(e),
            } => {
                warn!(imgid, error = %e, "loading details failed");
                self.busy = false;
                self.alert = Some(format!("Loading image {imgid} failed: {e}"));
            }
        }
    }
}

/// Run the TUI against `client`. With an image id the detail view and
/// admin row are shown; without one only the search form is.
pub fn run(
    config: ClientConfig,
    client: GalleryClient,
    runtime: &tokio::runtime::Runtime,
    store: ScratchStore,
    imgid: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let kitty = config.ui.kitty_keyboard.unwrap_or(true);
    let mut app = App::new(config, client, runtime.handle().clone(), store, imgid);
    app.reload();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    if kitty {
        // Terminals without the protocol ignore the request
        let _ = execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        );
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    if kitty {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
