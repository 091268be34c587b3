//! Catalog browser main loop.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use mediatrack_api::tmdb::{CatalogApi, Category, MediaSummary, trailer_embed_url};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::controller::Controller;
use crate::state::{BrowserState, InputMode, ListingSource};
use crate::ui;

/// Idle wait between input polls; spawned fetches run during it.
const TICK: Duration = Duration::from_millis(50);

/// Runs the catalog browser until the user quits.
///
/// Fetches the first page and the country list, then hands control to the
/// event loop.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A>(mut controller: Controller<A>) -> Result<()>
where
    A: CatalogApi + Send + Sync + 'static,
{
    controller.refresh();
    controller.load_countries();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut browser = BrowserState::default();
    let result = run_event_loop(&mut terminal, &mut controller, &mut browser).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller<A>,
    browser: &mut BrowserState,
) -> Result<()>
where
    A: CatalogApi + Send + Sync + 'static,
{
    loop {
        controller.poll_completions();
        browser.sync_selection(controller.state().items.len());

        terminal
            .draw(|frame| ui::draw(frame, controller.state(), browser))
            .context("failed to draw TUI")?;

        if event::poll(Duration::ZERO).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")?
                && key.kind == KeyEventKind::Press
            {
                let exit = match browser.input_mode {
                    InputMode::Search => {
                        handle_search_input(controller, browser, key.code);
                        false
                    }
                    InputMode::Normal => {
                        handle_normal_input(controller, browser, key.code, key.modifiers)
                    }
                };
                if exit {
                    return Ok(());
                }
            }
        } else {
            tokio::time::sleep(TICK).await;
        }
    }
}

/// Handles key input while typing a search.
fn handle_search_input<A>(controller: &mut Controller<A>, browser: &mut BrowserState, key: KeyCode)
where
    A: CatalogApi + Send + Sync + 'static,
{
    match key {
        KeyCode::Esc => {
            browser.search_input.clear();
            browser.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            browser.input_mode = InputMode::Normal;
            controller.submit_search(std::mem::take(&mut browser.search_input));
            browser.reset_cursor();
        }
        KeyCode::Backspace => {
            browser.search_input.pop();
        }
        KeyCode::Char(c) => {
            browser.search_input.push(c);
        }
        _ => {}
    }
}

/// Handles key input in normal mode. Returns `true` to exit.
fn handle_normal_input<A>(
    controller: &mut Controller<A>,
    browser: &mut BrowserState,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> bool
where
    A: CatalogApi + Send + Sync + 'static,
{
    let detail_mode = controller.state().is_detail_mode();
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc | KeyCode::Char('b') if detail_mode => controller.go_back(),
        KeyCode::Char('t') if detail_mode => open_trailer(controller),
        KeyCode::Char('r') => controller.retry(),
        _ if detail_mode => {}
        KeyCode::Up | KeyCode::Char('k') => browser.move_up(),
        KeyCode::Down | KeyCode::Char('j') => {
            browser.move_down(controller.state().items.len());
        }
        KeyCode::Right | KeyCode::Char('n') => {
            if controller.state().has_next_page() {
                controller.next_page();
                browser.reset_cursor();
            }
        }
        KeyCode::Left | KeyCode::Char('p') => {
            if controller.state().has_prev_page() {
                controller.prev_page();
                browser.reset_cursor();
            }
        }
        KeyCode::Enter => {
            let id = controller
                .state()
                .items
                .get(browser.cursor())
                .map(MediaSummary::id);
            if let Some(id) = id {
                controller.select_item(id);
            }
        }
        KeyCode::Char('m') => {
            let kind = controller.state().media_kind.toggled();
            controller.change_media_kind(kind);
            browser.reset_cursor();
        }
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
            if let Some(category) = idx
                .and_then(|d| d.checked_sub(1))
                .and_then(|i| Category::ALL.get(i))
            {
                controller.change_category(*category);
                browser.reset_cursor();
            }
        }
        KeyCode::Char('/') => {
            browser.search_input = match &controller.state().source {
                ListingSource::Search { query } => query.clone(),
                ListingSource::Category => String::new(),
            };
            browser.input_mode = InputMode::Search;
        }
        KeyCode::Char(c @ ('c' | 'C')) => {
            let code = controller.state().cycle_country(c == 'c');
            controller.select_country(code);
            controller.refresh();
        }
        _ => {}
    }
    false
}

/// Opens the trailer of the open detail in the system browser.
fn open_trailer<A>(controller: &Controller<A>)
where
    A: CatalogApi + Send + Sync + 'static,
{
    let Some(video) = controller
        .state()
        .selected_detail
        .as_ref()
        .and_then(|detail| detail.trailer())
    else {
        return;
    };
    let url = trailer_embed_url(video);
    if let Err(e) = open::that(&url) {
        tracing::warn!(%url, error = %e, "failed to open trailer");
    }
}
