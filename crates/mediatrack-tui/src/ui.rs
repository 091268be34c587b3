//! TUI rendering logic for the catalog browser.

use mediatrack_api::tmdb::{ImageSize, MediaDetail, MediaKind, image_url, trailer_embed_url};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

use crate::state::{BrowserState, InputMode, ListingSource, Status, ViewState};

/// Placeholder for missing values.
const NONE: &str = "--";

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &ViewState, browser: &mut BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // list or detail
            Constraint::Length(4), // footer (status + keys)
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state, browser);

    match &state.selected_detail {
        Some(detail) => draw_detail(frame, chunks[1], detail),
        None => draw_list(frame, chunks[1], state, browser),
    }

    draw_footer(frame, chunks[2], state, browser);
}

/// Draws the header with kind, category, country, and search input.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &ViewState, browser: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let source = match &state.source {
        ListingSource::Category => state.category.label(),
        ListingSource::Search { .. } => "Search",
    };
    let selection = Paragraph::new(format!(
        "{}  |  {source}  |  Country: {}",
        state.media_kind.label(),
        state.country_label()
    ))
    .block(Block::default().borders(Borders::ALL).title(" mediatrack "));
    frame.render_widget(selection, header_chunks[0]);

    let (search_text, search_style) = if browser.input_mode == InputMode::Search {
        (browser.search_input.clone(), Style::default().fg(Color::Yellow))
    } else {
        let query = match &state.source {
            ListingSource::Search { query } => query.clone(),
            ListingSource::Category => String::new(),
        };
        (query, Style::default())
    };
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[1]);
}

/// Draws the result table.
fn draw_list(frame: &mut Frame, area: Rect, state: &ViewState, browser: &mut BrowserState) {
    let date_header = match state.media_kind {
        MediaKind::Movie => "Released",
        MediaKind::Show => "First Aired",
    };
    let header = Row::new(vec!["Title", date_header, "Rating", "Popularity"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = state
        .items
        .iter()
        .map(|item| {
            let core = item.core();
            Row::new(vec![
                core.title.clone(),
                String::from(item.date_field().unwrap_or(NONE)),
                format!("{:.1}", core.vote_average),
                format!("{:.1}", core.popularity),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(30),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(12),
    ];

    let title = format!(
        " {} {} ",
        state.media_kind.label(),
        match &state.source {
            ListingSource::Category => state.category.label(),
            ListingSource::Search { .. } => "Results",
        }
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut browser.table_state);
}

/// Builds the text lines of the detail pane.
pub(crate) fn detail_lines(detail: &MediaDetail) -> Vec<Line<'static>> {
    let core = detail.core();
    let label = Style::default().fg(Color::Yellow);
    let field = |name: &str, value: String| {
        Line::from(vec![Span::styled(format!("{name}: "), label), Span::raw(value)])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            core.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match detail {
        MediaDetail::Movie(movie) => {
            lines.push(field(
                "Released",
                movie
                    .summary
                    .release_date
                    .clone()
                    .unwrap_or_else(|| String::from(NONE)),
            ));
            lines.push(field(
                "Runtime",
                movie
                    .runtime
                    .map_or_else(|| String::from(NONE), |m| format!("{m} min")),
            ));
            let genres = if movie.genres.is_empty() {
                String::from(NONE)
            } else {
                movie.genres.join(", ")
            };
            lines.push(field("Genres", genres));
        }
        MediaDetail::Show(show) => {
            lines.push(field(
                "First aired",
                show.summary
                    .first_air_date
                    .clone()
                    .unwrap_or_else(|| String::from(NONE)),
            ));
            lines.push(field(
                "Status",
                show.summary
                    .status
                    .clone()
                    .unwrap_or_else(|| String::from(NONE)),
            ));
            if let Some(next) = &show.next_episode_to_air {
                lines.push(field(
                    "Next episode",
                    format!(
                        "S{}E{} on {}",
                        next.season_number,
                        next.episode_number,
                        next.air_date.as_deref().unwrap_or(NONE)
                    ),
                ));
            }
        }
    }

    lines.push(field(
        "Rating",
        format!("{:.1} / 10", core.vote_average),
    ));
    lines.push(field("Popularity", format!("{:.1}", core.popularity)));
    lines.push(Line::from(""));
    lines.push(Line::from(core.overview.clone()));
    lines.push(Line::from(""));

    lines.push(field(
        "Trailer",
        detail
            .trailer()
            .map_or_else(|| String::from("none"), trailer_embed_url),
    ));
    if let Some(path) = &core.poster_path {
        lines.push(field("Poster", image_url(ImageSize::Thumbnail, path)));
    }
    let backdrops = detail.assets().backdrop_preview();
    if !backdrops.is_empty() {
        lines.push(Line::from(Span::styled("Backdrops:", label)));
        for image in backdrops {
            lines.push(Line::from(format!(
                "  {}",
                image_url(ImageSize::Thumbnail, &image.file_path)
            )));
        }
    }
    lines
}

/// Draws the detail pane.
fn draw_detail(frame: &mut Frame, area: Rect, detail: &MediaDetail) {
    let paragraph = Paragraph::new(detail_lines(detail))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} Details ", detail.kind().label()))
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(paragraph, area);
}

/// Draws the footer with page counter, status, and key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &ViewState, browser: &BrowserState) {
    let status = match &state.status {
        Status::Idle | Status::Ready => Span::raw(""),
        Status::Loading => Span::styled("Loading...", Style::default().fg(Color::Yellow)),
        Status::Error(message) => Span::styled(message.clone(), Style::default().fg(Color::Red)),
    };
    let page_line = Line::from(vec![
        Span::raw(format!(
            "Page {} of {}  ",
            state.current_page, state.total_pages
        )),
        status,
    ]);

    let help = if browser.input_mode == InputMode::Search {
        "Type to search | Enter: submit | Esc: cancel"
    } else if state.is_detail_mode() {
        "Esc/b: back  t: trailer  r: retry  q: quit"
    } else {
        "\u{2191}\u{2193}: move  Enter: details  \u{2190}\u{2192}/p/n: page  m: movie/tv  1-4: category  /: search  c/C: country  r: retry  q: quit"
    };

    let footer = Paragraph::new(vec![page_line, Line::from(help)])
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use mediatrack_api::tmdb::{Category, EpisodeRef, Video};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::test_support::{movie, movie_detail, show_detail};

    fn render(state: &ViewState, browser: &mut BrowserState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| draw(frame, state, browser)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_list_view_shows_rows_and_page_counter() {
        // Arrange
        let mut state = ViewState::new(MediaKind::Movie, Category::Popular);
        state.items = vec![movie(1, "Stree 2"), movie(2, "Dangal")];
        state.total_pages = 5;
        state.status = Status::Ready;
        let mut browser = BrowserState::default();
        browser.sync_selection(state.items.len());

        // Act
        let screen = render(&state, &mut browser);

        // Assert
        assert!(screen.contains("Stree 2"));
        assert!(screen.contains("Dangal"));
        assert!(screen.contains("Page 1 of 5"));
        assert!(screen.contains("Popular"));
    }

    #[test]
    fn test_error_status_is_rendered() {
        // Arrange
        let mut state = ViewState::new(MediaKind::Show, Category::TopRated);
        state.status = Status::Error(String::from("Failed to fetch TV show items. Please try again."));
        let mut browser = BrowserState::default();

        // Act
        let screen = render(&state, &mut browser);

        // Assert
        assert!(screen.contains("Failed to fetch TV show items"));
    }

    #[test]
    fn test_movie_detail_lines() {
        // Arrange
        let MediaDetail::Movie(mut movie) = movie_detail(1, "Stree 2") else {
            unreachable!();
        };
        movie.assets.videos.push(Video {
            id: String::from("v1"),
            key: String::from("KVnheXywIbY"),
            name: String::from("Official Trailer"),
            site: String::from("YouTube"),
            video_type: String::from("Trailer"),
        });
        let detail = MediaDetail::Movie(movie);

        // Act
        let text = text_of(&detail_lines(&detail));

        // Assert
        assert!(text.contains("Runtime: 147 min"));
        assert!(text.contains("Genres: Comedy, Horror"));
        assert!(text.contains("Trailer: https://www.youtube.com/embed/KVnheXywIbY"));
        assert!(text.contains("Poster: https://image.tmdb.org/t/p/w300/poster1.jpg"));
    }

    #[test]
    fn test_show_detail_lines_with_next_episode() {
        // Arrange
        let MediaDetail::Show(mut show) = show_detail(2, "Panchayat") else {
            unreachable!();
        };
        show.next_episode_to_air = Some(EpisodeRef {
            air_date: Some(String::from("2025-06-24")),
            episode_number: 1,
            season_number: 4,
        });
        let detail = MediaDetail::Show(show);

        // Act
        let text = text_of(&detail_lines(&detail));

        // Assert
        assert!(text.contains("Status: Returning Series"));
        assert!(text.contains("Next episode: S4E1 on 2025-06-24"));
        assert!(text.contains("Trailer: none"));
    }

    #[test]
    fn test_show_detail_without_next_episode_omits_line() {
        // Arrange
        let detail = show_detail(2, "Panchayat");

        // Act
        let text = text_of(&detail_lines(&detail));

        // Assert
        assert!(!text.contains("Next episode"));
    }
}
