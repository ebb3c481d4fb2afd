use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::tui::app::{ActivePane, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    if app.maximized {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Detail pane (full height)
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        render_detail_pane(frame, app, chunks[0], colors);
        render_status_bar(frame, app, chunks[1], colors);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(50), // Movies pane
                Constraint::Min(10),        // Detail pane
                Constraint::Length(1),      // Status bar
            ])
            .split(frame.area());

        render_movies_pane(frame, app, chunks[0], colors);
        render_detail_pane(frame, app, chunks[1], colors);
        render_status_bar(frame, app, chunks[2], colors);
    }
}

fn border_style(app: &TuiApp, pane: ActivePane, colors: &ColorConfig) -> Style {
    if app.active_pane == pane {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_movies_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Movies;

    let items: Vec<ListItem> = app
        .movies()
        .iter()
        .map(|movie| {
            let content = format!(
                "{} {:>8}  {}",
                movie.favorite_marker(),
                movie.display_price(),
                movie.display_title()
            );

            let style = if movie.is_favorite {
                Style::default()
                    .fg(colors.favorite_item)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.movie_item)
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let title = format!(
        " \"{}\" ({}) [{}/{}] ",
        app.state.term,
        app.movies().len(),
        (app.movie_index + 1).min(app.movies().len()),
        app.movies().len()
    );

    let highlight_style = if is_active {
        Style::default()
            .bg(colors.selection_bg_active)
            .fg(colors.selection_fg_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(colors.selection_bg_inactive)
            .fg(colors.selection_fg_inactive)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app, ActivePane::Movies, colors));

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.movie_list_state);
}

fn render_detail_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let (title, content) = if let Some(movie) = app.selected_movie() {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} {}", movie.favorite_marker(), movie.display_title()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Genre: {}", movie.genre),
                Style::default().fg(colors.metadata_genre),
            )),
            Line::from(Span::styled(
                format!("Price: {}", movie.display_price()),
                Style::default().fg(colors.metadata_price),
            )),
        ];
        if !movie.artwork_url.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Artwork: {}", movie.artwork_url),
                Style::default().fg(colors.metadata_link),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("─".repeat(area.width.saturating_sub(2) as usize)));
        lines.push(Line::from(""));
        lines.extend(movie.description.lines().map(|l| Line::from(l.to_string())));

        (format!(" {} ", movie.display_title()), Text::from(lines))
    } else if app.state.is_loading {
        (" Details ".to_string(), Text::from("Loading movie details..."))
    } else {
        (" Details ".to_string(), Text::from("No movie selected"))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app, ActivePane::Detail, colors));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let mut style = Style::default().fg(colors.status_fg).bg(colors.status_bg);

    let status = if let Some(ref input) = app.search_input {
        format!("Search: {}_", input)
    } else if app.state.is_loading {
        format!("Searching \"{}\"...", app.state.term)
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if let Some(ref err) = app.state.store_error {
        style = style.fg(colors.error_fg);
        format!("Favorites unavailable: {}", err)
    } else if let Some(ref err) = app.state.remote_error {
        style = style.fg(colors.error_fg);
        format!("Catalog unavailable: {}", err)
    } else {
        format!(
            "Last visited: {}  /:Search  f:Favorite  o:Artwork  R:Refresh  m:Max  q:Quit",
            app.state.last_visited
        )
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}
