//! Movie list and status bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, BrowseMode, BrowseState, UiState};
use super::utils::{calculate_num_width, render_scrollable_list, truncate_string};

fn mode_title(mode: &BrowseMode) -> String {
    match mode {
        BrowseMode::Category(category) => format!(" {} ", category.label()),
        BrowseMode::AllMovies { sort_by } => format!(" All Movies by {} ", sort_by.label()),
        BrowseMode::Search { query } => format!(" Search: {query} "),
    }
}

pub fn render_movie_list(frame: &mut Frame, area: Rect, browse: &BrowseState, ui_state: &UiState) {
    let is_focused = ui_state.active_section == ActiveSection::MovieList;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(mode_title(&browse.mode))
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    if browse.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if browse.items.is_empty() {
        let text = match &browse.mode {
            BrowseMode::Search { query } => format!("No results for \"{query}\""),
            _ => "Select a listing in the sidebar or press / to search".to_string(),
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let num_width = calculate_num_width(browse.items.len());
    // " {num}  {title}  {year}  {rating}"
    let fixed = num_width + 2 + 2 + 6 + 2 + 5;
    let title_width = content_width.saturating_sub(fixed).max(10);

    let items: Vec<ListItem> = browse
        .items
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            let selected = i == ui_state.list_selected;
            let year = movie
                .release_year()
                .map(|y| y.to_string())
                .unwrap_or_else(|| "----".to_string());

            let line = Line::from(vec![
                Span::styled(
                    format!("{:>num_width$}", i + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
                Span::styled(
                    truncate_string(&movie.title, title_width),
                    if selected {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ),
                Span::raw("  "),
                Span::styled(format!("{year:>6}"), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                Span::styled(
                    format!("★ {:.1}", movie.vote_average),
                    Style::default().fg(Color::Yellow),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    render_scrollable_list(frame, area, items, ui_state.list_selected, block);
}

pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    browse: &BrowseState,
    selected_genres: &[String],
) {
    let mut spans = vec![Span::styled(
        format!(
            "Page {}/{} · {} results",
            browse.current_page, browse.total_pages, browse.total_results
        ),
        Style::default().fg(Color::Cyan),
    )];

    if browse.has_more() {
        spans.push(Span::styled(
            " · scroll down for more",
            Style::default().fg(Color::DarkGray),
        ));
    }

    if !selected_genres.is_empty() {
        spans.push(Span::styled(
            format!(" · {}", selected_genres.join(", ")),
            Style::default().fg(Color::Magenta),
        ));
    }

    if let Some(ref error) = browse.last_error {
        spans.push(Span::styled(
            format!(" · {error}"),
            Style::default().fg(Color::Red),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(status, area);
}
