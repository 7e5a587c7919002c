//! Layout rendering (top bar, sidebar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, BrowseEntry, UiState, LANGUAGES};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(22), // Language filter
        ])
        .split(area);

    let search_focused = ui_state.active_section == ActiveSection::Search;
    let search_text = if ui_state.search_query.is_empty() {
        "Type to search movies..."
    } else {
        &ui_state.search_query
    };

    let search = Paragraph::new(search_text)
        .style(if search_focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(if search_focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, chunks[0]);

    let language_label = LANGUAGES
        .get(ui_state.language_selected)
        .map(|(_, label)| *label)
        .unwrap_or("Any language");
    let language = Paragraph::new(language_label)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Language (L) "));
    frame.render_widget(language, chunks[1]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Categories (5 entries + 2 border lines)
            Constraint::Min(0),    // Key hints
        ])
        .split(area);

    let focused = ui_state.active_section == ActiveSection::Categories;

    let entries: Vec<ListItem> = BrowseEntry::ALL
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == ui_state.browse_selected && focused {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if i == ui_state.browse_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(entry.label()).style(style)
        })
        .collect();

    let categories = List::new(entries).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Browse ")
            .padding(Padding::horizontal(1))
            .border_style(if focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(categories, chunks[0]);

    let hints = Paragraph::new(
        "Enter  open listing\n\
         P      prefetch pages\n\
         /      search\n\
         L      language\n\
         S      sort (All Movies)\n\
         H      help",
    )
    .style(Style::default().fg(Color::DarkGray))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(hints, chunks[1]);
}
