//! Overlay rendering (movie detail, error notification, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{DetailState, UiState};
use super::utils::format_money;

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

pub fn render_detail_overlay(frame: &mut Frame, detail: &DetailState) {
    let area = frame.area();
    let popup_area = centered_rect(area, 72, 20);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Movie (Esc to close) ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black));

    if detail.is_loading_detail {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(loading, popup_area);
        return;
    }

    if let Some(ref error) = detail.detail_error {
        let message = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(message, popup_area);
        return;
    }

    let Some(ref movie) = detail.detail else {
        let empty = Paragraph::new("No movie selected")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, popup_area);
        return;
    };

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        movie.title.clone(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ))];

    if let Some(ref tagline) = movie.tagline {
        if !tagline.is_empty() {
            lines.push(Line::from(Span::styled(
                tagline.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
    }
    lines.push(Line::default());

    let mut facts = vec![format!("★ {:.1} ({} votes)", movie.vote_average, movie.vote_count)];
    if !movie.release_date.is_empty() {
        facts.push(movie.release_date.clone());
    }
    if let Some(runtime) = movie.runtime {
        facts.push(format!("{}h {:02}m", runtime / 60, runtime % 60));
    }
    lines.push(Line::from(Span::styled(
        facts.join("  ·  "),
        Style::default().fg(Color::Yellow),
    )));

    if !movie.genres.is_empty() {
        let names: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        lines.push(Line::from(Span::styled(
            names.join(", "),
            Style::default().fg(Color::Magenta),
        )));
    }

    if movie.budget > 0 || movie.revenue > 0 {
        lines.push(Line::from(Span::styled(
            format!(
                "Budget {}  ·  Revenue {}",
                format_money(movie.budget),
                format_money(movie.revenue)
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::raw(movie.overview.clone())));
    lines.push(Line::default());

    if let Some(director) = movie.director() {
        lines.push(Line::from(vec![
            Span::styled("Director: ", Style::default().fg(Color::Cyan)),
            Span::raw(director.name.clone()),
        ]));
    }

    if !movie.credits.cast.is_empty() {
        let cast: Vec<String> = movie
            .credits
            .cast
            .iter()
            .take(6)
            .map(|member| match &member.character {
                Some(character) if !character.is_empty() => {
                    format!("{} ({})", member.name, character)
                }
                _ => member.name.clone(),
            })
            .collect();
        lines.push(Line::from(vec![
            Span::styled("Cast: ", Style::default().fg(Color::Cyan)),
            Span::raw(cast.join(", ")),
        ]));
    }

    let details = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(details, popup_area);
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4) as usize;

        let error_line_count =
            ((error_msg.chars().count() as f32) / (inner_width as f32)).ceil() as u16;
        let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));

        let popup_area = Rect {
            x: area.width.saturating_sub(popup_width) / 2,
            y: area.height.saturating_sub(popup_height) / 2,
            width: popup_width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Open listing / movie details"),
        ("Esc", "Close overlay / back"),
        ("/", "Focus search"),
        ("", ""),
        ("", "── Listings ──"),
        ("L", "Cycle language filter"),
        ("S", "Cycle sort (All Movies)"),
        ("P", "Prefetch several pages"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 58;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered_rect(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
