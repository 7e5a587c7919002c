//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Main layout structure (top bar, sidebar)
//! - `content`: Movie list and status bar rendering
//! - `overlays`: Modal overlays (detail, error, help)

mod content;
mod layout;
mod overlays;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{BrowseState, DetailState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        browse: &BrowseState,
        detail: &DetailState,
        ui_state: &UiState,
        selected_genres: &[String],
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + language
                Constraint::Min(0),    // Main content (sidebar + list)
                Constraint::Length(3), // Status bar with pagination info
            ])
            .split(frame.area());

        // Top bar: Search + Language
        layout::render_top_bar(frame, chunks[0], ui_state);

        // Middle: Sidebar (Categories + Filters) and Movie list
        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30), // Sidebar
                Constraint::Percentage(70), // Movie list
            ])
            .split(chunks[1]);

        layout::render_sidebar(frame, main_chunks[0], ui_state);
        content::render_movie_list(frame, main_chunks[1], browse, ui_state);

        // Bottom: pagination cursors and selection info
        content::render_status_bar(frame, chunks[2], browse, selected_genres);

        // Detail overlay (if open)
        if ui_state.show_detail {
            overlays::render_detail_overlay(frame, detail);
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
