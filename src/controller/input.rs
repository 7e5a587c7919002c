//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, BrowseEntry, BrowseMode, SortOption};
use super::AppController;

/// Pages requested by the bulk prefetch key
const BULK_PREFETCH_PAGES: u32 = 5;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle detail overlay
        if model.is_detail_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter => {
                    model.hide_detail().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        let ui_state = model.get_ui_state().await;

        // Handle search input when in search section
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        model.cycle_section_backward().await;
                    } else {
                        model.cycle_section_forward().await;
                    }
                    return Ok(());
                }
                KeyCode::Enter => {
                    let query = ui_state.search_query.clone();
                    model.set_active_section(ActiveSection::MovieList).await;
                    drop(model);
                    self.search(&query, 1, true).await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    // clearing the query also reverts to the previous listing
                    model.update_search_query(String::new()).await;
                    drop(model);
                    self.search("", 1, true).await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    // Q still quits even in search mode when Ctrl is pressed
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        model.set_should_quit(true).await;
                        return Ok(());
                    }
                    model.append_to_search(c).await;
                    return Ok(());
                }
                _ => {}
            }
            return Ok(());
        }

        // Handle Categories section navigation
        if ui_state.active_section == ActiveSection::Categories {
            match key.code {
                KeyCode::Up => {
                    model.browse_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.browse_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    let entry = model.selected_browse_entry().await;
                    let language = model.selected_language().await;
                    model.set_active_section(ActiveSection::MovieList).await;
                    drop(model);
                    match entry {
                        BrowseEntry::Category(category) => {
                            self.fetch_category(category, 1, language, true).await;
                        }
                        BrowseEntry::AllMovies => {
                            self.fetch_all(1, language, SortOption::default(), true).await;
                        }
                    }
                    return Ok(());
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    if let BrowseEntry::Category(category) = model.selected_browse_entry().await {
                        let language = model.selected_language().await;
                        model.set_active_section(ActiveSection::MovieList).await;
                        drop(model);
                        self.fetch_bulk(category, BULK_PREFETCH_PAGES, language).await;
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        // Handle MovieList section navigation
        if ui_state.active_section == ActiveSection::MovieList {
            match key.code {
                KeyCode::Up => {
                    model.list_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.list_move_down().await;
                    // Near the end of the list: request the next page in the
                    // background so scrolling never blocks on the network
                    if model.should_load_more().await {
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.load_next_page().await;
                        });
                    }
                    return Ok(());
                }
                KeyCode::Enter => {
                    let selected = model.get_selected_movie().await;
                    if let Some(movie) = selected {
                        model.show_detail().await;
                        drop(model);
                        self.fetch_detail(movie.id).await;
                    }
                    return Ok(());
                }
                KeyCode::Esc => {
                    model.set_active_section(ActiveSection::Categories).await;
                    return Ok(());
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    // cycle the sort order of the discover listing
                    let state = model.get_browse_state().await;
                    if let BrowseMode::AllMovies { sort_by } = state.mode {
                        let language = model.selected_language().await;
                        drop(model);
                        self.fetch_all(1, language, sort_by.next(), true).await;
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keys
        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::Char('/') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                // cycle the language filter and reload the active listing
                let language = model.cycle_language().await;
                let state = model.get_browse_state().await;
                drop(model);
                match state.mode {
                    BrowseMode::Category(category) => {
                        self.fetch_category(category, 1, language, true).await;
                    }
                    BrowseMode::AllMovies { sort_by } => {
                        self.fetch_all(1, language, sort_by, true).await;
                    }
                    BrowseMode::Search { query } => {
                        self.search(&query, 1, true).await;
                    }
                }
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            _ => {}
        }

        Ok(())
    }
}
