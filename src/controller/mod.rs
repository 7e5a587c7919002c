//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the model and the TMDB client. It is organized
//! into submodules by responsibility:
//!
//! - `browse`: Listing, search, pagination, and detail operations
//! - `input`: Key event handling

mod browse;
mod input;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::model::{AppModel, TmdbError};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    pub(crate) fn format_error(error: &TmdbError) -> String {
        match error {
            TmdbError::Upstream { status: 401, .. } => {
                "Invalid API token. Check TMDB_API_KEY and restart.".to_string()
            }
            TmdbError::Upstream { status: 404, .. } => {
                "The requested resource was not found.".to_string()
            }
            TmdbError::Upstream { status: 429, .. } => {
                "Rate limited. Please wait a moment.".to_string()
            }
            TmdbError::Transport(e) => format!("Network error: {e}"),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_reduce_to_friendly_messages() {
        let err = TmdbError::Upstream {
            status: 429,
            message: "Your request count is over the allowed limit.".to_string(),
        };
        assert_eq!(
            AppController::format_error(&err),
            "Rate limited. Please wait a moment."
        );
    }

    #[test]
    fn unmapped_upstream_errors_keep_status_and_message() {
        let err = TmdbError::Upstream {
            status: 500,
            message: "Internal error".to_string(),
        };
        assert_eq!(
            AppController::format_error(&err),
            "API error 500: Internal error"
        );
    }
}
