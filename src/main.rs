use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use tmdb_rs::config::Config;
use tmdb_rs::controller::AppController;
use tmdb_rs::logging;
use tmdb_rs::model::{AppModel, MovieCategory, TmdbClient};
use tmdb_rs::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== TMDB-RS Movie Browser Starting ===");

    let config = Config::from_env()?;
    let client = TmdbClient::new(config.base_url.clone(), config.api_token.clone())?;

    let mut app_model = AppModel::new();
    app_model.set_api(Arc::new(client));

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    // Load the genre table and the initial listing in the background so the
    // UI comes up immediately with its loading state
    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.load_genres().await;
        controller_for_init
            .fetch_category(MovieCategory::Popular, 1, "", true)
            .await;
    });

    let res = run_app(&mut terminal, model.clone(), controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("TMDB-RS Movie Browser shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Get current state
        let (browse, detail, ui_state, selected_genres, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            let browse = model_guard.get_browse_state().await;
            let ui_state = model_guard.get_ui_state().await;
            let selected_genres = match browse.items.get(ui_state.list_selected) {
                Some(movie) => model_guard.genre_names(&movie.genre_ids).await,
                None => Vec::new(),
            };

            (
                browse,
                model_guard.get_detail_state().await,
                ui_state,
                selected_genres,
                model_guard.should_quit().await,
            )
        };

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &browse, &detail, &ui_state, &selected_genres);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
