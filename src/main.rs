use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use talkoo_tui::api::TalkooClient;
use talkoo_tui::app;
use talkoo_tui::config::Config;
use talkoo_tui::model;
use talkoo_tui::prefs::PrefsStore;
use talkoo_tui::services::{self, ApiRequest, ApiResponse};

mod handlers;
mod ui;
mod utils;

use ui::icons::{IconMode, IconRenderer, IconTheme};

/// Talkoo translation server client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp dir (talkoo-tui-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (jk, gg/G, ^D/U)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Server address, overrides the config file
    #[arg(long)]
    base_url: Option<String>,
}

/// Poll interval while a reorder slide is running (about 60 fps)
const ANIMATION_POLL: Duration = Duration::from_millis(16);
/// Poll interval when idle
const IDLE_POLL: Duration = Duration::from_millis(250);

struct App {
    model: model::Model,
    view: ui::ViewState,

    api_tx: UnboundedSender<ApiRequest>,
    api_rx: UnboundedReceiver<ApiResponse>,

    /// None when the store could not be opened; preferences then live for the session only
    prefs: Option<PrefsStore>,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        let client = TalkooClient::new(config.base_url.clone(), config.request_timeout())
            .context("Failed to build HTTP client")?;

        let prefs = match PrefsStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("Preferences store unavailable: {:#}", e);
                None
            }
        };
        let view_prefs = prefs
            .as_ref()
            .map(|p| p.load_view_preferences())
            .unwrap_or_default();

        let (api_tx, api_rx) = services::spawn_api_service(client);

        let icon_renderer = IconRenderer::new(
            IconMode::from_config(&config.icon_mode),
            IconTheme::default(),
        );

        Ok(Self {
            model: model::Model::new(config.vim_mode, view_prefs),
            view: ui::ViewState::new(icon_renderer, config.base_url.clone()),
            api_tx,
            api_rx,
            prefs,
        })
    }

    /// Hand requests to the background worker
    fn dispatch(&self, requests: Vec<ApiRequest>) {
        for request in requests {
            tracing::debug!("dispatch {:?}", request);
            if self.api_tx.send(request).is_err() {
                tracing::error!("API worker is gone; request dropped");
            }
        }
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        let before = self.model.dict.prefs.clone();
        let requests = handlers::handle_key(&mut self.model, key);
        self.dispatch(requests);
        if self.model.dict.prefs != before {
            self.persist_prefs();
        }
    }

    fn persist_prefs(&self) {
        if let Some(store) = &self.prefs {
            if let Err(e) = store.save_view_preferences(&self.model.dict.prefs) {
                tracing::warn!("Failed to save view preferences: {:#}", e);
            }
        }
    }

    fn handle_api_response(&mut self, response: ApiResponse) {
        let requests = app::handle_response(&mut self.model, response, Instant::now());
        self.dispatch(requests);
    }

    fn poll_interval(&self) -> Duration {
        if self.model.dict.transition.is_some() {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // A missing config file is fine; a broken one is not
    let (mut config, config_path) = Config::load_or_default(args.config.as_deref())?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    let level = if args.debug {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };

    let _log_guard = utils::init_logging(&level)?;
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::info!("Talking to {}", config.base_url);

    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("Exited with error: {:#}", e);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let now = Instant::now();
        terminal.draw(|f| ui::render(f, &mut app.view, &app.model, now))?;

        if app.model.ui.should_quit {
            // An upload may still be waiting on an overwrite answer
            app.model.ui.answer_confirm(false);
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            app.handle_api_response(response);
        }

        let requests = app::tick(&mut app.model, Instant::now());
        app.dispatch(requests);

        if event::poll(app.poll_interval())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Yield so worker tasks on this runtime make progress
        tokio::task::yield_now().await;
    }

    Ok(())
}
