//! promo-upload - Terminal Promo Code Submission
//!
//! A terminal form for entering a purchase code with its purchase date and
//! time, submitting it to the campaign API and showing whether it won.
//! Unregistered participants are taken through a registration modal first.

use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use promo_upload::application::App;
use promo_upload::domain::CampaignWindow;
use promo_upload::infrastructure::{setup_logger, Config, HttpApiClient, PromoApi, DEFAULT_BASE_URL};
use promo_upload::presentation::{render_ui, InputHandler};

/// How often the loop wakes up to expire toasts when no key is pressed.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Entry point for the promo-upload terminal form.
///
/// Reads the configuration, installs file logging, sets up the terminal
/// and runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log file cannot
/// be created, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let log_path = setup_logger(&config)?;
    tracing::info!(log = %log_path.display(), base_url = DEFAULT_BASE_URL, "starting promo-upload");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let api = HttpApiClient::new(DEFAULT_BASE_URL);
    let mut app = App::new(CampaignWindow::default(), Local::now().naive_local());
    let res = run_app(&mut terminal, &mut app, &api);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal failure");
        println!("{err:?}");
    }

    tracing::info!("promo-upload stopped");
    Ok(())
}

/// Main application event loop.
///
/// Redraws before sending a queued request so the disabled submit button
/// is on screen while the request blocks.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, api: &dyn PromoApi) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        app.refresh_day_options(Local::now().naive_local());
        terminal.draw(|f| render_ui(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if app.has_pending() {
            app.run_pending(api, Local::now().naive_local());
            continue;
        }

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    InputHandler::handle_key_event(app, key.code, key.modifiers, Local::now().naive_local());
                }
            }
        }
    }
}
