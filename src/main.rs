mod api;
mod config;
mod models;
mod stats;
mod tui;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use api::ApiClient;
use config::Config;
use tui::App;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--init") {
        let path = Config::generate_default()?;
        println!("Generated config file at: {}", path.display());
        println!("Edit it with your problem-data API URL, then run codetrack-tui.");
        return Ok(());
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("codetrack-tui — a terminal dashboard for your coding-practice history");
        println!();
        println!("USAGE:");
        println!("  codetrack-tui           Start the dashboard");
        println!("  codetrack-tui --init    Generate a default config file");
        println!();
        println!("CONFIG:");
        println!("  File: ~/.config/codetrack-tui/config.toml");
        println!("  Or set the CODETRACK_API_URL env var.");
        println!();
        println!("KEYBINDINGS:");
        println!("  h/l or Left/Right  Select previous / next day");
        println!("  k/j or Up/Down     Select day one week back / forward");
        println!("  p / n              Previous / next month");
        println!("  t                  Jump to today");
        println!("  7                  Show last 7 days");
        println!("  q / Ctrl+C         Quit");
        return Ok(());
    }

    init_tracing();

    let config = Config::load().with_context(|| {
        "Failed to load configuration.\n\
         Run `codetrack-tui --init` to generate a config file,\n\
         or set the CODETRACK_API_URL environment variable."
    })?;

    let client = ApiClient::new(&config.api_url)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, client, config.strict_difficulties).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: ApiClient,
    strict_difficulties: bool,
) -> Result<()> {
    let mut app = App::new(client, strict_difficulties);

    // The single network access of the app's lifetime; everything after is
    // key-driven re-rendering over the loaded collection.
    app.start_fetch();

    loop {
        app.frame_count = app.frame_count.wrapping_add(1);
        terminal.draw(|f| tui::ui::render(f, &app))?;

        if let Some(event) = tui::event::poll_event(Duration::from_millis(100))? {
            if let Event::Key(KeyEvent {
                code, modifiers, ..
            }) = event
            {
                tui::event::handle_key(&mut app, code, modifiers);
            }
        }

        if !app.running {
            break;
        }

        app.poll_fetch_result();
    }

    Ok(())
}

/// The terminal belongs to the TUI, so diagnostics go to a log file.
/// Failures to set the file up are ignored; the app just runs unlogged.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let Some(dir) = dirs::cache_dir().map(|d| d.join("codetrack-tui")) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("codetrack-tui.log")) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
