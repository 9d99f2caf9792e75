// Local binary: a single pcterm session on the current terminal.

use std::{fs::File, io, io::Write, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use pcterm::{
    api::ApiClient,
    app::Session,
    config::{load, Config},
    driver::{self, Driver},
    types::{AppEvent, Key},
    ui,
};

/// Stdout belongs to the UI, so logs go to a file.
fn init_logging(cfg: &Config) -> Result<()> {
    let file = File::create(&cfg.log_file)
        .with_context(|| format!("Failed to open log file {}", cfg.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();

    let cfg = load().context("Failed to load configuration")?;
    init_logging(&cfg)?;
    cfg.print_summary();

    let client = ApiClient::new(&cfg.api_url, cfg.submit_timeout)
        .context("Failed to build contact API client")?;
    let colors = cfg.theme.colors();

    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let session = Session::new().with_snake_config(cfg.snake.config());
    let (mut driver, mut rx) = Driver::new(0, session, Arc::new(client));
    let (cols, rows) = crossterm::terminal::size().unwrap_or((cfg.default_cols, cfg.default_rows));
    let _ = driver.sender().send(AppEvent::Resize { width: cols, height: rows });

    // crossterm input is blocking; poll so the thread notices when the session ends
    let events = driver.sender();
    let input = tokio::task::spawn_blocking(move || -> io::Result<()> {
        while !events.is_closed() {
            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            let ev = match event::read()? {
                Event::Key(k) if matches!(k.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    Key::from_crossterm(k).map(AppEvent::Key)
                }
                Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
                _ => None,
            };
            if let Some(ev) = ev {
                if events.send(ev).is_err() {
                    break;
                }
            }
        }
        Ok(())
    });

    let result = driver::run(&mut driver, &mut rx, &mut terminal, &colors).await;

    // closing the queue stops the input thread
    drop(driver);
    drop(rx);
    if let Ok(Err(e)) = input.await {
        log::warn!("input thread failed: {e}");
    }

    // cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)?;
    print!("{}", ui::goodbye_banner());
    io::stdout().flush()?;

    result
}
