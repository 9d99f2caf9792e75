//! TCP listener serving one session per connection over the telnet stream.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal, TerminalOptions, Viewport};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

use crate::api::ContactSubmitter;
use crate::app::Session;
use crate::config::Config;
use crate::constants::ui::{MAX_HEIGHT, MAX_WIDTH};
use crate::driver::{self, ChannelWriter, Driver};
use crate::telnet::{self, InputDecoder, ESC_TIMEOUT};
use crate::snake::SnakePreset;
use crate::theme::ColorScheme;
use crate::types::AppEvent;
use crate::ui;

/// Wait this long for the client's window size before assuming the default.
pub const NAWS_WAIT: Duration = Duration::from_millis(300);

#[derive(Clone)]
struct Shared {
    colors: ColorScheme,
    snake: SnakePreset,
    default_size: (u16, u16),
    submitter: Arc<dyn ContactSubmitter>,
}

pub struct Server {
    listener: TcpListener,
    shared: Shared,
    grace: Duration,
}

impl Server {
    pub async fn bind(config: &Config, submitter: Arc<dyn ContactSubmitter>) -> Result<Self> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        Ok(Self {
            listener,
            shared: Shared {
                colors: config.theme.colors(),
                snake: config.snake,
                default_size: (config.default_cols, config.default_rows),
                submitter,
            },
            grace: config.shutdown_grace,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().context("Failed to read listener address")
    }

    /// Accept connections until `shutdown` resolves, then tell every session
    /// to wrap up and give them the grace period before aborting.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let mut sessions: JoinSet<()> = JoinSet::new();
        let mut next_id = 0u64;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        next_id += 1;
                        let id = next_id;
                        log::info!("[session {id}] connected from {peer}");
                        let shared = self.shared.clone();
                        let stop = stop_rx.clone();
                        sessions.spawn(async move {
                            match handle_connection(id, stream, shared, stop).await {
                                Ok(()) => log::info!("[session {id}] closed"),
                                Err(e) => log::warn!("[session {id}] ended with error: {e:#}"),
                            }
                        });
                    }
                    Err(e) => log::warn!("accept failed: {e}"),
                },
                Some(joined) = sessions.join_next(), if !sessions.is_empty() => {
                    if let Err(e) = joined {
                        log::warn!("session task failed: {e}");
                    }
                }
            }
        }

        drop(self.listener);
        log::info!("shutting down, {} session(s) still connected", sessions.len());
        let _ = stop_tx.send(true);

        let drain = async {
            while sessions.join_next().await.is_some() {}
        };
        if tokio::time::timeout(self.grace, drain).await.is_err() {
            log::warn!("grace period over, aborting {} session(s)", sessions.len());
            sessions.abort_all();
            while sessions.join_next().await.is_some() {}
        }
        log::info!("shutdown complete");
        Ok(())
    }
}

async fn handle_connection(
    id: u64,
    stream: TcpStream,
    shared: Shared,
    mut stop: watch::Receiver<bool>,
) -> Result<()> {
    stream.set_nodelay(true).context("Failed to set TCP_NODELAY")?;
    let (mut reader, mut writer) = stream.into_split();

    // Single writer task owns the socket's write half.
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let writer_task = tokio::spawn(async move {
        while let Some(bytes) = out_rx.recv().await {
            if writer.write_all(&bytes).await.is_err() {
                break;
            }
        }
        let _ = writer.shutdown().await;
    });

    let mut screen = ChannelWriter::new(out_tx.clone());
    out_tx
        .send(telnet::negotiation().to_vec())
        .context("Connection writer closed")?;
    execute!(screen, EnterAlternateScreen, Hide).context("Failed to prepare client screen")?;

    let backend = CrosstermBackend::new(ChannelWriter::new(out_tx.clone()));
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions { viewport: Viewport::Fixed(Rect::default()) },
    )
    .context("Failed to create terminal")?;

    let session = Session::new().with_snake_config(shared.snake.config());
    let (mut driver, mut rx) = Driver::new(id, session, shared.submitter.clone());
    let sized = Arc::new(AtomicBool::new(false));
    let mut helpers = JoinSet::new();

    // Input: socket bytes -> events.
    let events = driver.sender();
    let got_size = Arc::clone(&sized);
    helpers.spawn(async move {
        let mut decoder = InputDecoder::new();
        let mut buf = [0u8; 1024];
        loop {
            let read = if decoder.pending_escape() {
                match tokio::time::timeout(ESC_TIMEOUT, reader.read(&mut buf)).await {
                    Ok(read) => read,
                    Err(_) => {
                        for ev in decoder.flush_pending() {
                            let _ = events.send(ev);
                        }
                        continue;
                    }
                }
            } else {
                reader.read(&mut buf).await
            };
            let n = match read {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            for mut ev in decoder.feed(&buf[..n]) {
                if let AppEvent::Resize { width, height } = ev {
                    log::debug!("[session {id}] window {width}x{height}");
                    got_size.store(true, Ordering::Relaxed);
                    ev = AppEvent::Resize {
                        width: width.min(MAX_WIDTH),
                        height: height.min(MAX_HEIGHT),
                    };
                }
                if events.send(ev).is_err() {
                    return;
                }
            }
        }
        log::debug!("[session {id}] client hung up");
        let _ = events.send(AppEvent::Shutdown);
    });

    // Fallback geometry for clients that never send NAWS.
    let events = driver.sender();
    let (cols, rows) = shared.default_size;
    helpers.spawn(async move {
        tokio::time::sleep(NAWS_WAIT).await;
        if !sized.load(Ordering::Relaxed) {
            log::debug!("[session {id}] no window size, assuming {cols}x{rows}");
            let _ = events.send(AppEvent::Resize { width: cols, height: rows });
        }
    });

    // Server shutdown notice.
    let events = driver.sender();
    helpers.spawn(async move {
        if stop.wait_for(|stopping| *stopping).await.is_ok() {
            let _ = events.send(AppEvent::Shutdown);
        }
    });

    let result = driver::run(&mut driver, &mut rx, &mut terminal, &shared.colors).await;

    helpers.abort_all();
    drop(driver);
    drop(terminal);

    // Best effort: the client may already be gone.
    let _ = execute!(screen, Show, LeaveAlternateScreen);
    let _ = std::io::Write::write_all(&mut screen, ui::goodbye_banner().as_bytes());
    let _ = std::io::Write::flush(&mut screen);
    drop(screen);
    drop(out_tx);
    let _ = writer_task.await;

    result
}
