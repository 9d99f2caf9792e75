//! Session driver: owns one [`Session`] and its event queue, and carries out
//! the effects the session asks for.
//!
//! Timers are one-shot tasks that push their event back into the queue;
//! submissions run on the [`ContactSubmitter`] and come back the same way.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;

use crate::api::ContactSubmitter;
use crate::app::Session;
use crate::theme::ColorScheme;
use crate::types::{AppEvent, Effect};
use crate::ui;

pub struct Driver {
    id: u64,
    session: Session,
    tx: UnboundedSender<AppEvent>,
    submitter: Arc<dyn ContactSubmitter>,
    tasks: JoinSet<()>, // timers + submissions, aborted on drop
}

impl Driver {
    pub fn new(
        id: u64,
        session: Session,
        submitter: Arc<dyn ContactSubmitter>,
    ) -> (Self, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = unbounded_channel();
        let driver = Self {
            id,
            session,
            tx,
            submitter,
            tasks: JoinSet::new(),
        };
        (driver, rx)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sender for the transport's input and resize events.
    pub fn sender(&self) -> UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    /// Number of timers and submissions still running.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Handle one event and run its effects. Returns false once the session
    /// asked to quit.
    pub fn dispatch(&mut self, event: AppEvent) -> bool {
        while self.tasks.try_join_next().is_some() {}

        let before = self.session.view();
        let effects = self.session.handle(event);
        if self.session.view() != before {
            log::debug!("[session {}] now on {}", self.id, self.session.view().name());
        }

        let mut running = true;
        for effect in effects {
            match effect {
                Effect::Schedule { after, event } => {
                    let tx = self.tx.clone();
                    self.tasks.spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = tx.send(event);
                    });
                }
                Effect::Submit { id, request } => {
                    log::info!("[session {}] submitting contact form (#{id})", self.id);
                    let tx = self.tx.clone();
                    let submitter = Arc::clone(&self.submitter);
                    self.tasks.spawn(async move {
                        let outcome = submitter.submit(request).await;
                        let _ = tx.send(AppEvent::SubmitResult { id, outcome });
                    });
                }
                Effect::Quit => running = false,
            }
        }
        running
    }
}

/// Drive the session until it quits or every sender is gone, redrawing
/// after each event.
pub async fn run<B: Backend>(
    driver: &mut Driver,
    rx: &mut UnboundedReceiver<AppEvent>,
    terminal: &mut Terminal<B>,
    colors: &ColorScheme,
) -> Result<()> {
    terminal
        .draw(|f| ui::draw(f, driver.session(), colors))
        .context("Failed to draw initial frame")?;

    while let Some(event) = rx.recv().await {
        if let AppEvent::Resize { width, height } = event {
            terminal
                .resize(Rect::new(0, 0, width, height))
                .context("Failed to resize viewport")?;
        }
        let running = driver.dispatch(event);
        terminal
            .draw(|f| ui::draw(f, driver.session(), colors))
            .context("Failed to draw frame")?;
        if !running {
            break;
        }
    }
    Ok(())
}

/// `Write` sink that hands each flushed frame to a channel.
pub struct ChannelWriter {
    buf: Vec<u8>,
    tx: UnboundedSender<Vec<u8>>,
}

impl ChannelWriter {
    pub fn new(tx: UnboundedSender<Vec<u8>>) -> Self {
        Self { buf: Vec::with_capacity(4096), tx }
    }
}

impl io::Write for ChannelWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let frame = std::mem::replace(&mut self.buf, Vec::with_capacity(4096));
        self.tx
            .send(frame)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "connection writer closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_channel_writer_sends_on_flush_only() {
        let (tx, mut rx) = unbounded_channel();
        let mut w = ChannelWriter::new(tx);
        w.write_all(b"abc").unwrap();
        w.write_all(b"def").unwrap();
        assert!(rx.try_recv().is_err());
        w.flush().unwrap();
        assert_eq!(rx.try_recv().unwrap(), b"abcdef".to_vec());
        w.flush().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_writer_reports_closed_peer() {
        let (tx, rx) = unbounded_channel();
        drop(rx);
        let mut w = ChannelWriter::new(tx);
        w.write_all(b"x").unwrap();
        assert_eq!(w.flush().unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    }
}
