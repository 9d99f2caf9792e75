use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::ContactRequest;

/// Transport-neutral key press. Both the telnet decoder and the local
/// crossterm loop translate their input into this.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    /// Ctrl+C
    Interrupt,
    Char(char),
}

impl Key {
    /// Lowercase letter carried by this key, if any.
    pub fn letter(&self) -> Option<char> {
        match self {
            Key::Char(c) if c.is_alphabetic() => c.to_lowercase().next(),
            _ => None,
        }
    }

    pub fn is_char(&self, expected: char) -> bool {
        matches!(self, Key::Char(c) if *c == expected)
    }
}

#[cfg(feature = "native")]
impl Key {
    /// Map a crossterm key event; `None` for keys the session never uses.
    pub fn from_crossterm(ev: crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event::{KeyCode, KeyModifiers};

        if ev.modifiers.contains(KeyModifiers::CONTROL) {
            return match ev.code {
                KeyCode::Char('c') => Some(Key::Interrupt),
                _ => None,
            };
        }
        match ev.code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Esc),
            KeyCode::Tab => Some(Key::Tab),
            KeyCode::BackTab => Some(Key::BackTab),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Char(c) => Some(Key::Char(c)),
            _ => None,
        }
    }
}

/// Sub-screens of the arcade.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArcadeMode {
    Menu,
    Snake,
    Screensaver,
}

/// One logical screen of a session. Exactly one is active at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Contact,
    About,
    SecretsLog,
    Help,
    Arcade(ArcadeMode),
    Exit,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Contact => "contact",
            View::About => "about",
            View::SecretsLog => "secrets-log",
            View::Help => "help",
            View::Arcade(ArcadeMode::Menu) => "arcade",
            View::Arcade(ArcadeMode::Snake) => "arcade/snake",
            View::Arcade(ArcadeMode::Screensaver) => "arcade/screensaver",
            View::Exit => "exit",
        }
    }
}

/// One-shot timer payloads. The epoch identifies the component instance
/// that armed the timer; a mismatching epoch means the timer is stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    Snake { epoch: u64 },
    Screensaver { epoch: u64 },
    ArcadeBoot { epoch: u64 },
    SecretsBlink { epoch: u64 },
    HomeStatusClear { epoch: u64 },
    /// Delayed jump after a first unlock on the home screen.
    UnlockJump { epoch: u64 },
}

/// Result of a contact submission as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub success: bool,
    pub message: String,
}

impl SubmitOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}

/// Everything that can be fed into a session's event queue.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    Key(Key),
    Resize { width: u16, height: u16 },
    Navigate(View),
    Back,
    Tick(Tick),
    SubmitResult { id: u64, outcome: SubmitOutcome },
    /// The client hung up or the server is going down.
    Shutdown,
}

/// Side effects requested by the session; executed by the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Deliver `event` back into the queue once `after` has elapsed.
    Schedule { after: Duration, event: AppEvent },
    /// Hand the request to the submission collaborator.
    Submit { id: u64, request: ContactRequest },
    /// Tear the session down.
    Quit,
}

impl Effect {
    pub fn tick_after(after: Duration, tick: Tick) -> Self {
        Effect::Schedule { after, event: AppEvent::Tick(tick) }
    }
}
