//! The "???" logbook: a handful of static entries paged left/right.

use crate::constants::timing::SECRETS_BLINK_DELAY;
use crate::types::{Effect, Key, Tick};

pub struct LogEntry {
    pub title: &'static str,
    pub body: &'static [&'static str],
}

pub static ENTRIES: [LogEntry; 6] = [
    LogEntry {
        title: "terminal onboarding chaos",
        body: &[
            "• lesson #1: people love ascii entrances, so keep them.",
            "• lesson #2: leave tiny bugs in, they look authentic.",
            "• note: yes, snake was written way too late at night.",
        ],
    },
    LogEntry {
        title: "todo? maybe?",
        body: &[
            "- build a terminal ui for the fridge? why not.",
            "- finish that shader at 3am. again.",
            "- find a keyboard that is not this loud.",
        ],
    },
    LogEntry {
        title: "fave commands of the week",
        body: &[
            "`curl wttr.in` // the weather has a vibe",
            "`rg \"ugh\"` // checking where I complained in the code",
            "`ssh` // obvious",
        ],
    },
    LogEntry {
        title: "audio preserves",
        body: &[
            "-> synthwave in the background, otherwise the snake falls asleep",
            "-> sometimes white noise, seriously",
            "-> 3AM playlist: alt-J and the usual total mix",
        ],
    },
    LogEntry {
        title: "pcstyle lore dump",
        body: &[
            "1. the first portfolio was css typed into notepad.",
            "2. then generative art, because why not.",
            "3. now you can ping me over a terminal, wild.",
        ],
    },
    LogEntry {
        title: "easter egg roadmap",
        body: &[
            "[ ] ascii art generator (some glitchy logo).",
            "[x] snake, but in two colours.",
            "[ ] hidden chat bot? maybe.",
        ],
    },
];

/// What the logbook wants after a key.
#[derive(Clone, Debug, PartialEq)]
pub enum LogAction {
    Stay(Vec<Effect>),
    Back,
}

#[derive(Clone, Debug, Default)]
pub struct SecretsLog {
    index: usize,
    flash: Option<&'static str>,
    epoch: u64,
}

impl SecretsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the logbook on entry `start` (wrapped into range).
    pub fn enter(&mut self, start: usize) -> Effect {
        self.index = start % ENTRIES.len();
        self.flash("opening the logbook... one sec")
    }

    // ----- getters -----
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn entry(&self) -> &'static LogEntry {
        &ENTRIES[self.index]
    }
    pub fn flash_text(&self) -> Option<&'static str> {
        self.flash
    }

    pub fn handle_key(&mut self, key: Key) -> LogAction {
        let (step, msg): (isize, &'static str) = match key {
            Key::Left | Key::Char('h') | Key::Char('k') => (-1, "went back one entry • chill"),
            Key::Right | Key::Char('l') | Key::Char('j') | Key::Char(' ') => {
                (1, "next log... don't judge")
            }
            Key::Enter => (1, "skipping, because why not"),
            Key::Esc | Key::Char('q') | Key::Interrupt => return LogAction::Back,
            _ => return LogAction::Stay(Vec::new()),
        };
        let n = ENTRIES.len() as isize;
        self.index = (self.index as isize + step).rem_euclid(n) as usize;
        LogAction::Stay(vec![self.flash(msg)])
    }

    /// Clear the flash if `epoch` belongs to the latest one.
    pub fn on_blink(&mut self, epoch: u64) {
        if epoch == self.epoch {
            self.flash = None;
        }
    }

    fn flash(&mut self, msg: &'static str) -> Effect {
        self.epoch += 1;
        self.flash = Some(msg);
        Effect::tick_after(SECRETS_BLINK_DELAY, Tick::SecretsBlink { epoch: self.epoch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_wraps_both_ways() {
        let mut log = SecretsLog::new();
        log.enter(0);
        log.handle_key(Key::Left);
        assert_eq!(log.index(), ENTRIES.len() - 1);
        log.handle_key(Key::Char('l'));
        assert_eq!(log.index(), 0);
        log.handle_key(Key::Enter);
        assert_eq!(log.index(), 1);
    }

    #[test]
    fn test_enter_wraps_start_index() {
        let mut log = SecretsLog::new();
        log.enter(ENTRIES.len() + 2);
        assert_eq!(log.index(), 2);
    }

    #[test]
    fn test_only_latest_blink_clears_flash() {
        let mut log = SecretsLog::new();
        let first = log.enter(0);
        let LogAction::Stay(effects) = log.handle_key(Key::Right) else {
            panic!("expected to stay");
        };
        assert_eq!(effects.len(), 1);
        assert_ne!(first, effects[0]);

        log.on_blink(1);
        assert!(log.flash_text().is_some());
        log.on_blink(2);
        assert_eq!(log.flash_text(), None);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut log = SecretsLog::new();
        assert_eq!(log.handle_key(Key::Esc), LogAction::Back);
        assert_eq!(log.handle_key(Key::Char('q')), LogAction::Back);
    }
}
