//! Home screen: the main menu plus the hidden entries unlocked by typing.

use crate::constants::messages;
use crate::constants::timing::{HOME_STATUS_TTL, UNLOCK_NAV_DELAY};
use crate::secrets::{SecretDetector, SecretHit, TriggerWord};
use crate::types::{ArcadeMode, Effect, Key, Tick, View};

#[derive(Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub description: &'static str,
    pub target: View,
    pub hidden: bool,
}

static BASE_ITEMS: [MenuItem; 3] = [
    MenuItem {
        title: "Contact",
        description: "Send me a message",
        target: View::Contact,
        hidden: false,
    },
    MenuItem {
        title: "About",
        description: "Learn more about this project",
        target: View::About,
        hidden: false,
    },
    MenuItem {
        title: "Exit",
        description: "Disconnect",
        target: View::Exit,
        hidden: false,
    },
];

static HIDDEN_ITEMS: [MenuItem; 2] = [
    MenuItem {
        title: "Arcade",
        description: "play snake + weird stuff",
        target: View::Arcade(ArcadeMode::Menu),
        hidden: true,
    },
    MenuItem {
        title: "???",
        description: "weird logbook, don't judge",
        target: View::SecretsLog,
        hidden: true,
    },
];

/// What the home screen wants after a key.
#[derive(Clone, Debug, PartialEq)]
pub enum HomeAction {
    Stay(Vec<Effect>),
    Open(View),
}

#[derive(Debug, Clone, Default)]
pub struct Home {
    cursor: usize,
    hidden_visible: bool,
    status: Option<&'static str>,
    status_epoch: u64,
    jump: Option<View>,
    jump_epoch: u64,
    detector: SecretDetector,
}

impl Home {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- getters -----
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn hidden_visible(&self) -> bool {
        self.hidden_visible
    }
    pub fn status(&self) -> Option<&'static str> {
        self.status
    }
    pub fn detector(&self) -> &SecretDetector {
        &self.detector
    }

    /// Visible menu, hidden entries appended after the base ones.
    pub fn items(&self) -> impl Iterator<Item = &'static MenuItem> {
        let hidden = if self.hidden_visible { HIDDEN_ITEMS.len() } else { 0 };
        BASE_ITEMS.iter().chain(HIDDEN_ITEMS.iter().take(hidden))
    }

    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    /// Secret detection runs first; a key that completed a trigger does not
    /// also move the cursor.
    pub fn handle_key(&mut self, key: Key) -> HomeAction {
        if let Some(hit) = self.detector.observe(key) {
            return self.on_secret(hit);
        }

        match key {
            Key::Up | Key::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            Key::Down | Key::Char('j') => {
                if self.cursor + 1 < self.item_count() {
                    self.cursor += 1;
                }
            }
            Key::Enter | Key::Char(' ') => {
                if let Some(item) = self.items().nth(self.cursor) {
                    return HomeAction::Open(item.target);
                }
            }
            _ => {}
        }
        HomeAction::Stay(Vec::new())
    }

    /// Target of the pending unlock jump if `epoch` still names it.
    pub fn take_jump(&mut self, epoch: u64) -> Option<View> {
        if epoch == self.jump_epoch {
            self.jump.take()
        } else {
            None
        }
    }

    /// Forget a pending unlock jump; its timer lands as a no-op.
    pub fn cancel_jump(&mut self) {
        if self.jump.take().is_some() {
            self.jump_epoch += 1;
        }
    }

    /// Drop the status line if `epoch` belongs to the latest one.
    pub fn clear_status(&mut self, epoch: u64) {
        if epoch == self.status_epoch {
            self.status = None;
        }
    }

    fn on_secret(&mut self, hit: SecretHit) -> HomeAction {
        log::debug!("secret trigger on home: {hit:?}");
        match hit {
            SecretHit::Word(TriggerWord::Snake | TriggerWord::Games) => {
                HomeAction::Stay(self.unlock(View::Arcade(ArcadeMode::Menu)))
            }
            SecretHit::Word(TriggerWord::Matrix) => {
                HomeAction::Stay(self.unlock(View::Arcade(ArcadeMode::Screensaver)))
            }
            SecretHit::Word(TriggerWord::Help) => {
                self.hidden_visible = true;
                HomeAction::Open(View::Help)
            }
            SecretHit::Word(TriggerWord::Konami) | SecretHit::CheatCode => {
                self.hidden_visible = !self.hidden_visible;
                self.cursor = self.cursor.min(self.item_count() - 1);
                let msg = if self.hidden_visible {
                    messages::KONAMI_ON
                } else {
                    messages::KONAMI_OFF
                };
                HomeAction::Stay(vec![self.set_status(msg)])
            }
        }
    }

    /// First unlock schedules a jump to `target`; later ones only confirm.
    fn unlock(&mut self, target: View) -> Vec<Effect> {
        if self.hidden_visible {
            return vec![self.set_status(messages::ALREADY_UNLOCKED)];
        }
        self.hidden_visible = true;
        self.jump_epoch += 1;
        self.jump = Some(target);
        vec![
            self.set_status(messages::ARCADE_UNLOCKED),
            Effect::tick_after(UNLOCK_NAV_DELAY, Tick::UnlockJump { epoch: self.jump_epoch }),
        ]
    }

    fn set_status(&mut self, msg: &'static str) -> Effect {
        self.status_epoch += 1;
        self.status = Some(msg);
        Effect::tick_after(HOME_STATUS_TTL, Tick::HomeStatusClear { epoch: self.status_epoch })
    }
}
