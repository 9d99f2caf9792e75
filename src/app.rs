//! Per-connection session: the view router.
//!
//! Every input, timer fire and submission result goes through
//! [`Session::handle`], one event at a time. The session never sleeps or
//! does IO itself; it returns [`Effect`]s for the driver to carry out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arcade::{Arcade, ArcadeStep};
use crate::contact::{ContactForm, FormAction};
use crate::home::{Home, HomeAction};
use crate::secrets_log::{LogAction, SecretsLog, ENTRIES};
use crate::snake::SnakeConfig;
use crate::types::{AppEvent, Effect, Key, Tick, View};

pub struct Session {
    view: View,
    width: u16,  // 0 until the first resize
    height: u16,

    home: Home,
    contact: ContactForm,
    secrets: SecretsLog,
    arcade: Arcade,

    rng: StdRng, // secrets log start entry
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Live session: random start state, snake games seeded from the clock.
    pub fn new() -> Self {
        let mut session = Self::with_seed(rand::random());
        session.arcade = session.arcade.with_clock_reseed();
        session
    }

    /// Session with a deterministic random source.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            view: View::Home,
            width: 0,
            height: 0,
            home: Home::new(),
            contact: ContactForm::new(),
            secrets: SecretsLog::new(),
            arcade: Arcade::new(rng.gen()),
            rng,
        }
    }

    /// Swap the snake preset used by the arcade.
    pub fn with_snake_config(mut self, config: SnakeConfig) -> Self {
        self.arcade = self.arcade.with_snake_config(config);
        self
    }

    // ----- getters -----
    pub fn view(&self) -> View {
        self.view
    }
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
    pub fn home(&self) -> &Home {
        &self.home
    }
    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }
    pub fn secrets_log(&self) -> &SecretsLog {
        &self.secrets
    }
    pub fn arcade(&self) -> &Arcade {
        &self.arcade
    }
    pub fn is_finished(&self) -> bool {
        self.view == View::Exit
    }

    pub fn handle(&mut self, event: AppEvent) -> Vec<Effect> {
        if self.is_finished() {
            return Vec::new();
        }

        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Resize { width, height } => {
                self.width = width;
                self.height = height;
                self.arcade.resize(width, height);
                Vec::new()
            }
            AppEvent::Navigate(view) => self.navigate(view),
            AppEvent::Back => self.navigate(View::Home),
            AppEvent::Tick(tick) => self.on_tick(tick),
            AppEvent::SubmitResult { id, outcome } => {
                if self.view == View::Contact && self.contact.complete(id, outcome) {
                    log::debug!("submission {id} completed");
                } else {
                    log::debug!("dropping stale submission result {id}");
                }
                Vec::new()
            }
            AppEvent::Shutdown => self.navigate(View::Exit),
        }
    }

    fn on_key(&mut self, key: Key) -> Vec<Effect> {
        match self.view {
            View::Home => {
                if matches!(key, Key::Char('q') | Key::Interrupt) {
                    return self.navigate(View::Exit);
                }
                match self.home.handle_key(key) {
                    HomeAction::Stay(effects) => effects,
                    HomeAction::Open(view) => self.navigate(view),
                }
            }
            View::Contact => match self.contact.handle_key(key) {
                FormAction::None => Vec::new(),
                FormAction::Back => self.navigate(View::Home),
                FormAction::Effect(effect) => vec![effect],
            },
            View::About | View::Help => match key {
                Key::Esc | Key::Enter | Key::Char('q') | Key::Interrupt => {
                    self.navigate(View::Home)
                }
                _ => Vec::new(),
            },
            View::SecretsLog => match self.secrets.handle_key(key) {
                LogAction::Stay(effects) => effects,
                LogAction::Back => self.navigate(View::Home),
            },
            View::Arcade(_) => {
                let step = self.arcade.handle_key(key);
                self.after_arcade(step)
            }
            View::Exit => Vec::new(),
        }
    }

    fn on_tick(&mut self, tick: Tick) -> Vec<Effect> {
        match tick {
            Tick::HomeStatusClear { epoch } => {
                self.home.clear_status(epoch);
                Vec::new()
            }
            Tick::UnlockJump { epoch } => {
                if self.view != View::Home {
                    return Vec::new();
                }
                match self.home.take_jump(epoch) {
                    Some(target) => self.navigate(target),
                    None => Vec::new(),
                }
            }
            Tick::SecretsBlink { epoch } => {
                self.secrets.on_blink(epoch);
                Vec::new()
            }
            Tick::Snake { .. } | Tick::Screensaver { .. } | Tick::ArcadeBoot { .. } => {
                if !matches!(self.view, View::Arcade(_)) {
                    return Vec::new();
                }
                let step = self.arcade.handle_tick(tick);
                self.after_arcade(step)
            }
        }
    }

    fn after_arcade(&mut self, step: ArcadeStep) -> Vec<Effect> {
        if step.leave {
            return self.navigate(View::Home);
        }
        self.view = View::Arcade(self.arcade.mode());
        step.effects
    }

    /// Switch views unconditionally and run the target's entry hook.
    fn navigate(&mut self, target: View) -> Vec<Effect> {
        log::debug!("view {} -> {}", self.view.name(), target.name());
        if matches!(self.view, View::Arcade(_)) && !matches!(target, View::Arcade(_)) {
            self.arcade.suspend();
        }
        if self.view == View::Home && target != View::Home {
            self.home.cancel_jump();
        }
        self.view = target;

        match target {
            View::Home | View::About | View::Help => Vec::new(),
            View::Contact => {
                self.contact.reset();
                Vec::new()
            }
            View::SecretsLog => {
                let start = self.rng.gen_range(0..ENTRIES.len());
                vec![self.secrets.enter(start)]
            }
            View::Arcade(mode) => {
                let effects = self.arcade.enter(mode);
                self.view = View::Arcade(self.arcade.mode());
                effects
            }
            View::Exit => vec![Effect::Quit],
        }
    }
}
