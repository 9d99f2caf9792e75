//! Hidden arcade: a two-entry menu hosting the snake game and the rain
//! screensaver.
//!
//! Each running loop (snake ticks, rain frames, boot status) remembers the
//! epoch it was armed with. Restarting, pausing or leaving bumps the epoch,
//! so a timer already in flight lands as a no-op and the loop stops.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::messages;
use crate::constants::timing::{ARCADE_BOOT_DELAY, SCREENSAVER_FRAME, SCREENSAVER_TRIGGERED_FRAMES};
use crate::matrix::MatrixRain;
use crate::snake::{self, Collision, Direction, SnakeConfig, SnakeGame, TickOutcome};
use crate::types::{ArcadeMode, Effect, Key, Tick};

pub struct ArcadeEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub mode: ArcadeMode,
}

pub const MENU: [ArcadeEntry; 2] = [
    ArcadeEntry {
        title: "SNAKE.exe",
        description: "classic borderline laggy snake",
        mode: ArcadeMode::Snake,
    },
    ArcadeEntry {
        title: "CRT DREAM",
        description: "matrix rain, zero interaction",
        mode: ArcadeMode::Screensaver,
    },
];

/// Result of feeding the arcade one event.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcadeStep {
    /// The arcade wants to hand control back to Home.
    pub leave: bool,
    pub effects: Vec<Effect>,
}

impl ArcadeStep {
    fn stay(effects: Vec<Effect>) -> Self {
        Self { leave: false, effects }
    }

    fn leave() -> Self {
        Self { leave: true, effects: Vec::new() }
    }
}

pub struct Arcade {
    mode: ArcadeMode,
    cursor: usize,
    status: &'static str,
    snake: Option<SnakeGame>,
    snake_config: SnakeConfig,
    paused: bool,
    rain: MatrixRain,
    epoch: u64,
    rng: StdRng,
    clock_reseed: bool, // mix the clock into every game seed
}

impl Arcade {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            mode: ArcadeMode::Menu,
            cursor: 0,
            status: messages::ARCADE_BOOTING,
            snake: None,
            snake_config: SnakeConfig::arcade(),
            paused: false,
            rain: MatrixRain::new(rng.gen()),
            epoch: 0,
            rng,
            clock_reseed: false,
        }
    }

    /// Seed every new or restarted game from the clock as well, so runs
    /// never replay the previous food sequence.
    pub fn with_clock_reseed(mut self) -> Self {
        self.clock_reseed = true;
        self
    }

    /// Use a different snake preset for games started from now on.
    pub fn with_snake_config(mut self, config: SnakeConfig) -> Self {
        self.snake_config = config;
        self
    }

    // ----- getters -----
    pub fn mode(&self) -> ArcadeMode {
        self.mode
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn status(&self) -> &'static str {
        self.status
    }
    pub fn snake(&self) -> Option<&SnakeGame> {
        self.snake.as_ref()
    }
    pub fn is_paused(&self) -> bool {
        self.paused
    }
    pub fn rain(&self) -> &MatrixRain {
        &self.rain
    }
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Enter the arcade directly in `mode`.
    pub fn enter(&mut self, mode: ArcadeMode) -> Vec<Effect> {
        match mode {
            ArcadeMode::Menu => self.boot(),
            ArcadeMode::Snake => self.start_snake(),
            ArcadeMode::Screensaver => self.start_rain(Some(SCREENSAVER_TRIGGERED_FRAMES)),
        }
    }

    /// Stop every running loop; used when the session leaves the arcade.
    pub fn suspend(&mut self) {
        self.epoch += 1;
        self.mode = ArcadeMode::Menu;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.rain.resize(width, height);
    }

    pub fn handle_key(&mut self, key: Key) -> ArcadeStep {
        match self.mode {
            ArcadeMode::Menu => self.menu_key(key),
            ArcadeMode::Snake => self.snake_key(key),
            ArcadeMode::Screensaver => match key {
                Key::Esc | Key::Enter => {
                    self.to_menu(messages::SCREENSAVER_OFF);
                    ArcadeStep::stay(Vec::new())
                }
                Key::Char('q') | Key::Interrupt => ArcadeStep::leave(),
                _ => ArcadeStep::stay(Vec::new()),
            },
        }
    }

    pub fn handle_tick(&mut self, tick: Tick) -> ArcadeStep {
        match tick {
            Tick::ArcadeBoot { epoch } if epoch == self.epoch => {
                if self.status == messages::ARCADE_BOOTING {
                    self.status = messages::ARCADE_READY;
                }
                ArcadeStep::stay(Vec::new())
            }
            Tick::Snake { epoch } if epoch == self.epoch && self.mode == ArcadeMode::Snake => {
                ArcadeStep::stay(self.advance_snake())
            }
            Tick::Screensaver { epoch }
                if epoch == self.epoch && self.mode == ArcadeMode::Screensaver =>
            {
                match self.rain.tick() {
                    Some(after) => ArcadeStep::stay(vec![Effect::tick_after(
                        after,
                        Tick::Screensaver { epoch: self.epoch },
                    )]),
                    None => {
                        log::debug!("screensaver run finished");
                        ArcadeStep::leave()
                    }
                }
            }
            _ => ArcadeStep::stay(Vec::new()),
        }
    }

    fn boot(&mut self) -> Vec<Effect> {
        self.epoch += 1;
        self.mode = ArcadeMode::Menu;
        self.status = messages::ARCADE_BOOTING;
        vec![Effect::tick_after(ARCADE_BOOT_DELAY, Tick::ArcadeBoot { epoch: self.epoch })]
    }

    fn to_menu(&mut self, status: &'static str) {
        self.epoch += 1;
        self.mode = ArcadeMode::Menu;
        self.status = status;
    }

    fn menu_key(&mut self, key: Key) -> ArcadeStep {
        let n = MENU.len();
        match key {
            Key::Up | Key::Char('k') => self.cursor = (self.cursor + n - 1) % n,
            Key::Down | Key::Char('j') => self.cursor = (self.cursor + 1) % n,
            Key::Enter | Key::Char(' ') => {
                let effects = match MENU[self.cursor].mode {
                    ArcadeMode::Snake => self.start_snake(),
                    ArcadeMode::Screensaver => self.start_rain(None),
                    ArcadeMode::Menu => Vec::new(),
                };
                return ArcadeStep::stay(effects);
            }
            Key::Esc | Key::Char('q') | Key::Interrupt => return ArcadeStep::leave(),
            _ => {}
        }
        ArcadeStep::stay(Vec::new())
    }

    fn start_snake(&mut self) -> Vec<Effect> {
        self.epoch += 1;
        self.mode = ArcadeMode::Snake;
        self.paused = false;
        self.status = messages::SNAKE_LOADED;
        let game = SnakeGame::with_seed(self.snake_config.clone(), self.next_seed());
        let first = game.interval();
        self.snake = Some(game);
        vec![Effect::tick_after(first, Tick::Snake { epoch: self.epoch })]
    }

    fn start_rain(&mut self, frames: Option<u32>) -> Vec<Effect> {
        self.epoch += 1;
        self.mode = ArcadeMode::Screensaver;
        self.status = messages::SCREENSAVER_ON;
        self.rain.start(frames);
        vec![Effect::tick_after(SCREENSAVER_FRAME, Tick::Screensaver { epoch: self.epoch })]
    }

    fn snake_key(&mut self, key: Key) -> ArcadeStep {
        let Some(game) = self.snake.as_mut() else {
            return ArcadeStep::stay(self.start_snake());
        };

        let dir = match key {
            Key::Esc | Key::Char('q') | Key::Interrupt => {
                self.to_menu(messages::SNAKE_PAUSED);
                return ArcadeStep::stay(Vec::new());
            }
            Key::Char('r') | Key::Char('R') => return ArcadeStep::stay(self.respawn_snake()),
            Key::Char(' ') => return ArcadeStep::stay(self.toggle_pause()),
            Key::Up | Key::Char('w') | Key::Char('k') => Direction::Up,
            Key::Down | Key::Char('s') | Key::Char('j') => Direction::Down,
            Key::Left | Key::Char('a') | Key::Char('h') => Direction::Left,
            Key::Right | Key::Char('d') | Key::Char('l') => Direction::Right,
            _ => return ArcadeStep::stay(Vec::new()),
        };
        if !self.paused {
            game.turn(dir);
        }
        ArcadeStep::stay(Vec::new())
    }

    fn respawn_snake(&mut self) -> Vec<Effect> {
        let seed = self.next_seed();
        let Some(game) = self.snake.as_mut() else {
            return Vec::new();
        };
        game.reset_with_seed(seed);
        self.epoch += 1;
        self.paused = false;
        self.status = messages::SNAKE_RESPAWNED;
        vec![Effect::tick_after(game.interval(), Tick::Snake { epoch: self.epoch })]
    }

    fn next_seed(&mut self) -> u64 {
        let seed = self.rng.gen();
        if self.clock_reseed {
            seed ^ snake::time_seed()
        } else {
            seed
        }
    }

    /// Pausing just drops the tick chain; resuming arms a fresh one.
    fn toggle_pause(&mut self) -> Vec<Effect> {
        let Some(next) = self.snake.as_ref().and_then(SnakeGame::next_tick) else {
            return Vec::new();
        };
        self.epoch += 1;
        self.paused = !self.paused;
        if self.paused {
            self.status = messages::SNAKE_PAUSED;
            Vec::new()
        } else {
            self.status = messages::SNAKE_LOADED;
            vec![Effect::tick_after(next, Tick::Snake { epoch: self.epoch })]
        }
    }

    fn advance_snake(&mut self) -> Vec<Effect> {
        if self.paused {
            return Vec::new();
        }
        let Some(game) = self.snake.as_mut() else {
            return Vec::new();
        };
        match game.tick() {
            TickOutcome::Died(cause) => {
                log::debug!("snake died ({cause:?}) with score {}", game.score());
                self.status = match cause {
                    Collision::BoardFull => "board full... you actually won?",
                    _ => messages::SNAKE_DEAD,
                };
            }
            TickOutcome::Ate { score } => log::trace!("snake ate, score {score}"),
            TickOutcome::Moved | TickOutcome::Idle => {}
        }
        let epoch = self.epoch;
        game.next_tick()
            .map(|after| Effect::tick_after(after, Tick::Snake { epoch }))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snake_tick(arcade: &Arcade) -> Tick {
        Tick::Snake { epoch: arcade.epoch() }
    }

    #[test]
    fn test_boot_status_flips_once() {
        let mut arcade = Arcade::new(1);
        let effects = arcade.enter(ArcadeMode::Menu);
        assert_eq!(arcade.status(), messages::ARCADE_BOOTING);
        assert_eq!(
            effects,
            vec![Effect::tick_after(ARCADE_BOOT_DELAY, Tick::ArcadeBoot { epoch: arcade.epoch() })]
        );
        arcade.handle_tick(Tick::ArcadeBoot { epoch: arcade.epoch() });
        assert_eq!(arcade.status(), messages::ARCADE_READY);
    }

    #[test]
    fn test_menu_cursor_wraps_and_launches_snake() {
        let mut arcade = Arcade::new(1);
        arcade.enter(ArcadeMode::Menu);
        arcade.handle_key(Key::Up);
        assert_eq!(arcade.cursor(), 1);
        arcade.handle_key(Key::Down);
        assert_eq!(arcade.cursor(), 0);

        let step = arcade.handle_key(Key::Enter);
        assert!(!step.leave);
        assert_eq!(arcade.mode(), ArcadeMode::Snake);
        assert_eq!(
            step.effects,
            vec![Effect::tick_after(Duration::from_millis(180), snake_tick(&arcade))]
        );
    }

    #[test]
    fn test_restart_invalidates_old_ticks() {
        let mut arcade = Arcade::new(1);
        arcade.enter(ArcadeMode::Snake);
        let old = snake_tick(&arcade);
        let step = arcade.handle_key(Key::Char('r'));
        assert_eq!(step.effects.len(), 1);
        assert_eq!(arcade.status(), messages::SNAKE_RESPAWNED);

        assert!(arcade.handle_tick(old).effects.is_empty());
        assert_eq!(arcade.handle_tick(snake_tick(&arcade)).effects.len(), 1);
    }

    #[test]
    fn test_pause_stops_chain_and_resume_rearms() {
        let mut arcade = Arcade::new(1);
        arcade.enter(ArcadeMode::Snake);
        let before = snake_tick(&arcade);

        assert!(arcade.handle_key(Key::Char(' ')).effects.is_empty());
        assert!(arcade.is_paused());
        assert!(arcade.handle_tick(before).effects.is_empty());
        let head = arcade.snake().map(|g| g.head());

        let resumed = arcade.handle_key(Key::Char(' '));
        assert!(!arcade.is_paused());
        assert_eq!(resumed.effects.len(), 1);
        assert_eq!(arcade.snake().map(|g| g.head()), head);
    }

    #[test]
    fn test_dead_snake_stops_ticking() {
        let mut arcade = Arcade::new(1);
        arcade.enter(ArcadeMode::Snake);
        let mut ticks = 0;
        loop {
            let step = arcade.handle_tick(snake_tick(&arcade));
            ticks += 1;
            if step.effects.is_empty() {
                break;
            }
            assert!(ticks < 100, "snake should hit the wall");
        }
        assert!(!arcade.snake().is_some_and(|g| g.is_alive()));
        assert_eq!(arcade.status(), messages::SNAKE_DEAD);
    }

    #[test]
    fn test_escape_from_snake_returns_to_menu() {
        let mut arcade = Arcade::new(1);
        arcade.enter(ArcadeMode::Snake);
        let tick = snake_tick(&arcade);
        let step = arcade.handle_key(Key::Esc);
        assert!(!step.leave);
        assert_eq!(arcade.mode(), ArcadeMode::Menu);
        assert_eq!(arcade.status(), messages::SNAKE_PAUSED);
        assert!(arcade.handle_tick(tick).effects.is_empty());
    }

    #[test]
    fn test_triggered_rain_runs_out_and_leaves() {
        let mut arcade = Arcade::new(1);
        arcade.resize(20, 10);
        arcade.enter(ArcadeMode::Screensaver);
        let mut frames = 0;
        loop {
            let step = arcade.handle_tick(Tick::Screensaver { epoch: arcade.epoch() });
            if step.leave {
                break;
            }
            frames += 1;
            assert!(frames <= 200);
        }
        assert_eq!(frames, 199);
    }

    #[test]
    fn test_menu_rain_dismissed_with_escape() {
        let mut arcade = Arcade::new(1);
        arcade.enter(ArcadeMode::Menu);
        arcade.handle_key(Key::Down);
        arcade.handle_key(Key::Enter);
        assert_eq!(arcade.mode(), ArcadeMode::Screensaver);
        assert_eq!(arcade.rain().frames_left(), None);

        arcade.handle_key(Key::Esc);
        assert_eq!(arcade.mode(), ArcadeMode::Menu);
        assert_eq!(arcade.status(), messages::SCREENSAVER_OFF);
        assert!(arcade.handle_key(Key::Char('q')).leave);
    }

    #[test]
    fn test_fixed_seed_replays_but_clock_reseed_does_not() {
        let (mut a, mut b) = (Arcade::new(4), Arcade::new(4));
        assert_eq!(a.next_seed(), b.next_seed());

        let mut plain = Arcade::new(4);
        let mut live = Arcade::new(4).with_clock_reseed();
        assert_ne!(plain.next_seed(), live.next_seed());
    }

    #[test]
    fn test_classic_preset_sizes_the_board() {
        let mut arcade = Arcade::new(1).with_snake_config(SnakeConfig::classic());
        arcade.enter(ArcadeMode::Snake);
        let game = arcade.snake().unwrap();
        assert_eq!((game.width(), game.height()), (40, 20));

        arcade.handle_key(Key::Char('r'));
        assert_eq!(arcade.snake().map(|g| g.body().len()), Some(3));
    }
}
