//! Grid snake engine
//!
//! Pure game state: no timers, no rendering. The caller drives it with
//! [`SnakeGame::tick`] and re-arms its own timer from [`SnakeGame::next_tick`];
//! once that returns `None` the loop simply stops.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Grid coordinate. `x` grows to the right, `y` grows downwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Direction of movement
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Board size, starting layout and speed ramp of one game variant.
///
/// Only the presets build these, so a config always has a non-empty body
/// inside a non-empty board.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeConfig {
    width: i32,
    height: i32,
    /// Starting body, head first.
    start_body: Vec<Cell>,
    start_direction: Direction,
    food_score: u32,
    start_interval: Duration,
    interval_step: Duration,
    min_interval: Duration,
}

impl SnakeConfig {
    /// Small board embedded in the arcade view.
    pub fn arcade() -> Self {
        Self {
            width: 22,
            height: 12,
            start_body: vec![Cell::new(1, 1), Cell::new(0, 1)],
            start_direction: Direction::Right,
            food_score: 10,
            start_interval: Duration::from_millis(180),
            interval_step: Duration::from_millis(8),
            min_interval: Duration::from_millis(80),
        }
    }

    /// Full-size board with a three segment snake in the middle.
    pub fn classic() -> Self {
        Self {
            width: 40,
            height: 20,
            start_body: vec![Cell::new(20, 10), Cell::new(19, 10), Cell::new(18, 10)],
            start_direction: Direction::Right,
            food_score: 1,
            start_interval: Duration::from_millis(150),
            interval_step: Duration::from_millis(2),
            min_interval: Duration::from_millis(50),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    fn is_playable(&self) -> bool {
        let inside = |c: &Cell| (0..self.width).contains(&c.x) && (0..self.height).contains(&c.y);
        self.width > 0
            && self.height > 0
            && !self.start_body.is_empty()
            && self.start_body.iter().all(inside)
    }
}

/// Named snake variants selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnakePreset {
    #[default]
    Arcade,
    Classic,
}

impl SnakePreset {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "arcade" => Ok(SnakePreset::Arcade),
            "classic" => Ok(SnakePreset::Classic),
            _ => Err(format!("Unknown snake preset '{}'. Available: arcade, classic", s)),
        }
    }

    pub fn config(&self) -> SnakeConfig {
        match self {
            SnakePreset::Arcade => SnakeConfig::arcade(),
            SnakePreset::Classic => SnakeConfig::classic(),
        }
    }
}

impl fmt::Display for SnakePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakePreset::Arcade => write!(f, "arcade"),
            SnakePreset::Classic => write!(f, "classic"),
        }
    }
}

/// Why a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Tail,
    /// No free cell left for food: the snake filled the board.
    BoardFull,
}

/// What a single tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate { score: u32 },
    Died(Collision),
    /// Tick on a finished game; nothing changed.
    Idle,
}

#[derive(Debug, Clone)]
pub struct SnakeGame {
    config: SnakeConfig,
    body: VecDeque<Cell>,
    food: Cell,
    direction: Direction,
    queued: Direction,
    score: u32,
    interval: Duration,
    alive: bool,
    rng: StdRng,
}

/// Clock-derived seed for live games.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

impl SnakeGame {
    pub fn with_seed(config: SnakeConfig, seed: u64) -> Self {
        debug_assert!(config.is_playable(), "unplayable snake config: {config:?}");
        let mut game = Self {
            body: config.start_body.iter().copied().collect(),
            food: Cell::new(0, 0),
            direction: config.start_direction,
            queued: config.start_direction,
            score: 0,
            interval: config.start_interval,
            alive: true,
            rng: StdRng::seed_from_u64(seed),
            config,
        };
        game.spawn_food();
        game
    }

    /// Restart with the starting layout.
    pub fn reset_with_seed(&mut self, seed: u64) {
        *self = Self::with_seed(self.config.clone(), seed);
    }

    // ----- getters -----
    pub fn width(&self) -> i32 {
        self.config.width
    }
    pub fn height(&self) -> i32 {
        self.config.height
    }
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }
    pub fn head(&self) -> Cell {
        self.body[0]
    }
    pub fn food(&self) -> Cell {
        self.food
    }
    pub fn direction(&self) -> Direction {
        self.direction
    }
    pub fn queued_direction(&self) -> Direction {
        self.queued
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn interval(&self) -> Duration {
        self.interval
    }
    pub fn is_alive(&self) -> bool {
        self.alive
    }
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Delay until the next tick, or `None` once the game is over.
    pub fn next_tick(&self) -> Option<Duration> {
        self.alive.then_some(self.interval)
    }

    /// Queue a turn for the next tick. A turn straight back into the
    /// current direction is dropped; returns whether the turn was accepted.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if dir == self.direction.opposite() {
            return false;
        }
        self.queued = dir;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.alive {
            return TickOutcome::Idle;
        }

        self.direction = self.queued;
        let head = self.head().step(self.direction);

        if self.hits_wall(head) {
            self.alive = false;
            return TickOutcome::Died(Collision::Wall);
        }
        if self.occupied(head) {
            self.alive = false;
            return TickOutcome::Died(Collision::Tail);
        }

        self.body.push_front(head);
        if head != self.food {
            self.body.pop_back();
            return TickOutcome::Moved;
        }

        self.score += self.config.food_score;
        self.interval = self
            .interval
            .saturating_sub(self.config.interval_step)
            .max(self.config.min_interval);
        if !self.spawn_food() {
            self.alive = false;
            return TickOutcome::Died(Collision::BoardFull);
        }
        TickOutcome::Ate { score: self.score }
    }

    fn hits_wall(&self, c: Cell) -> bool {
        c.x < 0 || c.x >= self.config.width || c.y < 0 || c.y >= self.config.height
    }

    fn occupied(&self, c: Cell) -> bool {
        self.body.iter().any(|part| *part == c)
    }

    /// Place food on a free cell. Samples until it misses the body; on a
    /// crowded board falls back to picking among the remaining free cells.
    /// Returns false when no free cell exists.
    fn spawn_food(&mut self) -> bool {
        let (w, h) = (self.config.width, self.config.height);
        let cells = (w * h) as usize;
        if self.body.len() >= cells {
            return false;
        }

        for _ in 0..cells * 4 {
            let c = Cell::new(self.rng.gen_range(0..w), self.rng.gen_range(0..h));
            if !self.occupied(c) {
                self.food = c;
                return true;
            }
        }

        let free: Vec<Cell> = (0..h)
            .flat_map(|y| (0..w).map(move |x| Cell::new(x, y)))
            .filter(|c| !self.occupied(*c))
            .collect();
        match free.len() {
            0 => false,
            n => {
                self.food = free[self.rng.gen_range(0..n)];
                true
            }
        }
    }

    #[cfg(test)]
    fn place_food(&mut self, c: Cell) {
        self.food = c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn no_duplicates(game: &SnakeGame) -> bool {
        let set: HashSet<_> = game.body().iter().collect();
        set.len() == game.body().len()
    }

    #[test]
    fn test_new_game_layout() {
        let game = SnakeGame::with_seed(SnakeConfig::arcade(), 1);
        assert!(game.is_alive());
        assert_eq!(game.body().len(), 2);
        assert_eq!(game.head(), Cell::new(1, 1));
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.score(), 0);
        assert_eq!(game.interval(), Duration::from_millis(180));
        assert!(!game.body().contains(&game.food()));
    }

    #[test]
    fn test_reverse_turn_is_rejected() {
        let mut game = SnakeGame::with_seed(SnakeConfig::arcade(), 2);
        assert!(!game.turn(Direction::Left));
        assert_eq!(game.queued_direction(), Direction::Right);
        assert_eq!(game.direction(), Direction::Right);

        assert!(game.turn(Direction::Down));
        assert_eq!(game.queued_direction(), Direction::Down);
        // active direction only changes on tick
        assert_eq!(game.direction(), Direction::Right);
    }

    #[test]
    fn test_reverse_is_checked_against_active_direction() {
        let mut game = SnakeGame::with_seed(SnakeConfig::classic(), 3);
        assert!(game.turn(Direction::Up));
        // still moving right, so left is the reverse even though up is queued
        assert!(!game.turn(Direction::Left));
        assert_eq!(game.queued_direction(), Direction::Up);
    }

    #[test]
    fn test_move_keeps_length() {
        let mut game = SnakeGame::with_seed(SnakeConfig::arcade(), 4);
        game.place_food(Cell::new(10, 10));
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.body().len(), 2);
        assert_eq!(game.head(), Cell::new(2, 1));
        assert_eq!(game.body()[1], Cell::new(1, 1));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut game = SnakeGame::with_seed(SnakeConfig::arcade(), 5);
        game.place_food(Cell::new(2, 1));
        assert_eq!(game.tick(), TickOutcome::Ate { score: 10 });
        assert_eq!(game.body().len(), 3);
        assert_eq!(game.score(), 10);
        assert_eq!(game.interval(), Duration::from_millis(172));
        assert!(!game.body().contains(&game.food()));
    }

    #[test]
    fn test_wall_collision_after_21_ticks() {
        let mut game = SnakeGame::with_seed(SnakeConfig::arcade(), 6);
        // keep food off the row the snake travels along
        game.place_food(Cell::new(5, 8));

        for i in 0..20 {
            assert_eq!(game.tick(), TickOutcome::Moved, "tick {}", i + 1);
        }
        assert_eq!(game.head(), Cell::new(21, 1));
        let len_before = game.body().len();

        assert_eq!(game.tick(), TickOutcome::Died(Collision::Wall));
        assert!(!game.is_alive());
        assert_eq!(game.body().len(), len_before);
        assert_eq!(game.head(), Cell::new(21, 1));
        assert_eq!(game.next_tick(), None);
        assert_eq!(game.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_self_collision() {
        let config = SnakeConfig {
            start_body: vec![
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(3, 5),
                Cell::new(3, 6),
                Cell::new(4, 6),
                Cell::new(5, 6),
            ],
            ..SnakeConfig::classic()
        };
        let mut game = SnakeGame::with_seed(config, 7);
        game.place_food(Cell::new(30, 1));
        assert!(game.turn(Direction::Down));
        assert_eq!(game.tick(), TickOutcome::Died(Collision::Tail));
        assert!(!game.is_alive());
        assert_eq!(game.body().len(), 6);
    }

    #[test]
    fn test_food_never_on_body_across_seeds() {
        for seed in 0..500u64 {
            let mut game = SnakeGame::with_seed(SnakeConfig::arcade(), seed);
            assert!(!game.body().contains(&game.food()), "seed {seed}");
            // feed it a few times in a row
            for _ in 0..5 {
                let ahead = game.head().step(game.direction());
                if ahead.x >= game.width() {
                    break;
                }
                game.place_food(ahead);
                assert!(matches!(game.tick(), TickOutcome::Ate { .. }));
                assert!(!game.body().contains(&game.food()), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_crowded_board_still_finds_free_cell() {
        let mut body = Vec::new();
        for y in 0..3 {
            let row: Vec<i32> = if y % 2 == 0 { (0..4).rev().collect() } else { (0..4).collect() };
            for x in row {
                body.push(Cell::new(x, y));
            }
        }
        // 3x4 board, 11 of 12 cells taken
        body.pop();
        let config = SnakeConfig {
            width: 4,
            height: 3,
            start_body: body,
            ..SnakeConfig::arcade()
        };
        let game = SnakeGame::with_seed(config, 8);
        assert_eq!(game.food(), Cell::new(0, 2));
    }

    #[test]
    fn test_interval_is_monotonic_and_floored() {
        let mut game = SnakeGame::with_seed(SnakeConfig::arcade(), 9);
        let floor = game.config().min_interval();
        let mut last = game.interval();
        let mut ate = 0;
        // snake along the top rows in a zig-zag, feeding every step
        let mut dir = Direction::Right;
        while game.is_alive() && ate < 40 {
            let ahead = game.head().step(dir);
            if ahead.x < 0 || ahead.x >= game.width() {
                game.turn(Direction::Down);
                let down = game.head().step(Direction::Down);
                game.place_food(down);
                game.tick();
                dir = dir.opposite();
                game.turn(dir);
            } else {
                game.place_food(ahead);
                game.tick();
            }
            ate += 1;
            assert!(game.interval() <= last);
            assert!(game.interval() >= floor);
            last = game.interval();
        }
        assert_eq!(game.interval(), floor);
    }

    #[test]
    fn test_random_walk_keeps_body_unique() {
        let dirs = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        for seed in 0..50u64 {
            let mut game = SnakeGame::with_seed(SnakeConfig::classic(), seed);
            let mut pick = StdRng::seed_from_u64(seed ^ 0xdead_beef);
            for _ in 0..300 {
                game.turn(dirs[pick.gen_range(0..4)]);
                game.tick();
                if !game.is_alive() {
                    break;
                }
                assert!(no_duplicates(&game), "seed {seed}");
                assert!(!game.body().contains(&game.food()), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_reset_restores_start_state() {
        let mut game = SnakeGame::with_seed(SnakeConfig::arcade(), 10);
        game.place_food(Cell::new(2, 1));
        game.tick();
        game.turn(Direction::Up);
        game.tick();
        game.tick();
        assert!(!game.is_alive());

        game.reset_with_seed(11);
        assert!(game.is_alive());
        assert_eq!(game.score(), 0);
        assert_eq!(game.body().len(), 2);
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.interval(), Duration::from_millis(180));
        assert_eq!(game.next_tick(), Some(Duration::from_millis(180)));
    }

    #[test]
    fn test_presets_are_playable() {
        for preset in [SnakePreset::Arcade, SnakePreset::Classic] {
            assert!(preset.config().is_playable(), "{preset}");
            assert_eq!(SnakePreset::from_str(&preset.to_string()), Ok(preset));
        }
        assert!(SnakePreset::from_str("tron").is_err());

        let empty = SnakeConfig { start_body: Vec::new(), ..SnakeConfig::arcade() };
        assert!(!empty.is_playable());
        let flat = SnakeConfig { height: 0, ..SnakeConfig::arcade() };
        assert!(!flat.is_playable());
        let outside = SnakeConfig { start_body: vec![Cell::new(22, 1)], ..SnakeConfig::arcade() };
        assert!(!outside.is_playable());
    }

    #[test]
    #[should_panic(expected = "unplayable snake config")]
    #[cfg(debug_assertions)]
    fn test_unplayable_config_is_rejected() {
        let config = SnakeConfig { start_body: Vec::new(), ..SnakeConfig::arcade() };
        SnakeGame::with_seed(config, 1);
    }
}
