//! Matrix rain screensaver
//!
//! Every column carries 1-3 falling streams. Column buffers are rebuilt on
//! each non-zero resize; until then the effect has nothing to draw.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::timing::SCREENSAVER_FRAME;

const GLYPHS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク',
    'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ', 'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ',
    'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ', 'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ',
    'ル', 'レ', 'ロ', 'ワ', 'ヲ', 'ン',
];

/// One rendered cell of the rain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Head(char),
    Trail(char),
    Fade,
}

#[derive(Clone, Debug)]
struct Stream {
    glyph: char,
    pos: i32,
    speed: i32,
    len: i32,
}

#[derive(Clone, Debug)]
pub struct MatrixRain {
    columns: Vec<Vec<Stream>>,
    width: u16,
    height: u16,
    frames_left: Option<u32>, // None = run until dismissed
    rng: StdRng,
}

impl MatrixRain {
    pub fn new(seed: u64) -> Self {
        Self {
            columns: Vec::new(),
            width: 0,
            height: 0,
            frames_left: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start a run. `frames` limits how many frames it lasts.
    pub fn start(&mut self, frames: Option<u32>) {
        self.frames_left = frames;
        let (w, h) = (self.width, self.height);
        self.resize(w, h);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if width == 0 || height == 0 {
            self.columns.clear();
            return;
        }
        self.columns = (0..width).map(|_| self.spawn_column()).collect();
    }

    pub fn is_ready(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn frames_left(&self) -> Option<u32> {
        self.frames_left
    }

    /// Advance one frame. Returns the delay until the next frame, or `None`
    /// once a limited run is used up.
    pub fn tick(&mut self) -> Option<Duration> {
        if let Some(left) = self.frames_left.as_mut() {
            if *left == 0 {
                return None;
            }
            *left -= 1;
        }

        let height = self.height as i32;
        for col in 0..self.columns.len() {
            for i in 0..self.columns[col].len() {
                let glyph = self.random_glyph();
                let s = &mut self.columns[col][i];
                s.pos += s.speed;
                if s.pos > height + s.len {
                    s.pos = -s.len;
                    s.glyph = glyph;
                }
            }
        }

        match self.frames_left {
            Some(0) => None,
            _ => Some(SCREENSAVER_FRAME),
        }
    }

    /// Current frame as `height` rows of `width` cells.
    pub fn grid(&self) -> Vec<Vec<Glyph>> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut grid = vec![vec![Glyph::Empty; w]; h];
        for (x, streams) in self.columns.iter().enumerate().take(w) {
            for s in streams {
                for j in 0..s.len {
                    let y = s.pos + j;
                    if y < 0 || y >= h as i32 {
                        continue;
                    }
                    grid[y as usize][x] = if j == 0 {
                        Glyph::Head(s.glyph)
                    } else if j < s.len / 2 {
                        Glyph::Trail(s.glyph)
                    } else {
                        Glyph::Fade
                    };
                }
            }
        }
        grid
    }

    fn spawn_column(&mut self) -> Vec<Stream> {
        let streams = self.rng.gen_range(1..=3);
        (0..streams)
            .map(|_| Stream {
                glyph: self.random_glyph(),
                pos: self.rng.gen_range(0..self.height.max(1) as i32),
                speed: self.rng.gen_range(1..=2),
                len: self.rng.gen_range(5..=12),
            })
            .collect()
    }

    fn random_glyph(&mut self) -> char {
        GLYPHS[self.rng.gen_range(0..GLYPHS.len())]
    }
}
