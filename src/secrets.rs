//! Hidden trigger detection
//!
//! Two independent trailing windows watch the key stream:
//! - a word buffer of lowercase letters (any non-letter key empties it),
//! - a fixed-width key window matched against the cheat code.

use std::collections::VecDeque;

use crate::constants::secrets::WORD_BUFFER_CAP;
use crate::types::Key;

/// Up up down down left right left right b a
pub const KONAMI: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::Char('b'),
    Key::Char('a'),
];

/// Words recognised in the letter stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerWord {
    Snake,
    Games,
    Matrix,
    Konami,
    Help,
}

impl TriggerWord {
    pub const ALL: [TriggerWord; 5] = [
        TriggerWord::Snake,
        TriggerWord::Games,
        TriggerWord::Matrix,
        TriggerWord::Konami,
        TriggerWord::Help,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerWord::Snake => "snake",
            TriggerWord::Games => "games",
            TriggerWord::Matrix => "matrix",
            TriggerWord::Konami => "konami",
            TriggerWord::Help => "help",
        }
    }
}

/// What a key completed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SecretHit {
    Word(TriggerWord),
    CheatCode,
}

#[derive(Debug, Clone, Default)]
pub struct SecretDetector {
    word: String,
    keys: VecDeque<Key>,
}

impl SecretDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word_buffer(&self) -> &str {
        &self.word
    }

    /// Feed one key. The cheat code wins when both would fire on the same key.
    pub fn observe(&mut self, key: Key) -> Option<SecretHit> {
        self.keys.push_back(lower(key));
        if self.keys.len() > KONAMI.len() {
            self.keys.pop_front();
        }
        if self.keys.iter().eq(KONAMI.iter()) {
            self.keys.clear();
            self.word.clear();
            return Some(SecretHit::CheatCode);
        }

        let Some(letter) = key.letter() else {
            self.word.clear();
            return None;
        };
        self.word.push(letter);
        let overflow = self.word.chars().count().saturating_sub(WORD_BUFFER_CAP);
        if overflow > 0 {
            self.word = self.word.chars().skip(overflow).collect();
        }

        let hit = TriggerWord::ALL
            .into_iter()
            .find(|w| self.word.contains(w.as_str()))?;
        self.word.clear();
        Some(SecretHit::Word(hit))
    }
}

fn lower(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(d: &mut SecretDetector, s: &str) -> Vec<SecretHit> {
        s.chars().filter_map(|c| d.observe(Key::Char(c))).collect()
    }

    #[test]
    fn test_word_fires_on_last_letter() {
        let mut d = SecretDetector::new();
        assert!(feed(&mut d, "snak").is_empty());
        assert_eq!(d.observe(Key::Char('e')), Some(SecretHit::Word(TriggerWord::Snake)));
        assert_eq!(d.word_buffer(), "");
    }

    #[test]
    fn test_word_inside_longer_phrase() {
        let mut d = SecretDetector::new();
        assert_eq!(feed(&mut d, "xxgamesyy"), vec![SecretHit::Word(TriggerWord::Games)]);
    }

    #[test]
    fn test_uppercase_letters_count() {
        let mut d = SecretDetector::new();
        assert_eq!(feed(&mut d, "MaTrIx"), vec![SecretHit::Word(TriggerWord::Matrix)]);
    }

    #[test]
    fn test_non_letter_resets_word() {
        let mut d = SecretDetector::new();
        feed(&mut d, "sna");
        assert_eq!(d.observe(Key::Down), None);
        assert_eq!(d.word_buffer(), "");
        assert!(feed(&mut d, "ke").is_empty());

        feed(&mut d, "he");
        d.observe(Key::Char('1'));
        assert!(feed(&mut d, "lp").is_empty());
    }

    #[test]
    fn test_buffer_is_bounded() {
        let mut d = SecretDetector::new();
        feed(&mut d, "qwqwqwqwqwqwqwqwqwqwqwqwqwqwqwqwqw");
        assert_eq!(d.word_buffer().chars().count(), WORD_BUFFER_CAP);
        assert!(d.word_buffer().ends_with("qw"));
    }

    #[test]
    fn test_cheat_code() {
        let mut d = SecretDetector::new();
        let hits: Vec<_> = KONAMI.iter().filter_map(|k| d.observe(*k)).collect();
        assert_eq!(hits, vec![SecretHit::CheatCode]);
    }

    #[test]
    fn test_cheat_code_after_noise() {
        let mut d = SecretDetector::new();
        d.observe(Key::Up);
        d.observe(Key::Char('x'));
        d.observe(Key::Enter);
        let hits: Vec<_> = KONAMI.iter().filter_map(|k| d.observe(*k)).collect();
        assert_eq!(hits, vec![SecretHit::CheatCode]);
    }

    #[test]
    fn test_cheat_code_broken_sequence() {
        let mut d = SecretDetector::new();
        let mut keys = KONAMI.to_vec();
        keys[4] = Key::Right;
        assert!(keys.iter().all(|k| d.observe(*k).is_none()));
    }

    #[test]
    fn test_cheat_code_uppercase_b_a() {
        let mut d = SecretDetector::new();
        for k in &KONAMI[..8] {
            assert_eq!(d.observe(*k), None);
        }
        assert_eq!(d.observe(Key::Char('B')), None);
        assert_eq!(d.observe(Key::Char('A')), Some(SecretHit::CheatCode));
    }

    #[test]
    fn test_typed_konami_word() {
        let mut d = SecretDetector::new();
        assert_eq!(feed(&mut d, "konami"), vec![SecretHit::Word(TriggerWord::Konami)]);
    }
}
