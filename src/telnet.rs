//! Minimal telnet terminal stream
//!
//! Just enough of RFC 854/1073 for an interactive full-screen client:
//! we offer to echo and suppress go-ahead, ask for window size (NAWS), and
//! turn the inbound byte stream into [`AppEvent`]s. Everything else the
//! client negotiates is ignored.

use std::time::Duration;

use crate::types::{AppEvent, Key};

pub const IAC: u8 = 255;
pub const DONT: u8 = 254;
pub const DO: u8 = 253;
pub const WONT: u8 = 252;
pub const WILL: u8 = 251;
pub const SB: u8 = 250;
pub const SE: u8 = 240;

pub const OPT_ECHO: u8 = 1;
pub const OPT_SGA: u8 = 3;
pub const OPT_NAWS: u8 = 31;

/// How long a lone ESC waits for the rest of an escape sequence.
pub const ESC_TIMEOUT: Duration = Duration::from_millis(30);

const MAX_SUBNEG: usize = 64;
const MAX_CSI: usize = 16;

/// Sent once on accept: character mode with server-side echo, plus a NAWS request.
pub fn negotiation() -> [u8; 9] {
    [IAC, WILL, OPT_ECHO, IAC, WILL, OPT_SGA, IAC, DO, OPT_NAWS]
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Wire {
    Data,
    Iac,
    Option,
    Sub,
    SubIac,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Keys {
    Ground,
    Esc,
    Csi,
    Ss3,
}

#[derive(Debug)]
pub struct InputDecoder {
    wire: Wire,
    keys: Keys,
    sub: Vec<u8>,
    csi: Vec<u8>,
    utf8: Vec<u8>,
    after_cr: bool,
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDecoder {
    pub fn new() -> Self {
        Self {
            wire: Wire::Data,
            keys: Keys::Ground,
            sub: Vec::new(),
            csi: Vec::new(),
            utf8: Vec::new(),
            after_cr: false,
        }
    }

    /// An ESC is waiting to learn whether it starts a sequence.
    pub fn pending_escape(&self) -> bool {
        self.keys == Keys::Esc
    }

    /// Give up waiting: a pending ESC becomes an Escape key press.
    pub fn flush_pending(&mut self) -> Vec<AppEvent> {
        if self.keys == Keys::Esc {
            self.keys = Keys::Ground;
            return vec![AppEvent::Key(Key::Esc)];
        }
        Vec::new()
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Vec<AppEvent> {
        let mut out = Vec::new();
        for &b in bytes {
            match self.wire {
                Wire::Data => {
                    if b == IAC {
                        self.wire = Wire::Iac;
                    } else {
                        self.key_byte(b, &mut out);
                    }
                }
                Wire::Iac => {
                    self.wire = match b {
                        IAC => {
                            self.key_byte(IAC, &mut out);
                            Wire::Data
                        }
                        WILL | WONT | DO | DONT => Wire::Option,
                        SB => {
                            self.sub.clear();
                            Wire::Sub
                        }
                        _ => Wire::Data,
                    };
                }
                Wire::Option => self.wire = Wire::Data,
                Wire::Sub => {
                    if b == IAC {
                        self.wire = Wire::SubIac;
                    } else if self.sub.len() < MAX_SUBNEG {
                        self.sub.push(b);
                    }
                }
                Wire::SubIac => match b {
                    SE => {
                        self.wire = Wire::Data;
                        if let Some(ev) = self.finish_subnegotiation() {
                            out.push(ev);
                        }
                    }
                    IAC => {
                        if self.sub.len() < MAX_SUBNEG {
                            self.sub.push(IAC);
                        }
                        self.wire = Wire::Sub;
                    }
                    _ => self.wire = Wire::Sub,
                },
            }
        }
        out
    }

    fn finish_subnegotiation(&mut self) -> Option<AppEvent> {
        let sub = std::mem::take(&mut self.sub);
        match sub.as_slice() {
            [OPT_NAWS, w1, w2, h1, h2, ..] => Some(AppEvent::Resize {
                width: u16::from_be_bytes([*w1, *w2]),
                height: u16::from_be_bytes([*h1, *h2]),
            }),
            _ => None,
        }
    }

    fn key_byte(&mut self, b: u8, out: &mut Vec<AppEvent>) {
        match self.keys {
            Keys::Ground => self.ground(b, out),
            Keys::Esc => match b {
                b'[' => self.enter_csi(),
                b'O' => self.keys = Keys::Ss3,
                0x1b => out.push(AppEvent::Key(Key::Esc)),
                _ => {
                    out.push(AppEvent::Key(Key::Esc));
                    self.keys = Keys::Ground;
                    self.ground(b, out);
                }
            },
            Keys::Csi => {
                if (0x40..=0x7e).contains(&b) {
                    self.keys = Keys::Ground;
                    let key = match b {
                        b'A' => Some(Key::Up),
                        b'B' => Some(Key::Down),
                        b'C' => Some(Key::Right),
                        b'D' => Some(Key::Left),
                        b'Z' => Some(Key::BackTab),
                        _ => None,
                    };
                    out.extend(key.map(AppEvent::Key));
                } else if self.csi.len() < MAX_CSI {
                    self.csi.push(b);
                } else {
                    self.keys = Keys::Ground;
                }
            }
            Keys::Ss3 => {
                self.keys = Keys::Ground;
                let key = match b {
                    b'A' => Some(Key::Up),
                    b'B' => Some(Key::Down),
                    b'C' => Some(Key::Right),
                    b'D' => Some(Key::Left),
                    _ => None,
                };
                out.extend(key.map(AppEvent::Key));
            }
        }
    }

    fn enter_csi(&mut self) {
        self.csi.clear();
        self.keys = Keys::Csi;
    }

    fn ground(&mut self, b: u8, out: &mut Vec<AppEvent>) {
        let after_cr = std::mem::replace(&mut self.after_cr, false);
        let key = match b {
            0x1b => {
                self.keys = Keys::Esc;
                None
            }
            b'\r' => {
                self.after_cr = true;
                Some(Key::Enter)
            }
            b'\n' if after_cr => None,
            b'\n' => Some(Key::Enter),
            0x00 => None,
            0x7f | 0x08 => Some(Key::Backspace),
            b'\t' => Some(Key::Tab),
            0x03 => Some(Key::Interrupt),
            0x01..=0x1f => None,
            _ => self.utf8_byte(b),
        };
        out.extend(key.map(AppEvent::Key));
    }

    fn utf8_byte(&mut self, b: u8) -> Option<Key> {
        self.utf8.push(b);
        match std::str::from_utf8(&self.utf8) {
            Ok(s) => {
                let c = s.chars().next();
                self.utf8.clear();
                c.map(Key::Char)
            }
            Err(e) if e.error_len().is_none() && self.utf8.len() < 4 => None,
            Err(_) => {
                self.utf8.clear();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(events: Vec<AppEvent>) -> Vec<Key> {
        events
            .into_iter()
            .filter_map(|e| match e {
                AppEvent::Key(k) => Some(k),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_negotiation_bytes() {
        assert_eq!(negotiation(), [255, 251, 1, 255, 251, 3, 255, 253, 31]);
    }

    #[test]
    fn test_plain_text_and_controls() {
        let mut d = InputDecoder::new();
        assert_eq!(
            keys(d.feed(b"hi\t\x7f\x03")),
            vec![Key::Char('h'), Key::Char('i'), Key::Tab, Key::Backspace, Key::Interrupt]
        );
    }

    #[test]
    fn test_line_endings_give_one_enter() {
        let mut d = InputDecoder::new();
        assert_eq!(keys(d.feed(b"\r\n")), vec![Key::Enter]);
        assert_eq!(keys(d.feed(b"\r\0")), vec![Key::Enter]);
        assert_eq!(keys(d.feed(b"\n")), vec![Key::Enter]);
        assert_eq!(keys(d.feed(b"\r")), vec![Key::Enter]);
        assert_eq!(keys(d.feed(b"\n")), vec![]);
    }

    #[test]
    fn test_arrow_sequences() {
        let mut d = InputDecoder::new();
        assert_eq!(
            keys(d.feed(b"\x1b[A\x1b[B\x1bOC\x1b[D\x1b[Z")),
            vec![Key::Up, Key::Down, Key::Right, Key::Left, Key::BackTab]
        );
        assert!(!d.pending_escape());
    }

    #[test]
    fn test_sequence_split_across_reads() {
        let mut d = InputDecoder::new();
        assert!(d.feed(b"\x1b").is_empty());
        assert!(d.pending_escape());
        assert_eq!(keys(d.feed(b"[A")), vec![Key::Up]);
    }

    #[test]
    fn test_lone_escape() {
        let mut d = InputDecoder::new();
        assert!(d.feed(b"\x1b").is_empty());
        assert_eq!(keys(d.flush_pending()), vec![Key::Esc]);
        assert!(d.flush_pending().is_empty());

        assert_eq!(keys(d.feed(b"\x1bq")), vec![Key::Esc, Key::Char('q')]);
    }

    #[test]
    fn test_unknown_csi_is_swallowed() {
        let mut d = InputDecoder::new();
        assert_eq!(keys(d.feed(b"\x1b[3~x")), vec![Key::Char('x')]);
    }

    #[test]
    fn test_naws_becomes_resize() {
        let mut d = InputDecoder::new();
        let events = d.feed(&[IAC, SB, OPT_NAWS, 0, 120, 0, 40, IAC, SE, b'a']);
        assert_eq!(
            events,
            vec![AppEvent::Resize { width: 120, height: 40 }, AppEvent::Key(Key::Char('a'))]
        );
    }

    #[test]
    fn test_naws_with_escaped_iac() {
        let mut d = InputDecoder::new();
        let events = d.feed(&[IAC, SB, OPT_NAWS, 1, IAC, IAC, 0, 50, IAC, SE]);
        assert_eq!(events, vec![AppEvent::Resize { width: 511, height: 50 }]);
    }

    #[test]
    fn test_option_replies_are_ignored() {
        let mut d = InputDecoder::new();
        let events = d.feed(&[IAC, DO, OPT_ECHO, IAC, WILL, OPT_NAWS, b'x']);
        assert_eq!(keys(events), vec![Key::Char('x')]);
    }

    #[test]
    fn test_utf8_across_reads() {
        let mut d = InputDecoder::new();
        let bytes = "ż".as_bytes();
        assert!(d.feed(&bytes[..1]).is_empty());
        assert_eq!(keys(d.feed(&bytes[1..])), vec![Key::Char('ż')]);
    }
}
