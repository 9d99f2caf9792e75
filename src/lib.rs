//! pcterm - pcstyle.dev as a terminal interface
//!
//! Every connecting client gets its own [`Session`]: a small menu-driven
//! site (home, contact form, about) with a few hidden extras (an arcade
//! with Snake and a matrix-rain screensaver, and a secrets log).
//!
//! ## Architecture
//!
//! The session engine is pure: [`Session::handle`] takes an [`AppEvent`]
//! and returns the [`Effect`]s the host should carry out (timers, contact
//! submissions, quit). Rendering reads the session through [`ui::draw`].
//!
//! - **Server** (`pcterm`): one session per TCP connection, telnet framing
//! - **Local** (`pcterm-local`): a single session on the current terminal
//!
//! ```bash
//! cargo run --bin pcterm -- --port 2222
//! telnet localhost 2222
//! ```

// Core modules (no I/O)
pub mod constants;
pub mod theme;
pub mod types;

// Session state machines
pub mod arcade;
pub mod contact;
pub mod home;
pub mod matrix;
pub mod secrets;
pub mod secrets_log;
pub mod snake;

pub mod app;
pub mod ui;

// Contact endpoint client
pub mod api;

// Configuration (CLI + env + TOML file)
pub mod config;

// Telnet stream decoding (pure)
pub mod telnet;

// Tokio runtime pieces (native only)
#[cfg(feature = "native")]
pub mod driver;
#[cfg(feature = "native")]
pub mod server;

pub use api::{ApiClient, ContactRequest, ContactSubmitter};
pub use app::Session;
pub use config::Config;
pub use theme::{ColorScheme, Theme};
pub use types::{AppEvent, Effect, Key, View};
